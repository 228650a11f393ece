use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::popup::PopupDetail;
use crate::types::{TabId, TabKey, WindowId};

/// Where a moved tab lands relative to its anchor tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum InsertSide {
    Before,
    After,
}

impl InsertSide {
    pub fn is_after(self) -> bool {
        self == Self::After
    }
}

/// A state change requested from the host's store.
///
/// Widgets never mutate shared state themselves; they describe the change and the host
/// applies it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ShellCommand {
    /// Dismiss the popup window (forget its detail record).
    ClearPopupDetail,

    /// Replace the popup detail record, e.g. after the content reported a new preferred size.
    UpdatePopupDetail(PopupDetail),

    SetTabPageHover { page_index: usize, hovered: bool },

    SetTabPageIndex { page_index: usize },

    MoveTab {
        key: TabKey,
        anchor: TabKey,
        side: InsertSide,
    },

    SetTabPinned { tab_id: TabId, pinned: bool },

    /// A drop completed somewhere in this window; clears window-wide drag visuals.
    DataDropped { window_id: WindowId },
}

#[derive(Debug, Default)]
struct BusQueues {
    ready: VecDeque<ShellCommand>,
    deferred: VecDeque<ShellCommand>,
    tick: u64,
}

/// The dispatch capability handed to widgets.
///
/// Cheap to clone; every clone feeds the same queues. Commands sent with [`Self::dispatch`]
/// are ready immediately. Commands sent with [`Self::defer`] only become ready after the host
/// calls [`Self::next_tick`], which models "run after the current event-handling turn".
/// Both queues are FIFO, so commands are observed in the order they were issued.
#[derive(Clone, Debug, Default)]
pub struct CommandBus {
    queues: Rc<RefCell<BusQueues>>,
}

impl CommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self, command: ShellCommand) {
        log::debug!("dispatch {command:?}");
        self.queues.borrow_mut().ready.push_back(command);
    }

    /// Queue commands for the next scheduling turn, as one batch.
    pub fn defer(&self, commands: impl IntoIterator<Item = ShellCommand>) {
        let mut queues = self.queues.borrow_mut();
        let tick = queues.tick;
        for command in commands {
            log::debug!("defer until tick {} {command:?}", tick + 1);
            queues.deferred.push_back(command);
        }
    }

    /// Run the deferred turn: everything deferred so far becomes ready, in order.
    ///
    /// Returns the number of commands that were promoted.
    pub fn next_tick(&self) -> usize {
        let mut queues = self.queues.borrow_mut();
        queues.tick = queues.tick.wrapping_add(1);
        let promoted = queues.deferred.len();
        let deferred = std::mem::take(&mut queues.deferred);
        queues.ready.extend(deferred);
        promoted
    }

    /// Take every ready command, oldest first.
    pub fn drain(&self) -> Vec<ShellCommand> {
        self.queues.borrow_mut().ready.drain(..).collect()
    }

    pub fn ready_len(&self) -> usize {
        self.queues.borrow().ready.len()
    }

    pub fn deferred_len(&self) -> usize {
        self.queues.borrow().deferred.len()
    }

    /// Number of deferred turns that have run.
    pub fn tick(&self) -> u64 {
        self.queues.borrow().tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deferred_commands_wait_for_next_tick() {
        let bus = CommandBus::new();
        bus.defer([ShellCommand::SetTabPageIndex { page_index: 1 }]);
        bus.dispatch(ShellCommand::ClearPopupDetail);

        assert_eq!(bus.drain(), vec![ShellCommand::ClearPopupDetail]);
        assert_eq!(bus.deferred_len(), 1);

        assert_eq!(bus.next_tick(), 1);
        assert_eq!(
            bus.drain(),
            vec![ShellCommand::SetTabPageIndex { page_index: 1 }]
        );
        assert_eq!(bus.tick(), 1);
    }

    #[test]
    fn clones_share_queues_and_keep_issue_order() {
        let bus = CommandBus::new();
        let other = bus.clone();

        bus.defer([ShellCommand::SetTabPageIndex { page_index: 0 }]);
        other.defer([
            ShellCommand::SetTabPageIndex { page_index: 1 },
            ShellCommand::SetTabPageIndex { page_index: 2 },
        ]);
        bus.next_tick();

        let pages: Vec<usize> = other
            .drain()
            .into_iter()
            .filter_map(|command| match command {
                ShellCommand::SetTabPageIndex { page_index } => Some(page_index),
                _ => None,
            })
            .collect();
        assert_eq!(pages, vec![0, 1, 2]);
    }

    #[test]
    fn deferred_commands_stay_queued_across_drains_of_the_same_turn() {
        let bus = CommandBus::new();
        bus.dispatch(ShellCommand::DataDropped {
            window_id: WindowId(1),
        });
        bus.defer([ShellCommand::SetTabPageIndex { page_index: 3 }]);

        assert_eq!(bus.drain().len(), 1);
        assert!(bus.drain().is_empty());
        assert_eq!(bus.deferred_len(), 1);

        bus.next_tick();
        assert_eq!(bus.ready_len(), 1);
        assert_eq!(bus.deferred_len(), 0);
    }

    #[test]
    fn next_tick_without_deferred_work_is_harmless() {
        let bus = CommandBus::new();
        assert_eq!(bus.next_tick(), 0);
        assert!(bus.drain().is_empty());
    }
}
