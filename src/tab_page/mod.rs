use crate::commands::{CommandBus, InsertSide, ShellCommand};
use crate::types::WindowId;

mod frames;
mod payload;
mod ui;


pub use frames::{TabFrame, TabPageFrames, TabPages};
pub use payload::{DataTransfer, DragData, DragOrigin, DragTabPayload, DropEffect, TAB_DRAG_TYPE};
pub use ui::TAB_PAGE_INDICATOR_SIZE;

/// Builds and opens the context menu of a tab page. Supplied by the host.
pub trait TabPageContextMenu {
    fn open_tab_page_menu(&mut self, frames: &TabPageFrames);
}

impl<F: FnMut(&TabPageFrames)> TabPageContextMenu for F {
    fn open_tab_page_menu(&mut self, frames: &TabPageFrames) {
        self(frames);
    }
}

/// Fold one `SetTabPageHover` report into the container's hovered page.
///
/// A leave only clears the page that reported it: when the pointer crosses from one page to
/// the next, the old page's leave may arrive after the new page's enter.
pub fn apply_page_hover(current: Option<usize>, page_index: usize, hovered: bool) -> Option<usize> {
    if hovered {
        Some(page_index)
    } else if current == Some(page_index) {
        None
    } else {
        current
    }
}

/// Everything a tab page reads from its container for one render.
#[derive(Clone, Copy, Debug)]
pub struct TabPageProps<'a> {
    /// Index of this page in the strip.
    pub index: usize,

    pub frames: &'a TabPageFrames,

    /// Where the tab currently being dragged came from, if the drag started in this strip.
    pub drag_origin: Option<DragOrigin>,

    /// Preview a page while hovering it (hover state is only reported when enabled).
    pub preview_on_hover: bool,

    /// This page is the one currently shown.
    pub active: bool,

    pub window_id: WindowId,
}

/// Per-render visual flags of a tab page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TabPageVisuals {
    pub active: bool,
    /// Some tab on the page is playing sound that is not muted.
    pub audio_playback_active: bool,
}

/// What [`TabPageDropZone::on_drop`] did with a drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The page has no tabs, so it is not a drop target.
    EmptyPage,
    /// The drag carried no tab; only the drop itself was reported.
    NoTabPayload,
    /// The move (and unpin, if needed) was queued for the next tick.
    MoveQueued { side: InsertSide, unpin: bool },
}

/// Drop target and hover affordance for one page of a paged tab strip.
///
/// Holds no state of its own: hover state lives in the container (updated through commands)
/// and every gesture turns into [`ShellCommand`]s on the bus.
#[derive(Clone, Copy, Debug)]
pub struct TabPageDropZone<'a> {
    props: TabPageProps<'a>,
}

impl<'a> TabPageDropZone<'a> {
    pub fn new(props: TabPageProps<'a>) -> Self {
        Self { props }
    }

    pub fn props(&self) -> &TabPageProps<'a> {
        &self.props
    }

    pub fn index(&self) -> usize {
        self.props.index
    }

    /// Report hovering when preview-on-hover is enabled. Returns whether anything was sent.
    pub fn on_mouse_enter(&self, bus: &CommandBus) -> bool {
        self.set_hover(bus, true)
    }

    /// Report the end of hovering when preview-on-hover is enabled. Returns whether anything
    /// was sent.
    pub fn on_mouse_leave(&self, bus: &CommandBus) -> bool {
        self.set_hover(bus, false)
    }

    /// Every page accepts a dragged tab as a move.
    pub fn on_drag_over(&self, transfer: &mut DataTransfer) {
        transfer.drop_effect = DropEffect::Move;
        transfer.prevent_default();
    }

    /// Move the dropped tab next to this page's first tab.
    ///
    /// The move is deferred to the next tick: applying it while the drop is still being
    /// handled would keep the drag source from seeing its drag end.
    pub fn on_drop(&self, transfer: &DataTransfer, bus: &CommandBus) -> DropOutcome {
        let Some(anchor) = self.props.frames.first() else {
            log::trace!("drop on empty tab page {} ignored", self.props.index);
            return DropOutcome::EmptyPage;
        };

        bus.dispatch(ShellCommand::DataDropped {
            window_id: self.props.window_id,
        });

        let Some(payload) = transfer.tab_payload() else {
            log::warn!(
                "drop on tab page {} without a {} payload (kinds: {:?})",
                self.props.index,
                TAB_DRAG_TYPE,
                transfer.kinds().collect::<Vec<_>>()
            );
            return DropOutcome::NoTabPayload;
        };

        let side = self
            .props
            .drag_origin
            .map_or(InsertSide::Before, |origin| {
                origin.insert_side_for(self.props.index)
            });
        let unpin = payload.pinned_location;

        log::debug!(
            "tab {} dropped on page {} (origin {:?}): {side:?} {}",
            payload.key,
            self.props.index,
            self.props.drag_origin,
            anchor.key
        );

        let mut deferred = vec![ShellCommand::MoveTab {
            key: payload.key,
            anchor: anchor.key,
            side,
        }];
        if unpin {
            deferred.push(ShellCommand::SetTabPinned {
                tab_id: payload.tab_id,
                pinned: false,
            });
        }
        bus.defer(deferred);

        DropOutcome::MoveQueued { side, unpin }
    }

    pub fn on_context_menu(&self, menu: &mut dyn TabPageContextMenu) {
        menu.open_tab_page_menu(self.props.frames);
    }

    /// Show this page.
    pub fn on_click(&self, bus: &CommandBus) {
        bus.dispatch(ShellCommand::SetTabPageIndex {
            page_index: self.props.index,
        });
    }

    pub fn visuals(&self) -> TabPageVisuals {
        TabPageVisuals {
            active: self.props.active,
            audio_playback_active: self.props.frames.audio_playback_active(),
        }
    }

    fn set_hover(&self, bus: &CommandBus, hovered: bool) -> bool {
        if !self.props.preview_on_hover {
            return false;
        }
        bus.dispatch(ShellCommand::SetTabPageHover {
            page_index: self.props.index,
            hovered,
        });
        true
    }
}
