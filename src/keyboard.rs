use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use egui::Key;

type Listener = Box<dyn FnMut(Key)>;

#[derive(Default)]
struct HubListeners {
    next_id: u64,
    // `None` while the listener is being called.
    listeners: BTreeMap<u64, Option<Listener>>,
}

/// Window-level key listeners, notified for every key press regardless of focus.
///
/// Listeners are registered through [`KeyboardHub::subscribe`] and stay registered exactly as
/// long as the returned [`KeySubscription`] lives.
#[derive(Clone, Default)]
pub struct KeyboardHub {
    listeners: Rc<RefCell<HubListeners>>,
}

impl std::fmt::Debug for KeyboardHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "the listener is removed when the subscription is dropped"]
    pub fn subscribe(&self, listener: impl FnMut(Key) + 'static) -> KeySubscription {
        let mut hub = self.listeners.borrow_mut();
        let id = hub.next_id;
        hub.next_id = id.wrapping_add(1);
        hub.listeners.insert(id, Some(Box::new(listener)));
        log::trace!("key subscription {id} acquired");
        KeySubscription {
            id,
            hub: Rc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().listeners.len()
    }

    /// Notify every listener of a key press, in subscription order.
    ///
    /// Listeners may subscribe or unsubscribe while being notified; a listener removed during
    /// dispatch is not called afterwards.
    pub fn key_pressed(&self, key: Key) {
        let ids: Vec<u64> = self.listeners.borrow().listeners.keys().copied().collect();
        for id in ids {
            let Some(mut listener) = self
                .listeners
                .borrow_mut()
                .listeners
                .get_mut(&id)
                .and_then(Option::take)
            else {
                continue;
            };

            listener(key);

            if let Some(slot) = self.listeners.borrow_mut().listeners.get_mut(&id) {
                *slot = Some(listener);
            }
        }
    }

    /// Forward this frame's key presses (not repeats) from egui.
    pub fn forward_key_presses(&self, ctx: &egui::Context) {
        let keys: Vec<Key> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        ..
                    } => Some(*key),
                    _ => None,
                })
                .collect()
        });
        for key in keys {
            self.key_pressed(key);
        }
    }
}

/// A registered key listener. Dropping it (or calling [`Self::release`]) unregisters it.
#[derive(Debug)]
pub struct KeySubscription {
    id: u64,
    hub: Weak<RefCell<HubListeners>>,
}

impl KeySubscription {
    pub fn release(self) {}
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        // Removing the slot mid-dispatch keeps `key_pressed` from putting the listener back.
        if let Ok(mut hub) = hub.try_borrow_mut() {
            hub.listeners.remove(&self.id);
            log::trace!("key subscription {} released", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn listener_is_called_until_released() {
        let hub = KeyboardHub::new();
        let count = Rc::new(Cell::new(0));

        let subscription = {
            let count = count.clone();
            hub.subscribe(move |key| {
                if key == Key::Escape {
                    count.set(count.get() + 1);
                }
            })
        };

        hub.key_pressed(Key::Escape);
        hub.key_pressed(Key::A);
        assert_eq!(count.get(), 1);

        subscription.release();
        assert_eq!(hub.listener_count(), 0);

        hub.key_pressed(Key::Escape);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn sequential_subscriptions_do_not_accumulate() {
        let hub = KeyboardHub::new();
        let count = Rc::new(Cell::new(0));

        for _ in 0..3 {
            let count = count.clone();
            let _subscription = hub.subscribe(move |_| count.set(count.get() + 1));
            assert_eq!(hub.listener_count(), 1);
        }

        hub.key_pressed(Key::Escape);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let hub = KeyboardHub::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let _first = {
            let order = order.clone();
            hub.subscribe(move |_| order.borrow_mut().push(1))
        };
        let _second = {
            let order = order.clone();
            hub.subscribe(move |_| order.borrow_mut().push(2))
        };

        hub.key_pressed(Key::Escape);
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn subscription_outliving_hub_is_fine() {
        let subscription = KeyboardHub::new().subscribe(|_| {});
        drop(subscription);
    }
}
