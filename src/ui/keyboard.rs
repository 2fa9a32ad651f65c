//! Document-level keyboard listeners with scoped registration.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::domain::events::KeyInput;

type Listener = Rc<dyn Fn(&KeyInput)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Receives every key press before the focused pane does.
#[derive(Clone, Default)]
pub struct KeyboardHub {
    registry: Rc<RefCell<Registry>>,
}

impl KeyboardHub {
    /// Registers `listener` until the returned handle is dropped.
    pub fn add_listener<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn(&KeyInput) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(listener)));

        ListenerHandle {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Calls every listener registered at the time of the call. Listeners may
    /// add or drop registrations while being called.
    pub fn dispatch(&self, key: &KeyInput) {
        let listeners: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(key);
        }
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Keeps one listener registered; dropping it removes the listener.
pub struct ListenerHandle {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}
