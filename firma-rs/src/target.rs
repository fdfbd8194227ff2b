//! Event target with explicit listener registration and removal.
//!
//! [`EventTarget`] plays the part of the canvas element: listeners are
//! registered per [`EventKind`] and removed by id. [`Mount`] owns the ids a
//! signature pad registered and removes them when it is dropped, so mounting
//! and unmounting repeatedly never accumulates listeners.

use crate::event::{EventKind, InputEvent};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Identifies one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Handler = Rc<RefCell<dyn FnMut(&InputEvent)>>;

struct Listener {
    id: ListenerId,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
pub(crate) struct ListenerTable {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl ListenerTable {
    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }
}

/// A single-threaded event source. Clones share the same listener table.
#[derive(Clone, Default)]
pub struct EventTarget {
    table: Rc<RefCell<ListenerTable>>,
}

impl EventTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind`. Handlers run in registration order.
    pub fn add_event_listener(
        &self,
        kind: EventKind,
        handler: impl FnMut(&InputEvent) + 'static,
    ) -> ListenerId {
        let mut table = self.table.borrow_mut();
        let id = ListenerId(table.next_id);
        table.next_id += 1;
        table.listeners.push(Listener {
            id,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
        log::debug!("added {} listener {:?}", kind, id);
        id
    }

    /// Remove a listener. Returns false when the id is not registered.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        let removed = self.table.borrow_mut().remove(id);
        if removed {
            log::debug!("removed listener {:?}", id);
        }
        removed
    }

    /// Deliver `event` to every listener registered for its kind and return
    /// how many were invoked.
    ///
    /// The set of listeners is fixed when dispatch starts, so handlers may add
    /// or remove listeners while running. A handler that is already running
    /// further up the stack is skipped with a warning.
    pub fn dispatch(&self, event: &InputEvent) -> usize {
        let kind = event.kind();
        let handlers: Vec<Handler> = self
            .table
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| Rc::clone(&l.handler))
            .collect();

        let mut invoked = 0;
        for handler in &handlers {
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    (&mut *handler)(event);
                    invoked += 1;
                }
                Err(_) => log::warn!("{} listener is already running, skipped", kind),
            };
        }
        invoked
    }

    /// Total number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.table.borrow().listeners.len()
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count_for(&self, kind: EventKind) -> usize {
        self.table
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<ListenerTable>> {
        Rc::downgrade(&self.table)
    }
}

/// Listeners registered on an [`EventTarget`] on behalf of one owner.
///
/// Dropping the mount (or calling [`Mount::unmount`]) removes them. If the
/// target is gone already there is nothing to remove.
#[must_use = "dropping a Mount immediately removes its listeners"]
pub struct Mount {
    target: Weak<RefCell<ListenerTable>>,
    ids: Vec<ListenerId>,
}

impl Mount {
    pub(crate) fn new(target: &EventTarget, ids: Vec<ListenerId>) -> Self {
        Self {
            target: target.downgrade(),
            ids,
        }
    }

    pub fn listener_ids(&self) -> &[ListenerId] {
        &self.ids
    }

    /// Remove the listeners now instead of when the mount goes out of scope.
    pub fn unmount(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        let ids = std::mem::take(&mut self.ids);
        if ids.is_empty() {
            return;
        }
        if let Some(table) = self.target.upgrade() {
            let mut table = table.borrow_mut();
            for id in &ids {
                table.remove(*id);
            }
            log::debug!("unmounted {} listeners", ids.len());
        }
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.detach();
    }
}
