//! Type-keyed publish/subscribe bus.
//!
//! Subscribers register a callback for one event type and receive a
//! [`Subscription`] token. Publishing calls every subscriber of that type,
//! synchronously and in subscription order. The callback list is copied
//! before dispatch, so a callback may subscribe or unsubscribe freely; the
//! change applies to the next publish.
//!
//! The bus is single-threaded. Share it with `Rc<EventBus>`; every method
//! takes `&self`.

use std::any::{type_name, Any, TypeId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

type Handler = Rc<dyn Fn(&dyn Any)>;

/// Token returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    type_id: TypeId,
    id: u64,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<HashMap<TypeId, Vec<(u64, Handler)>>>,
    next_id: Cell<u64>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for events of type `E`.
    pub fn subscribe<E, F>(&self, callback: F) -> Subscription
    where
        E: Any,
        F: Fn(&E) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let handler: Handler = Rc::new(move |event: &dyn Any| {
            if let Some(event) = event.downcast_ref::<E>() {
                callback(event);
            }
        });
        let type_id = TypeId::of::<E>();
        self.handlers
            .borrow_mut()
            .entry(type_id)
            .or_default()
            .push((id, handler));
        tracing::trace!(event = type_name::<E>(), id, "Subscribed");
        Subscription { type_id, id }
    }

    /// Removes the matching subscription. Unknown or stale tokens are ignored.
    pub fn unsubscribe(&self, token: Subscription) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let Some(list) = handlers.get_mut(&token.type_id) else {
            return false;
        };
        let before = list.len();
        list.retain(|(id, _)| *id != token.id);
        let removed = list.len() != before;
        if list.is_empty() {
            handlers.remove(&token.type_id);
        }
        removed
    }

    /// Delivers `event` to every current subscriber of `E`. Returns the
    /// number of callbacks invoked.
    pub fn publish<E: Any>(&self, event: &E) -> usize {
        let snapshot: Vec<Handler> = match self.handlers.borrow().get(&TypeId::of::<E>()) {
            Some(list) => list.iter().map(|(_, h)| Rc::clone(h)).collect(),
            None => return 0,
        };
        for handler in &snapshot {
            handler(event);
        }
        snapshot.len()
    }

    #[must_use]
    pub fn subscriber_count<E: Any>(&self) -> usize {
        self.handlers
            .borrow()
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    /// Drops every subscription for every event type.
    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers = self.handlers.borrow();
        f.debug_struct("EventBus")
            .field("event_types", &handlers.len())
            .field("subscribers", &handlers.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

/// Commands raised by the menu bar and keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GuiCommand {
    AppQuit,
    SimTogglePause,
    FileNewSimulation,
    FileLoadSimulation,
    FileSaveSimulation,
    ViewShowMenu,
    #[default]
    None,
}

/// Request to switch to the scene registered under `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRequest {
    pub key: String,
}

impl SceneRequest {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}
