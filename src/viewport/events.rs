//! Pointer event subscriptions.

use rustc_hash::FxHashMap;

use crate::input::{PointerEvent, PointerEventKind};

/// Callback run for each matching pointer event.
pub type PointerHandler = Box<dyn FnMut(&PointerEvent)>;

/// Handle for a registered [`PointerHandler`]. Pass it back to unsubscribe.
#[must_use = "dropping a Subscription makes the handler impossible to remove"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    kind: PointerEventKind,
    id: u64,
}

impl Subscription {
    /// Event kind this subscription listens to.
    #[must_use]
    pub fn kind(&self) -> PointerEventKind {
        self.kind
    }
}

/// Handlers grouped by event kind, run in subscription order.
#[derive(Default)]
pub struct EventHub {
    handlers: FxHashMap<PointerEventKind, Vec<(u64, PointerHandler)>>,
    next_id: u64,
}

impl EventHub {
    /// Empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind`.
    pub fn subscribe(
        &mut self,
        kind: PointerEventKind,
        handler: PointerHandler,
    ) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.entry(kind).or_default().push((id, handler));
        Subscription { kind, id }
    }

    /// Remove a handler. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let Some(list) = self.handlers.get_mut(&subscription.kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(id, _)| *id != subscription.id);
        before != list.len()
    }

    /// Run every handler registered for `event.kind`. Returns how many ran.
    pub fn dispatch(&mut self, event: &PointerEvent) -> usize {
        self.handlers.get_mut(&event.kind).map_or(0, |list| {
            for (_, handler) in list.iter_mut() {
                handler(event);
            }
            list.len()
        })
    }

    /// Number of registered handlers across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    /// Whether no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every handler.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}
