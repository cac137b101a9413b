#![forbid(unsafe_code)]

//! Ordered subscriber lists for pinch notifications.

use crate::height::PinchState;

/// Opaque identifier returned when registering a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Return the numeric id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One row's height change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPinch {
    /// Data index of the row.
    pub index: usize,
    /// Height just applied, in pixels.
    pub height: i32,
    /// `(height - collapsed) / (expanded - collapsed)`.
    pub height_percent: f32,
}

type ItemPinchCallback = Box<dyn FnMut(&ItemPinch)>;
type PinchCompleteCallback = Box<dyn FnMut(PinchState)>;

struct ListenerEntry<T> {
    id: ListenerId,
    callback: T,
}

/// Item-pinch and pinch-complete subscribers, invoked in insertion order.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    item_pinch: Vec<ListenerEntry<ItemPinchCallback>>,
    pinch_complete: Vec<ListenerEntry<PinchCompleteCallback>>,
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("item_pinch", &self.item_pinch.len())
            .field("pinch_complete", &self.pinch_complete.len())
            .finish()
    }
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to per-row height changes.
    pub fn on_item_pinch<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&ItemPinch) + 'static,
    {
        let id = self.next_listener_id();
        self.item_pinch.push(ListenerEntry {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Subscribe to gesture/animation settle notifications.
    pub fn on_pinch_complete<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(PinchState) + 'static,
    {
        let id = self.next_listener_id();
        self.pinch_complete.push(ListenerEntry {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a listener of either kind. Returns whether it was registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        fn remove_entry<T>(entries: &mut Vec<ListenerEntry<T>>, id: ListenerId) -> bool {
            if let Some(idx) = entries.iter().position(|entry| entry.id == id) {
                entries.remove(idx);
                return true;
            }
            false
        }

        remove_entry(&mut self.item_pinch, id) || remove_entry(&mut self.pinch_complete, id)
    }

    pub(crate) fn emit_item_pinch(&mut self, event: &ItemPinch) {
        for entry in &mut self.item_pinch {
            (entry.callback)(event);
        }
    }

    pub(crate) fn emit_pinch_complete(&mut self, state: PinchState) {
        for entry in &mut self.pinch_complete {
            (entry.callback)(state);
        }
    }

    /// Number of registered listeners of both kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.item_pinch.len() + self.pinch_complete.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn next_listener_id(&mut self) -> ListenerId {
        self.next_id = self.next_id.saturating_add(1);
        ListenerId(self.next_id)
    }
}
