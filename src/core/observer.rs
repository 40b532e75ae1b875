use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::ItemId;

/// Mutation notifications emitted by a [`crate::core::Track`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackEvent {
    ItemAdded(ItemId),
    ItemRemoved(ItemId),
    ItemMoved(ItemId),
    /// At least one item changed line during a layout pass.
    LayoutChanged { line_count: usize },
    Cleared,
}

/// Listener registered on a track's item collection.
pub trait TrackObserver {
    fn on_track_event(&mut self, track_name: &str, event: TrackEvent);
}

/// Handle returned by `Track::subscribe`, required to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owned observer list. Cloning a track never clones its observers.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn TrackObserver>)>,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn TrackObserver>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if let Some(position) = self.entries.iter().position(|(entry, _)| *entry == id) {
            self.entries.remove(position);
            return true;
        }
        false
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self, track_name: &str, event: TrackEvent) {
        for (_, observer) in &mut self.entries {
            observer.on_track_event(track_name, event);
        }
    }
}

impl Clone for ObserverRegistry {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.entries.len())
            .finish()
    }
}
