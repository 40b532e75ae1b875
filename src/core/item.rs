use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{TrackError, TrackResult};

static ITEM_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of an item, stable for the item's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl ItemId {
    pub fn next() -> Self {
        ItemId(ITEM_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Interval placed on a track between `start_point` and `end_point`.
///
/// `order` is the line the item occupies inside its track. Layout passes own
/// it unless `fixed_order` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackItem<P> {
    id: ItemId,
    name: String,
    start_point: P,
    end_point: P,
    order: usize,
    fixed_order: bool,
}

impl<P: Ord> TrackItem<P> {
    /// Creates an item on line `0`, rejecting `start_point > end_point`.
    pub fn new(name: impl Into<String>, start_point: P, end_point: P) -> TrackResult<Self> {
        let name = name.into();
        if start_point > end_point {
            return Err(TrackError::InvalidInterval { name });
        }
        Ok(Self {
            id: ItemId::next(),
            name,
            start_point,
            end_point,
            order: 0,
            fixed_order: false,
        })
    }

    /// Sets the initial line, used as the preferred line by stable layouts.
    #[must_use]
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Pins the item to `order`; layout passes will not move it.
    #[must_use]
    pub fn pinned_at(mut self, order: usize) -> Self {
        self.order = order;
        self.fixed_order = true;
        self
    }

    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.start_point <= self.end_point
    }

    pub(crate) fn set_range(&mut self, start_point: P, end_point: P) -> TrackResult<()> {
        if start_point > end_point {
            return Err(TrackError::InvalidInterval {
                name: self.name.clone(),
            });
        }
        self.start_point = start_point;
        self.end_point = end_point;
        Ok(())
    }
}

impl<P> TrackItem<P> {
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn start_point(&self) -> &P {
        &self.start_point
    }

    #[must_use]
    pub fn end_point(&self) -> &P {
        &self.end_point
    }

    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    #[must_use]
    pub fn fixed_order(&self) -> bool {
        self.fixed_order
    }

    pub fn set_fixed_order(&mut self, fixed_order: bool) {
        self.fixed_order = fixed_order;
    }

    pub(crate) fn set_order(&mut self, order: usize) {
        self.order = order;
    }

    /// Builds an item without validating the interval.
    ///
    /// Only used to exercise the layout's malformed-item handling.
    #[doc(hidden)]
    pub fn new_unchecked(name: impl Into<String>, start_point: P, end_point: P) -> Self {
        Self {
            id: ItemId::next(),
            name: name.into(),
            start_point,
            end_point,
            order: 0,
            fixed_order: false,
        }
    }
}
