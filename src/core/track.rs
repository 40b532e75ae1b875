use tracing::trace;

use crate::core::layout::{LayoutMode, LayoutReport};
use crate::core::observer::{ObserverRegistry, SubscriptionId, TrackEvent, TrackObserver};
use crate::core::{ItemId, TrackItem};
use crate::error::{TrackError, TrackResult};

/// Named lane owning an ordered collection of interval items.
///
/// Every mutation re-runs the track's layout so `order` values and the cached
/// line count are always current.
#[derive(Debug, Clone)]
pub struct Track<P> {
    name: String,
    items: Vec<TrackItem<P>>,
    separate_groups: bool,
    items_to_top: bool,
    compact_lines: bool,
    max_items_at_same_point: usize,
    observers: ObserverRegistry,
}

impl<P: Ord> Track<P> {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            separate_groups: false,
            items_to_top: true,
            compact_lines: true,
            max_items_at_same_point: 0,
            observers: ObserverRegistry::default(),
        }
    }

    #[must_use]
    pub fn with_separate_groups(mut self, separate_groups: bool) -> Self {
        self.separate_groups = separate_groups;
        self.relayout();
        self
    }

    #[must_use]
    pub fn with_items_to_top(mut self, items_to_top: bool) -> Self {
        self.items_to_top = items_to_top;
        self.relayout();
        self
    }

    #[must_use]
    pub fn with_compact_lines(mut self, compact_lines: bool) -> Self {
        self.compact_lines = compact_lines;
        self.relayout();
        self
    }

    pub fn set_separate_groups(&mut self, separate_groups: bool) {
        if self.separate_groups != separate_groups {
            self.separate_groups = separate_groups;
            self.relayout();
        }
    }

    pub fn set_items_to_top(&mut self, items_to_top: bool) {
        if self.items_to_top != items_to_top {
            self.items_to_top = items_to_top;
            self.relayout();
        }
    }

    pub fn set_compact_lines(&mut self, compact_lines: bool) {
        if self.compact_lines != compact_lines {
            self.compact_lines = compact_lines;
            self.relayout();
        }
    }

    #[must_use]
    pub fn layout_mode(&self) -> LayoutMode {
        LayoutMode::select(self.separate_groups, self.items_to_top, self.compact_lines)
    }

    /// Appends an item and lays the track out again.
    ///
    /// Items with `start > end` are rejected and the track is left unchanged.
    pub fn add_item(&mut self, item: TrackItem<P>) -> TrackResult<ItemId> {
        if !item.is_well_formed() {
            return Err(TrackError::InvalidInterval {
                name: item.name().to_owned(),
            });
        }
        let id = item.id();
        self.items.push(item);
        trace!(track = %self.name, count = self.items.len(), "add item");
        self.notify(TrackEvent::ItemAdded(id));
        self.relayout();
        Ok(id)
    }

    /// Appends a batch of items and lays the track out once.
    ///
    /// The whole batch is rejected when any item has `start > end`.
    pub fn add_items(
        &mut self,
        items: impl IntoIterator<Item = TrackItem<P>>,
    ) -> TrackResult<Vec<ItemId>> {
        let items: Vec<TrackItem<P>> = items.into_iter().collect();
        if let Some(item) = items.iter().find(|item| !item.is_well_formed()) {
            return Err(TrackError::InvalidInterval {
                name: item.name().to_owned(),
            });
        }
        let ids: Vec<ItemId> = items.iter().map(TrackItem::id).collect();
        self.items.extend(items);
        trace!(track = %self.name, added = ids.len(), "add items");
        for id in &ids {
            self.notify(TrackEvent::ItemAdded(*id));
        }
        self.relayout();
        Ok(ids)
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<TrackItem<P>> {
        let position = self.position_of(id)?;
        let item = self.items.remove(position);
        trace!(track = %self.name, count = self.items.len(), "remove item");
        self.notify(TrackEvent::ItemRemoved(id));
        self.relayout();
        Some(item)
    }

    /// Moves an item to a new range. `order`, when given, becomes the item's
    /// preferred line (kept by stable layouts, overwritten by packing ones).
    pub fn move_item(
        &mut self,
        id: ItemId,
        start_point: P,
        end_point: P,
        order: Option<usize>,
    ) -> TrackResult<()> {
        let position = self.position_of(id).ok_or(TrackError::UnknownItem(id))?;
        let item = &mut self.items[position];
        item.set_range(start_point, end_point)?;
        if let Some(order) = order {
            item.set_order(order);
        }
        self.notify(TrackEvent::ItemMoved(id));
        self.relayout();
        Ok(())
    }

    /// Pins or releases an item. A pinned item keeps `order` across layouts.
    pub fn set_item_pinned(&mut self, id: ItemId, order: Option<usize>) -> TrackResult<()> {
        let position = self.position_of(id).ok_or(TrackError::UnknownItem(id))?;
        let item = &mut self.items[position];
        match order {
            Some(order) => {
                item.set_order(order);
                item.set_fixed_order(true);
            }
            None => item.set_fixed_order(false),
        }
        self.relayout();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.notify(TrackEvent::Cleared);
        self.relayout();
    }

    /// Runs the track's layout mode and refreshes the cached line count.
    pub fn relayout(&mut self) -> LayoutReport {
        let report = self.layout_mode().apply(&mut self.items);
        self.max_items_at_same_point = report.line_count;
        if report.changed {
            self.notify(TrackEvent::LayoutChanged {
                line_count: report.line_count,
            });
        }
        report
    }
}

impl<P> Track<P> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn items(&self) -> &[TrackItem<P>] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&TrackItem<P>> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn separate_groups(&self) -> bool {
        self.separate_groups
    }

    #[must_use]
    pub fn items_to_top(&self) -> bool {
        self.items_to_top
    }

    #[must_use]
    pub fn compact_lines(&self) -> bool {
        self.compact_lines
    }

    /// Lines currently needed by the track; `0` for an empty track.
    #[must_use]
    pub fn max_items_at_same_point(&self) -> usize {
        self.max_items_at_same_point
    }

    pub fn subscribe(&mut self, observer: Box<dyn TrackObserver>) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn unsubscribe_all(&mut self) {
        self.observers.clear();
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self, event: TrackEvent) {
        self.observers.notify(&self.name, event);
    }
}
