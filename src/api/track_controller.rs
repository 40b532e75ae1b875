use tracing::debug;

use crate::core::{
    AxisDomain, ItemId, LayoutReport, SubscriptionId, Track, TrackItem, TrackObserver,
};
use crate::error::{TrackError, TrackResult};
use crate::interaction::DataViewUpdate;
use crate::render::ItemPresenter;

use super::TrackView;

impl<D: AxisDomain, P: ItemPresenter> TrackView<D, P> {
    #[must_use]
    pub fn tracks(&self) -> &[Track<D::Point>] {
        &self.tracks
    }

    #[must_use]
    pub fn track(&self, index: usize) -> Option<&Track<D::Point>> {
        self.tracks.get(index)
    }

    #[must_use]
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Finds the track currently holding `item`.
    #[must_use]
    pub fn find_item(&self, item: ItemId) -> Option<(usize, &TrackItem<D::Point>)> {
        self.tracks
            .iter()
            .enumerate()
            .find_map(|(index, track)| track.item(item).map(|item| (index, item)))
    }

    /// Appends a new empty track using the view's line compaction setting.
    pub fn add_track(&mut self, name: impl Into<String>) -> usize {
        let track = Track::new(name).with_compact_lines(self.config.compact_lines);
        self.push_track(track)
    }

    /// Appends a fully configured track, laying it out first.
    pub fn push_track(&mut self, mut track: Track<D::Point>) -> usize {
        track.relayout();
        debug!(track = track.name(), items = track.len(), "track added");
        self.tracks.push(track);
        self.after_tracks_changed();
        self.tracks.len() - 1
    }

    pub fn remove_track(&mut self, index: usize) -> TrackResult<Track<D::Point>> {
        if index >= self.tracks.len() {
            return Err(TrackError::UnknownTrack(index));
        }
        let track = self.tracks.remove(index);
        debug!(track = track.name(), items = track.len(), "track removed");
        self.item_drag_track_removed(index);
        self.after_tracks_changed();
        Ok(track)
    }

    pub fn add_item(&mut self, track: usize, item: TrackItem<D::Point>) -> TrackResult<ItemId> {
        let id = self.track_mut(track)?.add_item(item)?;
        self.after_tracks_changed();
        Ok(id)
    }

    /// Adds a batch of items to one track with a single layout pass.
    pub fn add_items(
        &mut self,
        track: usize,
        items: impl IntoIterator<Item = TrackItem<D::Point>>,
    ) -> TrackResult<Vec<ItemId>> {
        let ids = self.track_mut(track)?.add_items(items)?;
        self.after_tracks_changed();
        Ok(ids)
    }

    pub fn remove_item(&mut self, track: usize, item: ItemId) -> TrackResult<TrackItem<D::Point>> {
        let removed = self
            .track_mut(track)?
            .remove_item(item)
            .ok_or(TrackError::UnknownItem(item))?;
        if self
            .item_drag
            .as_ref()
            .is_some_and(|drag| drag.item == item)
        {
            self.cancel_item_drag();
        }
        self.after_tracks_changed();
        Ok(removed)
    }

    pub fn move_item(
        &mut self,
        track: usize,
        item: ItemId,
        start_point: D::Point,
        end_point: D::Point,
    ) -> TrackResult<()> {
        self.track_mut(track)?
            .move_item(item, start_point, end_point, None)?;
        self.after_tracks_changed();
        Ok(())
    }

    pub fn set_item_pinned(
        &mut self,
        track: usize,
        item: ItemId,
        order: Option<usize>,
    ) -> TrackResult<()> {
        self.track_mut(track)?.set_item_pinned(item, order)?;
        self.after_tracks_changed();
        Ok(())
    }

    /// Applies `update` to one track, then refreshes geometry.
    ///
    /// Used for layout flags (`set_separate_groups`, `set_items_to_top`, ...)
    /// that have no dedicated view method.
    pub fn update_track<R>(
        &mut self,
        track: usize,
        update: impl FnOnce(&mut Track<D::Point>) -> R,
    ) -> TrackResult<R> {
        let result = update(self.track_mut(track)?);
        self.after_tracks_changed();
        Ok(result)
    }

    pub fn clear_track(&mut self, track: usize) -> TrackResult<()> {
        self.track_mut(track)?.clear();
        self.after_tracks_changed();
        Ok(())
    }

    /// Re-runs every track layout.
    pub fn relayout_all(&mut self) -> Vec<LayoutReport> {
        let reports = self.tracks.iter_mut().map(Track::relayout).collect();
        self.after_tracks_changed();
        reports
    }

    pub fn subscribe_track(
        &mut self,
        track: usize,
        observer: Box<dyn TrackObserver>,
    ) -> TrackResult<SubscriptionId> {
        Ok(self.track_mut(track)?.subscribe(observer))
    }

    pub fn unsubscribe_track(&mut self, track: usize, id: SubscriptionId) -> TrackResult<bool> {
        Ok(self.track_mut(track)?.unsubscribe(id))
    }

    pub(crate) fn track_mut(&mut self, index: usize) -> TrackResult<&mut Track<D::Point>> {
        self.tracks
            .get_mut(index)
            .ok_or(TrackError::UnknownTrack(index))
    }

    pub(crate) fn after_tracks_changed(&mut self) {
        self.sync_content_height();
        self.apply_data_view(DataViewUpdate::Full);
    }
}
