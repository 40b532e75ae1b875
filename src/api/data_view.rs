use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{AxisDomain, ItemId, Track};
use crate::interaction::DataViewUpdate;
use crate::render::{ItemPlacement, ItemPresenter};

use super::TrackView;

/// Counters for data-view passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewStats {
    pub full_passes: u64,
    pub position_passes: u64,
    pub recycled_items: u64,
}

impl<D: AxisDomain, P: ItemPresenter> TrackView<D, P> {
    #[must_use]
    pub fn stats(&self) -> ViewStats {
        self.stats
    }

    /// Height of one track: at least one line even when empty.
    #[must_use]
    pub fn track_height(&self, track_index: usize) -> Option<f64> {
        self.tracks
            .get(track_index)
            .map(|track| track_height(track, self.config.line_height))
    }

    /// Top edge of a track in content coordinates (before vertical scrolling).
    #[must_use]
    pub fn track_top(&self, track_index: usize) -> Option<f64> {
        (track_index < self.tracks.len()).then(|| {
            self.tracks[..track_index]
                .iter()
                .map(|track| track_height(track, self.config.line_height))
                .sum()
        })
    }

    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.tracks
            .iter()
            .map(|track| track_height(track, self.config.line_height))
            .sum()
    }

    /// Screen rectangle an item would occupy with the current scroll state.
    #[must_use]
    pub fn item_placement(&self, track_index: usize, item: ItemId) -> Option<ItemPlacement> {
        let top = self.track_top(track_index)?;
        let item = self.tracks[track_index].item(item)?;
        let scroller = self.sync.scroller();
        let x = scroller.point_to_screen(item.start_point());
        let width = scroller.point_to_screen(item.end_point()) - x;
        Some(ItemPlacement {
            x,
            y: top + item.order() as f64 * self.config.line_height - self.sync.vertical_offset(),
            width,
            height: self.config.line_height,
        })
    }

    /// Ids of the items currently handed to the presenter.
    pub fn visible_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.visible.iter().copied()
    }

    #[must_use]
    pub fn is_item_visible(&self, item: ItemId) -> bool {
        self.visible.contains(&item)
    }

    /// Pushes the vertical content size to both vertical panes.
    pub(crate) fn sync_content_height(&mut self) {
        let content_height = self.content_height();
        self.sync.set_content_height(content_height);
    }

    /// Forces a full data-view pass, e.g. after the host resized its panes.
    pub fn refresh(&mut self) {
        self.sync_content_height();
        self.apply_data_view(DataViewUpdate::Full);
    }

    pub(crate) fn apply_data_view(&mut self, update: DataViewUpdate) {
        match update {
            DataViewUpdate::None => {}
            DataViewUpdate::Positions => self.reposition_visible(),
            DataViewUpdate::Full => self.rebuild_visible(),
        }
    }

    /// Writes geometry for every item intersecting the visible window and
    /// recycles the ones that left it.
    fn rebuild_visible(&mut self) {
        self.stats.full_passes += 1;
        let line_height = self.config.line_height;
        let vertical_offset = self.sync.vertical_offset();
        let scroller = self.sync.scroller();
        let window = scroller.axis().visible_window();

        let mut shown = 0usize;
        let mut left: SmallVec<[ItemId; 16]> = SmallVec::new();
        let mut top = 0.0;
        for track in &self.tracks {
            for item in track.items() {
                let id = item.id();
                if item.is_well_formed() && window.overlaps(item.start_point(), item.end_point())
                {
                    let x = scroller.point_to_screen(item.start_point());
                    let width = scroller.point_to_screen(item.end_point()) - x;
                    let y = top + item.order() as f64 * line_height - vertical_offset;
                    self.presenter.set_position(id, x, y);
                    self.presenter.set_size(id, width, line_height);
                    self.visible.insert(id);
                    shown += 1;
                } else if self.visible.contains(&id) {
                    left.push(id);
                }
            }
            top += track_height(track, line_height);
        }

        // Ids whose item no longer exists in any track.
        let stale: SmallVec<[ItemId; 8]> = self
            .visible
            .iter()
            .copied()
            .filter(|id| !self.tracks.iter().any(|track| track.item(*id).is_some()))
            .collect();
        left.extend(stale);

        for id in &left {
            self.visible.remove(id);
            self.presenter.recycle(*id);
        }
        self.stats.recycled_items += left.len() as u64;
        self.place_labels();
        self.place_track_headers();
        trace!(shown, recycled = left.len(), "data view rebuilt");
    }

    /// Moves already visible items without re-evaluating the window.
    fn reposition_visible(&mut self) {
        self.stats.position_passes += 1;
        let line_height = self.config.line_height;
        let vertical_offset = self.sync.vertical_offset();
        let scroller = self.sync.scroller();

        let mut top = 0.0;
        for track in &self.tracks {
            for item in track.items() {
                if self.visible.contains(&item.id()) {
                    let x = scroller.point_to_screen(item.start_point());
                    let y = top + item.order() as f64 * line_height - vertical_offset;
                    self.presenter.set_position(item.id(), x, y);
                }
            }
            top += track_height(track, line_height);
        }
        self.place_labels();
        self.place_track_headers();
    }

    fn place_labels(&mut self) {
        let scroller = self.sync.scroller();
        let axis = scroller.axis();
        let positions = scroller.labels().positions(
            axis.cell_width(),
            axis.distance_to_base(),
            scroller.scroll_offset(),
        );
        for (slot, (x, cell)) in positions.enumerate() {
            self.presenter.place_label(slot, x, &cell.label);
        }
    }

    fn place_track_headers(&mut self) {
        let line_height = self.config.line_height;
        let vertical_offset = self.sync.vertical_offset();
        let mut top = 0.0;
        for (index, track) in self.tracks.iter().enumerate() {
            let height = track_height(track, line_height);
            self.presenter
                .place_track_header(index, top - vertical_offset, height);
            top += height;
        }
    }
}

fn track_height<P>(track: &Track<P>, line_height: f64) -> f64 {
    track.max_items_at_same_point().max(1) as f64 * line_height
}
