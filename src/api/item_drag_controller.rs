use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{AxisDomain, ItemId, Vec2, has_intersection};
use crate::error::{TrackError, TrackResult};
use crate::render::ItemPresenter;

use super::TrackView;

/// Where a dragged item would land if dropped now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropCandidate<T> {
    pub track: usize,
    pub start: T,
    pub end: T,
    pub order: usize,
    /// `false` when the item would overlap another item at this spot.
    pub allowed: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct ItemDrag<T> {
    pub(crate) source_track: usize,
    pub(crate) item: ItemId,
    /// Point under the pointer when the drag started.
    origin_point: T,
    pointer: Vec2,
    candidate: Option<DropCandidate<T>>,
}

impl<D: AxisDomain, P: ItemPresenter> TrackView<D, P> {
    #[must_use]
    pub fn is_dragging_item(&self) -> bool {
        self.item_drag.is_some()
    }

    /// Last evaluated drop spot of the running item drag.
    #[must_use]
    pub fn drop_candidate(&self) -> Option<&DropCandidate<D::Point>> {
        self.item_drag.as_ref()?.candidate.as_ref()
    }

    /// Starts dragging `item` of `track` from host position `pointer`.
    pub fn begin_item_drag(&mut self, track: usize, item: ItemId, pointer: Vec2) -> TrackResult<()> {
        let source = self.tracks.get(track).ok_or(TrackError::UnknownTrack(track))?;
        if source.item(item).is_none() {
            return Err(TrackError::UnknownItem(item));
        }
        if !pointer.is_finite() {
            return Err(TrackError::InvalidData(
                "drag pointer must be finite".to_owned(),
            ));
        }
        let origin_point = self
            .sync
            .scroller()
            .screen_to_point(pointer.x - self.data_pane.x);
        debug!(track, item = item.0, ?origin_point, "item drag start");
        self.item_drag = Some(ItemDrag {
            source_track: track,
            item,
            origin_point,
            pointer,
            candidate: None,
        });
        Ok(())
    }

    /// Moves the dragged item under `pointer` and checks the new spot for
    /// collisions. Also arms auto-scroll when the pointer nears a pane edge.
    pub fn drag_item(&mut self, pointer: Vec2) -> Option<DropCandidate<D::Point>> {
        if !pointer.is_finite() {
            return self.drop_candidate().cloned();
        }
        let drag = self.item_drag.as_mut()?;
        drag.pointer = pointer;
        self.auto_scroll.update_pointer(pointer, self.data_pane);
        self.revalidate_item_drag()
    }

    /// Re-evaluates the drop spot for the last pointer position.
    ///
    /// Called after anything under the pointer moved (auto-scroll, inertia).
    pub fn revalidate_item_drag(&mut self) -> Option<DropCandidate<D::Point>> {
        let drag = self.item_drag.as_ref()?;
        let candidate = self.evaluate_drop(drag)?;
        trace!(
            track = candidate.track,
            order = candidate.order,
            allowed = candidate.allowed,
            "drop candidate"
        );
        if let Some(drag) = self.item_drag.as_mut() {
            drag.candidate = Some(candidate.clone());
        }
        Some(candidate)
    }

    /// Drops the item on the last evaluated spot.
    ///
    /// Returns the applied candidate, or `None` when there was no drag or the
    /// spot was refused. Nothing is pinned; both tracks are laid out again.
    pub fn commit_item_drag(&mut self) -> TrackResult<Option<DropCandidate<D::Point>>> {
        self.stop_auto_scroll();
        let Some(drag) = self.item_drag.take() else {
            return Ok(None);
        };
        let Some(candidate) = drag.candidate.filter(|candidate| candidate.allowed) else {
            debug!(item = drag.item.0, "item drag dropped on a refused spot");
            return Ok(None);
        };

        if candidate.track == drag.source_track {
            self.track_mut(drag.source_track)?.move_item(
                drag.item,
                candidate.start.clone(),
                candidate.end.clone(),
                Some(candidate.order),
            )?;
        } else {
            self.track_mut(candidate.track)?;
            let mut item = self
                .track_mut(drag.source_track)?
                .remove_item(drag.item)
                .ok_or(TrackError::UnknownItem(drag.item))?;
            item.set_range(candidate.start.clone(), candidate.end.clone())?;
            item.set_order(candidate.order);
            self.track_mut(candidate.track)?.add_item(item)?;
        }
        debug!(
            item = drag.item.0,
            from = drag.source_track,
            to = candidate.track,
            order = candidate.order,
            "item drag committed"
        );
        self.after_tracks_changed();
        Ok(Some(candidate))
    }

    pub fn cancel_item_drag(&mut self) {
        if let Some(drag) = self.item_drag.take() {
            debug!(item = drag.item.0, "item drag cancelled");
        }
        self.stop_auto_scroll();
    }

    /// Shifts drag indices after track `index` was removed, cancelling the
    /// drag when its source track is gone.
    pub(crate) fn item_drag_track_removed(&mut self, index: usize) {
        let Some(drag) = self.item_drag.as_mut() else {
            return;
        };
        if drag.source_track == index {
            self.cancel_item_drag();
            return;
        }
        if drag.source_track > index {
            drag.source_track -= 1;
        }
        drag.candidate = None;
        self.revalidate_item_drag();
    }

    fn evaluate_drop(&self, drag: &ItemDrag<D::Point>) -> Option<DropCandidate<D::Point>> {
        let scroller = self.sync.scroller();
        let domain = scroller.axis().domain();
        let item = self.tracks.get(drag.source_track)?.item(drag.item)?;

        let current = scroller.screen_to_point(drag.pointer.x - self.data_pane.x);
        let shift = domain.steps_between(&drag.origin_point, &current).round() as i64;
        let start = domain.add_step(item.start_point(), shift);
        let end = domain.add_step(item.end_point(), shift);

        let content_y = drag.pointer.y - self.data_pane.y + self.sync.vertical_offset();
        let (track, order) = self.line_at(content_y)?;
        let allowed = !has_intersection(&self.tracks[track], &start, &end, order, item);
        Some(DropCandidate {
            track,
            start,
            end,
            order,
            allowed,
        })
    }

    /// Track and line under a content-space y, clamped to existing tracks.
    /// The line may be one past the track's last line.
    fn line_at(&self, content_y: f64) -> Option<(usize, usize)> {
        let line_height = self.config.line_height;
        let last = self.tracks.len().checked_sub(1)?;
        let mut top = 0.0;
        for (index, track) in self.tracks.iter().enumerate() {
            let height = track.max_items_at_same_point().max(1) as f64 * line_height;
            if content_y < top + height || index == last {
                let line = ((content_y - top) / line_height).floor().max(0.0) as usize;
                return Some((index, line.min(track.max_items_at_same_point())));
            }
            top += height;
        }
        None
    }
}
