use std::collections::HashMap;

use crate::core::ItemId;
use crate::render::{ItemPlacement, ItemPresenter};

/// Presenter used by tests and headless hosts.
///
/// It keeps the last geometry written for each item so tests can inspect what
/// a real widget layer would have received.
#[derive(Debug, Default)]
pub struct NullPresenter {
    pub placements: HashMap<ItemId, ItemPlacement>,
    pub recycled: Vec<ItemId>,
    pub labels: Vec<(usize, f64, String)>,
    pub track_headers: Vec<(usize, f64, f64)>,
    pub position_writes: usize,
}

impl NullPresenter {
    #[must_use]
    pub fn placement(&self, item: ItemId) -> Option<ItemPlacement> {
        self.placements.get(&item).copied()
    }

    #[must_use]
    pub fn is_shown(&self, item: ItemId) -> bool {
        self.placements.contains_key(&item)
    }
}

impl ItemPresenter for NullPresenter {
    fn set_position(&mut self, item: ItemId, x: f64, y: f64) {
        let placement = self.placements.entry(item).or_insert(ItemPlacement {
            x,
            y,
            width: 0.0,
            height: 0.0,
        });
        placement.x = x;
        placement.y = y;
        self.position_writes += 1;
    }

    fn set_size(&mut self, item: ItemId, width: f64, height: f64) {
        if let Some(placement) = self.placements.get_mut(&item) {
            placement.width = width;
            placement.height = height;
        }
    }

    fn recycle(&mut self, item: ItemId) {
        self.placements.remove(&item);
        self.recycled.push(item);
    }

    fn place_label(&mut self, slot: usize, x: f64, text: &str) {
        if slot == 0 {
            self.labels.clear();
        }
        self.labels.push((slot, x, text.to_owned()));
    }

    fn place_track_header(&mut self, track: usize, y: f64, height: f64) {
        if track == 0 {
            self.track_headers.clear();
        }
        self.track_headers.push((track, y, height));
    }
}
