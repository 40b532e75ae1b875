mod null_presenter;

pub use null_presenter::NullPresenter;

use serde::{Deserialize, Serialize};

use crate::core::ItemId;

/// Screen rectangle written for one visible item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemPlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ItemPlacement {
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

/// Contract implemented by the host's item widget layer.
///
/// The engine only ever writes geometry; instantiating, styling and drawing
/// the widgets stays with the implementor.
///
/// # Coordinates
///
/// Every `x` is an axis position plus the current scroll offset. Position
/// `0.0` is the leading edge of the base value's cell, or its centre when
/// [`AxisAlignment::Center`] has an odd cell count. Under `Start` alignment
/// that is the data pane's left edge. Under `Center` alignment the base sits
/// in the middle of the pane, so the host adds half the pane width; points
/// before the base then get negative `x`.
///
/// Every `y` is measured from the top of the data pane, with the vertical
/// scroll offset already subtracted.
///
/// [`AxisAlignment::Center`]: crate::core::AxisAlignment::Center
pub trait ItemPresenter {
    /// Writes the top-left corner of a visible item in the frame described above.
    fn set_position(&mut self, item: ItemId, x: f64, y: f64);

    fn set_size(&mut self, item: ItemId, width: f64, height: f64);

    /// Called when an item left the visible window and its widget may be pooled.
    fn recycle(&mut self, item: ItemId);

    /// Called for every axis label slot after the label strip moved.
    ///
    /// `x` is the leading edge of the slot's cell, in the same frame as
    /// [`Self::set_position`].
    fn place_label(&mut self, _slot: usize, _x: f64, _text: &str) {}

    /// Called for every track header after the vertical offset changed.
    fn place_track_header(&mut self, _track: usize, _y: f64, _height: f64) {}
}
