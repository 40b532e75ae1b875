use serde::{Deserialize, Serialize};

/// Vertically scrollable pane (track names or data grid).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollPane {
    offset: f64,
    content_height: f64,
    viewport_height: f64,
    dragging: bool,
}

impl ScrollPane {
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self {
            offset: 0.0,
            content_height: 0.0,
            viewport_height: viewport_height.max(0.0),
            dragging: false,
        }
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    pub fn set_content_height(&mut self, content_height: f64) {
        self.content_height = content_height.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Moves the scroll offset by `delta`, clamped to `[0, max_offset]`.
    ///
    /// Returns `true` when the offset changed.
    pub fn advance(&mut self, delta: f64) -> bool {
        if !delta.is_finite() {
            return false;
        }
        let next = (self.offset + delta).clamp(0.0, self.max_offset());
        let changed = next != self.offset;
        self.offset = next;
        changed
    }

    /// Moves the content along with a pointer delta (content follows pointer).
    pub fn follow_pointer(&mut self, pointer_delta: f64) -> bool {
        self.advance(-pointer_delta)
    }
}
