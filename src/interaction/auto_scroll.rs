use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{PaneRect, Vec2};
use crate::error::{TrackError, TrackResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoScrollConfig {
    /// Distance (px) from a pane edge inside which auto-scroll engages.
    pub border_distance: f64,
    /// Scroll speed in px/s.
    pub speed: f64,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            border_distance: 24.0,
            speed: 400.0,
        }
    }
}

impl AutoScrollConfig {
    pub fn validate(self) -> TrackResult<Self> {
        if !self.border_distance.is_finite() || self.border_distance < 0.0 {
            return Err(TrackError::InvalidData(
                "auto-scroll border_distance must be finite and >= 0".to_owned(),
            ));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(TrackError::InvalidData(
                "auto-scroll speed must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Edge-triggered scrolling while an item drag nears the data pane bounds.
///
/// `direction.x` is applied to the axis padding: `+1` near the leading edge
/// (reveals earlier points), `-1` near the trailing edge. `direction.y` is
/// applied to the vertical offset: `-1` near the top, `+1` near the bottom.
/// A pointer beyond an edge counts as inside that edge's border zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoScrollController {
    config: AutoScrollConfig,
    active: bool,
    direction: Vec2,
}

impl AutoScrollController {
    pub fn new(config: AutoScrollConfig) -> TrackResult<Self> {
        Ok(Self {
            config: config.validate()?,
            active: false,
            direction: Vec2::ZERO,
        })
    }

    #[must_use]
    pub fn config(&self) -> AutoScrollConfig {
        self.config
    }

    pub fn set_config(&mut self, config: AutoScrollConfig) -> TrackResult<()> {
        self.config = config.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Re-evaluates the border zones for a new pointer position.
    ///
    /// Returns `true` while auto-scroll is engaged.
    pub fn update_pointer(&mut self, pointer: Vec2, pane: PaneRect) -> bool {
        if !pointer.is_finite() {
            self.stop();
            return false;
        }
        let border = self.config.border_distance;
        let x = if pointer.x < pane.x + border {
            1.0
        } else if pointer.x > pane.x + pane.width - border {
            -1.0
        } else {
            0.0
        };
        let y = if pointer.y < pane.y + border {
            -1.0
        } else if pointer.y > pane.y + pane.height - border {
            1.0
        } else {
            0.0
        };

        let was_active = self.active;
        self.direction = Vec2::new(x, y);
        self.active = x != 0.0 || y != 0.0;
        if was_active != self.active {
            trace!(active = self.active, x, y, "auto-scroll state changed");
        }
        self.active
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.direction = Vec2::ZERO;
    }

    /// Returns the padding/offset deltas to apply this frame, if active.
    pub fn tick(&self, delta_seconds: f64) -> Option<Vec2> {
        if !self.active || !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return None;
        }
        let distance = self.config.speed * delta_seconds;
        Some(Vec2::new(
            self.direction.x * distance,
            self.direction.y * distance,
        ))
    }
}
