use serde::{Deserialize, Serialize};

use crate::core::{AxisAlignment, Viewport};
use crate::error::{TrackError, TrackResult};
use crate::interaction::{AutoScrollConfig, InertiaConfig};

/// Public tracks view bootstrap configuration.
///
/// This type is serializable so host applications can persist/load view setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackViewConfig {
    pub viewport: Viewport,
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default)]
    pub alignment: AxisAlignment,
    /// Compact layout variants close line gaps; applied to tracks created
    /// through the view.
    #[serde(default = "default_true")]
    pub compact_lines: bool,
    /// Whether the view has a separate track-name pane to keep in sync.
    #[serde(default = "default_true")]
    pub show_track_names: bool,
    #[serde(default)]
    pub inertia: InertiaConfig,
    #[serde(default)]
    pub auto_scroll: AutoScrollConfig,
}

impl TrackViewConfig {
    /// Creates a config with default geometry for the given viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            cell_width: default_cell_width(),
            line_height: default_line_height(),
            alignment: AxisAlignment::default(),
            compact_lines: default_true(),
            show_track_names: default_true(),
            inertia: InertiaConfig::default(),
            auto_scroll: AutoScrollConfig::default(),
        }
    }

    #[must_use]
    pub fn with_cell_width(mut self, cell_width: f64) -> Self {
        self.cell_width = cell_width;
        self
    }

    #[must_use]
    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: AxisAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_compact_lines(mut self, compact_lines: bool) -> Self {
        self.compact_lines = compact_lines;
        self
    }

    #[must_use]
    pub fn with_track_names(mut self, show_track_names: bool) -> Self {
        self.show_track_names = show_track_names;
        self
    }

    #[must_use]
    pub fn with_inertia(mut self, inertia: InertiaConfig) -> Self {
        self.inertia = inertia;
        self
    }

    #[must_use]
    pub fn with_auto_scroll(mut self, auto_scroll: AutoScrollConfig) -> Self {
        self.auto_scroll = auto_scroll;
        self
    }

    /// Number of axis cells needed to cover the viewport width.
    #[must_use]
    pub fn visible_cells(&self) -> usize {
        let cells = (f64::from(self.viewport.width) / self.cell_width).ceil();
        if cells.is_finite() && cells >= 1.0 {
            cells as usize
        } else {
            1
        }
    }

    pub fn validate(self) -> TrackResult<Self> {
        if !self.viewport.is_valid() {
            return Err(TrackError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.cell_width.is_finite() || self.cell_width <= 0.0 {
            return Err(TrackError::InvalidStep(format!(
                "cell width must be finite and > 0, got {}",
                self.cell_width
            )));
        }
        if !self.line_height.is_finite() || self.line_height <= 0.0 {
            return Err(TrackError::InvalidData(
                "line height must be finite and > 0".to_owned(),
            ));
        }
        self.inertia.validate()?;
        self.auto_scroll.validate()?;
        Ok(self)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> TrackResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| TrackError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> TrackResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TrackError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_cell_width() -> f64 {
    50.0
}

fn default_line_height() -> f64 {
    24.0
}

fn default_true() -> bool {
    true
}
