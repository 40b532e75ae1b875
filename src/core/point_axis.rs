use serde::{Deserialize, Serialize};

use crate::core::point::AxisDomain;
use crate::error::{TrackError, TrackResult};

/// Floor tolerance so positions produced by `point_to_position` resolve back to
/// their own cell despite float rounding.
const CELL_EPSILON: f64 = 1e-9;

/// Where position `0.0` sits relative to the visible cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisAlignment {
    /// Position `0.0` is the leading edge of the first visible cell.
    #[default]
    Start,
    /// Position `0.0` is the middle of the visible cells. With an even cell
    /// count the middle is a boundary and resolves to the following cell.
    Center,
}

/// Currently visible `[visible_start, visible_end]` range of points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisWindow<P> {
    pub visible_start: P,
    pub visible_end: P,
    pub base_value: P,
    pub visible_cells: usize,
}

impl<P: Ord> AxisWindow<P> {
    /// Returns `true` when `[start, end]` touches any visible cell.
    #[must_use]
    pub fn overlaps(&self, start: &P, end: &P) -> bool {
        start <= &self.visible_end && end >= &self.visible_start
    }
}

/// Bidirectional mapping between domain points and linear positions.
///
/// The axis is anchored at `base_value`; `cell_width` is the on-screen width
/// of one domain step.
#[derive(Debug, Clone, PartialEq)]
pub struct PointAxis<D: AxisDomain> {
    domain: D,
    base_value: D::Point,
    cell_width: f64,
    visible_cells: usize,
    alignment: AxisAlignment,
}

impl<D: AxisDomain> PointAxis<D> {
    pub fn new(
        domain: D,
        base_value: D::Point,
        cell_width: f64,
        visible_cells: usize,
        alignment: AxisAlignment,
    ) -> TrackResult<Self> {
        validate_cell_width(cell_width)?;
        if visible_cells == 0 {
            return Err(TrackError::InvalidData(
                "axis must show at least one cell".to_owned(),
            ));
        }
        Ok(Self {
            domain,
            base_value,
            cell_width,
            visible_cells,
            alignment,
        })
    }

    #[must_use]
    pub fn domain(&self) -> &D {
        &self.domain
    }

    #[must_use]
    pub fn base_value(&self) -> &D::Point {
        &self.base_value
    }

    pub fn set_base_value(&mut self, base_value: D::Point) {
        self.base_value = base_value;
    }

    #[must_use]
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    pub fn set_cell_width(&mut self, cell_width: f64) -> TrackResult<()> {
        self.cell_width = validate_cell_width(cell_width)?;
        Ok(())
    }

    #[must_use]
    pub fn visible_cells(&self) -> usize {
        self.visible_cells
    }

    pub fn set_visible_cells(&mut self, visible_cells: usize) {
        self.visible_cells = visible_cells.max(1);
    }

    #[must_use]
    pub fn alignment(&self) -> AxisAlignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: AxisAlignment) {
        self.alignment = alignment;
    }

    /// Index of the base cell counted from the first visible cell.
    #[must_use]
    pub fn anchor_index(&self) -> usize {
        match self.alignment {
            AxisAlignment::Start => 0,
            AxisAlignment::Center => self.visible_cells / 2,
        }
    }

    /// Distance from position `0.0` back to the leading edge of the base cell.
    #[must_use]
    pub fn distance_to_base(&self) -> f64 {
        match self.alignment {
            AxisAlignment::Start => 0.0,
            AxisAlignment::Center if self.visible_cells % 2 == 1 => self.cell_width / 2.0,
            AxisAlignment::Center => 0.0,
        }
    }

    #[must_use]
    pub fn point_to_base(&self, point: &D::Point) -> f64 {
        self.domain.steps_between(&self.base_value, point)
    }

    /// Resolves a base-relative offset (in steps) to the point owning that cell.
    #[must_use]
    pub fn base_to_point(&self, base: f64) -> D::Point {
        if !base.is_finite() {
            return self.base_value.clone();
        }
        let cell = (base + CELL_EPSILON).floor();
        let steps = cell.clamp(i64::MIN as f64, i64::MAX as f64) as i64;
        self.domain.add_step(&self.base_value, steps)
    }

    #[must_use]
    pub fn point_to_position(&self, point: &D::Point) -> f64 {
        self.point_to_base(point) * self.cell_width - self.distance_to_base()
    }

    #[must_use]
    pub fn position_to_point(&self, position: f64) -> D::Point {
        self.base_to_point((position + self.distance_to_base()) / self.cell_width)
    }

    /// Point `steps` cells away from the base value.
    #[must_use]
    pub fn change_value(&self, steps: i64) -> D::Point {
        self.domain.add_step(&self.base_value, steps)
    }

    /// Moves the base value one step forward.
    pub fn increase(&mut self) {
        self.base_value = self.change_value(1);
    }

    /// Moves the base value one step backward.
    pub fn decrease(&mut self) {
        self.base_value = self.change_value(-1);
    }

    #[must_use]
    pub fn visible_window(&self) -> AxisWindow<D::Point> {
        let anchor = self.anchor_index() as i64;
        let trailing = self.visible_cells as i64 - 1 - anchor;
        AxisWindow {
            visible_start: self.change_value(-anchor),
            visible_end: self.change_value(trailing),
            base_value: self.base_value.clone(),
            visible_cells: self.visible_cells,
        }
    }

    #[must_use]
    pub fn format_label(&self, point: &D::Point) -> String {
        self.domain.format_label(point)
    }
}

fn validate_cell_width(cell_width: f64) -> TrackResult<f64> {
    if !cell_width.is_finite() || cell_width <= 0.0 {
        return Err(TrackError::InvalidStep(format!(
            "cell width must be finite and > 0, got {cell_width}"
        )));
    }
    Ok(cell_width)
}
