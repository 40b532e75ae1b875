use std::collections::VecDeque;
use std::fmt;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{AxisAlignment, AxisDomain, PointAxis};
use crate::error::{TrackError, TrackResult};

/// Tuning for drag velocity tracking and the post-drag inertia throw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InertiaConfig {
    /// Seconds a throw takes to decelerate to rest.
    pub time_to_stop: f64,
    /// Remaining distance (px) under which a throw snaps to its rest cell.
    pub stop_distance: f64,
    /// Velocity smoothing factor; the blend weight per sample is `dt * smoothing`.
    pub velocity_smoothing: f64,
    /// Release speeds (px/s) below this only snap to the nearest cell.
    pub min_throw_velocity: f64,
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            time_to_stop: 0.35,
            stop_distance: 0.25,
            velocity_smoothing: 10.0,
            min_throw_velocity: 50.0,
        }
    }
}

impl InertiaConfig {
    pub fn validate(self) -> TrackResult<Self> {
        if !self.time_to_stop.is_finite() || self.time_to_stop <= 0.0 {
            return Err(TrackError::InvalidData(
                "inertia time_to_stop must be finite and > 0".to_owned(),
            ));
        }
        if !self.stop_distance.is_finite() || self.stop_distance <= 0.0 {
            return Err(TrackError::InvalidData(
                "inertia stop_distance must be finite and > 0".to_owned(),
            ));
        }
        if !self.velocity_smoothing.is_finite() || self.velocity_smoothing <= 0.0 {
            return Err(TrackError::InvalidData(
                "inertia velocity_smoothing must be finite and > 0".to_owned(),
            ));
        }
        if !self.min_throw_velocity.is_finite() || self.min_throw_velocity < 0.0 {
            return Err(TrackError::InvalidData(
                "inertia min_throw_velocity must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollPhase {
    Idle,
    Dragging,
    /// Decelerating after a throw.
    Coasting,
    /// Moving to the nearest cell boundary after a slow release or wheel step.
    Snapping,
}

/// Public scroller runtime state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    pub padding: f64,
    pub velocity: f64,
    pub inertia_distance: f64,
    pub deceleration_rate: f64,
    pub is_dragging: bool,
}

/// Whole cells the axis moved during one input event or tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellSteps {
    pub increased: u32,
    pub decreased: u32,
    /// A navigation gate refused a step and the padding was clamped.
    pub clamped: bool,
}

impl CellSteps {
    #[must_use]
    pub fn net(self) -> i64 {
        i64::from(self.increased) - i64::from(self.decreased)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.increased == 0 && self.decreased == 0
    }
}

impl AddAssign for CellSteps {
    fn add_assign(&mut self, other: Self) {
        self.increased += other.increased;
        self.decreased += other.decreased;
        self.clamped |= other.clamped;
    }
}

/// Cumulative counters, mostly useful to hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScrollerStats {
    pub increases: u64,
    pub decreases: u64,
    pub recycled_labels: u64,
}

/// Predicate deciding whether the base value may move to the given point.
pub type StepGate<P> = Box<dyn Fn(&P) -> bool>;

/// One recycled label slot of the axis strip.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCell<P> {
    pub point: P,
    pub label: String,
}

/// Fixed-size ring of label cells covering the visible cells plus one spare
/// cell on each side.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPool<P> {
    cells: VecDeque<LabelCell<P>>,
    /// Offset (in cells) of the front cell relative to the base value.
    first_offset: i64,
}

impl<P: Clone + Ord + fmt::Debug> LabelPool<P> {
    fn build<D: AxisDomain<Point = P>>(axis: &PointAxis<D>) -> Self {
        let first_offset = -(axis.anchor_index() as i64) - 1;
        let len = axis.visible_cells() as i64 + 2;
        let cells = (first_offset..first_offset + len)
            .map(|offset| label_cell(axis, offset))
            .collect();
        Self {
            cells,
            first_offset,
        }
    }

    /// Recycles the leading cell to the trailing edge after the base moved forward.
    fn shift_forward<D: AxisDomain<Point = P>>(&mut self, axis: &PointAxis<D>) {
        if let Some(mut cell) = self.cells.pop_front() {
            let offset = self.first_offset + self.cells.len() as i64;
            let fresh = label_cell(axis, offset);
            cell.point = fresh.point;
            cell.label = fresh.label;
            self.cells.push_back(cell);
        }
    }

    /// Recycles the trailing cell to the leading edge after the base moved back.
    fn shift_backward<D: AxisDomain<Point = P>>(&mut self, axis: &PointAxis<D>) {
        if let Some(mut cell) = self.cells.pop_back() {
            let fresh = label_cell(axis, self.first_offset);
            cell.point = fresh.point;
            cell.label = fresh.label;
            self.cells.push_front(cell);
        }
    }
}

impl<P> LabelPool<P> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &LabelCell<P>> {
        self.cells.iter()
    }

    /// Leading-edge position of every cell for a given cell geometry.
    pub fn positions(
        &self,
        cell_width: f64,
        distance_to_base: f64,
        scroll_offset: f64,
    ) -> impl Iterator<Item = (f64, &LabelCell<P>)> {
        let first_offset = self.first_offset;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let offset = (first_offset + index as i64) as f64;
            (
                offset * cell_width - distance_to_base + scroll_offset,
                cell,
            )
        })
    }
}

fn label_cell<D: AxisDomain>(axis: &PointAxis<D>, offset: i64) -> LabelCell<D::Point> {
    let point = axis.change_value(offset);
    let label = axis.format_label(&point);
    LabelCell { point, label }
}

/// Virtualized axis label strip with drag tracking and inertial deceleration.
///
/// `padding` is the strip's horizontal offset. Whenever it drifts a full cell
/// away from `base_padding` the base value steps by one cell and the padding
/// is pulled back, so the strip never holds more than one cell of offset.
pub struct AxisScroller<D: AxisDomain> {
    axis: PointAxis<D>,
    config: InertiaConfig,
    labels: LabelPool<D::Point>,
    base_padding: f64,
    padding: f64,
    previous_padding: f64,
    velocity: f64,
    inertia_distance: f64,
    deceleration_rate: f64,
    direction: f64,
    phase: ScrollPhase,
    last_timestamp: Option<f64>,
    allow_increase: Option<StepGate<D::Point>>,
    allow_decrease: Option<StepGate<D::Point>>,
    stats: ScrollerStats,
}

impl<D: AxisDomain> AxisScroller<D> {
    pub fn new(axis: PointAxis<D>, config: InertiaConfig) -> TrackResult<Self> {
        let config = config.validate()?;
        let labels = LabelPool::build(&axis);
        Ok(Self {
            axis,
            config,
            labels,
            base_padding: 0.0,
            padding: 0.0,
            previous_padding: 0.0,
            velocity: 0.0,
            inertia_distance: 0.0,
            deceleration_rate: 0.0,
            direction: 0.0,
            phase: ScrollPhase::Idle,
            last_timestamp: None,
            allow_increase: None,
            allow_decrease: None,
            stats: ScrollerStats::default(),
        })
    }

    /// Sets the aligned rest padding and moves the strip there.
    #[must_use]
    pub fn with_base_padding(mut self, base_padding: f64) -> Self {
        self.base_padding = base_padding;
        self.padding = base_padding;
        self.previous_padding = base_padding;
        self
    }

    pub fn set_allow_increase(&mut self, gate: impl Fn(&D::Point) -> bool + 'static) {
        self.allow_increase = Some(Box::new(gate));
    }

    pub fn set_allow_decrease(&mut self, gate: impl Fn(&D::Point) -> bool + 'static) {
        self.allow_decrease = Some(Box::new(gate));
    }

    pub fn clear_gates(&mut self) {
        self.allow_increase = None;
        self.allow_decrease = None;
    }

    #[must_use]
    pub fn axis(&self) -> &PointAxis<D> {
        &self.axis
    }

    #[must_use]
    pub fn config(&self) -> InertiaConfig {
        self.config
    }

    pub fn set_config(&mut self, config: InertiaConfig) -> TrackResult<()> {
        self.config = config.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn labels(&self) -> &LabelPool<D::Point> {
        &self.labels
    }

    #[must_use]
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        matches!(self.phase, ScrollPhase::Coasting | ScrollPhase::Snapping)
    }

    #[must_use]
    pub fn stats(&self) -> ScrollerStats {
        self.stats
    }

    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn base_padding(&self) -> f64 {
        self.base_padding
    }

    /// Offset of the strip from its aligned rest position.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.padding - self.base_padding
    }

    #[must_use]
    pub fn state(&self) -> ScrollState {
        ScrollState {
            padding: self.padding,
            velocity: self.velocity,
            inertia_distance: self.inertia_distance,
            deceleration_rate: self.deceleration_rate,
            is_dragging: self.phase == ScrollPhase::Dragging,
        }
    }

    /// Screen position of `point` including the current scroll offset.
    #[must_use]
    pub fn point_to_screen(&self, point: &D::Point) -> f64 {
        self.axis.point_to_position(point) + self.scroll_offset()
    }

    /// Point under a screen position including the current scroll offset.
    #[must_use]
    pub fn screen_to_point(&self, position: f64) -> D::Point {
        self.axis.position_to_point(position - self.scroll_offset())
    }

    pub fn set_cell_width(&mut self, cell_width: f64) -> TrackResult<()> {
        self.axis.set_cell_width(cell_width)?;
        self.rest();
        Ok(())
    }

    pub fn set_visible_cells(&mut self, visible_cells: usize) {
        self.axis.set_visible_cells(visible_cells);
        self.labels = LabelPool::build(&self.axis);
    }

    pub fn set_alignment(&mut self, alignment: AxisAlignment) {
        self.axis.set_alignment(alignment);
        self.labels = LabelPool::build(&self.axis);
    }

    /// Re-centres the axis on `point` and stops any motion.
    pub fn jump_to(&mut self, point: D::Point) {
        self.axis.set_base_value(point);
        self.labels = LabelPool::build(&self.axis);
        self.rest();
    }

    /// Cancels inertia and starts tracking a drag.
    pub fn begin_drag(&mut self, timestamp: f64) {
        self.cancel_inertia();
        self.previous_padding = self.padding;
        self.velocity = 0.0;
        self.phase = ScrollPhase::Dragging;
        self.last_timestamp = Some(timestamp);
        trace!(padding = self.padding, "axis drag start");
    }

    /// Applies a pointer delta and updates the smoothed velocity.
    pub fn drag(&mut self, delta: f64, timestamp: f64) -> CellSteps {
        if !delta.is_finite() {
            return CellSteps::default();
        }
        if self.phase != ScrollPhase::Dragging {
            self.begin_drag(timestamp);
        }

        self.previous_padding = self.padding;
        self.padding += delta;
        if let Some(last) = self.last_timestamp {
            let frame_delta = timestamp - last;
            if frame_delta > 0.0 && frame_delta.is_finite() {
                let instantaneous = (self.padding - self.previous_padding) / frame_delta;
                let blend = (frame_delta * self.config.velocity_smoothing).clamp(0.0, 1.0);
                self.velocity += (instantaneous - self.velocity) * blend;
            }
        }
        self.last_timestamp = Some(timestamp);
        self.normalize()
    }

    /// Ends the drag and converts the release velocity into a throw that
    /// comes to rest on a cell boundary.
    pub fn end_drag(&mut self) -> CellSteps {
        if self.phase != ScrollPhase::Dragging {
            return CellSteps::default();
        }
        self.last_timestamp = None;

        let cell_width = self.axis.cell_width();
        let to_base = self.base_padding - self.padding;
        let throw = if self.velocity.abs() >= self.config.min_throw_velocity {
            self.velocity * self.config.time_to_stop / 2.0
        } else {
            0.0
        };
        let cells = ((throw - to_base) / cell_width).round();
        let distance = to_base + cells * cell_width;
        let phase = if throw == 0.0 {
            ScrollPhase::Snapping
        } else {
            ScrollPhase::Coasting
        };
        trace!(
            velocity = self.velocity,
            distance,
            ?phase,
            "axis drag end"
        );
        self.start_inertia(distance, phase)
    }

    /// Applies a discrete wheel delta, then snaps to the nearest boundary.
    pub fn scroll(&mut self, delta: f64) -> CellSteps {
        if !delta.is_finite() {
            return CellSteps::default();
        }
        self.cancel_inertia();
        self.padding += delta;
        let mut steps = self.normalize();
        if !steps.clamped && self.phase != ScrollPhase::Dragging {
            let to_base = self.base_padding - self.padding;
            let cell_width = self.axis.cell_width();
            let distance = to_base + (-to_base / cell_width).round() * cell_width;
            steps += self.start_inertia(distance, ScrollPhase::Snapping);
        }
        steps
    }

    /// Shifts the strip without touching the tracked velocity.
    pub fn nudge(&mut self, delta: f64) -> CellSteps {
        if !delta.is_finite() {
            return CellSteps::default();
        }
        self.cancel_inertia();
        self.padding += delta;
        self.normalize()
    }

    /// Starts a snap from the current padding to the nearest cell boundary.
    pub fn snap_to_cell(&mut self) -> CellSteps {
        self.scroll(0.0)
    }

    /// Advances coasting or snapping by `delta_seconds`.
    pub fn tick(&mut self, delta_seconds: f64) -> CellSteps {
        if !self.is_moving() || !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return CellSteps::default();
        }

        let speed = self.velocity.abs();
        let mut travel = speed * delta_seconds;
        if travel >= self.inertia_distance || speed <= f64::EPSILON {
            travel = self.inertia_distance;
        }
        self.padding += self.direction * travel;
        self.inertia_distance -= travel;
        self.velocity =
            self.direction * (speed - self.deceleration_rate * delta_seconds).max(0.0);

        let mut steps = self.normalize();
        if steps.clamped {
            return steps;
        }
        if self.inertia_distance < self.config.stop_distance {
            steps += self.settle();
        }
        steps
    }

    /// Stops any motion and forces the strip onto its rest padding.
    pub fn cancel_inertia(&mut self) {
        self.velocity = 0.0;
        self.inertia_distance = 0.0;
        self.deceleration_rate = 0.0;
        if self.is_moving() {
            self.phase = ScrollPhase::Idle;
        }
    }

    fn start_inertia(&mut self, distance: f64, phase: ScrollPhase) -> CellSteps {
        self.direction = distance.signum();
        self.inertia_distance = distance.abs();
        self.phase = phase;
        if self.inertia_distance < self.config.stop_distance {
            return self.settle();
        }
        let speed = 2.0 * self.inertia_distance / self.config.time_to_stop;
        self.velocity = self.direction * speed;
        self.deceleration_rate = speed / self.config.time_to_stop;
        CellSteps::default()
    }

    /// Finishes a throw exactly on the nearest cell boundary.
    fn settle(&mut self) -> CellSteps {
        self.padding += self.direction * self.inertia_distance;
        let cells = ((self.padding - self.base_padding) / self.axis.cell_width()).round() as i64;
        let mut steps = CellSteps::default();
        for _ in 0..cells.unsigned_abs() {
            let moved = if cells < 0 {
                self.try_increase()
            } else {
                self.try_decrease()
            };
            if !moved {
                steps.clamped = true;
                break;
            }
            if cells < 0 {
                steps.increased += 1;
            } else {
                steps.decreased += 1;
            }
        }
        self.rest();
        trace!(
            increased = steps.increased,
            decreased = steps.decreased,
            "axis settled"
        );
        steps
    }

    fn rest(&mut self) {
        self.padding = self.base_padding;
        self.previous_padding = self.base_padding;
        self.velocity = 0.0;
        self.inertia_distance = 0.0;
        self.deceleration_rate = 0.0;
        if self.phase != ScrollPhase::Dragging {
            self.phase = ScrollPhase::Idle;
        }
    }

    /// Converts whole-cell drift into base value steps, clamping at denied
    /// navigation bounds.
    fn normalize(&mut self) -> CellSteps {
        let cell_width = self.axis.cell_width();
        let mut steps = CellSteps::default();
        loop {
            let offset = self.padding - self.base_padding;
            if offset <= -cell_width {
                if !self.try_increase() {
                    steps.clamped = true;
                    break;
                }
                self.padding += cell_width;
                steps.increased += 1;
            } else if offset >= cell_width {
                if !self.try_decrease() {
                    steps.clamped = true;
                    break;
                }
                self.padding -= cell_width;
                steps.decreased += 1;
            } else {
                break;
            }
        }

        let offset = self.padding - self.base_padding;
        let denied = (offset < 0.0 && !self.may_increase())
            || (offset > 0.0 && !self.may_decrease());
        if steps.clamped || denied {
            steps.clamped = true;
            self.rest();
        }
        steps
    }

    fn may_increase(&self) -> bool {
        let next = self.axis.change_value(1);
        self.allow_increase.as_ref().is_none_or(|gate| gate(&next))
    }

    fn may_decrease(&self) -> bool {
        let previous = self.axis.change_value(-1);
        self.allow_decrease.as_ref().is_none_or(|gate| gate(&previous))
    }

    fn try_increase(&mut self) -> bool {
        if !self.may_increase() {
            return false;
        }
        self.axis.increase();
        self.labels.shift_forward(&self.axis);
        self.stats.increases += 1;
        self.stats.recycled_labels += 1;
        true
    }

    fn try_decrease(&mut self) -> bool {
        if !self.may_decrease() {
            return false;
        }
        self.axis.decrease();
        self.labels.shift_backward(&self.axis);
        self.stats.decreases += 1;
        self.stats.recycled_labels += 1;
        true
    }
}

impl<D: AxisDomain + fmt::Debug> fmt::Debug for AxisScroller<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisScroller")
            .field("axis", &self.axis)
            .field("phase", &self.phase)
            .field("state", &self.state())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
