use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{AxisDomain, AxisWindow, PointerEvent, Vec2};
use crate::interaction::pane::ScrollPane;
use crate::interaction::scroller::{AxisScroller, CellSteps};

/// The three coupled panes of a tracks view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaneKind {
    /// Horizontal point-axis label strip.
    AxisLabels,
    /// Vertical list of track names.
    TrackNames,
    /// Item grid, scrollable on both axes.
    DataGrid,
}

impl PaneKind {
    pub const ALL: [PaneKind; 3] = [Self::AxisLabels, Self::TrackNames, Self::DataGrid];

    /// Drops the components of `delta` this pane cannot originate.
    #[must_use]
    pub fn filter(self, delta: Vec2) -> Vec2 {
        match self {
            Self::AxisLabels => Vec2::new(delta.x, 0.0),
            Self::TrackNames => Vec2::new(0.0, delta.y),
            Self::DataGrid => delta,
        }
    }
}

/// Input categories mirrored across panes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gesture {
    Begin(PointerEvent),
    Move(PointerEvent),
    End(PointerEvent),
    /// Discrete wheel delta expressed as content translation.
    Scroll(Vec2),
}

impl Gesture {
    fn filtered(self, origin: PaneKind) -> Self {
        match self {
            Self::Begin(event) => Self::Begin(filter_event(event, origin)),
            Self::Move(event) => Self::Move(filter_event(event, origin)),
            Self::End(event) => Self::End(filter_event(event, origin)),
            Self::Scroll(delta) => Self::Scroll(origin.filter(delta)),
        }
    }
}

fn filter_event(event: PointerEvent, origin: PaneKind) -> PointerEvent {
    PointerEvent {
        delta: origin.filter(event.delta),
        ..event
    }
}

/// How much of the data view must be rewritten after a recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataViewUpdate {
    /// Nothing moved.
    None,
    /// Same visible window; only screen positions changed.
    Positions,
    /// The visible window changed; items entering or leaving need rework.
    Full,
}

/// Result of forwarding one input event or tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    pub steps: CellSteps,
    pub update: DataViewUpdate,
    /// Panes that reacted, origin first.
    pub forwarded: SmallVec<[PaneKind; 3]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncStats {
    pub events: u64,
    pub recompute_passes: u64,
    pub full_refreshes: u64,
}

/// Couples the axis scroller, the track-name pane and the data-grid pane.
///
/// Each gesture is applied to its origin pane, replayed on the other two,
/// and followed by exactly one visible-range recompute.
#[derive(Debug)]
pub struct ViewSynchronizer<D: AxisDomain> {
    scroller: AxisScroller<D>,
    track_names: Option<ScrollPane>,
    data_grid: Option<ScrollPane>,
    window: AxisWindow<D::Point>,
    attached: bool,
    stats: SyncStats,
}

impl<D: AxisDomain> ViewSynchronizer<D> {
    #[must_use]
    pub fn new(
        scroller: AxisScroller<D>,
        track_names: Option<ScrollPane>,
        data_grid: Option<ScrollPane>,
    ) -> Self {
        let window = scroller.axis().visible_window();
        Self {
            scroller,
            track_names,
            data_grid,
            window,
            attached: true,
            stats: SyncStats::default(),
        }
    }

    #[must_use]
    pub fn scroller(&self) -> &AxisScroller<D> {
        &self.scroller
    }

    pub fn scroller_mut(&mut self) -> &mut AxisScroller<D> {
        &mut self.scroller
    }

    #[must_use]
    pub fn track_names(&self) -> Option<&ScrollPane> {
        self.track_names.as_ref()
    }

    #[must_use]
    pub fn data_grid(&self) -> Option<&ScrollPane> {
        self.data_grid.as_ref()
    }

    pub fn set_track_names(&mut self, pane: Option<ScrollPane>) {
        self.track_names = pane;
    }

    pub fn set_data_grid(&mut self, pane: Option<ScrollPane>) {
        self.data_grid = pane;
    }

    #[must_use]
    pub fn window(&self) -> &AxisWindow<D::Point> {
        &self.window
    }

    #[must_use]
    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Stops all cross-pane forwarding; later events are ignored.
    pub fn detach(&mut self) {
        self.attached = false;
        self.scroller.cancel_inertia();
        trace!("view synchronizer detached");
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Vertical scroll offset shared by the track-name and data-grid panes.
    #[must_use]
    pub fn vertical_offset(&self) -> f64 {
        self.data_grid
            .or(self.track_names)
            .map_or(0.0, |pane| pane.offset())
    }

    /// Updates the scrollable height of both vertical panes.
    pub fn set_content_height(&mut self, content_height: f64) {
        for pane in self.vertical_panes_mut() {
            pane.set_content_height(content_height);
        }
    }

    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        for pane in self.vertical_panes_mut() {
            pane.set_viewport_height(viewport_height);
        }
    }

    /// Applies `gesture` to `origin`, mirrors it on the other panes and
    /// recomputes the visible range once.
    pub fn dispatch(&mut self, origin: PaneKind, gesture: Gesture) -> SyncOutcome {
        if !self.attached {
            return self.idle_outcome();
        }
        self.stats.events += 1;

        let gesture = gesture.filtered(origin);
        let mut forwarded = SmallVec::new();
        let mut steps = CellSteps::default();
        let mut moved = false;

        forwarded.push(origin);
        let (origin_steps, origin_moved) = self.apply(origin, gesture);
        steps += origin_steps;
        moved |= origin_moved;

        for pane in PaneKind::ALL.into_iter().filter(|pane| *pane != origin) {
            if !self.has_pane(pane) {
                continue;
            }
            forwarded.push(pane);
            let (pane_steps, pane_moved) = self.apply(pane, gesture);
            steps += pane_steps;
            moved |= pane_moved;
        }

        let update = self.recompute(moved || !steps.is_empty());
        SyncOutcome {
            steps,
            update,
            forwarded,
        }
    }

    /// Advances scroller inertia and recomputes when anything moved.
    pub fn tick(&mut self, delta_seconds: f64) -> SyncOutcome {
        if !self.attached || !self.scroller.is_moving() {
            return self.idle_outcome();
        }
        let steps = self.scroller.tick(delta_seconds);
        let update = self.recompute(true);
        SyncOutcome {
            steps,
            update,
            forwarded: SmallVec::from_slice(&[PaneKind::AxisLabels]),
        }
    }

    /// Applies an auto-scroll delta: `delta.x` to the axis padding and
    /// `delta.y` to both vertical offsets.
    pub fn auto_scroll(&mut self, delta: Vec2) -> SyncOutcome {
        if !self.attached {
            return self.idle_outcome();
        }
        let mut forwarded = SmallVec::new();
        let mut moved = false;
        let mut steps = CellSteps::default();
        if delta.x != 0.0 {
            steps = self.scroller.nudge(delta.x);
            forwarded.push(PaneKind::AxisLabels);
            moved = true;
        }
        if delta.y != 0.0 {
            if let Some(pane) = self.track_names.as_mut() {
                moved |= pane.advance(delta.y);
                forwarded.push(PaneKind::TrackNames);
            }
            if let Some(pane) = self.data_grid.as_mut() {
                moved |= pane.advance(delta.y);
                forwarded.push(PaneKind::DataGrid);
            }
        }
        let update = self.recompute(moved);
        SyncOutcome {
            steps,
            update,
            forwarded,
        }
    }

    /// Lets the axis settle on a cell boundary after auto-scroll ends.
    pub fn settle_axis(&mut self) -> SyncOutcome {
        if !self.attached {
            return self.idle_outcome();
        }
        let steps = self.scroller.snap_to_cell();
        let update = self.recompute(true);
        SyncOutcome {
            steps,
            update,
            forwarded: SmallVec::from_slice(&[PaneKind::AxisLabels]),
        }
    }

    /// Derives the visible window from the axis and compares it with the
    /// previous one.
    pub fn recompute(&mut self, moved: bool) -> DataViewUpdate {
        self.stats.recompute_passes += 1;
        let window = self.scroller.axis().visible_window();
        if window != self.window {
            self.window = window;
            self.stats.full_refreshes += 1;
            return DataViewUpdate::Full;
        }
        if moved {
            DataViewUpdate::Positions
        } else {
            DataViewUpdate::None
        }
    }

    fn idle_outcome(&self) -> SyncOutcome {
        SyncOutcome {
            steps: CellSteps::default(),
            update: DataViewUpdate::None,
            forwarded: SmallVec::new(),
        }
    }

    fn has_pane(&self, pane: PaneKind) -> bool {
        match pane {
            PaneKind::AxisLabels => true,
            PaneKind::TrackNames => self.track_names.is_some(),
            PaneKind::DataGrid => self.data_grid.is_some(),
        }
    }

    fn vertical_panes_mut(&mut self) -> impl Iterator<Item = &mut ScrollPane> {
        self.track_names
            .as_mut()
            .into_iter()
            .chain(self.data_grid.as_mut())
    }

    /// Applies a gesture to one pane; returns axis steps and whether it moved.
    fn apply(&mut self, pane: PaneKind, gesture: Gesture) -> (CellSteps, bool) {
        match pane {
            PaneKind::AxisLabels => self.apply_axis(gesture),
            PaneKind::TrackNames => (
                CellSteps::default(),
                apply_vertical(self.track_names.as_mut(), gesture),
            ),
            PaneKind::DataGrid => (
                CellSteps::default(),
                apply_vertical(self.data_grid.as_mut(), gesture),
            ),
        }
    }

    fn apply_axis(&mut self, gesture: Gesture) -> (CellSteps, bool) {
        match gesture {
            Gesture::Begin(event) => {
                self.scroller.begin_drag(event.timestamp);
                (CellSteps::default(), false)
            }
            Gesture::Move(event) => {
                let moved = event.delta.x != 0.0;
                (self.scroller.drag(event.delta.x, event.timestamp), moved)
            }
            Gesture::End(_) => (self.scroller.end_drag(), false),
            Gesture::Scroll(delta) if delta.x != 0.0 => (self.scroller.scroll(delta.x), true),
            Gesture::Scroll(_) => (CellSteps::default(), false),
        }
    }
}

fn apply_vertical(pane: Option<&mut ScrollPane>, gesture: Gesture) -> bool {
    let Some(pane) = pane else {
        return false;
    };
    match gesture {
        Gesture::Begin(_) => {
            pane.begin_drag();
            false
        }
        Gesture::Move(event) => pane.follow_pointer(event.delta.y),
        Gesture::End(_) => {
            pane.end_drag();
            false
        }
        Gesture::Scroll(delta) => pane.follow_pointer(delta.y),
    }
}
