//! Frame-driven controllers: the inertial axis scroller, the vertical panes,
//! their synchronizer and edge auto-scroll.
//!
//! Nothing here registers itself anywhere. The host owns every controller and
//! drives them from its own loop through `tick`.

pub mod auto_scroll;
pub mod pane;
pub mod scroller;
pub mod sync;

pub use auto_scroll::{AutoScrollConfig, AutoScrollController};
pub use pane::ScrollPane;
pub use scroller::{
    AxisScroller, CellSteps, InertiaConfig, LabelCell, LabelPool, ScrollPhase, ScrollState,
    ScrollerStats, StepGate,
};
pub use sync::{DataViewUpdate, Gesture, PaneKind, SyncOutcome, SyncStats, ViewSynchronizer};
