mod data_view;
mod frame_controller;
mod gesture_controller;
mod item_drag_controller;
mod snapshot;
mod track_controller;
mod view_config;

use std::collections::HashSet;

use crate::core::{AxisDomain, ItemId, PaneRect, PointAxis, Track};
use crate::error::TrackResult;
use crate::interaction::{AutoScrollController, AxisScroller, ScrollPane, ViewSynchronizer};
use crate::render::ItemPresenter;

pub use data_view::ViewStats;
pub use frame_controller::TickOutcome;
pub use item_drag_controller::DropCandidate;
pub use snapshot::{
    ItemSnapshot, TrackSnapshot, VIEW_SNAPSHOT_JSON_SCHEMA_V1, ViewSnapshot,
    ViewSnapshotJsonContractV1,
};
pub use view_config::TrackViewConfig;

use item_drag_controller::ItemDrag;

/// Headless tracks view: tracks, the synchronized panes and the presenter
/// receiving item geometry.
pub struct TrackView<D: AxisDomain, P: ItemPresenter> {
    config: TrackViewConfig,
    tracks: Vec<Track<D::Point>>,
    sync: ViewSynchronizer<D>,
    auto_scroll: AutoScrollController,
    presenter: P,
    data_pane: PaneRect,
    visible: HashSet<ItemId>,
    item_drag: Option<ItemDrag<D::Point>>,
    stats: ViewStats,
}

impl<D: AxisDomain, P: ItemPresenter> TrackView<D, P> {
    /// Creates a view whose axis is anchored at `base_value`.
    pub fn new(
        presenter: P,
        domain: D,
        base_value: D::Point,
        config: TrackViewConfig,
    ) -> TrackResult<Self> {
        let config = config.validate()?;
        let axis = PointAxis::new(
            domain,
            base_value,
            config.cell_width,
            config.visible_cells(),
            config.alignment,
        )?;
        let scroller = AxisScroller::new(axis, config.inertia)?;
        let viewport_height = f64::from(config.viewport.height);
        let track_names = config
            .show_track_names
            .then(|| ScrollPane::new(viewport_height));
        let data_grid = Some(ScrollPane::new(viewport_height));
        let sync = ViewSynchronizer::new(scroller, track_names, data_grid);
        let auto_scroll = AutoScrollController::new(config.auto_scroll)?;
        let data_pane = PaneRect::new(
            0.0,
            0.0,
            f64::from(config.viewport.width),
            viewport_height,
        );

        let mut view = Self {
            config,
            tracks: Vec::new(),
            sync,
            auto_scroll,
            presenter,
            data_pane,
            visible: HashSet::new(),
            item_drag: None,
            stats: ViewStats::default(),
        };
        view.refresh();
        Ok(view)
    }

    #[must_use]
    pub fn config(&self) -> TrackViewConfig {
        self.config
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[must_use]
    pub fn axis(&self) -> &PointAxis<D> {
        self.sync.scroller().axis()
    }

    #[must_use]
    pub fn scroller(&self) -> &AxisScroller<D> {
        self.sync.scroller()
    }

    /// Mutable scroller access, e.g. to install navigation gates.
    pub fn scroller_mut(&mut self) -> &mut AxisScroller<D> {
        self.sync.scroller_mut()
    }

    #[must_use]
    pub fn synchronizer(&self) -> &ViewSynchronizer<D> {
        &self.sync
    }

    #[must_use]
    pub fn auto_scroll(&self) -> &AutoScrollController {
        &self.auto_scroll
    }

    /// Data pane bounds in host coordinates, used for auto-scroll and drag hit tests.
    #[must_use]
    pub fn data_pane(&self) -> PaneRect {
        self.data_pane
    }

    pub fn set_data_pane(&mut self, data_pane: PaneRect) {
        self.data_pane = data_pane;
        self.sync.set_viewport_height(data_pane.height);
    }

    /// Stops cross-pane forwarding and any running motion.
    ///
    /// Used when the host hides or tears the view down.
    pub fn disable(&mut self) {
        self.sync.detach();
        self.auto_scroll.stop();
        self.item_drag = None;
        for track in &mut self.tracks {
            track.unsubscribe_all();
        }
    }

    pub fn enable(&mut self) {
        self.sync.attach();
    }
}
