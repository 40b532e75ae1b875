use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::AxisDomain;
use crate::interaction::{CellSteps, DataViewUpdate, ScrollPhase};
use crate::render::ItemPresenter;

use super::TrackView;

/// What one frame changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    pub steps: CellSteps,
    pub update: DataViewUpdate,
    pub auto_scrolled: bool,
}

impl<D: AxisDomain, P: ItemPresenter> TrackView<D, P> {
    /// Advances axis inertia and edge auto-scroll by `delta_seconds`.
    pub fn tick(&mut self, delta_seconds: f64) -> TickOutcome {
        self.tick_with(delta_seconds, |_| {})
    }

    /// Like [`Self::tick`], running `continuation` after every auto-scroll
    /// step so the host can react to the content moving under the pointer.
    pub fn tick_with(
        &mut self,
        delta_seconds: f64,
        mut continuation: impl FnMut(&mut Self),
    ) -> TickOutcome {
        let mut outcome = TickOutcome {
            steps: CellSteps::default(),
            update: DataViewUpdate::None,
            auto_scrolled: false,
        };
        if !self.sync.is_attached() || !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return outcome;
        }

        let inertia = self.sync.tick(delta_seconds);
        self.apply_data_view(inertia.update);
        outcome.steps += inertia.steps;
        outcome.update = merge(outcome.update, inertia.update);

        if let Some(delta) = self.auto_scroll.tick(delta_seconds) {
            let scrolled = self.sync.auto_scroll(delta);
            self.apply_data_view(scrolled.update);
            outcome.steps += scrolled.steps;
            outcome.update = merge(outcome.update, scrolled.update);
            outcome.auto_scrolled = true;
            self.revalidate_item_drag();
            continuation(self);
        } else if self.needs_settle() {
            let settled = self.sync.settle_axis();
            self.apply_data_view(settled.update);
            outcome.steps += settled.steps;
            outcome.update = merge(outcome.update, settled.update);
        } else if !inertia.steps.is_empty() {
            self.revalidate_item_drag();
        }

        if outcome.update != DataViewUpdate::None {
            trace!(
                increased = outcome.steps.increased,
                decreased = outcome.steps.decreased,
                auto_scrolled = outcome.auto_scrolled,
                "frame"
            );
        }
        outcome
    }

    /// Stops edge auto-scroll; the axis snaps back onto a cell on the next frame.
    pub fn stop_auto_scroll(&mut self) {
        self.auto_scroll.stop();
    }

    /// Auto-scroll left the strip between two cells.
    fn needs_settle(&self) -> bool {
        let scroller = self.sync.scroller();
        scroller.phase() == ScrollPhase::Idle && scroller.scroll_offset() != 0.0
    }
}

fn merge(current: DataViewUpdate, next: DataViewUpdate) -> DataViewUpdate {
    match (current, next) {
        (DataViewUpdate::Full, _) | (_, DataViewUpdate::Full) => DataViewUpdate::Full,
        (DataViewUpdate::Positions, _) | (_, DataViewUpdate::Positions) => {
            DataViewUpdate::Positions
        }
        _ => DataViewUpdate::None,
    }
}
