use crate::core::{AxisDomain, PointerEvent, Vec2};
use crate::interaction::{Gesture, PaneKind, SyncOutcome};
use crate::render::ItemPresenter;

use super::TrackView;

impl<D: AxisDomain, P: ItemPresenter> TrackView<D, P> {
    /// Pointer pressed on `pane`. Any running auto-scroll stops.
    pub fn begin_drag(&mut self, pane: PaneKind, event: PointerEvent) -> SyncOutcome {
        self.auto_scroll.stop();
        self.dispatch(pane, Gesture::Begin(event))
    }

    pub fn drag(&mut self, pane: PaneKind, event: PointerEvent) -> SyncOutcome {
        self.dispatch(pane, Gesture::Move(event))
    }

    /// Pointer released; the axis starts coasting or snapping.
    pub fn end_drag(&mut self, pane: PaneKind, event: PointerEvent) -> SyncOutcome {
        self.dispatch(pane, Gesture::End(event))
    }

    /// Wheel or touchpad step, expressed as content translation.
    pub fn scroll(&mut self, pane: PaneKind, delta: Vec2) -> SyncOutcome {
        self.dispatch(pane, Gesture::Scroll(delta))
    }

    fn dispatch(&mut self, pane: PaneKind, gesture: Gesture) -> SyncOutcome {
        let outcome = self.sync.dispatch(pane, gesture);
        self.apply_data_view(outcome.update);
        if !outcome.steps.is_empty() {
            self.revalidate_item_drag();
        }
        outcome
    }
}
