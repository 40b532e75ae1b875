use tracks_rs::api::{TrackView, TrackViewConfig};
use tracks_rs::core::{IndexDomain, ItemId, PaneRect, PointerEvent, TrackItem, Vec2, Viewport};
use tracks_rs::interaction::{
    AutoScrollConfig, AutoScrollController, DataViewUpdate, PaneKind, ScrollPhase,
};
use tracks_rs::render::NullPresenter;

fn view() -> (TrackView<IndexDomain, NullPresenter>, ItemId) {
    let config = TrackViewConfig::new(Viewport::new(400, 300));
    let domain = IndexDomain::new(1).expect("valid step");
    let mut view =
        TrackView::new(NullPresenter::default(), domain, 0, config).expect("view init");
    let build = view.add_track("build");
    let item = TrackItem::new("a", 0, 3).expect("well-formed item");
    let a = view.add_item(build, item).expect("add a");
    (view, a)
}

#[test]
fn pointer_beyond_an_edge_still_scrolls() {
    let mut controller =
        AutoScrollController::new(AutoScrollConfig::default()).expect("controller");
    let pane = PaneRect::new(100.0, 50.0, 400.0, 300.0);

    assert!(controller.update_pointer(Vec2::new(20.0, 200.0), pane));
    assert_eq!(controller.direction(), Vec2::new(1.0, 0.0));

    assert!(controller.update_pointer(Vec2::new(300.0, 10.0), pane));
    assert_eq!(controller.direction(), Vec2::new(0.0, -1.0));
}

#[test]
fn invalid_config_is_rejected() {
    let config = AutoScrollConfig {
        border_distance: 10.0,
        speed: 0.0,
    };
    assert!(AutoScrollController::new(config).is_err());
}

#[test]
fn dragging_near_the_trailing_edge_scrolls_and_revalidates() {
    let (mut view, a) = view();
    view.begin_item_drag(0, a, Vec2::new(10.0, 5.0))
        .expect("begin drag");

    let candidate = view
        .drag_item(Vec2::new(395.0, 150.0))
        .expect("candidate");
    assert_eq!((candidate.start, candidate.end), (7, 10));
    assert!(view.auto_scroll().is_active());

    let mut continuations = 0;
    let first = view.tick_with(0.1, |_| continuations += 1);
    assert!(first.auto_scrolled);
    assert_eq!(first.update, DataViewUpdate::Positions);
    assert_eq!(view.drop_candidate().map(|c| c.start), Some(8));

    let second = view.tick_with(0.1, |_| continuations += 1);
    assert_eq!(second.steps.increased, 1);
    assert_eq!(second.update, DataViewUpdate::Full);
    assert_eq!(*view.axis().base_value(), 1);
    assert_eq!(view.drop_candidate().map(|c| c.start), Some(9));
    assert_eq!(continuations, 2);
}

#[test]
fn leaving_the_border_zone_settles_the_axis_on_a_cell() {
    let (mut view, a) = view();
    view.begin_item_drag(0, a, Vec2::new(10.0, 5.0))
        .expect("begin drag");
    view.drag_item(Vec2::new(395.0, 150.0));
    view.tick(0.1);
    view.tick(0.1);
    assert_eq!(view.scroller().scroll_offset(), -30.0);

    view.drag_item(Vec2::new(200.0, 150.0));
    assert!(!view.auto_scroll().is_active());

    let settle = view.tick(1.0 / 60.0);
    assert!(!settle.auto_scrolled);
    assert_eq!(view.scroller().phase(), ScrollPhase::Snapping);
    for _ in 0..120 {
        view.tick(1.0 / 60.0);
    }

    assert_eq!(view.scroller().phase(), ScrollPhase::Idle);
    assert_eq!(*view.axis().base_value(), 2);
    assert_eq!(view.scroller().padding(), 0.0);
    assert_eq!(view.drop_candidate().map(|c| c.start), Some(6));
}

#[test]
fn a_new_pane_drag_stops_auto_scroll() {
    let (mut view, a) = view();
    view.begin_item_drag(0, a, Vec2::new(10.0, 5.0))
        .expect("begin drag");
    view.drag_item(Vec2::new(395.0, 150.0));
    assert!(view.auto_scroll().is_active());

    let event = PointerEvent::new(Vec2::new(200.0, 150.0), Vec2::ZERO, 1.0);
    view.begin_drag(PaneKind::DataGrid, event);
    assert!(!view.auto_scroll().is_active());
    assert!(!view.tick(0.1).auto_scrolled);
}

#[test]
fn committing_the_drag_stops_auto_scroll() {
    let (mut view, a) = view();
    view.begin_item_drag(0, a, Vec2::new(10.0, 5.0))
        .expect("begin drag");
    view.drag_item(Vec2::new(395.0, 150.0));
    view.commit_item_drag().expect("commit");

    assert!(!view.auto_scroll().is_active());
}

#[test]
fn vertical_auto_scroll_stays_within_the_content() {
    let (mut view, a) = view();
    for index in 1..20 {
        view.add_track(format!("track-{index}"));
    }
    assert_eq!(view.content_height(), 480.0);
    let max_offset = view.content_height() - f64::from(view.config().viewport.height);

    view.begin_item_drag(0, a, Vec2::new(10.0, 5.0))
        .expect("begin drag");
    view.drag_item(Vec2::new(200.0, 295.0));
    assert_eq!(view.auto_scroll().direction(), Vec2::new(0.0, 1.0));

    let mut continuations = 0;
    for _ in 0..10 {
        let outcome = view.tick_with(0.1, |_| continuations += 1);
        assert!(outcome.auto_scrolled);
        let offset = view.synchronizer().vertical_offset();
        assert!((0.0..=max_offset).contains(&offset), "offset {offset}");
    }
    assert_eq!(continuations, 10);
    assert_eq!(view.synchronizer().vertical_offset(), max_offset);

    view.drag_item(Vec2::new(200.0, 5.0));
    assert_eq!(view.auto_scroll().direction(), Vec2::new(0.0, -1.0));
    for _ in 0..10 {
        view.tick_with(0.1, |_| {});
        let offset = view.synchronizer().vertical_offset();
        assert!((0.0..=max_offset).contains(&offset), "offset {offset}");
    }
    assert_eq!(view.synchronizer().vertical_offset(), 0.0);
}
