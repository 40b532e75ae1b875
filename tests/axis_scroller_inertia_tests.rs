use proptest::prelude::*;
use tracks_rs::core::{AxisAlignment, IndexDomain, PointAxis};
use tracks_rs::interaction::{AxisScroller, InertiaConfig, ScrollPhase};

const FRAME: f64 = 1.0 / 60.0;

fn scroller() -> AxisScroller<IndexDomain> {
    let domain = IndexDomain::new(1).expect("valid step");
    let axis = PointAxis::new(domain, 0, 50.0, 8, AxisAlignment::Start).expect("valid axis");
    AxisScroller::new(axis, InertiaConfig::default()).expect("valid scroller")
}

fn run_until_idle(scroller: &mut AxisScroller<IndexDomain>) -> usize {
    let mut frames = 0;
    while scroller.is_moving() && frames < 600 {
        scroller.tick(FRAME);
        frames += 1;
    }
    frames
}

#[test]
fn dragging_one_cell_steps_the_base_once() {
    let mut scroller = scroller();
    scroller.begin_drag(0.0);
    let steps = scroller.drag(-50.0, 0.016);

    assert_eq!(steps.increased, 1);
    assert_eq!(steps.decreased, 0);
    assert_eq!(*scroller.axis().base_value(), 1);
    assert_eq!(scroller.padding(), scroller.base_padding());
}

#[test]
fn fast_release_coasts_and_rests_on_a_cell_boundary() {
    let mut scroller = scroller();
    scroller.begin_drag(0.0);
    for frame in 1..=5 {
        scroller.drag(-10.0, f64::from(frame) * 0.01);
    }
    assert_eq!(*scroller.axis().base_value(), 1);

    scroller.end_drag();
    assert_eq!(scroller.phase(), ScrollPhase::Coasting);

    let frames = run_until_idle(&mut scroller);
    assert!(frames < 600, "inertia must terminate");
    assert_eq!(scroller.phase(), ScrollPhase::Idle);
    assert_eq!(*scroller.axis().base_value(), 2);
    assert_eq!(scroller.padding(), 0.0);
    assert_eq!(scroller.stats().increases, 2);
}

#[test]
fn slow_release_snaps_back_to_the_nearest_cell() {
    let mut scroller = scroller();
    scroller.begin_drag(0.0);
    scroller.drag(-20.0, 1.0);
    scroller.end_drag();
    assert_eq!(scroller.phase(), ScrollPhase::Snapping);

    run_until_idle(&mut scroller);
    assert_eq!(*scroller.axis().base_value(), 0);
    assert_eq!(scroller.padding(), 0.0);
}

#[test]
fn slow_release_past_half_a_cell_snaps_forward() {
    let mut scroller = scroller();
    scroller.begin_drag(0.0);
    scroller.drag(-30.0, 1.0);
    scroller.end_drag();

    run_until_idle(&mut scroller);
    assert_eq!(*scroller.axis().base_value(), 1);
    assert_eq!(scroller.padding(), 0.0);
}

#[test]
fn denied_increase_clamps_padding_to_the_base() {
    let mut scroller = scroller();
    scroller.set_allow_increase(|next: &i64| *next <= 2);
    scroller.begin_drag(0.0);
    let steps = scroller.drag(-250.0, 0.016);

    assert_eq!(steps.increased, 2);
    assert!(steps.clamped);
    assert_eq!(*scroller.axis().base_value(), 2);
    assert_eq!(scroller.padding(), scroller.base_padding());
}

#[test]
fn partial_offset_towards_a_denied_direction_is_clamped() {
    let mut scroller = scroller();
    scroller.set_allow_decrease(|_: &i64| false);
    scroller.begin_drag(0.0);
    let steps = scroller.drag(20.0, 0.016);

    assert!(steps.clamped);
    assert_eq!(steps.decreased, 0);
    assert_eq!(scroller.padding(), 0.0);

    scroller.clear_gates();
    scroller.drag(20.0, 0.032);
    assert_eq!(scroller.padding(), 20.0);
}

#[test]
fn new_drag_cancels_running_inertia() {
    let mut scroller = scroller();
    scroller.scroll(-30.0);
    assert!(scroller.is_moving());

    scroller.begin_drag(2.0);
    assert_eq!(scroller.phase(), ScrollPhase::Dragging);
    assert!(!scroller.is_moving());
    assert_eq!(scroller.state().velocity, 0.0);
}

#[test]
fn jump_to_recentres_and_rebuilds_labels() {
    let mut scroller = scroller();
    scroller.jump_to(40);

    assert_eq!(*scroller.axis().base_value(), 40);
    let first = scroller.labels().cells().next().map(|cell| cell.label.clone());
    assert_eq!(first.as_deref(), Some("39"));
}

proptest! {
    #[test]
    fn inertia_always_rests_on_the_base_padding(
        deltas in prop::collection::vec(-200.0f64..200.0, 1..20),
        base_padding in -20.0f64..20.0,
        frame_seconds in 0.004f64..0.05
    ) {
        let mut scroller = scroller().with_base_padding(base_padding);
        scroller.begin_drag(0.0);
        for (index, delta) in deltas.iter().enumerate() {
            scroller.drag(*delta, (index as f64 + 1.0) * frame_seconds);
        }
        scroller.end_drag();

        let frames = run_until_idle(&mut scroller);
        prop_assert!(frames < 600);
        prop_assert_eq!(scroller.phase(), ScrollPhase::Idle);
        prop_assert_eq!(scroller.padding(), base_padding);
    }
}
