use tracks_rs::TrackError;
use tracks_rs::core::{LayoutMode, Track, TrackItem};

fn item(name: &str, start: i64, end: i64) -> TrackItem<i64> {
    TrackItem::new(name, start, end).expect("well-formed item")
}

fn orders(track: &Track<i64>) -> Vec<usize> {
    track.items().iter().map(TrackItem::order).collect()
}

#[test]
fn top_line_moves_overlapping_item_to_next_line() {
    let mut track = Track::new("build");
    track.add_item(item("a", 0, 3)).expect("add a");
    track.add_item(item("b", 4, 8)).expect("add b");
    track.add_item(item("c", 2, 15)).expect("add c");

    assert_eq!(track.layout_mode(), LayoutMode::TopLineCompact);
    assert_eq!(orders(&track), vec![0, 0, 1]);
    assert_eq!(track.max_items_at_same_point(), 2);
}

#[test]
fn touching_items_share_a_line() {
    let mut track = Track::new("build");
    track.add_item(item("a", 0, 3)).expect("add a");
    track.add_item(item("b", 3, 6)).expect("add b");

    assert_eq!(orders(&track), vec![0, 0]);
    assert_eq!(track.max_items_at_same_point(), 1);
}

#[test]
fn empty_track_needs_no_lines() {
    let track: Track<i64> = Track::new("empty");
    assert_eq!(track.max_items_at_same_point(), 0);
    assert!(track.is_empty());
}

#[test]
fn removing_an_item_releases_its_line() {
    let mut track = Track::new("build");
    track.add_item(item("a", 0, 10)).expect("add a");
    let b = track.add_item(item("b", 2, 4)).expect("add b");
    assert_eq!(track.max_items_at_same_point(), 2);

    let removed = track.remove_item(b).expect("b is in the track");
    assert_eq!(removed.name(), "b");
    assert_eq!(track.max_items_at_same_point(), 1);
    assert!(track.remove_item(b).is_none());
}

#[test]
fn group_by_name_packs_each_name_in_its_own_block() {
    let mut track = Track::new("teams").with_separate_groups(true);
    track.add_item(item("A", 0, 3)).expect("add");
    track.add_item(item("A", 5, 8)).expect("add");
    track.add_item(item("A", 1, 6)).expect("add");
    track.add_item(item("B", 0, 2)).expect("add");

    assert_eq!(track.layout_mode(), LayoutMode::GroupByName);
    assert_eq!(orders(&track), vec![0, 0, 1, 2]);
    assert_eq!(track.max_items_at_same_point(), 3);
}

#[test]
fn any_line_keeps_a_free_preferred_line() {
    let mut track = Track::new("ops")
        .with_items_to_top(false)
        .with_compact_lines(false);
    track
        .add_item(item("a", 0, 5).with_order(2))
        .expect("add a");

    assert_eq!(track.layout_mode(), LayoutMode::AnyLine);
    assert_eq!(orders(&track), vec![2]);
    assert_eq!(track.max_items_at_same_point(), 3);

    track.set_compact_lines(true);
    assert_eq!(track.layout_mode(), LayoutMode::AnyLineCompact);
    assert_eq!(orders(&track), vec![0]);
    assert_eq!(track.max_items_at_same_point(), 1);
}

#[test]
fn any_line_falls_back_to_first_fit_when_preferred_line_is_taken() {
    let mut track = Track::new("ops").with_items_to_top(false);
    track.add_item(item("a", 0, 5)).expect("add a");
    track
        .add_item(item("b", 2, 4).with_order(0))
        .expect("add b");

    assert_eq!(orders(&track), vec![0, 1]);
}

#[test]
fn pinned_items_keep_their_line() {
    let mut track = Track::new("release");
    track
        .add_item(item("freeze", 0, 10).pinned_at(3))
        .expect("add pinned");
    track.add_item(item("a", 0, 10)).expect("add a");

    let report = track.relayout();
    assert_eq!(report.pinned, 1);
    assert_eq!(report.placed, 1);
    assert_eq!(orders(&track), vec![3, 0]);
    assert_eq!(track.max_items_at_same_point(), 4);
}

#[test]
fn releasing_a_pin_lets_layout_move_the_item() {
    let mut track = Track::new("release");
    let pinned = track
        .add_item(item("freeze", 0, 10).pinned_at(3))
        .expect("add pinned");
    track.set_item_pinned(pinned, None).expect("release");

    assert_eq!(orders(&track), vec![0]);
    assert!(!track.items()[0].fixed_order());
}

#[test]
fn malformed_items_are_rejected_on_add() {
    let mut track = Track::new("build");
    let err = track
        .add_item(TrackItem::new_unchecked("bad", 9, 2))
        .expect_err("start after end");
    assert!(matches!(err, TrackError::InvalidInterval { ref name } if name == "bad"));
    assert!(track.is_empty());
}

#[test]
fn malformed_items_are_skipped_by_layout_passes() {
    let mut items = vec![
        TrackItem::new_unchecked("bad", 9, 2).with_order(5),
        item("a", 0, 3),
        item("b", 1, 4),
    ];
    let report = LayoutMode::TopLine.apply(&mut items);

    assert_eq!(report.skipped_malformed, 1);
    assert_eq!(report.placed, 2);
    assert_eq!(items[0].order(), 5);
    assert_eq!((items[1].order(), items[2].order()), (0, 1));
    assert_eq!(report.line_count, 2);
}

#[test]
fn move_item_validates_the_new_range() {
    let mut track = Track::new("build");
    let a = track.add_item(item("a", 0, 3)).expect("add a");

    let err = track.move_item(a, 8, 1, None).expect_err("inverted range");
    assert!(matches!(err, TrackError::InvalidInterval { .. }));
    assert_eq!(track.item(a).map(|it| (*it.start_point(), *it.end_point())), Some((0, 3)));

    track.move_item(a, 5, 9, None).expect("move");
    assert_eq!(track.item(a).map(|it| (*it.start_point(), *it.end_point())), Some((5, 9)));
}

#[test]
fn layout_mode_selection_follows_track_flags() {
    assert_eq!(LayoutMode::select(true, false, false), LayoutMode::GroupByName);
    assert_eq!(LayoutMode::select(false, true, true), LayoutMode::TopLineCompact);
    assert_eq!(LayoutMode::select(false, true, false), LayoutMode::TopLine);
    assert_eq!(LayoutMode::select(false, false, true), LayoutMode::AnyLineCompact);
    assert_eq!(LayoutMode::select(false, false, false), LayoutMode::AnyLine);
}
