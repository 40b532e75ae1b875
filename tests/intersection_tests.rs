use tracks_rs::core::{Track, TrackItem, has_intersection, ranges_intersect};

fn item(name: &str, start: i64, end: i64) -> TrackItem<i64> {
    TrackItem::new(name, start, end).expect("well-formed item")
}

/// `a [0,3]`, `b [4,8]` on line 0 and `c [2,15]` on line 1.
fn scheduled_track() -> (Track<i64>, [tracks_rs::core::ItemId; 3]) {
    let mut track = Track::new("build");
    let a = track.add_item(item("a", 0, 3)).expect("add a");
    let b = track.add_item(item("b", 4, 8)).expect("add b");
    let c = track.add_item(item("c", 2, 15)).expect("add c");
    (track, [a, b, c])
}

#[test]
fn ranges_touching_at_an_endpoint_do_not_intersect() {
    assert!(!ranges_intersect(&0, &3, &3, &6));
    assert!(!ranges_intersect(&3, &6, &0, &3));
    assert!(ranges_intersect(&0, &10, &2, &3));
}

#[test]
fn new_item_is_checked_against_the_candidate_line() {
    let (track, _) = scheduled_track();
    let candidate = item("candidate", 5, 6);

    assert!(has_intersection(&track, &5, &6, 0, &candidate));
    assert!(has_intersection(&track, &5, &6, 1, &candidate));
    assert!(!has_intersection(&track, &5, &6, 2, &candidate));
    assert!(!has_intersection(&track, &9, &12, 0, &candidate));
}

#[test]
fn existing_item_ignores_itself() {
    let (track, [_, b, _]) = scheduled_track();
    let b_item = track.item(b).expect("b present").clone();

    assert!(!has_intersection(&track, &4, &8, 0, &b_item));
    assert!(has_intersection(&track, &2, &6, 0, &b_item));
}

#[test]
fn existing_item_changing_line_is_not_checked_on_ungrouped_tracks() {
    let (track, [a, _, _]) = scheduled_track();
    let a_item = track.item(a).expect("a present").clone();

    // Line 1 holds `c [2,15]`, yet a line change on an ungrouped track passes.
    assert!(!has_intersection(&track, &4, &8, 1, &a_item));
    assert!(has_intersection(&track, &4, &6, 0, &a_item));
}

#[test]
fn grouped_tracks_check_every_item_with_the_same_name() {
    let mut track = Track::new("teams").with_separate_groups(true);
    track.add_item(item("A", 0, 3)).expect("add");
    track.add_item(item("A", 1, 6)).expect("add");
    track.add_item(item("B", 10, 12)).expect("add");

    let same_name = item("A", 2, 4);
    let other_name = item("C", 2, 4);
    assert!(has_intersection(&track, &2, &4, 7, &same_name));
    assert!(!has_intersection(&track, &2, &4, 0, &other_name));
    assert!(!has_intersection(&track, &7, &9, 0, &same_name));
}
