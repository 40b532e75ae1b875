use proptest::prelude::*;
use tracks_rs::core::{LayoutMode, Track, TrackItem, ranges_intersect};

fn spans() -> impl Strategy<Value = Vec<(u8, i64, i64)>> {
    prop::collection::vec((0u8..3, 0i64..200, 1i64..40), 0..60)
}

fn build(spans: &[(u8, i64, i64)], separate_groups: bool, items_to_top: bool) -> Track<i64> {
    let mut track = Track::new("prop")
        .with_separate_groups(separate_groups)
        .with_items_to_top(items_to_top);
    for (group, start, len) in spans {
        let name = format!("group-{group}");
        let item = TrackItem::new(name, *start, start + len).expect("well-formed item");
        track.add_item(item).expect("add item");
    }
    track
}

fn orders(track: &Track<i64>) -> Vec<usize> {
    track.items().iter().map(TrackItem::order).collect()
}

fn assert_stable_across_rebuilds(
    spans: &[(u8, i64, i64)],
    configure: impl Fn(Track<i64>) -> Track<i64>,
) -> Result<(), TestCaseError> {
    let rebuild = || {
        let mut track = configure(Track::new("prop"));
        let items = spans.iter().map(|(group, start, len)| {
            TrackItem::new(format!("group-{group}"), *start, start + len).expect("well-formed item")
        });
        track.add_items(items).expect("add items");
        track
    };
    let first = rebuild();
    let second = rebuild();
    prop_assert_eq!(orders(&first), orders(&second));

    let mut relaid = first.clone();
    let report = relaid.relayout();
    prop_assert!(!report.changed);
    prop_assert_eq!(orders(&relaid), orders(&first));
    Ok(())
}

/// Quadratic first-fit over items stably sorted by start point.
fn first_fit_reference(ranges: &[(i64, i64)]) -> Vec<usize> {
    let mut by_start: Vec<usize> = (0..ranges.len()).collect();
    by_start.sort_by_key(|index| ranges[*index].0);

    let mut lines = vec![0; ranges.len()];
    let mut placed: Vec<usize> = Vec::with_capacity(ranges.len());
    for index in by_start {
        let (start, end) = ranges[index];
        let line = (0..)
            .find(|line| {
                !placed.iter().any(|other| {
                    let (other_start, other_end) = ranges[*other];
                    lines[*other] == *line
                        && ranges_intersect(&other_start, &other_end, &start, &end)
                })
            })
            .unwrap_or_default();
        lines[index] = line;
        placed.push(index);
    }
    lines
}

fn assert_lines_do_not_overlap(track: &Track<i64>) -> Result<(), TestCaseError> {
    let items = track.items();
    for (index, left) in items.iter().enumerate() {
        for right in &items[index + 1..] {
            if left.order() == right.order() {
                let overlap = left.start_point() < right.end_point()
                    && right.start_point() < left.end_point();
                prop_assert!(
                    !overlap,
                    "{}[{}, {}] and {}[{}, {}] share line {}",
                    left.name(),
                    left.start_point(),
                    left.end_point(),
                    right.name(),
                    right.start_point(),
                    right.end_point(),
                    left.order()
                );
            }
        }
    }
    let expected_lines = items.iter().map(|item| item.order() + 1).max().unwrap_or(0);
    prop_assert_eq!(track.max_items_at_same_point(), expected_lines);
    Ok(())
}

proptest! {
    #[test]
    fn top_line_never_overlaps(spans in spans()) {
        let track = build(&spans, false, true);
        assert_lines_do_not_overlap(&track)?;
    }

    #[test]
    fn any_line_never_overlaps(spans in spans()) {
        let track = build(&spans, false, false);
        assert_lines_do_not_overlap(&track)?;
    }

    #[test]
    fn group_by_name_never_overlaps_and_keeps_groups_apart(spans in spans()) {
        let track = build(&spans, true, true);
        assert_lines_do_not_overlap(&track)?;

        let items = track.items();
        for left in items {
            for right in items {
                if left.order() == right.order() {
                    prop_assert_eq!(left.name(), right.name());
                }
            }
        }
    }

    #[test]
    fn layout_is_deterministic(spans in spans()) {
        let first = build(&spans, false, true);
        let second = build(&spans, false, true);
        let first_orders: Vec<usize> = first.items().iter().map(TrackItem::order).collect();
        let second_orders: Vec<usize> = second.items().iter().map(TrackItem::order).collect();
        prop_assert_eq!(first_orders, second_orders);

        let mut relaid = first.clone();
        let report = relaid.relayout();
        prop_assert!(!report.changed);
    }

    #[test]
    fn top_line_packs_tightly(spans in spans()) {
        let track = build(&spans, false, true);
        let items = track.items();
        for item in items.iter().filter(|item| item.order() > 0) {
            // Every line above the item holds something it overlaps.
            for line in 0..item.order() {
                let blocked = items.iter().any(|other| {
                    other.order() == line
                        && other.start_point() < item.end_point()
                        && item.start_point() < other.end_point()
                });
                prop_assert!(blocked, "{} could sit on line {}", item.name(), line);
            }
        }
    }

    #[test]
    fn top_line_matches_reference_first_fit(
        ranges in prop::collection::vec((0i64..120, 0i64..12), 0..80)
    ) {
        let ranges: Vec<(i64, i64)> =
            ranges.into_iter().map(|(start, len)| (start, start + len)).collect();
        let mut items: Vec<TrackItem<i64>> = ranges
            .iter()
            .map(|(start, end)| TrackItem::new("span", *start, *end).expect("well-formed item"))
            .collect();

        let report = LayoutMode::TopLine.apply(&mut items);
        prop_assert_eq!(report.placed, ranges.len());

        let packed: Vec<usize> = items.iter().map(TrackItem::order).collect();
        prop_assert_eq!(packed, first_fit_reference(&ranges));
    }

    #[test]
    fn any_line_is_deterministic(spans in spans()) {
        assert_stable_across_rebuilds(&spans, |track| {
            track.with_items_to_top(false).with_compact_lines(false)
        })?;
    }

    #[test]
    fn any_line_compact_is_deterministic(spans in spans()) {
        assert_stable_across_rebuilds(&spans, |track| {
            track.with_items_to_top(false).with_compact_lines(true)
        })?;
    }

    #[test]
    fn group_by_name_is_deterministic(spans in spans()) {
        assert_stable_across_rebuilds(&spans, |track| track.with_separate_groups(true))?;
    }
}
