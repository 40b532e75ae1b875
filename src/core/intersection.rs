use smallvec::SmallVec;

use crate::core::{Track, TrackItem};

/// Returns `true` when `[other_start, other_end]` overlaps the candidate range.
///
/// The other item's start is tested against `[candidate_start, candidate_end)`
/// and its end against `(candidate_start, candidate_end]`, so ranges that only
/// touch at one endpoint do not overlap.
#[must_use]
pub fn ranges_intersect<P: Ord>(
    other_start: &P,
    other_end: &P,
    candidate_start: &P,
    candidate_end: &P,
) -> bool {
    let start_inside = other_start >= candidate_start && other_start < candidate_end;
    let end_inside = other_end > candidate_start && other_end <= candidate_end;
    let contains = other_start <= candidate_start && other_end >= candidate_end;
    start_inside || end_inside || contains
}

/// Decides whether `target` placed at `[candidate_start, candidate_end]` on
/// line `candidate_order` would overlap another item of `track`.
///
/// `target` may be an item of `track` being repositioned or an item that is
/// not in the track yet. Grouped tracks compare against every item sharing
/// the target's name; other tracks compare against the candidate line only.
#[must_use]
pub fn has_intersection<P: Ord>(
    track: &Track<P>,
    candidate_start: &P,
    candidate_end: &P,
    candidate_order: usize,
    target: &TrackItem<P>,
) -> bool {
    let is_new = !track.items().iter().any(|item| item.id() == target.id());

    // Existing items moving across lines are not checked on ungrouped tracks.
    if !is_new && target.order() != candidate_order && !track.separate_groups() {
        return false;
    }

    let others: SmallVec<[&TrackItem<P>; 16]> = track
        .items()
        .iter()
        .filter(|item| item.id() != target.id() && item.is_well_formed())
        .filter(|item| {
            if track.separate_groups() {
                item.name() == target.name()
            } else {
                item.order() == candidate_order
            }
        })
        .collect();

    others.iter().any(|item| {
        ranges_intersect(
            item.start_point(),
            item.end_point(),
            candidate_start,
            candidate_end,
        )
    })
}
