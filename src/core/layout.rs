use std::cmp::Ordering;
use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::TrackItem;

/// Line assignment strategy applied to a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    /// First-fit from line `0`, items processed by start point.
    TopLine,
    /// `TopLine` followed by removal of empty lines.
    #[default]
    TopLineCompact,
    /// Keeps each item on its previous line when that line has room.
    AnyLine,
    /// `AnyLine` followed by removal of empty lines.
    AnyLineCompact,
    /// Items sharing a name are packed together, one block of lines per name.
    GroupByName,
}

impl LayoutMode {
    /// Resolves the mode implied by a track's grouping flags.
    #[must_use]
    pub fn select(separate_groups: bool, items_to_top: bool, compact: bool) -> Self {
        match (separate_groups, items_to_top, compact) {
            (true, _, _) => Self::GroupByName,
            (false, true, true) => Self::TopLineCompact,
            (false, true, false) => Self::TopLine,
            (false, false, true) => Self::AnyLineCompact,
            (false, false, false) => Self::AnyLine,
        }
    }

    #[must_use]
    pub fn is_compact(self) -> bool {
        matches!(
            self,
            Self::TopLineCompact | Self::AnyLineCompact | Self::GroupByName
        )
    }

    /// Runs the strategy for this mode over `items`.
    pub fn apply<P: Ord>(self, items: &mut [TrackItem<P>]) -> LayoutReport {
        match self {
            Self::TopLine => TopLine { compact: false }.assign(items),
            Self::TopLineCompact => TopLine { compact: true }.assign(items),
            Self::AnyLine => AnyLine { compact: false }.assign(items),
            Self::AnyLineCompact => AnyLine { compact: true }.assign(items),
            Self::GroupByName => GroupByName.assign(items),
        }
    }
}

/// Outcome of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutReport {
    pub mode: LayoutMode,
    /// Lines needed to show every well-formed item, pinned ones included.
    pub line_count: usize,
    pub placed: usize,
    pub pinned: usize,
    pub skipped_malformed: usize,
    /// `true` when at least one item changed line.
    pub changed: bool,
}

/// Strategy contract shared by every layout mode.
pub trait TrackLayout {
    fn mode(&self) -> LayoutMode;

    /// Writes an order for every packable item and reports the outcome.
    ///
    /// Pinned items keep their order and are not part of the packing pool.
    /// Malformed items (`start > end`) are left untouched and counted.
    fn assign<P: Ord>(&self, items: &mut [TrackItem<P>]) -> LayoutReport;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopLine {
    pub compact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnyLine {
    pub compact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupByName;

impl TrackLayout for TopLine {
    fn mode(&self) -> LayoutMode {
        if self.compact {
            LayoutMode::TopLineCompact
        } else {
            LayoutMode::TopLine
        }
    }

    fn assign<P: Ord>(&self, items: &mut [TrackItem<P>]) -> LayoutReport {
        let pool = PackingPool::collect(items);
        let mut lines = LinePacker::default();
        let mut assigned = Vec::with_capacity(pool.indices.len());
        for &index in &pool.indices {
            let line = lines.first_fit(items, index);
            lines.place(items, line, index);
            assigned.push((index, line));
        }
        finish(self.mode(), items, &pool, assigned, self.compact)
    }
}

impl TrackLayout for AnyLine {
    fn mode(&self) -> LayoutMode {
        if self.compact {
            LayoutMode::AnyLineCompact
        } else {
            LayoutMode::AnyLine
        }
    }

    fn assign<P: Ord>(&self, items: &mut [TrackItem<P>]) -> LayoutReport {
        let pool = PackingPool::collect(items);
        let mut lines = LinePacker::default();
        let mut assigned = Vec::with_capacity(pool.indices.len());
        for &index in &pool.indices {
            let previous = items[index].order();
            // A line past the item count can never be needed.
            let line = if previous <= items.len() && lines.fits(items, previous, index) {
                previous
            } else {
                lines.first_fit(items, index)
            };
            lines.place(items, line, index);
            assigned.push((index, line));
        }
        finish(self.mode(), items, &pool, assigned, self.compact)
    }
}

impl TrackLayout for GroupByName {
    fn mode(&self) -> LayoutMode {
        LayoutMode::GroupByName
    }

    fn assign<P: Ord>(&self, items: &mut [TrackItem<P>]) -> LayoutReport {
        let pool = PackingPool::collect(items);

        // Groups keep the collection order of their first member.
        let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();
        let mut by_position = pool.indices.clone();
        by_position.sort_unstable();
        for &index in &by_position {
            groups.entry(items[index].name()).or_default().push(index);
        }

        let mut assigned = Vec::with_capacity(pool.indices.len());
        let mut first_line = 0;
        for members in groups.values() {
            let mut members = members.clone();
            members.sort_by(|a, b| items[*a].start_point().cmp(items[*b].start_point()));

            let mut lines = LinePacker::default();
            for index in members {
                let line = lines.first_fit(items, index);
                lines.place(items, line, index);
                assigned.push((index, first_line + line));
            }
            first_line += lines.len();
        }
        finish(self.mode(), items, &pool, assigned, false)
    }
}

/// Packable items sorted by start point plus counts of the excluded ones.
struct PackingPool {
    indices: Vec<usize>,
    pinned: usize,
    malformed: usize,
}

impl PackingPool {
    fn collect<P: Ord>(items: &[TrackItem<P>]) -> Self {
        let mut indices = Vec::with_capacity(items.len());
        let mut pinned = 0;
        let mut malformed = 0;
        for (index, item) in items.iter().enumerate() {
            if !item.is_well_formed() {
                malformed += 1;
            } else if item.fixed_order() {
                pinned += 1;
            } else {
                indices.push(index);
            }
        }
        // Stable: equal start points keep collection order.
        indices.sort_by(|a, b| items[*a].start_point().cmp(items[*b].start_point()));
        Self {
            indices,
            pinned,
            malformed,
        }
    }
}

/// Last item of a packed line.
#[derive(Debug, Clone, Copy)]
struct LineTail {
    /// Index of the occupant with the greatest end point.
    last: usize,
    /// Some occupant is a zero-length item sitting exactly on that end point.
    zero_at_end: bool,
}

/// Per-line tails used while packing.
///
/// Items must be placed in non-decreasing start order. Every occupant then
/// starts at or before the candidate, so the line's greatest end point alone
/// decides whether the candidate overlaps it.
#[derive(Default)]
struct LinePacker {
    tails: Vec<Option<LineTail>>,
}

impl LinePacker {
    fn len(&self) -> usize {
        self.tails.len()
    }

    fn fits<P: Ord>(&self, items: &[TrackItem<P>], line: usize, index: usize) -> bool {
        let Some(Some(tail)) = self.tails.get(line) else {
            return true;
        };
        let candidate = &items[index];
        match items[tail.last].end_point().cmp(candidate.start_point()) {
            Ordering::Less => true,
            Ordering::Equal => {
                !tail.zero_at_end && candidate.start_point() < candidate.end_point()
            }
            Ordering::Greater => false,
        }
    }

    fn first_fit<P: Ord>(&self, items: &[TrackItem<P>], index: usize) -> usize {
        (0..self.tails.len())
            .find(|&line| self.fits(items, line, index))
            .unwrap_or(self.tails.len())
    }

    fn place<P: Ord>(&mut self, items: &[TrackItem<P>], line: usize, index: usize) {
        if self.tails.len() <= line {
            self.tails.resize(line + 1, None);
        }
        let item = &items[index];
        let placed = LineTail {
            last: index,
            zero_at_end: item.start_point() == item.end_point(),
        };
        let slot = &mut self.tails[line];
        *slot = Some(match *slot {
            None => placed,
            Some(tail) => match items[tail.last].end_point().cmp(item.end_point()) {
                Ordering::Less => placed,
                Ordering::Equal => LineTail {
                    last: tail.last,
                    zero_at_end: tail.zero_at_end || placed.zero_at_end,
                },
                Ordering::Greater => tail,
            },
        });
    }
}

fn finish<P: Ord>(
    mode: LayoutMode,
    items: &mut [TrackItem<P>],
    pool: &PackingPool,
    mut assigned: Vec<(usize, usize)>,
    compact: bool,
) -> LayoutReport {
    if compact {
        let pinned_lines: BTreeSet<usize> = items
            .iter()
            .filter(|item| item.fixed_order() && item.is_well_formed())
            .map(TrackItem::order)
            .collect();
        let packed: Vec<usize> = assigned.iter().map(|(_, line)| *line).collect();
        let mapping = compaction_map(&packed, &pinned_lines);
        for (_, line) in &mut assigned {
            *line = remap_line(&mapping, *line);
        }
    }

    let mut changed = false;
    for (index, line) in assigned {
        if items[index].order() != line {
            items[index].set_order(line);
            changed = true;
        }
    }

    let line_count = items
        .iter()
        .filter(|item| item.is_well_formed())
        .map(|item| item.order() + 1)
        .max()
        .unwrap_or(0);

    if pool.malformed > 0 {
        warn!(
            skipped = pool.malformed,
            ?mode,
            "skipping malformed items during layout"
        );
    }
    debug!(
        ?mode,
        placed = pool.indices.len(),
        pinned = pool.pinned,
        line_count,
        changed,
        "track layout pass"
    );

    LayoutReport {
        mode,
        line_count,
        placed: pool.indices.len(),
        pinned: pool.pinned,
        skipped_malformed: pool.malformed,
        changed,
    }
}

/// Builds a line renumbering that closes gaps left by empty lines.
///
/// Lines holding pinned items never move; packed lines drop to the lowest
/// slot that is neither used nor pinned. The result is sorted by source line.
fn compaction_map(
    packed_lines: &[usize],
    pinned_lines: &BTreeSet<usize>,
) -> Vec<(usize, usize)> {
    let used: BTreeSet<usize> = packed_lines
        .iter()
        .copied()
        .chain(pinned_lines.iter().copied())
        .collect();
    let mut mapping = Vec::with_capacity(used.len());
    let mut next = 0;
    for line in used {
        if pinned_lines.contains(&line) {
            mapping.push((line, line));
            next = line + 1;
            continue;
        }
        while pinned_lines.contains(&next) {
            next += 1;
        }
        mapping.push((line, next));
        next += 1;
    }
    mapping
}

fn remap_line(mapping: &[(usize, usize)], line: usize) -> usize {
    mapping
        .binary_search_by_key(&line, |(from, _)| *from)
        .map_or(line, |position| mapping[position].1)
}
