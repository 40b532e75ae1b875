use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{AxisDomain, Track, TrackItem};
use crate::error::{TrackError, TrackResult};
use crate::render::ItemPresenter;

use super::TrackView;

pub const VIEW_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot<T> {
    pub name: String,
    pub start: T,
    pub end: T,
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub fixed_order: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSnapshot<T> {
    pub name: String,
    #[serde(default)]
    pub separate_groups: bool,
    #[serde(default = "default_true")]
    pub items_to_top: bool,
    #[serde(default = "default_true")]
    pub compact_lines: bool,
    #[serde(default = "Vec::new")]
    pub items: Vec<ItemSnapshot<T>>,
}

/// Persistable view content: the axis base value and every track.
///
/// Observers and presenter state are not part of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot<T> {
    pub base_value: T,
    pub tracks: Vec<TrackSnapshot<T>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshotJsonContractV1<T> {
    pub schema_version: u32,
    pub snapshot: ViewSnapshot<T>,
}

impl<T: Clone + Serialize> ViewSnapshot<T> {
    pub fn to_json_contract_v1_pretty(&self) -> TrackResult<String> {
        let payload = ViewSnapshotJsonContractV1 {
            schema_version: VIEW_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TrackError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }
}

impl<T: DeserializeOwned> ViewSnapshot<T> {
    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> TrackResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ViewSnapshot<T>>(input) {
            return Ok(snapshot);
        }
        let payload: ViewSnapshotJsonContractV1<T> = serde_json::from_str(input).map_err(|e| {
            TrackError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != VIEW_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(TrackError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<T: Ord> ViewSnapshot<T> {
    /// Rejects the first item whose start lies after its end.
    pub fn validate(&self) -> TrackResult<()> {
        for track in &self.tracks {
            if let Some(item) = track.items.iter().find(|item| item.start > item.end) {
                return Err(TrackError::InvalidInterval {
                    name: item.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl<D: AxisDomain, P: ItemPresenter> TrackView<D, P> {
    /// Captures the current tracks, items and axis position.
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot<D::Point> {
        let tracks = self
            .tracks
            .iter()
            .map(|track| TrackSnapshot {
                name: track.name().to_owned(),
                separate_groups: track.separate_groups(),
                items_to_top: track.items_to_top(),
                compact_lines: track.compact_lines(),
                items: track
                    .items()
                    .iter()
                    .map(|item| ItemSnapshot {
                        name: item.name().to_owned(),
                        start: item.start_point().clone(),
                        end: item.end_point().clone(),
                        order: item.order(),
                        fixed_order: item.fixed_order(),
                    })
                    .collect(),
            })
            .collect();
        ViewSnapshot {
            base_value: self.axis().base_value().clone(),
            tracks,
        }
    }

    /// Replaces every track with the snapshot content.
    ///
    /// The snapshot is validated as a whole first; on error the view is left
    /// untouched. Items get fresh ids and track observers are dropped.
    pub fn restore(&mut self, snapshot: ViewSnapshot<D::Point>) -> TrackResult<()> {
        snapshot.validate()?;

        let mut tracks = Vec::with_capacity(snapshot.tracks.len());
        for track_snapshot in snapshot.tracks {
            let mut track = Track::new(track_snapshot.name)
                .with_separate_groups(track_snapshot.separate_groups)
                .with_items_to_top(track_snapshot.items_to_top)
                .with_compact_lines(track_snapshot.compact_lines);
            let items = track_snapshot
                .items
                .into_iter()
                .map(|item| {
                    let restored = TrackItem::new(item.name, item.start, item.end)?;
                    Ok(if item.fixed_order {
                        restored.pinned_at(item.order)
                    } else {
                        restored.with_order(item.order)
                    })
                })
                .collect::<TrackResult<Vec<_>>>()?;
            track.add_items(items)?;
            tracks.push(track);
        }

        self.cancel_item_drag();
        for id in self.visible.drain() {
            self.presenter.recycle(id);
            self.stats.recycled_items += 1;
        }
        self.tracks = tracks;
        self.sync.scroller_mut().jump_to(snapshot.base_value);
        self.sync.recompute(true);
        debug!(tracks = self.tracks.len(), "view restored from snapshot");
        self.after_tracks_changed();
        Ok(())
    }
}

impl<D, P> TrackView<D, P>
where
    D: AxisDomain,
    D::Point: Serialize + DeserializeOwned,
    P: ItemPresenter,
{
    pub fn snapshot_json_contract_v1_pretty(&self) -> TrackResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }

    pub fn restore_json(&mut self, input: &str) -> TrackResult<()> {
        let snapshot = ViewSnapshot::from_json_compat_str(input)?;
        self.restore(snapshot)
    }
}

fn default_true() -> bool {
    true
}
