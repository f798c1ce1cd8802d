//! Marker bookkeeping per audio source.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Opaque host-assigned identifier for an audio source.
///
/// Hosts pick a stable value (hash, database id, asset handle); the store
/// never inspects it and never assumes reference identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(pub u64);

/// Expression attached to a marker, forwarded to listeners when crossed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    #[default]
    Neutral,
    Eyeroll,
    Happy,
    Sad,
    Angry,
}

/// A single author-placed marker at a sample offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Process-wide unique id, assigned at insertion and never reused.
    pub id: u64,
    /// Sample offset within the source.
    pub sample: u64,
    /// Expression fired when the playhead crosses this marker.
    pub expression: Expression,
}

// Ids start at 1 and stay unique across every store in the process.
static NEXT_MARKER_ID: AtomicU64 = AtomicU64::new(1);

/// Markers grouped by source, kept in insertion order.
///
/// Nothing prevents two markers at the same sample; ties keep insertion
/// order for removal and crossing, which is the documented sharp edge of
/// [`remove_markers_at`](Self::remove_markers_at).
#[derive(Default)]
pub struct MarkerStore {
    markers: HashMap<SourceId, Vec<Marker>>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a neutral marker and return its id.
    pub fn add_marker(&mut self, source: SourceId, sample: u64) -> u64 {
        self.add_marker_with_expression(source, sample, Expression::Neutral)
    }

    /// Add a marker with an explicit expression and return its id.
    pub fn add_marker_with_expression(
        &mut self,
        source: SourceId,
        sample: u64,
        expression: Expression,
    ) -> u64 {
        let id = NEXT_MARKER_ID.fetch_add(1, Ordering::Relaxed);
        self.markers.entry(source).or_default().push(Marker {
            id,
            sample,
            expression,
        });
        debug!(source = source.0, id, sample, "marker added");
        id
    }

    /// Remove the marker with the given id; no-op when absent.
    pub fn remove_marker(&mut self, source: SourceId, id: u64) {
        if let Some(markers) = self.markers.get_mut(&source) {
            let before = markers.len();
            markers.retain(|marker| marker.id != id);
            if markers.len() != before {
                debug!(source = source.0, id, "marker removed");
            }
        }
    }

    /// Remove every marker at the exact sample; no-op when none match.
    pub fn remove_markers_at(&mut self, source: SourceId, sample: u64) {
        if let Some(markers) = self.markers.get_mut(&source) {
            let before = markers.len();
            markers.retain(|marker| marker.sample != sample);
            let removed = before - markers.len();
            if removed > 0 {
                debug!(source = source.0, sample, removed, "markers removed at sample");
            }
        }
    }

    /// Sample offsets of every marker for the source, in insertion order.
    pub fn marker_samples(&self, source: SourceId) -> Vec<u64> {
        self.markers_for(source)
            .iter()
            .map(|marker| marker.sample)
            .collect()
    }

    /// All markers for the source, in insertion order; empty when untracked.
    pub fn markers_for(&self, source: SourceId) -> &[Marker] {
        self.markers
            .get(&source)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// True when any marker sits at the exact sample.
    pub fn exists_at(&self, source: SourceId, sample: u64) -> bool {
        self.markers_for(source)
            .iter()
            .any(|marker| marker.sample == sample)
    }
}
