//! Forward playhead crossing detection against the marker store.

use std::collections::HashMap;
use tracing::debug;

use crate::markers::{Marker, MarkerStore, SourceId};

/// Last observed playhead position for one tracked source.
///
/// `None` means no prior position: the next update only records a baseline.
#[derive(Clone, Copy, Debug, Default)]
struct CrossingState {
    last_sample: Option<u64>,
}

/// Tracks per-source playhead positions and reports forward marker crossings.
///
/// Pure lookup and comparison; it never fails. Sources without markers yield
/// empty crossing lists.
#[derive(Default)]
pub struct CrossingDetector {
    states: HashMap<SourceId, CrossingState>,
}

impl CrossingDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the playhead position and return the markers crossed since the
    /// previous update, ascending by sample.
    ///
    /// A marker fires when its sample lies in the half-open interval
    /// `(previous, current]`, so each forward pass fires it exactly once.
    /// The first update after tracking starts (or after [`reset`](Self::reset))
    /// fires nothing: starting mid-clip must not replay every earlier marker.
    /// Backward movement fires nothing and becomes the new baseline.
    pub fn update(&mut self, store: &MarkerStore, source: SourceId, current: u64) -> Vec<Marker> {
        let state = self.states.entry(source).or_default();
        let previous = state.last_sample.replace(current);
        let Some(previous) = previous else {
            return Vec::new();
        };
        if current < previous {
            return Vec::new();
        }
        let mut crossed: Vec<Marker> = store
            .markers_for(source)
            .iter()
            .filter(|marker| marker.sample > previous && marker.sample <= current)
            .copied()
            .collect();
        // Stable sort: markers sharing a sample keep insertion order.
        crossed.sort_by_key(|marker| marker.sample);
        for marker in &crossed {
            debug!(
                source = source.0,
                id = marker.id,
                sample = marker.sample,
                "marker crossed"
            );
        }
        crossed
    }

    /// Forget the stored position so the next update only records a baseline.
    ///
    /// Callers invoke this on explicit seeks and restarts to suppress
    /// retroactive firing.
    pub fn reset(&mut self, source: SourceId) {
        if let Some(state) = self.states.get_mut(&source) {
            state.last_sample = None;
        }
    }

    /// Stop tracking the source entirely.
    pub fn forget(&mut self, source: SourceId) {
        self.states.remove(&source);
    }
}
