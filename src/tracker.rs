//! Visibility tracker: resolves observation batches to a single active section.
//!
//! The tracker is the only writer of the active-section cell. Within a batch it considers the
//! intersecting entries with a positive ratio and picks the one with the highest ratio, the
//! first one seen winning ties. A batch with no such entry leaves the active section as it was,
//! so fast scrolls through empty space never clear the sidebar highlight.

use crate::section::SectionRegistry;
use crate::state::{state_cell, StateReader, StateWriter};
use crate::viewport::{ObservationSource, ObserverOptions, Subscription, VisibilityObservation};

/// Id of the active section, `None` until the first qualifying batch.
pub type ActiveSection = Option<String>;

#[must_use]
/// Picks the most visible intersecting entry of a batch.
pub fn most_visible(batch: &[VisibilityObservation]) -> Option<&VisibilityObservation> {
    let mut best: Option<&VisibilityObservation> = None;
    for entry in batch {
        if !entry.is_intersecting {
            continue;
        }
        let floor = best.map_or(0.0, |b| b.intersection_ratio);
        if entry.intersection_ratio > floor {
            best = Some(entry);
        }
    }
    best
}

/// Single writer of the active-section cell.
pub struct VisibilityTracker {
    active: StateWriter<ActiveSection>,
}

impl VisibilityTracker {
    #[must_use]
    /// Creates a tracker with no active section, along with a reader of its cell.
    pub fn new() -> (Self, StateReader<ActiveSection>) {
        let (active, reader) = state_cell(None);
        (Self { active }, reader)
    }

    /// Applies one batch, returning whether the active section changed.
    pub fn resolve(&mut self, batch: &[VisibilityObservation]) -> bool {
        let Some(winner) = most_visible(batch) else {
            return false;
        };
        let changed = self.active.set(Some(winner.section_id.clone()));
        if changed {
            tracing::debug!(
                section = %winner.section_id,
                ratio = winner.intersection_ratio,
                "active section changed"
            );
        }
        changed
    }

    /// Observes every registered section, moving the tracker into the batch callback.
    ///
    /// The returned handle owns the subscription: unmounting it, or simply dropping it, stops
    /// all observation.
    pub fn mount(
        mut self,
        source: &ObservationSource,
        registry: &SectionRegistry,
        options: ObserverOptions,
    ) -> TrackerHandle {
        let section_ids: Vec<String> = registry.ids().map(str::to_string).collect();
        let observed = section_ids.len();
        let subscription = source.subscribe(
            section_ids,
            options,
            Box::new(move |batch| {
                self.resolve(batch);
            }),
        );
        tracing::info!(sections = observed, "visibility tracker mounted");
        TrackerHandle {
            subscription,
            observed,
        }
    }
}

/// Live observation owned by a mounted tracker.
pub struct TrackerHandle {
    subscription: Subscription,
    observed: usize,
}

impl TrackerHandle {
    #[must_use]
    /// Number of sections registered at mount.
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Releases the subscription.
    pub fn unmount(self) {
        tracing::info!(
            subscription = self.subscription.id(),
            "visibility tracker unmounted"
        );
    }
}

#[cfg(test)]
#[path = "tests/tracker.rs"]
mod tests;
