//! Viewport observation source: reports how much of each observed section is visible.
//!
//! Observers subscribe a set of section ids with a threshold configuration and a batch
//! callback. Each time the viewport moves, `notify` measures every observed section against the
//! viewport (shrunk by the root margin). When any section's threshold bucket or intersecting
//! flag changed, it delivers a batch holding those sections along with every section still
//! intersecting. The first notification after subscribing reports every observed section.
//!
//! Subscriptions are scoped: the [`Subscription`] handle unsubscribes when dropped, so a
//! component that owns one cannot leave a dangling callback behind.

use crate::section::{Region, SectionRegistry};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Ratios at which observers fire by default.
pub const DEFAULT_THRESHOLDS: [f64; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];

/// Fraction of the viewport height trimmed from the top and bottom by default.
pub const DEFAULT_MARGIN: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Visible window onto the laid out document.
pub struct Viewport {
    /// First visible document row (fractional while a smooth scroll is in flight).
    pub scroll_top: f64,
    /// Number of visible rows.
    pub height: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Inset applied to the viewport before intersecting, as fractions of its height.
pub struct RootMargin {
    /// Rows trimmed from the top, as a fraction of viewport height.
    pub top: f64,
    /// Rows trimmed from the bottom, as a fraction of viewport height.
    pub bottom: f64,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            top: DEFAULT_MARGIN,
            bottom: DEFAULT_MARGIN,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Configuration recognised by the observation source.
pub struct ObserverOptions {
    thresholds: Vec<f64>,
    /// Inset shrinking the effective observation area.
    pub root_margin: RootMargin,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLDS.to_vec(), RootMargin::default())
    }
}

impl ObserverOptions {
    #[must_use]
    /// Builds options, clamping thresholds to `[0, 1]` and sorting them.
    pub fn new(mut thresholds: Vec<f64>, root_margin: RootMargin) -> Self {
        thresholds.retain(|t| t.is_finite());
        for t in &mut thresholds {
            *t = t.clamp(0.0, 1.0);
        }
        thresholds.sort_by(f64::total_cmp);
        thresholds.dedup();
        if thresholds.is_empty() {
            thresholds.push(0.0);
        }
        Self {
            thresholds,
            root_margin,
        }
    }

    #[must_use]
    /// Ordered firing ratios.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    #[must_use]
    /// Number of thresholds at or below `ratio`.
    pub fn threshold_index(&self, ratio: f64) -> usize {
        self.thresholds.iter().take_while(|t| ratio >= **t).count()
    }
}

#[derive(Clone, Debug, PartialEq)]
/// One section's visibility at the time of a notification.
pub struct VisibilityObservation {
    /// Observed section.
    pub section_id: String,
    /// Fraction of the section's rows inside the inset viewport.
    pub intersection_ratio: f64,
    /// Whether any part of the section lies inside the inset viewport.
    pub is_intersecting: bool,
}

#[must_use]
/// Measures `region` against the viewport shrunk by `margin`.
///
/// Returns the intersection ratio and whether the region intersects at all. A zero-height
/// region counts as fully visible when it lies inside the inset viewport.
#[allow(clippy::cast_precision_loss)]
pub fn intersect(region: Region, viewport: &Viewport, margin: &RootMargin) -> (f64, bool) {
    let height = viewport.height as f64;
    let root_top = viewport.scroll_top + height * margin.top;
    let root_bottom = viewport.scroll_top + height - height * margin.bottom;
    let top = region.top as f64;

    if region.height == 0 {
        let inside = top >= root_top && top <= root_bottom;
        return (if inside { 1.0 } else { 0.0 }, inside);
    }

    let bottom = region.bottom() as f64;
    let overlap = (bottom.min(root_bottom) - top.max(root_top)).max(0.0);
    let ratio = (overlap / region.height as f64).clamp(0.0, 1.0);
    (ratio, overlap > 0.0)
}

/// Callback receiving each non-empty batch.
pub type BatchCallback = Box<dyn FnMut(&[VisibilityObservation])>;

struct Observer {
    id: u64,
    section_ids: Vec<String>,
    options: ObserverOptions,
    last: HashMap<String, (usize, bool)>,
    on_batch: Option<BatchCallback>,
}

impl Observer {
    /// Measures every observed section. When any of them changed bucket or intersecting flag,
    /// the batch carries the changed entries plus every section still intersecting, so the
    /// receiver always sees the whole visible set.
    fn collect(
        &mut self,
        registry: &SectionRegistry,
        viewport: &Viewport,
    ) -> Vec<VisibilityObservation> {
        let mut changed = false;
        let mut measured = Vec::with_capacity(self.section_ids.len());
        for id in &self.section_ids {
            let Some(section) = registry.get(id) else {
                continue;
            };
            let (ratio, intersecting) =
                intersect(section.region, viewport, &self.options.root_margin);
            let state = (self.options.threshold_index(ratio), intersecting);
            let moved = self.last.get(id) != Some(&state);
            if moved {
                self.last.insert(id.clone(), state);
                changed = true;
            }
            measured.push((
                moved,
                VisibilityObservation {
                    section_id: id.clone(),
                    intersection_ratio: ratio,
                    is_intersecting: intersecting,
                },
            ));
        }
        if !changed {
            return Vec::new();
        }
        measured
            .into_iter()
            .filter(|(moved, entry)| *moved || entry.is_intersecting)
            .map(|(_, entry)| entry)
            .collect()
    }
}

#[derive(Default)]
struct Observers {
    next_id: u64,
    active: Vec<Observer>,
}

#[derive(Clone, Default)]
/// Delivers visibility batches to subscribed observers.
pub struct ObservationSource {
    observers: Rc<RefCell<Observers>>,
}

impl ObservationSource {
    #[must_use]
    /// Creates a source with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `section_ids` for observation and returns the handle that keeps them observed.
    pub fn subscribe(
        &self,
        section_ids: Vec<String>,
        options: ObserverOptions,
        on_batch: BatchCallback,
    ) -> Subscription {
        let mut observers = self.observers.borrow_mut();
        let id = observers.next_id;
        observers.next_id += 1;
        observers.active.push(Observer {
            id,
            section_ids,
            options,
            last: HashMap::new(),
            on_batch: Some(on_batch),
        });
        Subscription {
            id,
            observers: Rc::downgrade(&self.observers),
        }
    }

    /// Stops delivering batches for `subscription`.
    pub fn unsubscribe(&self, subscription: Subscription) {
        drop(subscription);
    }

    #[must_use]
    /// Number of live subscriptions.
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().active.len()
    }

    /// Measures every observed section and delivers changed entries, returning the number of
    /// batches delivered.
    ///
    /// Batches are delivered synchronously, one observer at a time in subscription order. The
    /// callback is detached while it runs, so it may subscribe or drop subscriptions itself.
    pub fn notify(&self, registry: &SectionRegistry, viewport: &Viewport) -> usize {
        let pending: Vec<(u64, Vec<VisibilityObservation>, BatchCallback)> = {
            let mut observers = self.observers.borrow_mut();
            observers
                .active
                .iter_mut()
                .filter_map(|observer| {
                    let batch = observer.collect(registry, viewport);
                    if batch.is_empty() {
                        return None;
                    }
                    observer.on_batch.take().map(|cb| (observer.id, batch, cb))
                })
                .collect()
        };

        let delivered = pending.len();
        for (id, batch, mut on_batch) in pending {
            on_batch(&batch);
            let mut observers = self.observers.borrow_mut();
            if let Some(observer) = observers.active.iter_mut().find(|o| o.id == id) {
                observer.on_batch = Some(on_batch);
            }
        }
        delivered
    }
}

#[must_use = "dropping the subscription stops observation immediately"]
/// Scoped registration with an [`ObservationSource`]; unsubscribes on drop.
pub struct Subscription {
    id: u64,
    observers: Weak<RefCell<Observers>>,
}

impl Subscription {
    #[must_use]
    /// Identifier of this subscription within its source.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(observers) = self.observers.upgrade() {
            observers.borrow_mut().active.retain(|o| o.id != self.id);
        }
    }
}

#[cfg(test)]
#[path = "tests/viewport.rs"]
mod tests;
