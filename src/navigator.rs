//! Scroll navigation: turns "show me section X" into an animated viewport scroll.
//!
//! The navigator never talks to the visibility tracker. It only moves the scroll position, and
//! the observation batches produced along the way eventually make the target the active section.

use crate::section::SectionRegistry;
use crate::viewport::Viewport;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Animation {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

#[must_use]
/// Ease-in-out quadratic curve over `t` in `[0, 1]`.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Scroll position of the document, optionally animating towards a target row.
pub struct SmoothScroll {
    position: f64,
    animation: Option<Animation>,
}

impl SmoothScroll {
    #[must_use]
    /// Starts at the top of the document.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Current (possibly fractional) first visible row.
    pub fn position(&self) -> f64 {
        self.position
    }

    #[must_use]
    /// Row the in-flight animation is heading to.
    pub fn target(&self) -> Option<f64> {
        self.animation.map(|a| a.to)
    }

    #[must_use]
    /// Whether a smooth scroll is in flight.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Starts a smooth scroll from the current position, superseding any in-flight one.
    pub fn scroll_to(&mut self, target: f64, now: Instant, duration: Duration) {
        if duration.is_zero() {
            self.animation = None;
            self.position = target;
            return;
        }
        self.animation = Some(Animation {
            from: self.position,
            to: target,
            started: now,
            duration,
        });
    }

    /// Manual scroll by `delta` rows, clamped to `[0, max]`. Stops any smooth scroll.
    pub fn scroll_by(&mut self, delta: f64, max: f64) {
        self.animation = None;
        self.position = (self.position.round() + delta).clamp(0.0, max.max(0.0));
    }

    /// Keeps the position, and any animation target, within `[0, max]`.
    pub fn clamp(&mut self, max: f64) {
        let max = max.max(0.0);
        self.position = self.position.clamp(0.0, max);
        if let Some(animation) = self.animation.as_mut() {
            animation.to = animation.to.clamp(0.0, max);
        }
    }

    /// Advances the animation to `now`, returning whether the position moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let elapsed = now.saturating_duration_since(animation.started);
        let progress = elapsed.as_secs_f64() / animation.duration.as_secs_f64();
        let before = self.position;
        if progress >= 1.0 {
            self.position = animation.to;
            self.animation = None;
        } else {
            self.position = animation.from + (animation.to - animation.from) * ease_in_out(progress);
        }
        (self.position - before).abs() > f64::EPSILON
    }

    #[must_use]
    /// First visible whole row.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn row(&self) -> usize {
        self.position.max(0.0).round() as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Computes navigation targets and starts smooth scrolls towards them.
pub struct ScrollNavigator {
    header_offset: usize,
    duration: Duration,
}

impl ScrollNavigator {
    #[must_use]
    /// `header_offset` rows are left above the target heading for persistent chrome.
    pub fn new(header_offset: usize, duration: Duration) -> Self {
        Self {
            header_offset,
            duration,
        }
    }

    #[must_use]
    /// Rows left above the target heading.
    pub fn header_offset(&self) -> usize {
        self.header_offset
    }

    #[must_use]
    /// Absolute scroll row that brings `id` to the top of the viewport, or `None` if the
    /// document has no such section.
    #[allow(clippy::cast_precision_loss)]
    pub fn target_offset(
        &self,
        registry: &SectionRegistry,
        id: &str,
        viewport: &Viewport,
        max_scroll: usize,
    ) -> Option<f64> {
        let section = registry.get(id)?;
        let relative_top = section.region.top as f64 - viewport.scroll_top;
        let absolute = relative_top + viewport.scroll_top - self.header_offset as f64;
        Some(absolute.clamp(0.0, max_scroll as f64))
    }

    /// Smoothly scrolls to `id`. Unknown ids are ignored and reported as `false`.
    pub fn navigate(
        &self,
        registry: &SectionRegistry,
        scroller: &mut SmoothScroll,
        viewport: &Viewport,
        max_scroll: usize,
        id: &str,
        now: Instant,
    ) -> bool {
        let Some(target) = self.target_offset(registry, id, viewport, max_scroll) else {
            tracing::debug!(section = id, "navigation target not in document");
            return false;
        };
        tracing::info!(section = id, row = target, "navigating");
        scroller.scroll_to(target, now, self.duration);
        true
    }
}

#[cfg(test)]
#[path = "tests/navigator.rs"]
mod tests;
