use super::{ease_in_out, ScrollNavigator, SmoothScroll};
use crate::section::{Region, Section, SectionRegistry};
use crate::tracker::VisibilityTracker;
use crate::viewport::{ObservationSource, ObserverOptions, Viewport};
use std::time::{Duration, Instant};

fn page() -> SectionRegistry {
    SectionRegistry::new(
        [
            ("hero", 0, 24),
            ("about", 24, 30),
            ("projects", 54, 40),
            ("contact", 94, 26),
        ]
        .into_iter()
        .map(|(id, top, height)| Section {
            id: id.to_string(),
            title: id.to_string(),
            level: 2,
            region: Region { top, height },
        })
        .collect(),
    )
}

fn viewport(scroll: &SmoothScroll) -> Viewport {
    Viewport {
        scroll_top: scroll.position(),
        height: 20,
    }
}

#[test]
fn test_ease_in_out_endpoints() {
    assert!(ease_in_out(0.0).abs() < f64::EPSILON);
    assert!((ease_in_out(0.5) - 0.5).abs() < f64::EPSILON);
    assert!((ease_in_out(1.0) - 1.0).abs() < f64::EPSILON);
    assert!(ease_in_out(0.25) < 0.25);
}

#[test]
fn test_target_subtracts_header_offset() {
    let registry = page();
    let view = Viewport {
        scroll_top: 30.0,
        height: 20,
    };
    let flush = ScrollNavigator::new(0, Duration::from_millis(300));
    let padded = ScrollNavigator::new(3, Duration::from_millis(300));

    assert_eq!(flush.target_offset(&registry, "projects", &view, 100), Some(54.0));
    assert_eq!(padded.target_offset(&registry, "projects", &view, 100), Some(51.0));
    assert_eq!(padded.target_offset(&registry, "hero", &view, 100), Some(0.0));
    assert_eq!(flush.target_offset(&registry, "contact", &view, 100), Some(94.0));
    assert_eq!(flush.target_offset(&registry, "contact", &view, 90), Some(90.0));
}

#[test]
fn test_unknown_target_is_a_no_op() {
    let registry = page();
    let navigator = ScrollNavigator::new(0, Duration::from_millis(300));
    let mut scroll = SmoothScroll::new();
    scroll.scroll_by(12.0, 100.0);
    let before = scroll.clone();

    let moved = navigator.navigate(
        &registry,
        &mut scroll,
        &viewport(&before),
        100,
        "blog",
        Instant::now(),
    );

    assert!(!moved);
    assert_eq!(scroll, before);
}

#[test]
fn test_animation_reaches_target_and_stops() {
    let start = Instant::now();
    let mut scroll = SmoothScroll::new();
    scroll.scroll_to(40.0, start, Duration::from_millis(400));

    assert!(scroll.tick(start + Duration::from_millis(200)));
    assert!((scroll.position() - 20.0).abs() < 1e-9);
    assert!(scroll.is_animating());

    assert!(scroll.tick(start + Duration::from_millis(500)));
    assert!((scroll.position() - 40.0).abs() < f64::EPSILON);
    assert!(!scroll.is_animating());
    assert!(!scroll.tick(start + Duration::from_millis(600)));
}

#[test]
fn test_second_request_supersedes_first() {
    let start = Instant::now();
    let mut scroll = SmoothScroll::new();
    scroll.scroll_to(80.0, start, Duration::from_millis(400));
    scroll.tick(start + Duration::from_millis(200));
    let midway = scroll.position();

    scroll.scroll_to(10.0, start + Duration::from_millis(200), Duration::from_millis(400));
    assert_eq!(scroll.target(), Some(10.0));

    scroll.tick(start + Duration::from_millis(700));
    assert!((scroll.position() - 10.0).abs() < f64::EPSILON);
    assert!(midway > 10.0);
}

#[test]
fn test_manual_scroll_cancels_animation() {
    let start = Instant::now();
    let mut scroll = SmoothScroll::new();
    scroll.scroll_to(50.0, start, Duration::from_millis(400));
    scroll.tick(start + Duration::from_millis(100));

    scroll.scroll_by(1.0, 100.0);

    assert!(!scroll.is_animating());
    assert!(scroll.position() < 50.0);
}

#[test]
fn test_navigation_converges_without_acknowledgement() {
    let registry = page();
    let source = ObservationSource::new();
    let (tracker, active) = VisibilityTracker::new();
    let _handle = tracker.mount(&source, &registry, ObserverOptions::default());
    let navigator = ScrollNavigator::new(0, Duration::from_millis(480));
    let mut scroll = SmoothScroll::new();

    source.notify(&registry, &viewport(&scroll));
    assert_eq!(active.get().as_deref(), Some("hero"));

    let start = Instant::now();
    let view = viewport(&scroll);
    assert!(navigator.navigate(&registry, &mut scroll, &view, 100, "contact", start));

    let mut seen = Vec::new();
    for frame in 1..=40 {
        scroll.tick(start + Duration::from_millis(frame * 16));
        source.notify(&registry, &viewport(&scroll));
        let current = active.get();
        if seen.last() != Some(&current) {
            seen.push(current);
        }
    }

    assert_eq!(
        seen.last().cloned().flatten().as_deref(),
        Some("contact"),
        "visited: {seen:?}"
    );
    assert!(!scroll.is_animating());
}
