use super::{Phase, ResumeDownload, ResumeError, RESET_AFTER, STEP};
use std::fs;
use std::time::Instant;

#[test]
fn test_progress_steps_every_interval() {
    let dir = tempfile::tempdir().unwrap();
    let mut button = ResumeDownload::new(None, dir.path().to_path_buf());
    let start = Instant::now();
    assert_eq!(button.label(), "Download CV");

    assert!(button.start(start));
    assert!(!button.start(start), "second press while running is ignored");

    assert!(button.tick(start + STEP * 10).is_none());
    assert_eq!(button.progress(), 10);
    assert_eq!(button.label(), "10% Done");
}

#[test]
fn test_completion_copies_file_then_resets() {
    let dir = tempfile::tempdir().unwrap();
    let cv = dir.path().join("cv.pdf");
    fs::write(&cv, b"%PDF").unwrap();
    let downloads = dir.path().join("downloads");
    fs::create_dir(&downloads).unwrap();

    let mut button = ResumeDownload::new(Some(cv), downloads.clone());
    let start = Instant::now();
    button.start(start);

    let done = start + STEP * 100;
    let delivered = button.tick(done).unwrap().unwrap();
    assert_eq!(delivered, downloads.join("cv.pdf"));
    assert_eq!(fs::read(&delivered).unwrap(), b"%PDF");
    assert_eq!(button.label(), "✅ Completed");
    assert!(button.tick(done).is_none(), "outcome is reported once");

    button.tick(done + RESET_AFTER);
    assert_eq!(button.phase(), Phase::Idle);
    assert_eq!(button.progress(), 0);
}

#[test]
fn test_missing_cv_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut button = ResumeDownload::new(None, dir.path().to_path_buf());
    let start = Instant::now();
    button.start(start);

    let outcome = button.tick(start + STEP * 100).unwrap();
    assert!(matches!(outcome, Err(ResumeError::NotConfigured)));
    assert!(matches!(button.phase(), Phase::Finished { .. }));
}
