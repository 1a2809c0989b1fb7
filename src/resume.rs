//! "Download CV" button: a timed progress run ending in a file copy.
//!
//! Progress climbs one percent per step. At 100 the configured CV is copied into the download
//! directory, the button shows its completed state for a moment, then returns to idle.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Time between one-percent progress steps.
pub const STEP: Duration = Duration::from_millis(80);

/// How long the completed state is shown before resetting.
pub const RESET_AFTER: Duration = Duration::from_millis(1500);

#[derive(Debug, thiserror::Error)]
/// Reasons the CV could not be delivered.
pub enum ResumeError {
    /// No CV file is configured.
    #[error("no CV configured; set resume_path in folio.toml")]
    NotConfigured,
    /// Copying the file failed.
    #[error("cannot copy CV to {target}: {source}")]
    Copy {
        /// Destination that could not be written.
        target: PathBuf,
        /// Underlying IO failure.
        source: io::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Where the button is in its cycle.
pub enum Phase {
    /// Waiting for a press.
    Idle,
    /// Counting up.
    Running {
        /// Percent complete.
        progress: u8,
        /// When the next percent is due.
        next_step: Instant,
    },
    /// Done; returns to idle at `reset_at`.
    Finished {
        /// When the button resets.
        reset_at: Instant,
    },
}

/// Progress state of the CV download button.
pub struct ResumeDownload {
    phase: Phase,
    source: Option<PathBuf>,
    target_dir: PathBuf,
}

impl ResumeDownload {
    #[must_use]
    /// Button delivering `source` (if any) into `target_dir`.
    pub fn new(source: Option<PathBuf>, target_dir: PathBuf) -> Self {
        Self {
            phase: Phase::Idle,
            source,
            target_dir,
        }
    }

    #[must_use]
    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    /// Percent complete, 100 once finished.
    pub fn progress(&self) -> u8 {
        match self.phase {
            Phase::Idle => 0,
            Phase::Running { progress, .. } => progress,
            Phase::Finished { .. } => 100,
        }
    }

    #[must_use]
    /// Button caption.
    pub fn label(&self) -> String {
        match self.phase {
            Phase::Idle => "Download CV".to_string(),
            Phase::Running { progress, .. } => format!("{progress}% Done"),
            Phase::Finished { .. } => "✅ Completed".to_string(),
        }
    }

    /// Starts a run; ignored unless idle.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Running {
            progress: 0,
            next_step: now + STEP,
        };
        true
    }

    /// Advances to `now`. Returns the delivery outcome on the tick that reaches 100.
    pub fn tick(&mut self, now: Instant) -> Option<Result<PathBuf, ResumeError>> {
        match self.phase {
            Phase::Idle => None,
            Phase::Finished { reset_at } => {
                if now >= reset_at {
                    self.phase = Phase::Idle;
                }
                None
            }
            Phase::Running {
                mut progress,
                mut next_step,
            } => {
                while progress < 100 && now >= next_step {
                    progress += 1;
                    next_step += STEP;
                }
                if progress < 100 {
                    self.phase = Phase::Running {
                        progress,
                        next_step,
                    };
                    return None;
                }
                self.phase = Phase::Finished {
                    reset_at: now + RESET_AFTER,
                };
                let outcome = self.deliver();
                match &outcome {
                    Ok(path) => tracing::info!(path = %path.display(), "CV delivered"),
                    Err(e) => tracing::warn!(error = %e, "CV delivery failed"),
                }
                Some(outcome)
            }
        }
    }

    fn deliver(&self) -> Result<PathBuf, ResumeError> {
        let source = self.source.as_deref().ok_or(ResumeError::NotConfigured)?;
        let name = source.file_name().unwrap_or(source.as_os_str());
        let target = self.target_dir.join(name);
        copy(source, &target)?;
        Ok(target)
    }
}

fn copy(source: &Path, target: &Path) -> Result<(), ResumeError> {
    fs::copy(source, target)
        .map(|_| ())
        .map_err(|source| ResumeError::Copy {
            target: target.to_path_buf(),
            source,
        })
}

#[cfg(test)]
#[path = "tests/resume.rs"]
mod tests;
