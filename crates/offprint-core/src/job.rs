//! Job re-entrancy guarding, progress reporting, and output naming.
//!
//! Pipelines are strictly sequential: one job at a time per session, pages
//! and images processed in list order. There is no queue and no
//! cancellation; a start request while a job runs is rejected outright.

use crate::error::{Categorized, ErrorCategory};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    /// A start request arrived while a job was running
    #[error("A job is already running")]
    Busy,
}

impl Categorized for JobError {
    fn category(&self) -> ErrorCategory {
        match self {
            JobError::Busy => ErrorCategory::InvalidInput,
        }
    }
}

/// Progress of a sequential multi-step job, reported between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

/// Guards a session against overlapping jobs.
#[derive(Debug, Default)]
pub struct JobLock {
    busy: AtomicBool,
}

impl JobLock {
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claim the session for one job. Rejected, never queued, while another
    /// job holds the guard.
    pub fn acquire(&self) -> Result<JobGuard<'_>, JobError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(JobError::Busy);
        }
        Ok(JobGuard { lock: self })
    }
}

/// Releases the lock on drop, including on the error path of an aborted run.
#[derive(Debug)]
pub struct JobGuard<'a> {
    lock: &'a JobLock,
}

impl Drop for JobGuard<'_> {
    fn drop(&mut self) {
        self.lock.busy.store(false, Ordering::Release);
    }
}

/// `<stem>_watermarked.png`
pub fn watermarked_name(stem: &str) -> String {
    format!("{stem}_watermarked.png")
}

/// `<stem>_compressed.pdf`
pub fn compressed_name(stem: &str) -> String {
    format!("{stem}_compressed.pdf")
}

/// `images_to_pdf_<timestamp>.pdf`. The timestamp is supplied by the caller
/// in milliseconds; the core stays clock-free.
pub fn assembled_name(timestamp_ms: u64) -> String {
    format!("images_to_pdf_{timestamp_ms}.pdf")
}
