//! Sink seams used by the orchestrator.
//!
//! Implementations never return errors: every failure mode is folded into a
//! [`SinkOutcome`] (or `None` for queries) before it leaves the sink.

use crate::types::{PreviousEntry, SinkOutcome, SubmissionRecord};
use std::future::Future;
use thiserror::Error;

/// Receives a human-readable copy of each submission.
pub trait ChatSink: Send + Sync + 'static {
    fn post_to_chat(
        &self,
        record: &SubmissionRecord,
    ) -> impl Future<Output = SinkOutcome> + Send;
}

/// Durable append-only record of submissions.
pub trait LogSink: Send + Sync + 'static {
    fn append_to_log(
        &self,
        record: &SubmissionRecord,
    ) -> impl Future<Output = SinkOutcome> + Send;

    /// Latest entry logged for `identity`, or `None` when there is none or
    /// it could not be fetched.
    fn query_last_entry(
        &self,
        identity: &str,
    ) -> impl Future<Output = Option<PreviousEntry>> + Send;
}

/// Failure modes shared by the HTTP sinks. Only the `Display` text crosses
/// the sink boundary.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("{service} API error: {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Invalid JSON response from {0}")]
    InvalidResponse(&'static str),

    /// The sink answered, but reported that it did not accept the data.
    #[error("{0}")]
    Rejected(String),
}

impl SinkError {
    /// Transport errors with the request URL removed; sink URLs embed
    /// credentials.
    pub fn transport(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

impl From<SinkError> for SinkOutcome {
    fn from(err: SinkError) -> Self {
        SinkOutcome::failed(err.to_string())
    }
}
