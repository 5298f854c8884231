use crate::error::{Result, StandupError};
use serde::{Deserialize, Serialize};

/// Display name used when the submitter did not provide one.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Rendered in place of an empty blockers field.
pub const NO_BLOCKERS: &str = "None";

const REQUIRED_FIELDS_MESSAGE: &str = "Yesterday and Today fields are required";

// ---------------------------------------------------------------------------
// SubmissionInput / SubmissionRecord
// ---------------------------------------------------------------------------

/// Raw submission as received from a client. Every field is optional on the
/// wire; [`SubmissionInput::validate`] enforces the required ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub yesterday: Option<String>,
    #[serde(default)]
    pub today: Option<String>,
    #[serde(default)]
    pub blockers: Option<String>,
}

impl SubmissionInput {
    /// Check required fields and apply defaults.
    ///
    /// `yesterday` and `today` must contain something other than whitespace:
    /// a whitespace-only value is rejected exactly like a missing one, which is
    /// stricter than a plain emptiness check. A missing or blank name becomes
    /// [`UNKNOWN_NAME`]; missing email and blockers become empty strings.
    pub fn validate(self) -> Result<SubmissionRecord> {
        let (Some(yesterday), Some(today)) = (non_blank(self.yesterday), non_blank(self.today))
        else {
            return Err(StandupError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        };

        Ok(SubmissionRecord {
            display_name: non_blank(self.name).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            identity: self.email.unwrap_or_default(),
            yesterday,
            today,
            blockers: self.blockers.unwrap_or_default(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A validated stand-up update. Request-scoped; never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    pub display_name: String,
    /// Submitter email; empty when the client did not send one.
    pub identity: String,
    pub yesterday: String,
    pub today: String,
    /// Empty string means "no blockers".
    pub blockers: String,
}

impl SubmissionRecord {
    /// Blockers as shown to humans: [`NO_BLOCKERS`] when empty.
    pub fn blockers_display(&self) -> &str {
        if self.blockers.trim().is_empty() {
            NO_BLOCKERS
        } else {
            &self.blockers
        }
    }
}

// ---------------------------------------------------------------------------
// SinkOutcome / OverallStatus / SubmissionResult
// ---------------------------------------------------------------------------

/// Result of delivering one submission to one sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkOutcome {
    #[serde(rename = "success")]
    pub succeeded: bool,
    #[serde(rename = "error", default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl SinkOutcome {
    pub fn ok() -> Self {
        Self {
            succeeded: true,
            error_detail: None,
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            error_detail: Some(detail.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    FullSuccess,
    PartialChatOnly,
    PartialLogOnly,
    FullFailure,
}

impl OverallStatus {
    /// Pure classification over the two sink outcomes.
    pub fn classify(chat: &SinkOutcome, log: &SinkOutcome) -> Self {
        match (chat.succeeded, log.succeeded) {
            (true, true) => Self::FullSuccess,
            (true, false) => Self::PartialChatOnly,
            (false, true) => Self::PartialLogOnly,
            (false, false) => Self::FullFailure,
        }
    }

    /// At least one sink accepted the submission.
    pub fn is_delivered(self) -> bool {
        self != Self::FullFailure
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::FullSuccess => "Stand-up submitted successfully!",
            Self::PartialChatOnly | Self::PartialLogOnly => "Stand-up partially submitted",
            Self::FullFailure => "Failed to send to both Google Chat and Sheet",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionResult {
    pub chat: SinkOutcome,
    pub log: SinkOutcome,
    pub overall: OverallStatus,
}

impl SubmissionResult {
    pub fn from_outcomes(chat: SinkOutcome, log: SinkOutcome) -> Self {
        let overall = OverallStatus::classify(&chat, &log);
        Self { chat, log, overall }
    }
}

// ---------------------------------------------------------------------------
// PreviousEntry
// ---------------------------------------------------------------------------

/// Most recent log row for a submitter, exactly as the log endpoint returned
/// it. Cells may be strings, numbers, or anything else the sheet holds, so the
/// row is kept as raw JSON and read through [`PreviousEntry::text`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviousEntry(pub serde_json::Value);

impl PreviousEntry {
    /// Column value rendered as text. Scalars are stringified; null and
    /// absent columns are `None`.
    pub fn text(&self, column: &str) -> Option<String> {
        match self.0.get(column)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// The plan logged for that day; pre-fills the next "yesterday".
    pub fn today(&self) -> Option<String> {
        self.text("today").filter(|t| !t.trim().is_empty())
    }
}
