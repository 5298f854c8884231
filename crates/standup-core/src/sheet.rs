//! Apps Script sheet sink.
//!
//! The web app answers both verbs with `{"success": bool, "error"?: string,
//! "data"?: object}`. HTTP status codes are not meaningful; Apps Script
//! error pages come back as HTML and are treated as invalid responses.

use crate::http::diagnostic;
use crate::sink::{LogSink, SinkError};
use crate::types::{PreviousEntry, SinkOutcome, SubmissionRecord};
use serde::{Deserialize, Serialize};

const SERVICE: &str = "Apps Script";

#[derive(Debug, Serialize)]
struct SheetRow<'a> {
    name: &'a str,
    email: &'a str,
    yesterday: &'a str,
    today: &'a str,
    blockers: &'a str,
}

impl<'a> From<&'a SubmissionRecord> for SheetRow<'a> {
    fn from(record: &'a SubmissionRecord) -> Self {
        Self {
            name: &record.display_name,
            email: &record.identity,
            yesterday: &record.yesterday,
            today: &record.today,
            blockers: &record.blockers,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScriptResponse<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<serde_json::Value>,
    data: Option<T>,
}

impl<T> ScriptResponse<T> {
    fn error_message(&self) -> String {
        match &self.error {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "unknown error".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppsScriptSheet {
    client: reqwest::Client,
    endpoint_url: Option<String>,
}

impl AppsScriptSheet {
    pub fn new(client: reqwest::Client, endpoint_url: Option<String>) -> Self {
        Self {
            client,
            endpoint_url,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint_url.is_some()
    }

    fn endpoint(&self) -> Result<&str, SinkError> {
        self.endpoint_url
            .as_deref()
            .ok_or(SinkError::NotConfigured(SERVICE))
    }

    async fn append(&self, record: &SubmissionRecord) -> Result<(), SinkError> {
        let response = self
            .client
            .post(self.endpoint()?)
            .json(&SheetRow::from(record))
            .send()
            .await
            .map_err(SinkError::transport)?;

        let status = response.status();
        let body = response.text().await.map_err(SinkError::transport)?;

        let parsed: ScriptResponse<serde_json::Value> = serde_json::from_str(&body).map_err(|_| {
            tracing::error!(
                status = status.as_u16(),
                body = diagnostic(&body),
                "invalid JSON from apps script"
            );
            SinkError::InvalidResponse(SERVICE)
        })?;

        if !parsed.success {
            return Err(SinkError::Rejected(parsed.error_message()));
        }
        Ok(())
    }

    async fn fetch_last(&self, identity: &str) -> Result<Option<PreviousEntry>, SinkError> {
        let response = self
            .client
            .get(self.endpoint()?)
            .query(&[("email", identity)])
            .send()
            .await
            .map_err(SinkError::transport)?;

        let body = response.text().await.map_err(SinkError::transport)?;
        let parsed: ScriptResponse<PreviousEntry> = serde_json::from_str(&body).map_err(|_| {
            tracing::debug!(body = diagnostic(&body), "unparsable last-entry response");
            SinkError::InvalidResponse(SERVICE)
        })?;

        if parsed.success {
            Ok(parsed.data)
        } else {
            Ok(None)
        }
    }
}

impl LogSink for AppsScriptSheet {
    async fn append_to_log(&self, record: &SubmissionRecord) -> SinkOutcome {
        match self.append(record).await {
            Ok(()) => SinkOutcome::ok(),
            Err(e) => {
                tracing::error!(error = %e, "error saving to google sheet");
                e.into()
            }
        }
    }

    async fn query_last_entry(&self, identity: &str) -> Option<PreviousEntry> {
        if !self.is_configured() {
            return None;
        }
        match self.fetch_last(identity).await {
            Ok(entry) => entry,
            Err(e) => {
                // Reported to callers as "no previous entry".
                tracing::warn!(error = %e, "error fetching last entry");
                None
            }
        }
    }
}
