//! Google Chat webhook sink.
//!
//! Each submission becomes a `cardsV2` card with three sections. Every card
//! posted on the same UTC day carries the same `thread.threadKey`, so the
//! day's stand-ups collect in one thread.

use crate::clock::{thread_key, Clock};
use crate::http::diagnostic;
use crate::sink::{ChatSink, SinkError};
use crate::types::{SinkOutcome, SubmissionRecord};
use serde::Serialize;
use std::sync::Arc;

const SERVICE: &str = "Google Chat";
const CARD_ID: &str = "standup-card";
const CARD_TITLE: &str = "📊 Daily Stand-up Update";
const CARD_ICON: &str =
    "https://fonts.gstatic.com/s/i/short-term/release/googlesymbols/event_available/default/24px.svg";

// ---------------------------------------------------------------------------
// Card payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub cards_v2: Vec<CardEnvelope>,
    pub thread: Thread,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEnvelope {
    pub card_id: String,
    pub card: Card,
}

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub header: CardHeader,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardHeader {
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub image_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub decorated_text: DecoratedText,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratedText {
    pub top_label: String,
    pub text: String,
    pub wrap_text: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub thread_key: String,
}

impl ChatMessage {
    pub fn for_record(record: &SubmissionRecord, thread_key: String) -> Self {
        let section = |label: &str, text: &str| Section {
            widgets: vec![Widget {
                decorated_text: DecoratedText {
                    top_label: label.to_string(),
                    text: text.to_string(),
                    wrap_text: true,
                },
            }],
        };

        Self {
            cards_v2: vec![CardEnvelope {
                card_id: CARD_ID.to_string(),
                card: Card {
                    header: CardHeader {
                        title: CARD_TITLE.to_string(),
                        subtitle: record.display_name.clone(),
                        image_url: CARD_ICON.to_string(),
                        image_type: "CIRCLE".to_string(),
                    },
                    sections: vec![
                        section("✅ Yesterday's Progress", &record.yesterday),
                        section("🎯 Today's Plan", &record.today),
                        section("🚧 Blockers", record.blockers_display()),
                    ],
                },
            }],
            thread: Thread { thread_key },
        }
    }
}

// ---------------------------------------------------------------------------
// GoogleChatSink
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct GoogleChatSink {
    client: reqwest::Client,
    webhook_url: Option<String>,
    clock: Arc<dyn Clock>,
}

impl GoogleChatSink {
    pub fn new(client: reqwest::Client, webhook_url: Option<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            webhook_url,
            clock,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    async fn deliver(&self, record: &SubmissionRecord) -> Result<(), SinkError> {
        let url = self
            .webhook_url
            .as_deref()
            .ok_or(SinkError::NotConfigured("Webhook"))?;

        let message = ChatMessage::for_record(record, thread_key(self.clock.today()));

        let response = self
            .client
            .post(url)
            .json(&message)
            .send()
            .await
            .map_err(SinkError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = diagnostic(&body),
                "google chat rejected card"
            );
            return Err(SinkError::Status {
                service: SERVICE,
                status,
            });
        }

        tracing::debug!(thread = %message.thread.thread_key, "posted stand-up card");
        Ok(())
    }
}

impl ChatSink for GoogleChatSink {
    async fn post_to_chat(&self, record: &SubmissionRecord) -> SinkOutcome {
        match self.deliver(record).await {
            Ok(()) => SinkOutcome::ok(),
            Err(e) => {
                tracing::error!(error = %e, "error sending to google chat");
                e.into()
            }
        }
    }
}
