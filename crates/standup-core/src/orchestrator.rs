use crate::chat::GoogleChatSink;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{Result, StandupError};
use crate::http;
use crate::sheet::AppsScriptSheet;
use crate::sink::{ChatSink, LogSink};
use crate::types::{OverallStatus, PreviousEntry, SinkOutcome, SubmissionInput, SubmissionResult};
use std::sync::Arc;
use tokio::task::JoinError;

/// Validates submissions and fans them out to the chat and log sinks.
pub struct Orchestrator<C, L> {
    chat: Arc<C>,
    log: Arc<L>,
}

/// The production wiring: Google Chat + Apps Script sheet.
pub type StandupService = Orchestrator<GoogleChatSink, AppsScriptSheet>;

impl<C, L> Orchestrator<C, L>
where
    C: ChatSink,
    L: LogSink,
{
    pub fn new(chat: C, log: L) -> Self {
        Self {
            chat: Arc::new(chat),
            log: Arc::new(log),
        }
    }

    pub fn chat(&self) -> &C {
        &self.chat
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Validate `input` and deliver it to both sinks.
    ///
    /// Returns `Err` only for validation failures, in which case no sink was
    /// called. Sink failures, including a panicking sink, are reported in the
    /// returned [`SubmissionResult`]; each sink runs to completion regardless
    /// of the other.
    pub async fn submit(&self, input: SubmissionInput) -> Result<SubmissionResult> {
        let record = input.validate()?;

        let chat = Arc::clone(&self.chat);
        let chat_record = record.clone();
        let chat_task = tokio::spawn(async move { chat.post_to_chat(&chat_record).await });

        let log = Arc::clone(&self.log);
        let log_task = tokio::spawn(async move { log.append_to_log(&record).await });

        let (chat, log) = tokio::join!(chat_task, log_task);
        let result = SubmissionResult::from_outcomes(settle("chat", chat), settle("sheet", log));

        match result.overall {
            OverallStatus::FullSuccess => tracing::info!("stand-up delivered to chat and sheet"),
            OverallStatus::PartialChatOnly => tracing::warn!(
                error = result.log.error_detail.as_deref().unwrap_or_default(),
                "sheet failed but chat succeeded"
            ),
            OverallStatus::PartialLogOnly => tracing::warn!(
                error = result.chat.error_detail.as_deref().unwrap_or_default(),
                "chat failed but sheet succeeded"
            ),
            OverallStatus::FullFailure => tracing::error!(
                chat = result.chat.error_detail.as_deref().unwrap_or_default(),
                sheet = result.log.error_detail.as_deref().unwrap_or_default(),
                "both sinks failed"
            ),
        }

        Ok(result)
    }

    /// Most recent logged entry for `identity`. `Ok(None)` means nothing was
    /// found (or the log could not be queried).
    pub async fn last_entry(&self, identity: &str) -> Result<Option<PreviousEntry>> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(StandupError::MissingParameter("Email"));
        }
        Ok(self.log.query_last_entry(identity).await)
    }

    /// Fill a blank `yesterday` with the plan from the submitter's last
    /// logged entry. Input without an email, or with `yesterday` already
    /// set, is returned unchanged.
    pub async fn prefill(&self, mut input: SubmissionInput) -> SubmissionInput {
        if has_text(input.yesterday.as_deref()) {
            return input;
        }
        let Some(email) = input.email.as_deref().filter(|e| has_text(Some(e))) else {
            return input;
        };
        let previous = self.log.query_last_entry(email.trim()).await;
        if let Some(plan) = previous.and_then(|entry| entry.today()) {
            tracing::info!("using last entry's plan as yesterday's progress");
            input.yesterday = Some(plan);
        }
        input
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn settle(sink: &str, joined: std::result::Result<SinkOutcome, JoinError>) -> SinkOutcome {
    joined.unwrap_or_else(|e| {
        tracing::error!(sink, error = %e, "sink task failed");
        SinkOutcome::failed(format!("sink task failed: {e}"))
    })
}

impl StandupService {
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let client = http::build_client(&config.http)?;
        Ok(Self::new(
            GoogleChatSink::new(client.clone(), config.chat.webhook_url.clone(), clock),
            AppsScriptSheet::new(client, config.sheet.endpoint_url.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubmissionRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Clone, Copy)]
    enum Behaviour {
        Succeed,
        Fail(&'static str),
        Panic,
    }

    #[derive(Clone)]
    struct FakeSink {
        calls: Arc<AtomicUsize>,
        behaviour: Behaviour,
        delay: Duration,
        last: Option<PreviousEntry>,
    }

    impl FakeSink {
        fn new(behaviour: Behaviour) -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                behaviour,
                delay: Duration::ZERO,
                last: None,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn run(&self) -> SinkOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            match self.behaviour {
                Behaviour::Succeed => SinkOutcome::ok(),
                Behaviour::Fail(msg) => SinkOutcome::failed(msg),
                Behaviour::Panic => panic!("sink exploded"),
            }
        }
    }

    impl ChatSink for FakeSink {
        async fn post_to_chat(&self, _record: &SubmissionRecord) -> SinkOutcome {
            self.run().await
        }
    }

    impl LogSink for FakeSink {
        async fn append_to_log(&self, _record: &SubmissionRecord) -> SinkOutcome {
            self.run().await
        }

        async fn query_last_entry(&self, _identity: &str) -> Option<PreviousEntry> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.last.clone()
        }
    }

    fn ada() -> SubmissionInput {
        SubmissionInput {
            name: Some("Ada".into()),
            email: Some("ada@x.com".into()),
            yesterday: Some("Fixed bug".into()),
            today: Some("Write tests".into()),
            blockers: Some(String::new()),
        }
    }

    async fn submit_with(chat: Behaviour, log: Behaviour) -> SubmissionResult {
        Orchestrator::new(FakeSink::new(chat), FakeSink::new(log))
            .submit(ada())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn invalid_input_touches_no_sink() {
        let chat = FakeSink::new(Behaviour::Succeed);
        let log = FakeSink::new(Behaviour::Succeed);
        let orchestrator = Orchestrator::new(chat.clone(), log.clone());

        for input in [
            SubmissionInput {
                yesterday: Some(String::new()),
                ..ada()
            },
            SubmissionInput {
                today: None,
                ..ada()
            },
        ] {
            let err = orchestrator.submit(input).await.unwrap_err();
            assert!(matches!(err, StandupError::Validation(_)));
        }

        assert_eq!(chat.calls(), 0);
        assert_eq!(log.calls(), 0);
    }

    #[tokio::test]
    async fn both_sinks_succeed() {
        let result = submit_with(Behaviour::Succeed, Behaviour::Succeed).await;
        assert_eq!(result.overall, OverallStatus::FullSuccess);
        assert_eq!(result.chat, SinkOutcome::ok());
        assert_eq!(result.log, SinkOutcome::ok());
    }

    #[tokio::test]
    async fn chat_only_success_keeps_log_error() {
        let result = submit_with(Behaviour::Succeed, Behaviour::Fail("sheet down")).await;
        assert_eq!(result.overall, OverallStatus::PartialChatOnly);
        assert_eq!(result.log.error_detail.as_deref(), Some("sheet down"));
        assert!(result.chat.error_detail.is_none());
    }

    #[tokio::test]
    async fn log_only_success_keeps_chat_error() {
        let result = submit_with(Behaviour::Fail("Webhook not configured"), Behaviour::Succeed).await;
        assert_eq!(result.overall, OverallStatus::PartialLogOnly);
        assert_eq!(
            result.chat.error_detail.as_deref(),
            Some("Webhook not configured")
        );
    }

    #[tokio::test]
    async fn full_failure_carries_both_details() {
        let result = submit_with(Behaviour::Fail("a"), Behaviour::Fail("b")).await;
        assert_eq!(result.overall, OverallStatus::FullFailure);
        assert_eq!(result.chat.error_detail.as_deref(), Some("a"));
        assert_eq!(result.log.error_detail.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn fast_failure_does_not_cancel_slow_sink() {
        let chat = FakeSink::new(Behaviour::Fail("instant failure"));
        let mut log = FakeSink::new(Behaviour::Succeed);
        log.delay = Duration::from_millis(50);
        let orchestrator = Orchestrator::new(chat.clone(), log.clone());

        let result = orchestrator.submit(ada()).await.unwrap();

        assert_eq!(result.overall, OverallStatus::PartialLogOnly);
        assert_eq!(chat.calls(), 1);
        assert_eq!(log.calls(), 1);
    }

    #[tokio::test]
    async fn panicking_sink_is_reported_as_failure() {
        let result = submit_with(Behaviour::Panic, Behaviour::Succeed).await;
        assert_eq!(result.overall, OverallStatus::PartialLogOnly);
        assert!(result
            .chat
            .error_detail
            .unwrap()
            .starts_with("sink task failed"));
    }

    #[tokio::test]
    async fn last_entry_requires_identity() {
        let log = FakeSink::new(Behaviour::Succeed);
        let orchestrator = Orchestrator::new(FakeSink::new(Behaviour::Succeed), log.clone());
        let err = orchestrator.last_entry("  ").await.unwrap_err();
        assert!(matches!(err, StandupError::MissingParameter("Email")));
        assert_eq!(log.calls(), 0);
    }

    #[tokio::test]
    async fn last_entry_is_stable_between_calls() {
        let mut log = FakeSink::new(Behaviour::Succeed);
        log.last = Some(PreviousEntry(serde_json::json!({"today": "Write tests"})));
        let orchestrator = Orchestrator::new(FakeSink::new(Behaviour::Succeed), log);

        let first = orchestrator.last_entry("ada@x.com").await.unwrap();
        let second = orchestrator.last_entry("ada@x.com").await.unwrap();
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn last_entry_absent_is_ok_none() {
        let orchestrator = Orchestrator::new(
            FakeSink::new(Behaviour::Succeed),
            FakeSink::new(Behaviour::Succeed),
        );
        assert_eq!(orchestrator.last_entry("ada@x.com").await.unwrap(), None);
    }

    fn with_last_plan(row: serde_json::Value) -> (Orchestrator<FakeSink, FakeSink>, FakeSink) {
        let mut log = FakeSink::new(Behaviour::Succeed);
        log.last = Some(PreviousEntry(row));
        (
            Orchestrator::new(FakeSink::new(Behaviour::Succeed), log.clone()),
            log,
        )
    }

    #[tokio::test]
    async fn prefill_uses_last_plan_for_blank_yesterday() {
        let (orchestrator, log) = with_last_plan(serde_json::json!({"today": "Write tests"}));
        let input = SubmissionInput {
            yesterday: None,
            today: Some("Ship it".into()),
            ..ada()
        };

        let filled = orchestrator.prefill(input).await;

        assert_eq!(filled.yesterday.as_deref(), Some("Write tests"));
        assert_eq!(filled.today.as_deref(), Some("Ship it"));
        assert_eq!(log.calls(), 1);
    }

    #[tokio::test]
    async fn prefill_keeps_explicit_yesterday() {
        let (orchestrator, log) = with_last_plan(serde_json::json!({"today": "Write tests"}));

        let filled = orchestrator.prefill(ada()).await;

        assert_eq!(filled.yesterday.as_deref(), Some("Fixed bug"));
        assert_eq!(log.calls(), 0);
    }

    #[tokio::test]
    async fn prefill_without_email_or_plan_changes_nothing() {
        let (orchestrator, log) = with_last_plan(serde_json::json!({"today": "  ", "blockers": 0}));
        let no_email = SubmissionInput {
            email: Some(" ".into()),
            yesterday: None,
            ..ada()
        };
        assert_eq!(orchestrator.prefill(no_email).await.yesterday, None);
        assert_eq!(log.calls(), 0);

        let blank_plan = SubmissionInput {
            yesterday: Some(String::new()),
            ..ada()
        };
        assert_eq!(
            orchestrator.prefill(blank_plan).await.yesterday.as_deref(),
            Some("")
        );
        assert_eq!(log.calls(), 1);
    }

    #[tokio::test]
    async fn service_without_sinks_fails_both() {
        let service = StandupService::from_config(&Config::default()).unwrap();
        assert!(!service.chat().is_configured());
        let result = service.submit(ada()).await.unwrap();
        assert_eq!(result.overall, OverallStatus::FullFailure);
        assert_eq!(
            result.chat.error_detail.as_deref(),
            Some("Webhook not configured")
        );
        assert_eq!(
            result.log.error_detail.as_deref(),
            Some("Apps Script not configured")
        );
    }
}
