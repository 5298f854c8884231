use standup_core::clock::Clock;
use standup_core::config::Config;
use standup_core::orchestrator::StandupService;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub service: Arc<StandupService>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let service = StandupService::from_config(&config)?;
        Ok(Self::from_parts(config, service))
    }

    /// Same as [`AppState::new`] with an explicit clock for the chat thread key.
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let service = StandupService::with_clock(&config, clock)?;
        Ok(Self::from_parts(config, service))
    }

    fn from_parts(config: Config, service: StandupService) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
        }
    }
}
