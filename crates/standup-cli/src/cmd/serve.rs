use anyhow::Result;
use standup_core::config::redact_url;
use standup_server::AppState;
use std::path::Path;

pub fn run(config_path: Option<&Path>, port: Option<u16>) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    super::check_config(&config)?;
    if let Some(url) = config.chat.webhook_url.as_deref() {
        tracing::info!(url = %redact_url(url), "chat sink enabled");
    }
    if let Some(url) = config.sheet.endpoint_url.as_deref() {
        tracing::info!(url = %redact_url(url), "sheet sink enabled");
    }

    let port = config.server.port;
    let state = AppState::new(config)?;

    super::runtime()?.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let url = format!("http://localhost:{}", listener.local_addr()?.port());
        println!("stand-up server → {url}  (PID {})", std::process::id());

        tokio::select! {
            res = standup_server::serve_on(state, listener) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                Ok(())
            }
        }
    })
}
