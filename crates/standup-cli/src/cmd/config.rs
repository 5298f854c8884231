use crate::output::{print_fields, print_json};
use clap::Subcommand;
use standup_core::config::{redact_url, Config, WarnLevel};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration (URLs redacted)
    Show,

    /// Validate the config for common mistakes
    Validate,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(config_path: Option<&Path>, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    match subcmd {
        ConfigSubcommand::Show => show(&config, json),
        ConfigSubcommand::Validate => validate(&config, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(config: &Config, json: bool) -> anyhow::Result<()> {
    let url = |v: &Option<String>| v.as_deref().map(redact_url);

    if json {
        return print_json(&serde_json::json!({
            "chat": { "webhook_url": url(&config.chat.webhook_url) },
            "sheet": { "endpoint_url": url(&config.sheet.endpoint_url) },
            "http": config.http,
            "server": config.server,
        }));
    }

    let or_unset = |v: Option<String>| v.unwrap_or_else(|| "(not set)".to_string());
    print_fields(&[
        ("chat.webhook_url", or_unset(url(&config.chat.webhook_url))),
        ("sheet.endpoint_url", or_unset(url(&config.sheet.endpoint_url))),
        ("http.timeout_secs", config.http.timeout_secs.to_string()),
        ("http.max_redirects", config.http.max_redirects.to_string()),
        ("server.port", config.server.port.to_string()),
    ]);
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(config: &Config, json: bool) -> anyhow::Result<()> {
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    let has_errors = warnings.iter().any(|w| w.level == WarnLevel::Error);
    if has_errors {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
