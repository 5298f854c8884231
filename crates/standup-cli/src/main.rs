mod cmd;
mod output;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "standup",
    about = "Daily stand-up relay — post updates to Google Chat and the stand-up sheet",
    version,
    propagate_version = true
)]
struct Cli {
    /// YAML config file (sink URLs may also come from the environment)
    #[arg(long, global = true, env = "STANDUP_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on (overrides config and STANDUP_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Submit a stand-up directly to both sinks
    Submit {
        /// What you planned for today
        #[arg(long)]
        today: String,
        /// What you did yesterday (default: your last entry's plan)
        #[arg(long)]
        yesterday: Option<String>,
        /// Anything blocking you
        #[arg(long)]
        blockers: Option<String>,
        /// Display name shown on the chat card
        #[arg(long, env = "STANDUP_NAME")]
        name: Option<String>,
        /// Email used to log and look up entries
        #[arg(long, env = "STANDUP_EMAIL")]
        email: Option<String>,
    },

    /// Show the most recent logged entry for an email
    Last {
        #[arg(long, env = "STANDUP_EMAIL")]
        email: String,
    },

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Print the chat thread key for a date (default: today, UTC)
    ThreadKey {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Serve { port } => cmd::serve::run(config_path, port),
        Commands::Submit {
            today,
            yesterday,
            blockers,
            name,
            email,
        } => cmd::submit::run(
            config_path,
            cmd::submit::SubmitArgs {
                today,
                yesterday,
                blockers,
                name,
                email,
            },
            cli.json,
        ),
        Commands::Last { email } => cmd::last::run(config_path, &email, cli.json),
        Commands::Config { subcommand } => cmd::config::run(config_path, subcommand, cli.json),
        Commands::ThreadKey { date } => cmd::thread_key::run(date, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
