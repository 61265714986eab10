//! CLI command definitions.

pub mod dashboard;
pub mod health;
pub mod messages;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the feedback dashboard API.
#[derive(Debug, Parser)]
#[command(name = "feedback-client")]
#[command(about = "CLI client for the feedback dashboard API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "FEEDBACK_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Operator access token.
    #[arg(long, env = "FEEDBACK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Feedback message management.
    Messages(messages::MessagesCommand),
    /// Load the dashboard and print it.
    Dashboard(dashboard::DashboardCommand),
    /// Server health checks.
    Health(health::HealthCommand),
}
