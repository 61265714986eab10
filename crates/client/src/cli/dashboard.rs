//! Dashboard CLI command.

use clap::Parser;

/// Load the dashboard once and print its state.
#[derive(Debug, Parser)]
pub struct DashboardCommand {
    /// How many times to retry after a failed load.
    #[arg(long, default_value_t = 0)]
    pub retries: u32,
}
