//! Message CLI commands.

use clap::{Parser, Subcommand};

/// Message commands.
#[derive(Debug, Parser)]
pub struct MessagesCommand {
    #[command(subcommand)]
    pub action: MessagesAction,
}

/// Available message actions.
#[derive(Debug, Subcommand)]
pub enum MessagesAction {
    /// List all messages, newest first.
    List,
    /// Get a message by ID.
    Get {
        /// Message ID.
        id: String,
    },
    /// Delete a message. The sender email is looked up from the list.
    Delete {
        /// Message ID.
        id: String,
    },
    /// Reply to a message by email.
    Reply {
        /// Message ID.
        id: String,
        /// Reply text.
        #[arg(long, short)]
        text: String,
    },
}
