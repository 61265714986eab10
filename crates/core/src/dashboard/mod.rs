//! Dashboard presentation state as an explicit finite state machine.
//!
//! The list moves `Loading -> Loaded | Error`, and `Error -> Loading` on
//! retry. Each loaded message carries its own reply sub-state. Both the
//! server-rendered page and the CLI dashboard drive these transitions.

mod error;
mod list;
mod reply;

use std::time::Duration;

pub use error::TransitionError;
pub use list::{validate_records, ListState, LoadedView, MessageEntry, LOAD_FAILED_MESSAGE};
pub use reply::{ReplyRequest, ReplyState};

/// How long a sent reply's confirmation stays visible before settling.
pub const REPLY_SETTLE_DELAY: Duration = Duration::from_secs(2);
