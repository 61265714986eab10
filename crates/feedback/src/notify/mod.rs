//! Reply notifier implementations.
//!
//! This module provides concrete implementations of
//! `feedback_core::notify::Notifier`, selected at compile time.
//!
//! # Feature Flags
//!
//! - `outbox` (default): composed emails are kept in memory and logged
//! - `ses`: emails are delivered through Amazon SES using `aws-sdk-sesv2`
//!
//! These features are mutually exclusive.

#[cfg(all(feature = "outbox", feature = "ses"))]
compile_error!(
    "Features 'outbox' and 'ses' are mutually exclusive. \
    Enable only one reply notifier at a time."
);

#[cfg(not(any(feature = "outbox", feature = "ses")))]
compile_error!(
    "No reply notifier selected. Enable 'outbox' or 'ses' feature. \
    Example: cargo build -p feedback --features ses"
);

mod template;

#[cfg(feature = "outbox")]
mod outbox;

#[cfg(feature = "ses")]
mod ses;

pub use template::compose_reply;

#[cfg(feature = "outbox")]
pub use outbox::OutboxNotifier;

#[cfg(feature = "ses")]
pub use ses::SesNotifier;
