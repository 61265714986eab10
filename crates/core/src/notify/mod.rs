//! Reply notification types and the notifier seam.

mod compose;
mod error;
mod traits;
mod types;

pub use compose::{reply_subject, sender_address, DEFAULT_IDENTITY};
pub use error::NotificationError;
pub use traits::Notifier;
pub use types::{ReplyEmail, ReplyOutcome, REPLY_SENT_MESSAGE};
