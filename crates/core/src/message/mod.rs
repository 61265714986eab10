mod display;
mod error;
mod sorting;
mod types;
pub mod wire;

pub use display::{relative_age, short_user_id};
pub use error::{DecodeError, ValidationError};
pub use sorting::sort_newest_first;
pub use types::{FeedbackMessage, MessageKey};
pub use wire::{detect_shape, from_json_record, normalize, ResponseShape, TaggedScalar, WireValue};
