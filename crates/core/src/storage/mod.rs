mod error;
mod http_mapping;
mod traits;

pub use error::{classify_error_code, Result, StorageError};
pub use http_mapping::storage_error_to_status_code;
pub use traits::MessageRepository;
