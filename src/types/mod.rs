pub mod error;
pub mod record;

pub use error::{ErrorCategory, ErrorClassifier, GeniusError, LlmError, Result};
pub use record::{Entities, FileRecord};
