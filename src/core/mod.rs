pub mod engine;
pub mod intent;
pub mod latest;
pub mod router;
pub mod summary;

pub use crate::domain::model::{AlertRecord, ChatReply, FieldValue, LatestAlert};
pub use crate::domain::ports::AlertStore;
pub use crate::utils::error::Result;
