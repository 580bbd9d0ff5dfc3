use crate::domain::model::AlertRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to the alert collections.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Newest document of `collection`, or `None` when it is empty or missing.
    async fn latest(&self, collection: &str) -> Result<Option<AlertRecord>>;
}
