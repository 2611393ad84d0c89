//! Persistence for health logs, keyed by `(userId, timestamp)`.

mod dynamo;
#[cfg(test)]
mod memory;

pub use dynamo::DynamoHealthLogStore;
#[cfg(test)]
pub use memory::MemoryHealthLogStore;

use async_trait::async_trait;

use crate::errors::Error;
use crate::model::HealthLog;

/// One method per table operation. Every call is a single remote request.
#[async_trait]
pub trait HealthLogRepository: Send + Sync {
    /// Unconditional put; an existing item with the same key is overwritten.
    async fn create(&self, log: &HealthLog) -> Result<(), Error>;

    /// Point lookup. Returns `Error::NotFound` when no item has this key.
    async fn get(&self, user_id: &str, timestamp: &str) -> Result<HealthLog, Error>;

    /// All logs of a user, newest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<HealthLog>, Error>;

    /// Logs of a user with a matching `type`, newest first. The filter runs after the
    /// partition read, so cost scales with the user's whole history.
    async fn list_by_user_and_type(
        &self,
        user_id: &str,
        log_type: &str,
    ) -> Result<Vec<HealthLog>, Error>;

    /// Overwrite by key. Not routed over HTTP.
    async fn update(&self, log: &HealthLog) -> Result<(), Error>;

    /// Idempotent: deleting a missing key succeeds.
    async fn delete(&self, user_id: &str, timestamp: &str) -> Result<(), Error>;
}
