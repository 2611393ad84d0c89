use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::HealthLogRepository;
use crate::errors::Error;
use crate::model::HealthLog;

/// Process-local store with the same key, ordering and overwrite rules as the table.
///
/// Each partition is a `BTreeMap` keyed by timestamp, so listings come out sorted and are
/// reversed to give newest first.
#[derive(Debug, Clone, Default)]
pub struct MemoryHealthLogStore {
    partitions: Arc<RwLock<HashMap<String, BTreeMap<String, HealthLog>>>>,
}

impl MemoryHealthLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn put(&self, log: &HealthLog) {
        let mut partitions = self.partitions.write().await;
        partitions
            .entry(log.user_id.clone())
            .or_default()
            .insert(log.timestamp.clone(), log.clone());
    }

    async fn scan<F>(&self, user_id: &str, keep: F) -> Vec<HealthLog>
    where
        F: Fn(&HealthLog) -> bool,
    {
        let partitions = self.partitions.read().await;
        partitions
            .get(user_id)
            .map(|logs| logs.values().rev().filter(|&l| keep(l)).cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl HealthLogRepository for MemoryHealthLogStore {
    async fn create(&self, log: &HealthLog) -> Result<(), Error> {
        self.put(log).await;
        Ok(())
    }

    async fn get(&self, user_id: &str, timestamp: &str) -> Result<HealthLog, Error> {
        let partitions = self.partitions.read().await;
        partitions
            .get(user_id)
            .and_then(|logs| logs.get(timestamp))
            .cloned()
            .ok_or_else(|| Error::NotFound {
                user_id: user_id.to_owned(),
                timestamp: timestamp.to_owned(),
            })
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<HealthLog>, Error> {
        Ok(self.scan(user_id, |_| true).await)
    }

    async fn list_by_user_and_type(
        &self,
        user_id: &str,
        log_type: &str,
    ) -> Result<Vec<HealthLog>, Error> {
        Ok(self.scan(user_id, |l| l.log_type == log_type).await)
    }

    async fn update(&self, log: &HealthLog) -> Result<(), Error> {
        self.put(log).await;
        Ok(())
    }

    async fn delete(&self, user_id: &str, timestamp: &str) -> Result<(), Error> {
        let mut partitions = self.partitions.write().await;
        if let Some(logs) = partitions.get_mut(user_id) {
            logs.remove(timestamp);
            if logs.is_empty() {
                partitions.remove(user_id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(user_id: &str, timestamp: &str, log_type: &str, value: &str) -> HealthLog {
        HealthLog {
            user_id: user_id.to_owned(),
            timestamp: timestamp.to_owned(),
            log_type: log_type.to_owned(),
            value: value.to_owned(),
        }
    }

    #[tokio::test]
    async fn created_log_reads_back_identically() {
        let store = MemoryHealthLogStore::new();
        let created = HealthLog::new("u1", "weight", "70kg");

        store.create(&created).await.unwrap();
        let fetched = store.get("u1", &created.timestamp).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store = MemoryHealthLogStore::new();

        let result = store.get("u1", "2024-01-01T00:00:00Z").await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[tokio::test]
    async fn list_by_user_is_newest_first() {
        let store = MemoryHealthLogStore::new();
        store
            .create(&log("u1", "2024-01-01T00:00:00Z", "weight", "70kg"))
            .await
            .unwrap();
        store
            .create(&log("u1", "2024-01-02T00:00:00Z", "weight", "69kg"))
            .await
            .unwrap();
        store
            .create(&log("u2", "2024-01-03T00:00:00Z", "weight", "80kg"))
            .await
            .unwrap();

        let logs = store.list_by_user("u1").await.unwrap();
        let timestamps: Vec<_> = logs.iter().map(|l| l.timestamp.as_str()).collect();

        assert_eq!(
            timestamps,
            vec!["2024-01-02T00:00:00Z", "2024-01-01T00:00:00Z"]
        );
    }

    #[tokio::test]
    async fn list_by_type_filters_and_may_be_empty() {
        let store = MemoryHealthLogStore::new();
        store
            .create(&log("u1", "2024-01-01T00:00:00Z", "weight", "70kg"))
            .await
            .unwrap();
        store
            .create(&log("u1", "2024-01-02T00:00:00Z", "steps", "9000"))
            .await
            .unwrap();

        let steps = store.list_by_user_and_type("u1", "steps").await.unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].value, "9000");

        let sleep = store.list_by_user_and_type("u1", "sleep").await.unwrap();
        assert!(sleep.is_empty());
    }

    #[tokio::test]
    async fn same_key_overwrites() {
        let store = MemoryHealthLogStore::new();
        store
            .create(&log("u1", "2024-01-01T00:00:00Z", "weight", "70kg"))
            .await
            .unwrap();
        store
            .update(&log("u1", "2024-01-01T00:00:00Z", "weight", "71kg"))
            .await
            .unwrap();

        let logs = store.list_by_user("u1").await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].value, "71kg");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryHealthLogStore::new();
        store
            .create(&log("u1", "2024-01-01T00:00:00Z", "weight", "70kg"))
            .await
            .unwrap();

        store.delete("u1", "2024-01-01T00:00:00Z").await.unwrap();
        store.delete("u1", "2024-01-01T00:00:00Z").await.unwrap();
        store.delete("nobody", "2024-01-01T00:00:00Z").await.unwrap();

        assert!(store.list_by_user("u1").await.unwrap().is_empty());
    }
}
