use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{types::AttributeValue, Client};
use tracing::{info, instrument};

use super::HealthLogRepository;
use crate::config::Config;
use crate::errors::Error;
use crate::model::{HealthLog, TIMESTAMP, USER_ID};

/// DynamoDB-backed store. The table has `userId` as hash key and `timestamp` as range key.
#[derive(Debug, Clone)]
pub struct DynamoHealthLogStore {
    client: Client,
    table_name: String,
}

impl DynamoHealthLogStore {
    pub fn new(client: Client, config: &Config) -> Self {
        DynamoHealthLogStore {
            client,
            table_name: config.table_name.clone(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn put(&self, log: &HealthLog, context: &str) -> Result<(), Error> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(log.to_item()))
            .send()
            .await
            .map_err(|err| Error::sdk(context, err))?;

        Ok(())
    }
}

fn log_key(user_id: &str, timestamp: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (USER_ID.to_owned(), AttributeValue::S(user_id.to_owned())),
        (TIMESTAMP.to_owned(), AttributeValue::S(timestamp.to_owned())),
    ])
}

fn parse_items(items: &[HashMap<String, AttributeValue>]) -> Result<Vec<HealthLog>, Error> {
    items.iter().map(HealthLog::try_from).collect()
}

#[async_trait]
impl HealthLogRepository for DynamoHealthLogStore {
    #[instrument(skip(self, log), fields(user_id = %log.user_id, timestamp = %log.timestamp))]
    async fn create(&self, log: &HealthLog) -> Result<(), Error> {
        self.put(log, "failed to create log").await
    }

    #[instrument(skip(self))]
    async fn get(&self, user_id: &str, timestamp: &str) -> Result<HealthLog, Error> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(log_key(user_id, timestamp)))
            .send()
            .await
            .map_err(|err| Error::sdk("failed to get log", err))?;

        match result.item() {
            Some(item) => HealthLog::try_from(item),
            None => Err(Error::NotFound {
                user_id: user_id.to_owned(),
                timestamp: timestamp.to_owned(),
            }),
        }
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<HealthLog>, Error> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("userId = :userId")
            .expression_attribute_values(":userId", AttributeValue::S(user_id.to_owned()))
            .scan_index_forward(false)
            .send()
            .await
            .map_err(|err| Error::sdk("failed to get logs", err))?;

        info!("query returned {} items", result.count());
        parse_items(result.items())
    }

    #[instrument(skip(self))]
    async fn list_by_user_and_type(
        &self,
        user_id: &str,
        log_type: &str,
    ) -> Result<Vec<HealthLog>, Error> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("userId = :userId")
            .filter_expression("#type = :type")
            .expression_attribute_names("#type", "type")
            .expression_attribute_values(":userId", AttributeValue::S(user_id.to_owned()))
            .expression_attribute_values(":type", AttributeValue::S(log_type.to_owned()))
            .scan_index_forward(false)
            .send()
            .await
            .map_err(|err| Error::sdk("failed to get logs by type", err))?;

        info!(
            "query scanned {} items, {} matched",
            result.scanned_count(),
            result.count()
        );
        parse_items(result.items())
    }

    #[instrument(skip(self, log), fields(user_id = %log.user_id, timestamp = %log.timestamp))]
    async fn update(&self, log: &HealthLog) -> Result<(), Error> {
        self.put(log, "failed to update log").await
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: &str, timestamp: &str) -> Result<(), Error> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(log_key(user_id, timestamp)))
            .send()
            .await
            .map_err(|err| Error::sdk("failed to delete log", err))?;

        Ok(())
    }
}
