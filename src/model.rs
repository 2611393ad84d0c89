use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::ext::AttributeValuesExt;

pub const USER_ID: &str = "userId";
pub const TIMESTAMP: &str = "timestamp";
pub const TYPE: &str = "type";
pub const VALUE: &str = "value";

/// A single health measurement, keyed by `(userId, timestamp)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthLog {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub log_type: String,
    pub value: String,
}

impl HealthLog {
    /// Builds a new log stamped with the current UTC time, e.g. `2024-01-01T00:00:00Z`.
    pub fn new(
        user_id: impl Into<String>,
        log_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        HealthLog {
            user_id: user_id.into(),
            timestamp: now_rfc3339(),
            log_type: log_type.into(),
            value: value.into(),
        }
    }

    pub fn to_item(&self) -> HashMap<String, AttributeValue> {
        HashMap::from([
            (USER_ID.to_owned(), AttributeValue::S(self.user_id.clone())),
            (
                TIMESTAMP.to_owned(),
                AttributeValue::S(self.timestamp.clone()),
            ),
            (TYPE.to_owned(), AttributeValue::S(self.log_type.clone())),
            (VALUE.to_owned(), AttributeValue::S(self.value.clone())),
        ])
    }
}

impl TryFrom<&HashMap<String, AttributeValue>> for HealthLog {
    type Error = Error;

    fn try_from(item: &HashMap<String, AttributeValue>) -> Result<Self, Self::Error> {
        Ok(HealthLog {
            user_id: item.require_s(USER_ID)?,
            timestamp: item.require_s(TIMESTAMP)?,
            log_type: item.require_s(TYPE)?,
            value: item.require_s(VALUE)?,
        })
    }
}

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
