//! # Extension traits for DynamoDB items.

use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

use crate::errors::Error;

/// Trait to extract concrete values from a DynamoDB item
///
/// The DynamoDB client returns AttributeValues, which are enums that contain
/// the concrete values. This trait provides additional methods to the HashMap
/// to extract those values.
pub trait AttributeValuesExt {
    fn get_s(&self, key: &str) -> Option<String>;
    fn require_s(&self, key: &str) -> Result<String, Error>;
}

impl AttributeValuesExt for HashMap<String, AttributeValue> {
    /// Return a string from a key
    ///
    /// E.g. if you run `get_s("userId")` on a DynamoDB item structured like this,
    /// you will retrieve the value `"u1"`.
    ///
    /// ```json
    /// {
    ///   "userId": {
    ///     "S": "u1"
    ///   }
    /// }
    /// ```
    fn get_s(&self, key: &str) -> Option<String> {
        Some(self.get(key)?.as_s().ok()?.to_owned())
    }

    /// Like `get_s`, but a missing or non-string attribute is an unmarshal failure.
    fn require_s(&self, key: &str) -> Result<String, Error> {
        self.get_s(key).ok_or_else(|| {
            Error::Store(format!(
                "failed to unmarshal: missing string attribute `{}`",
                key
            ))
        })
    }
}
