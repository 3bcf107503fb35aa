//! Change notifications pushed by the mailbox subscription transport.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ReviewBotError};

/// Kind of change a notification reports for a calendar resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Created,
    Updated,
    Deleted,
    #[serde(other)]
    Unknown,
}

impl ChangeType {
    /// Parse a wire value, mapping anything unrecognised to `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value {
            "created" => Self::Created,
            "updated" => Self::Updated,
            "deleted" => Self::Deleted,
            _ => Self::Unknown,
        }
    }

    /// Only creations and updates can produce a meeting worth tracking.
    pub fn is_trackable(self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single, normalised change notification.
///
/// Built from one element of the webhook payload's `value` array. The
/// original element is kept in `raw` for logging only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeNotification {
    pub change_type: ChangeType,
    pub resource_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_state: Option<String>,
    #[serde(default)]
    pub raw: Value,
}

impl ChangeNotification {
    pub fn new(change_type: ChangeType, resource_id: impl Into<String>) -> Self {
        Self { change_type, resource_id: resource_id.into(), client_state: None, raw: Value::Null }
    }

    /// Normalise one element of a notification batch.
    ///
    /// Accepts the provider shape `{changeType, resourceData: {id}, clientState?}`.
    /// A missing or unrecognised `changeType` becomes [`ChangeType::Unknown`] and a
    /// missing resource id becomes an empty string; only a non-object element is
    /// rejected.
    pub fn from_raw(raw: Value) -> Result<Self> {
        let object = raw.as_object().ok_or_else(|| {
            ReviewBotError::InvalidRequest("notification is not a JSON object".to_string())
        })?;

        let change_type = object
            .get("changeType")
            .and_then(Value::as_str)
            .map_or(ChangeType::Unknown, ChangeType::parse);

        let resource_id = object
            .get("resourceData")
            .and_then(|data| data.get("id"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let client_state = object.get("clientState").and_then(Value::as_str).map(str::to_string);

        Ok(Self { change_type, resource_id, client_state, raw })
    }
}
