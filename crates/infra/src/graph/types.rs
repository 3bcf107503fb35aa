//! Wire types for Graph requests and responses that have no domain
//! counterpart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard `{ "value": [...] }` collection envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ODataCollection<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// Body of `POST /users/{id}/events/{id}/accept`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AcceptRequest<'a> {
    pub comment: &'a str,
    pub send_response: bool,
}

/// Body of `PATCH /subscriptions/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubscriptionRenewal {
    pub expiration_date_time: DateTime<Utc>,
}
