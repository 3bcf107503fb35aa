//! Application constants
//!
//! Centralized location for domain-level constants shared by the gateway,
//! the resolver and the subscription manager.

// Subscription lifecycle
pub const SUBSCRIPTION_TTL_SECS: i64 = 3600;
pub const SUBSCRIPTION_CHANGE_TYPE: &str = "created,updated";

// Invitation acceptance
pub const ACCEPT_COMMENT: &str = "Automatically accepted by Review Bot";

// Resolver result messages
pub const MSG_TRANSCRIPT_RETRIEVED: &str = "Transcript retrieved successfully";
pub const MSG_TRANSCRIPT_UNAVAILABLE: &str = "Meeting processed (transcript not available)";
pub const MSG_NOT_TEAMS_MEETING: &str = "Not a valid Teams meeting";
pub const MSG_LIVE_JOIN_UNSUPPORTED: &str =
    "Live meeting join not yet implemented. Use post-meeting transcript processing.";
pub const MSG_MISSING_IDENTIFIER: &str = "Missing meetingUrl or eventId parameter";

// Gateway response bodies
pub const MSG_NOTIFICATION_PROCESSED: &str = "Notification processed";
pub const MSG_NOTIFICATION_ERROR: &str = "Error processing notification";

// Microsoft Graph
pub const GRAPH_API_BASE: &str = "https://graph.microsoft.com/v1.0";
pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";
