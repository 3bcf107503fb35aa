//! Online-meeting id extraction from Teams join URLs.
//!
//! A join URL identifies a meeting only when it ends in a
//! `/<digits>:<token>@<domain>` segment, e.g.
//! `https://teams.microsoft.com/l/meetup-join/19:meeting_abc@thread.v2`.
//!
//! ```
//! use reviewbot_core::meetings::extract_meeting_id;
//!
//! let id = extract_meeting_id("https://teams.example/l/1234:abcXYZ@thread.v2").unwrap();
//! assert_eq!(id.thread_id(), "1234:abcXYZ");
//! assert_eq!(id.as_str(), "1234:abcXYZ@thread.v2");
//! ```

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Trailing `/<digits>:<token>@<domain>` segment, anchored at the end.
    static ref MEETING_SEGMENT: Regex =
        Regex::new(r"/((\d+):(\w+))@([\w.]+)$").expect("valid meeting segment pattern");
}

/// Online-meeting identifier taken from a join URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeetingId {
    thread_id: String,
    domain: String,
    full: String,
}

impl MeetingId {
    /// The `<digits>:<token>` part.
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The whole `<digits>:<token>@<domain>` segment, used to address the
    /// meeting at the provider.
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl fmt::Display for MeetingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

/// Extract the meeting id from a join URL, or `None` if the URL does not end
/// in a meeting segment. Percent-encoded URLs are decoded before matching.
pub fn extract_meeting_id(join_url: &str) -> Option<MeetingId> {
    let decoded = urlencoding::decode(join_url).ok()?;
    let captures = MEETING_SEGMENT.captures(decoded.trim())?;

    let thread_id = captures.get(1)?.as_str().to_string();
    let domain = captures.get(4)?.as_str().to_string();
    let full = format!("{thread_id}@{domain}");

    Some(MeetingId { thread_id, domain, full })
}
