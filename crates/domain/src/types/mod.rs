//! Domain types and models

pub mod meeting;
pub mod notification;
pub mod outcome;
pub mod publish;
pub mod subscription;

pub use meeting::{
    CalendarEvent, EmailAddress, EventDateTime, MeetingResolution, OnlineMeetingInfo, Recipient,
    ResolveRequest, ResponseStatus, TrackedMeeting, TranscriptInfo,
};
pub use notification::{ChangeNotification, ChangeType};
pub use outcome::{MeetingOutcome, OutcomeTask, PlannerTask};
pub use publish::{DocumentKind, PublishTarget};
pub use subscription::Subscription;
