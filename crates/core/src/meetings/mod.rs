//! Meeting resolution and invitation handling

pub mod invitations;
pub mod join_url;
pub mod resolver;

pub use invitations::InvitationAcceptor;
pub use join_url::{extract_meeting_id, MeetingId};
pub use resolver::MeetingResolver;
