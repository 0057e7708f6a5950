pub mod catalog;
pub mod envelope;
pub mod registration;
pub mod resources;
pub mod session;

pub use catalog::{AvailableEvent, AvailableSpeaker};
pub use registration::{
    Courses, EventRef, Participant, RegistrationOutcome, RegistrationRequest, RegistrationState,
};
pub use resources::{
    EditableAttendee, EditableCourse, EditableEvent, EditableLecture, EditableResource,
    EditableSpeaker, ResourceKind,
};
pub use session::{BearerToken, Session, SessionInfo};
