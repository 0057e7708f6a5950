use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError, ValidationErrors};

/// Required fields in reporting order: (struct field, wire name). Errors
/// may be keyed by either, depending on how serde renames are picked up.
pub const REQUIRED_FIELDS: [(&str, &str); 6] = [
    ("event_id", "eventID"),
    ("name", "name"),
    ("lastname", "lastname"),
    ("email", "email"),
    ("institution", "institution"),
    ("faculty", "faculty"),
];

/// Event identifier as submitted by registration forms: either the numeric
/// id or its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventRef {
    Number(i64),
    Text(String),
}

impl EventRef {
    /// Zero and the empty string do not identify an event.
    pub fn is_blank(&self) -> bool {
        match self {
            EventRef::Number(id) => *id == 0,
            EventRef::Text(text) => text.is_empty(),
        }
    }
}

impl fmt::Display for EventRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventRef::Number(id) => write!(f, "{}", id),
            EventRef::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for EventRef {
    fn from(id: i64) -> Self {
        EventRef::Number(id)
    }
}

impl From<i32> for EventRef {
    fn from(id: i32) -> Self {
        EventRef::Number(i64::from(id))
    }
}

impl From<String> for EventRef {
    fn from(id: String) -> Self {
        EventRef::Text(id)
    }
}

impl From<&str> for EventRef {
    fn from(id: &str) -> Self {
        EventRef::Text(id.to_string())
    }
}

/// Course selection from a form: a multi-select list or an already joined
/// string. The wire format is always the joined string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Courses {
    List(Vec<String>),
    Joined(String),
}

impl Courses {
    /// Space-delimited form, or `None` when there is nothing to send.
    pub fn normalized(&self) -> Option<String> {
        let joined = match self {
            Courses::List(items) => items.join(" "),
            Courses::Joined(text) => text.clone(),
        };
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

fn validate_event_ref(event_id: &EventRef) -> Result<(), ValidationError> {
    if event_id.is_blank() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// One registrant: an individual attendee, a teacher, or one of a teacher's
/// students.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Participant {
    #[serde(rename = "eventID")]
    #[validate(custom(function = "validate_event_ref"))]
    pub event_id: EventRef,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub lastname: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub institution: String,
    #[validate(length(min = 1))]
    pub faculty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Courses>,
}

impl Participant {
    /// Wire name of the first required field that is empty, in
    /// [`REQUIRED_FIELDS`] order.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        match self.validate() {
            Ok(()) => None,
            Err(errors) => first_missing(&errors),
        }
    }

    /// Body sent to the backend, with `courses` normalized.
    pub fn to_payload(&self) -> ParticipantPayload<'_> {
        ParticipantPayload {
            event_id: &self.event_id,
            name: &self.name,
            lastname: &self.lastname,
            email: &self.email,
            institution: &self.institution,
            faculty: &self.faculty,
            charge: self.charge.as_deref(),
            courses: self.courses.as_ref().and_then(Courses::normalized),
        }
    }
}

fn first_missing(errors: &ValidationErrors) -> Option<&'static str> {
    let failed = errors.errors();
    REQUIRED_FIELDS
        .iter()
        .find(|(field, wire)| failed.contains_key(*field) || failed.contains_key(*wire))
        .map(|(_, wire)| *wire)
}

#[derive(Debug, Serialize)]
pub struct ParticipantPayload<'a> {
    #[serde(rename = "eventID")]
    pub event_id: &'a EventRef,
    pub name: &'a str,
    pub lastname: &'a str,
    pub email: &'a str,
    pub institution: &'a str,
    pub faculty: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationRequest {
    Attendee(Participant),
    TeacherGroup {
        teacher: Participant,
        students: Vec<Participant>,
    },
}

/// Result handed back to the form. Always produced, success or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationOutcome {
    pub success: bool,
    pub message: String,
}

impl RegistrationOutcome {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Observable progress of a registration workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationState {
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}
