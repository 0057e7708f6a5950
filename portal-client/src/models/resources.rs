//! Records managed through the `/edit/*` endpoints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Event,
    Course,
    Speaker,
    Lecture,
    Attendee,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Event,
        ResourceKind::Course,
        ResourceKind::Speaker,
        ResourceKind::Lecture,
        ResourceKind::Attendee,
    ];

    /// Path segment under `/edit`.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Event => "event",
            ResourceKind::Course => "course",
            ResourceKind::Speaker => "speaker",
            ResourceKind::Lecture => "lecture",
            ResourceKind::Attendee => "attendee",
        }
    }

    /// Listing these kinds requires an `eventid` header.
    pub fn is_event_scoped(self) -> bool {
        matches!(
            self,
            ResourceKind::Course | ResourceKind::Lecture | ResourceKind::Attendee
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A record the editors can list and update.
pub trait EditableResource: Serialize + DeserializeOwned + Send + Sync {
    const KIND: ResourceKind;

    fn id(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableEvent {
    #[serde(rename = "eventID")]
    pub event_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: String,
    #[serde(rename = "startDate", default)]
    pub start_date: String,
    #[serde(rename = "endDate", default)]
    pub end_date: String,
    #[serde(default)]
    pub place: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableCourse {
    #[serde(rename = "courseID")]
    pub course_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "eventID", default)]
    pub event_id: i64,
    #[serde(rename = "speakerID", default)]
    pub speaker_id: i64,
    #[serde(rename = "courseDate", default)]
    pub course_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableSpeaker {
    #[serde(rename = "speakerID")]
    pub speaker_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableLecture {
    #[serde(rename = "lectureID")]
    pub lecture_id: i64,
    #[serde(rename = "eventID", default)]
    pub event_id: i64,
    #[serde(rename = "speakerID", default)]
    pub speaker_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "lectureDate", default)]
    pub lecture_date: String,
    #[serde(rename = "paymentLink", default)]
    pub payment_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableAttendee {
    #[serde(rename = "attendeeID")]
    pub attendee_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "paymentLink", default)]
    pub payment_link: String,
}

impl EditableResource for EditableEvent {
    const KIND: ResourceKind = ResourceKind::Event;

    fn id(&self) -> i64 {
        self.event_id
    }
}

impl EditableResource for EditableCourse {
    const KIND: ResourceKind = ResourceKind::Course;

    fn id(&self) -> i64 {
        self.course_id
    }
}

impl EditableResource for EditableSpeaker {
    const KIND: ResourceKind = ResourceKind::Speaker;

    fn id(&self) -> i64 {
        self.speaker_id
    }
}

impl EditableResource for EditableLecture {
    const KIND: ResourceKind = ResourceKind::Lecture;

    fn id(&self) -> i64 {
        self.lecture_id
    }
}

impl EditableResource for EditableAttendee {
    const KIND: ResourceKind = ResourceKind::Attendee;

    fn id(&self) -> i64 {
        self.attendee_id
    }
}
