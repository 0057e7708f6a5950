use serde::{Deserialize, Serialize};

/// Entry of the public event list (`GET /content`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableEvent {
    #[serde(rename = "eventID")]
    pub event_id: i64,
    pub name: String,
}

/// Entry of the public speaker list (`GET /content/speakers`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableSpeaker {
    #[serde(rename = "speakerID")]
    pub speaker_id: i64,
    pub name: String,
}
