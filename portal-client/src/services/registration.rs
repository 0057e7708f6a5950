//! Attendee and teacher-group sign-up.
//!
//! Each call walks `idle -> validating -> submitting -> succeeded | failed`
//! and publishes progress through a watch channel. Whatever happens, the
//! caller gets a [`RegistrationOutcome`]; no error escapes.

use crate::error::ClientError;
use crate::models::registration::ParticipantPayload;
use crate::models::{Participant, RegistrationOutcome, RegistrationRequest, RegistrationState};
use crate::services::backend_client::{message_of, read_json, BackendClient};
use metrics::counter;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

pub const ATTENDEE_PATH: &str = "/register/attendee";
pub const TEACHER_PATH: &str = "/register/teacher";

const ATTENDEE_FAILURE: &str = "Registration failed";
const ATTENDEE_SUCCESS: &str = "Registration successful! Your request has been received.";
const GROUP_FAILURE: &str = "Group registration failed";
const GROUP_SUCCESS: &str = "Group registration successful! Your request has been received.";

/// `{ "data": [...] }`, the shape embedded as a string in group sign-ups.
#[derive(Serialize)]
struct DataDocument<'a> {
    data: &'a [ParticipantPayload<'a>],
}

/// Body of `POST /register/teacher`. Both fields are JSON text, not nested
/// objects; the backend decodes them separately.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TeacherGroupBody {
    pub teacher: String,
    pub students: String,
}

impl TeacherGroupBody {
    pub fn encode(teacher: &Participant, students: &[Participant]) -> Result<Self, ClientError> {
        let teacher_payload = [teacher.to_payload()];
        let student_payloads: Vec<_> = students.iter().map(Participant::to_payload).collect();

        Ok(Self {
            teacher: serde_json::to_string(&DataDocument {
                data: &teacher_payload,
            })?,
            students: serde_json::to_string(&DataDocument {
                data: &student_payloads,
            })?,
        })
    }
}

/// One registration form's workflow. Not meant for overlapping calls: a
/// second call while one is in flight overwrites the published state.
pub struct Registration {
    backend: Arc<BackendClient>,
    state: watch::Sender<RegistrationState>,
}

impl Registration {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        let (state, _) = watch::channel(RegistrationState::default());
        Self { backend, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<RegistrationState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> RegistrationState {
        self.state.borrow().clone()
    }

    pub async fn submit(&self, request: &RegistrationRequest) -> RegistrationOutcome {
        match request {
            RegistrationRequest::Attendee(attendee) => self.register_attendee(attendee).await,
            RegistrationRequest::TeacherGroup { teacher, students } => {
                self.register_teacher_group(teacher, students).await
            }
        }
    }

    pub async fn register_attendee(&self, attendee: &Participant) -> RegistrationOutcome {
        self.begin();
        let result = self.try_register_attendee(attendee).await;
        self.finish("attendee", result, ATTENDEE_FAILURE)
    }

    pub async fn register_teacher_group(
        &self,
        teacher: &Participant,
        students: &[Participant],
    ) -> RegistrationOutcome {
        self.begin();
        let result = self.try_register_teacher_group(teacher, students).await;
        self.finish("teacher_group", result, GROUP_FAILURE)
    }

    async fn try_register_attendee(&self, attendee: &Participant) -> Result<String, ClientError> {
        if let Some(field) = attendee.first_missing_field() {
            return Err(ClientError::ValidationFailed(format!(
                "The field {} is required for registration",
                field
            )));
        }

        self.post(ATTENDEE_PATH, &attendee.to_payload(), ATTENDEE_SUCCESS)
            .await
    }

    async fn try_register_teacher_group(
        &self,
        teacher: &Participant,
        students: &[Participant],
    ) -> Result<String, ClientError> {
        if let Some(field) = teacher.first_missing_field() {
            return Err(ClientError::ValidationFailed(format!(
                "The field {} is required for the teacher registration",
                field
            )));
        }

        for (index, student) in students.iter().enumerate() {
            if let Some(field) = student.first_missing_field() {
                return Err(ClientError::ValidationFailed(format!(
                    "The field {} is required for student {}",
                    field,
                    index + 1
                )));
            }
        }

        let body = TeacherGroupBody::encode(teacher, students)?;
        self.post(TEACHER_PATH, &body, GROUP_SUCCESS).await
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        success_fallback: &str,
    ) -> Result<String, ClientError> {
        let response = self.backend.post_json(path, body).await?;
        let (status, body) = read_json(response).await?;

        if !status.is_success() {
            return Err(ClientError::BackendRejected {
                status,
                message: message_of(body.as_ref()),
            });
        }

        let body = body.ok_or_else(|| {
            ClientError::MalformedResponse(format!("{} returned a non-JSON body", path))
        })?;

        Ok(message_of(Some(&body)).unwrap_or_else(|| success_fallback.to_string()))
    }

    fn begin(&self) {
        self.state.send_replace(RegistrationState {
            loading: true,
            error: None,
            success: None,
        });
    }

    fn finish(
        &self,
        kind: &'static str,
        result: Result<String, ClientError>,
        failure_fallback: &str,
    ) -> RegistrationOutcome {
        let outcome = match result {
            Ok(message) => {
                tracing::info!(kind, "Registration accepted");
                RegistrationOutcome::succeeded(message)
            }
            Err(e) => {
                tracing::warn!(kind, error = %e, "Registration failed");
                RegistrationOutcome::failed(failure_message(&e, failure_fallback))
            }
        };

        let status = if outcome.success { "success" } else { "failure" };
        counter!("portal_registration_total", "kind" => kind, "status" => status).increment(1);

        self.state.send_replace(RegistrationState {
            loading: false,
            error: (!outcome.success).then(|| outcome.message.clone()),
            success: outcome.success.then(|| outcome.message.clone()),
        });

        outcome
    }
}

/// One-line text for the form.
fn failure_message(error: &ClientError, fallback: &str) -> String {
    match error {
        ClientError::ValidationFailed(message) => message.clone(),
        ClientError::BackendRejected { message, .. } => {
            message.clone().unwrap_or_else(|| fallback.to_string())
        }
        ClientError::MalformedResponse(_) => fallback.to_string(),
        other => other.to_string(),
    }
}
