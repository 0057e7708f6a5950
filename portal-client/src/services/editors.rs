//! List and update helpers for the admin edit views.
//!
//! Every call goes through [`AuthenticatedTransport`]. The `try_*` methods
//! report what went wrong; the plain ones log it and hand the view an empty
//! list or `false`, which it renders as "nothing here".

use crate::error::ClientError;
use crate::models::envelope::MessageEnvelope;
use crate::models::{
    EditableAttendee, EditableCourse, EditableEvent, EditableLecture, EditableResource,
    EditableSpeaker, EventRef, ResourceKind,
};
use crate::services::auth_transport::{AuthenticatedTransport, RequestOptions};
use crate::services::backend_client::{message_of, read_json};
use portal_core::observability::header_pair;
use std::sync::Arc;

pub const EVENT_ID_HEADER: &str = "eventid";

fn edit_path(kind: ResourceKind) -> String {
    format!("/edit/{}", kind.path())
}

pub struct Editors {
    transport: Arc<AuthenticatedTransport>,
}

impl Editors {
    pub fn new(transport: Arc<AuthenticatedTransport>) -> Self {
        Self { transport }
    }

    /// Records of kind `R`. Event-scoped kinds need `event_id`; it is
    /// ignored for the others.
    pub async fn try_list<R: EditableResource>(
        &self,
        event_id: Option<&EventRef>,
    ) -> Result<Vec<R>, ClientError> {
        let mut options = RequestOptions::get();

        if R::KIND.is_event_scoped() {
            let event_id = event_id.filter(|id| !id.is_blank()).ok_or_else(|| {
                ClientError::ValidationFailed(format!(
                    "The field eventID is required to list {} records",
                    R::KIND
                ))
            })?;
            let (name, value) =
                header_pair(EVENT_ID_HEADER, &event_id.to_string()).ok_or_else(|| {
                    ClientError::ValidationFailed(format!("Invalid eventID {:?}", event_id))
                })?;
            options = options.header(name, value);
        }

        let url = self.transport.endpoint(&edit_path(R::KIND));
        let response = self.transport.call(&url, options).await?;

        let status = response.status();
        if !status.is_success() {
            let (_, body) = read_json(response).await?;
            return Err(ClientError::BackendRejected {
                status,
                message: message_of(body.as_ref()),
            });
        }

        let envelope: MessageEnvelope<Vec<R>> = response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

        envelope.message.ok_or_else(|| {
            ClientError::MalformedResponse(format!("{} list has no message field", R::KIND))
        })
    }

    pub async fn list<R: EditableResource>(&self, event_id: Option<&EventRef>) -> Vec<R> {
        match self.try_list(event_id).await {
            Ok(records) => records,
            Err(e) => {
                let kind = R::KIND;
                tracing::error!(kind = %kind, error = %e, "Failed to load editable records");
                Vec::new()
            }
        }
    }

    /// Replace the stored record with `record`, matched by its identifier.
    pub async fn try_update<R: EditableResource>(&self, record: &R) -> Result<(), ClientError> {
        let body = serde_json::to_value(record)?;
        let url = self.transport.endpoint(&edit_path(R::KIND));

        let response = self
            .transport
            .call(&url, RequestOptions::put_json(body))
            .await?;

        let status = response.status();
        if !status.is_success() {
            let (_, body) = read_json(response).await?;
            return Err(ClientError::BackendRejected {
                status,
                message: message_of(body.as_ref()),
            });
        }

        let kind = R::KIND;
        tracing::info!(kind = %kind, id = record.id(), "Record updated");
        Ok(())
    }

    pub async fn update<R: EditableResource>(&self, record: &R) -> bool {
        match self.try_update(record).await {
            Ok(()) => true,
            Err(e) => {
                let kind = R::KIND;
                tracing::error!(
                    kind = %kind,
                    id = record.id(),
                    error = %e,
                    "Failed to update record"
                );
                false
            }
        }
    }

    pub async fn editable_events(&self) -> Vec<EditableEvent> {
        self.list(None).await
    }

    pub async fn editable_courses(&self, event_id: impl Into<EventRef>) -> Vec<EditableCourse> {
        let event_id: EventRef = event_id.into();
        self.list(Some(&event_id)).await
    }

    pub async fn editable_speakers(&self) -> Vec<EditableSpeaker> {
        self.list(None).await
    }

    pub async fn editable_lectures(&self, event_id: impl Into<EventRef>) -> Vec<EditableLecture> {
        let event_id: EventRef = event_id.into();
        self.list(Some(&event_id)).await
    }

    pub async fn editable_attendees(&self, event_id: impl Into<EventRef>) -> Vec<EditableAttendee> {
        let event_id: EventRef = event_id.into();
        self.list(Some(&event_id)).await
    }

    pub async fn update_event(&self, event: &EditableEvent) -> bool {
        self.update(event).await
    }

    pub async fn update_course(&self, course: &EditableCourse) -> bool {
        self.update(course).await
    }

    pub async fn update_speaker(&self, speaker: &EditableSpeaker) -> bool {
        self.update(speaker).await
    }

    pub async fn update_lecture(&self, lecture: &EditableLecture) -> bool {
        self.update(lecture).await
    }

    pub async fn update_attendee(&self, attendee: &EditableAttendee) -> bool {
        self.update(attendee).await
    }
}
