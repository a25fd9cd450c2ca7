//! Per-widget data payloads and bound operations.
//!
//! `WidgetData` is what a widget actually renders: the exact subset of the
//! canonical record its kind needs. Question-box and note-generator widgets
//! additionally carry a handle binding them to their backend operation.

use std::sync::Arc;

use uuid::Uuid;

use crate::client::{ApiClient, RequestFailure};
use crate::models::{
    DocumentRef, LabCategory, Patient, QaPair, SoapNote, SoapSections, Urgency, VitalGroup,
};

use super::timeline::TimelineEvent;

/// Vitals + labs bundle handed to the note generator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClinicalData {
    pub vitals: Vec<VitalGroup>,
    pub labs: Vec<LabCategory>,
}

/// Concrete data payload for one widget instance.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetData {
    /// No record loaded yet, or a kind this crate doesn't hydrate: the
    /// node's stored data passes through unchanged.
    Stored(serde_json::Value),
    Summary {
        summary: Option<String>,
        urgency: Urgency,
        confidence: f64,
        patient: Patient,
    },
    VitalsChart {
        title: String,
        vitals: Vec<VitalGroup>,
    },
    LabResults {
        categories: Vec<LabCategory>,
    },
    DocumentViewer {
        document: Option<DocumentRef>,
    },
    QuestionBox {
        qa_pairs: Vec<QaPair>,
        ask: AskHandle,
    },
    NoteGenerator {
        patient: Option<Patient>,
        clinical_data: ClinicalData,
        notes: NoteHandle,
    },
    Timeline {
        events: Vec<TimelineEvent>,
    },
}

/// Ask operation bound to one patient.
#[derive(Clone)]
pub struct AskHandle {
    client: Arc<ApiClient>,
    patient_id: String,
}

impl AskHandle {
    pub(super) fn new(client: Arc<ApiClient>, patient_id: String) -> Self {
        Self { client, patient_id }
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    /// Ask a question and fold the answer into a `QaPair`.
    ///
    /// The pair id is a fresh uuid — the one non-deterministic field in
    /// hydration output. Missing confidence defaults to 0.5; a missing
    /// source stays empty for the widget to label.
    pub async fn ask(&self, question: &str) -> Result<QaPair, RequestFailure> {
        let result = self.client.ask(&self.patient_id, question).await;
        match result.data {
            Some(response) => Ok(QaPair {
                id: Uuid::new_v4().to_string(),
                question: question.to_string(),
                answer: response.answer,
                confidence: response.confidence_score.unwrap_or(0.5),
                source_document: response.source_document,
                source_page: response.source_page,
            }),
            None => Err(result
                .error
                .unwrap_or_else(|| RequestFailure::network("ask request failed".into()))),
        }
    }
}

impl std::fmt::Debug for AskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AskHandle")
            .field("patient_id", &self.patient_id)
            .finish()
    }
}

// Handles compare by binding target: two projections of the same record
// are interchangeable.
impl PartialEq for AskHandle {
    fn eq(&self, other: &Self) -> bool {
        self.patient_id == other.patient_id
    }
}

/// Note operations bound to one patient, tolerating an absent patient.
#[derive(Clone)]
pub struct NoteHandle {
    client: Arc<ApiClient>,
    patient_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("Note generation unavailable: no patient loaded")]
    Unavailable,
    #[error("Note request failed: {0}")]
    Remote(RequestFailure),
}

impl NoteHandle {
    pub(super) fn new(client: Arc<ApiClient>, patient_id: Option<String>) -> Self {
        Self { client, patient_id }
    }

    fn patient(&self) -> Result<&str, NoteError> {
        self.patient_id.as_deref().ok_or(NoteError::Unavailable)
    }

    /// Draft a note from the patient's clinical data.
    pub async fn generate(&self) -> Result<SoapSections, NoteError> {
        let patient_id = self.patient()?;
        let result = self.client.generate_note(patient_id).await;
        result.data.ok_or_else(|| remote_error(result.error))
    }

    /// Persist an edited note.
    pub async fn save(&self, sections: &SoapSections) -> Result<SoapNote, NoteError> {
        let patient_id = self.patient()?;
        let result = self.client.save_note(patient_id, sections).await;
        result.data.ok_or_else(|| remote_error(result.error))
    }

    /// Saved note history (empty when none exist yet).
    pub async fn history(&self) -> Result<Vec<SoapNote>, NoteError> {
        let patient_id = self.patient()?;
        let result = self.client.list_notes(patient_id).await;
        result.data.ok_or_else(|| remote_error(result.error))
    }
}

fn remote_error(failure: Option<RequestFailure>) -> NoteError {
    NoteError::Remote(
        failure.unwrap_or_else(|| RequestFailure::network("note request failed".into())),
    )
}

impl std::fmt::Debug for NoteHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteHandle")
            .field("patient_id", &self.patient_id)
            .finish()
    }
}

impl PartialEq for NoteHandle {
    fn eq(&self, other: &Self) -> bool {
        self.patient_id == other.patient_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockTransport, Transport};
    use crate::config::ClientConfig;
    use std::time::Duration;

    fn client(transport: MockTransport) -> Arc<ApiClient> {
        let config = ClientConfig {
            retry_delay: Duration::from_millis(1),
            ..Default::default()
        };
        Arc::new(ApiClient::with_transport(
            config,
            Arc::new(transport) as Arc<dyn Transport>,
        ))
    }

    #[tokio::test]
    async fn ask_maps_response_with_defaults() {
        let handle = AskHandle::new(
            client(MockTransport::new().respond(200, r#"{"answer": "Stage 4 CKD."}"#)),
            "uncle-tan-001".into(),
        );
        let pair = handle.ask("Kidney status?").await.unwrap();
        assert_eq!(pair.question, "Kidney status?");
        assert_eq!(pair.answer, "Stage 4 CKD.");
        assert_eq!(pair.confidence, 0.5, "missing confidence defaults");
        assert!(pair.source_document.is_none());
        assert!(!pair.id.is_empty());
    }

    #[tokio::test]
    async fn ask_ids_are_unique_per_call() {
        let handle = AskHandle::new(
            client(
                MockTransport::new()
                    .respond(200, r#"{"answer": "A."}"#)
                    .respond(200, r#"{"answer": "A."}"#),
            ),
            "uncle-tan-001".into(),
        );
        let first = handle.ask("Q?").await.unwrap();
        let second = handle.ask("Q?").await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn ask_failure_surfaces_request_failure() {
        let handle = AskHandle::new(
            client(MockTransport::new().respond(404, r#"{"detail": "Patient not found"}"#)),
            "nobody".into(),
        );
        let failure = handle.ask("Q?").await.unwrap_err();
        assert_eq!(failure.status, Some(404));
    }

    #[tokio::test]
    async fn note_handle_without_patient_is_unavailable() {
        let handle = NoteHandle::new(client(MockTransport::new()), None);
        assert!(matches!(handle.generate().await, Err(NoteError::Unavailable)));
        assert!(matches!(
            handle.save(&SoapSections::default()).await,
            Err(NoteError::Unavailable)
        ));
        assert!(matches!(handle.history().await, Err(NoteError::Unavailable)));
    }

    #[tokio::test]
    async fn note_handle_generates_sections() {
        let body = r#"{"subjective": "s", "objective": "o", "assessment": "a", "plan": "p"}"#;
        let handle = NoteHandle::new(
            client(MockTransport::new().respond(200, body)),
            Some("uncle-tan-001".into()),
        );
        let sections = handle.generate().await.unwrap();
        assert_eq!(sections.assessment, "a");
    }

    #[test]
    fn handles_compare_by_patient_binding() {
        let c = client(MockTransport::new());
        let a = AskHandle::new(c.clone(), "p1".into());
        let b = AskHandle::new(c, "p1".into());
        assert_eq!(a, b);
    }
}
