//! Result envelope and wire payload shapes.
//!
//! Every `ApiClient` call resolves to a `RequestResult` — ordinary network
//! and HTTP failures never cross the client boundary as `Err`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CanvasLayout, Patient};

/// Uniform outcome envelope for every request-client call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestResult<T> {
    pub data: Option<T>,
    pub success: bool,
    pub error: Option<RequestFailure>,
}

impl<T> RequestResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            success: true,
            error: None,
        }
    }

    pub fn err(failure: RequestFailure) -> Self {
        Self {
            data: None,
            success: false,
            error: Some(failure),
        }
    }

    /// The failure message, if this is a failed envelope.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}

/// What went wrong with a request, with HTTP detail when a response existed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestFailure {
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl RequestFailure {
    pub fn from_status(status: u16, status_text: &str, message: String) -> Self {
        Self {
            status: Some(status),
            status_text: (!status_text.is_empty()).then(|| status_text.to_string()),
            message,
            timestamp: Utc::now(),
        }
    }

    pub fn network(message: String) -> Self {
        Self {
            status: None,
            status_text: None,
            message,
            timestamp: Utc::now(),
        }
    }
}

impl std::fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {status}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Fire-and-forget error report emitted when reporting is enabled.
/// Consumed by whatever sink the embedder wires up; dropped silently when
/// nobody is listening.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub endpoint: String,
    pub failure: RequestFailure,
}

// ═══════════════════════════════════════════════════════════
// Wire payloads (GET /patients/{id}?role=...)
// ═══════════════════════════════════════════════════════════

/// Raw clinical payload as served by the backend. Loosely structured;
/// the transformation layer turns this into a `ClinicalRecord`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientDetailPayload {
    #[serde(flatten)]
    pub patient: Patient,
    #[serde(default)]
    pub ai_summary: Option<String>,
    #[serde(default)]
    pub key_issues: Vec<String>,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub vitals_data: Vec<ClinicalEntryPayload>,
    #[serde(default)]
    pub lab_results: Vec<ClinicalEntryPayload>,
    #[serde(default)]
    pub documents: Vec<DocumentPayload>,
    #[serde(default)]
    pub qa_pairs: Vec<QaPairPayload>,
    #[serde(default)]
    pub canvas_layout: Option<CanvasLayout>,
}

/// One flat vital or lab row: `{name, value, unit, reference_range, date_recorded}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalEntryPayload {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub reference_range: String,
    pub date_recorded: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentPayload {
    #[serde(default)]
    pub id: Option<String>,
    pub filename: String,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub page_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPairPayload {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub source_document: Option<String>,
    #[serde(default)]
    pub source_page: Option<u32>,
}

// ═══════════════════════════════════════════════════════════
// Ask / note endpoints
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponsePayload {
    pub answer: String,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub source_document: Option<String>,
    #[serde(default)]
    pub source_page: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_detail_parses_minimal_payload() {
        let json = r#"{
            "id": "uncle-tan-001",
            "name": "Uncle Tan",
            "age": 68,
            "gender": "Male"
        }"#;
        let payload: PatientDetailPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.patient.id, "uncle-tan-001");
        assert!(payload.ai_summary.is_none());
        assert!(payload.vitals_data.is_empty());
        assert!(payload.canvas_layout.is_none());
        assert_eq!(payload.confidence_score, 0.0);
    }

    #[test]
    fn patient_detail_parses_full_payload() {
        let json = r#"{
            "id": "uncle-tan-001",
            "name": "Uncle Tan",
            "age": 68,
            "gender": "Male",
            "ai_summary": "Stable.",
            "confidence_score": 0.92,
            "vitals_data": [
                {"name": "heart_rate", "value": "78", "unit": "bpm",
                 "reference_range": "60-100", "date_recorded": "2024-07-28"}
            ],
            "lab_results": [
                {"name": "creatinine", "value": "4.2", "unit": "mg/dL",
                 "reference_range": "0.7-1.3", "date_recorded": "2024-07-28"}
            ],
            "documents": [{"filename": "referral.pdf"}],
            "qa_pairs": [{"question": "Q?", "answer": "A."}],
            "canvas_layout": {"nodes": [], "connections": [],
                              "viewport": {"x": 0, "y": 0, "zoom": 1}}
        }"#;
        let payload: PatientDetailPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.vitals_data.len(), 1);
        assert_eq!(payload.lab_results[0].name, "creatinine");
        assert_eq!(payload.documents[0].filename, "referral.pdf");
        assert!(payload.qa_pairs[0].confidence_score.is_none());
        assert!(payload.canvas_layout.is_some());
    }

    #[test]
    fn envelope_constructors() {
        let ok: RequestResult<u32> = RequestResult::ok(7);
        assert!(ok.success);
        assert_eq!(ok.data, Some(7));
        assert!(ok.error.is_none());

        let err: RequestResult<u32> =
            RequestResult::err(RequestFailure::from_status(500, "Internal Server Error",
                "HTTP 500".into()));
        assert!(!err.success);
        assert!(err.data.is_none());
        assert_eq!(err.error.as_ref().unwrap().status, Some(500));
        assert_eq!(err.error_message(), Some("HTTP 500"));
    }

    #[test]
    fn failure_display_includes_status_when_present() {
        let failure = RequestFailure::from_status(404, "Not Found", "Patient not found".into());
        assert_eq!(failure.to_string(), "HTTP 404: Patient not found");

        let network = RequestFailure::network("connection refused".into());
        assert_eq!(network.to_string(), "connection refused");
        assert!(network.status.is_none());
    }
}
