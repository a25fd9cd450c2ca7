//! Transformation layer: raw remote payloads → canonical `ClinicalRecord`.
//!
//! The layer holds no mutable state between calls. `build_record` is a pure
//! function of its payload; `RecordService` adds the fetch + fixture
//! fallback around it. All classification (flags, categories, urgency)
//! happens here so every widget sees the same derived values.

pub mod categories;
pub mod fixtures;
pub mod flags;
pub mod urgency;
pub mod vitals;

use std::sync::Arc;
use std::time::Duration;

use crate::client::{ApiClient, DocumentPayload, PatientDetailPayload, QaPairPayload};
use crate::models::{
    ClinicalRecord, DocumentRef, LabCategory, LabTest, QaPair, Role,
};

pub use flags::flag_for;
pub use urgency::infer_urgency;
pub use vitals::{group_vitals, prettify_name};

/// Confidence assumed when the backend omits one for a Q&A pair.
const DEFAULT_QA_CONFIDENCE: f64 = 0.5;

/// Simulated latency before serving a fixture, so the fallback path
/// exercises the same loading affordances as a real fetch.
const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_millis(300);

/// Errors the transformation layer can propagate. This is the only
/// boundary in the crate where a fetch failure becomes an `Err`.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Patient '{0}' not found in any source")]
    PatientNotFound(String),
    #[error("Failed to load clinical record: {0}")]
    Remote(String),
}

/// Fetches raw payloads and normalizes them into `ClinicalRecord`s.
pub struct RecordService {
    client: Arc<ApiClient>,
    fallback_delay: Duration,
}

impl RecordService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            fallback_delay: DEFAULT_FALLBACK_DELAY,
        }
    }

    /// Override the simulated fallback latency (tests use zero).
    pub fn with_fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Fetch and normalize the clinical record for a patient under a role.
    ///
    /// On a failed envelope: with mock fallback enabled the fixture set
    /// stands in (unknown ids fail as not-found); with fallback disabled
    /// the failure message propagates as `RecordError::Remote`.
    pub async fn fetch_clinical_record(
        &self,
        patient_id: &str,
        role: Role,
    ) -> Result<ClinicalRecord, RecordError> {
        let result = self.client.patient_detail(patient_id, role).await;

        if let Some(payload) = result.data {
            return Ok(build_record(payload));
        }

        let message = result
            .error_message()
            .unwrap_or("request failed")
            .to_string();

        if !self.client.config().mock_fallback {
            return Err(RecordError::Remote(message));
        }

        tokio::time::sleep(self.fallback_delay).await;
        match fixtures::fixture_detail(patient_id) {
            Some(payload) => {
                tracing::info!(patient_id, %role, "Backend unavailable, serving fixture record");
                Ok(build_record(payload))
            }
            None => Err(RecordError::PatientNotFound(patient_id.to_string())),
        }
    }
}

/// Normalize a raw payload into the canonical record. Pure: identical
/// payloads produce identical records.
pub fn build_record(payload: PatientDetailPayload) -> ClinicalRecord {
    let urgency = infer_urgency(payload.ai_summary.as_deref());
    ClinicalRecord {
        urgency,
        confidence: payload.confidence_score.clamp(0.0, 1.0),
        vitals: group_vitals(&payload.vitals_data),
        labs: categorize_labs(&payload.lab_results),
        documents: payload.documents.iter().map(document_ref).collect(),
        qa_pairs: payload
            .qa_pairs
            .iter()
            .enumerate()
            .map(|(index, pair)| qa_pair(index, pair))
            .collect(),
        clinical_summary: payload.ai_summary,
        patient: payload.patient,
        suggested_layout: payload.canvas_layout,
    }
}

/// Assign every lab test to exactly one category, flagging each value.
/// Categories come out in table priority order, default last; empty
/// categories are omitted.
pub fn categorize_labs(entries: &[crate::client::ClinicalEntryPayload]) -> Vec<LabCategory> {
    let mut buckets: Vec<(&'static str, Vec<LabTest>)> = categories::category_order()
        .into_iter()
        .map(|name| (name, Vec::new()))
        .collect();

    for entry in entries {
        let Some(date) = vitals::parse_date(&entry.date_recorded, "lab") else {
            continue;
        };
        let category = categories::category_for(&entry.name);
        let test = LabTest {
            name: prettify_name(&entry.name),
            value: entry.value.clone(),
            unit: entry.unit.clone(),
            reference_range: entry.reference_range.clone(),
            flag: flag_for(&entry.value, &entry.reference_range),
            date,
        };
        if let Some((_, tests)) = buckets.iter_mut().find(|(name, _)| *name == category) {
            tests.push(test);
        }
    }

    buckets
        .into_iter()
        .filter(|(_, tests)| !tests.is_empty())
        .map(|(name, tests)| LabCategory {
            name: name.to_string(),
            tests,
        })
        .collect()
}

fn document_ref(payload: &DocumentPayload) -> DocumentRef {
    DocumentRef {
        id: payload.id.clone(),
        filename: payload.filename.clone(),
        document_type: payload.document_type.clone(),
        file_url: payload.file_url.clone(),
        page_count: payload.page_count,
    }
}

fn qa_pair(index: usize, payload: &QaPairPayload) -> QaPair {
    QaPair {
        // Index-based so rebuilding the same payload yields the same record.
        id: format!("qa-{}", index + 1),
        question: payload.question.clone(),
        answer: payload.answer.clone(),
        confidence: payload.confidence_score.unwrap_or(DEFAULT_QA_CONFIDENCE),
        source_document: payload.source_document.clone(),
        source_page: payload.source_page,
    }
}
