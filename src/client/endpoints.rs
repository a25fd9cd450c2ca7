//! Typed wrappers for the consumed backend surface.
//!
//! Successful payloads for the three cacheable categories (patient list,
//! patient detail, notes) are served read-through from `TtlCache`; failure
//! envelopes are never cached.

use super::types::{AskRequest, AskResponsePayload, PatientDetailPayload, RequestResult};
use super::ApiClient;
use crate::models::{Patient, Role, SoapNote, SoapSections};

const PATIENT_LIST_KEY: &str = "patients";

impl ApiClient {
    /// `GET /patients` — the selectable patient roster.
    pub async fn list_patients(&self) -> RequestResult<Vec<Patient>> {
        if let Some(cached) = self.caches.patient_list.get(&PATIENT_LIST_KEY.to_string()) {
            return RequestResult::ok(cached);
        }
        let result: RequestResult<Vec<Patient>> = self.get("patients").await;
        if let Some(patients) = &result.data {
            self.caches.patient_list.put(
                PATIENT_LIST_KEY.to_string(),
                patients.clone(),
                self.config().cache_ttls.patient_list,
            );
        }
        result
    }

    /// `GET /patients/{id}?role={role}` — the raw clinical payload.
    pub async fn patient_detail(
        &self,
        patient_id: &str,
        role: Role,
    ) -> RequestResult<PatientDetailPayload> {
        let key = format!("{patient_id}:{role}");
        if let Some(cached) = self.caches.patient_detail.get(&key) {
            return RequestResult::ok(cached);
        }
        let endpoint = format!("patients/{patient_id}?role={role}");
        let result: RequestResult<PatientDetailPayload> = self.get(&endpoint).await;
        if let Some(payload) = &result.data {
            self.caches.patient_detail.put(
                key,
                payload.clone(),
                self.config().cache_ttls.patient_detail,
            );
        }
        result
    }

    /// `POST /patients/{id}/ask` — AI question answering.
    pub async fn ask(&self, patient_id: &str, question: &str) -> RequestResult<AskResponsePayload> {
        let endpoint = format!("patients/{patient_id}/ask");
        let body = serde_json::to_value(AskRequest {
            question: question.to_string(),
        })
        .unwrap_or_default();
        self.post(&endpoint, body).await
    }

    /// `POST /patients/{id}/soap/generate` — draft a clinical note.
    pub async fn generate_note(&self, patient_id: &str) -> RequestResult<SoapSections> {
        let endpoint = format!("patients/{patient_id}/soap/generate");
        self.post(&endpoint, serde_json::json!({})).await
    }

    /// `POST /patients/{id}/soap/save` — persist an edited note.
    /// Invalidates the cached note history for the patient.
    pub async fn save_note(
        &self,
        patient_id: &str,
        sections: &SoapSections,
    ) -> RequestResult<SoapNote> {
        let endpoint = format!("patients/{patient_id}/soap/save");
        let body = serde_json::to_value(sections).unwrap_or_default();
        let result: RequestResult<SoapNote> = self.post(&endpoint, body).await;
        if result.success {
            self.caches.notes.invalidate(&patient_id.to_string());
        }
        result
    }

    /// `GET /patients/{id}/soap` — saved note history.
    ///
    /// A 404 on this collection-style fetch means "no notes yet", not an
    /// error: it resolves to a successful empty list.
    pub async fn list_notes(&self, patient_id: &str) -> RequestResult<Vec<SoapNote>> {
        let key = patient_id.to_string();
        if let Some(cached) = self.caches.notes.get(&key) {
            return RequestResult::ok(cached);
        }
        let endpoint = format!("patients/{patient_id}/soap");
        let result: RequestResult<Vec<SoapNote>> = self.get(&endpoint).await;

        if !result.success {
            if let Some(failure) = &result.error {
                if failure.status == Some(404) {
                    return RequestResult::ok(Vec::new());
                }
            }
            return result;
        }

        if let Some(notes) = &result.data {
            self.caches
                .notes
                .put(key, notes.clone(), self.config().cache_ttls.notes);
        }
        result
    }
}
