use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{Flag, Urgency};
use super::layout::CanvasLayout;
use super::patient::Patient;

/// The canonical, widget-agnostic representation of one patient's
/// clinical data. Built fresh on every successful fetch; never partially
/// mutated by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecord {
    pub patient: Patient,
    pub clinical_summary: Option<String>,
    /// Inferred from the summary text by keyword heuristic, not trusted
    /// from the payload. `Critical` is only ever set explicitly upstream.
    pub urgency: Urgency,
    /// Summary confidence, clamped to [0, 1].
    pub confidence: f64,
    pub vitals: Vec<VitalGroup>,
    pub labs: Vec<LabCategory>,
    pub documents: Vec<DocumentRef>,
    pub qa_pairs: Vec<QaPair>,
    pub suggested_layout: Option<CanvasLayout>,
}

/// One vital's trend series. Readings share a unit and a comparable
/// reference range, ordered ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalGroup {
    /// Prettified display name ("blood_pressure_systolic" → "Blood Pressure Systolic").
    pub name: String,
    pub readings: Vec<VitalReading>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalReading {
    pub date: NaiveDate,
    pub value: String,
    pub unit: String,
    pub reference_range: String,
    pub flag: Flag,
}

/// A clinical category and the lab tests assigned to it. Category
/// assignment is a deterministic function of test name; every test lands
/// in exactly one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabCategory {
    pub name: String,
    pub tests: Vec<LabTest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabTest {
    pub name: String,
    pub value: String,
    pub unit: String,
    pub reference_range: String,
    pub flag: Flag,
    pub date: NaiveDate,
}

/// A document attached to the patient's record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: Option<String>,
    pub filename: String,
    pub document_type: Option<String>,
    pub file_url: Option<String>,
    pub page_count: Option<u32>,
}

/// An accumulated question/answer exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub confidence: f64,
    pub source_document: Option<String>,
    pub source_page: Option<u32>,
}

/// The four sections of a generated clinical note.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SoapSections {
    pub subjective: String,
    pub objective: String,
    pub assessment: String,
    pub plan: String,
}

/// A saved clinical note as returned by the notes endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoapNote {
    pub id: String,
    #[serde(flatten)]
    pub sections: SoapSections,
    pub created_at: Option<String>,
}
