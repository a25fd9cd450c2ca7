//! Built-in fallback patients.
//!
//! When the backend is unreachable and mock fallback is enabled, these
//! fixture payloads stand in for `GET /patients/{id}`. They run through the
//! same transformation as remote payloads, so flags, categories, and
//! urgency always come out of the one pipeline.

use serde_json::json;

use crate::client::{ClinicalEntryPayload, DocumentPayload, PatientDetailPayload, QaPairPayload};
use crate::models::{
    CanvasLayout, LayoutNode, Patient, Position, Size, Viewport, WidgetKind,
};

/// Look up the fixture payload for a patient id.
pub fn fixture_detail(patient_id: &str) -> Option<PatientDetailPayload> {
    match patient_id {
        "uncle-tan-001" => Some(uncle_tan()),
        "mrs-chen-002" => Some(mrs_chen()),
        "mr-kumar-003" => Some(mr_kumar()),
        _ => None,
    }
}

/// The fixture roster, for offline patient lists.
pub fn fixture_patients() -> Vec<Patient> {
    vec![
        uncle_tan().patient,
        mrs_chen().patient,
        mr_kumar().patient,
    ]
}

fn entry(name: &str, value: &str, unit: &str, range: &str, date: &str) -> ClinicalEntryPayload {
    ClinicalEntryPayload {
        name: name.into(),
        value: value.into(),
        unit: unit.into(),
        reference_range: range.into(),
        date_recorded: date.into(),
    }
}

fn node(id: &str, kind: WidgetKind, x: f64, y: f64, data: serde_json::Value) -> LayoutNode {
    LayoutNode {
        id: id.into(),
        kind,
        position: Position { x, y },
        size: Size::default(),
        data,
    }
}

/// Uncle Tan — CKD stage 4, the fully populated demo case.
fn uncle_tan() -> PatientDetailPayload {
    let summary = "68-year-old male with progressive chronic kidney disease (Stage 4) \
        requiring urgent nephrology follow-up. Recent labs show elevated creatinine \
        (4.2 mg/dL) and declining eGFR (18 mL/min). Patient presents with fatigue, \
        decreased appetite, and mild edema. Blood pressure moderately controlled on \
        ACE inhibitor. Requires discussion of renal replacement therapy options and \
        close monitoring of electrolytes and fluid status.";

    PatientDetailPayload {
        patient: Patient {
            id: "uncle-tan-001".into(),
            name: "Uncle Tan".into(),
            age: 68,
            gender: "Male".into(),
        },
        ai_summary: Some(summary.into()),
        key_issues: vec![
            "Stage 4 chronic kidney disease".into(),
            "Secondary anemia".into(),
            "Elevated parathyroid hormone".into(),
        ],
        confidence_score: 0.92,
        vitals_data: vec![
            entry("blood_pressure_systolic", "142", "mmHg", "90-140", "2024-07-28"),
            entry("blood_pressure_diastolic", "88", "mmHg", "60-90", "2024-07-28"),
            entry("heart_rate", "78", "bpm", "60-100", "2024-07-28"),
            entry("temperature", "36.8", "°C", "36.1-37.2", "2024-07-28"),
            entry("weight", "72.5", "kg", "N/A", "2024-07-28"),
            entry("oxygen_saturation", "98", "%", "95-100", "2024-07-28"),
        ],
        lab_results: vec![
            entry("creatinine", "4.2", "mg/dL", "0.7-1.3", "2024-07-28"),
            entry("bun", "68", "mg/dL", "6-24", "2024-07-28"),
            entry("egfr", "18", "mL/min/1.73m²", ">60", "2024-07-28"),
            entry("potassium", "4.8", "mEq/L", "3.5-5.1", "2024-07-28"),
            entry("phosphorus", "5.2", "mg/dL", "2.5-4.5", "2024-07-28"),
            entry("hemoglobin", "10.2", "g/dL", "12.0-15.5", "2024-07-28"),
            entry("parathyroid_hormone", "185", "pg/mL", "15-65", "2024-07-25"),
            entry("albumin", "3.2", "g/dL", "3.5-5.0", "2024-07-28"),
        ],
        documents: vec![DocumentPayload {
            id: Some("doc-tan-referral".into()),
            filename: "referral_nephrology_tan.pdf".into(),
            document_type: Some("referral".into()),
            file_url: Some("/documents/uncle_tan_referral.pdf".into()),
            page_count: Some(3),
        }],
        qa_pairs: vec![
            QaPairPayload {
                question: "What is the current kidney function status?".into(),
                answer: "Uncle Tan has Stage 4 chronic kidney disease with severely \
                    reduced kidney function. His creatinine is elevated at 4.2 mg/dL \
                    (normal 0.7-1.3) and his estimated GFR is only 18 mL/min/1.73m² \
                    (normal >60), indicating severe reduction in kidney function."
                    .into(),
                confidence_score: Some(0.95),
                source_document: Some("referral_nephrology_tan.pdf".into()),
                source_page: Some(1),
            },
            QaPairPayload {
                question: "What are the main concerns with this patient?".into(),
                answer: "The primary concerns are: 1) Progressive chronic kidney disease \
                    requiring urgent nephrology evaluation, 2) Elevated creatinine and very \
                    low eGFR indicating need for renal replacement therapy planning, \
                    3) Secondary complications including anemia (Hgb 10.2) and elevated \
                    parathyroid hormone (185), 4) Risk of fluid and electrolyte imbalances."
                    .into(),
                confidence_score: Some(0.92),
                source_document: Some("referral_nephrology_tan.pdf".into()),
                source_page: Some(2),
            },
        ],
        canvas_layout: Some(CanvasLayout {
            nodes: vec![
                node("patient-summary", WidgetKind::PatientSummary, 50.0, 50.0, json!({})),
                node(
                    "vitals-chart",
                    WidgetKind::VitalsChart,
                    400.0,
                    50.0,
                    json!({"chartType": "trend"}),
                ),
                node("lab-results", WidgetKind::LabResults, 50.0, 300.0, json!({})),
                node("document-viewer", WidgetKind::DocumentViewer, 400.0, 300.0, json!({})),
                node("ai-question-box", WidgetKind::QuestionBox, 750.0, 50.0, json!({})),
                node("soap-generator", WidgetKind::NoteGenerator, 750.0, 300.0, json!({})),
                node("patient-timeline", WidgetKind::Timeline, 50.0, 550.0, json!({})),
            ],
            connections: vec![],
            viewport: Viewport::default(),
        }),
    }
}

/// Mrs. Chen — type 2 diabetes, moderately controlled.
fn mrs_chen() -> PatientDetailPayload {
    let summary = "54-year-old female with Type 2 diabetes mellitus, moderately \
        controlled with HbA1c of 8.2%. Recent concerns include diabetic nephropathy \
        with microalbuminuria and early retinopathy changes. Blood pressure elevated \
        at 150/92, requiring optimization. Patient reports improved dietary compliance \
        but struggles with medication adherence. Requires endocrinology follow-up and \
        ophthalmology screening.";

    PatientDetailPayload {
        patient: Patient {
            id: "mrs-chen-002".into(),
            name: "Mrs. Chen".into(),
            age: 54,
            gender: "Female".into(),
        },
        ai_summary: Some(summary.into()),
        key_issues: vec![
            "Type 2 diabetes, HbA1c 8.2%".into(),
            "Early diabetic nephropathy".into(),
        ],
        confidence_score: 0.89,
        vitals_data: vec![
            entry("blood_pressure_systolic", "150", "mmHg", "90-140", "2024-07-20"),
            entry("blood_pressure_diastolic", "92", "mmHg", "60-90", "2024-07-20"),
        ],
        lab_results: vec![
            entry("hba1c", "8.2", "%", "<6.5", "2024-07-20"),
            entry("glucose", "164", "mg/dL", "70-100", "2024-07-20"),
            entry("creatinine", "1.1", "mg/dL", "0.6-1.1", "2024-07-20"),
        ],
        documents: vec![],
        qa_pairs: vec![],
        canvas_layout: Some(CanvasLayout {
            nodes: vec![
                node("patient-summary", WidgetKind::PatientSummary, 50.0, 50.0, json!({})),
                node("soap-generator", WidgetKind::NoteGenerator, 450.0, 50.0, json!({})),
                node("patient-timeline", WidgetKind::Timeline, 50.0, 350.0, json!({})),
            ],
            connections: vec![],
            viewport: Viewport::default(),
        }),
    }
}

/// Mr. Kumar — post-MI, three weeks after primary PCI.
fn mr_kumar() -> PatientDetailPayload {
    let summary = "61-year-old male with recent acute myocardial infarction (STEMI) \
        3 weeks ago, status post primary PCI with drug-eluting stent to LAD. Currently \
        on dual antiplatelet therapy, statin, and ACE inhibitor. Echo shows mild LV \
        dysfunction with EF 45%. Patient reports stable angina with mild exertion. \
        Requires cardiac rehabilitation referral and close cardiology follow-up.";

    PatientDetailPayload {
        patient: Patient {
            id: "mr-kumar-003".into(),
            name: "Mr. Kumar".into(),
            age: 61,
            gender: "Male".into(),
        },
        ai_summary: Some(summary.into()),
        key_issues: vec![
            "Recent STEMI, stent to LAD".into(),
            "Mild LV dysfunction (EF 45%)".into(),
        ],
        confidence_score: 0.91,
        vitals_data: vec![
            entry("blood_pressure_systolic", "128", "mmHg", "90-140", "2024-07-22"),
            entry("heart_rate", "64", "bpm", "60-100", "2024-07-22"),
        ],
        lab_results: vec![
            entry("troponin", "0.02", "ng/mL", "<0.04", "2024-07-22"),
            entry("hemoglobin", "13.8", "g/dL", "13.5-17.5", "2024-07-22"),
        ],
        documents: vec![],
        qa_pairs: vec![],
        canvas_layout: Some(CanvasLayout {
            nodes: vec![
                node("patient-summary", WidgetKind::PatientSummary, 50.0, 50.0, json!({})),
                node("soap-generator", WidgetKind::NoteGenerator, 450.0, 50.0, json!({})),
                node("patient-timeline", WidgetKind::Timeline, 50.0, 350.0, json!({})),
            ],
            connections: vec![],
            viewport: Viewport::default(),
        }),
    }
}
