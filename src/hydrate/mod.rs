//! Canvas hydration: canonical record + layout node → per-widget payload.
//!
//! Projection is a pure function of (kind, stored data, record) — the only
//! non-deterministic output in the module is the uuid synthesized when an
//! `AskHandle` maps a live answer. The projector owns no state; it is
//! invoked once per node whenever the record or the layout changes.

pub mod timeline;
pub mod types;

use std::sync::Arc;

use crate::client::ApiClient;
use crate::models::{ClinicalRecord, LayoutNode, Position, Size, WidgetKind};

pub use timeline::{derive_timeline, TimelineEvent, TimelineEventType};
pub use types::{AskHandle, ClinicalData, NoteError, NoteHandle, WidgetData};

/// A layout node paired with its hydrated payload, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct HydratedWidget {
    pub id: String,
    pub kind: WidgetKind,
    pub position: Position,
    pub size: Size,
    pub data: WidgetData,
}

/// Stateless dispatcher from widget kind to widget data.
#[derive(Clone)]
pub struct Projector {
    client: Arc<ApiClient>,
}

impl Projector {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Hydrate one node's data.
    ///
    /// With no record loaded the stored data passes through unchanged —
    /// widgets render their own loading/empty affordance. Kinds this crate
    /// doesn't hydrate (analytics, admin, unknown) always pass through.
    pub fn project(
        &self,
        kind: WidgetKind,
        stored: serde_json::Value,
        record: Option<&ClinicalRecord>,
    ) -> WidgetData {
        let Some(record) = record else {
            return WidgetData::Stored(stored);
        };

        match kind {
            WidgetKind::PatientSummary => WidgetData::Summary {
                summary: record.clinical_summary.clone(),
                urgency: record.urgency,
                confidence: record.confidence,
                patient: record.patient.clone(),
            },
            WidgetKind::VitalsChart => WidgetData::VitalsChart {
                title: "Vitals Trend".to_string(),
                vitals: record.vitals.clone(),
            },
            WidgetKind::LabResults => WidgetData::LabResults {
                categories: record.labs.clone(),
            },
            WidgetKind::DocumentViewer => WidgetData::DocumentViewer {
                document: record.documents.first().cloned(),
            },
            WidgetKind::QuestionBox => WidgetData::QuestionBox {
                qa_pairs: record.qa_pairs.clone(),
                ask: AskHandle::new(self.client.clone(), record.patient.id.clone()),
            },
            WidgetKind::NoteGenerator => WidgetData::NoteGenerator {
                patient: Some(record.patient.clone()),
                clinical_data: ClinicalData {
                    vitals: record.vitals.clone(),
                    labs: record.labs.clone(),
                },
                notes: NoteHandle::new(self.client.clone(), Some(record.patient.id.clone())),
            },
            WidgetKind::Timeline => WidgetData::Timeline {
                events: derive_timeline(record),
            },
            WidgetKind::AnalyticsReport | WidgetKind::SystemAdmin | WidgetKind::Unknown => {
                WidgetData::Stored(stored)
            }
        }
    }

    /// Hydrate a full layout in node order.
    pub fn project_layout(
        &self,
        nodes: &[LayoutNode],
        record: Option<&ClinicalRecord>,
    ) -> Vec<HydratedWidget> {
        nodes
            .iter()
            .map(|node| HydratedWidget {
                id: node.id.clone(),
                kind: node.kind,
                position: node.position,
                size: node.size,
                data: self.project(node.kind, node.data.clone(), record),
            })
            .collect()
    }
}
