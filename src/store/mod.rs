//! Local canvas state.
//!
//! `CanvasStore` owns the session's layout (viewport, nodes, connections),
//! the active patient/role target, and the last-loaded record. Mutations
//! are synchronous and permissive: a missing target id is ignored, since it
//! only affects presentation.
//!
//! Record loads are asynchronous and raceable, so every target change
//! bumps a sequence number carried by a `LoadTicket`; deliveries whose
//! ticket is stale are discarded. The store therefore reflects the most
//! recently *requested* patient/role, never the most recently arrived
//! response.

pub mod session;

use std::sync::Arc;

use crate::hydrate::{HydratedWidget, Projector};
use crate::models::{
    ClinicalRecord, Connection, LayoutNode, Position, Role, Size, Viewport,
};

pub use session::CanvasSession;

/// Where the canvas is in its load lifecycle. Rendering distinguishes all
/// four before drawing any widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Empty,
    Loading,
    Ready,
    Failed(String),
}

/// Claim check for one requested record load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub patient_id: String,
    pub role: Role,
    pub seq: u64,
}

/// Partial viewport mutation; `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub zoom: Option<f64>,
}

pub struct CanvasStore {
    patient_id: Option<String>,
    role: Role,
    viewport: Viewport,
    nodes: Vec<LayoutNode>,
    connections: Vec<Connection>,
    record: Option<Arc<ClinicalRecord>>,
    /// Patient the current record/layout belongs to; drives layout adoption.
    record_patient: Option<String>,
    phase: LoadPhase,
    load_seq: u64,
}

impl CanvasStore {
    pub fn new() -> Self {
        Self {
            patient_id: None,
            role: Role::Clinician,
            viewport: Viewport::default(),
            nodes: Vec::new(),
            connections: Vec::new(),
            record: None,
            record_patient: None,
            phase: LoadPhase::Empty,
            load_seq: 0,
        }
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn patient_id(&self) -> Option<&str> {
        self.patient_id.as_deref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn record(&self) -> Option<&ClinicalRecord> {
        self.record.as_deref()
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    /// Hydrate the current layout against the current record.
    pub fn widgets(&self, projector: &Projector) -> Vec<HydratedWidget> {
        projector.project_layout(&self.nodes, self.record())
    }

    // ── Load targeting ──────────────────────────────────────

    /// Switch the active patient. The visible state updates synchronously;
    /// the caller owes the store a record delivery for the returned ticket.
    pub fn select_patient(&mut self, patient_id: &str) -> LoadTicket {
        self.patient_id = Some(patient_id.to_string());
        self.begin_load()
    }

    /// Switch the active role. Triggers a re-fetch for the active patient;
    /// with no patient selected there is nothing to load.
    pub fn set_role(&mut self, role: Role) -> Option<LoadTicket> {
        self.role = role;
        self.patient_id.is_some().then(|| self.begin_load())
    }

    fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        self.phase = LoadPhase::Loading;
        LoadTicket {
            patient_id: self.patient_id.clone().unwrap_or_default(),
            role: self.role,
            seq: self.load_seq,
        }
    }

    /// Deliver a loaded record. Returns false (and changes nothing) when
    /// the ticket is stale — a newer target was requested meanwhile.
    pub fn apply_record(&mut self, seq: u64, record: ClinicalRecord) -> bool {
        if seq != self.load_seq {
            tracing::debug!(seq, current = self.load_seq, "Discarding stale record delivery");
            return false;
        }

        let switched = self.record_patient.as_deref() != Some(record.patient.id.as_str());
        if switched {
            if let Some(layout) = &record.suggested_layout {
                self.viewport = layout.viewport;
                self.nodes = layout.nodes.clone();
                self.connections = layout.connections.clone();
            }
        }

        self.record_patient = Some(record.patient.id.clone());
        self.record = Some(Arc::new(record));
        self.phase = LoadPhase::Ready;
        true
    }

    /// Deliver a load failure. Stale tickets are discarded the same way.
    pub fn apply_failure(&mut self, seq: u64, message: String) -> bool {
        if seq != self.load_seq {
            tracing::debug!(seq, current = self.load_seq, "Discarding stale failure delivery");
            return false;
        }
        self.phase = LoadPhase::Failed(message);
        true
    }

    // ── Layout mutations ────────────────────────────────────

    /// Apply a partial viewport update. Non-positive zoom is ignored.
    pub fn update_viewport(&mut self, update: ViewportUpdate) {
        if let Some(x) = update.x {
            self.viewport.x = x;
        }
        if let Some(y) = update.y {
            self.viewport.y = y;
        }
        if let Some(zoom) = update.zoom {
            if zoom > 0.0 {
                self.viewport.zoom = zoom;
            } else {
                tracing::warn!(zoom, "Ignoring non-positive zoom");
            }
        }
    }

    pub fn move_node(&mut self, id: &str, position: Position) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            node.position = position;
        }
    }

    pub fn resize_node(&mut self, id: &str, size: Size) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            node.size = size;
        }
    }

    /// Add a node. A duplicate id is ignored — node ids are unique per canvas.
    pub fn add_node(&mut self, node: LayoutNode) {
        if self.nodes.iter().any(|n| n.id == node.id) {
            tracing::warn!(id = %node.id, "Ignoring node with duplicate id");
            return;
        }
        self.nodes.push(node);
    }

    /// Remove a node and cascade removal of its connections.
    pub fn remove_node(&mut self, id: &str) {
        self.nodes.retain(|n| n.id != id);
        self.connections
            .retain(|c| c.source != id && c.target != id);
    }

    pub fn add_connection(&mut self, connection: Connection) {
        let endpoints_exist = self.nodes.iter().any(|n| n.id == connection.source)
            && self.nodes.iter().any(|n| n.id == connection.target);
        if !endpoints_exist {
            tracing::warn!(id = %connection.id, "Ignoring connection with missing endpoint");
            return;
        }
        self.connections.push(connection);
    }

    /// Clear everything back to initial state (logout / patient deselect).
    /// Bumps the sequence so any in-flight load is discarded on arrival.
    pub fn reset(&mut self) {
        self.load_seq += 1;
        self.patient_id = None;
        self.role = Role::Clinician;
        self.viewport = Viewport::default();
        self.nodes.clear();
        self.connections.clear();
        self.record = None;
        self.record_patient = None;
        self.phase = LoadPhase::Empty;
    }
}

impl Default for CanvasStore {
    fn default() -> Self {
        Self::new()
    }
}
