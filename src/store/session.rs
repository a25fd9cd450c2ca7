//! Session orchestration: store mutations + asynchronous reloads.
//!
//! `CanvasSession` wires the store to the record service. Target changes
//! apply to the store synchronously, then the reload runs on a spawned
//! task and delivers through the sequence-guarded apply methods — the UI
//! thread never blocks on the network, and a late response for an old
//! target is dropped on arrival.

use std::sync::{Arc, RwLock};

use tokio::task::JoinHandle;

use crate::hydrate::{HydratedWidget, Projector};
use crate::models::Role;
use crate::transform::RecordService;

use super::{CanvasStore, LoadTicket};

#[derive(Clone)]
pub struct CanvasSession {
    store: Arc<RwLock<CanvasStore>>,
    records: Arc<RecordService>,
    projector: Projector,
}

impl CanvasSession {
    pub fn new(records: Arc<RecordService>) -> Self {
        let projector = Projector::new(records.client().clone());
        Self {
            store: Arc::new(RwLock::new(CanvasStore::new())),
            records,
            projector,
        }
    }

    /// Shared store handle, for rendering layers that subscribe directly.
    pub fn store(&self) -> Arc<RwLock<CanvasStore>> {
        self.store.clone()
    }

    /// Switch the active patient and kick off a reload. The returned handle
    /// resolves when the record (or failure) has been delivered.
    pub fn select_patient(&self, patient_id: &str) -> JoinHandle<()> {
        let ticket = match self.store.write() {
            Ok(mut store) => store.select_patient(patient_id),
            Err(_) => {
                tracing::error!("Store lock poisoned, skipping patient select");
                return tokio::spawn(async {});
            }
        };
        self.spawn_reload(ticket)
    }

    /// Switch the active role; reloads only when a patient is active.
    pub fn set_role(&self, role: Role) -> Option<JoinHandle<()>> {
        let ticket = match self.store.write() {
            Ok(mut store) => store.set_role(role),
            Err(_) => {
                tracing::error!("Store lock poisoned, skipping role change");
                None
            }
        };
        ticket.map(|t| self.spawn_reload(t))
    }

    /// Clear the session (logout / patient deselect).
    pub fn reset(&self) {
        if let Ok(mut store) = self.store.write() {
            store.reset();
        }
    }

    /// Hydrate the current layout against the current record.
    pub fn widgets(&self) -> Vec<HydratedWidget> {
        self.store
            .read()
            .map(|store| store.widgets(&self.projector))
            .unwrap_or_default()
    }

    fn spawn_reload(&self, ticket: LoadTicket) -> JoinHandle<()> {
        let store = self.store.clone();
        let records = self.records.clone();
        tokio::spawn(async move {
            let outcome = records
                .fetch_clinical_record(&ticket.patient_id, ticket.role)
                .await;
            let Ok(mut store) = store.write() else {
                tracing::error!("Store lock poisoned, dropping record delivery");
                return;
            };
            match outcome {
                Ok(record) => {
                    store.apply_record(ticket.seq, record);
                }
                Err(error) => {
                    store.apply_failure(ticket.seq, error.to_string());
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::client::{ApiClient, MockTransport, Transport};
    use crate::config::ClientConfig;
    use crate::hydrate::WidgetData;
    use crate::store::LoadPhase;

    fn offline_session(mock_fallback: bool) -> CanvasSession {
        let config = ClientConfig {
            retry_delay: Duration::from_millis(1),
            mock_fallback,
            ..Default::default()
        };
        // Empty mock script: every request fails like a dead backend.
        let client = Arc::new(ApiClient::with_transport(
            config,
            Arc::new(MockTransport::new()) as Arc<dyn Transport>,
        ));
        let records =
            Arc::new(RecordService::new(client).with_fallback_delay(Duration::ZERO));
        CanvasSession::new(records)
    }

    #[tokio::test]
    async fn select_patient_loads_fixture_and_adopts_layout() {
        let session = offline_session(true);
        session.select_patient("uncle-tan-001").await.unwrap();

        let store = session.store();
        let store = store.read().unwrap();
        assert_eq!(*store.phase(), LoadPhase::Ready);
        assert_eq!(store.record().unwrap().patient.name, "Uncle Tan");
        assert_eq!(store.nodes().len(), 7);
    }

    #[tokio::test]
    async fn selection_is_loading_before_delivery() {
        let session = offline_session(true);
        let handle = session.select_patient("uncle-tan-001");
        {
            let store = session.store();
            let store = store.read().unwrap();
            assert_eq!(store.patient_id(), Some("uncle-tan-001"));
        }
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn unknown_patient_fails_with_identifying_message() {
        let session = offline_session(true);
        session.select_patient("unknown-id").await.unwrap();

        let store = session.store();
        let store = store.read().unwrap();
        match store.phase() {
            LoadPhase::Failed(message) => assert!(message.contains("unknown-id")),
            other => panic!("Expected Failed, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fallback_disabled_surfaces_remote_failure() {
        let session = offline_session(false);
        session.select_patient("uncle-tan-001").await.unwrap();

        let store = session.store();
        let store = store.read().unwrap();
        assert!(matches!(store.phase(), LoadPhase::Failed(_)));
        assert!(store.record().is_none());
    }

    #[tokio::test]
    async fn rapid_switches_settle_on_last_requested_patient() {
        let session = offline_session(true);
        let first = session.select_patient("uncle-tan-001");
        let second = session.select_patient("mrs-chen-002");
        let (a, b) = tokio::join!(first, second);
        a.unwrap();
        b.unwrap();

        let store = session.store();
        let store = store.read().unwrap();
        assert_eq!(store.record().unwrap().patient.id, "mrs-chen-002");
        assert_eq!(store.nodes().len(), 3);
    }

    #[tokio::test]
    async fn role_switch_refetches_for_active_patient() {
        let session = offline_session(true);
        session.select_patient("uncle-tan-001").await.unwrap();
        session.set_role(Role::Analyst).unwrap().await.unwrap();

        let store = session.store();
        let store = store.read().unwrap();
        assert_eq!(store.role(), Role::Analyst);
        assert_eq!(*store.phase(), LoadPhase::Ready);
    }

    #[tokio::test]
    async fn role_switch_without_patient_spawns_nothing() {
        let session = offline_session(true);
        assert!(session.set_role(Role::Admin).is_none());
    }

    #[tokio::test]
    async fn widgets_hydrate_after_load() {
        let session = offline_session(true);
        assert!(session.widgets().is_empty());

        session.select_patient("uncle-tan-001").await.unwrap();
        let widgets = session.widgets();
        assert_eq!(widgets.len(), 7);
        assert!(matches!(widgets[0].data, WidgetData::Summary { .. }));
    }

    #[tokio::test]
    async fn reset_returns_to_empty() {
        let session = offline_session(true);
        session.select_patient("uncle-tan-001").await.unwrap();
        session.reset();

        let store = session.store();
        let store = store.read().unwrap();
        assert_eq!(*store.phase(), LoadPhase::Empty);
        assert!(store.nodes().is_empty());
    }
}
