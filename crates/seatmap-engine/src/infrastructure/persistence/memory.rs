//! In-memory persistence adapter for tests, tooling, and offline use.
//!
//! Keeps drafts, published snapshots, and audit histories in process-local
//! maps. A single writer mutates each library's state, so a plain `Mutex`
//! held only for the duration of each call is sufficient.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use seatmap_core::{LayoutDocument, OccupancyStats};

use super::{PersistenceAdapter, PersistenceError};
use crate::application::assign_seats::AuditEntry;

#[derive(Default)]
struct Store {
    drafts: HashMap<String, LayoutDocument>,
    published: HashMap<String, LayoutDocument>,
    audit: HashMap<String, Vec<AuditEntry>>,
}

/// A [`PersistenceAdapter`] backed by process memory.
#[derive(Default)]
pub struct MemoryAdapter {
    inner: Mutex<Store>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test observer: the currently published snapshot, if any.
    pub fn published_snapshot(&self, library_id: &str) -> Option<LayoutDocument> {
        self.inner
            .lock()
            .expect("lock poisoned")
            .published
            .get(library_id)
            .cloned()
    }
}

#[async_trait]
impl PersistenceAdapter for MemoryAdapter {
    async fn load_layout(&self, library_id: &str) -> Result<LayoutDocument, PersistenceError> {
        self.inner
            .lock()
            .expect("lock poisoned")
            .drafts
            .get(library_id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(library_id.to_string()))
    }

    async fn save_layout(
        &self,
        library_id: &str,
        doc: &LayoutDocument,
    ) -> Result<(), PersistenceError> {
        self.inner
            .lock()
            .expect("lock poisoned")
            .drafts
            .insert(library_id.to_string(), doc.clone());
        Ok(())
    }

    async fn publish_snapshot(
        &self,
        library_id: &str,
        snapshot: &LayoutDocument,
    ) -> Result<(), PersistenceError> {
        self.inner
            .lock()
            .expect("lock poisoned")
            .published
            .insert(library_id.to_string(), snapshot.clone());
        Ok(())
    }

    async fn load_published(&self, library_id: &str) -> Result<LayoutDocument, PersistenceError> {
        self.inner
            .lock()
            .expect("lock poisoned")
            .published
            .get(library_id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(library_id.to_string()))
    }

    async fn get_occupancy_stats(
        &self,
        library_id: &str,
    ) -> Result<OccupancyStats, PersistenceError> {
        self.inner
            .lock()
            .expect("lock poisoned")
            .drafts
            .get(library_id)
            .map(LayoutDocument::occupancy)
            .ok_or_else(|| PersistenceError::NotFound(library_id.to_string()))
    }

    async fn append_audit(
        &self,
        library_id: &str,
        entry: AuditEntry,
    ) -> Result<(), PersistenceError> {
        self.inner
            .lock()
            .expect("lock poisoned")
            .audit
            .entry(library_id.to_string())
            .or_default()
            .push(entry);
        Ok(())
    }

    async fn audit_trail(&self, library_id: &str) -> Result<Vec<AuditEntry>, PersistenceError> {
        Ok(self
            .inner
            .lock()
            .expect("lock poisoned")
            .audit
            .get(library_id)
            .cloned()
            .unwrap_or_default())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
