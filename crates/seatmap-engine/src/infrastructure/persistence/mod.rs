//! Persistence boundary for layout documents.
//!
//! The engine never talks to storage directly; everything goes through the
//! [`PersistenceAdapter`] trait. The production implementation lives with
//! the host application (an HTTP client against the library-management
//! backend); this crate ships [`memory::MemoryAdapter`] for tests, tooling,
//! and offline use.
//!
//! Two stores exist per library: the **draft** document the admin edits,
//! and the **published snapshot** that non-admin viewers consume. The
//! publish workflow is the only writer of the snapshot store. The adapter
//! also keeps the append-only assignment audit history, since the engine
//! itself only tracks the current binding on each seat.
//!
//! Adapter errors are propagated to callers unchanged; retry policy belongs
//! to the caller, not to this boundary.

use async_trait::async_trait;
use seatmap_core::{LayoutDocument, OccupancyStats};
use thiserror::Error;

use crate::application::assign_seats::AuditEntry;

pub mod memory;

/// Errors surfaced by a persistence adapter.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PersistenceError {
    /// No layout is stored for the library.
    #[error("no layout stored for library {0}")]
    NotFound(String),

    /// The write conflicted with another writer.
    #[error("conflicting write for library {0}")]
    Conflict(String),

    /// The underlying storage failed.
    #[error("storage failure: {0}")]
    Io(String),
}

/// Load/save boundary for layout documents and their assignment history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    /// Loads the draft document for a library.
    async fn load_layout(&self, library_id: &str) -> Result<LayoutDocument, PersistenceError>;

    /// Stores the draft document for a library.
    ///
    /// Callers must run [`LayoutDocument::validate`] first; adapters are not
    /// required to re-check integrity.
    async fn save_layout(
        &self,
        library_id: &str,
        doc: &LayoutDocument,
    ) -> Result<(), PersistenceError>;

    /// Stores `snapshot` as the published version viewers see.
    async fn publish_snapshot(
        &self,
        library_id: &str,
        snapshot: &LayoutDocument,
    ) -> Result<(), PersistenceError>;

    /// Loads the last published snapshot for a library.
    async fn load_published(&self, library_id: &str) -> Result<LayoutDocument, PersistenceError>;

    /// Aggregate occupancy counts over the library's current draft.
    async fn get_occupancy_stats(
        &self,
        library_id: &str,
    ) -> Result<OccupancyStats, PersistenceError>;

    /// Appends one assignment audit record to the library's history.
    async fn append_audit(
        &self,
        library_id: &str,
        entry: AuditEntry,
    ) -> Result<(), PersistenceError>;

    /// The library's full assignment history, oldest first.
    async fn audit_trail(&self, library_id: &str) -> Result<Vec<AuditEntry>, PersistenceError>;
}
