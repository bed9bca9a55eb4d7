//! Draft/publish lifecycle for one library's layout.
//!
//! A layout moves `draft → published → draft (new edits) → published (new
//! version)`. Publishing validates the document, snapshots it through the
//! persistence adapter, and only then flips the version flag; the three
//! steps form a single request/response unit. Viewers always consume the
//! last published snapshot, never the live draft, so an unpublish or a
//! failed publish leaves them on the previous known-good version.
//!
//! Publish calls for the same library must not overlap. The workflow holds
//! an in-flight flag and rejects a second call with
//! [`PublishError::PublishInProgress`] while one is running; the caller
//! retries later.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use seatmap_core::{IntegrityError, LayoutDocument, LayoutVersion};
use thiserror::Error;
use tracing::{info, warn};

use super::epoch_ms;
use crate::infrastructure::persistence::{PersistenceAdapter, PersistenceError};

/// Why a publish or snapshot read failed.
#[derive(Debug, Error, PartialEq)]
pub enum PublishError {
    /// Another publish for this library is still in flight; retry later.
    #[error("a publish is already in progress for this layout")]
    PublishInProgress,

    /// The draft failed validation; nothing was written.
    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    /// The adapter rejected the snapshot write; the draft keeps its version.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Coordinates validation, snapshotting, and version flipping for one
/// library's layout.
pub struct PublishWorkflow {
    adapter: Arc<dyn PersistenceAdapter>,
    library_id: String,
    in_flight: AtomicBool,
}

impl PublishWorkflow {
    pub fn new(adapter: Arc<dyn PersistenceAdapter>, library_id: impl Into<String>) -> Self {
        Self {
            adapter,
            library_id: library_id.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Publishes the current draft, returning the publish timestamp
    /// (epoch milliseconds).
    ///
    /// On success the snapshot is stored for viewers and `doc` is stamped
    /// `published`. On any error `doc` is left exactly as it was and the
    /// previously published snapshot remains current.
    ///
    /// # Errors
    ///
    /// [`PublishError::PublishInProgress`] when a publish for this library
    /// is already running, [`PublishError::Integrity`] when validation
    /// fails, [`PublishError::Persistence`] when the snapshot write fails.
    pub async fn publish(&self, doc: &mut LayoutDocument) -> Result<u64, PublishError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            warn!(library = %self.library_id, "rejected overlapping publish");
            return Err(PublishError::PublishInProgress);
        }
        let result = self.publish_inner(doc).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn publish_inner(&self, doc: &mut LayoutDocument) -> Result<u64, PublishError> {
        doc.validate()?;

        let published_at = epoch_ms();
        let mut snapshot = doc.clone();
        snapshot.version = LayoutVersion::Published;
        snapshot.published_at = Some(published_at);

        self.adapter
            .publish_snapshot(&self.library_id, &snapshot)
            .await?;

        // The write completed; only now does the draft flip.
        doc.version = LayoutVersion::Published;
        doc.published_at = Some(published_at);
        info!(library = %self.library_id, published_at, "layout published");
        Ok(published_at)
    }

    /// Returns the layout to draft state.
    ///
    /// The previously published snapshot stays in place as the last
    /// known-good version for viewers until the next publish.
    pub fn unpublish(&self, doc: &mut LayoutDocument) {
        doc.version = LayoutVersion::Draft;
        info!(library = %self.library_id, "layout unpublished; viewers keep last snapshot");
    }

    /// The snapshot non-admin viewers should render.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] when the library has never
    /// been published.
    pub async fn viewer_snapshot(&self) -> Result<LayoutDocument, PersistenceError> {
        self.adapter.load_published(&self.library_id).await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
