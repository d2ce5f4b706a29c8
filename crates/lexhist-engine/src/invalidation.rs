//! Invalidation hook for the ingestion pipeline
//!
//! The caches never detect change on their own. Whatever commits new
//! amendments or section changes must report it here, after the commit.

use lexhist_core::{DocumentId, LawSource};
use std::sync::Arc;

use crate::service::LawVersionService;

/// A committed write that may make cached results stale
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestionEvent {
    AmendmentCommitted {
        document_id: DocumentId,
        instrument_id: String,
    },
    SectionChangesCommitted {
        document_id: DocumentId,
        change_count: usize,
    },
    /// Source data replaced wholesale
    BulkReload,
}

impl IngestionEvent {
    /// The affected document, or `None` when every document is affected
    pub fn document_id(&self) -> Option<&DocumentId> {
        match self {
            IngestionEvent::AmendmentCommitted { document_id, .. }
            | IngestionEvent::SectionChangesCommitted { document_id, .. } => Some(document_id),
            IngestionEvent::BulkReload => None,
        }
    }
}

pub trait CacheInvalidator: Send + Sync {
    fn on_ingestion(&self, event: &IngestionEvent);
}

impl<S: LawSource> CacheInvalidator for LawVersionService<S> {
    fn on_ingestion(&self, event: &IngestionEvent) {
        tracing::debug!(?event, "Ingestion event received");
        match event.document_id() {
            Some(document_id) => {
                self.invalidate(document_id);
            }
            None => self.invalidate_all(),
        }
    }
}

impl<T: CacheInvalidator + ?Sized> CacheInvalidator for Arc<T> {
    fn on_ingestion(&self, event: &IngestionEvent) {
        (**self).on_ingestion(event);
    }
}
