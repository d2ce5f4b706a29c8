//! Warm the caches ahead of expected traffic

use chrono::NaiveDate;
use lexhist_core::{log_op_end, log_op_start};
use lexhist_core::{DocumentId, LawSource};
use serde::Serialize;
use std::time::Instant;

use crate::service::LawVersionService;

/// Outcome of a prewarm run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrewarmReport {
    /// Reconstructions now held in cache
    pub warmed: usize,
    /// `(document, date)` pairs that failed to reconstruct
    pub failed: Vec<(DocumentId, NaiveDate)>,
}

impl<S: LawSource> LawVersionService<S> {
    /// Reconstruct every listed date so later reads are cache hits
    ///
    /// Individual failures are recorded in the report and never stop the run.
    pub fn prewarm(&self, requests: &[(DocumentId, Vec<NaiveDate>)]) -> PrewarmReport {
        log_op_start!("prewarm", document_count = requests.len());
        let start = Instant::now();

        let mut report = PrewarmReport::default();
        for (document_id, dates) in requests {
            for &as_of in dates {
                match self.reconstruct(document_id, as_of) {
                    Ok(_) => report.warmed += 1,
                    Err(_) => report.failed.push((document_id.clone(), as_of)),
                }
            }
        }

        log_op_end!(
            "prewarm",
            duration_ms = start.elapsed().as_millis() as u64,
            warmed = report.warmed,
            failed = report.failed.len()
        );
        report
    }
}
