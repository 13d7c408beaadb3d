//! CSV bulk lead submission.

use tracing::{info, warn};

use clinic_ops_core::csv;

use crate::api::ClinicApi;

/// Outcome of a bulk upload. Rows are independent; the batch never aborts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl ImportReport {
    /// Whether the caller should refresh its lead list.
    pub fn any_succeeded(&self) -> bool {
        self.succeeded > 0
    }
}

/// Parse a CSV upload and submit each row as an independent lead create.
///
/// A failed row is counted and logged, then the batch continues; one bad
/// phone number must not sink the other forty-nine rows of a camp sheet.
pub async fn import_leads<A: ClinicApi>(api: &A, csv_text: &str) -> ImportReport {
    let mut report = ImportReport::default();

    for new_lead in csv::parse_leads(csv_text) {
        match api.create_lead(&new_lead.payload()).await {
            Ok(_) => report.succeeded += 1,
            Err(err) => {
                warn!(name = %new_lead.name, error = %err, "lead import row failed");
                report.failed += 1;
            }
        }
    }

    info!(succeeded = report.succeeded, failed = report.failed, "lead import finished");
    report
}
