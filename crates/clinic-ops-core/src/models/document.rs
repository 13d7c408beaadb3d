//! Patient document models.

use serde::{Deserialize, Serialize};

/// A document attached to a patient record.
///
/// Freshly uploaded documents may carry a local `data:` URL until the
/// server confirms the upload and supplies the authoritative one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientDocument {
    pub id: String,
    pub patient_id: String,
    /// Display name
    pub name: String,
    /// Type tag (Report, Scan, Prescription, ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub upload_date: String,
    pub url: String,
}

impl PatientDocument {
    /// Optimistic placeholder shown while an upload is in flight.
    pub fn placeholder(
        patient_id: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        data_url: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id: patient_id.into(),
            name: name.into(),
            kind: kind.into(),
            upload_date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            url: data_url.into(),
        }
    }

    /// Whether this document is still a local placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.url.starts_with("data:")
    }
}
