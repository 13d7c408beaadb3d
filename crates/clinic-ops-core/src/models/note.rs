//! Clinical note models.

use serde::{Deserialize, Serialize};

/// A consultation note saved against a patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicalNote {
    pub id: String,
    pub patient_id: String,
    pub note: String,
    pub date: String,
}
