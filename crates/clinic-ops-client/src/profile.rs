//! Patient profile aggregation.
//!
//! One patient view needs four backend resources. They are fetched
//! concurrently and each is individually fault-tolerant: a missing
//! document list must not blank out the appointments next to it.

use tracing::warn;

use clinic_ops_core::normalize;
use clinic_ops_core::{Appointment, ClinicalNote, Patient, PatientDocument};

use crate::api::ClinicApi;

/// Everything the patient detail view renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientProfile {
    /// None when even the detail fetch failed.
    pub patient: Option<Patient>,
    /// Descending by date.
    pub appointments: Vec<Appointment>,
    pub documents: Vec<PatientDocument>,
    pub notes: Vec<ClinicalNote>,
}

/// Fetch and assemble a patient profile.
///
/// The per-patient appointment endpoint is not deployed everywhere; when
/// it fails, the global appointment list filtered by patient id stands in.
pub async fn load_profile<A: ClinicApi>(api: &A, patient_id: &str) -> PatientProfile {
    let (detail, appointments, documents, notes) = tokio::join!(
        api.get_patient(patient_id),
        api.get_patient_appointments(patient_id),
        api.get_patient_documents(patient_id),
        api.get_clinical_notes(patient_id),
    );

    let patient = match detail {
        Ok(response) => Some(normalize::patient_from_value(normalize::record(&response))),
        Err(err) => {
            warn!(%patient_id, error = %err, "patient detail fetch failed");
            None
        }
    };

    let appointments = match appointments {
        Ok(response) => normalize::appointments_from_response(&response),
        Err(err) => {
            warn!(%patient_id, error = %err, "patient appointments fetch failed, trying global list");
            fallback_appointments(api, patient_id).await
        }
    };

    let documents = match documents {
        Ok(response) => normalize::documents_from_response(&response),
        Err(err) => {
            warn!(%patient_id, error = %err, "document fetch failed");
            Vec::new()
        }
    };

    let notes = match notes {
        Ok(response) => normalize::notes_from_response(&response),
        Err(err) => {
            warn!(%patient_id, error = %err, "clinical notes fetch failed");
            Vec::new()
        }
    };

    PatientProfile {
        patient,
        appointments,
        documents,
        notes,
    }
}

async fn fallback_appointments<A: ClinicApi>(api: &A, patient_id: &str) -> Vec<Appointment> {
    match api.get_appointments().await {
        Ok(response) => normalize::appointments_from_response(&response)
            .into_iter()
            .filter(|a| a.patient_id.as_deref() == Some(patient_id))
            .collect(),
        Err(err) => {
            warn!(%patient_id, error = %err, "global appointment fallback failed");
            Vec::new()
        }
    }
}
