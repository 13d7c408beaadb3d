//! Lead → patient conversion workflow.
//!
//! The happy path is one create plus one lead-status write. The unhappy
//! path is a duplicate-record conflict, which is recoverable: after the
//! operator confirms, the existing patient is located and linked to the
//! lead instead of creating a second record.
//!
//! Partial success is tolerated, never rolled back: a created patient
//! outlives a failed lead-status update, because a clinical record is
//! worth more than CRM bookkeeping.

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use clinic_ops_core::normalize;
use clinic_ops_core::{Gender, Lead, LeadStatus};

use crate::api::ClinicApi;
use crate::error::ApiError;

#[derive(Error, Debug)]
pub enum ConversionError {
    /// Patient create failed for a non-conflict reason. Nothing was written.
    #[error("patient create failed: {0}")]
    Create(#[source] ApiError),

    /// The lead-status write in the link path failed. The patient link
    /// (if any) already happened.
    #[error("lead status update failed: {0}")]
    LeadUpdate(#[source] ApiError),
}

/// The patient registration form.
///
/// Mirrors what the front desk fills in; [`PatientForm::from_lead`]
/// prefills it from the lead being converted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientForm {
    pub name: String,
    pub gender: Option<Gender>,
    pub age: Option<String>,
    pub mobile: String,
    pub email: Option<String>,
    pub registration_date: Option<String>,
}

impl PatientForm {
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            name: lead.name.clone(),
            gender: lead.gender,
            age: lead.age.clone(),
            mobile: lead.phone.clone(),
            email: lead.email.clone(),
            registration_date: None,
        }
    }

    /// Create-endpoint body. `lead_id` is set only when converting;
    /// `phone` is backfilled from `mobile` because older backend
    /// revisions index on it.
    pub fn payload(&self, lead_id: Option<&str>) -> Value {
        let mut body = serde_json::Map::new();
        body.insert("name".into(), self.name.clone().into());
        body.insert("mobile".into(), self.mobile.clone().into());
        body.insert("phone".into(), self.mobile.clone().into());
        body.insert(
            "gender".into(),
            self.gender.unwrap_or_default().label().into(),
        );
        body.insert("status".into(), "Active".into());
        let date = self
            .registration_date
            .clone()
            .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());
        body.insert("registration_date".into(), date.into());
        if let Some(age) = &self.age {
            body.insert("age".into(), age.clone().into());
        }
        if let Some(email) = &self.email {
            body.insert("email".into(), email.clone().into());
        }
        if let Some(lead_id) = lead_id {
            body.insert("lead_id".into(), lead_id.into());
        }
        Value::Object(body)
    }
}

/// Whether the post-create lead-status write happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadStatusUpdate {
    /// Standalone registration, no lead involved.
    NotApplicable,
    Updated,
    /// The write failed; the created patient is kept regardless.
    Failed,
}

/// A conversion that created a new patient record.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedPatient {
    /// Id of the new record, when the create response carried one.
    pub patient_id: Option<String>,
    pub lead_status: LeadStatusUpdate,
}

/// A conversion blocked by a duplicate-record conflict.
///
/// Carries everything [`link_existing`] needs; held across the operator
/// confirmation prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictContext {
    pub lead_id: String,
    /// Mobile from the form, used for the last-resort patient scan.
    pub mobile: String,
    pub message: String,
    pub error_body: Option<Value>,
}

/// Result of a conversion attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Created(CreatedPatient),
    /// Nothing was written; resolve via [`link_existing`] after the
    /// operator confirms.
    Conflict(ConflictContext),
}

/// How the existing patient id was resolved during conflict handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingIdSource {
    /// `existing_id` on the conflict error payload.
    ErrorPayload,
    /// `patient.id` nested in the conflict error payload.
    ErrorPatientRecord,
    /// Client-side scan of all patients by mobile number.
    MobileScan,
}

/// Result of linking a lead to an already-registered patient.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkOutcome {
    pub existing_patient_id: Option<String>,
    pub source: Option<ExistingIdSource>,
    /// Whether the reverse link (patient.lead_id) was written.
    pub linked: bool,
}

impl LinkOutcome {
    /// True when an operator should double-check the records by hand:
    /// the existing patient could not be identified, or identification
    /// succeeded but the link write failed.
    pub fn needs_manual_verification(&self) -> bool {
        self.existing_patient_id.is_none() || !self.linked
    }
}

/// Register a patient, optionally converting a lead.
///
/// With a lead: on successful create the lead is moved to
/// `Converted - Active Patient`; if that write fails the outcome still
/// reports the created patient (`LeadStatusUpdate::Failed`), never a
/// rollback. A conflict on create returns [`ConversionOutcome::Conflict`]
/// with nothing written; any other create failure propagates.
pub async fn convert<A: ClinicApi>(
    api: &A,
    form: &PatientForm,
    lead: Option<&Lead>,
) -> Result<ConversionOutcome, ConversionError> {
    let lead_id = lead.map(|l| l.id.as_str());
    let response = match api.create_patient(&form.payload(lead_id)).await {
        Ok(response) => response,
        Err(err) if err.is_conflict() && lead.is_some() => {
            return Ok(ConversionOutcome::Conflict(ConflictContext {
                lead_id: lead.map(|l| l.id.clone()).unwrap_or_default(),
                mobile: form.mobile.clone(),
                message: err.to_string(),
                error_body: err.body().cloned(),
            }));
        }
        Err(err) => return Err(ConversionError::Create(err)),
    };

    let patient_id = normalize::created_id(&response);
    info!(patient_id = ?patient_id, "patient registered");

    let lead_status = match lead {
        None => LeadStatusUpdate::NotApplicable,
        Some(lead) => {
            let payload =
                serde_json::json!({ "status": LeadStatus::ConvertedActivePatient.label() });
            match api.update_lead(&lead.id, &payload).await {
                Ok(_) => LeadStatusUpdate::Updated,
                Err(err) => {
                    // Patient record stands; the lead can be fixed later.
                    warn!(lead_id = %lead.id, error = %err, "lead status update failed after create");
                    LeadStatusUpdate::Failed
                }
            }
        }
    };

    Ok(ConversionOutcome::Created(CreatedPatient {
        patient_id,
        lead_status,
    }))
}

fn id_from_body(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .or_else(|| body.get("data").and_then(|d| d.get(key)))
        .and_then(normalize::id_string)
}

fn patient_id_from_body(body: &Value) -> Option<String> {
    body.get("patient")
        .or_else(|| body.get("data").and_then(|d| d.get("patient")))
        .and_then(|p| p.get("id"))
        .and_then(normalize::id_string)
}

/// Locate the already-registered patient behind a conflict.
///
/// Strategies in order, each tried only when the previous yielded
/// nothing: `existing_id` on the error payload, `patient.id` nested in
/// it, then a scan of all patients matching the lead's mobile number.
/// The scan is a last resort and never runs when the payload identified
/// the record.
async fn resolve_existing_id<A: ClinicApi>(
    api: &A,
    ctx: &ConflictContext,
) -> Option<(String, ExistingIdSource)> {
    if let Some(body) = &ctx.error_body {
        if let Some(id) = id_from_body(body, "existing_id") {
            return Some((id, ExistingIdSource::ErrorPayload));
        }
        if let Some(id) = patient_id_from_body(body) {
            return Some((id, ExistingIdSource::ErrorPatientRecord));
        }
    }

    let response = match api.get_patients().await {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "patient scan failed during conflict resolution");
            return None;
        }
    };
    normalize::items(&response)
        .iter()
        .find(|item| {
            ["mobile", "phone"].iter().any(|key| {
                item.get(key).and_then(Value::as_str) == Some(ctx.mobile.as_str())
            })
        })
        .and_then(|item| item.get("id"))
        .and_then(normalize::id_string)
        .map(|id| (id, ExistingIdSource::MobileScan))
}

/// Link a lead to the existing patient after the operator confirmed.
///
/// When the patient is identified, its record gets the reverse link
/// (`lead_id`); a failed link write is logged and reported, not fatal.
/// The lead is then moved to `Converted - Active Patient` whether or not
/// the link landed; failure of that write propagates because the lead
/// would otherwise keep offering conversion for a patient that exists.
pub async fn link_existing<A: ClinicApi>(
    api: &A,
    ctx: &ConflictContext,
) -> Result<LinkOutcome, ConversionError> {
    let resolved = resolve_existing_id(api, ctx).await;

    let mut linked = false;
    if let Some((patient_id, source)) = &resolved {
        let payload = serde_json::json!({ "lead_id": ctx.lead_id });
        match api.update_patient(patient_id, &payload).await {
            Ok(_) => {
                linked = true;
                info!(patient_id = %patient_id, lead_id = %ctx.lead_id, source = ?source, "lead linked to existing patient");
            }
            Err(err) => {
                warn!(patient_id = %patient_id, error = %err, "reverse link write failed");
            }
        }
    } else {
        warn!(lead_id = %ctx.lead_id, "existing patient not identified; manual verification needed");
    }

    let payload = serde_json::json!({ "status": LeadStatus::ConvertedActivePatient.label() });
    api.update_lead(&ctx.lead_id, &payload)
        .await
        .map_err(ConversionError::LeadUpdate)?;

    let (existing_patient_id, source) = match resolved {
        Some((id, source)) => (Some(id), Some(source)),
        None => (None, None),
    };
    Ok(LinkOutcome {
        existing_patient_id,
        source,
        linked,
    })
}

/// Final result of [`convert_or_link`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionReport {
    Created(CreatedPatient),
    Linked(LinkOutcome),
    /// The operator declined the conflict prompt; nothing was written.
    Declined(ConflictContext),
}

/// Run the full workflow: attempt conversion, and on conflict consult
/// `confirm` (the operator prompt) before linking to the existing record.
pub async fn convert_or_link<A, F>(
    api: &A,
    form: &PatientForm,
    lead: &Lead,
    confirm: F,
) -> Result<ConversionReport, ConversionError>
where
    A: ClinicApi,
    F: FnOnce(&ConflictContext) -> bool,
{
    match convert(api, form, Some(lead)).await? {
        ConversionOutcome::Created(created) => Ok(ConversionReport::Created(created)),
        ConversionOutcome::Conflict(ctx) => {
            if confirm(&ctx) {
                let outcome = link_existing(api, &ctx).await?;
                Ok(ConversionReport::Linked(outcome))
            } else {
                info!(lead_id = %ctx.lead_id, "conflict link declined");
                Ok(ConversionReport::Declined(ctx))
            }
        }
    }
}
