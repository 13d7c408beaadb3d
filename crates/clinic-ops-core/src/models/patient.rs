//! Patient models.

use serde::{Deserialize, Serialize};

/// Patient gender as recorded by the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Display label, identical to the wire value.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Parse a label, tolerating case and surrounding whitespace.
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

impl Default for Gender {
    // Documented reconciliation default for records missing the field.
    fn default() -> Self {
        Gender::Female
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Clinical record status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    Active,
    Archived,
}

impl PatientStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PatientStatus::Active => "Active",
            PatientStatus::Archived => "Archived",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "active" => Some(PatientStatus::Active),
            "archived" => Some(PatientStatus::Archived),
            _ => None,
        }
    }
}

impl Default for PatientStatus {
    fn default() -> Self {
        PatientStatus::Active
    }
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A registered clinical record.
///
/// The lead→patient foreign key lives here: a patient created by
/// converting a lead carries that lead's id in `lead_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Backend record id
    pub id: String,
    /// Unique hospital identifier
    pub uhid: String,
    /// Patient name
    pub name: String,
    /// S/D/H/W of
    pub relation: Option<String>,
    pub marital_status: Option<String>,
    pub gender: Gender,
    /// Date of birth (YYYY-MM-DD)
    pub dob: Option<String>,
    pub age: Option<String>,
    pub aadhar: Option<String>,
    pub blood_group: Option<String>,
    // Contact / address
    pub house: Option<String>,
    pub street: Option<String>,
    pub area: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub email: Option<String>,
    pub mobile: String,
    // Referral & admin
    pub referral_doctor: Option<String>,
    pub hospital_address: Option<String>,
    /// Registration date (YYYY-MM-DD), used for descending sort
    pub registration_date: String,
    pub status: PatientStatus,
    /// Originating lead, when this record came from a conversion
    pub lead_id: Option<String>,
}

impl Patient {
    /// Create a patient with required fields; everything else defaulted.
    pub fn new(name: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            uhid: "-".into(),
            name: name.into(),
            relation: None,
            marital_status: None,
            gender: Gender::default(),
            dob: None,
            age: None,
            aadhar: None,
            blood_group: None,
            house: None,
            street: None,
            area: None,
            city: None,
            district: None,
            state: None,
            postal_code: None,
            email: None,
            mobile: mobile.into(),
            referral_doctor: None,
            hospital_address: None,
            registration_date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            status: PatientStatus::Active,
            lead_id: None,
        }
    }

    /// Whether this record was created by converting a lead.
    pub fn is_converted_from_lead(&self) -> bool {
        self.lead_id.is_some()
    }
}
