//! Lead models.

use serde::{Deserialize, Serialize};

use super::patient::Gender;

/// CRM status of a lead.
///
/// The client does not enforce transitions: any status may be set from
/// any other. Conversion is the one action expected to land a lead on
/// `Converted - Active Patient`, exactly once its linked patient exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    #[serde(rename = "New Inquiry")]
    NewInquiry,
    Contacted,
    #[serde(rename = "Stalling - Sent to CRO")]
    StallingSentToCro,
    #[serde(rename = "Converted - Active Patient")]
    ConvertedActivePatient,
    Lost,
}

impl LeadStatus {
    /// Display label, identical to the wire value.
    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::NewInquiry => "New Inquiry",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::StallingSentToCro => "Stalling - Sent to CRO",
            LeadStatus::ConvertedActivePatient => "Converted - Active Patient",
            LeadStatus::Lost => "Lost",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim() {
            "New Inquiry" => Some(LeadStatus::NewInquiry),
            "Contacted" => Some(LeadStatus::Contacted),
            "Stalling - Sent to CRO" => Some(LeadStatus::StallingSentToCro),
            "Converted - Active Patient" => Some(LeadStatus::ConvertedActivePatient),
            "Lost" => Some(LeadStatus::Lost),
            _ => None,
        }
    }
}

impl Default for LeadStatus {
    fn default() -> Self {
        LeadStatus::NewInquiry
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A prospective patient inquiry prior to clinical registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub age: Option<String>,
    pub gender: Option<Gender>,
    /// Presenting problem as captured at intake
    pub problem: Option<String>,
    /// Doctor seen at camp, if any
    pub treatment_doctor: Option<String>,
    pub treatment_suggested: Option<String>,
    /// Acquisition channel (Walk-In, Camp, Online, ...)
    pub source: String,
    pub inquiry: String,
    pub status: LeadStatus,
    pub date_added: String,
    pub email: Option<String>,
}

impl Lead {
    pub fn is_converted(&self) -> bool {
        self.status == LeadStatus::ConvertedActivePatient
    }
}

/// Creation payload for a lead.
///
/// Only populated optional fields are sent; the backend treats absent and
/// empty differently for some columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLead {
    pub name: String,
    pub phone: String,
    pub source: String,
    pub inquiry: String,
    pub status: LeadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    pub date_added: String,
}

impl NewLead {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            source: "Unknown".into(),
            inquiry: "Manual Entry".into(),
            status: LeadStatus::NewInquiry,
            gender: None,
            age: None,
            problem: None,
            date_added: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Request body for the create endpoint.
    pub fn payload(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert("name".into(), self.name.clone().into());
        body.insert("phone".into(), self.phone.clone().into());
        body.insert("source".into(), self.source.clone().into());
        body.insert("inquiry".into(), self.inquiry.clone().into());
        body.insert("status".into(), self.status.label().into());
        body.insert("date_added".into(), self.date_added.clone().into());
        if let Some(gender) = self.gender {
            body.insert("gender".into(), gender.label().into());
        }
        if let Some(age) = &self.age {
            body.insert("age".into(), age.clone().into());
        }
        if let Some(problem) = &self.problem {
            body.insert("problem".into(), problem.clone().into());
        }
        serde_json::Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_round_trip() {
        for status in [
            LeadStatus::NewInquiry,
            LeadStatus::Contacted,
            LeadStatus::StallingSentToCro,
            LeadStatus::ConvertedActivePatient,
            LeadStatus::Lost,
        ] {
            assert_eq!(LeadStatus::from_label(status.label()), Some(status));
        }
    }

    #[test]
    fn test_status_serde_uses_labels() {
        let json = serde_json::to_string(&LeadStatus::StallingSentToCro).unwrap();
        assert_eq!(json, "\"Stalling - Sent to CRO\"");
    }

    #[test]
    fn test_new_lead_payload_skips_empty_optionals() {
        let lead = NewLead::new("Ramesh Gupta", "9000000001");
        let payload = lead.payload();
        assert_eq!(payload["name"], "Ramesh Gupta");
        assert_eq!(payload["status"], "New Inquiry");
        assert!(payload.get("gender").is_none());
        assert!(payload.get("problem").is_none());
    }

    #[test]
    fn test_new_lead_payload_includes_populated_optionals() {
        let mut lead = NewLead::new("Ramesh Gupta", "9000000001");
        lead.gender = Some(Gender::Male);
        lead.age = Some("34".into());
        let payload = lead.payload();
        assert_eq!(payload["gender"], "Male");
        assert_eq!(payload["age"], "34");
    }
}
