//! Appointment models.

use serde::{Deserialize, Serialize};

/// Scheduling state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Arrived,
    #[serde(rename = "Checked-In")]
    CheckedIn,
    Completed,
    Canceled,
    Expected,
}

impl AppointmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Arrived => "Arrived",
            AppointmentStatus::CheckedIn => "Checked-In",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Canceled => "Canceled",
            AppointmentStatus::Expected => "Expected",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim() {
            "Scheduled" => Some(AppointmentStatus::Scheduled),
            "Arrived" => Some(AppointmentStatus::Arrived),
            "Checked-In" => Some(AppointmentStatus::CheckedIn),
            "Completed" => Some(AppointmentStatus::Completed),
            "Canceled" => Some(AppointmentStatus::Canceled),
            "Expected" => Some(AppointmentStatus::Expected),
            _ => None,
        }
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Scheduled
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A scheduled visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: String,
    /// Links to the patient profile when known
    pub patient_id: Option<String>,
    pub patient_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    /// Visit date (YYYY-MM-DD); history views sort descending on this
    pub date: String,
    pub time: String,
    /// Consult, Scan, etc.
    #[serde(rename = "type")]
    pub kind: String,
    pub status: AppointmentStatus,
}
