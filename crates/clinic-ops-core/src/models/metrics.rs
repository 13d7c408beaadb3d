//! Control tower metric shapes.
//!
//! Each struct deserializes leniently: camelCase aliases accepted,
//! missing fields defaulted, so a partial backend payload still renders.

use serde::{Deserialize, Serialize};

/// Today's patient flow counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PatientFlowSummary {
    pub scheduled: u32,
    pub arrived: u32,
    #[serde(alias = "checkedIn")]
    pub checked_in: u32,
    pub completed: u32,
}

/// Lead pipeline counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LeadSnapshot {
    pub new: u32,
    pub contacted: u32,
    pub stalling: u32,
    pub converted: u32,
}

/// A patient who has been waiting too long.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WaitingAlert {
    pub message: String,
    #[serde(alias = "patientName")]
    pub patient_name: String,
    pub doctor: String,
    pub minutes: u32,
}

/// One entry in the live waiting queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QueueEntry {
    #[serde(alias = "patientName")]
    pub patient_name: String,
    pub doctor: String,
    pub status: String,
    #[serde(alias = "waitingMinutes")]
    pub waiting_minutes: u32,
}

/// Per-doctor load for the day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DoctorUtilization {
    #[serde(alias = "doctorName")]
    pub doctor_name: String,
    pub total: u32,
    pub completed: u32,
    pub pending: u32,
}
