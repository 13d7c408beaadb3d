//! Clinic-Ops Core Library
//!
//! Shared domain logic for the clinic operations client: canonical entity
//! shapes, the response-normalization boundary, and CSV bulk operations
//! for leads.
//!
//! # Architecture
//!
//! ```text
//! backend JSON ──▶ normalize::envelope ──▶ normalize::fields ──▶ models
//!   (any shape)      (flat item list)     (canonical records)      │
//!                                                                  │
//!                              csv::export ◀──────────────────────┤
//!                              csv::import ──▶ NewLead payloads ──▶ API
//! ```
//!
//! # Core Principle
//!
//! The backend's response envelopes and field naming are not contractually
//! fixed. All shape-sniffing and key reconciliation happens in [`normalize`],
//! once; everything downstream works against the canonical [`models`] only.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Lead, Patient, Appointment, etc.)
//! - [`normalize`]: Response-envelope and field-name normalization
//! - [`csv`]: Lead export/import in the fixed bulk-operations format

pub mod csv;
pub mod models;
pub mod normalize;

// Re-export commonly used types
pub use models::{
    Appointment, AppointmentStatus, ClinicalNote, Gender, Lead, LeadStatus, NewLead, Patient,
    PatientDocument, PatientStatus,
};
