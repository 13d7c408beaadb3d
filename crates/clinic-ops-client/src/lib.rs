//! Async client for the clinic operations backend.
//!
//! Layers on top of `clinic_ops_core`:
//!
//! ```text
//!   api (reqwest)  ──►  raw Value envelopes
//!         │
//!         ▼
//!   clinic_ops_core::normalize  ──►  canonical models
//!         │
//!         ▼
//!   workflows: convert, import, profile, tower, session
//! ```
//!
//! Workflows are generic over the [`ClinicApi`] trait so tests exercise
//! them against an in-memory mock instead of a network.

pub mod api;
pub mod convert;
pub mod error;
pub mod import;
pub mod profile;
pub mod session;
pub mod tower;

pub use api::{ClinicApi, HttpClient};
pub use convert::{
    convert, convert_or_link, link_existing, ConflictContext, ConversionError, ConversionOutcome,
    ConversionReport, CreatedPatient, ExistingIdSource, LeadStatusUpdate, LinkOutcome, PatientForm,
};
pub use error::{ApiError, ApiResult};
pub use import::{import_leads, ImportReport};
pub use profile::{load_profile, PatientProfile};
pub use session::{Session, SessionError, SessionStore};
pub use tower::{ControlTower, TowerOptions, TowerSnapshot};
