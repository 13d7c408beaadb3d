//! Domain types for clinic operations.

mod appointment;
mod chat;
mod document;
mod lead;
mod metrics;
mod note;
mod patient;

pub use appointment::*;
pub use chat::*;
pub use document::*;
pub use lead::*;
pub use metrics::*;
pub use note::*;
pub use patient::*;
