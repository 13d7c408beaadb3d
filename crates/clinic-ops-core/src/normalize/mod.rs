//! Typed normalization boundary over backend responses.
//!
//! The backend's envelope shape and field naming vary across endpoints
//! and versions. This module absorbs that instability in one place:
//! [`envelope`] flattens any response shape into items, [`fields`]
//! reconciles camel/snake keys into the canonical models with documented
//! defaults. Nothing downstream branches on raw JSON.

mod envelope;
mod fields;

pub use envelope::*;
pub use fields::*;
