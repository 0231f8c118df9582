//! Language-specific analyzers.
//!
//! - [`japanese`] - Japanese text analysis over a morpheme source

pub mod japanese;
