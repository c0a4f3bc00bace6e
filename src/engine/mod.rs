//! Engine modules — what each computing engine can run alongside.
//!
//! The relationship table sits between the resolver (which needs defaults)
//! and validation (which needs the supported combinations).

pub mod relationship;
