//! Logic modules — translates a job's engine request into concrete engines.
//!
//! # Modules
//!
//! - `resolver` — Legacy selector defaults, overrides and table fallbacks

pub mod resolver;
