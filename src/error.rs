//! Error handling module for engine resolution
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Resolution, relationship lookups and compatibility checks all report
//! through [`EngineError`].

use thiserror::Error;

use crate::types::{ComputingEngine, EngineType};

/// Main error type for engine resolution
#[derive(Error, Debug)]
pub enum EngineError {
    /// Neither a computing engine nor both legacy selectors were given
    #[error("must provide computing engine parameters or work_mode and backend parameters")]
    MissingInput,

    /// The (work_mode, backend) pair has no default engines
    #[error("unable to find default engines by work_mode: {work_mode} backend: {backend}")]
    UnsupportedCombination { work_mode: String, backend: String },

    /// Federation was given explicitly but computing was not
    #[error("computing engine could not be resolved: federation was given without computing")]
    UnresolvedComputing,

    /// The relationship table has no entry for this computing engine
    #[error("no {engine_type} relationship for computing engine {computing}")]
    MissingRelationship {
        computing: ComputingEngine,
        engine_type: EngineType,
    },

    /// A resolved engine is not supported by the computing engine
    #[error("{engine_type} engine {engine} is not supported by computing engine {computing}")]
    Incompatible {
        engine_type: EngineType,
        engine: String,
        computing: ComputingEngine,
    },

    /// Relationship table failed validation
    #[error("Invalid relationship table: {0}")]
    InvalidTable(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

// Convenient error constructors
impl EngineError {
    /// Create an unsupported-combination error from anything displayable
    pub fn unsupported(work_mode: impl ToString, backend: impl ToString) -> Self {
        Self::UnsupportedCombination {
            work_mode: work_mode.to_string(),
            backend: backend.to_string(),
        }
    }

    /// Create a missing-relationship error
    pub fn missing_relationship(computing: ComputingEngine, engine_type: EngineType) -> Self {
        Self::MissingRelationship {
            computing,
            engine_type,
        }
    }

    /// Create an incompatibility error
    pub fn incompatible(
        engine_type: EngineType,
        engine: impl ToString,
        computing: ComputingEngine,
    ) -> Self {
        Self::Incompatible {
            engine_type,
            engine: engine.to_string(),
            computing,
        }
    }

    /// Create an invalid-table error
    pub fn invalid_table(msg: impl Into<String>) -> Self {
        Self::InvalidTable(msg.into())
    }

    /// True for errors caused by the caller's input rather than table data
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingInput | Self::UnsupportedCombination { .. } | Self::UnresolvedComputing
        )
    }
}
