//! FATE Engine Resolution Library
//!
//! Resolves the computing, federation and storage engines of a federated
//! job from legacy `work_mode`/`backend` selectors and explicit overrides.

pub mod cli;
pub mod config_file;
pub mod engine;
pub mod error;
pub mod logic;
pub mod types;

// Re-export main types for convenience
pub use config_file::EngineRequest;
pub use error::{EngineError, Result};
pub use types::{
    Backend, ComputingEngine, EngineSelection, EngineType, FederatedMode, FederationEngine,
    LegacyCode, Selector, StorageEngine, WorkMode,
};

// Relationship table
pub use engine::relationship::{Association, ComputingRelations, RelationshipTable};

// Resolver
pub use logic::resolver::{default_engines, resolve_engines};
