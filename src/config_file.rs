//! Engine request files for saving and loading resolver input.
//!
//! A request mirrors the keyword options a job configuration carries:
//! the legacy `work_mode`/`backend` selectors plus optional explicit engines.
//! Missing JSON fields take the request defaults; an explicit `null` clears
//! a field.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::engine::relationship::RelationshipTable;
use crate::logic::resolver::resolve_engines;
use crate::types::{
    Backend, ComputingEngine, EngineSelection, FederatedMode, FederationEngine, Selector,
    StorageEngine, WorkMode,
};

/// Resolver input: legacy selectors and explicit engine overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineRequest {
    // Legacy selectors (enum name or integer code)
    pub work_mode: Option<Selector<WorkMode>>,
    pub backend: Option<Selector<Backend>>,

    // Explicit overrides
    pub computing: Option<ComputingEngine>,
    pub federation: Option<FederationEngine>,
    pub storage: Option<StorageEngine>,
    pub federated_mode: Option<FederatedMode>,
}

impl EngineRequest {
    /// Create a request with the default selectors (STANDALONE, EGGROLL)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a request with every field unset, selectors included
    pub fn empty() -> Self {
        Self {
            work_mode: None,
            backend: None,
            computing: None,
            federation: None,
            storage: None,
            federated_mode: None,
        }
    }

    pub fn work_mode(mut self, work_mode: impl Into<Selector<WorkMode>>) -> Self {
        self.work_mode = Some(work_mode.into());
        self
    }

    pub fn backend(mut self, backend: impl Into<Selector<Backend>>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Drop both legacy selectors
    pub fn without_legacy(mut self) -> Self {
        self.work_mode = None;
        self.backend = None;
        self
    }

    pub fn computing(mut self, computing: ComputingEngine) -> Self {
        self.computing = Some(computing);
        self
    }

    pub fn federation(mut self, federation: FederationEngine) -> Self {
        self.federation = Some(federation);
        self
    }

    pub fn storage(mut self, storage: StorageEngine) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn federated_mode(mut self, federated_mode: FederatedMode) -> Self {
        self.federated_mode = Some(federated_mode);
        self
    }

    /// Resolve this request against a relationship table
    pub fn resolve(&self, table: &RelationshipTable) -> crate::error::Result<EngineSelection> {
        resolve_engines(self, table)
    }

    /// Save request to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize request to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write request to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load request from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read request from {:?}", path.as_ref()))?;

        let request: Self =
            serde_json::from_str(&content).context("Failed to parse request JSON")?;
        debug!(?request, path = %path.as_ref().display(), "Loaded engine request");

        Ok(request)
    }
}

impl Default for EngineRequest {
    fn default() -> Self {
        Self {
            work_mode: Some(Selector::Member(WorkMode::Standalone)),
            backend: Some(Selector::Member(Backend::Eggroll)),
            computing: None,
            federation: None,
            storage: None,
            federated_mode: None,
        }
    }
}
