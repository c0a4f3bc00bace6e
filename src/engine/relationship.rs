//! Engine Relationship Table
//!
//! Records, for every computing engine, which storage and federation engines
//! it works with and which of those is the default.
//!
//! # Built-in Relationships
//!
//! | Computing     | Storage (default / support)   | Federation (default / support) |
//! |---------------|-------------------------------|--------------------------------|
//! | EGGROLL       | EGGROLL / EGGROLL             | EGGROLL / EGGROLL              |
//! | STANDALONE    | STANDALONE / STANDALONE       | STANDALONE / STANDALONE        |
//! | SPARK         | HDFS / HDFS, HIVE, LOCALFS    | RABBITMQ / PULSAR, RABBITMQ    |
//! | LINKIS_SPARK  | LINKIS_HIVE / LINKIS_HIVE     | RABBITMQ / PULSAR, RABBITMQ    |
//!
//! # Design
//!
//! - **Explicit data**: The table is a value handed to the resolver, never a global
//! - **Loadable**: Deployments can replace the built-in table with a JSON file
//! - **Validated**: Every default must appear in its own support list

use anyhow::{Context, Result as AnyResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::types::{ComputingEngine, EngineSelection, EngineType, FederationEngine, StorageEngine};

// ============================================================================
// Table Types
// ============================================================================

/// Default engine plus every engine that is known to work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association<E> {
    pub default: E,
    pub support: Vec<E>,
}

impl<E: PartialEq> Association<E> {
    pub fn new(default: E, support: Vec<E>) -> Self {
        Self { default, support }
    }

    pub fn supports(&self, engine: &E) -> bool {
        self.support.contains(engine)
    }

    fn is_consistent(&self) -> bool {
        !self.support.is_empty() && self.supports(&self.default)
    }
}

/// Storage and federation associations of one computing engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputingRelations {
    pub storage: Association<StorageEngine>,
    pub federation: Association<FederationEngine>,
}

/// Relationship table keyed by computing engine.
///
/// Serializes as `{"SPARK": {"storage": {"default": ..., "support": [...]}, ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipTable {
    computing: BTreeMap<ComputingEngine, ComputingRelations>,
}

impl RelationshipTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The relationships shipped with the crate
    pub fn builtin() -> Self {
        use FederationEngine as F;
        use StorageEngine as S;

        let mut table = Self::new();
        table.insert(
            ComputingEngine::Eggroll,
            ComputingRelations {
                storage: Association::new(S::Eggroll, vec![S::Eggroll]),
                federation: Association::new(F::Eggroll, vec![F::Eggroll]),
            },
        );
        table.insert(
            ComputingEngine::Standalone,
            ComputingRelations {
                storage: Association::new(S::Standalone, vec![S::Standalone]),
                federation: Association::new(F::Standalone, vec![F::Standalone]),
            },
        );
        table.insert(
            ComputingEngine::Spark,
            ComputingRelations {
                storage: Association::new(S::Hdfs, vec![S::Hdfs, S::Hive, S::Localfs]),
                federation: Association::new(F::Rabbitmq, vec![F::Pulsar, F::Rabbitmq]),
            },
        );
        table.insert(
            ComputingEngine::LinkisSpark,
            ComputingRelations {
                storage: Association::new(S::LinkisHive, vec![S::LinkisHive]),
                federation: Association::new(F::Rabbitmq, vec![F::Pulsar, F::Rabbitmq]),
            },
        );
        table
    }

    /// Add or replace the relations of a computing engine
    pub fn insert(
        &mut self,
        computing: ComputingEngine,
        relations: ComputingRelations,
    ) -> Option<ComputingRelations> {
        self.computing.insert(computing, relations)
    }

    /// Computing engines present in the table, in declaration order
    pub fn computing_engines(&self) -> impl Iterator<Item = ComputingEngine> + '_ {
        self.computing.keys().copied()
    }

    fn relations(
        &self,
        computing: ComputingEngine,
        engine_type: EngineType,
    ) -> Result<&ComputingRelations> {
        self.computing
            .get(&computing)
            .ok_or_else(|| EngineError::missing_relationship(computing, engine_type))
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Default storage engine for a computing engine
    pub fn default_storage(&self, computing: ComputingEngine) -> Result<StorageEngine> {
        Ok(self.relations(computing, EngineType::Storage)?.storage.default)
    }

    /// Default federation engine for a computing engine
    pub fn default_federation(&self, computing: ComputingEngine) -> Result<FederationEngine> {
        Ok(self
            .relations(computing, EngineType::Federation)?
            .federation
            .default)
    }

    pub fn supported_storage(&self, computing: ComputingEngine) -> Result<&[StorageEngine]> {
        Ok(self
            .relations(computing, EngineType::Storage)?
            .storage
            .support
            .as_slice())
    }

    pub fn supported_federation(&self, computing: ComputingEngine) -> Result<&[FederationEngine]> {
        Ok(self
            .relations(computing, EngineType::Federation)?
            .federation
            .support
            .as_slice())
    }

    // ========================================================================
    // Checks
    // ========================================================================

    /// Check that a selection's storage and federation engines are supported
    /// by its computing engine.
    ///
    /// Resolution never calls this: explicit overrides are taken as given.
    pub fn check_selection(&self, selection: &EngineSelection) -> Result<()> {
        let storage = &self.relations(selection.computing, EngineType::Storage)?.storage;
        if !storage.supports(&selection.storage) {
            return Err(EngineError::incompatible(
                EngineType::Storage,
                selection.storage,
                selection.computing,
            ));
        }

        let federation = &self
            .relations(selection.computing, EngineType::Federation)?
            .federation;
        if !federation.supports(&selection.federation) {
            return Err(EngineError::incompatible(
                EngineType::Federation,
                selection.federation,
                selection.computing,
            ));
        }

        Ok(())
    }

    /// Validate internal consistency: non-empty support lists that contain
    /// their own defaults.
    pub fn validate(&self) -> Result<()> {
        if self.computing.is_empty() {
            return Err(EngineError::invalid_table("table has no computing engines"));
        }

        for (computing, relations) in &self.computing {
            if !relations.storage.is_consistent() {
                return Err(EngineError::invalid_table(format!(
                    "{} storage default {} is not in its support list",
                    computing, relations.storage.default
                )));
            }
            if !relations.federation.is_consistent() {
                return Err(EngineError::invalid_table(format!(
                    "{} federation default {} is not in its support list",
                    computing, relations.federation.default
                )));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Save the table to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> AnyResult<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize relationship table to JSON")?;

        fs::write(&path, json).with_context(|| {
            format!("Failed to write relationship table to {:?}", path.as_ref())
        })?;

        Ok(())
    }

    /// Load and validate a table from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> AnyResult<Self> {
        let content = fs::read_to_string(&path).with_context(|| {
            format!("Failed to read relationship table from {:?}", path.as_ref())
        })?;

        let table: Self =
            serde_json::from_str(&content).context("Failed to parse relationship table JSON")?;
        table.validate()?;

        info!(
            path = %path.as_ref().display(),
            engines = table.computing.len(),
            "Loaded relationship table"
        );
        debug!(?table, "Relationship table contents");

        Ok(table)
    }
}
