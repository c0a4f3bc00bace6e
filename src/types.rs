//! Type-safe engine identifiers
//!
//! Every engine, mode and selector is a Rust enum so that resolution can
//! match exhaustively. Names display and serialize in SCREAMING_SNAKE_CASE
//! (`SPARK_RABBITMQ`, `LINKIS_HIVE`) and parse case-insensitively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

// ============================================================================
// Legacy selectors
// ============================================================================

/// Enums that also have a stable integer code.
///
/// Older job configurations pass `work_mode` and `backend` as plain integers,
/// so both selectors can be built from either form.
pub trait LegacyCode: Copy + Sized {
    /// Look up the member with this integer code
    fn from_code(code: i64) -> Option<Self>;

    /// Integer code of this member
    fn code(self) -> i64;
}

/// Execution mode: single machine or multi-node cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum WorkMode {
    #[default]
    Standalone = 0,
    Cluster = 1,
}

impl WorkMode {
    pub fn is_standalone(&self) -> bool {
        matches!(self, Self::Standalone)
    }

    pub fn is_cluster(&self) -> bool {
        matches!(self, Self::Cluster)
    }
}

impl LegacyCode for WorkMode {
    fn from_code(code: i64) -> Option<Self> {
        Self::iter().find(|mode| mode.code() == code)
    }

    fn code(self) -> i64 {
        self as i64
    }
}

/// Legacy backend bundle (computing + federation technology)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Backend {
    #[default]
    Eggroll = 0,
    SparkRabbitmq = 1,
    SparkPulsar = 2,
    /// Recognised, but has no default engine pair
    LinkisSparkRabbitmq = 3,
}

impl Backend {
    pub fn is_eggroll(&self) -> bool {
        matches!(self, Self::Eggroll)
    }

    /// Check if this backend computes on Spark (plain or through Linkis)
    pub fn is_spark(&self) -> bool {
        matches!(
            self,
            Self::SparkRabbitmq | Self::SparkPulsar | Self::LinkisSparkRabbitmq
        )
    }
}

impl LegacyCode for Backend {
    fn from_code(code: i64) -> Option<Self> {
        Self::iter().find(|backend| backend.code() == code)
    }

    fn code(self) -> i64 {
        self as i64
    }
}

/// A legacy selector as the caller supplied it: an enum member or its code.
///
/// Deserializes from either `"CLUSTER"` or `1`, and parses from text the
/// same way. [`Selector::normalize`] is the single point where the raw form
/// is turned into the strict enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selector<T> {
    Member(T),
    Code(i64),
}

impl<T: LegacyCode> Selector<T> {
    /// Resolve to the enum member; `None` for an unknown integer code
    pub fn normalize(self) -> Option<T> {
        match self {
            Self::Member(member) => Some(member),
            Self::Code(code) => T::from_code(code),
        }
    }
}

impl<T: LegacyCode> From<T> for Selector<T> {
    fn from(member: T) -> Self {
        Self::Member(member)
    }
}

impl From<i64> for Selector<WorkMode> {
    fn from(code: i64) -> Self {
        Self::Code(code)
    }
}

impl From<i64> for Selector<Backend> {
    fn from(code: i64) -> Self {
        Self::Code(code)
    }
}

impl<T: LegacyCode + fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member(member) => write!(f, "{}", member),
            Self::Code(code) => match T::from_code(*code) {
                Some(member) => write!(f, "{}", member),
                None => write!(f, "{}", code),
            },
        }
    }
}

impl<T: LegacyCode + FromStr> FromStr for Selector<T> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return Ok(Self::Code(code));
        }
        T::from_str(s)
            .map(Self::Member)
            .map_err(|_| format!("unrecognized selector value '{}'", s))
    }
}

// ============================================================================
// Engines
// ============================================================================

/// Kind of engine, used as a relationship key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EngineType {
    Computing,
    Federation,
    Storage,
}

/// Execution substrate for data processing tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ComputingEngine {
    Eggroll,
    Spark,
    LinkisSpark,
    Standalone,
}

/// Transport for cross-party communication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum FederationEngine {
    Eggroll,
    Rabbitmq,
    Standalone,
    Pulsar,
}

/// Persistence substrate for intermediate data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum StorageEngine {
    Standalone,
    Eggroll,
    Hdfs,
    Mysql,
    Simple,
    Path,
    Hive,
    LinkisHive,
    Localfs,
}

/// Whether federation spans one logical party or several
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum FederatedMode {
    Single,
    Multiple,
}

impl FederatedMode {
    /// Default mode for a federation engine: only STANDALONE is single-party
    pub fn for_federation(federation: FederationEngine) -> Self {
        match federation {
            FederationEngine::Standalone => Self::Single,
            _ => Self::Multiple,
        }
    }
}

// ============================================================================
// Resolution result
// ============================================================================

/// A fully resolved engine configuration.
///
/// All four fields are always present; a resolution that cannot fill one of
/// them fails instead of returning a partial selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineSelection {
    pub computing: ComputingEngine,
    pub federation: FederationEngine,
    pub storage: StorageEngine,
    pub federated_mode: FederatedMode,
}

impl EngineSelection {
    /// Key/value pairs in output order, for `key=value` style printing
    pub fn entries(&self) -> [(&'static str, String); 4] {
        [
            ("computing", self.computing.to_string()),
            ("federation", self.federation.to_string()),
            ("storage", self.storage.to_string()),
            ("federated_mode", self.federated_mode.to_string()),
        ]
    }
}

impl fmt::Display for EngineSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "computing={} federation={} storage={} federated_mode={}",
            self.computing, self.federation, self.storage, self.federated_mode
        )
    }
}
