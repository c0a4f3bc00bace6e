use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config_file::EngineRequest;
use crate::types::{
    Backend, ComputingEngine, EngineSelection, FederatedMode, FederationEngine, Selector,
    StorageEngine, WorkMode,
};

/// FATE engine resolver - picks computing, federation and storage engines
#[derive(Parser)]
#[command(name = "fate-engines")]
#[command(about = "Resolve computing, federation and storage engines for a federated job")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve engines from selectors, overrides or a request file
    Resolve(ResolveArgs),
    /// Resolve a request file and check the result against the relationship table
    Validate {
        /// Path to the JSON request file
        request: PathBuf,
        /// Relationship table JSON (defaults to the built-in table)
        #[arg(short, long)]
        table: Option<PathBuf>,
    },
    /// Print the relationship table as JSON
    Relationships {
        /// Relationship table JSON (defaults to the built-in table)
        #[arg(short, long)]
        table: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Legacy work mode: STANDALONE, CLUSTER or an integer code
    #[arg(short, long)]
    pub work_mode: Option<Selector<WorkMode>>,
    /// Legacy backend: EGGROLL, SPARK_RABBITMQ, SPARK_PULSAR or an integer code
    #[arg(short, long)]
    pub backend: Option<Selector<Backend>>,
    /// Unset both legacy selectors (requires an explicit computing engine)
    #[arg(long, conflicts_with_all = ["work_mode", "backend"])]
    pub no_legacy: bool,
    /// Explicit computing engine
    #[arg(short, long)]
    pub computing: Option<ComputingEngine>,
    /// Explicit federation engine
    #[arg(short, long)]
    pub federation: Option<FederationEngine>,
    /// Explicit storage engine
    #[arg(short, long)]
    pub storage: Option<StorageEngine>,
    /// Explicit federated mode (SINGLE or MULTIPLE)
    #[arg(short = 'm', long)]
    pub federated_mode: Option<FederatedMode>,
    /// JSON request file used as the base; flags override its fields
    #[arg(short, long)]
    pub request: Option<PathBuf>,
    /// Relationship table JSON (defaults to the built-in table)
    #[arg(short, long)]
    pub table: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
    /// Also check the selection against the table's supported engines
    #[arg(long)]
    pub strict: bool,
}

impl ResolveArgs {
    /// Overlay the command-line flags on a base request
    pub fn apply_to(&self, mut request: EngineRequest) -> EngineRequest {
        if self.no_legacy {
            request = request.without_legacy();
        }
        if let Some(work_mode) = self.work_mode {
            request.work_mode = Some(work_mode);
        }
        if let Some(backend) = self.backend {
            request.backend = Some(backend);
        }
        if let Some(computing) = self.computing {
            request.computing = Some(computing);
        }
        if let Some(federation) = self.federation {
            request.federation = Some(federation);
        }
        if let Some(storage) = self.storage {
            request.storage = Some(storage);
        }
        if let Some(federated_mode) = self.federated_mode {
            request.federated_mode = Some(federated_mode);
        }
        request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON object
    Json,
    /// One `key=value` line per engine
    Text,
}

impl OutputFormat {
    pub fn render(&self, selection: &EngineSelection) -> serde_json::Result<String> {
        match self {
            Self::Json => serde_json::to_string_pretty(selection),
            Self::Text => Ok(selection
                .entries()
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
