//! FATE Engines - Main entry point
//!
//! Resolves engine configurations from the command line.

use anyhow::Result;
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::filter::EnvFilter;

use fate_engines::cli::{Cli, Commands, ResolveArgs};
use fate_engines::{EngineRequest, RelationshipTable};

/// Initialize tracing with appropriate settings
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    // RUST_LOG overrides the flag-derived level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);
    debug!("CLI arguments parsed");

    match cli.command {
        Commands::Resolve(args) => run_resolve(&args)?,
        Commands::Validate { request, table } => run_validate(&request, table.as_deref())?,
        Commands::Relationships { table } => {
            let table = load_table(table.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
    }

    Ok(())
}

/// Built-in table unless a file is given
fn load_table(path: Option<&Path>) -> Result<RelationshipTable> {
    match path {
        Some(path) => RelationshipTable::load_from_file(path),
        None => {
            debug!("Using built-in relationship table");
            Ok(RelationshipTable::builtin())
        }
    }
}

fn run_resolve(args: &ResolveArgs) -> Result<()> {
    let base = match &args.request {
        Some(path) => {
            info!("Loading request from: {:?}", path);
            EngineRequest::load_from_file(path)?
        }
        None => EngineRequest::default(),
    };
    let request = args.apply_to(base);
    let table = load_table(args.table.as_deref())?;
    debug!(?request, "Resolving engines");

    let selection = match request.resolve(&table) {
        Ok(selection) => selection,
        Err(e) => {
            error!("Engine resolution failed: {}", e);
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    if args.strict {
        if let Err(e) = table.check_selection(&selection) {
            error!("Resolved engines are incompatible: {}", e);
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }

    info!(%selection, "Resolved engines");
    println!("{}", args.format.render(&selection)?);

    Ok(())
}

fn run_validate(request_path: &Path, table_path: Option<&Path>) -> Result<()> {
    info!("Validating request file: {:?}", request_path);

    let request = match EngineRequest::load_from_file(request_path) {
        Ok(request) => request,
        Err(e) => {
            error!("Failed to load request file: {:#}", e);
            eprintln!("✗ Failed to load request file: {:#}", e);
            std::process::exit(1);
        }
    };
    let table = load_table(table_path)?;

    let checked = request
        .resolve(&table)
        .and_then(|selection| table.check_selection(&selection).map(|_| selection));

    match checked {
        Ok(selection) => {
            info!("Request validation successful");
            println!("✓ Request is valid: {}", selection);
        }
        Err(e) => {
            error!("Request validation failed: {}", e);
            eprintln!("✗ Request validation failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
