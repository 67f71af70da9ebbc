//! CLI entry point for `sqlgate`.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::{Value, json};
use sqlgate::config::CompilerConfig;
use sqlgate::filter::fallback::StandardCompiler;
use sqlgate::filter::{
    ColumnDescriptor, FilterCondition, FilterContext, HandlerRegistry, build_where_clause,
};
use sqlgate::permission::{BulkPermissionBuilder, parse_results_json};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sqlgate",
    about = "Compile filter conditions and permission checks into parameterized PostgreSQL"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON compiler config (permission schema, timezone)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compile `{columns, conditions}` into a WHERE-clause expression
    Filter {
        /// Input JSON file (stdin when omitted)
        input: Option<PathBuf>,
    },
    /// Compile a JSON array of permission checks into one batched query
    Permissions {
        /// Input JSON file (stdin when omitted)
        input: Option<PathBuf>,
    },
    /// Decode a JSON array of `{key, type, result}` rows
    Decode {
        /// Input JSON file (stdin when omitted)
        input: Option<PathBuf>,
    },
}

#[derive(Deserialize)]
struct FilterRequest {
    columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    conditions: Vec<FilterCondition>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => match CompilerConfig::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {e}");
                process::exit(2);
            }
        },
        None => CompilerConfig::default(),
    };

    match run(&cli.command, &config) {
        Ok(output) => println!("{output:#}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: &Command, config: &CompilerConfig) -> Result<Value, String> {
    match command {
        Command::Filter { input } => {
            let request: FilterRequest = serde_json::from_str(&read_input(input.as_deref())?)
                .map_err(|e| format!("Invalid filter request JSON: {e}"))?;
            let context = FilterContext::new(request.columns);
            let registry = HandlerRegistry::with_defaults(config.timezone);
            let where_sql = build_where_clause(
                &request.conditions,
                &context,
                &registry,
                &StandardCompiler,
                &config.timezone,
                Utc::now(),
            )
            .map_err(|e| e.to_string())?;
            Ok(json!({ "where": where_sql }))
        }
        Command::Permissions { input } => {
            let checks: Vec<Value> = serde_json::from_str(&read_input(input.as_deref())?)
                .map_err(|e| format!("Invalid permission checks JSON: {e}"))?;
            let query = BulkPermissionBuilder::from_config(config)
                .build_query_from_json(&checks)
                .map_err(|e| e.to_string())?;
            serde_json::to_value(query).map_err(|e| e.to_string())
        }
        Command::Decode { input } => {
            let results =
                parse_results_json(&read_input(input.as_deref())?).map_err(|e| e.to_string())?;
            serde_json::to_value(results).map_err(|e| e.to_string())
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading {}: {e}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Error reading stdin: {e}"))?;
            Ok(buf)
        }
    }
}
