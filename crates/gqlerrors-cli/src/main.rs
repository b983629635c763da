//! GraphQL error formatting CLI.
//!
//! Provides the `gqlerrors` binary, which reads an error tree described in
//! JSON (see [`tree::ErrorTree`]) and prints the response envelope a client
//! would receive. Uses the same `gqlerrors_format` functions a server would
//! call, so the output matches what an endpoint returns.

mod error;
mod tree;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use gqlerrors_format::{normalize, ErrorResponse, FlattenConfig};

use crate::error::CliError;
use crate::tree::ErrorTree;

/// GraphQL error formatting tools.
#[derive(Parser)]
#[command(name = "gqlerrors", about = "GraphQL error formatting tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Expand aggregate errors into one record per leaf.
    Flatten {
        /// Error tree JSON file, or `-` for stdin.
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Maximum nesting of aggregate errors.
        #[arg(long, default_value_t = FlattenConfig::default().max_depth)]
        max_depth: usize,

        /// Print single-line JSON.
        #[arg(long)]
        compact: bool,
    },
    /// Normalize the top-level error into a single record.
    Normalize {
        /// Error tree JSON file, or `-` for stdin.
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Print single-line JSON.
        #[arg(long)]
        compact: bool,
    },
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Flatten {
            input,
            max_depth,
            compact,
        } => run_flatten(&input, FlattenConfig { max_depth }, compact),
        Commands::Normalize { input, compact } => run_normalize(&input, compact),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        process::exit(err.exit_code());
    }
}

/// Execute the flatten subcommand.
fn run_flatten(input: &Path, config: FlattenConfig, compact: bool) -> Result<(), CliError> {
    let tree = read_tree(input)?;
    let response = ErrorResponse::from_error(tree.build(), &config)?;
    tracing::info!("flattened into {} error record(s)", response.errors.len());
    print_json(&response, compact)
}

/// Execute the normalize subcommand.
fn run_normalize(input: &Path, compact: bool) -> Result<(), CliError> {
    let tree = read_tree(input)?;
    let response = ErrorResponse::from_records(vec![normalize(tree.build())]);
    print_json(&response, compact)
}

fn read_tree(input: &Path) -> Result<ErrorTree, CliError> {
    let raw = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };

    let tree: ErrorTree = serde_json::from_str(&raw)?;
    tracing::debug!("parsed error tree of depth {}", tree.depth());
    Ok(tree)
}

fn print_json(response: &ErrorResponse, compact: bool) -> Result<(), CliError> {
    let json = if compact {
        serde_json::to_string(response)?
    } else {
        serde_json::to_string_pretty(response)?
    };
    println!("{}", json);
    Ok(())
}
