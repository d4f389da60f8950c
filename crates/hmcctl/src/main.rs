use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hmc::engine::LAST_SEGMENT;
use hmcctl::cmd_decode;
use hmcctl::cmd_links;
use hmcctl::cmd_query;
use hmcctl::cmd_types;

#[derive(Parser, Debug)]
#[command(name = "hmcctl", version, about = "Inspect saved HMC REST response documents")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Output JSON where applicable
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Decode an entry or feed document into typed records
    Decode {
        /// Document path, or `-` for stdin
        file: PathBuf,
        /// Only keep entries of this type
        #[arg(long = "type")]
        type_name: Option<String>,
        /// Fail on entries of unregistered types instead of skipping them
        #[arg(long)]
        strict: bool,
    },
    /// List registered entity types and their fields
    Types,
    /// Evaluate a path expression against a document
    Query {
        file: PathBuf,
        #[arg(long)]
        path: String,
        /// Print this attribute instead of the element text
        #[arg(long)]
        attr: Option<String>,
    },
    /// Resolve identifiers from the links under a collection element
    Links {
        file: PathBuf,
        #[arg(long)]
        path: String,
        /// Path segment to take, counted from the end (1 = last)
        #[arg(long, default_value_t = LAST_SEGMENT)]
        from_end: usize,
    },
}

fn main() -> Result<()> {
    let Cli { verbose, json, cmd } = Cli::parse();

    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.into()),
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cmd {
        Cmd::Decode {
            file,
            type_name,
            strict,
        } => cmd_decode::run(file, type_name, strict, json)?,
        Cmd::Types => cmd_types::run(json)?,
        Cmd::Query { file, path, attr } => cmd_query::run(file, path, attr, json)?,
        Cmd::Links {
            file,
            path,
            from_end,
        } => cmd_links::run(file, path, from_end, json)?,
    };

    Ok(())
}
