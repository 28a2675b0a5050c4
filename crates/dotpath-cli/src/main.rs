mod cmd_get;
mod cmd_paths;
mod cmd_set;
mod document;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotpath::v1::Kind;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "dotpath")]
#[command(about = "Read, write, and list dot-delimited paths in JSON documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the value at a path
    Get {
        /// Dot-delimited path, e.g. "items.0.name"
        path: String,

        /// Input file (default: stdin, also "-")
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Set the value at a path, creating missing intermediate objects
    Set {
        /// Dot-delimited path, e.g. "server.tls.enabled"
        path: String,

        /// New value as JSON
        value: String,

        /// Input file (default: stdin, also "-")
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write the result here instead of stdout
        #[arg(short, long, conflicts_with = "in_place")]
        output: Option<PathBuf>,

        /// Write the result back to the input file
        #[arg(long)]
        in_place: bool,

        /// Store VALUE as a literal string instead of parsing it as JSON
        #[arg(long)]
        string: bool,
    },
    /// List every path present in a document
    Paths {
        /// Input file (default: stdin, also "-")
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Only list paths whose value is of this kind
        /// (null, bool, number, string, array, object)
        #[arg(long)]
        kind: Option<Kind>,

        /// Output as a JSON array
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Get { path, input } => cmd_get::run(path, input, cli.pretty),
        Commands::Set {
            path,
            value,
            input,
            output,
            in_place,
            string,
        } => cmd_set::run(
            cmd_set::SetArgs {
                path,
                value,
                input,
                output,
                in_place,
                string,
            },
            cli.pretty,
        ),
        Commands::Paths { input, kind, json } => cmd_paths::run(input, kind, json, cli.pretty),
    }
}
