mod build;
mod clear;
mod inspect;
mod schema;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "traitdex",
    version,
    about = "A trait-implementor index builder for documentation viewers",
    long_about = "Traitdex reads structured library interface descriptions and builds one \
                  queryable implementor index per trait, grouped by library. The emitted \
                  payloads are self-describing, idempotent, and consumed read-only by a \
                  documentation viewer."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmitFormat {
    /// Structured payloads only
    Json,
    /// Structured payloads plus the loader-compatible .js presentation
    Js,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build implementor indices from a directory of library descriptions
    #[command(
        long_about = "Scans the input directory for library interface descriptions (*.json), \
                            extracts implementor facts, and emits one index payload per trait \
                            under <OUT>/implementors/."
    )]
    Build {
        /// Directory containing library interface descriptions
        #[arg(value_name = "INPUT_DIR")]
        path: PathBuf,
        /// Output root for emitted payloads (default: ./doc)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Reject exact duplicate records instead of keeping them
        #[arg(long)]
        strict: bool,
        /// Emitted presentation format
        #[arg(long, value_enum, default_value = "json")]
        emit: EmitFormat,
    },
    /// Inspect emitted indices
    #[command(
        long_about = "Loads the emitted payloads under <INDEX_DIR>/implementors/ through the \
                            registration runtime and prints a per-library summary table."
    )]
    Inspect {
        /// Output root a previous build emitted into
        #[arg(value_name = "INDEX_DIR")]
        path: PathBuf,
        /// Restrict to one trait, by full path (e.g. core::clone::Clone)
        #[arg(long = "trait", value_name = "TRAIT_PATH")]
        trait_path: Option<String>,
    },
    /// Print the JSON Schema of the payload format
    Schema,
    /// Remove emitted index files
    Clear {
        /// Output root to clear (default: ./doc)
        #[arg(value_name = "INDEX_DIR")]
        path: Option<PathBuf>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _guard = traitdex_core::logging::init_logging("cli", true);

    match cli.command {
        Commands::Build {
            path,
            out,
            strict,
            emit,
        } => build::run(path, out.unwrap_or_else(|| PathBuf::from("doc")), strict, emit),
        Commands::Inspect { path, trait_path } => inspect::run(path, trait_path),
        Commands::Schema => schema::run(),
        Commands::Clear { path } => clear::run(path.unwrap_or_else(|| PathBuf::from("doc"))),
    }
}
