//! Slidewright CLI
//!
//! Inspect, lint and validate MDX presentation decks.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Slidewright.
#[derive(Parser)]
#[command(
    name = "slidewright",
    version,
    about = "Inspect, lint and validate MDX presentation decks"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "slidewright.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// List every document in the namespace
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the processed metadata of one document
    Show {
        /// Document identifier (file name without extension)
        id: String,
        /// Print the full record as JSON
        #[arg(long)]
        json: bool,
        /// Also print the document body
        #[arg(long)]
        body: bool,
    },
    /// Lint one document, or all of them
    Lint {
        /// Document identifier; lints every document when omitted
        id: Option<String>,
        /// Treat lint issues as errors
        #[arg(long)]
        strict: bool,
    },
    /// Validate a JSON payload file against a payload kind
    Validate {
        /// Payload kind (chart, metrics, timeline, images)
        kind: String,
        /// JSON file holding the payload array
        file: std::path::PathBuf,
        /// Map aliased fields (category, amount, ...) before validating
        #[arg(long)]
        coerce: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    slidewright::init_tracing(cli.verbose);

    match cli.command {
        Commands::List { json } => {
            slidewright::cmd::list::run(&cli.config, json)?;
        }
        Commands::Show { id, json, body } => {
            slidewright::cmd::show::run(&cli.config, &id, json, body)?;
        }
        Commands::Lint { id, strict } => {
            slidewright::cmd::lint::run(&cli.config, id.as_deref(), strict)?;
        }
        Commands::Validate { kind, file, coerce } => {
            slidewright::cmd::validate::run(&kind, &file, coerce)?;
        }
    }

    Ok(())
}
