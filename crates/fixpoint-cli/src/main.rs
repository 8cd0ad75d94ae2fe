//! Command-line interface for the fixpoint pass driver.

mod commands;
mod pipeline;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::opt::OptArgs;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fixpoint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a source file and print the result
    #[command(visible_alias = "o")]
    Opt {
        /// Source file to optimize
        file: PathBuf,

        /// Configuration file (defaults to the nearest fixpoint.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Comma separated passes to run instead of the configured pipeline
        #[arg(short, long, value_delimiter = ',')]
        passes: Option<Vec<String>>,

        /// Run the pipeline once instead of to a fixed point
        #[arg(long)]
        once: bool,

        /// Write the optimized module here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a source file for errors
    Check {
        /// Source file to check
        file: PathBuf,
    },

    /// List the available passes
    Passes,

    /// Write a default fixpoint.toml in the current directory
    Init,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // RUST_LOG takes precedence over -v.
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Opt {
            file,
            config,
            passes,
            once,
            output,
        } => commands::opt::execute(&OptArgs {
            file,
            config,
            passes,
            once,
            output,
        }),
        Commands::Check { file } => commands::check::execute(&file),
        Commands::Passes => {
            commands::passes::execute();
            Ok(())
        }
        Commands::Init => commands::init::execute(),
    }
}
