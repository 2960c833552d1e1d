mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "fieldcheck")]
#[command(version, about = "Declarative field validation", long_about = None)]
struct Cli {
    /// Log validation progress to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the built-in Users model and print its report
    Demo,

    /// Validate a JSON record against a TOML rule book
    Check {
        /// Rule book file
        #[arg(short, long)]
        rules: PathBuf,

        /// JSON record file, or `-` for stdin
        #[arg(default_value = "-")]
        record: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let clean = match cli.command {
        Commands::Demo => commands::demo::execute()?,
        Commands::Check {
            rules,
            record,
            json,
        } => commands::check::execute(&rules, &record, json)?,
    };

    Ok(if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
