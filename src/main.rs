//! @dose
//! purpose: This is the CLI entry point for docroute. It parses command-line arguments using
//!     clap, sets up logging, determines the project root directory, and dispatches to the
//!     parse or route command.
//!
//! when-editing:
//!     - !All command handlers are imported from the docroute crate
//!     - !The root directory defaults to current working directory if not specified
//!     - Error messages are printed to stderr and exit with code 1
//!
//! invariants:
//!     - This is the only place the process exits with a failure status
//!     - The process exits with 0 on success, 1 on any error
//!
//! do-not:
//!     - Never add business logic here - delegate to command modules

use anyhow::Context;
use clap::Parser;
use docroute::cli::{Cli, Commands};
use docroute::commands::{run_parse, run_route};
use docroute::logging::init_logging;
use std::env;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Parse(args) => run_parse(&args, &root, cli.verbose),
        Commands::Route(args) => run_route(&args, &root, cli.verbose),
    }
}
