//! @dose
//! purpose: This module defines the command-line interface for the docroute binary using the
//!     clap derive macros. It specifies the parse and route commands and their arguments.
//!
//! when-editing:
//!     - !Each command struct must derive Args and be added to the Commands enum
//!     - !Global flags (root, verbose) are defined on Cli and propagate to all subcommands
//!     - The argv to route is everything after `--`, passed through untouched
//!
//! invariants:
//!     - The Cli struct is the root parser that clap uses to parse command-line arguments
//!     - PathBuf is used for all file path arguments
//!
//! gotchas:
//!     - `--version` belongs to docroute itself; --app-version sets the routed program's version
//!     - The --root flag is global but optional; defaults to current directory in main.rs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docroute")]
#[command(
    author,
    version,
    about = "Route docopt command lines to their most specific command"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root holding docroute.toml (defaults to current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse argv against a usage grammar and print the option map as JSON
    Parse(ParseArgs),

    /// Dispatch argv to the most specific configured command and print the match as JSON
    Route(RouteArgs),
}

/// Grammar options shared between parse and route
#[derive(Args, Clone, Default)]
pub struct GrammarOptions {
    /// Usage grammar file (overrides docroute.toml)
    #[arg(short, long, value_name = "FILE")]
    pub usage: Option<PathBuf>,

    /// Version reported by the routed program's --version
    #[arg(long, value_name = "VERSION")]
    pub app_version: Option<String>,

    /// Stop option parsing at the first positional argument
    #[arg(long)]
    pub options_first: bool,
}

#[derive(Args, Default)]
pub struct ParseArgs {
    #[command(flatten)]
    pub grammar: GrammarOptions,

    /// Arguments to parse (after --)
    #[arg(last = true, value_name = "ARGV")]
    pub argv: Vec<String>,
}

#[derive(Args, Default)]
pub struct RouteArgs {
    #[command(flatten)]
    pub grammar: GrammarOptions,

    /// Arguments to route (after --)
    #[arg(last = true, value_name = "ARGV")]
    pub argv: Vec<String>,
}
