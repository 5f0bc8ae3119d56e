//! @dose
//! purpose: Library crate root for docroute. Routes a parsed docopt-style option map to the
//!     most specific registered command and invokes its handler with resolved arguments.
//!     The binary (main.rs) is a thin consumer of this API.
//!
//! when-editing:
//!     - !All public modules must be declared here with pub mod
//!     - !Re-exports should include the types a caller needs to register and dispatch
//!
//! invariants:
//!     - Library code never terminates the process; errors are returned to the caller
//!     - Dispatch is single-threaded and synchronous
//!
//! gotchas:
//!     - cli, commands and config exist for the binary but are public so tests can reach them

pub mod cli;
pub mod command;
pub mod command_line;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod grammar;
pub mod logging;
pub mod options;
pub mod supplier;

// Re-export main types for convenience
pub use command::{command_components, Arg, ArgSupplier, Command, HandlerArg, Registry};
pub use command_line::{
    console_error_handler, console_unhandled_command_reporter, CommandLine, ErrorHandler,
    UnhandledReporter, UNHANDLED_CODE,
};
pub use dispatch::{dispatch, matched, resolve_args, Args};
pub use error::{ArgError, CommandError};
pub use grammar::{DocoptGrammar, GrammarError, GrammarParser, ParserInit};
pub use options::{OptionMap, OptionValue};
pub use supplier::{typical_required_arg_supplier, RequiredArg};
