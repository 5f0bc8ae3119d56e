//! @dose
//! purpose: Boundary to the usage-grammar parser. Turns a usage spec plus argv into a flat
//!     OptionMap. The parser itself is external; this module only defines the contract and
//!     the docopt-backed adapter.
//!
//! when-editing:
//!     - !GrammarParser implementations must report every failure as GrammarError, never panic
//!     - ParserInit.argv excludes the program name; None means "use the process arguments"
//!
//! invariants:
//!     - A successful parse yields every symbol the grammar defines (absent ones as Absent)
//!     - Help and version requests are reported as non-fatal GrammarErrors
//!
//! gotchas:
//!     - Closures implement GrammarParser, which keeps tests free of real usage strings

mod docopt;

pub use self::docopt::DocoptGrammar;

use crate::options::OptionMap;
use thiserror::Error;

/// Parse failure reported by a grammar parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GrammarError {
    pub message: String,
    /// False for help/version requests, true for real grammar or argv errors
    pub fatal: bool,
}

impl GrammarError {
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fatal: true,
        }
    }
}

/// Parser initialisation options
#[derive(Debug, Clone)]
pub struct ParserInit {
    /// Arguments to parse, without the program name
    pub argv: Option<Vec<String>>,
    /// Program name placed in front of argv
    pub program: String,
    /// Handle -h/--help by reporting the usage text
    pub help: bool,
    /// Treat everything after the first positional as positional
    pub options_first: bool,
}

impl Default for ParserInit {
    fn default() -> Self {
        Self {
            argv: None,
            program: env!("CARGO_PKG_NAME").to_string(),
            help: true,
            options_first: false,
        }
    }
}

impl ParserInit {
    /// Parse the given arguments instead of the process arguments
    pub fn with_argv<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: Some(argv.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Split a single argument line on whitespace
    pub fn with_argv_line(line: &str) -> Self {
        Self::with_argv(line.split_whitespace())
    }
}

/// Something that can turn a usage spec and argv into an option map
pub trait GrammarParser {
    fn parse(
        &self,
        spec: &str,
        version: Option<&str>,
        init: &ParserInit,
    ) -> Result<OptionMap, GrammarError>;
}

impl<F> GrammarParser for F
where
    F: Fn(&str, Option<&str>, &ParserInit) -> Result<OptionMap, GrammarError>,
{
    fn parse(
        &self,
        spec: &str,
        version: Option<&str>,
        init: &ParserInit,
    ) -> Result<OptionMap, GrammarError> {
        self(spec, version, init)
    }
}
