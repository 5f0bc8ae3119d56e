//! @dose
//! purpose: The parse context that ties a usage grammar, a command registry and the dispatcher
//!     together. Commands are registered once at construction, argv is parsed eagerly, and
//!     handle() re-parses and dispatches to the most specific matching command.
//!
//! when-editing:
//!     - !The registration callback runs exactly once, before the first parse
//!     - !Parse failures go to the error handler; they never propagate as Err
//!     - handle() returns Ok(None) when parsing fails, Ok(Some(r)) after dispatch
//!
//! invariants:
//!     - is_valid() is true iff the construction-time parse succeeded
//!     - The registry is owned here and never reordered (dispatch sorts a view)
//!
//! do-not:
//!     - Never exit the process here; ArgError is returned to the caller
//!
//! gotchas:
//!     - The default unhandled reporter returns R::default(), so R must be Default for typical()
//!     - Help/version requests reach the error handler with fatal = false
//!     - Arg is Box<dyn Any> ('static), so pass a shared context as Rc<...> or capture it in
//!       the handler closure; a borrowed &CommandLine cannot be prepended
//!
//! flows:
//!     - new(): register commands -> parse -> store options or report error
//!     - handle(): parse -> dispatch (longest full match) -> handler or unhandled reporter

use crate::command::{Arg, Command, Registry};
use crate::dispatch::dispatch;
use crate::error::ArgError;
use crate::grammar::{DocoptGrammar, GrammarError, GrammarParser, ParserInit};
use crate::options::OptionMap;
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// Receives parse failures: (context, message, fatal). Any extra state the handler needs is
/// captured by the closure.
pub type ErrorHandler<R> = Box<dyn Fn(&CommandLine<R>, &str, bool)>;

/// Produces the dispatch result when no command matches
pub type UnhandledReporter<R> = Box<dyn Fn(&CommandLine<R>) -> R>;

/// Diagnostic code reported when a valid command line has no handler
pub const UNHANDLED_CODE: &str = "E0995";

/// Writes parse failures to stderr
pub fn console_error_handler<R>(_cl: &CommandLine<R>, message: &str, _fatal: bool) {
    eprintln!("{}", message);
}

/// Reports a valid command line without a matching handler and returns `R::default()`
pub fn console_unhandled_command_reporter<R: Default>(_cl: &CommandLine<R>) -> R {
    eprintln!(
        "[{}] Unable to find a command handler for a valid docopt CommandLine.",
        UNHANDLED_CODE
    );
    R::default()
}

/// Usage grammar, registered commands and the parsed options for one invocation
pub struct CommandLine<R> {
    spec: String,
    init: ParserInit,
    version: String,
    parser: Box<dyn GrammarParser>,
    error_handler: ErrorHandler<R>,
    unhandled: UnhandledReporter<R>,
    registry: Registry<R>,
    options: Option<OptionMap>,
}

impl<R> CommandLine<R> {
    /// Build a context parsed with docopt
    pub fn new<E, U, F>(
        spec: impl Into<String>,
        init: ParserInit,
        version: impl Into<String>,
        error_handler: E,
        unhandled: U,
        register: F,
    ) -> Self
    where
        E: Fn(&CommandLine<R>, &str, bool) + 'static,
        U: Fn(&CommandLine<R>) -> R + 'static,
        F: FnOnce(&mut CommandLine<R>),
    {
        Self::with_parser(
            DocoptGrammar,
            spec,
            init,
            version,
            error_handler,
            unhandled,
            register,
        )
    }

    /// Build a context around any grammar parser
    pub fn with_parser<P, E, U, F>(
        parser: P,
        spec: impl Into<String>,
        init: ParserInit,
        version: impl Into<String>,
        error_handler: E,
        unhandled: U,
        register: F,
    ) -> Self
    where
        P: GrammarParser + 'static,
        E: Fn(&CommandLine<R>, &str, bool) + 'static,
        U: Fn(&CommandLine<R>) -> R + 'static,
        F: FnOnce(&mut CommandLine<R>),
    {
        let mut cl = Self {
            spec: spec.into(),
            init,
            version: version.into(),
            parser: Box::new(parser),
            error_handler: Box::new(error_handler),
            unhandled: Box::new(unhandled),
            registry: Registry::new(),
            options: None,
        };

        register(&mut cl);
        debug!(commands = cl.registry.len(), "registered commands");

        match cl.parse() {
            Ok(options) => cl.options = Some(options),
            Err(e) => cl.report(&e),
        }
        cl
    }

    fn parse(&self) -> Result<OptionMap, GrammarError> {
        let version = (!self.version.is_empty()).then_some(self.version.as_str());
        self.parser.parse(&self.spec, version, &self.init)
    }

    fn report(&self, error: &GrammarError) {
        (self.error_handler)(self, &error.message, error.fatal);
    }

    pub fn register(&mut self, command: Command<R>) {
        self.registry.register(command);
    }

    pub fn registry(&self) -> &Registry<R> {
        &self.registry
    }

    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_valid(&self) -> bool {
        self.options.is_some()
    }

    /// Options from the construction-time parse
    pub fn options(&self) -> Option<&OptionMap> {
        self.options.as_ref()
    }

    pub fn text_option(&self, key: &str) -> Option<&str> {
        self.options.as_ref()?.text(key)
    }

    pub fn numeric_option(&self, key: &str) -> Option<f64> {
        self.options.as_ref()?.number(key)
    }

    /// Current working directory
    pub fn project_path(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    /// Re-parse and dispatch. `prepend` args come first in the handler's argument list.
    pub fn handle(&self, prepend: Vec<Arg>) -> Result<Option<R>, ArgError> {
        let options = match self.parse() {
            Ok(options) => options,
            Err(e) => {
                self.report(&e);
                return Ok(None);
            }
        };

        dispatch(&self.registry, &options, prepend, || (self.unhandled)(self)).map(Some)
    }
}

impl<R: Default + 'static> CommandLine<R> {
    /// Context with console collaborators and default parser options
    pub fn typical<F>(spec: impl Into<String>, version: impl Into<String>, register: F) -> Self
    where
        F: FnOnce(&mut CommandLine<R>),
    {
        Self::new(
            spec,
            ParserInit::default(),
            version,
            console_error_handler::<R>,
            console_unhandled_command_reporter::<R>,
            register,
        )
    }
}
