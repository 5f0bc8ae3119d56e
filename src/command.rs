//! @dose
//! purpose: Command descriptors and the append-only registry they live in. A descriptor is a
//!     token sequence ("eags transform rdbms erd"), a handler, and ordered argument bindings.
//!
//! when-editing:
//!     - !HandlerArg is a closed tagged variant; add a variant only together with dispatch support
//!     - !by_specificity() must return a derived view and never reorder the registry itself
//!     - Component order does not affect matching, only the component count does
//!
//! invariants:
//!     - A Command always has at least one non-blank component
//!     - Registry order is registration order and never changes
//!     - Equal-length commands keep registration order in the specificity view (stable sort)
//!
//! do-not:
//!     - Never add a removal operation; descriptors live as long as the registry
//!
//! gotchas:
//!     - Handlers receive opaque values (Box<dyn Any>); use Args accessors to downcast
//!     - Literal keys resolve to OptionValue, suppliers may return any 'static type

use crate::dispatch::Args;
use crate::error::{ArgError, CommandError};
use crate::options::OptionMap;
use crate::supplier::RequiredArg;
use std::any::Any;
use std::fmt;

/// An opaque handler argument
pub type Arg = Box<dyn Any>;

/// Derives one handler argument from the option map and the caller's prepended arguments
pub trait ArgSupplier {
    fn supply(&self, options: &OptionMap, context: &[Arg]) -> Result<Arg, ArgError>;
}

impl<F> ArgSupplier for F
where
    F: Fn(&OptionMap, &[Arg]) -> Result<Arg, ArgError>,
{
    fn supply(&self, options: &OptionMap, context: &[Arg]) -> Result<Arg, ArgError> {
        self(options, context)
    }
}

/// One declared handler argument binding
pub enum HandlerArg {
    /// Pass the option-map value for this key
    Literal(String),
    /// Compute the value from the option map
    Supplier(Box<dyn ArgSupplier>),
}

impl HandlerArg {
    pub fn supplier<S: ArgSupplier + 'static>(supplier: S) -> Self {
        HandlerArg::Supplier(Box::new(supplier))
    }
}

impl fmt::Debug for HandlerArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerArg::Literal(key) => f.debug_tuple("Literal").field(key).finish(),
            HandlerArg::Supplier(_) => f.write_str("Supplier(..)"),
        }
    }
}

impl From<&str> for HandlerArg {
    fn from(key: &str) -> Self {
        HandlerArg::Literal(key.to_string())
    }
}

impl From<String> for HandlerArg {
    fn from(key: String) -> Self {
        HandlerArg::Literal(key)
    }
}

impl<T: 'static> From<RequiredArg<T>> for HandlerArg {
    fn from(required: RequiredArg<T>) -> Self {
        HandlerArg::supplier(required)
    }
}

/// Split a human-written command phrase into its components
pub fn command_components(phrase: &str) -> Vec<String> {
    phrase.split_whitespace().map(str::to_string).collect()
}

type Handler<R> = Box<dyn Fn(Args) -> R>;

/// A registered command definition
pub struct Command<R> {
    components: Vec<String>,
    handler: Handler<R>,
    handler_args: Vec<HandlerArg>,
}

impl<R> Command<R> {
    /// Build a command from a phrase such as "eags transform rdbms erd"
    pub fn new<F>(phrase: &str, handler: F) -> Result<Self, CommandError>
    where
        F: Fn(Args) -> R + 'static,
    {
        Self::from_components(command_components(phrase), handler)
    }

    /// Build a command from explicit components
    pub fn from_components<I, S, F>(components: I, handler: F) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(Args) -> R + 'static,
    {
        let components: Vec<String> = components.into_iter().map(Into::into).collect();
        if components.is_empty() {
            return Err(CommandError::EmptyComponents);
        }
        if let Some(index) = components.iter().position(|c| c.trim().is_empty()) {
            return Err(CommandError::BlankComponent { index });
        }

        Ok(Self {
            components,
            handler: Box::new(handler),
            handler_args: Vec::new(),
        })
    }

    /// Append one argument binding
    pub fn arg(mut self, arg: impl Into<HandlerArg>) -> Self {
        self.handler_args.push(arg.into());
        self
    }

    /// Append several argument bindings in order
    pub fn args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<HandlerArg>,
    {
        self.handler_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn handler_args(&self) -> &[HandlerArg] {
        &self.handler_args
    }

    /// Components joined back into a phrase
    pub fn phrase(&self) -> String {
        self.components.join(" ")
    }

    /// Number of components present in the option map
    pub fn present_count(&self, options: &OptionMap) -> usize {
        self.components
            .iter()
            .filter(|c| options.is_present(c))
            .count()
    }

    /// True when every component is present
    pub fn matches(&self, options: &OptionMap) -> bool {
        self.present_count(options) == self.components.len()
    }

    pub(crate) fn invoke(&self, args: Args) -> R {
        (self.handler)(args)
    }
}

impl<R> fmt::Debug for Command<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("components", &self.components)
            .field("handler_args", &self.handler_args)
            .finish_non_exhaustive()
    }
}

/// Append-only, ordered collection of commands
pub struct Registry<R> {
    commands: Vec<Command<R>>,
}

impl<R> Default for Registry<R> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
        }
    }
}

impl<R> Registry<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command<R>) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Command<R>> {
        self.commands.iter()
    }

    /// Commands ordered longest first; ties keep registration order
    pub fn by_specificity(&self) -> Vec<&Command<R>> {
        let mut view: Vec<&Command<R>> = self.commands.iter().collect();
        view.sort_by(|a, b| b.components.len().cmp(&a.components.len()));
        view
    }
}
