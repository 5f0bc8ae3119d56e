//! @dose
//! purpose: The dispatch algorithm. Picks the most specific fully-matched command for an
//!     option map, resolves its declared arguments and invokes its handler.
//!
//! when-editing:
//!     - !Selection walks Registry::by_specificity() and stops at the first full match
//!     - !Argument order is: caller prepend args, then handler_args in declaration order
//!     - Suppliers see the prepend args as context, never the partially built list
//!
//! invariants:
//!     - At most one handler is invoked per dispatch
//!     - A longer fully-matching command always beats a shorter one
//!     - Equal-length full matches resolve to the earliest registered command
//!     - The registry and option map are never mutated
//!
//! gotchas:
//!     - "No match" is returned through the unhandled callback, not as an error
//!     - A literal key the grammar never defined still fills its slot (with Absent)

use crate::command::{Arg, Command, HandlerArg, Registry};
use crate::error::ArgError;
use crate::options::{OptionMap, OptionValue};
use tracing::{debug, warn};

/// Ordered argument list handed to a command handler
#[derive(Default)]
pub struct Args {
    values: Vec<Arg>,
}

impl Args {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Downcast the argument at `index`
    pub fn get<T: 'static>(&self, index: usize) -> Option<&T> {
        self.values.get(index)?.downcast_ref::<T>()
    }

    /// Argument at `index` when it was resolved from a literal key
    pub fn option(&self, index: usize) -> Option<&OptionValue> {
        self.get::<OptionValue>(index)
    }

    pub fn text(&self, index: usize) -> Option<&str> {
        self.option(index)?.as_str()
    }

    pub fn flag(&self, index: usize) -> bool {
        self.option(index).is_some_and(OptionValue::is_present)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arg> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<Arg> {
        self.values
    }
}

impl From<Vec<Arg>> for Args {
    fn from(values: Vec<Arg>) -> Self {
        Self { values }
    }
}

/// The most specific command whose components are all present
pub fn matched<'r, R>(registry: &'r Registry<R>, options: &OptionMap) -> Option<&'r Command<R>> {
    registry
        .by_specificity()
        .into_iter()
        .find(|cmd| cmd.matches(options))
}

/// Build the handler argument list for `command`
pub fn resolve_args<R>(
    command: &Command<R>,
    options: &OptionMap,
    prepend: Vec<Arg>,
) -> Result<Args, ArgError> {
    let context_len = prepend.len();
    let mut values = prepend;
    values.reserve(command.handler_args().len());

    for handler_arg in command.handler_args() {
        let value: Arg = match handler_arg {
            HandlerArg::Literal(key) => {
                let value = match options.get(key) {
                    Some(value) => value.clone(),
                    None => {
                        warn!(
                            command = %command.phrase(),
                            key = %key,
                            "handler argument is not defined by the grammar"
                        );
                        OptionValue::Absent
                    }
                };
                Box::new(value)
            }
            HandlerArg::Supplier(supplier) => supplier.supply(options, &values[..context_len])?,
        };
        values.push(value);
    }

    Ok(Args::from(values))
}

/// Select, resolve and invoke. Calls `unhandled` when nothing fully matches.
pub fn dispatch<R, U>(
    registry: &Registry<R>,
    options: &OptionMap,
    prepend: Vec<Arg>,
    unhandled: U,
) -> Result<R, ArgError>
where
    U: FnOnce() -> R,
{
    let Some(command) = matched(registry, options) else {
        debug!(registered = registry.len(), "no command matched");
        return Ok(unhandled());
    };

    debug!(command = %command.phrase(), "dispatching");
    let args = resolve_args(command, options, prepend)?;
    Ok(command.invoke(args))
}
