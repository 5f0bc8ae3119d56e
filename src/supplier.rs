//! @dose
//! purpose: Reusable required-argument supplier. Binds a handler argument to an option key,
//!     fails when the value is missing, and optionally validates/converts it with a transform.
//!
//! when-editing:
//!     - !Failures are returned as ArgError; the binary is the one place that exits on them
//!     - Transforms receive the raw value rendered as text (Display of OptionValue)
//!
//! invariants:
//!     - A value that is not present (Absent, false, 0, []) is reported as Missing
//!     - A transform returning None is reported as Invalid with the custom or default message
//!     - Without a transform the raw OptionValue is passed through unchanged
//!
//! gotchas:
//!     - With a transform the handler receives the transform's type T, not OptionValue

use crate::command::{Arg, ArgSupplier};
use crate::error::ArgError;
use crate::options::{OptionMap, OptionValue};

type Transform<T> = Box<dyn Fn(&str) -> Option<T>>;
type Message = Box<dyn Fn(&str, &str, &str) -> String>;

/// Supplier that insists on a value for `key`
pub struct RequiredArg<T = OptionValue> {
    key: String,
    name: Option<String>,
    transform: Option<Transform<T>>,
    message: Option<Message>,
}

impl RequiredArg<OptionValue> {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: None,
            transform: None,
            message: None,
        }
    }
}

impl<T: 'static> RequiredArg<T> {
    /// Human-readable name used in diagnostics (defaults to the key)
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Validate and convert the raw value; `None` rejects it
    pub fn transform<U, F>(self, transform: F) -> RequiredArg<U>
    where
        F: Fn(&str) -> Option<U> + 'static,
    {
        RequiredArg {
            key: self.key,
            name: self.name,
            transform: Some(Box::new(transform)),
            message: self.message,
        }
    }

    /// Custom rejection message, called with (value, key, name)
    pub fn message<F>(mut self, message: F) -> Self
    where
        F: Fn(&str, &str, &str) -> String + 'static,
    {
        self.message = Some(Box::new(message));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn human_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }

    pub fn resolve(&self, options: &OptionMap) -> Result<Arg, ArgError> {
        let raw = options.value(&self.key);
        if !raw.is_present() {
            return Err(ArgError::Missing {
                key: self.key.clone(),
                name: self.human_name().to_string(),
            });
        }

        let Some(transform) = &self.transform else {
            return Ok(Box::new(raw.clone()));
        };

        let text = raw.to_string();
        match transform(&text) {
            Some(value) => Ok(Box::new(value)),
            None => {
                let message = match &self.message {
                    Some(message) => message(&text, &self.key, self.human_name()),
                    None => format!("{} '{}' is not valid.", self.human_name(), text),
                };
                Err(ArgError::Invalid {
                    key: self.key.clone(),
                    message,
                })
            }
        }
    }
}

impl<T: 'static> ArgSupplier for RequiredArg<T> {
    fn supply(&self, options: &OptionMap, _context: &[Arg]) -> Result<Arg, ArgError> {
        self.resolve(options)
    }
}

/// Required argument named after its key
pub fn typical_required_arg_supplier(key: impl Into<String>) -> RequiredArg {
    RequiredArg::new(key)
}
