//! @dose
//! purpose: GrammarParser backed by the docopt crate. Maps docopt's ArgvMap into OptionMap.
//!
//! when-editing:
//!     - !Value mapping: Switch->Bool, Counted->Count, Plain(Some)->Text, Plain(None)->Absent,
//!       List->List
//!     - Synonyms (-h/--help) are copied under every name so either spelling can be looked up
//!
//! gotchas:
//!     - docopt skips the first argv element, so the program name is prepended here

use super::{GrammarError, GrammarParser, ParserInit};
use crate::options::{OptionMap, OptionValue};
use docopt::{ArgvMap, Docopt, Value};

/// Parses docopt usage strings
#[derive(Debug, Clone, Copy, Default)]
pub struct DocoptGrammar;

impl DocoptGrammar {
    pub fn new() -> Self {
        Self
    }
}

impl From<docopt::Error> for GrammarError {
    fn from(e: docopt::Error) -> Self {
        Self {
            fatal: e.fatal(),
            message: e.to_string(),
        }
    }
}

fn convert(value: &Value) -> OptionValue {
    match value {
        Value::Switch(b) => OptionValue::Bool(*b),
        Value::Counted(n) => OptionValue::Count(*n),
        Value::Plain(Some(s)) => OptionValue::Text(s.clone()),
        Value::Plain(None) => OptionValue::Absent,
        Value::List(items) => OptionValue::List(items.clone()),
    }
}

fn to_option_map(parsed: &ArgvMap) -> OptionMap {
    let mut options = OptionMap::new();
    for (key, value) in parsed.map.iter() {
        options.insert(key.clone(), convert(value));
    }
    for (synonym, canonical) in parsed.map.synonyms() {
        if let Some(value) = parsed.find(canonical) {
            options.insert(synonym.clone(), convert(value));
        }
    }
    options
}

impl GrammarParser for DocoptGrammar {
    fn parse(
        &self,
        spec: &str,
        version: Option<&str>,
        init: &ParserInit,
    ) -> Result<OptionMap, GrammarError> {
        let mut parser = Docopt::new(spec)?
            .help(init.help)
            .options_first(init.options_first)
            .version(version.map(str::to_string));

        if let Some(argv) = &init.argv {
            let full: Vec<&str> = std::iter::once(init.program.as_str())
                .chain(argv.iter().map(String::as_str))
                .collect();
            parser = parser.argv(full);
        }

        let parsed = parser.parse()?;
        Ok(to_option_map(&parsed))
    }
}
