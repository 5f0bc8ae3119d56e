//! @dose
//! purpose: Strongly typed option map produced by the grammar parser. Every key is a grammar
//!     symbol (command word, `<positional>`, `--flag`) and every value is a tagged OptionValue.
//!
//! when-editing:
//!     - !is_present() is the single definition of "truthy" used by command matching
//!     - !Lookups return Option rather than coercing, so 0 and "" are never mistaken for absent
//!
//! invariants:
//!     - An OptionMap is immutable for the duration of one dispatch
//!     - Keys are stored sorted (BTreeMap) so serialized output is deterministic
//!
//! gotchas:
//!     - get() returns None for keys the grammar never defined; value() folds that into Absent
//!     - A Text value is present even when empty; only Absent, false, 0 and [] are not present

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A single parsed value for one grammar symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(untagged)]
pub enum OptionValue {
    /// Symbol defined by the grammar but not supplied on the command line
    #[default]
    Absent,
    /// Command words and switches
    Bool(bool),
    /// Repeatable switches (`-v -v`)
    Count(u64),
    /// Positional arguments and valued flags
    Text(String),
    /// Repeated positionals (`<file>...`)
    List(Vec<String>),
}

impl OptionValue {
    /// Whether this value counts as supplied when matching command components
    pub fn is_present(&self) -> bool {
        match self {
            OptionValue::Absent => false,
            OptionValue::Bool(b) => *b,
            OptionValue::Count(n) => *n > 0,
            OptionValue::Text(_) => true,
            OptionValue::List(items) => !items.is_empty(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<u64> {
        match self {
            OptionValue::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            OptionValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Absent => Ok(()),
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Count(n) => write!(f, "{}", n),
            OptionValue::Text(s) => f.write_str(s),
            OptionValue::List(items) => f.write_str(&items.join(" ")),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        OptionValue::Count(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        OptionValue::List(value)
    }
}

/// Flat mapping from grammar symbol to parsed value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionMap {
    values: BTreeMap<String, OptionValue>,
}

static ABSENT: OptionValue = OptionValue::Absent;

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Value for a symbol, or None when the grammar never defined it
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// Value for a symbol, treating unknown symbols as Absent
    pub fn value(&self, key: &str) -> &OptionValue {
        self.values.get(key).unwrap_or(&ABSENT)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_present(&self, key: &str) -> bool {
        self.value(key).is_present()
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.value(key).as_str()
    }

    /// Numeric view of a symbol: counts as-is, text parsed as a float
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.value(key) {
            OptionValue::Count(n) => Some(*n as f64),
            OptionValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, OptionValue)> for OptionMap {
    fn from_iter<I: IntoIterator<Item = (K, OptionValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
