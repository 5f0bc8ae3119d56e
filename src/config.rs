//! @dose
//! purpose: Configuration file parsing for docroute.toml. Holds the usage grammar, version,
//!     parser options and the route table the binary registers as commands.
//!
//! when-editing:
//!     - !Config is loaded once at startup and passed through the call chain
//!     - !A route arg is either a bare key string or a table { key, required, name }
//!     - Route order in the file is registration order
//!
//! invariants:
//!     - Config::load returns default config if docroute.toml doesn't exist
//!     - A malformed file is reported as a warning and the defaults are used
//!
//! gotchas:
//!     - usage_file is resolved relative to the root directory, usage (inline) wins over it

use crate::command::{Command, HandlerArg};
use crate::dispatch::Args;
use crate::error::CommandError;
use crate::supplier::RequiredArg;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const CONFIG_FILE: &str = "docroute.toml";

const NO_USAGE: &str = "No usage grammar: pass --usage or set usage in docroute.toml";

/// Main configuration structure matching docroute.toml
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Inline usage grammar
    pub usage: Option<String>,

    /// Path to a usage grammar file (relative to root)
    pub usage_file: Option<PathBuf>,

    /// Version reported for --version
    pub version: Option<String>,

    /// Stop option parsing at the first positional
    pub options_first: bool,

    /// Route table
    #[serde(rename = "command")]
    pub commands: Vec<RouteConfig>,
}

/// One `[[command]]` entry
#[derive(Debug, Deserialize, Clone)]
pub struct RouteConfig {
    /// Command phrase, e.g. "eags transform rdbms erd"
    pub phrase: String,

    /// Handler argument bindings in order
    #[serde(default)]
    pub args: Vec<RouteArg>,
}

/// A handler argument binding from the config file
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RouteArg {
    Key(String),
    Detailed {
        key: String,
        #[serde(default)]
        required: bool,
        name: Option<String>,
    },
}

impl RouteArg {
    pub fn key(&self) -> &str {
        match self {
            RouteArg::Key(key) | RouteArg::Detailed { key, .. } => key,
        }
    }

    fn to_handler_arg(&self) -> HandlerArg {
        match self {
            RouteArg::Detailed {
                key,
                required: true,
                name,
            } => {
                let required = RequiredArg::new(key.clone());
                match name {
                    Some(name) => required.name(name.clone()).into(),
                    None => required.into(),
                }
            }
            other => HandlerArg::from(other.key()),
        }
    }
}

impl RouteConfig {
    /// Turn this route into a command whose handler is `handler`
    pub fn to_command<R, F>(&self, handler: F) -> Result<Command<R>, CommandError>
    where
        F: Fn(Args) -> R + 'static,
    {
        let args = self.args.iter().map(RouteArg::to_handler_arg);
        Ok(Command::new(&self.phrase, handler)?.args(args))
    }
}

impl Config {
    /// Load configuration from docroute.toml in the given root directory
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(file = CONFIG_FILE, error = %e, "invalid config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(file = CONFIG_FILE, error = %e, "unreadable config, using defaults");
                Self::default()
            }
        }
    }

    /// The usage grammar: an explicit file wins, then inline usage, then usage_file
    pub fn resolve_usage(&self, root: &Path, explicit: Option<&Path>) -> Result<String> {
        let fallback = match self.usage {
            Some(_) => None,
            None => self.usage_file.as_deref(),
        };

        if let Some(file) = explicit.or(fallback) {
            let path = if file.is_absolute() {
                file.to_path_buf()
            } else {
                root.join(file)
            };
            return fs::read_to_string(&path)
                .with_context(|| format!("Failed to read usage file {}", path.display()));
        }

        self.usage.clone().context(NO_USAGE)
    }
}
