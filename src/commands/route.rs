//! @dose
//! purpose: This module implements the route command. It registers every [[command]] from
//!     docroute.toml, dispatches argv through CommandLine and prints the winning command and
//!     its resolved arguments as JSON.
//!
//! when-editing:
//!     - !Route handlers only describe the match; they never run anything
//!     - !Required-argument failures surface as errors here so main exits with code 1
//!
//! invariants:
//!     - Exactly one route is reported per successful invocation
//!     - An unmatched command line prints the E0995 diagnostic and fails
//!
//! gotchas:
//!     - Help/version requests print the grammar's text and succeed without a match
//!
//! flows:
//!     - Load config -> build commands -> CommandLine::new (register + parse) -> handle -> print

use crate::cli::RouteArgs;
use crate::command::Command;
use crate::command_line::{console_unhandled_command_reporter, CommandLine};
use crate::commands::grammar_setup;
use crate::config::{Config, CONFIG_FILE};
use crate::dispatch::Args;
use crate::options::OptionValue;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use tracing::debug;

/// The command selected for a command line, with its resolved arguments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMatch {
    pub command: String,
    pub args: Vec<serde_json::Value>,
}

impl RouteMatch {
    fn from_args(command: &str, args: &Args) -> Self {
        let args = args
            .iter()
            .map(|arg| {
                arg.downcast_ref::<OptionValue>()
                    .and_then(|value| serde_json::to_value(value).ok())
                    .unwrap_or(serde_json::Value::Null)
            })
            .collect();

        Self {
            command: command.to_string(),
            args,
        }
    }
}

type RouteResult = Option<RouteMatch>;

/// Dispatch argv against the configured routes. None when help/version text was printed.
pub fn route(args: &RouteArgs, root: &Path) -> Result<Option<RouteMatch>> {
    let config = Config::load(root);
    let (spec, version, init) = grammar_setup(&args.grammar, &args.argv, &config, root)?;

    let mut commands: Vec<Command<RouteResult>> = Vec::with_capacity(config.commands.len());
    for route in &config.commands {
        let phrase = route.phrase.clone();
        let handler = move |args: Args| Some(RouteMatch::from_args(&phrase, &args));
        let command = route
            .to_command(handler)
            .with_context(|| format!("Invalid command phrase {:?}", route.phrase))?;
        commands.push(command);
    }

    debug!(routes = commands.len(), file = CONFIG_FILE, "loaded routes");

    let fatal = Rc::new(Cell::new(false));
    let seen = Rc::clone(&fatal);
    let cl = CommandLine::new(
        spec,
        init,
        version.unwrap_or_default(),
        move |_: &CommandLine<RouteResult>, message: &str, is_fatal: bool| {
            if is_fatal {
                seen.set(true);
                eprintln!("{}", message);
            } else {
                println!("{}", message);
            }
        },
        console_unhandled_command_reporter,
        move |cl| {
            for command in commands {
                cl.register(command);
            }
        },
    );

    if !cl.is_valid() {
        if fatal.get() {
            bail!("Command line does not match the usage grammar");
        }
        return Ok(None);
    }

    match cl.handle(Vec::new())? {
        Some(Some(matched)) => Ok(Some(matched)),
        Some(None) => bail!("No command registered for this command line"),
        None => bail!("Command line does not match the usage grammar"),
    }
}

pub fn run_route(args: &RouteArgs, root: &Path, _verbose: bool) -> Result<()> {
    if let Some(matched) = route(args, root)? {
        let json = serde_json::to_string_pretty(&matched).context("Failed to serialize route")?;
        println!("{}", json);
    }
    Ok(())
}
