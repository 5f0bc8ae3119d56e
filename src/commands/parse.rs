//! @dose
//! purpose: This module implements the parse command: run argv through the usage grammar and
//!     print the resulting option map as pretty JSON on stdout.
//!
//! when-editing:
//!     - !Non-fatal grammar results (help, version) are printed to stdout and succeed
//!     - Fatal grammar errors become anyhow errors so main exits with code 1
//!
//! invariants:
//!     - Output keys are sorted, so identical inputs give byte-identical output

use crate::cli::{GrammarOptions, ParseArgs};
use crate::config::Config;
use crate::grammar::{DocoptGrammar, GrammarParser, ParserInit};
use crate::options::OptionMap;
use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::debug;

/// Resolve the grammar spec, version and parser options from args and config
pub fn grammar_setup(
    grammar: &GrammarOptions,
    argv: &[String],
    config: &Config,
    root: &Path,
) -> Result<(String, Option<String>, ParserInit)> {
    let spec = config.resolve_usage(root, grammar.usage.as_deref())?;
    let version = grammar
        .app_version
        .clone()
        .or_else(|| config.version.clone());
    let init = ParserInit {
        options_first: grammar.options_first || config.options_first,
        ..ParserInit::with_argv(argv.iter().cloned())
    };
    Ok((spec, version, init))
}

/// Parse argv, returning None when the grammar answered with help/version text
pub fn parse_options(args: &ParseArgs, root: &Path) -> Result<Option<OptionMap>> {
    let config = Config::load(root);
    let (spec, version, init) = grammar_setup(&args.grammar, &args.argv, &config, root)?;

    debug!(argc = args.argv.len(), "parsing argv");

    match DocoptGrammar.parse(&spec, version.as_deref(), &init) {
        Ok(options) => Ok(Some(options)),
        Err(e) if !e.fatal => {
            println!("{}", e.message);
            Ok(None)
        }
        Err(e) => bail!("{}", e.message),
    }
}

pub fn run_parse(args: &ParseArgs, root: &Path, _verbose: bool) -> Result<()> {
    if let Some(options) = parse_options(args, root)? {
        let json = serde_json::to_string_pretty(&options).context("Failed to serialize options")?;
        println!("{}", json);
    }
    Ok(())
}
