//! CLI command implementations
//!
//! `search` loads a fixture into a [`MemoryConnector`], builds the predicate
//! and paging request from the flags, runs one search and streams every
//! emitted batch to stdout as it arrives.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::config::EngineConfig;
use crate::connector::{Fixture, MemoryConnector};
use crate::engine::{SearchEngine, SearchOutcome};
use crate::model::{Predicate, Record};

use super::args::{Cli, Command, SearchArgs};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_page, write_response};

/// Main CLI entry point
///
/// Parses arguments, installs logging and dispatches to the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_tracing();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Search(args) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            search(&args, &mut out).map(|_| ())
        }
    }
}

/// Logs go to stderr; stdout carries only results
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Run one search and write its batches and outcome to `out`
pub fn search<W: Write>(args: &SearchArgs, out: &mut W) -> CliResult<SearchOutcome> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let connector = MemoryConnector::from_fixture(load_fixture(&args.fixture)?);
    let predicate = build_predicate(&args.equals, &args.contains)?;
    let paging = args.paging();

    let engine = SearchEngine::new(&connector, &config);
    let mut page = 0;
    let mut write_failure = None;

    let result = {
        let mut sink = |batch: Vec<Record>| {
            if write_failure.is_some() {
                return;
            }
            page += 1;
            if let Err(e) = write_page(&mut *out, page, &batch) {
                write_failure = Some(e);
            }
        };
        engine.search(predicate.as_ref(), &mut sink, paging.as_ref())
    };

    if let Some(e) = write_failure {
        return Err(e);
    }

    match result {
        Ok(outcome) => {
            write_response(out, serde_json::to_value(&outcome)?)?;
            Ok(outcome)
        }
        Err(e) => {
            write_error(out, e.code(), &e.to_string())?;
            Err(e.into())
        }
    }
}

/// Load a connector fixture from a JSON file
pub fn load_fixture(path: &Path) -> CliResult<Fixture> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::fixture_error(format!("Failed to read fixture {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&content)
        .map_err(|e| CliError::fixture_error(format!("Invalid fixture JSON: {}", e)))
}

/// Build the predicate from `--eq` and `--contains` terms.
///
/// No terms means no predicate; several terms form an `And`.
pub fn build_predicate(equals: &[String], contains: &[String]) -> CliResult<Option<Predicate>> {
    let mut terms = Vec::with_capacity(equals.len() + contains.len());
    for term in equals {
        let (attribute, value) = parse_term(term)?;
        terms.push(Predicate::equals(attribute, value));
    }
    for term in contains {
        let (attribute, value) = parse_term(term)?;
        terms.push(Predicate::contains(attribute, value));
    }

    Ok(match terms.len() {
        0 => None,
        1 => terms.pop(),
        _ => Some(Predicate::and(terms)),
    })
}

fn parse_term(term: &str) -> CliResult<(&str, &str)> {
    match term.split_once('=') {
        Some((attribute, value)) if !attribute.trim().is_empty() => Ok((attribute.trim(), value)),
        _ => Err(CliError::invalid_argument(format!(
            "Expected ATTR=VALUE, got '{}'",
            term
        ))),
    }
}
