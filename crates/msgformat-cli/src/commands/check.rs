//! Implementation of the `msgformat check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use miette::{miette, IntoDiagnostic, Report, Result};
use msgformat::parse;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::output::PatternDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Message catalogs to check: JSON objects mapping keys to patterns
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one failing pattern.
#[derive(Debug, Serialize)]
struct CheckFailure {
    file: String,
    key: String,
    line: usize,
    column: usize,
    offset: usize,
    message: String,
    suggestions: Vec<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs, verbose: bool) -> Result<i32> {
    let mut failures = Vec::new();
    let mut checked = 0;

    for path in &args.files {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read catalog {}: {}", path.display(), e))?;
        let catalog: Map<String, JsonValue> = serde_json::from_str(&content)
            .into_diagnostic()
            .map_err(|e| miette!("Catalog {} is not a JSON object: {}", path.display(), e))?;

        for (key, value) in &catalog {
            let Some(pattern) = value.as_str() else {
                return Err(miette!(
                    "{}: value of '{}' must be a string pattern",
                    path.display(),
                    key
                ));
            };
            checked += 1;
            match parse(pattern) {
                Ok(_) => {
                    if verbose && !args.json {
                        println!("{} {}#{}", "ok".green(), path.display(), key);
                    }
                }
                Err(err) => {
                    if !args.json {
                        let name = format!("{}#{}", path.display(), key);
                        let diagnostic = PatternDiagnostic::from_syntax_error(&name, pattern, &err);
                        eprintln!("{:?}", Report::new(diagnostic));
                    }
                    failures.push(CheckFailure {
                        file: path.display().to_string(),
                        key: key.clone(),
                        line: err.line,
                        column: err.column,
                        offset: err.offset,
                        message: err.message.clone(),
                        suggestions: err.suggestions.clone(),
                    });
                }
            }
        }
    }

    if args.json {
        let json_output = serde_json::to_string_pretty(&failures).into_diagnostic()?;
        println!("{json_output}");
    } else if failures.is_empty() {
        println!("{} {} patterns checked", "✓".green(), checked);
    } else {
        println!(
            "{} {} of {} patterns failed",
            "✗".red(),
            failures.len(),
            checked
        );
    }

    if failures.is_empty() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
