//! Implementation of the `msgformat inspect` command.

use clap::Args;
use miette::{IntoDiagnostic, Result};
use msgformat::parse;

use crate::output::table::{element_rows, format_element_table};
use crate::output::PatternDiagnostic;

/// Arguments for the inspect command.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Pattern to parse
    pub pattern: String,

    /// Output the syntax tree as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the inspect command.
pub fn run_inspect(args: InspectArgs) -> Result<i32> {
    let message = match parse(&args.pattern) {
        Ok(message) => message,
        Err(err) => {
            let diagnostic = PatternDiagnostic::from_syntax_error("pattern", &args.pattern, &err);
            return Err(diagnostic.into());
        }
    };

    if args.json {
        let json_output = serde_json::to_string_pretty(&message).into_diagnostic()?;
        println!("{json_output}");
    } else {
        println!("{}", format_element_table(&element_rows(&message)));
        let ids = message.argument_ids();
        if !ids.is_empty() {
            println!("\nArguments: {}", ids.join(", "));
        }
    }

    Ok(exitcode::OK)
}
