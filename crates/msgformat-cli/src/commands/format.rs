//! Implementation of the `msgformat format` command.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Args;
use miette::{IntoDiagnostic, Result};
use msgformat::{default_locale, MessageFormat, Value};
use serde::Serialize;

use crate::output::PatternDiagnostic;

/// Arguments for the format command.
#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Pattern to format
    pub pattern: String,

    /// Locale for plural rules and number/date formatting (e.g., en, de, ar)
    #[arg(long, env = "MSGFORMAT_LOCALE")]
    pub locale: Option<String>,

    /// Parameters in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Fail when the pattern reads a parameter that was not given
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for format results.
#[derive(Serialize)]
pub struct FormatResult {
    pub result: String,
    pub locale: String,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format '{s}': expected name=value"))?;
    Ok((key.to_string(), value.to_string()))
}

/// Interpret a command-line parameter: integers, then floats, then ISO
/// dates, else the raw string.
fn parse_value(raw: String) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = raw.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S") {
        return Value::from(date_time);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Value::from(date);
    }
    Value::from(raw)
}

/// Run the format command.
pub fn run_format(args: FormatArgs, verbose: bool) -> Result<i32> {
    let locale = args.locale.unwrap_or_else(default_locale);
    let message = match MessageFormat::builder()
        .pattern(args.pattern.as_str())
        .locale(locale.as_str())
        .strict_missing_params(args.strict)
        .build()
    {
        Ok(message) => message,
        Err(err) => {
            let diagnostic = PatternDiagnostic::from_syntax_error("pattern", &args.pattern, &err);
            return Err(diagnostic.into());
        }
    };

    let params: HashMap<String, Value> = args
        .params
        .into_iter()
        .map(|(k, v)| (k, parse_value(v)))
        .collect();

    if verbose {
        eprintln!(
            "locale {}, arguments: {}",
            message.locale(),
            message.message().argument_ids().join(", ")
        );
    }

    match message.format(&params) {
        Ok(result) => {
            if args.json {
                let output = FormatResult { result, locale };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{result}");
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("Format error: {e}");
            }
            Ok(exitcode::DATAERR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_split_on_first_equals() {
        assert_eq!(
            parse_key_val("expr=a=b"),
            Ok(("expr".to_string(), "a=b".to_string()))
        );
        assert!(parse_key_val("novalue").is_err());
    }

    #[test]
    fn parameters_are_typed() {
        assert_eq!(parse_value("42".into()), Value::Number(42));
        assert_eq!(parse_value("2.5".into()), Value::Float(2.5));
        assert!(matches!(parse_value("2024-01-15".into()), Value::DateTime(_)));
        assert_eq!(parse_value("female".into()), Value::from("female"));
        assert_eq!(parse_value("inf".into()), Value::from("inf"));
    }
}
