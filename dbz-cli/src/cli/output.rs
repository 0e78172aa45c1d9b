//! Result formatting shared by the query commands

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::*;
use csv::Writer;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Output format for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Single-line JSON
    JsonCompact,
    /// Comma-separated rows, one per record
    Csv,
}

/// How chatty the command is on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayStyle {
    /// Results only
    Default,
    /// Query text, timings and progress alongside results
    Verbose,
}

impl DisplayStyle {
    pub fn is_verbose(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}

/// Envelope keys that commonly hold the record array
const ENVELOPE_KEYS: [&str; 3] = ["data", "records", "rows"];

/// Format a response body according to the requested output format
pub fn format_output(data: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(data).context("Failed to format JSON output")
        }
        OutputFormat::JsonCompact => {
            serde_json::to_string(data).context("Failed to format JSON output")
        }
        OutputFormat::Csv => json_to_csv(records_of(data)),
    }
}

/// Write formatted output to `output` if given, otherwise stdout
pub fn emit(formatted: &str, output: Option<&Path>, style: DisplayStyle) -> Result<()> {
    if let Some(path) = output {
        fs::write(path, formatted)
            .with_context(|| format!("Failed to write output to: {}", path.display()))?;
        if style.is_verbose() {
            println!(
                "Results saved to: {}",
                path.display().to_string().bright_green()
            );
        }
    } else {
        if style.is_verbose() {
            println!("Results:");
            println!();
        }
        println!("{}", formatted);
    }
    Ok(())
}

/// Unwrap a `{ "data": [...] }`-style envelope if present
fn records_of(data: &Value) -> &Value {
    if let Value::Object(obj) = data {
        for key in ENVELOPE_KEYS {
            if let Some(inner) = obj.get(key).filter(|v| v.is_array()) {
                return inner;
            }
        }
    }
    data
}

fn json_to_csv(data: &Value) -> Result<String> {
    if matches!(data, Value::Array(arr) if arr.is_empty()) {
        return Ok("No data\n".to_string());
    }

    let mut wtr = Writer::from_writer(Vec::new());

    match data {
        Value::Array(arr) => {
            // Union of keys in first-seen order so sparse records keep every column
            let mut headers: Vec<String> = Vec::new();
            for item in arr {
                if let Value::Object(obj) = item {
                    for key in obj.keys() {
                        if !headers.contains(key) {
                            headers.push(key.clone());
                        }
                    }
                }
            }

            if headers.is_empty() {
                wtr.write_record(["value"]).context("Failed to write CSV header")?;
                for item in arr {
                    wtr.write_record([json_value_to_string(item)])
                        .context("Failed to write CSV row")?;
                }
            } else {
                wtr.write_record(&headers).context("Failed to write CSV header")?;
                for item in arr {
                    if let Value::Object(obj) = item {
                        let row = headers.iter().map(|h| {
                            json_value_to_string(obj.get(h).unwrap_or(&Value::Null))
                        });
                        wtr.write_record(row).context("Failed to write CSV row")?;
                    }
                }
            }
        }
        Value::Object(obj) => {
            wtr.write_record(["key", "value"]).context("Failed to write CSV header")?;
            for (key, value) in obj {
                wtr.write_record([key.clone(), json_value_to_string(value)])
                    .with_context(|| format!("Failed to write CSV row: {}", key))?;
            }
        }
        _ => {
            wtr.write_record(["value"]).context("Failed to write CSV header")?;
            wtr.write_record([json_value_to_string(data)]).context("Failed to write CSV row")?;
        }
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

fn json_value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compact_json() {
        let out = format_output(&json!({"a": 1}), OutputFormat::JsonCompact).unwrap();
        assert_eq!(out, r#"{"a":1}"#);
    }

    #[test]
    fn test_csv_unwraps_envelope() {
        let data = json!({
            "data": [
                {"id": 1, "name": "Acme, Inc."},
                {"id": 2, "name": "Globex", "region": "EMEA"}
            ],
            "total": 2
        });

        let out = format_output(&data, OutputFormat::Csv).unwrap();
        assert_eq!(out, "id,name,region\n1,\"Acme, Inc.\",\n2,Globex,EMEA\n");
    }

    #[test]
    fn test_csv_empty_array() {
        let out = format_output(&json!({"records": []}), OutputFormat::Csv).unwrap();
        assert_eq!(out, "No data\n");
    }

    #[test]
    fn test_csv_plain_object() {
        let out = format_output(&json!({"count": 3}), OutputFormat::Csv).unwrap();
        assert_eq!(out, "key,value\ncount,3\n");
    }

    #[test]
    fn test_csv_scalar_array() {
        let out = format_output(&json!(["a", "b\"c"]), OutputFormat::Csv).unwrap();
        assert_eq!(out, "value\na\n\"b\"\"c\"\n");
    }

    #[test]
    fn test_csv_quotes_carriage_returns() {
        let data = json!([
            {"id": 1, "note": "line1\rline2"},
            {"id": 2, "note": "line1\r\nline2"}
        ]);

        let out = format_output(&data, OutputFormat::Csv).unwrap();
        assert_eq!(out, "id,note\n1,\"line1\rline2\"\n2,\"line1\r\nline2\"\n");
    }
}
