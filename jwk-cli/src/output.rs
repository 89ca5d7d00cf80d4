//! Response rendering
//!
//! JSON output wraps results in `{"status":"success","data":...}` or
//! `{"status":"error","error":...}`. Diagnostics ride along in the envelope;
//! text output prints them to stderr.

use crate::error::Error;
use jwk_provider::{Diagnostic, Diagnostics};
use serde::Serialize;
use serde_json::Value;

/// Output format for CLI responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(format!("Unknown format: {}. Use 'json' or 'text'", s)),
        }
    }
}

#[derive(Debug, Serialize)]
struct SuccessEnvelope<'a, T: Serialize> {
    status: &'static str,
    data: &'a T,
    #[serde(skip_serializing_if = "Diagnostics::is_empty")]
    diagnostics: &'a Diagnostics,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    status: &'static str,
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<&'a Diagnostic>,
}

/// Renders a success envelope
pub fn render_success<T: Serialize>(data: &T, diags: &Diagnostics) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&SuccessEnvelope {
        status: "success",
        data,
        diagnostics: diags,
    })
}

/// Renders an error envelope, listing diagnostics when the error carries them
pub fn render_error(error: &Error) -> serde_json::Result<String> {
    let diagnostics = match error {
        Error::Diagnostics(diags) => diags.iter().collect(),
        _ => Vec::new(),
    };
    serde_json::to_string_pretty(&ErrorEnvelope {
        status: "error",
        error: error.to_string(),
        diagnostics,
    })
}

fn fallback(e: serde_json::Error) -> String {
    format!(
        "{{\"status\":\"error\",\"error\":\"Serialization failed: {}\"}}",
        e
    )
}

/// Print a successful result in the chosen format
pub fn print_success<T: Serialize>(format: OutputFormat, data: &T) {
    print_success_with(format, data, &Diagnostics::new());
}

/// Print a successful result together with its warnings
pub fn print_success_with<T: Serialize>(format: OutputFormat, data: &T, diags: &Diagnostics) {
    match format {
        OutputFormat::Json => {
            println!("{}", render_success(data, diags).unwrap_or_else(fallback));
        }
        OutputFormat::Text => {
            for diagnostic in diags.iter() {
                eprintln!("{}", diagnostic);
            }
            let json = serde_json::to_value(data).unwrap_or(Value::Null);
            print_text_value(&json, 0);
        }
    }
}

/// Print an error in the chosen format
pub fn print_error(format: OutputFormat, error: &Error) {
    match format {
        OutputFormat::Json => {
            eprintln!("{}", render_error(error).unwrap_or_else(fallback));
        }
        OutputFormat::Text => match error {
            Error::Diagnostics(diags) => {
                for diagnostic in diags.iter() {
                    eprintln!("{}", diagnostic);
                }
            }
            other => eprintln!("Error: {}", other),
        },
    }
}

/// Recursively print a JSON value in human-readable text format
fn print_text_value(value: &Value, indent: usize) {
    let pad = " ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                match val {
                    Value::Object(_) | Value::Array(_) => {
                        println!("{}{}:", pad, key);
                        print_text_value(val, indent + 2);
                    }
                    // PEM blocks and other multi-line strings go below the key
                    Value::String(s) if s.contains('\n') => {
                        println!("{}{}:", pad, key);
                        for line in s.lines() {
                            println!("{}  {}", pad, line);
                        }
                    }
                    _ => println!("{}{}: {}", pad, key, format_scalar(val)),
                }
            }
        }
        Value::Array(arr) => {
            for val in arr {
                match val {
                    Value::Object(_) | Value::Array(_) => {
                        println!("{}-", pad);
                        print_text_value(val, indent + 2);
                    }
                    _ => println!("{}- {}", pad, format_scalar(val)),
                }
            }
        }
        _ => println!("{}{}", pad, format_scalar(value)),
    }
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_omits_empty_diagnostics() {
        let rendered = render_success(&json!({"kid": "k1"}), &Diagnostics::new()).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["kid"], "k1");
        assert!(value.get("diagnostics").is_none());
    }

    #[test]
    fn error_envelope_lists_diagnostics() {
        let mut diags = Diagnostics::new();
        diags.add_attribute_error("size", "Invalid attribute value for 'size'", "too small");
        let rendered = render_error(&Error::Diagnostics(diags)).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["diagnostics"][0]["severity"], "error");
        assert_eq!(value["diagnostics"][0]["attribute"], "size");
    }
}
