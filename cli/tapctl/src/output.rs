//! Output formatting for CLI commands.

use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};
use tapnet_networking::InterfaceInfo;

const CLI_SCHEMA_VERSION: &str = "tapnet.cli.v1";

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

/// One interface as a table row.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct InterfaceRow {
    #[tabled(rename = "Role")]
    pub role: &'static str,

    #[tabled(rename = "Name")]
    pub name: String,

    #[tabled(rename = "Index", display = "display_option")]
    pub index: Option<u32>,

    #[tabled(rename = "IPv4")]
    pub ipv4_address: String,

    #[tabled(rename = "MAC", display = "display_option")]
    pub hardware_address: Option<String>,
}

impl InterfaceRow {
    pub fn new(role: &'static str, info: &InterfaceInfo, index: Option<u32>) -> Self {
        Self {
            role,
            name: info.name.clone(),
            index,
            ipv4_address: info.ipv4_address.to_string(),
            hardware_address: info.hardware_address.map(|m| m.to_string()),
        }
    }
}

fn display_option<T: ToString>(opt: &Option<T>) -> String {
    opt.as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string())
}

/// Print rows in the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No items found.".dimmed());
            } else {
                println!("{}", Table::new(data));
            }
        }
        OutputFormat::Json => println!("{}", format_json(data, "[]")),
    }
}

/// Print a single item as JSON.
pub fn print_single<T: Serialize>(data: &T) {
    println!("{}", format_json(data, "{}"));
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue().bold(), message);
}

fn format_json<T: Serialize + ?Sized>(data: &T, fallback: &str) -> String {
    let value = serde_json::to_value(data).unwrap_or_else(|_| serde_json::json!({}));
    let wrapped = wrap_with_schema(value);
    let sorted = sort_json_value(wrapped);
    serde_json::to_string_pretty(&sorted).unwrap_or_else(|_| fallback.to_string())
}

fn wrap_with_schema(value: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "schemaVersion": CLI_SCHEMA_VERSION,
        "data": value
    })
}

fn sort_json_value(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Array(values) => {
            serde_json::Value::Array(values.into_iter().map(sort_json_value).collect())
        }
        serde_json::Value::Object(entries) => {
            let mut pairs: Vec<_> = entries.into_iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            let mut mapped = serde_json::Map::new();
            for (key, value) in pairs {
                mapped.insert(key, sort_json_value(value));
            }
            serde_json::Value::Object(mapped)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn json_output_is_wrapped_and_sorted() {
        let out = format_json(&serde_json::json!({ "zeta": 1, "alpha": { "b": 2, "a": 1 } }), "{}");
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["schemaVersion"], CLI_SCHEMA_VERSION);
        let keys: Vec<_> = value["data"]["alpha"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn interface_row_from_empty_info() {
        let row = InterfaceRow::new("gateway", &InterfaceInfo::empty(), None);
        assert_eq!(row.ipv4_address, Ipv4Addr::UNSPECIFIED.to_string());
        assert_eq!(display_option(&row.hardware_address), "-");
        assert_eq!(display_option(&row.index), "-");
    }
}
