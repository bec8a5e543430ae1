//! Output formatting for jeedom-cli (table, json, csv)

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print an info message (unless in quiet mode)
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg);
        }
    }

    /// Print a raw server answer verbatim
    pub fn raw(&self, body: &str) {
        match self.format {
            OutputFormat::Json => println!("{}", Value::String(body.to_string())),
            _ => println!("{}", body),
        }
    }

    /// Print a decoded JSON document
    pub fn json(&self, value: &Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        );
    }

    /// Print data in the configured format
    pub fn print<T: Tabled + Serialize>(&self, data: &[T]) {
        match self.format {
            OutputFormat::Table => {
                if data.is_empty() {
                    if !self.quiet {
                        println!("No data");
                    }
                } else {
                    let table = Table::new(data).to_string();
                    println!("{}", table);
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| "[]".to_string())
                );
            }
            OutputFormat::Csv => {
                for line in csv_lines(data) {
                    println!("{}", line);
                }
            }
        }
    }
}

/// Render data as CSV lines, header first, in table column order
fn csv_lines<T: Tabled>(data: &[T]) -> Vec<String> {
    if data.is_empty() {
        return Vec::new();
    }

    let headers: Vec<String> = T::headers().iter().map(|h| escape_csv(h)).collect();
    let mut lines = vec![headers.join(",")];
    for item in data {
        let values: Vec<String> = item.fields().iter().map(|v| escape_csv(v)).collect();
        lines.push(values.join(","));
    }
    lines
}

/// Escape a value for CSV output
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// =============================================================================
// JSON helpers
// =============================================================================

/// Entries of a read response: array items, a lone object, or nothing for
/// the empty answer
pub fn entries(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        _ => Vec::new(),
    }
}

/// Display form of a field; `-` when missing or null
pub fn field(value: &Value, key: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) if s.is_empty() => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Jeedom encodes flags as `"1"`/`"0"` or numbers
pub fn flag(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::Bool(true)) => "Yes".to_string(),
        Some(Value::Number(n)) if n.as_i64() == Some(1) => "Yes".to_string(),
        Some(Value::String(s)) if s == "1" => "Yes".to_string(),
        None | Some(Value::Null) => "-".to_string(),
        Some(_) => "No".to_string(),
    }
}

// =============================================================================
// Display types for various commands
// =============================================================================

/// Object display for objects command
#[derive(Debug, Tabled, Serialize)]
pub struct ObjectRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Parent")]
    pub parent: String,
    #[tabled(rename = "Visible")]
    pub visible: String,
}

impl From<&Value> for ObjectRow {
    fn from(value: &Value) -> Self {
        Self {
            id: field(value, "id"),
            name: field(value, "name"),
            parent: field(value, "father_id"),
            visible: flag(value, "isVisible"),
        }
    }
}

/// Equipment display for equipment command
#[derive(Debug, Tabled, Serialize)]
pub struct EquipmentRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Plugin")]
    pub plugin: String,
    #[tabled(rename = "Enabled")]
    pub enabled: String,
}

impl From<&Value> for EquipmentRow {
    fn from(value: &Value) -> Self {
        Self {
            id: field(value, "id"),
            name: field(value, "name"),
            plugin: field(value, "eqType_name"),
            enabled: flag(value, "isEnable"),
        }
    }
}

/// Command display for commands command
#[derive(Debug, Tabled, Serialize)]
pub struct CommandRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub cmd_type: String,
    #[tabled(rename = "Subtype")]
    pub sub_type: String,
    #[tabled(rename = "Unit")]
    pub unit: String,
}

impl From<&Value> for CommandRow {
    fn from(value: &Value) -> Self {
        Self {
            id: field(value, "id"),
            name: field(value, "name"),
            cmd_type: field(value, "type"),
            sub_type: field(value, "subType"),
            unit: field(value, "unite"),
        }
    }
}

/// Per-object totals for full-data command
#[derive(Debug, Tabled, Serialize)]
pub struct SummaryRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Object")]
    pub object: String,
    #[tabled(rename = "Equipment")]
    pub equipment: usize,
    #[tabled(rename = "Commands")]
    pub commands: usize,
}

impl From<&Value> for SummaryRow {
    fn from(value: &Value) -> Self {
        let eq_logics = value
            .get("eqLogics")
            .map(entries)
            .unwrap_or_default();
        let commands = eq_logics
            .iter()
            .map(|eq| eq.get("cmds").map(|c| entries(c).len()).unwrap_or(0))
            .sum();

        Self {
            id: field(value, "id"),
            object: field(value, "name"),
            equipment: eq_logics.len(),
            commands,
        }
    }
}
