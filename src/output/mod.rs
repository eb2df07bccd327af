//! Output formatting module

use anyhow::Result;
use chrono::DateTime;
use console::measure_text_width;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value;

use crate::config::OutputFormat;

/// Print output in the configured format
pub fn print_output<T: Serialize>(data: &T, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(data),
        OutputFormat::Pretty => print_json_pretty(data),
        OutputFormat::Compact => print_compact(data),
        OutputFormat::Table => {
            let value = serde_json::to_value(data)?;
            match value {
                Value::Array(_) => print_json_pretty(&value),
                _ => print_compact(&value),
            }
        }
    }
}

/// Print a list of resources; tables use `properties` if given, otherwise
/// the resource's default columns
pub fn print_list(
    items: &[Value],
    default_columns: &[&str],
    properties: &[String],
    format: &OutputFormat,
) -> Result<()> {
    if *format != OutputFormat::Table {
        return print_output(&items, format);
    }

    let columns: Vec<&str> = if properties.is_empty() {
        default_columns.to_vec()
    } else {
        properties.iter().map(|p| p.as_str()).collect()
    };

    for line in render_table(items, &columns) {
        println!("{}", line);
    }
    Ok(())
}

/// Print a single resource; tables render as one row
pub fn print_item(
    item: &Value,
    default_columns: &[&str],
    properties: &[String],
    format: &OutputFormat,
) -> Result<()> {
    print_list(std::slice::from_ref(item), default_columns, properties, format)
}

/// Print as formatted JSON
pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    println!("{}", serde_json::to_string(data)?);
    Ok(())
}

/// Print as pretty JSON
pub fn print_json_pretty<T: Serialize>(data: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Print compact output
pub fn print_compact<T: Serialize>(data: &T) -> Result<()> {
    let value = serde_json::to_value(data)?;
    print_value_compact(&value, 0);
    Ok(())
}

fn print_value_compact(value: &Value, indent: usize) {
    let prefix = "  ".repeat(indent);

    match value {
        Value::Object(map) => {
            for (key, val) in map {
                match val {
                    Value::Object(_) | Value::Array(_) => {
                        println!("{}{}: ", prefix, key.cyan());
                        print_value_compact(val, indent + 1);
                    }
                    _ => {
                        println!("{}{}: {}", prefix, key.cyan(), format_value(val));
                    }
                }
            }
        }
        Value::Array(arr) => {
            for (i, val) in arr.iter().enumerate() {
                println!("{}[{}]", prefix, i.to_string().dimmed());
                print_value_compact(val, indent + 1);
            }
        }
        _ => {
            println!("{}{}", prefix, format_value(value));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".dimmed().to_string(),
        Value::Bool(b) => {
            if *b {
                "true".green().to_string()
            } else {
                "false".red().to_string()
            }
        }
        Value::Number(n) => n.to_string().yellow().to_string(),
        Value::String(s) => s.clone(),
        _ => value.to_string(),
    }
}

/// Render rows as aligned lines, header first
pub fn render_table(items: &[Value], columns: &[&str]) -> Vec<String> {
    let header: Vec<String> = columns
        .iter()
        .map(|c| c.replace('.', "_").to_uppercase().bold().underline().to_string())
        .collect();

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|c| colour_cell(c, cell_text(lookup(item, c))))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            std::iter::once(&header[i])
                .chain(rows.iter().map(|r| &r[i]))
                .map(|s| measure_text_width(s))
                .max()
                .unwrap_or(0)
        })
        .collect();

    std::iter::once(&header)
        .chain(rows.iter())
        .map(|cells| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| pad(cell, *width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect()
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(measure_text_width(cell));
    format!("{}{}", cell, " ".repeat(fill))
}

static NULL: Value = Value::Null;

/// Resolve a dotted path such as `plan.name`
fn lookup<'a>(item: &'a Value, path: &str) -> &'a Value {
    path.split('.')
        .try_fold(item, |v, key| v.get(key))
        .unwrap_or(&NULL)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) if s.is_empty() => "-".to_string(),
        Value::String(s) => format_timestamp(s).unwrap_or_else(|| s.clone()),
        Value::Array(arr) => arr.iter().map(cell_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
    }
}

/// RFC 3339 timestamps are shortened to `YYYY-MM-DD HH:MM`
fn format_timestamp(s: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

fn colour_cell(column: &str, text: String) -> String {
    if column != "status" && !column.ends_with(".status") {
        return text;
    }

    match text.to_lowercase().as_str() {
        "active" | "complete" | "completed" | "online" | "issued" => text.green().to_string(),
        "pending" | "in-progress" | "in_progress" | "awaiting customer response" => {
            text.yellow().to_string()
        }
        "failed" | "error" | "deleted" | "expired" | "cancelled" => text.red().to_string(),
        _ => text,
    }
}

/// Print success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Print warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

/// Print info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;
    use serde_json::json;

    fn plain(lines: Vec<String>) -> Vec<String> {
        lines
            .into_iter()
            .map(|l| strip_ansi_codes(&l).to_string())
            .collect()
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let items = vec![
            json!({"id": "vpc-abc123", "name": "prod", "region": {"name": "Manchester"}}),
            json!({"id": "vpc-1", "name": null, "region": {"name": "London"}}),
        ];

        let lines = plain(render_table(&items, &["id", "name", "region.name"]));
        assert_eq!(
            lines,
            vec![
                "ID          NAME  REGION_NAME",
                "vpc-abc123  prod  Manchester",
                "vpc-1       -     London",
            ]
        );
    }

    #[test]
    fn test_render_table_formats_timestamps_and_lists() {
        let items = vec![json!({
            "created_at": "2024-03-05T14:07:59+00:00",
            "tags": ["a", "b"],
            "count": 3
        })];

        let lines = plain(render_table(&items, &["created_at", "tags", "count"]));
        assert_eq!(lines[1], "2024-03-05 14:07  a, b  3");
    }

    #[test]
    fn test_status_cells_keep_width() {
        let items = vec![json!({"status": "active"}), json!({"status": "failed"})];
        let lines = render_table(&items, &["status"]);
        assert!(lines[1].contains("active"));
        assert_eq!(measure_text_width(&lines[1]), "active".len());
    }

    #[test]
    fn test_lookup_missing_path() {
        let item = json!({"a": {"b": 1}});
        assert_eq!(lookup(&item, "a.b"), &json!(1));
        assert_eq!(lookup(&item, "a.c"), &Value::Null);
        assert_eq!(lookup(&item, "x.y"), &Value::Null);
    }
}
