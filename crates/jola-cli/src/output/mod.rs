use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// A record that knows its compact table projection. JSON output always
/// carries the full record; tables show these cells.
pub trait TableRow {
    fn headers() -> &'static [&'static str];

    /// Cells in header order. `now` anchors relative timestamps.
    fn cells(&self, now: DateTime<Utc>) -> Vec<String>;
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Render a list of records in the requested format.
pub fn render_rows<T: Serialize + TableRow>(
    items: &[T],
    format: OutputFormat,
    now: DateTime<Utc>,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Raw => Ok(serde_json::to_string(items)?),
        OutputFormat::Table if items.is_empty() => Ok(String::from("(no rows)")),
        OutputFormat::Table => {
            let rows = items.iter().map(|item| item.cells(now)).collect::<Vec<_>>();
            Ok(table::render_table(T::headers(), &rows, table_options()))
        }
    }
}

/// Render any serializable value; tables show an object as key/value pairs.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => Ok(render_key_value(&serde_json::to_value(value)?)),
    }
}

pub fn output_rows<T: Serialize + TableRow>(items: &[T], format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render_rows(items, format, Utc::now())?);
    Ok(())
}

pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

fn render_key_value(value: &Value) -> String {
    let rows = match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
            .collect::<Vec<_>>(),
        scalar => vec![vec![String::from("value"), value_to_cell(scalar)]],
    };
    table::render_table(&["key", "value"], &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(|item| !item.is_object()) => items
            .iter()
            .map(value_to_cell)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
