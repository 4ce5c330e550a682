//! Rendering of TER responses.
//!
//! Human output comes in four shapes picked per command; `--raw` bypasses
//! all of them and prints the JSON body on a single line.

use serde_json::{Map, Value};
use std::fmt::Display;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

use crate::core::dto::Messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultFormat {
    /// Only the success message
    None,
    /// Aligned `key: value` lines
    #[default]
    KeyValue,
    /// Key/value lines plus one section per nested structure
    Detail,
    /// Column-aligned table of the listed items
    Table,
}

pub struct FormatService {
    output: Box<dyn Write + Send>,
    messages: Messages,
    format: ResultFormat,
}

impl FormatService {
    pub fn new(output: Box<dyn Write + Send>, messages: Messages, format: ResultFormat) -> Self {
        Self {
            output,
            messages,
            format,
        }
    }

    /// Plain line outside the result block
    pub fn writeln(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)?;
        self.output.flush()
    }

    /// Body as compact JSON on one line
    pub fn format_raw(&mut self, body: &Value) -> io::Result<()> {
        let rendered = serde_json::to_string(body).map_err(io::Error::from)?;
        writeln!(self.output, "{}", rendered)?;
        self.output.flush()
    }

    pub fn format_result(&mut self, body: &Value) -> io::Result<()> {
        let lines = match self.format {
            ResultFormat::None => Vec::new(),
            ResultFormat::KeyValue => key_value_lines(body),
            ResultFormat::Detail => detail_lines(body),
            ResultFormat::Table => table_lines(body),
        };

        if !lines.is_empty() {
            self.title()?;
            for line in lines {
                writeln!(self.output, "{}", line)?;
            }
            writeln!(self.output)?;
        }

        writeln!(self.output, "[OK] {}", self.messages.success)?;
        self.output.flush()
    }

    /// Server answered with a status outside the accepted codes
    pub fn format_error(&mut self, status: u16, body: &Value) -> io::Result<()> {
        let reason = error_reason(body).unwrap_or_else(|| format!("HTTP status {}", status));
        writeln!(self.output, "[ERROR] {} Reason: {}", self.messages.failure, reason)?;
        self.output.flush()
    }

    /// The request never produced a response
    pub fn format_transport_error(&mut self, error: &dyn Display) -> io::Result<()> {
        writeln!(self.output, "[ERROR] {} Reason: {}", self.messages.failure, error)?;
        self.output.flush()
    }

    fn title(&mut self) -> io::Result<()> {
        let title = &self.messages.title;
        writeln!(self.output, "{}", title)?;
        writeln!(self.output, "{}", "=".repeat(title.width().max(1)))?;
        writeln!(self.output)
    }
}

fn error_reason(body: &Value) -> Option<String> {
    match body {
        Value::Object(map) => {
            let text = |key: &str| map.get(key).and_then(Value::as_str).filter(|s| !s.is_empty());
            match (text("error"), text("error_description").or_else(|| text("message"))) {
                (Some(error), Some(description)) => Some(format!("{} ({})", description, error)),
                (Some(error), None) => Some(error.to_string()),
                (None, Some(description)) => Some(description.to_string()),
                (None, None) => None,
            }
        }
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    }
}

fn is_scalar_list(items: &[Value]) -> bool {
    items.iter().all(|item| !item.is_object() && !item.is_array())
}

fn is_table(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(Value::is_object)
}

/// Single-cell rendering of any value
pub fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => (if *b { "yes" } else { "no" }).to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) if is_scalar_list(items) => {
            items.iter().map(scalar).collect::<Vec<_>>().join(", ")
        }
        other => other.to_string(),
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn aligned(pairs: &[(String, String)], indent: &str) -> Vec<String> {
    let width = pairs.iter().map(|(key, _)| key.width()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(key, value)| {
            format!("{}{} {}", indent, pad(&format!("{}:", key), width + 1), value)
                .trim_end()
                .to_string()
        })
        .collect()
}

fn key_value_lines(body: &Value) -> Vec<String> {
    match body {
        Value::Object(map) => {
            let pairs: Vec<(String, String)> =
                map.iter().map(|(key, value)| (key.clone(), scalar(value))).collect();
            aligned(&pairs, "")
        }
        Value::Null => Vec::new(),
        other => vec![scalar(other)],
    }
}

fn detail_lines(body: &Value) -> Vec<String> {
    let map = match body {
        Value::Object(map) => map,
        Value::Array(items) if is_table(items) => return table_lines(body),
        other => return key_value_lines(other),
    };

    let (sections, plain): (Vec<_>, Vec<_>) = map.iter().partition(|(_, value)| match value {
        Value::Object(_) => true,
        Value::Array(items) => !is_scalar_list(items),
        _ => false,
    });

    let pairs: Vec<(String, String)> = plain
        .iter()
        .map(|(key, value)| ((*key).clone(), scalar(value)))
        .collect();
    let mut lines = aligned(&pairs, "");

    for (key, value) in sections {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(key.clone());
        lines.push("-".repeat(key.width().max(1)));
        match value {
            Value::Object(nested) => {
                let pairs: Vec<(String, String)> = nested
                    .iter()
                    .map(|(key, value)| (key.clone(), scalar(value)))
                    .collect();
                lines.extend(aligned(&pairs, "  "));
            }
            Value::Array(items) if is_table(items) => {
                lines.extend(render_table(items).into_iter().map(|line| format!("  {}", line)));
            }
            other => lines.push(format!("  {}", scalar(other))),
        }
    }

    lines
}

fn table_lines(body: &Value) -> Vec<String> {
    match body {
        Value::Array(items) => {
            if items.is_empty() {
                vec!["No results.".to_string()]
            } else if is_table(items) {
                render_table(items)
            } else {
                items.iter().map(scalar).collect()
            }
        }
        Value::Object(map) => table_in_object(map),
        other => key_value_lines(other),
    }
}

/// Scalars of the envelope as key/value, then the first list of objects as table
fn table_in_object(map: &Map<String, Value>) -> Vec<String> {
    let rows = map.iter().find_map(|(key, value)| match value {
        Value::Array(items) if items.is_empty() || is_table(items) => Some((key, items)),
        _ => None,
    });

    let Some((rows_key, items)) = rows else {
        return key_value_lines(&Value::Object(map.clone()));
    };

    let pairs: Vec<(String, String)> = map
        .iter()
        .filter(|(key, _)| *key != rows_key)
        .map(|(key, value)| (key.clone(), scalar(value)))
        .collect();

    let mut lines = aligned(&pairs, "");
    if !lines.is_empty() {
        lines.push(String::new());
    }
    if items.is_empty() {
        lines.push("No results.".to_string());
    } else {
        lines.extend(render_table(items));
    }
    lines
}

fn render_table(items: &[Value]) -> Vec<String> {
    let mut columns: Vec<&str> = Vec::new();
    for item in items {
        if let Value::Object(row) = item {
            for key in row.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|column| item.get(*column).map(scalar).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(column.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render_row = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(columns.clone()));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        lines.push(render_row(row.iter().map(String::as_str).collect()));
    }
    lines
}
