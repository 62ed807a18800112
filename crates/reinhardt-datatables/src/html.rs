//! HTML fragments for the table skeleton and its initialisation script

use std::borrow::Cow;
use std::fmt::Write;

use serde_json::Value;

use crate::column::{ColumnCollection, ColumnDescriptor};

const HIDDEN_STYLE: &str = " style=\"display: none;\"";

/// Escape HTML special characters
///
/// # Examples
///
/// ```
/// use reinhardt_datatables::html::escape_html;
///
/// assert_eq!(escape_html("<b>Tom & 'Jerry'</b>"), "&lt;b&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/b&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
	let mut escaped = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'&' => escaped.push_str("&amp;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}
	escaped
}

/// Text shown in a static cell for a resolved value
///
/// Strings are shown as-is, `null` as an empty cell, other scalars in their
/// literal form and composite values as compact JSON.
pub fn display_value(value: &Value) -> Cow<'_, str> {
	match value {
		Value::String(s) => Cow::Borrowed(s),
		Value::Null => Cow::Borrowed(""),
		Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
		Value::Number(n) => Cow::Owned(n.to_string()),
		other => Cow::Owned(other.to_string()),
	}
}

fn push_cell(out: &mut String, tag: &str, column: &ColumnDescriptor, content: &str) {
	let style = if column.is_visible() { "" } else { HIDDEN_STYLE };
	let _ = write!(out, "<{tag}{style}>{}</{tag}>", escape_html(content));
}

/// Opening `<table>` tag and the header row
pub fn table_head(table_id: &str, class: Option<&str>, columns: &ColumnCollection) -> String {
	let mut out = String::from("<table cellpadding=\"0\" cellspacing=\"0\" border=\"0\"");
	if let Some(class) = class {
		let _ = write!(out, " class=\"{}\"", escape_html(class));
	}
	let _ = write!(out, " id=\"{}\"><thead><tr>", escape_html(table_id));
	for column in columns {
		push_cell(&mut out, "th", column, column.title());
	}
	out.push_str("</tr></thead>");
	out
}

/// One pre-rendered body row; `values` are in column order
pub fn data_row(columns: &ColumnCollection, values: &[Value]) -> String {
	let mut out = String::from("<tr>");
	for (column, value) in columns.iter().zip(values) {
		push_cell(&mut out, "td", column, &display_value(value));
	}
	out.push_str("</tr>");
	out
}

/// Placeholder row shown until the first server-side draw
///
/// `loading_html` is trusted markup and is emitted unescaped.
pub fn loading_row(column_count: usize, loading_html: &str) -> String {
	format!(
		"<tr><td colspan=\"{}\" class=\"dataTables_empty\">{loading_html}</td></tr>",
		column_count.max(1)
	)
}

/// Wraps `rows` in a body and closes the table opened by [`table_head`]
pub fn table_body(rows: &str) -> String {
	format!("<tbody>{rows}</tbody></table>")
}

/// Script that initialises the client widget with `options`
///
/// The widget instance is bound to a page variable named after the table id,
/// so host scripts can reach its API. Ids that are not script identifiers get
/// no binding.
pub fn init_script(table_id: &str, options: &str) -> String {
	let selector = escape_script_id(table_id);
	let binding = if is_script_identifier(table_id) {
		format!("var {table_id} = ")
	} else {
		String::new()
	};
	format!(
		"<script type=\"text/javascript\">$(document).ready(function(){{ {binding}$('#{selector}').DataTable({options}); }});</script>"
	)
}

fn is_script_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn escape_script_id(table_id: &str) -> String {
	table_id
		.chars()
		.filter(|c| !matches!(c, '\'' | '\\' | '<' | '>'))
		.collect()
}
