//! Configuration document tree
//!
//! [`Document`] is a JSON-like tree with one extra variant, [`Document::Raw`],
//! holding a callback expression that must appear unquoted in the encoded
//! output. Two encoders are provided:
//!
//! - [`Document::to_script`] writes raw expressions directly, with no
//!   placeholder pass;
//! - [`Document::encode_with`] lowers raw expressions to registry keys, encodes
//!   plain JSON and runs [`CallbackRegistry::substitute`] on the text.
//!
//! Both produce the same bytes unless a string value equals a callback key.
//!
//! The output is embedded in an inline `<script>` element, so `</` inside
//! string literals is written as `<\/`. The decoded strings are unchanged.

use indexmap::IndexMap;
use serde_json::Value;

use crate::callback::{CallbackRegistry, normalize};
use crate::error::Result;

/// Ordered key/value node of a [`Document`]
pub type DocumentMap = IndexMap<String, Document>;

/// Node of a configuration document
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
	/// `null`
	Null,
	/// `true` / `false`
	Bool(bool),
	/// Integer number
	Integer(i64),
	/// String literal
	Text(String),
	/// Ordered sequence
	List(Vec<Document>),
	/// Ordered mapping
	Map(DocumentMap),
	/// Normalized callback expression, emitted without quotes
	Raw(String),
}

impl Document {
	/// Creates a raw expression node from callback source
	///
	/// The source is normalized on the way in.
	pub fn raw(source: &str) -> Self {
		Self::Raw(normalize(source))
	}

	/// Looks up `key` if this node is a map
	pub fn get(&self, key: &str) -> Option<&Document> {
		match self {
			Self::Map(map) => map.get(key),
			_ => None,
		}
	}

	/// Returns the elements if this node is a list
	pub fn as_list(&self) -> Option<&[Document]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	/// Returns the expression if this node is raw
	pub fn as_raw(&self) -> Option<&str> {
		match self {
			Self::Raw(source) => Some(source),
			_ => None,
		}
	}

	/// Converts the tree to plain JSON, registering every raw expression in
	/// `callbacks` and putting its key in its place
	pub fn to_value(&self, callbacks: &mut CallbackRegistry) -> Value {
		match self {
			Self::Null => Value::Null,
			Self::Bool(b) => Value::Bool(*b),
			Self::Integer(n) => Value::from(*n),
			Self::Text(s) => Value::String(s.clone()),
			Self::List(items) => {
				Value::Array(items.iter().map(|item| item.to_value(callbacks)).collect())
			}
			Self::Map(map) => Value::Object(
				map.iter()
					.map(|(key, value)| (key.clone(), value.to_value(callbacks)))
					.collect(),
			),
			Self::Raw(source) => Value::String(callbacks.register(source)),
		}
	}

	/// Encodes the document with the placeholder protocol
	///
	/// Raw expressions are registered in `callbacks`, the tree is encoded as
	/// compact JSON and the keys are substituted back.
	pub fn encode_with(&self, callbacks: &mut CallbackRegistry) -> Result<String> {
		let value = self.to_value(callbacks);
		let encoded = escape_script_end(&serde_json::to_string(&value)?);
		Ok(callbacks.substitute(&encoded))
	}

	/// Encodes the document with a fresh registry
	pub fn encode(&self) -> Result<String> {
		self.encode_with(&mut CallbackRegistry::new())
	}

	/// Writes the document as a script literal, raw expressions unquoted
	pub fn to_script(&self) -> Result<String> {
		let mut out = String::new();
		self.write_script(&mut out)?;
		Ok(out)
	}

	fn write_script(&self, out: &mut String) -> Result<()> {
		match self {
			Self::Null => out.push_str("null"),
			Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
			Self::Integer(n) => out.push_str(&n.to_string()),
			Self::Text(s) => out.push_str(&string_literal(s)?),
			Self::List(items) => {
				out.push('[');
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						out.push(',');
					}
					item.write_script(out)?;
				}
				out.push(']');
			}
			Self::Map(map) => {
				out.push('{');
				for (i, (key, value)) in map.iter().enumerate() {
					if i > 0 {
						out.push(',');
					}
					out.push_str(&string_literal(key)?);
					out.push(':');
					value.write_script(out)?;
				}
				out.push('}');
			}
			Self::Raw(source) => out.push_str(source),
		}
		Ok(())
	}
}

fn string_literal(s: &str) -> Result<String> {
	Ok(escape_script_end(&serde_json::to_string(s)?))
}

/// `</` can only occur inside string literals of encoded JSON
fn escape_script_end(encoded: &str) -> String {
	encoded.replace("</", "<\\/")
}

impl From<bool> for Document {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}

impl From<i64> for Document {
	fn from(n: i64) -> Self {
		Self::Integer(n)
	}
}

impl From<u32> for Document {
	fn from(n: u32) -> Self {
		Self::Integer(i64::from(n))
	}
}

impl From<usize> for Document {
	fn from(n: usize) -> Self {
		Self::Integer(i64::try_from(n).unwrap_or(i64::MAX))
	}
}

impl From<&str> for Document {
	fn from(s: &str) -> Self {
		Self::Text(s.to_string())
	}
}

impl From<String> for Document {
	fn from(s: String) -> Self {
		Self::Text(s)
	}
}

impl From<Vec<Document>> for Document {
	fn from(items: Vec<Document>) -> Self {
		Self::List(items)
	}
}

impl From<DocumentMap> for Document {
	fn from(map: DocumentMap) -> Self {
		Self::Map(map)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn sample() -> Document {
		let mut column = DocumentMap::new();
		column.insert("name".into(), "label".into());
		column.insert("render".into(), Document::raw("function(d){\n return d; }"));

		let mut root = DocumentMap::new();
		root.insert("paging".into(), true.into());
		root.insert("pageLength".into(), 10i64.into());
		root.insert("dom".into(), Document::Null);
		root.insert("title".into(), "say \"hi\" </b>".into());
		root.insert("columns".into(), vec![Document::Map(column)].into());
		root.insert("drawCallback".into(), Document::raw("function(){}"));
		Document::Map(root)
	}

	#[rstest]
	fn test_to_script_emits_raw_unquoted() {
		let script = sample().to_script().unwrap();
		assert_eq!(
			script,
			r#"{"paging":true,"pageLength":10,"dom":null,"title":"say \"hi\" <\/b>","columns":[{"name":"label","render":function(d){ return d; }}],"drawCallback":function(){}}"#
		);
	}

	#[rstest]
	fn test_encode_matches_to_script() {
		let document = sample();
		assert_eq!(document.encode().unwrap(), document.to_script().unwrap());
	}

	#[rstest]
	fn test_script_end_is_escaped_in_strings() {
		let mut map = DocumentMap::new();
		map.insert("</script>".into(), "</script><b>x".into());
		let document = Document::Map(map);

		let script = document.to_script().unwrap();
		assert_eq!(script, r#"{"<\/script>":"<\/script><b>x"}"#);
		assert_eq!(document.encode().unwrap(), script);

		let decoded: Value = serde_json::from_str(&script).unwrap();
		assert_eq!(decoded["</script>"], "</script><b>x");
	}

	#[rstest]
	fn test_to_value_registers_callbacks() {
		let mut registry = CallbackRegistry::new();
		let value = sample().to_value(&mut registry);
		assert_eq!(registry.len(), 2);

		let key = value["drawCallback"].as_str().unwrap();
		assert_eq!(registry.get(key), Some("function(){}"));
	}

	#[rstest]
	fn test_accessors() {
		let document = sample();
		assert_eq!(document.get("paging"), Some(&Document::Bool(true)));
		let columns = document.get("columns").and_then(Document::as_list).unwrap();
		assert_eq!(
			columns[0].get("render").and_then(Document::as_raw),
			Some("function(d){ return d; }")
		);
		assert_eq!(Document::Null.get("paging"), None);
	}
}
