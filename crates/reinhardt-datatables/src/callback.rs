//! Embedding callback expressions in encoded configuration documents
//!
//! Configuration documents are encoded as JSON, but some option values must
//! reach the client as executable expressions rather than string literals. The
//! registry implements the placeholder protocol for that:
//!
//! 1. each callback source is [normalized](normalize) to a single line;
//! 2. the normalized source is [registered](CallbackRegistry::register) under a
//!    key derived from its content, and the key takes its place in the document;
//! 3. the document is encoded as usual;
//! 4. [`CallbackRegistry::substitute`] replaces every quoted key in the encoded
//!    text with the bare source.
//!
//! Keys are the first 128 bits of a SHA-256 digest, hex encoded, so they do not
//! collide with ordinary string values in practice. A string value that happens
//! to equal a registered key would be replaced as well.
//!
//! Normalization is textual. Comment delimiters inside string or regex literals
//! of the callback source are treated as comments.
//!
//! A registry lives for one encoding pass and must not be shared between
//! concurrent renders.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use sha2::{Digest, Sha256};

static BLOCK_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static LINE_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//[^\n]*(\n|$)").unwrap());

/// Reduces a callback source to its canonical single-line form
///
/// Block comments and line comments are removed, including a line comment
/// that ends the source without a newline. Then tabs and line breaks go, then
/// surrounding whitespace. Spaces inside the expression are kept. Removing
/// line breaks can join characters into a new comment delimiter, so the steps
/// repeat until the text stops changing; the result is therefore idempotent.
///
/// # Examples
///
/// ```
/// use reinhardt_datatables::callback::normalize;
///
/// let source = "\n\tfunction(row) { // highlight\n\t\t/* overdue */$(row).addClass('late');\n\t}\n";
/// assert_eq!(normalize(source), "function(row) { $(row).addClass('late');}");
/// ```
pub fn normalize(source: &str) -> String {
	let mut current = normalize_once(source);
	loop {
		let next = normalize_once(&current);
		if next == current {
			return current;
		}
		current = next;
	}
}

fn normalize_once(source: &str) -> String {
	let without_blocks = BLOCK_COMMENT_RE.replace_all(source, "");
	let without_lines = LINE_COMMENT_RE.replace_all(&without_blocks, "");
	without_lines
		.chars()
		.filter(|c| !matches!(c, '\t' | '\n' | '\r'))
		.collect::<String>()
		.trim()
		.to_string()
}

/// Returns the registry key for an already normalized source
pub fn callback_key(normalized: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(normalized.as_bytes());
	let digest = hasher.finalize();
	hex::encode(&digest[..16])
}

/// Per-pass mapping from content keys to normalized callback sources
#[derive(Debug, Clone, Default)]
pub struct CallbackRegistry {
	entries: IndexMap<String, String>,
}

impl CallbackRegistry {
	/// Creates an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Normalizes `source`, stores it and returns its key
	///
	/// Registering content that normalizes identically returns the same key and
	/// overwrites the stored (identical) source.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_datatables::CallbackRegistry;
	///
	/// let mut registry = CallbackRegistry::new();
	/// let a = registry.register("function(d){ return d; }");
	/// let b = registry.register("function(d){ return d; }\n");
	/// assert_eq!(a, b);
	/// assert_eq!(a.len(), 32);
	/// assert_eq!(registry.len(), 1);
	/// ```
	pub fn register(&mut self, source: &str) -> String {
		let normalized = normalize(source);
		let key = callback_key(&normalized);
		tracing::trace!(key = %key, "Registered callback expression");
		self.entries.insert(key.clone(), normalized);
		key
	}

	/// Replaces each quoted registered key in `encoded` with its bare source
	///
	/// Keys are processed in registration order, each with one literal
	/// replace-all over the whole text.
	pub fn substitute(&self, encoded: &str) -> String {
		let mut output = encoded.to_string();
		for (key, source) in &self.entries {
			let quoted = format!("\"{}\"", key);
			output = output.replace(&quoted, source);
		}
		output
	}

	/// Returns the normalized source registered under `key`
	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(String::as_str)
	}

	/// Returns the number of registered callbacks
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if nothing is registered
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
