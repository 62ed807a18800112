//! Paged data response sent back to the client widget

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answer to one server-side data request
///
/// Field names on the wire are the widget's legacy server-side names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResponse {
	/// Number of rows before filtering
	#[serde(rename = "iTotalRecords")]
	pub total_records: usize,
	/// Number of rows after filtering
	#[serde(rename = "iTotalDisplayRecords")]
	pub total_display_records: usize,
	/// One value sequence per row, in column order
	pub data: Vec<Vec<Value>>,
	/// Correlation token copied from the request
	#[serde(rename = "sEcho")]
	pub echo: Option<String>,
}

impl PagedResponse {
	/// Encodes the response as compact JSON
	pub fn to_json(&self) -> crate::Result<String> {
		Ok(serde_json::to_string(self)?)
	}
}
