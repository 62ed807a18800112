//! Error types for the datatables engine.

use thiserror::Error;

/// Errors that can occur while building or serving a data table.
///
/// Errors raised by the host's data loader never pass through this type: tables
/// declare their own error type (see [`DataTable::Error`](crate::DataTable::Error))
/// and these variants convert into it.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TableError {
	/// A render or fetch was attempted on a table without configuration.
	#[error("A table configuration is required")]
	ConfigurationMissing,

	/// Neither the table nor the row exposes the accessor a column needs.
	#[error("{accessor}() accessor is required in {row_type} or {owner_type}")]
	MissingAccessor {
		/// Accessor name derived from the column.
		accessor: String,
		/// Concrete type of the row being rendered.
		row_type: &'static str,
		/// Concrete type of the table that was asked first.
		owner_type: &'static str,
	},

	/// Two columns share a name.
	#[error("Duplicate column name: {0}")]
	DuplicateColumn(String),

	/// More than one column is flagged as the default sort column.
	#[error("Multiple default sort columns: `{first}` and `{second}`")]
	MultipleDefaultSort {
		/// Column flagged first.
		first: String,
		/// Column flagged second.
		second: String,
	},

	/// Server-side processing is enabled but no data source URL is known.
	#[error("Server-side processing requires a data source URL")]
	MissingDataSource,

	/// An inbound request parameter could not be interpreted.
	#[error("Invalid request parameter `{name}`: {value:?}")]
	InvalidParameter {
		/// Parameter name as sent by the client.
		name: String,
		/// Raw parameter value.
		value: String,
	},

	/// JSON encoding or decoding failed.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// A TOML table declaration could not be parsed.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A query string could not be decoded.
	#[error("Query string error: {0}")]
	Query(#[from] serde_urlencoded::de::Error),
}

/// Result type alias for datatables operations.
pub type Result<T> = std::result::Result<T, TableError>;

impl TableError {
	pub(crate) fn invalid_parameter(name: impl Into<String>, value: impl Into<String>) -> Self {
		let (name, value) = (name.into(), value.into());
		tracing::warn!(parameter = %name, value = %value, "Rejecting malformed request parameter");
		Self::InvalidParameter { name, value }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_missing_accessor_message_names_both_types() {
		let error = TableError::MissingAccessor {
			accessor: "getLabel".to_string(),
			row_type: "app::Invoice",
			owner_type: "app::InvoiceTable",
		};
		assert_eq!(
			error.to_string(),
			"getLabel() accessor is required in app::Invoice or app::InvoiceTable"
		);
	}

	#[rstest]
	fn test_invalid_parameter_message() {
		let error = TableError::invalid_parameter("iDisplayStart", "-4");
		assert_eq!(
			error.to_string(),
			"Invalid request parameter `iDisplayStart`: \"-4\""
		);
	}

	#[rstest]
	fn test_json_error_from() {
		let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		let error: TableError = json_error.into();
		assert!(matches!(error, TableError::Json(_)));
	}
}
