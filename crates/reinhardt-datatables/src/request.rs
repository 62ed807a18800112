//! Inbound data requests
//!
//! The client widget asks for pages with a set of query parameters. Two naming
//! schemes are in use: the legacy one (`iDisplayStart`, `sEcho`, ...) sent when
//! the widget is configured with `sAjaxSource`, and the current one (`start`,
//! `draw`, `order[0][column]`, ...). [`RequestParameters::from_query`] accepts
//! either and normalizes them into one value.

use std::ops::Range;

use indexmap::IndexMap;

use crate::column::{ColumnCollection, SortDirection};
use crate::error::{Result, TableError};

/// Number of rows requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayLength {
	/// Every row (sent as `-1`)
	#[default]
	All,
	/// At most this many rows
	Rows(usize),
}

impl DisplayLength {
	/// Interprets a raw length parameter, where `-1` means all rows
	pub fn from_raw(raw: i64) -> Option<Self> {
		match raw {
			-1 => Some(Self::All),
			n if n >= 0 => usize::try_from(n).ok().map(Self::Rows),
			_ => None,
		}
	}

	/// Returns the row limit, or `None` for all rows
	pub fn limit(&self) -> Option<usize> {
		match self {
			Self::All => None,
			Self::Rows(n) => Some(*n),
		}
	}
}

/// A normalized page request
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::{DisplayLength, RequestParameters, SortDirection};
///
/// let request = RequestParameters::new()
///     .with_offset(20)
///     .with_length(DisplayLength::Rows(10))
///     .with_sort(1, SortDirection::Desc)
///     .with_echo("7");
///
/// assert_eq!(request.window(100), 20..30);
/// assert_eq!(request.echo(), Some("7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestParameters {
	offset: usize,
	length: DisplayLength,
	sort_column: Option<usize>,
	sort_direction: SortDirection,
	search: Option<String>,
	column_search: IndexMap<String, String>,
	echo: Option<String>,
}

impl RequestParameters {
	/// Creates a request for all rows, unsorted
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the index of the first row
	pub fn with_offset(mut self, offset: usize) -> Self {
		self.offset = offset;
		self
	}

	/// Sets the number of rows
	pub fn with_length(mut self, length: DisplayLength) -> Self {
		self.length = length;
		self
	}

	/// Sets the sort column index and direction
	pub fn with_sort(mut self, column: usize, direction: SortDirection) -> Self {
		self.sort_column = Some(column);
		self.sort_direction = direction;
		self
	}

	/// Sets the global search text
	pub fn with_search(mut self, search: impl Into<String>) -> Self {
		self.search = Some(search.into());
		self
	}

	/// Adds a search term for one column
	pub fn with_column_search(mut self, column: impl Into<String>, term: impl Into<String>) -> Self {
		self.column_search.insert(column.into(), term.into());
		self
	}

	/// Sets the correlation token echoed back in the response
	pub fn with_echo(mut self, echo: impl Into<String>) -> Self {
		self.echo = Some(echo.into());
		self
	}

	/// Index of the first requested row
	pub fn offset(&self) -> usize {
		self.offset
	}

	/// Number of requested rows
	pub fn length(&self) -> DisplayLength {
		self.length
	}

	/// Index of the column to sort by
	pub fn sort_column(&self) -> Option<usize> {
		self.sort_column
	}

	/// Direction to sort in
	pub fn sort_direction(&self) -> SortDirection {
		self.sort_direction
	}

	/// Global search text
	pub fn search(&self) -> Option<&str> {
		self.search.as_deref()
	}

	/// Per-column search terms keyed by column name
	pub fn column_search(&self) -> &IndexMap<String, String> {
		&self.column_search
	}

	/// Opaque correlation token
	pub fn echo(&self) -> Option<&str> {
		self.echo.as_deref()
	}

	/// Returns the row range to load from a data set of `total` rows
	pub fn window(&self, total: usize) -> Range<usize> {
		let start = self.offset.min(total);
		let end = match self.length {
			DisplayLength::All => total,
			DisplayLength::Rows(n) => start.saturating_add(n).min(total),
		};
		start..end
	}

	/// Parses an URL-encoded query string
	///
	/// Per-column search terms arrive by column index and are stored under the
	/// name of the matching column in `columns`.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_datatables::{ColumnCollection, ColumnDescriptor, RequestParameters};
	///
	/// let columns = ColumnCollection::try_from(vec![
	///     ColumnDescriptor::new("id", "ID"),
	///     ColumnDescriptor::new("label", "Label"),
	/// ]).unwrap();
	///
	/// let request = RequestParameters::from_query(
	///     "sEcho=3&iDisplayStart=10&iDisplayLength=10&sSearch_1=foo",
	///     &columns,
	/// ).unwrap();
	///
	/// assert_eq!(request.offset(), 10);
	/// assert_eq!(request.echo(), Some("3"));
	/// assert_eq!(request.column_search().get("label").map(String::as_str), Some("foo"));
	/// ```
	pub fn from_query(query: &str, columns: &ColumnCollection) -> Result<Self> {
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
		Self::from_pairs(pairs, columns)
	}

	/// Builds a request from already decoded parameter pairs
	pub fn from_pairs<I, K, V>(pairs: I, columns: &ColumnCollection) -> Result<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut request = Self::new();

		for (name, value) in pairs {
			let (name, value) = (name.as_ref(), value.as_ref());
			match name {
				"iDisplayStart" | "start" => {
					request.offset = value
						.trim()
						.parse()
						.map_err(|_| TableError::invalid_parameter(name, value))?;
				}
				"iDisplayLength" | "length" => {
					request.length = value
						.trim()
						.parse::<i64>()
						.ok()
						.and_then(DisplayLength::from_raw)
						.ok_or_else(|| TableError::invalid_parameter(name, value))?;
				}
				"iSortCol_0" | "order[0][column]" => {
					let index = value
						.trim()
						.parse()
						.map_err(|_| TableError::invalid_parameter(name, value))?;
					request.sort_column = Some(index);
				}
				"sSortDir_0" | "order[0][dir]" => {
					request.sort_direction = SortDirection::parse(value.trim())
						.ok_or_else(|| TableError::invalid_parameter(name, value))?;
				}
				"sSearch" | "search[value]" => {
					if !value.is_empty() {
						request.search = Some(value.to_string());
					}
				}
				"sEcho" | "draw" => {
					request.echo = Some(value.to_string());
				}
				_ => {
					if let Some(index) = column_search_index(name) {
						if value.is_empty() {
							continue;
						}
						match columns.get(index) {
							Some(column) => {
								request
									.column_search
									.insert(column.name().to_string(), value.to_string());
							}
							None => {
								tracing::debug!(
									parameter = name,
									"Ignoring search term for unknown column index {}",
									index
								);
							}
						}
					} else {
						tracing::trace!(parameter = name, "Ignoring unrecognised request parameter");
					}
				}
			}
		}

		Ok(request)
	}
}

/// Extracts the column index from `sSearch_<i>` or `columns[<i>][search][value]`
fn column_search_index(name: &str) -> Option<usize> {
	if let Some(index) = name.strip_prefix("sSearch_") {
		return index.parse().ok();
	}
	name.strip_prefix("columns[")
		.and_then(|rest| rest.strip_suffix("][search][value]"))
		.and_then(|index| index.parse().ok())
}
