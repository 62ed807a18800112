//! Result of a data fetch

/// One page of rows returned by a table's data loader
///
/// `total_count` counts every row before filtering; `filtered_count`, when
/// present, counts the rows matching the request's search terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataResult<R> {
	rows: Vec<R>,
	total_count: usize,
	filtered_count: Option<usize>,
}

impl<R> DataResult<R> {
	/// Creates a result without a filtered count
	pub fn new(rows: Vec<R>, total_count: usize) -> Self {
		Self {
			rows,
			total_count,
			filtered_count: None,
		}
	}

	/// Sets the number of rows matching the request's filters
	pub fn with_filtered_count(mut self, filtered_count: usize) -> Self {
		self.filtered_count = Some(filtered_count);
		self
	}

	/// Rows of the page
	pub fn rows(&self) -> &[R] {
		&self.rows
	}

	/// Consumes the result, returning its rows
	pub fn into_rows(self) -> Vec<R> {
		self.rows
	}

	/// Number of rows before filtering
	pub fn total_count(&self) -> usize {
		self.total_count
	}

	/// Number of rows after filtering, if the loader reported one
	pub fn filtered_count(&self) -> Option<usize> {
		self.filtered_count
	}

	/// Row count the client should display: the filtered count when known,
	/// otherwise the total
	pub fn display_count(&self) -> usize {
		self.filtered_count.unwrap_or(self.total_count)
	}
}
