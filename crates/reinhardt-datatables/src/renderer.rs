//! Rendering and data responses for any [`DataTable`]
//!
//! Every table gets these entry points through a blanket implementation:
//!
//! - [`render`](TableRenderer::render): HTML skeleton plus initialisation script,
//!   for the initial page;
//! - [`render_json`](TableRenderer::render_json): paged response for one
//!   server-side data request.
//!
//! A fresh [`CallbackRegistry`] is used per call unless the caller threads its
//! own through [`render_options`](TableRenderer::render_options).

use serde_json::Value;

use crate::callback::CallbackRegistry;
use crate::config::TableConfig;
use crate::document::Document;
use crate::error::TableError;
use crate::html;
use crate::options::build_configuration_document;
use crate::request::{DisplayLength, RequestParameters};
use crate::resolver;
use crate::response::PagedResponse;
use crate::result::DataResult;
use crate::table::{DataTable, TableOverrides};

/// Entry points available on every [`DataTable`]
///
/// Engine failures are returned as `T::Error` through `From<TableError>`;
/// errors from [`DataTable::load_data`] are returned unchanged.
pub trait TableRenderer: DataTable {
	/// Returns the table's configuration or [`TableError::ConfigurationMissing`]
	fn configuration(&self) -> Result<&TableConfig, Self::Error> {
		self.config()
			.ok_or_else(|| TableError::ConfigurationMissing.into())
	}

	/// Renders the HTML skeleton followed by the initialisation script
	fn render(&self) -> Result<String, Self::Error> {
		let mut output = self.render_html()?;
		output.push_str(&self.render_script()?);
		Ok(output)
	}

	/// Renders the table element
	///
	/// In server-side mode the body holds a single loading row. Otherwise the
	/// first page of data is loaded and rendered in place.
	fn render_html(&self) -> Result<String, Self::Error> {
		let config = self.configuration()?;
		let columns = &config.columns;

		let body = if config.server_side {
			html::loading_row(columns.len(), &config.loading_html)
		} else {
			let rows = self.load_static_data()?;
			let mut body = String::new();
			for row in &rows {
				body.push_str(&html::data_row(columns, &self.resolve_row(row)?));
			}
			tracing::debug!(
				table = self.table_id(),
				rows = rows.len(),
				"Rendered static table body"
			);
			body
		};

		let mut output = html::table_head(self.table_id(), config.class.as_deref(), columns);
		output.push_str(&html::table_body(&body));
		Ok(output)
	}

	/// Renders the script that initialises the client widget
	fn render_script(&self) -> Result<String, Self::Error> {
		let options = self.configuration_document()?.to_script()?;
		Ok(html::init_script(self.table_id(), &options))
	}

	/// Builds the configuration document for the client widget
	fn configuration_document(&self) -> Result<Document, Self::Error> {
		let config = self.configuration()?;
		Ok(build_configuration_document(self, config)?)
	}

	/// Encodes the configuration document with the placeholder protocol,
	/// registering callbacks in `callbacks`
	fn render_options(&self, callbacks: &mut CallbackRegistry) -> Result<String, Self::Error> {
		let document = self.configuration_document()?;
		let encoded = document.encode_with(callbacks)?;
		tracing::trace!(
			table = self.table_id(),
			callbacks = callbacks.len(),
			"Encoded configuration document"
		);
		Ok(encoded)
	}

	/// Loads and serializes the rows for one data request
	fn render_json(&self, request: &RequestParameters) -> Result<PagedResponse, Self::Error> {
		self.configuration()?;
		let result = self.load_data(request)?;
		self.build_paged_response(&result, request)
	}

	/// Parses an URL-encoded data request and answers it
	fn render_json_query(&self, query: &str) -> Result<PagedResponse, Self::Error> {
		let config = self.configuration()?;
		let request = RequestParameters::from_query(query, &config.columns)?;
		self.render_json(&request)
	}

	/// Serializes a loaded result, resolving every column of every row
	fn build_paged_response(
		&self,
		result: &DataResult<Self::Row>,
		request: &RequestParameters,
	) -> Result<PagedResponse, Self::Error> {
		let data = result
			.rows()
			.iter()
			.map(|row| self.resolve_row(row))
			.collect::<Result<Vec<_>, _>>()?;

		tracing::debug!(
			table = self.table_id(),
			rows = data.len(),
			total = result.total_count(),
			"Built paged response"
		);

		Ok(PagedResponse {
			total_records: result.total_count(),
			total_display_records: result.display_count(),
			data,
			echo: request.echo().map(str::to_string),
		})
	}

	/// Request used to load the rows of a static table
	///
	/// Starts at the first row, is capped at the configured static length and
	/// sorts by the default sort column if there is one.
	fn static_request(&self) -> Result<RequestParameters, Self::Error> {
		let config = self.configuration()?;
		let mut request = RequestParameters::new()
			.with_offset(0)
			.with_length(DisplayLength::Rows(config.static_max_length));
		if let Some((index, column)) = config.columns.default_sort() {
			request = request.with_sort(index, column.default_sort_direction());
		}
		tracing::debug!(
			table = self.table_id(),
			cap = config.static_max_length,
			sort_column = ?request.sort_column(),
			"Synthesized static data request"
		);
		Ok(request)
	}

	/// Loads the rows of a static table, at most the configured cap
	fn load_static_data(&self) -> Result<Vec<Self::Row>, Self::Error> {
		let config = self.configuration()?;
		let request = self.static_request()?;
		let mut rows = self.load_data(&request)?.into_rows();
		if rows.len() > config.static_max_length {
			tracing::debug!(
				table = self.table_id(),
				loaded = rows.len(),
				cap = config.static_max_length,
				"Truncating static rows"
			);
			rows.truncate(config.static_max_length);
		}
		Ok(rows)
	}

	/// Resolves the value of every column for `row`, in column order
	fn resolve_row(&self, row: &Self::Row) -> Result<Vec<Value>, Self::Error> {
		let config = self.configuration()?;
		Ok(resolver::resolve_row(row, &config.columns, &TableOverrides(self))?)
	}
}

impl<T: DataTable + ?Sized> TableRenderer for T {}
