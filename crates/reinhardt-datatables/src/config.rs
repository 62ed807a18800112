//! Table-level configuration
//!
//! A [`TableConfig`] gathers every option that shapes the rendered grid: paging,
//! ordering, searching, scrolling, state persistence, language overrides and the
//! column collection. Configurations can be built in code or declared in TOML or
//! JSON; fields that are left out take the defaults listed on each field.
//!
//! ```toml
//! server_side = true
//! ajax_source = "/invoices/data"
//! paging = true
//! page_length = 25
//!
//! [[columns]]
//! name = "number"
//! title = "Invoice"
//! default_sort = true
//! default_sort_direction = "desc"
//!
//! [[columns]]
//! name = "customer"
//! title = "Customer"
//! ```

use serde::{Deserialize, Serialize};

use crate::column::ColumnCollection;
use crate::error::Result;

/// Pagination control style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagingType {
	/// Page number buttons only
	Numbers,
	/// Previous and next buttons
	Simple,
	/// Previous and next buttons plus page numbers
	SimpleNumbers,
	/// First, previous, next and last buttons
	Full,
	/// First, previous, next and last buttons plus page numbers
	#[default]
	FullNumbers,
	/// First and last buttons plus page numbers
	FirstLastNumbers,
	/// Legacy two-button control
	TwoButton,
}

impl PagingType {
	/// Returns the option value understood by the client widget
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Numbers => "numbers",
			Self::Simple => "simple",
			Self::SimpleNumbers => "simple_numbers",
			Self::Full => "full",
			Self::FullNumbers => "full_numbers",
			Self::FirstLastNumbers => "first_last_numbers",
			Self::TwoButton => "two_button",
		}
	}
}

/// Scrolling setting: either a toggle or a CSS extent such as `"200px"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrollSetting {
	/// Scrolling on or off
	Enabled(bool),
	/// Scrolling constrained to a CSS extent
	Extent(String),
}

/// Label shown for an entry of the page-length menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LengthLabel {
	/// Numeric label
	Count(i64),
	/// Text label, e.g. `"All"`
	Text(String),
}

impl From<i64> for LengthLabel {
	fn from(count: i64) -> Self {
		Self::Count(count)
	}
}

impl From<&str> for LengthLabel {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<String> for LengthLabel {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

/// Ordered mapping of page lengths to their menu labels
///
/// A length of `-1` conventionally means "all rows".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthMenu(Vec<(i64, LengthLabel)>);

impl LengthMenu {
	/// Creates an empty menu
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Appends an entry, builder style
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_datatables::LengthMenu;
	///
	/// let menu = LengthMenu::new().entry(10, 10).entry(-1, "All");
	/// assert_eq!(menu.lengths().collect::<Vec<_>>(), vec![10, -1]);
	/// ```
	pub fn entry(mut self, length: i64, label: impl Into<LengthLabel>) -> Self {
		self.0.push((length, label.into()));
		self
	}

	/// Iterates over the page lengths in menu order
	pub fn lengths(&self) -> impl Iterator<Item = i64> + '_ {
		self.0.iter().map(|(length, _)| *length)
	}

	/// Iterates over the labels in menu order
	pub fn labels(&self) -> impl Iterator<Item = &LengthLabel> {
		self.0.iter().map(|(_, label)| label)
	}

	/// Returns the number of entries
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the menu has no entries
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl Default for LengthMenu {
	fn default() -> Self {
		Self::new().entry(10, 10).entry(25, 25).entry(50, 50).entry(100, 100)
	}
}

/// Caller-supplied interface strings
///
/// Only the strings that are set are sent to the client; everything else keeps
/// the widget's built-in text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
	pub paginate_first: Option<String>,
	pub paginate_last: Option<String>,
	pub paginate_next: Option<String>,
	pub paginate_previous: Option<String>,
	pub empty_table: Option<String>,
	pub info: Option<String>,
	pub info_empty: Option<String>,
	pub info_filtered: Option<String>,
	pub info_post_fix: Option<String>,
	pub length_menu: Option<String>,
	pub search: Option<String>,
	pub zero_records: Option<String>,
	/// URL of a translation file loaded by the client
	pub url: Option<String>,
}

/// All table-level settings plus the column collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
	/// Columns in display order
	pub columns: ColumnCollection,
	/// Rows per page. Default: 10
	pub page_length: u32,
	/// URL the client fetches pages from in server-side mode
	pub ajax_source: Option<String>,
	/// Show the "processing" indicator. Default: true
	pub processing: bool,
	/// Fetch pages from the server instead of rendering rows. Default: false
	pub server_side: bool,
	/// Default: false
	pub paging: bool,
	/// Default: false
	pub length_change: bool,
	/// Default: false
	pub searching: bool,
	/// Default: false
	pub info: bool,
	/// Default: true
	pub ordering: bool,
	/// Default: true
	pub jquery_ui: bool,
	/// Default: true
	pub auto_width: bool,
	/// Default: false
	pub scroll_collapse: bool,
	/// CSS class of the `<table>` element
	pub class: Option<String>,
	pub length_menu: LengthMenu,
	pub scroll_x: Option<ScrollSetting>,
	pub scroll_y: Option<ScrollSetting>,
	pub paging_type: PagingType,
	pub language: Option<LanguageConfig>,
	/// Markup shown while the first page loads. Rendered verbatim
	pub loading_html: String,
	/// Seconds a saved state stays valid. Default: 7200
	pub state_duration: i64,
	/// Default: false
	pub state_save: bool,
	/// Maximum rows rendered into the HTML in static mode. Default: 100
	pub static_max_length: usize,
	/// Layout string controlling where the widget's controls go
	pub dom: Option<String>,
}

impl TableConfig {
	/// Creates a configuration with default settings for `columns`
	pub fn new(columns: ColumnCollection) -> Self {
		Self {
			columns,
			..Self::default()
		}
	}

	/// Parses a TOML table declaration
	pub fn from_toml_str(source: &str) -> Result<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Parses a JSON table declaration
	pub fn from_json_str(source: &str) -> Result<Self> {
		Ok(serde_json::from_str(source)?)
	}

	/// Returns the column collection
	pub fn columns(&self) -> &ColumnCollection {
		&self.columns
	}
}

impl Default for TableConfig {
	fn default() -> Self {
		Self {
			columns: ColumnCollection::new(),
			page_length: 10,
			ajax_source: None,
			processing: true,
			server_side: false,
			paging: false,
			length_change: false,
			searching: false,
			info: false,
			ordering: true,
			jquery_ui: true,
			auto_width: true,
			scroll_collapse: false,
			class: None,
			length_menu: LengthMenu::default(),
			scroll_x: None,
			scroll_y: None,
			paging_type: PagingType::FullNumbers,
			language: None,
			loading_html: "<p>loading data</p>".to_string(),
			state_duration: 7200,
			state_save: false,
			static_max_length: 100,
			dom: None,
		}
	}
}
