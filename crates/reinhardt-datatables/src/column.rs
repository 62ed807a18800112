//! Column descriptors and the ordered column collection

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// Sort direction of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	/// Ascending order
	#[default]
	Asc,
	/// Descending order
	Desc,
}

impl SortDirection {
	/// Returns the wire form (`"asc"` or `"desc"`)
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}

	/// Parses a direction sent by the client, ignoring case
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_datatables::SortDirection;
	///
	/// assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
	/// assert_eq!(SortDirection::parse("sideways"), None);
	/// ```
	pub fn parse(s: &str) -> Option<Self> {
		if s.eq_ignore_ascii_case("asc") {
			Some(Self::Asc)
		} else if s.eq_ignore_ascii_case("desc") {
			Some(Self::Desc)
		} else {
			None
		}
	}
}

/// Derives the accessor name for a column name
///
/// The name is split on `_`, `-`, `.` and spaces, each part gets an upper-case
/// first letter and the result is prefixed with `get`.
///
/// # Examples
///
/// ```
/// use reinhardt_datatables::column::accessor_name_for;
///
/// assert_eq!(accessor_name_for("label"), "getLabel");
/// assert_eq!(accessor_name_for("created_at"), "getCreatedAt");
/// assert_eq!(accessor_name_for("userId"), "getUserId");
/// ```
pub fn accessor_name_for(name: &str) -> String {
	let mut accessor = String::with_capacity(name.len() + 3);
	accessor.push_str("get");
	for part in name
		.split(['_', '-', '.', ' '])
		.filter(|part| !part.is_empty())
	{
		let mut chars = part.chars();
		if let Some(first) = chars.next() {
			accessor.extend(first.to_uppercase());
			accessor.push_str(chars.as_str());
		}
	}
	accessor
}

fn default_true() -> bool {
	true
}

/// Static description of one rendered column
///
/// Descriptors are built once, before any render or request, and are read-only
/// afterwards.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::{ColumnDescriptor, SortDirection};
///
/// let column = ColumnDescriptor::new("created_at", "Created")
///     .searchable(false)
///     .default_sort(SortDirection::Desc)
///     .width("120px");
///
/// assert_eq!(column.value_accessor_name(), "getCreatedAt");
/// assert!(column.is_default_sort());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
	name: String,
	#[serde(default)]
	title: String,
	#[serde(default = "default_true")]
	visible: bool,
	#[serde(default = "default_true")]
	sortable: bool,
	#[serde(default = "default_true")]
	searchable: bool,
	#[serde(default)]
	default_sort: bool,
	#[serde(default)]
	default_sort_direction: SortDirection,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	width: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	css_class: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	render: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	accessor: Option<String>,
}

impl ColumnDescriptor {
	/// Creates a visible, sortable and searchable column
	pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			title: title.into(),
			visible: true,
			sortable: true,
			searchable: true,
			default_sort: false,
			default_sort_direction: SortDirection::Asc,
			width: None,
			css_class: None,
			render: None,
			accessor: None,
		}
	}

	/// Sets whether the column is shown
	///
	/// Hidden columns are still emitted so the client can toggle them.
	pub fn visible(mut self, visible: bool) -> Self {
		self.visible = visible;
		self
	}

	/// Sets whether the column can be sorted
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Sets whether the column takes part in searches
	pub fn searchable(mut self, searchable: bool) -> Self {
		self.searchable = searchable;
		self
	}

	/// Marks the column as the default sort column
	pub fn default_sort(mut self, direction: SortDirection) -> Self {
		self.default_sort = true;
		self.default_sort_direction = direction;
		self
	}

	/// Sets the CSS width of the column
	pub fn width(mut self, width: impl Into<String>) -> Self {
		self.width = Some(width.into());
		self
	}

	/// Sets the CSS class applied to the column's cells
	pub fn css_class(mut self, css_class: impl Into<String>) -> Self {
		self.css_class = Some(css_class.into());
		self
	}

	/// Sets a client-side render callback for the column
	pub fn render(mut self, expression: impl Into<String>) -> Self {
		self.render = Some(expression.into());
		self
	}

	/// Overrides the derived accessor name
	pub fn accessor(mut self, accessor: impl Into<String>) -> Self {
		self.accessor = Some(accessor.into());
		self
	}

	/// Returns the column name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the header text
	pub fn title(&self) -> &str {
		&self.title
	}

	/// Returns whether the column is shown
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Returns whether the column can be sorted
	pub fn is_sortable(&self) -> bool {
		self.sortable
	}

	/// Returns whether the column takes part in searches
	pub fn is_searchable(&self) -> bool {
		self.searchable
	}

	/// Returns whether the column is the default sort column
	pub fn is_default_sort(&self) -> bool {
		self.default_sort
	}

	/// Returns the direction used when sorting by default
	pub fn default_sort_direction(&self) -> SortDirection {
		self.default_sort_direction
	}

	/// Returns the CSS width, if any
	pub fn width_value(&self) -> Option<&str> {
		self.width.as_deref()
	}

	/// Returns the CSS class, if any
	pub fn css_class_value(&self) -> Option<&str> {
		self.css_class.as_deref()
	}

	/// Returns the render callback source, if any
	pub fn render_expression(&self) -> Option<&str> {
		self.render.as_deref()
	}

	/// Returns the name of the accessor used to resolve cell values
	pub fn value_accessor_name(&self) -> Cow<'_, str> {
		match &self.accessor {
			Some(accessor) => Cow::Borrowed(accessor),
			None => Cow::Owned(accessor_name_for(&self.name)),
		}
	}
}

/// Ordered set of columns
///
/// Insertion order is display order, and a column's position is the index used
/// by sort requests and the default-order option. Names are unique and at most
/// one column may be the default sort column; both are checked on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColumnDescriptor>", into = "Vec<ColumnDescriptor>")]
pub struct ColumnCollection {
	columns: Vec<ColumnDescriptor>,
}

impl ColumnCollection {
	/// Creates an empty collection
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a column
	///
	/// Fails with [`TableError::DuplicateColumn`] when the name is taken and with
	/// [`TableError::MultipleDefaultSort`] when another column already is the
	/// default sort column.
	pub fn push(&mut self, column: ColumnDescriptor) -> Result<()> {
		if self.index_of(column.name()).is_some() {
			return Err(TableError::DuplicateColumn(column.name().to_string()));
		}
		if column.is_default_sort()
			&& let Some((_, existing)) = self.default_sort()
		{
			return Err(TableError::MultipleDefaultSort {
				first: existing.name().to_string(),
				second: column.name().to_string(),
			});
		}
		self.columns.push(column);
		Ok(())
	}

	/// Appends a column, builder style
	pub fn with_column(mut self, column: ColumnDescriptor) -> Result<Self> {
		self.push(column)?;
		Ok(self)
	}

	/// Returns the number of columns
	pub fn len(&self) -> usize {
		self.columns.len()
	}

	/// Returns true if there are no columns
	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	/// Returns the column at `index`
	pub fn get(&self, index: usize) -> Option<&ColumnDescriptor> {
		self.columns.get(index)
	}

	/// Iterates over the columns in display order
	pub fn iter(&self) -> std::slice::Iter<'_, ColumnDescriptor> {
		self.columns.iter()
	}

	/// Returns the position of the column called `name`
	pub fn index_of(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|column| column.name() == name)
	}

	/// Returns the names of all searchable columns
	pub fn searchable_names(&self) -> Vec<&str> {
		self.columns
			.iter()
			.filter(|column| column.is_searchable())
			.map(ColumnDescriptor::name)
			.collect()
	}

	/// Returns the default sort column together with its index
	pub fn default_sort(&self) -> Option<(usize, &ColumnDescriptor)> {
		self.columns
			.iter()
			.enumerate()
			.find(|(_, column)| column.is_default_sort())
	}
}

impl TryFrom<Vec<ColumnDescriptor>> for ColumnCollection {
	type Error = TableError;

	fn try_from(columns: Vec<ColumnDescriptor>) -> Result<Self> {
		let mut collection = Self::new();
		for column in columns {
			collection.push(column)?;
		}
		Ok(collection)
	}
}

impl From<ColumnCollection> for Vec<ColumnDescriptor> {
	fn from(collection: ColumnCollection) -> Self {
		collection.columns
	}
}

impl<'a> IntoIterator for &'a ColumnCollection {
	type Item = &'a ColumnDescriptor;
	type IntoIter = std::slice::Iter<'a, ColumnDescriptor>;

	fn into_iter(self) -> Self::IntoIter {
		self.columns.iter()
	}
}
