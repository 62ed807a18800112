//! Cell value resolution
//!
//! A cell's value is looked up by the column's accessor name in two places, in
//! order: the table (which may compute or override columns) and then the row
//! itself. Nothing is cached; every cell is resolved on every call.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::column::{ColumnDescriptor, accessor_name_for};
use crate::error::{Result, TableError};

/// Named accessors exposed by a row object
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::RowAccessors;
/// use serde_json::Value;
///
/// struct Invoice {
///     number: u32,
///     customer: String,
/// }
///
/// impl RowAccessors for Invoice {
///     fn accessor(&self, name: &str) -> Option<Value> {
///         match name {
///             "getNumber" => Some(self.number.into()),
///             "getCustomer" => Some(self.customer.clone().into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait RowAccessors {
	/// Returns the value of accessor `name`, or `None` if the row has no such accessor
	fn accessor(&self, name: &str) -> Option<Value>;

	/// Type name reported in [`TableError::MissingAccessor`]
	fn type_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}

/// Named accessors exposed by a table, computed from a row
pub trait TableAccessors<R: ?Sized> {
	/// Returns the value of accessor `name` for `row`, or `None` if the table
	/// does not provide it
	fn accessor(&self, name: &str, row: &R) -> Option<Value>;

	/// Type name reported in [`TableError::MissingAccessor`]
	fn type_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}

/// A table that provides no accessors of its own
impl<R: ?Sized> TableAccessors<R> for () {
	fn accessor(&self, _name: &str, _row: &R) -> Option<Value> {
		None
	}
}

type AccessorFn<R> = Box<dyn Fn(&R) -> Value + Send + Sync>;

/// Registry of accessor functions keyed by name
///
/// Lets a table declare computed columns without hand-written matching.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::{Accessors, TableAccessors};
///
/// struct Invoice {
///     net: i64,
///     tax: i64,
/// }
///
/// let accessors = Accessors::new()
///     .with("getGross", |invoice: &Invoice| (invoice.net + invoice.tax).into());
///
/// let invoice = Invoice { net: 100, tax: 20 };
/// assert_eq!(accessors.accessor("getGross", &invoice), Some(120.into()));
/// assert_eq!(accessors.accessor("getNet", &invoice), None);
/// ```
pub struct Accessors<R> {
	entries: HashMap<String, AccessorFn<R>>,
}

impl<R> Accessors<R> {
	/// Creates an empty registry
	pub fn new() -> Self {
		Self {
			entries: HashMap::new(),
		}
	}

	/// Registers an accessor, builder style
	pub fn with<F>(mut self, name: impl Into<String>, accessor: F) -> Self
	where
		F: Fn(&R) -> Value + Send + Sync + 'static,
	{
		self.register(name, accessor);
		self
	}

	/// Registers an accessor, replacing any accessor with the same name
	pub fn register<F>(&mut self, name: impl Into<String>, accessor: F)
	where
		F: Fn(&R) -> Value + Send + Sync + 'static,
	{
		self.entries.insert(name.into(), Box::new(accessor));
	}

	/// Returns true if an accessor called `name` is registered
	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Returns the number of registered accessors
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if no accessor is registered
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<R> Default for Accessors<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> fmt::Debug for Accessors<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
		names.sort_unstable();
		f.debug_struct("Accessors")
			.field("names", &names)
			.finish_non_exhaustive()
	}
}

impl<R> TableAccessors<R> for Accessors<R> {
	fn accessor(&self, name: &str, row: &R) -> Option<Value> {
		self.entries.get(name).map(|accessor| accessor(row))
	}
}

/// JSON objects answer `get<Key>` for each of their keys
///
/// Keys are matched through [`accessor_name_for`], so keys that differ only in
/// separators or in the case of a word's first letter (`userId`, `user_id`,
/// `user-id`) share one accessor. The first such key in the object's order
/// answers it and the others are unreachable.
impl RowAccessors for Map<String, Value> {
	fn accessor(&self, name: &str) -> Option<Value> {
		self.iter()
			.find(|(key, _)| accessor_name_for(key) == name)
			.map(|(_, value)| value.clone())
	}
}

/// Resolves the value of `column` for `row`
///
/// The owner is asked first, then the row. Fails with
/// [`TableError::MissingAccessor`] when neither provides the accessor.
pub fn resolve<R, O>(row: &R, column: &ColumnDescriptor, owner: &O) -> Result<Value>
where
	R: RowAccessors + ?Sized,
	O: TableAccessors<R> + ?Sized,
{
	let accessor = column.value_accessor_name();

	if let Some(value) = owner.accessor(&accessor, row) {
		return Ok(value);
	}
	if let Some(value) = row.accessor(&accessor) {
		return Ok(value);
	}

	Err(TableError::MissingAccessor {
		accessor: accessor.into_owned(),
		row_type: row.type_name(),
		owner_type: owner.type_name(),
	})
}

/// Resolves every column of `row`, in column order
pub fn resolve_row<'a, R, O, I>(row: &R, columns: I, owner: &O) -> Result<Vec<Value>>
where
	R: RowAccessors + ?Sized,
	O: TableAccessors<R> + ?Sized,
	I: IntoIterator<Item = &'a ColumnDescriptor>,
{
	columns
		.into_iter()
		.map(|column| resolve(row, column, owner))
		.collect()
}
