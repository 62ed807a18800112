//! The host-side table contract

use serde_json::Value;

use crate::config::TableConfig;
use crate::error::TableError;
use crate::request::RequestParameters;
use crate::resolver::{RowAccessors, TableAccessors};
use crate::result::DataResult;

/// Client-side hooks a table can attach callback expressions to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackHook {
	/// Called for every row as it is drawn
	Row,
	/// Called once the table is fully initialised
	InitComplete,
	/// Called after every draw
	Draw,
	/// Called when the footer is drawn
	Footer,
	/// Called when the header is drawn
	Header,
	/// Called to build the information text
	Info,
}

impl CallbackHook {
	/// Every hook, in the order options are emitted
	pub const ALL: [CallbackHook; 6] = [
		Self::Row,
		Self::InitComplete,
		Self::Draw,
		Self::Footer,
		Self::Header,
		Self::Info,
	];

	/// Returns the option name the client widget expects
	pub fn option_name(&self) -> &'static str {
		match self {
			Self::Row => "rowCallback",
			Self::InitComplete => "initComplete",
			Self::Draw => "drawCallback",
			Self::Footer => "footerCallback",
			Self::Header => "headerCallback",
			Self::Info => "infoCallback",
		}
	}
}

/// A data table served by the host application
///
/// Implementors supply the configuration, the data loader and, optionally,
/// computed column values and client-side callbacks. Rendering and data
/// responses come from the blanket [`TableRenderer`](crate::TableRenderer)
/// implementation.
///
/// Errors returned by [`load_data`](Self::load_data) reach the caller of the
/// render or fetch entry point unchanged; engine errors are converted with
/// `From<TableError>`.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::{
///     CallbackHook, ColumnCollection, ColumnDescriptor, DataResult, DataTable,
///     RequestParameters, RowAccessors, TableConfig, TableError,
/// };
/// use serde_json::Value;
///
/// struct Task {
///     title: String,
///     done: bool,
/// }
///
/// impl RowAccessors for Task {
///     fn accessor(&self, name: &str) -> Option<Value> {
///         match name {
///             "getTitle" => Some(self.title.clone().into()),
///             _ => None,
///         }
///     }
/// }
///
/// struct TaskTable {
///     config: TableConfig,
///     tasks: Vec<Task>,
/// }
///
/// impl DataTable for TaskTable {
///     type Row = Task;
///     type Error = TableError;
///
///     fn table_id(&self) -> &str {
///         "tasks"
///     }
///
///     fn config(&self) -> Option<&TableConfig> {
///         Some(&self.config)
///     }
///
///     fn load_data(&self, request: &RequestParameters) -> Result<DataResult<Task>, TableError> {
///         let window = request.window(self.tasks.len());
///         let rows = self.tasks[window]
///             .iter()
///             .map(|t| Task { title: t.title.clone(), done: t.done })
///             .collect();
///         Ok(DataResult::new(rows, self.tasks.len()))
///     }
///
///     fn column_value(&self, accessor: &str, task: &Task) -> Option<Value> {
///         (accessor == "getStatus").then(|| if task.done { "done" } else { "open" }.into())
///     }
///
///     fn callback(&self, hook: CallbackHook) -> Option<String> {
///         (hook == CallbackHook::Draw).then(|| "function(){ console.log('drawn'); }".to_string())
///     }
/// }
/// ```
pub trait DataTable {
	/// Row type produced by the data loader
	type Row: RowAccessors;

	/// Error type returned by every entry point
	type Error: From<TableError>;

	/// HTML id of the rendered table
	fn table_id(&self) -> &str;

	/// Table configuration; `None` makes every entry point fail with
	/// [`TableError::ConfigurationMissing`]
	fn config(&self) -> Option<&TableConfig>;

	/// Loads the rows for `request`
	fn load_data(&self, request: &RequestParameters) -> Result<DataResult<Self::Row>, Self::Error>;

	/// Data source URL used when the configuration does not name one
	fn ajax_data_url(&self) -> Option<&str> {
		None
	}

	/// Table-level value for `accessor`, taking precedence over the row's own
	fn column_value(&self, accessor: &str, row: &Self::Row) -> Option<Value> {
		let _ = (accessor, row);
		None
	}

	/// Callback expression for `hook`; hooks returning `None` are left out
	fn callback(&self, hook: CallbackHook) -> Option<String> {
		let _ = hook;
		None
	}
}

/// Presents a table's [`DataTable::column_value`] to the resolver
pub(crate) struct TableOverrides<'a, T: ?Sized>(pub(crate) &'a T);

impl<T: DataTable + ?Sized> TableAccessors<T::Row> for TableOverrides<'_, T> {
	fn accessor(&self, name: &str, row: &T::Row) -> Option<Value> {
		self.0.column_value(name, row)
	}

	fn type_name(&self) -> &'static str {
		std::any::type_name::<T>()
	}
}
