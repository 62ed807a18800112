//! # Reinhardt Grid
//!
//! Server-side DataTables integration for Reinhardt applications.
//!
//! A table is declared once, as a [`TableConfig`](prelude::TableConfig) plus a
//! [`DataTable`](prelude::DataTable) implementation that loads rows. The same
//! table then renders the initial page (HTML skeleton, initialisation script)
//! and answers the widget's paged data requests.
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_grid::prelude::*;
//!
//! let config = TableConfig::from_toml_str(r#"
//!     server_side = true
//!     ajax_source = "/orders/data"
//!
//!     [[columns]]
//!     name = "number"
//!     title = "Order"
//!
//!     [[columns]]
//!     name = "customer"
//!     title = "Customer"
//! "#)?;
//!
//! assert_eq!(config.columns().len(), 2);
//! # Ok::<(), TableError>(())
//! ```

pub mod datatables;

pub mod prelude {
	pub use crate::datatables::{
		Accessors, CallbackHook, ColumnCollection, ColumnDescriptor, DataResult, DataTable,
		DisplayLength, PagedResponse, RequestParameters, RowAccessors, SortDirection, TableConfig,
		TableError, TableRenderer, Value,
	};
}
