//! DataTables module.
//!
//! This module provides table declarations, rendering and paged data
//! responses for the DataTables client widget.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_grid::datatables::{ColumnCollection, ColumnDescriptor, SortDirection};
//!
//! let columns = ColumnCollection::new()
//!     .with_column(ColumnDescriptor::new("id", "ID"))?
//!     .with_column(ColumnDescriptor::new("created_at", "Created").default_sort(SortDirection::Desc))?;
//!
//! assert_eq!(columns.index_of("created_at"), Some(1));
//! # Ok::<(), reinhardt_grid::datatables::TableError>(())
//! ```

pub use reinhardt_datatables::*;
