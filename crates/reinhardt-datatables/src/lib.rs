//! Server-side adapter for DataTables grids
//!
//! This crate turns a declarative table description into the HTML skeleton
//! and configuration document consumed by the DataTables client widget, and
//! answers the widget's paged data requests.
//!
//! # Features
//!
//! - **Column model**: ordered, validated column descriptors with visibility,
//!   sorting, search and render options
//! - **Configuration**: every widget option in one serde-backed [`TableConfig`],
//!   loadable from TOML or JSON
//! - **Value resolution**: cell values come from the table first and the row
//!   second, so tables can compute or override columns
//! - **Callbacks**: client-side callback expressions embedded unquoted in the
//!   configuration document
//! - **Static and server-side modes**: pre-rendered rows or a loading
//!   placeholder followed by paged JSON responses
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[DataTable] --> B[TableConfig]
//!     B --> C[ColumnCollection]
//!     A --> D[TableRenderer]
//!     D --> E[HTML skeleton]
//!     D --> F[Configuration Document]
//!     F --> G[CallbackRegistry]
//!     D --> H[PagedResponse]
//!     H --> I[Value resolver]
//! ```
//!
//! # Example
//!
//! ```rust
//! use reinhardt_datatables::{
//!     ColumnCollection, ColumnDescriptor, DataResult, DataTable, RequestParameters,
//!     TableConfig, TableError, TableRenderer,
//! };
//! use serde_json::{Map, Value, json};
//!
//! struct Fruit {
//!     config: TableConfig,
//! }
//!
//! impl DataTable for Fruit {
//!     type Row = Map<String, Value>;
//!     type Error = TableError;
//!
//!     fn table_id(&self) -> &str {
//!         "fruit"
//!     }
//!
//!     fn config(&self) -> Option<&TableConfig> {
//!         Some(&self.config)
//!     }
//!
//!     fn load_data(&self, _request: &RequestParameters) -> Result<DataResult<Self::Row>, TableError> {
//!         let row = json!({"name": "apple", "price": 3});
//!         Ok(DataResult::new(vec![row.as_object().unwrap().clone()], 1))
//!     }
//! }
//!
//! let columns = ColumnCollection::try_from(vec![
//!     ColumnDescriptor::new("name", "Name"),
//!     ColumnDescriptor::new("price", "Price"),
//! ])?;
//! let table = Fruit { config: TableConfig::new(columns) };
//!
//! let html = table.render()?;
//! assert!(html.contains("<td>apple</td><td>3</td>"));
//!
//! let response = table.render_json(&RequestParameters::new().with_echo("1"))?;
//! assert_eq!(response.data, vec![vec![json!("apple"), json!(3)]]);
//! # Ok::<(), TableError>(())
//! ```

#![warn(rustdoc::broken_intra_doc_links)]

pub mod callback;
pub mod column;
pub mod config;
pub mod document;
pub mod error;
pub mod html;
pub mod options;
pub mod renderer;
pub mod request;
pub mod resolver;
pub mod response;
pub mod result;
pub mod table;

pub use callback::CallbackRegistry;
pub use column::{ColumnCollection, ColumnDescriptor, SortDirection};
pub use config::{LanguageConfig, LengthLabel, LengthMenu, PagingType, ScrollSetting, TableConfig};
pub use document::{Document, DocumentMap};
pub use error::{Result, TableError};
pub use renderer::TableRenderer;
pub use request::{DisplayLength, RequestParameters};
pub use resolver::{Accessors, RowAccessors, TableAccessors, resolve};
pub use response::PagedResponse;
pub use result::DataResult;
pub use table::{CallbackHook, DataTable};

pub use serde_json::Value;
