//! Markdown output: API tables and the documentation splice.

pub mod splice;
pub mod table;
pub mod tables;

pub use splice::{splice, try_splice, ComponentTables};
pub use table::{MarkdownTable, RowShapeError};
pub use tables::{build_tables, NamedTable, TableKind};
