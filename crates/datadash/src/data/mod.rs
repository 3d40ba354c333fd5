//! Extracted tables and row editing.

pub mod store;
pub mod table;

pub use store::TableStore;
pub use table::{DataRow, TableData};
