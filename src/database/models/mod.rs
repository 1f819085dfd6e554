pub mod column;

pub use column::{CatalogColumnRow, ColumnMetadata, SqlType};
