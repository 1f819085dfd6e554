pub mod introspect;
pub mod manager;
pub mod models;

pub use introspect::{MySqlIntrospector, SchemaIntrospector, StaticCatalog};
pub use manager::{DatabaseError, DatabaseManager};
