pub mod scaffold_service;

pub use scaffold_service::{ScaffoldReport, ScaffoldService, TableDescription};
