// handlers/mod.rs
//
// Public: service banner and health check.
// Generator: POST /api/crud scaffolds a module from a table.
pub mod crud;
pub mod health;
