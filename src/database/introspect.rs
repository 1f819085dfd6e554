use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{CatalogColumnRow, ColumnMetadata};
use crate::scaffold::error::ScaffoldError;

const COLUMNS_SQL: &str = r#"
    SELECT CAST(COLUMN_NAME AS CHAR) AS column_name,
           CAST(DATA_TYPE AS CHAR) AS data_type,
           CAST(COLUMN_TYPE AS CHAR) AS column_type,
           CAST(CHARACTER_MAXIMUM_LENGTH AS SIGNED) AS max_length,
           CAST(IS_NULLABLE AS CHAR) AS is_nullable,
           CAST(COLUMN_DEFAULT AS CHAR) AS column_default,
           CAST(COLUMN_COMMENT AS CHAR) AS column_comment,
           CAST(COLUMN_KEY AS CHAR) AS column_key
    FROM INFORMATION_SCHEMA.COLUMNS
    WHERE TABLE_NAME = ? AND TABLE_SCHEMA = DATABASE()
    ORDER BY ORDINAL_POSITION
"#;

/// Source of ordered column metadata for a table.
#[async_trait]
pub trait SchemaIntrospector: Send + Sync {
    /// Raw catalog lookup. Implementations return columns in physical order and
    /// an empty list for unknown tables.
    async fn fetch_columns(&self, table: &str) -> Result<Vec<ColumnMetadata>, DatabaseError>;

    /// Validated lookup: blank table names are rejected before any query, and a
    /// missing or columnless table is a schema error.
    async fn columns(&self, table: &str) -> Result<Vec<ColumnMetadata>, ScaffoldError> {
        let table = table.trim();
        if table.is_empty() {
            return Err(ScaffoldError::validation("tableName", "Table name is required"));
        }

        let columns = self.fetch_columns(table).await?;
        if columns.is_empty() {
            return Err(ScaffoldError::Schema(table.to_string()));
        }

        debug!("Introspected {} columns from {}", columns.len(), table);
        Ok(columns)
    }
}

/// Reads `INFORMATION_SCHEMA.COLUMNS` of the connected MySQL database.
#[derive(Debug, Default, Clone)]
pub struct MySqlIntrospector;

impl MySqlIntrospector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SchemaIntrospector for MySqlIntrospector {
    async fn fetch_columns(&self, table: &str) -> Result<Vec<ColumnMetadata>, DatabaseError> {
        let pool = DatabaseManager::pool().await?;

        let rows: Vec<CatalogColumnRow> = sqlx::query_as(COLUMNS_SQL)
            .bind(table)
            .fetch_all(&pool)
            .await?;

        Ok(rows.into_iter().map(ColumnMetadata::from).collect())
    }
}

/// Catalog held in memory, loaded from a JSON column dump
/// (`{ "<table>": [ColumnMetadata, ...] }`) or built in code.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    tables: HashMap<String, Vec<ColumnMetadata>>,
    queries: AtomicUsize,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: impl Into<String>, columns: Vec<ColumnMetadata>) -> Self {
        self.tables.insert(table.into(), columns);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, DatabaseError> {
        let tables: HashMap<String, Vec<ColumnMetadata>> = serde_json::from_str(json)
            .map_err(|e| DatabaseError::QueryError(format!("Invalid column dump: {}", e)))?;
        Ok(Self { tables, queries: AtomicUsize::new(0) })
    }

    pub async fn from_json_file(path: &Path) -> Result<Self, DatabaseError> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            DatabaseError::QueryError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Number of catalog lookups served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchemaIntrospector for StaticCatalog {
    async fn fetch_columns(&self, table: &str) -> Result<Vec<ColumnMetadata>, DatabaseError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }
}
