use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Declared SQL type of a catalog column, bucketed into the categories the
/// generator cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlType {
    SmallInteger,
    Integer,
    BigInteger,
    Decimal,
    Boolean,
    Text,
    LongText,
    Temporal,
    Other,
}

impl SqlType {
    /// Categorize a MySQL `DATA_TYPE` / `COLUMN_TYPE` pair.
    ///
    /// `bit(1)` is treated as boolean; `tinyint(1)` stays a small integer because
    /// status flags in this schema family are stored that way with enum comments.
    pub fn from_mysql(data_type: &str, column_type: &str) -> Self {
        let data_type = data_type.trim().to_ascii_lowercase();
        let column_type = column_type.trim().to_ascii_lowercase();

        match data_type.as_str() {
            "tinyint" | "smallint" => SqlType::SmallInteger,
            "mediumint" | "int" | "integer" => SqlType::Integer,
            "bigint" => SqlType::BigInteger,
            "decimal" | "numeric" | "float" | "double" | "real" => SqlType::Decimal,
            "bool" | "boolean" => SqlType::Boolean,
            "bit" if column_type == "bit(1)" || column_type == "bit" => SqlType::Boolean,
            "bit" => SqlType::Integer,
            "char" | "varchar" | "tinytext" => SqlType::Text,
            "text" | "mediumtext" | "longtext" => SqlType::LongText,
            "date" | "datetime" | "timestamp" | "time" | "year" => SqlType::Temporal,
            _ => SqlType::Other,
        }
    }
}

/// One column of an introspected table. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    pub name: String,
    pub sql_type: SqlType,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub primary_key: bool,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            max_length: None,
            nullable: false,
            default_value: None,
            comment: String::new(),
            primary_key: false,
        }
    }

    pub fn max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// Raw `INFORMATION_SCHEMA.COLUMNS` row as selected by the MySQL introspector.
#[derive(Debug, Clone, FromRow)]
pub struct CatalogColumnRow {
    pub column_name: String,
    pub data_type: String,
    pub column_type: String,
    pub max_length: Option<i64>,
    pub is_nullable: String,
    pub column_default: Option<String>,
    pub column_comment: Option<String>,
    pub column_key: Option<String>,
}

impl From<CatalogColumnRow> for ColumnMetadata {
    fn from(row: CatalogColumnRow) -> Self {
        let sql_type = SqlType::from_mysql(&row.data_type, &row.column_type);
        // Text lengths beyond u32 (longtext) carry no useful cap for a form.
        let max_length = row
            .max_length
            .and_then(|len| u32::try_from(len).ok())
            .filter(|_| matches!(sql_type, SqlType::Text | SqlType::LongText));

        Self {
            name: row.column_name,
            sql_type,
            max_length,
            nullable: row.is_nullable.eq_ignore_ascii_case("YES"),
            default_value: row.column_default,
            comment: row.column_comment.unwrap_or_default().trim().to_string(),
            primary_key: row.column_key.as_deref() == Some("PRI"),
        }
    }
}
