//! Column classification.
//!
//! Every generated artifact derives its per-field behaviour (form widget, validation
//! rule, structural type) from the single [`FieldArchetype`] computed here, so UI
//! and validators can never disagree about a column.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::database::models::{ColumnMetadata, SqlType};

/// Column-name suffixes that mark temporal columns. Many of them are stored as
/// integer epoch seconds, so the name wins over the declared type.
pub const TEMPORAL_SUFFIXES: &[&str] = &["_time"];

/// `<label>:<enumeration>` with an ASCII or full-width colon.
static ENUM_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:：]*)[:：](.+)$").expect("valid enum comment regex"));

/// One `<code><label>` pair inside an enumeration, e.g. `1启用`.
static ENUM_OPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(-?\d+)\s*([^,，;；\d]+)").expect("valid enum option regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumOption {
    pub code: String,
    pub label: String,
}

impl EnumOption {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self { code: code.into(), label: label.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "options")]
pub enum FieldArchetype {
    PlainText,
    LongText,
    Integer,
    Decimal,
    Boolean,
    Temporal,
    Enumerated(Vec<EnumOption>),
}

impl FieldArchetype {
    pub fn name(&self) -> &'static str {
        match self {
            FieldArchetype::PlainText => "PlainText",
            FieldArchetype::LongText => "LongText",
            FieldArchetype::Integer => "Integer",
            FieldArchetype::Decimal => "Decimal",
            FieldArchetype::Boolean => "Boolean",
            FieldArchetype::Temporal => "Temporal",
            FieldArchetype::Enumerated(_) => "Enumerated",
        }
    }

    pub fn options(&self) -> &[EnumOption] {
        match self {
            FieldArchetype::Enumerated(options) => options,
            _ => &[],
        }
    }
}

/// Form widget shared by the search form and the edit dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Widget {
    Select,
    Date,
    Text,
}

impl Widget {
    pub fn for_archetype(archetype: &FieldArchetype) -> Self {
        match archetype {
            FieldArchetype::Enumerated(_) => Widget::Select,
            FieldArchetype::Temporal => Widget::Date,
            _ => Widget::Text,
        }
    }
}

/// Classify a column. Pure: the same metadata always yields the same archetype.
pub fn classify(column: &ColumnMetadata) -> FieldArchetype {
    if is_temporal_name(&column.name) {
        return FieldArchetype::Temporal;
    }

    if column.sql_type == SqlType::SmallInteger {
        if let Some((_, options)) = parse_enum_comment(&column.comment) {
            return FieldArchetype::Enumerated(options);
        }
    }

    match column.sql_type {
        SqlType::Temporal => FieldArchetype::Temporal,
        SqlType::SmallInteger | SqlType::Integer | SqlType::BigInteger => FieldArchetype::Integer,
        SqlType::Decimal => FieldArchetype::Decimal,
        SqlType::Boolean => FieldArchetype::Boolean,
        SqlType::LongText => FieldArchetype::LongText,
        SqlType::Text | SqlType::Other => FieldArchetype::PlainText,
    }
}

/// Human label for a column: the text before the colon for enumerations, else the
/// comment, else the raw column name.
pub fn display_label(column: &ColumnMetadata) -> String {
    if let FieldArchetype::Enumerated(_) = classify(column) {
        if let Some((label, _)) = parse_enum_comment(&column.comment) {
            return label.unwrap_or_else(|| column.name.clone());
        }
    }

    let comment = column.comment.trim();
    if comment.is_empty() {
        column.name.clone()
    } else {
        comment.to_string()
    }
}

fn is_temporal_name(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    TEMPORAL_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Parse `"<label>:<code><text>,<code><text>,..."`. Returns `None` unless the
/// comment contains a colon followed by at least one coded option. The label is
/// `None` when nothing usable precedes the colon.
pub fn parse_enum_comment(comment: &str) -> Option<(Option<String>, Vec<EnumOption>)> {
    let captures = ENUM_COMMENT.captures(comment.trim())?;
    let label = captures.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
    let enumeration = captures.get(2)?.as_str();

    let options: Vec<EnumOption> = ENUM_OPTION
        .captures_iter(enumeration)
        .filter_map(|c| {
            let label = c[2].trim();
            (!label.is_empty()).then(|| EnumOption::new(&c[1], label))
        })
        .collect();

    if options.is_empty() {
        return None;
    }

    let label = (!label.is_empty()).then(|| label.to_string());
    Some((label, options))
}

/// A surfaced column together with its classification.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub column: ColumnMetadata,
    pub archetype: FieldArchetype,
    pub label: String,
}

impl Field {
    pub fn classify(column: ColumnMetadata) -> Self {
        let archetype = classify(&column);
        let label = display_label(&column);
        Self { column, archetype, label }
    }

    pub fn name(&self) -> &str {
        &self.column.name
    }

    pub fn widget(&self) -> Widget {
        Widget::for_archetype(&self.archetype)
    }

    pub fn is_optional(&self) -> bool {
        self.column.nullable
    }
}
