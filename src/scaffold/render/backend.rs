//! SQL and list-filter fragments for the generated service.

use super::js_string;
use crate::scaffold::classify::{Field, FieldArchetype};

fn is_text(field: &Field) -> bool {
    matches!(field.archetype, FieldArchetype::PlainText | FieldArchetype::LongText)
}

fn names<'a>(fields: impl Iterator<Item = &'a Field>) -> Vec<&'a str> {
    fields.map(Field::name).collect()
}

pub fn select_columns(primary_key: &str, fields: &[Field]) -> String {
    std::iter::once(primary_key)
        .chain(fields.iter().map(Field::name))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn insert_columns(fields: &[Field]) -> String {
    names(fields.iter()).join(", ")
}

pub fn insert_placeholders(fields: &[Field]) -> String {
    vec!["?"; fields.len()].join(", ")
}

/// One bound value per line, in column order. Omitted optional values bind as NULL.
pub fn insert_values(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| format!("      data.{} ?? null,", f.name()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keyword search across every text column, then a `LIKE` filter per text column.
/// Empty when the table has no text columns.
pub fn search_clause(fields: &[Field]) -> String {
    let text: Vec<&str> = names(fields.iter().filter(|f| is_text(f)));
    if text.is_empty() {
        return String::new();
    }

    let like = text.iter().map(|name| format!("{name} LIKE ?")).collect::<Vec<_>>().join(" OR ");
    let quoted = text.iter().map(|name| js_string(name)).collect::<Vec<_>>().join(", ");

    [
        "    if (search) {".to_string(),
        format!("      conditions.push({});", js_string(&format!("({like})"))),
        format!("      values.push(...Array({}).fill(`%${{search}}%`));", text.len()),
        "    }".to_string(),
        String::new(),
        format!("    for (const key of [{quoted}]) {{"),
        "      const value = filters[key];".to_string(),
        "      if (typeof value === \"string\" && value !== \"\") {".to_string(),
        "        conditions.push(`${key} LIKE ?`);".to_string(),
        "        values.push(`%${value}%`);".to_string(),
        "      }".to_string(),
        "    }".to_string(),
        String::new(),
    ]
    .join("\n")
}

/// Columns filtered by exact match: enumerations and other scalar columns.
pub fn filter_columns(fields: &[Field]) -> String {
    fields
        .iter()
        .filter(|f| {
            matches!(
                f.archetype,
                FieldArchetype::Enumerated(_) | FieldArchetype::Integer | FieldArchetype::Decimal | FieldArchetype::Boolean
            )
        })
        .map(|f| js_string(f.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Temporal columns, filtered by a `[from, to]` pair.
pub fn range_columns(fields: &[Field]) -> String {
    fields
        .iter()
        .filter(|f| f.archetype == FieldArchetype::Temporal)
        .map(|f| js_string(f.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{ColumnMetadata, SqlType};

    fn fields() -> Vec<Field> {
        vec![
            ColumnMetadata::new("title", SqlType::Text).comment("标题"),
            ColumnMetadata::new("content", SqlType::LongText),
            ColumnMetadata::new("status", SqlType::SmallInteger).comment("状态:1启用,0禁用"),
            ColumnMetadata::new("start_time", SqlType::Integer),
        ]
        .into_iter()
        .map(Field::classify)
        .collect()
    }

    #[test]
    fn column_lists_follow_field_order() {
        let fields = fields();
        assert_eq!(select_columns("id", &fields), "id, title, content, status, start_time");
        assert_eq!(insert_columns(&fields), "title, content, status, start_time");
        assert_eq!(insert_placeholders(&fields), "?, ?, ?, ?");
        assert_eq!(insert_values(&fields).lines().count(), 4);
        assert!(insert_values(&fields).starts_with("      data.title ?? null,"));
    }

    #[test]
    fn filters_split_by_archetype() {
        let fields = fields();
        assert_eq!(filter_columns(&fields), r#""status""#);
        assert_eq!(range_columns(&fields), r#""start_time""#);
    }

    #[test]
    fn keyword_search_covers_text_columns() {
        let clause = search_clause(&fields());
        assert!(clause.contains(r#"conditions.push("(title LIKE ? OR content LIKE ?)");"#));
        assert!(clause.contains("values.push(...Array(2).fill(`%${search}%`));"));
        assert!(clause.contains(r#"for (const key of ["title", "content"])"#));
    }

    #[test]
    fn no_text_columns_means_no_search_clause() {
        let fields = vec![Field::classify(ColumnMetadata::new("amount", SqlType::Decimal))];
        assert_eq!(search_clause(&fields), "");
        assert_eq!(insert_placeholders(&[]), "");
    }
}
