use convert_case::{Case, Casing};

use super::single_line;
use crate::scaffold::classify::{Field, FieldArchetype};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceRole {
    Record,
    Params,
    CreateData,
}

impl InterfaceRole {
    fn suffix(&self) -> &'static str {
        match self {
            InterfaceRole::Record => "Record",
            InterfaceRole::Params => "Params",
            InterfaceRole::CreateData => "CreateData",
        }
    }
}

/// `("note", Record)` -> `NoteRecord`.
pub fn interface_name(module_key: &str, role: InterfaceRole) -> String {
    format!("{}{}", module_key.to_case(Case::Pascal), role.suffix())
}

/// Structural TypeScript type of a field.
pub fn ts_type(archetype: &FieldArchetype) -> &'static str {
    match archetype {
        FieldArchetype::PlainText | FieldArchetype::LongText | FieldArchetype::Temporal => "string",
        FieldArchetype::Integer | FieldArchetype::Decimal | FieldArchetype::Enumerated(_) => "number",
        FieldArchetype::Boolean => "boolean",
    }
}

fn field_line(field: &Field, optional: bool, ts: &str) -> String {
    format!(
        "  {}{}: {}; // {}",
        field.name(),
        if optional { "?" } else { "" },
        ts,
        single_line(&field.label)
    )
}

pub fn record_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| field_line(f, false, ts_type(&f.archetype)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// List filters: everything optional, temporal columns filter by a `[from, to]` pair.
pub fn params_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| match f.archetype {
            FieldArchetype::Temporal => field_line(f, true, "string[]"),
            _ => field_line(f, true, ts_type(&f.archetype)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn create_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| field_line(f, f.is_optional(), ts_type(&f.archetype)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{ColumnMetadata, SqlType};

    #[test]
    fn interface_names_capitalize_module_key() {
        assert_eq!(interface_name("note", InterfaceRole::Record), "NoteRecord");
        assert_eq!(interface_name("note", InterfaceRole::Params), "NoteParams");
        assert_eq!(interface_name("note", InterfaceRole::CreateData), "NoteCreateData");
        assert_eq!(interface_name("user_group", InterfaceRole::Record), "UserGroupRecord");
    }

    #[test]
    fn archetypes_map_to_structural_types() {
        assert_eq!(ts_type(&FieldArchetype::PlainText), "string");
        assert_eq!(ts_type(&FieldArchetype::LongText), "string");
        assert_eq!(ts_type(&FieldArchetype::Temporal), "string");
        assert_eq!(ts_type(&FieldArchetype::Integer), "number");
        assert_eq!(ts_type(&FieldArchetype::Decimal), "number");
        assert_eq!(ts_type(&FieldArchetype::Enumerated(vec![])), "number");
        assert_eq!(ts_type(&FieldArchetype::Boolean), "boolean");
    }

    #[test]
    fn create_fields_mark_nullable_columns_optional() {
        let fields = vec![
            Field::classify(ColumnMetadata::new("title", SqlType::Text).comment("标题")),
            Field::classify(ColumnMetadata::new("src", SqlType::Text).nullable()),
            Field::classify(ColumnMetadata::new("start_time", SqlType::Integer)),
        ];

        assert_eq!(
            create_fields(&fields),
            "  title: string; // 标题\n  src?: string; // src\n  start_time: string; // start_time"
        );
        assert!(params_fields(&fields).contains("  start_time?: string[];"));
        assert!(record_fields(&fields).contains("  src: string;"));
    }
}
