//! Artifact generation: one [`ArtifactKind`] per emitted file, each rendered from a
//! skeleton plus fragments computed from the classified field list.

pub mod backend;
pub mod locale;
pub mod types;
pub mod validator;
pub mod views;

use std::path::PathBuf;

use convert_case::{Case, Casing};
use futures::future::try_join_all;
use serde::Serialize;

use super::classify::Field;
use super::descriptor::ModuleDescriptor;
use super::error::ScaffoldError;
use super::template::{Substitutions, TemplateRenderer};
use crate::database::models::ColumnMetadata;

pub use locale::Locale;
pub use types::InterfaceRole;

/// Names the generated list view and list endpoint already use for their own members:
/// pagination and keyword parameters, and the trailing operations column.
pub const RESERVED_FIELD_NAMES: &[&str] = &["current", "pageSize", "search", "operations"];

/// Descriptor plus the classified, filtered field list every artifact is built from.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleModel {
    pub descriptor: ModuleDescriptor,
    pub primary_key: String,
    pub fields: Vec<Field>,
}

impl ModuleModel {
    /// Split off the primary key, drop `hidden` columns (case-insensitive) and
    /// classify the rest, preserving physical column order.
    ///
    /// Fails when the table has neither a catalog primary key nor an `id` column, or
    /// when a surfaced column is named like one of [`RESERVED_FIELD_NAMES`]. Hiding
    /// such a column lets the table through.
    pub fn build(
        descriptor: ModuleDescriptor,
        columns: Vec<ColumnMetadata>,
        hidden: &[String],
    ) -> Result<Self, ScaffoldError> {
        let unsupported = |reason: String| ScaffoldError::UnsupportedTable {
            table: descriptor.table_name.clone(),
            reason,
        };

        let primary_key = columns
            .iter()
            .find(|c| c.primary_key)
            .or_else(|| columns.iter().find(|c| c.name.eq_ignore_ascii_case("id")))
            .map(|c| c.name.clone())
            .ok_or_else(|| unsupported("no primary key and no `id` column".to_string()))?;

        let fields: Vec<Field> = columns
            .into_iter()
            .filter(|c| c.name != primary_key)
            .filter(|c| !hidden.iter().any(|h| h.eq_ignore_ascii_case(&c.name)))
            .map(Field::classify)
            .collect();

        let clash = fields
            .iter()
            .find(|f| RESERVED_FIELD_NAMES.iter().any(|reserved| *reserved == f.name()));
        if let Some(field) = clash {
            return Err(unsupported(format!(
                "column `{}` clashes with a generated list member; add it to the hidden columns to skip it",
                field.name()
            )));
        }

        Ok(Self { descriptor, primary_key, fields })
    }

    pub fn module(&self) -> &str {
        &self.descriptor.module_key
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArtifactKind {
    Types,
    Validator,
    Service,
    Controller,
    Router,
    ListView,
    EditDialog,
    Locale(Locale),
    FrontRoute,
}

impl ArtifactKind {
    pub fn all() -> Vec<ArtifactKind> {
        let mut kinds = vec![
            ArtifactKind::Types,
            ArtifactKind::Validator,
            ArtifactKind::Service,
            ArtifactKind::Controller,
            ArtifactKind::Router,
            ArtifactKind::ListView,
            ArtifactKind::EditDialog,
        ];
        kinds.extend(Locale::ALL.iter().copied().map(ArtifactKind::Locale));
        kinds.push(ArtifactKind::FrontRoute);
        kinds
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            ArtifactKind::Types => "api/types.ts.tpl",
            ArtifactKind::Validator => "api/validator.ts.tpl",
            ArtifactKind::Service => "api/service.ts.tpl",
            ArtifactKind::Controller => "api/controller.ts.tpl",
            ArtifactKind::Router => "api/router.ts.tpl",
            ArtifactKind::ListView => "front/index.vue.tpl",
            ArtifactKind::EditDialog => "front/dialog.vue.tpl",
            ArtifactKind::Locale(_) => "front/locale.ts.tpl",
            ArtifactKind::FrontRoute => "front/route.ts.tpl",
        }
    }

    /// Path inside the live backend source tree, for backend artifacts only.
    pub fn source_path(&self, descriptor: &ModuleDescriptor) -> Option<PathBuf> {
        let module = &descriptor.module_key;
        let path = match self {
            ArtifactKind::Types => format!("types/{module}.ts"),
            ArtifactKind::Validator => format!("validators/{module}Validator.ts"),
            ArtifactKind::Service => format!("services/{module}Service.ts"),
            ArtifactKind::Controller => format!("controllers/{}.ts", descriptor.controller_name),
            ArtifactKind::Router => format!("routes/{module}.ts"),
            _ => return None,
        };
        Some(PathBuf::from(path))
    }

    /// Path below the generated-output root.
    pub fn staging_path(&self, descriptor: &ModuleDescriptor) -> PathBuf {
        let module = &descriptor.module_key;
        if let Some(source_path) = self.source_path(descriptor) {
            return PathBuf::from("api").join(module).join(source_path);
        }

        let path = match self {
            ArtifactKind::ListView => format!("front/{module}/index.vue"),
            ArtifactKind::EditDialog => format!("front/{module}/components/Dialog.vue"),
            ArtifactKind::Locale(locale) => format!("front/{module}/locale/{}.ts", locale.code()),
            _ => format!("front/routes/{module}.ts"),
        };
        PathBuf::from(path)
    }
}

/// One rendered file, not yet written.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub relative_path: PathBuf,
    pub content: String,
}

/// Substitutions shared by every skeleton.
fn common_substitutions(model: &ModuleModel) -> Substitutions {
    let descriptor = &model.descriptor;
    let module = model.module();

    let mut subs = Substitutions::new();
    subs.set("MODULE", module)
        .set("MODULE_PASCAL", descriptor.pascal_name())
        .set("MODULE_CONST", module.to_case(Case::UpperSnake))
        .set("TABLE", descriptor.table_name.as_str())
        .set("DISPLAY_NAME", single_line(&descriptor.display_name))
        .set("CONTROLLER", descriptor.controller_name.as_str())
        .set("PRIMARY_KEY", model.primary_key.as_str())
        .set("RECORD_INTERFACE", types::interface_name(module, InterfaceRole::Record))
        .set("PARAMS_INTERFACE", types::interface_name(module, InterfaceRole::Params))
        .set("CREATE_INTERFACE", types::interface_name(module, InterfaceRole::CreateData));
    subs
}

/// Every substitution `kind`'s skeleton needs.
pub fn substitutions_for(kind: ArtifactKind, model: &ModuleModel) -> Substitutions {
    let mut subs = common_substitutions(model);
    let fields = &model.fields;
    let module = model.module();

    match kind {
        ArtifactKind::Types => {
            subs.set("RECORD_FIELDS", types::record_fields(fields))
                .set("PARAMS_FIELDS", types::params_fields(fields))
                .set("CREATE_FIELDS", types::create_fields(fields));
        }
        ArtifactKind::Validator => {
            subs.set("CREATE_SCHEMA_FIELDS", validator::schema_fields(fields, validator::SchemaContext::Create))
                .set("UPDATE_SCHEMA_FIELDS", validator::schema_fields(fields, validator::SchemaContext::Update));
        }
        ArtifactKind::Service => {
            subs.set("SELECT_COLUMNS", backend::select_columns(&model.primary_key, fields))
                .set("INSERT_COLUMNS", backend::insert_columns(fields))
                .set("INSERT_PLACEHOLDERS", backend::insert_placeholders(fields))
                .set("INSERT_VALUES", backend::insert_values(fields))
                .set("SEARCH_CLAUSE", backend::search_clause(fields))
                .set("FILTER_COLUMNS", backend::filter_columns(fields))
                .set("RANGE_COLUMNS", backend::range_columns(fields));
        }
        ArtifactKind::Controller | ArtifactKind::Router | ArtifactKind::FrontRoute => {}
        ArtifactKind::ListView => {
            subs.set("SEARCH_FORM_ITEMS", views::search_form_items(module, fields))
                .set("SEARCH_MODEL_FIELDS", views::search_model_fields(fields))
                .set("TABLE_COLUMNS", views::table_columns(module, fields))
                .set("CELL_SLOTS", views::cell_slots(fields))
                .set("OPTION_CONSTANTS", views::option_constants(fields));
        }
        ArtifactKind::EditDialog => {
            subs.set("FORM_ITEMS", views::form_items(module, fields))
                .set("FORM_DEFAULTS", views::form_defaults(fields))
                .set("FORM_RULES", views::form_rules(module, fields))
                .set("DIALOG_WIDTH", views::dialog_width(fields).to_string())
                .set("OPTION_CONSTANTS", views::option_constants(fields));
        }
        ArtifactKind::Locale(locale) => {
            subs.set("LOCALE_ENTRIES", locale::entries(locale, &model.descriptor, fields));
        }
    }

    subs
}

pub async fn render_artifact(
    renderer: &TemplateRenderer,
    kind: ArtifactKind,
    model: &ModuleModel,
) -> Result<GeneratedArtifact, ScaffoldError> {
    let substitutions = substitutions_for(kind, model);
    let content = renderer.render(kind.template_name(), &substitutions).await?;

    Ok(GeneratedArtifact {
        kind,
        relative_path: kind.staging_path(&model.descriptor),
        content,
    })
}

/// Render every artifact kind. Renders are independent, so they run concurrently;
/// the result keeps [`ArtifactKind::all`] order.
pub async fn render_all(renderer: &TemplateRenderer, model: &ModuleModel) -> Result<Vec<GeneratedArtifact>, ScaffoldError> {
    try_join_all(
        ArtifactKind::all()
            .into_iter()
            .map(|kind| render_artifact(renderer, kind, model)),
    )
    .await
}

/// JavaScript string literal (double-quoted, escaped).
pub(crate) fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Collapse line breaks so free text can sit in a line comment.
pub(crate) fn single_line(value: &str) -> String {
    value
        .split(|c| c == '\r' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::SqlType;

    fn descriptor() -> ModuleDescriptor {
        ModuleDescriptor::new("通知", "note", "oa_note", "noteController")
    }

    fn columns() -> Vec<ColumnMetadata> {
        vec![
            ColumnMetadata::new("id", SqlType::Integer).primary_key(),
            ColumnMetadata::new("title", SqlType::Text).max_length(225).comment("标题"),
            ColumnMetadata::new("sort", SqlType::Integer),
            ColumnMetadata::new("status", SqlType::SmallInteger).comment("状态:1启用,0禁用"),
        ]
    }

    #[test]
    fn model_drops_primary_key_and_hidden_columns() {
        let model = ModuleModel::build(descriptor(), columns(), &["SORT".to_string()]).unwrap();
        assert_eq!(model.primary_key, "id");
        let names: Vec<_> = model.fields.iter().map(Field::name).collect();
        assert_eq!(names, ["title", "status"]);
    }

    #[test]
    fn model_falls_back_to_id_column() {
        let cols = vec![
            ColumnMetadata::new("title", SqlType::Text),
            ColumnMetadata::new("ID", SqlType::Integer),
        ];
        let model = ModuleModel::build(descriptor(), cols, &[]).unwrap();
        assert_eq!(model.primary_key, "ID");
        assert_eq!(model.fields.len(), 1);
    }

    #[test]
    fn model_without_any_key_is_rejected() {
        let cols = vec![
            ColumnMetadata::new("title", SqlType::Text),
            ColumnMetadata::new("note_no", SqlType::Integer),
        ];
        let err = ModuleModel::build(descriptor(), cols, &[]).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::UnsupportedTable { ref table, ref reason } if table == "oa_note" && reason.contains("primary key")
        ));
    }

    #[test]
    fn reserved_column_names_are_rejected_unless_hidden() {
        for reserved in RESERVED_FIELD_NAMES {
            let mut cols = columns();
            cols.push(ColumnMetadata::new(*reserved, SqlType::Text));

            let err = ModuleModel::build(descriptor(), cols.clone(), &[]).unwrap_err();
            assert!(
                matches!(err, ScaffoldError::UnsupportedTable { ref reason, .. } if reason.contains(reserved)),
                "{reserved}"
            );

            let model = ModuleModel::build(descriptor(), cols, &[reserved.to_string()]).unwrap();
            assert!(model.fields.iter().all(|f| f.name() != *reserved));
        }
    }

    #[test]
    fn staging_and_source_paths() {
        let d = descriptor();
        assert_eq!(ArtifactKind::Controller.staging_path(&d), PathBuf::from("api/note/controllers/noteController.ts"));
        assert_eq!(ArtifactKind::Validator.source_path(&d), Some(PathBuf::from("validators/noteValidator.ts")));
        assert_eq!(ArtifactKind::EditDialog.staging_path(&d), PathBuf::from("front/note/components/Dialog.vue"));
        assert_eq!(ArtifactKind::Locale(Locale::EnUs).staging_path(&d), PathBuf::from("front/note/locale/en-US.ts"));
        assert_eq!(ArtifactKind::FrontRoute.staging_path(&d), PathBuf::from("front/routes/note.ts"));
        assert_eq!(ArtifactKind::ListView.source_path(&d), None);
    }

    #[test]
    fn every_kind_has_a_distinct_path() {
        let d = descriptor();
        let mut paths: Vec<_> = ArtifactKind::all().iter().map(|k| k.staging_path(&d)).collect();
        let count = paths.len();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), count);
    }

    #[test]
    fn single_line_collapses_breaks() {
        assert_eq!(single_line("通知\r\n 公告 "), "通知 公告");
        assert_eq!(js_string("a \"b\""), r#""a \"b\"""#);
    }
}
