mod common;

use oa_api_rust::scaffold::render::{render_all, ArtifactKind, ModuleModel};
use oa_api_rust::scaffold::template::{leftover_placeholders, TemplateRenderer};
use oa_api_rust::scaffold::{FieldArchetype, Widget};

use anyhow::Result;

fn note_model() -> ModuleModel {
    ModuleModel::build(common::note_descriptor(), common::note_columns(), &[]).expect("note model")
}

fn task_model() -> ModuleModel {
    ModuleModel::build(
        common::task_descriptor(),
        common::task_columns(),
        &["sort".to_string(), "create_time".to_string(), "update_time".to_string()],
    )
    .expect("task model")
}

#[tokio::test]
async fn rendered_artifacts_have_no_placeholders() -> Result<()> {
    let renderer = TemplateRenderer::builtin();

    for model in [note_model(), task_model()] {
        let artifacts = render_all(&renderer, &model).await?;
        assert_eq!(artifacts.len(), ArtifactKind::all().len());

        for artifact in &artifacts {
            let leftover = leftover_placeholders(&artifact.content);
            assert!(leftover.is_empty(), "{}: {:?}", artifact.relative_path.display(), leftover);
        }
    }
    Ok(())
}

#[tokio::test]
async fn search_form_and_validator_agree_on_every_field() -> Result<()> {
    let renderer = TemplateRenderer::builtin();
    let model = task_model();
    let artifacts = render_all(&renderer, &model).await?;

    let content = |kind: ArtifactKind| {
        artifacts
            .iter()
            .find(|a| a.kind == kind)
            .map(|a| a.content.clone())
            .unwrap_or_default()
    };
    let validator = content(ArtifactKind::Validator);
    let view = content(ArtifactKind::ListView);
    let dialog = content(ArtifactKind::EditDialog);

    for field in &model.fields {
        let name = field.name();
        let create_rule = validator
            .lines()
            .find(|line| line.starts_with(&format!("  {name}: ")))
            .unwrap_or_default();

        let select = format!("v-model=\"formModel.{name}\" :options=");
        let range = format!("<a-range-picker v-model=\"formModel.{name}\"");
        let picker = format!("<a-date-picker v-model=\"form.{name}\"");

        match field.widget() {
            Widget::Select => {
                assert!(create_rule.contains(".refine("), "{name}: {create_rule}");
                assert!(view.contains(&select), "{name}");
                assert!(dialog.contains(&format!("v-model=\"form.{name}\" :options=")), "{name}");
            }
            Widget::Date => {
                assert!(create_rule.contains(".regex("), "{name}: {create_rule}");
                assert!(view.contains(&range), "{name}");
                assert!(dialog.contains(&picker), "{name}");
            }
            Widget::Text => {
                assert!(!create_rule.contains(".refine("), "{name}");
                assert!(!create_rule.contains(".regex("), "{name}");
                assert!(view.contains(&format!("<a-input v-model=\"formModel.{name}\"")), "{name}");
            }
        }
    }
    Ok(())
}

#[tokio::test]
async fn hidden_and_primary_key_columns_are_not_surfaced() -> Result<()> {
    let model = task_model();
    let names: Vec<&str> = model.fields.iter().map(|f| f.name()).collect();
    assert_eq!(model.primary_key, "id");
    assert!(!names.contains(&"id"));
    assert!(!names.contains(&"sort"));
    assert!(!names.contains(&"create_time"));

    let artifacts = render_all(&TemplateRenderer::builtin(), &model).await?;
    for artifact in artifacts {
        assert!(!artifact.content.contains("create_time"), "{}", artifact.relative_path.display());
        assert!(!artifact.content.contains("formModel.sort"), "{}", artifact.relative_path.display());
    }
    Ok(())
}

#[tokio::test]
async fn wide_tables_get_a_two_column_dialog() -> Result<()> {
    let model = task_model();
    assert_eq!(model.fields.len(), 8);

    let artifacts = render_all(&TemplateRenderer::builtin(), &model).await?;
    let dialog = artifacts
        .iter()
        .find(|a| a.kind == ArtifactKind::EditDialog)
        .map(|a| a.content.as_str())
        .unwrap_or_default();
    assert!(dialog.contains(":width=\"800\""));
    assert_eq!(dialog.matches("<a-col :span=\"12\">").count(), 8);

    let note = render_all(&TemplateRenderer::builtin(), &note_model()).await?;
    let dialog = note
        .iter()
        .find(|a| a.kind == ArtifactKind::EditDialog)
        .map(|a| a.content.as_str())
        .unwrap_or_default();
    assert!(dialog.contains(":width=\"520\""));
    assert!(!dialog.contains("<a-col :span=\"12\">"));
    Ok(())
}

#[tokio::test]
async fn types_follow_nullability() -> Result<()> {
    let artifacts = render_all(&TemplateRenderer::builtin(), &task_model()).await?;
    let types = artifacts
        .iter()
        .find(|a| a.kind == ArtifactKind::Types)
        .map(|a| a.content.as_str())
        .unwrap_or_default();

    assert!(types.contains("export interface TaskRecord {"));
    assert!(types.contains("  id: number;"));
    assert!(types.contains("  content?: string; // 任务描述"));
    assert!(types.contains("  budget?: number; // 预算"));
    assert!(types.contains("  end_time?: string[]; // 截止时间"));
    assert!(types.contains("export type TaskUpdateData = Partial<TaskCreateData> & { id: number };"));

    let model = task_model();
    let optional: Vec<&str> = model.fields.iter().filter(|f| f.is_optional()).map(|f| f.name()).collect();
    assert_eq!(optional, ["content", "budget"]);
    assert!(model
        .fields
        .iter()
        .any(|f| matches!(f.archetype, FieldArchetype::Boolean)));
    Ok(())
}
