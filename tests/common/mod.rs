#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tempfile::TempDir;

use oa_api_rust::config::ScaffoldConfig;
use oa_api_rust::database::models::{ColumnMetadata, SqlType};
use oa_api_rust::database::StaticCatalog;
use oa_api_rust::scaffold::ModuleDescriptor;
use oa_api_rust::services::ScaffoldService;

/// Router aggregation file as it ships before any module is generated.
pub const REGISTRY_SOURCE: &str = r#"import { Router } from "@oak/oak";
import userRoutes from "./user.ts";
import authRoutes from "./auth.ts";

const router = new Router();
// 健康检查
router.get("/", (ctx) => {
  ctx.response.body = { success: true, message: "OA API 服务运行正常" };
});

router.use(authRoutes.routes(), authRoutes.allowedMethods());
router.use(userRoutes.routes(), userRoutes.allowedMethods());

export default router;
"#;

/// Isolated project tree: `src/routes/index.ts` seeded, nothing generated yet.
pub struct Workspace {
    pub dir: TempDir,
    pub settings: ScaffoldConfig,
}

impl Workspace {
    pub async fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        let root = dir.path();

        let settings = ScaffoldConfig {
            output_root: root.join("gen"),
            source_root: root.join("src"),
            registry_file: root.join("src/routes/index.ts"),
            route_manifest: Some(root.join("src/routes/modules.json")),
            template_dir: None,
            hidden_columns: vec!["sort".to_string(), "create_time".to_string(), "update_time".to_string()],
        };

        tokio::fs::create_dir_all(root.join("src/routes")).await?;
        tokio::fs::write(&settings.registry_file, REGISTRY_SOURCE).await?;

        Ok(Self { dir, settings })
    }

    pub fn service(&self, catalog: Arc<StaticCatalog>) -> ScaffoldService {
        ScaffoldService::new(catalog, &self.settings)
    }

    pub fn staging(&self, relative: &str) -> PathBuf {
        self.settings.output_root.join(relative)
    }

    pub fn live(&self, relative: &str) -> PathBuf {
        self.settings.source_root.join(relative)
    }

    pub async fn read(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read {}", path.display()))
    }

    pub async fn registry(&self) -> Result<String> {
        self.read(&self.settings.registry_file).await
    }
}

/// `oa_note` as the catalog reports it.
pub fn note_columns() -> Vec<ColumnMetadata> {
    vec![
        ColumnMetadata::new("id", SqlType::from_mysql("int", "int(11)")).primary_key(),
        ColumnMetadata::new("title", SqlType::from_mysql("varchar", "varchar(225)"))
            .max_length(225)
            .comment("标题"),
        ColumnMetadata::new("status", SqlType::from_mysql("tinyint", "tinyint(1)")).comment("状态:1启用,0禁用"),
        ColumnMetadata::new("start_time", SqlType::from_mysql("datetime", "datetime")),
    ]
}

/// Wider table: hidden columns, nullable text, decimals and enough fields for the
/// two-column dialog.
pub fn task_columns() -> Vec<ColumnMetadata> {
    vec![
        ColumnMetadata::new("id", SqlType::BigInteger).primary_key(),
        ColumnMetadata::new("title", SqlType::Text).max_length(100).comment("任务名称"),
        ColumnMetadata::new("content", SqlType::LongText).nullable().comment("任务描述"),
        ColumnMetadata::new("priority", SqlType::SmallInteger).comment("优先级：1低,2中,3高"),
        ColumnMetadata::new("status", SqlType::SmallInteger).comment("状态:0未开始,1进行中,2已完成"),
        ColumnMetadata::new("budget", SqlType::Decimal).nullable().comment("预算"),
        ColumnMetadata::new("owner_id", SqlType::Integer).comment("负责人ID"),
        ColumnMetadata::new("is_public", SqlType::Boolean).comment("是否公开"),
        ColumnMetadata::new("end_time", SqlType::Integer).comment("截止时间"),
        ColumnMetadata::new("sort", SqlType::Integer).comment("排序"),
        ColumnMetadata::new("create_time", SqlType::Integer).comment("创建时间"),
        ColumnMetadata::new("update_time", SqlType::Integer).comment("更新时间"),
    ]
}

pub fn catalog() -> Arc<StaticCatalog> {
    Arc::new(
        StaticCatalog::new()
            .with_table("oa_note", note_columns())
            .with_table("oa_task", task_columns()),
    )
}

pub fn note_descriptor() -> ModuleDescriptor {
    ModuleDescriptor::new("通知", "note", "oa_note", "noteController")
}

pub fn task_descriptor() -> ModuleDescriptor {
    ModuleDescriptor::new("任务", "task", "oa_task", "taskController")
}
