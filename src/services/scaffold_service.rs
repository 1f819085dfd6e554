use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ScaffoldConfig;
use crate::database::introspect::SchemaIntrospector;
use crate::scaffold::classify::Field;
use crate::scaffold::descriptor::ModuleDescriptor;
use crate::scaffold::error::ScaffoldError;
use crate::scaffold::registry::RouteRegistryPatcher;
use crate::scaffold::render::{self, GeneratedArtifact, ModuleModel};
use crate::scaffold::template::{TemplateRenderer, TemplateStore};

/// Result of a successful scaffold run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldReport {
    pub table_name: String,
    pub module_key: String,
    pub controller_name: String,
    /// Every file written, staging copies first, then live source copies.
    pub generated_paths: Vec<PathBuf>,
    /// Columns returned by the catalog, primary key and hidden columns included.
    pub field_count: usize,
    /// Columns that made it into the generated UI and validators.
    pub surfaced_field_count: usize,
    pub registry_patched: bool,
}

/// Classified view of a table, without generating anything.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescription {
    pub table_name: String,
    pub primary_key: String,
    pub column_count: usize,
    pub fields: Vec<Field>,
}

/// Generates CRUD modules from table metadata.
pub struct ScaffoldService {
    introspector: Arc<dyn SchemaIntrospector>,
    renderer: TemplateRenderer,
    output_root: PathBuf,
    source_root: PathBuf,
    hidden_columns: Vec<String>,
    patcher: RouteRegistryPatcher,
}

impl ScaffoldService {
    pub fn new(introspector: Arc<dyn SchemaIntrospector>, settings: &ScaffoldConfig) -> Self {
        let store = match &settings.template_dir {
            Some(dir) => TemplateStore::Directory(dir.clone()),
            None => TemplateStore::Builtin,
        };

        let mut patcher = RouteRegistryPatcher::new(&settings.registry_file);
        if let Some(manifest) = &settings.route_manifest {
            patcher = patcher.with_manifest(manifest);
        }

        Self {
            introspector,
            renderer: TemplateRenderer::new(store),
            output_root: settings.output_root.clone(),
            source_root: settings.source_root.clone(),
            hidden_columns: settings.hidden_columns.clone(),
            patcher,
        }
    }

    /// Service wired to the process configuration.
    pub fn from_config(introspector: Arc<dyn SchemaIntrospector>) -> Self {
        Self::new(introspector, &crate::config::config().scaffold)
    }

    /// Introspect and classify `table` without writing anything.
    pub async fn describe(&self, table: &str) -> Result<TableDescription, ScaffoldError> {
        let columns = self.introspector.columns(table).await?;
        let column_count = columns.len();

        let descriptor = ModuleDescriptor::new(table, table, table, table);
        let model = ModuleModel::build(descriptor, columns, &self.hidden_columns)?;

        Ok(TableDescription {
            table_name: table.trim().to_string(),
            primary_key: model.primary_key,
            column_count,
            fields: model.fields,
        })
    }

    /// Generate every artifact for `descriptor`, install the backend copies and mount
    /// the router.
    ///
    /// Writes are not rolled back. A failure after the first write returns
    /// [`ScaffoldError::WriteFailure`] listing what is already on disk; running the
    /// same scaffold again overwrites the files and leaves the registry untouched.
    pub async fn scaffold(&self, descriptor: ModuleDescriptor) -> Result<ScaffoldReport, ScaffoldError> {
        descriptor.validate()?;

        let columns = self.introspector.columns(&descriptor.table_name).await?;
        let field_count = columns.len();

        let model = ModuleModel::build(descriptor, columns, &self.hidden_columns)?;
        info!(
            "Scaffolding {} from {} ({} of {} columns surfaced)",
            model.module(),
            model.descriptor.table_name,
            model.fields.len(),
            field_count
        );

        let artifacts = render::render_all(&self.renderer, &model).await?;
        debug!("Rendered {} artifacts", artifacts.len());

        let installs = self.install_plan(&model.descriptor, &artifacts);
        self.create_directories(&artifacts, &installs).await?;

        let mut written = Vec::with_capacity(artifacts.len() + installs.len());
        self.write_artifacts(&artifacts, &mut written).await?;
        self.copy_backend_artifacts(&installs, &mut written).await?;

        let outcome = self
            .patcher
            .patch(model.module())
            .await
            .map_err(|e| e.with_written(&written))?;

        let descriptor = model.descriptor;
        Ok(ScaffoldReport {
            table_name: descriptor.table_name,
            module_key: descriptor.module_key,
            controller_name: descriptor.controller_name,
            generated_paths: written,
            field_count,
            surfaced_field_count: model.fields.len(),
            registry_patched: outcome.registry_patched,
        })
    }

    fn staging_target(&self, artifact: &GeneratedArtifact) -> PathBuf {
        self.output_root.join(&artifact.relative_path)
    }

    /// (staging copy, live source path) for every backend artifact.
    fn install_plan(&self, descriptor: &ModuleDescriptor, artifacts: &[GeneratedArtifact]) -> Vec<(PathBuf, PathBuf)> {
        artifacts
            .iter()
            .filter_map(|artifact| {
                let live = artifact.kind.source_path(descriptor)?;
                Some((self.staging_target(artifact), self.source_root.join(live)))
            })
            .collect()
    }

    async fn create_directories(
        &self,
        artifacts: &[GeneratedArtifact],
        installs: &[(PathBuf, PathBuf)],
    ) -> Result<(), ScaffoldError> {
        let targets = artifacts
            .iter()
            .map(|a| self.staging_target(a))
            .chain(installs.iter().map(|(_, live)| live.clone()));

        let dirs: BTreeSet<PathBuf> = targets
            .filter_map(|path| path.parent().map(Path::to_path_buf))
            .collect();

        for dir in dirs {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| ScaffoldError::write_failure(&dir, e))?;
        }
        Ok(())
    }

    async fn write_artifacts(
        &self,
        artifacts: &[GeneratedArtifact],
        written: &mut Vec<PathBuf>,
    ) -> Result<(), ScaffoldError> {
        for artifact in artifacts {
            let path = self.staging_target(artifact);
            if let Err(e) = tokio::fs::write(&path, &artifact.content).await {
                warn!("Stopping after {} written files: {}", written.len(), e);
                return Err(ScaffoldError::write_failure(&path, e).with_written(written));
            }
            debug!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(())
    }

    async fn copy_backend_artifacts(
        &self,
        installs: &[(PathBuf, PathBuf)],
        written: &mut Vec<PathBuf>,
    ) -> Result<(), ScaffoldError> {
        for (staging, live) in installs {
            if let Err(e) = tokio::fs::copy(staging, live).await {
                warn!("Stopping after {} written files: {}", written.len(), e);
                return Err(ScaffoldError::write_failure(live, e).with_written(written));
            }
            debug!("Installed {}", live.display());
            written.push(live.clone());
        }
        Ok(())
    }
}
