//! Mounting generated routers.
//!
//! Two mechanisms run side by side: a line-oriented patch of the hand-written router
//! aggregation file, and an append to a declarative JSON manifest of module routes.
//! Both are read-modify-write cycles on shared files, so they run inside one
//! process-wide critical section.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::error::ScaffoldError;

static REGISTRY_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("no `export default` statement to mount routes before")]
    MissingDefaultExport,

    #[error("routes already imported by a different statement: {0}")]
    ConflictingImport(String),
}

pub fn import_line(module_key: &str) -> String {
    format!("import {module_key}Routes from \"./{module_key}.ts\";")
}

pub fn registration_lines(module_key: &str) -> [String; 2] {
    [
        format!("router.use({module_key}Routes.routes());"),
        format!("router.use({module_key}Routes.allowedMethods());"),
    ]
}

/// Import lines that bind `<module>Routes` or load `./<module>` / `./<module>.ts`,
/// whatever their quoting.
fn module_import_pattern(module_key: &str) -> Option<Regex> {
    let key = regex::escape(module_key);
    Regex::new(&format!(
        r#"^\s*import\b(?:.*\b{key}Routes\b|.*\bfrom\s*["']\./{key}(?:\.ts)?["'])"#
    ))
    .ok()
}

/// Patched registry text, or `None` when the module's import is already present.
///
/// The import goes after the last line starting with `import ` (after the first line
/// when there is none). A blank line and the two registrations go right before the
/// `export default` line. Every other line is kept byte for byte, CRLF included.
///
/// Any other import of the module's router (other quotes, no extension, another
/// path) is a conflict: the file is left alone so the router is never bound or
/// mounted twice.
pub fn patch_source(source: &str, module_key: &str) -> Result<Option<String>, PatchError> {
    let import = import_line(module_key);
    if source.lines().any(|line| line.trim() == import) {
        return Ok(None);
    }

    if let Some(pattern) = module_import_pattern(module_key) {
        if let Some(existing) = source.lines().find(|line| pattern.is_match(line)) {
            return Err(PatchError::ConflictingImport(existing.trim().to_string()));
        }
    }

    let eol = if source.contains("\r\n") { "\r" } else { "" };
    let mut lines: Vec<String> = source.split('\n').map(str::to_string).collect();

    let import_at = lines
        .iter()
        .rposition(|line| line.trim_start().starts_with("import "))
        .map(|i| i + 1)
        .unwrap_or_else(|| 1.min(lines.len()));
    lines.insert(import_at, format!("{import}{eol}"));

    let export_at = lines
        .iter()
        .position(|line| line.trim_start().starts_with("export default"))
        .ok_or(PatchError::MissingDefaultExport)?;
    let [routes, methods] = registration_lines(module_key);
    lines.splice(
        export_at..export_at,
        [eol.to_string(), format!("{routes}{eol}"), format!("{methods}{eol}")],
    );

    Ok(Some(lines.join("\n")))
}

/// One record of the declarative route manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    pub module_key: String,
    pub import_path: String,
    pub prefix: String,
}

impl RouteRecord {
    pub fn for_module(module_key: &str) -> Self {
        Self {
            module_key: module_key.to_string(),
            import_path: format!("./{module_key}.ts"),
            prefix: format!("/api/{module_key}"),
        }
    }
}

/// Append `record` unless its module key is already listed. Returns the new manifest
/// text, or `None` when nothing changes.
pub fn append_record(manifest: Option<&str>, record: RouteRecord) -> Result<Option<String>, serde_json::Error> {
    let mut records: Vec<RouteRecord> = match manifest.map(str::trim) {
        Some(text) if !text.is_empty() => serde_json::from_str(text)?,
        _ => Vec::new(),
    };

    if records.iter().any(|r| r.module_key == record.module_key) {
        return Ok(None);
    }

    records.push(record);
    let mut text = serde_json::to_string_pretty(&records)?;
    text.push('\n');
    Ok(Some(text))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchOutcome {
    /// The registry file was rewritten.
    pub registry_patched: bool,
    /// A manifest record was appended.
    pub manifest_updated: bool,
}

#[derive(Debug, Clone)]
pub struct RouteRegistryPatcher {
    registry_file: PathBuf,
    manifest_file: Option<PathBuf>,
}

impl RouteRegistryPatcher {
    pub fn new(registry_file: impl Into<PathBuf>) -> Self {
        Self {
            registry_file: registry_file.into(),
            manifest_file: None,
        }
    }

    pub fn with_manifest(mut self, manifest_file: impl Into<PathBuf>) -> Self {
        self.manifest_file = Some(manifest_file.into());
        self
    }

    /// Mount `module_key`. Re-reads both files on every call, so re-running after a
    /// failure starts from what is actually on disk.
    pub async fn patch(&self, module_key: &str) -> Result<PatchOutcome, ScaffoldError> {
        let _guard = REGISTRY_LOCK.lock().await;

        let registry_patched = self.patch_registry(module_key).await?;
        let manifest_updated = match &self.manifest_file {
            Some(path) => self.append_manifest(path, module_key).await?,
            None => false,
        };

        Ok(PatchOutcome { registry_patched, manifest_updated })
    }

    async fn patch_registry(&self, module_key: &str) -> Result<bool, ScaffoldError> {
        let path = &self.registry_file;
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ScaffoldError::write_failure(path, e))?;

        match patch_source(&source, module_key).map_err(|e| ScaffoldError::write_failure(path, e))? {
            None => {
                debug!("Route registry already imports {}", module_key);
                Ok(false)
            }
            Some(patched) => {
                tokio::fs::write(path, patched)
                    .await
                    .map_err(|e| ScaffoldError::write_failure(path, e))?;
                info!("Mounted {} routes in {}", module_key, path.display());
                Ok(true)
            }
        }
    }

    async fn append_manifest(&self, path: &Path, module_key: &str) -> Result<bool, ScaffoldError> {
        let existing = match tokio::fs::read_to_string(path).await {
            Ok(text) => Some(text),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(ScaffoldError::write_failure(path, e)),
        };

        let updated = append_record(existing.as_deref(), RouteRecord::for_module(module_key))
            .map_err(|e| ScaffoldError::write_failure(path, e))?;

        match updated {
            None => Ok(false),
            Some(text) => {
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| ScaffoldError::write_failure(path, e))?;
                }
                tokio::fs::write(path, text)
                    .await
                    .map_err(|e| ScaffoldError::write_failure(path, e))?;
                info!("Recorded {} in route manifest {}", module_key, path.display());
                Ok(true)
            }
        }
    }
}
