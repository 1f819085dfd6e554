//! Template skeleton loading and placeholder substitution.
//!
//! Placeholders are `{{UPPER_SNAKE}}` tokens. Substitution is a single left-to-right
//! pass over the skeleton, so generated fragments are never rescanned and the result
//! does not depend on the order substitutions were registered in. Any token without
//! a substitution is reported as a generator defect instead of leaking into output.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;

use super::error::ScaffoldError;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Z][A-Z0-9_]*)\}\}").expect("valid placeholder regex"));

/// Skeletons compiled into the binary, keyed by template name.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("api/types.ts.tpl", include_str!("../../templates/crud/api/types.ts.tpl")),
    ("api/validator.ts.tpl", include_str!("../../templates/crud/api/validator.ts.tpl")),
    ("api/service.ts.tpl", include_str!("../../templates/crud/api/service.ts.tpl")),
    ("api/controller.ts.tpl", include_str!("../../templates/crud/api/controller.ts.tpl")),
    ("api/router.ts.tpl", include_str!("../../templates/crud/api/router.ts.tpl")),
    ("front/index.vue.tpl", include_str!("../../templates/crud/front/index.vue.tpl")),
    ("front/dialog.vue.tpl", include_str!("../../templates/crud/front/dialog.vue.tpl")),
    ("front/locale.ts.tpl", include_str!("../../templates/crud/front/locale.ts.tpl")),
    ("front/route.ts.tpl", include_str!("../../templates/crud/front/route.ts.tpl")),
];

/// Where template bodies come from.
#[derive(Debug, Clone)]
pub enum TemplateStore {
    Builtin,
    /// `<dir>/<template name>`; a file missing from the directory is an error,
    /// there is no fallback to the built-in body.
    Directory(PathBuf),
}

impl TemplateStore {
    pub fn names() -> impl Iterator<Item = &'static str> {
        BUILTIN_TEMPLATES.iter().map(|(name, _)| *name)
    }

    pub async fn load(&self, name: &str) -> Result<String, ScaffoldError> {
        match self {
            TemplateStore::Builtin => BUILTIN_TEMPLATES
                .iter()
                .find(|(builtin, _)| *builtin == name)
                .map(|(_, body)| body.to_string())
                .ok_or_else(|| ScaffoldError::TemplateNotFound(name.to_string())),
            TemplateStore::Directory(dir) => {
                let path = dir.join(name);
                tokio::fs::read_to_string(&path).await.map_err(|e| {
                    if e.kind() != ErrorKind::NotFound {
                        warn!("Cannot read template {}: {}", path.display(), e);
                    }
                    ScaffoldError::TemplateNotFound(path.display().to_string())
                })
            }
        }
    }
}

/// Token -> generated fragment.
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    values: BTreeMap<&'static str, String>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, token: &'static str, value: impl Into<String>) -> &mut Self {
        self.values.insert(token, value.into());
        self
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    store: TemplateStore,
}

impl TemplateRenderer {
    pub fn new(store: TemplateStore) -> Self {
        Self { store }
    }

    pub fn builtin() -> Self {
        Self::new(TemplateStore::Builtin)
    }

    /// Load `template` and fill it.
    pub async fn render(&self, template: &str, substitutions: &Substitutions) -> Result<String, ScaffoldError> {
        let body = self.store.load(template).await?;
        fill(template, &body, substitutions)
    }
}

/// Replace every placeholder in `body`. Fails listing the unresolved tokens.
pub fn fill(template: &str, body: &str, substitutions: &Substitutions) -> Result<String, ScaffoldError> {
    let mut unresolved: Vec<String> = Vec::new();

    let output = PLACEHOLDER.replace_all(body, |caps: &Captures| match substitutions.get(&caps[1]) {
        Some(value) => value.to_string(),
        None => {
            if !unresolved.iter().any(|t| t == &caps[1]) {
                unresolved.push(caps[1].to_string());
            }
            caps[0].to_string()
        }
    });

    if unresolved.is_empty() {
        Ok(output.into_owned())
    } else {
        Err(ScaffoldError::UnresolvedPlaceholder {
            template: template.to_string(),
            tokens: unresolved,
        })
    }
}

/// Placeholder tokens still present in `text`.
pub fn leftover_placeholders(text: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}
