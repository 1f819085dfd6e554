use std::collections::BTreeMap;

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

use super::error::ScaffoldError;

/// Inbound scaffold request as posted by the admin front-end. Fields are optional
/// here so that every missing field is reported at once.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateModuleRequest {
    #[serde(alias = "name")]
    pub display_name: Option<String>,
    #[serde(alias = "module")]
    pub module_key: Option<String>,
    #[serde(alias = "table")]
    pub table_name: Option<String>,
    #[serde(alias = "controller")]
    pub controller_name: Option<String>,
    #[serde(alias = "type")]
    pub kind: Option<i64>,
}

/// Validated description of one module to scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub display_name: String,
    pub module_key: String,
    pub table_name: String,
    pub controller_name: String,
    pub kind: u32,
}

impl ModuleDescriptor {
    pub fn new(
        display_name: impl Into<String>,
        module_key: impl Into<String>,
        table_name: impl Into<String>,
        controller_name: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            module_key: module_key.into(),
            table_name: table_name.into(),
            controller_name: controller_name.into(),
            kind: 0,
        }
    }

    /// Check every field; no I/O happens before this passes.
    pub fn validate(&self) -> Result<(), ScaffoldError> {
        let mut field_errors = BTreeMap::new();

        if self.display_name.trim().is_empty() {
            field_errors.insert("displayName".to_string(), "请输入中文菜单名称".to_string());
        }
        if self.table_name.trim().is_empty() {
            field_errors.insert("tableName".to_string(), "请输入表名".to_string());
        }
        if self.module_key.trim().is_empty() {
            field_errors.insert("moduleKey".to_string(), "请输入模块名称".to_string());
        } else if !is_identifier(&self.module_key) {
            field_errors.insert(
                "moduleKey".to_string(),
                "模块名称只能包含字母、数字和下划线, 且必须以字母开头".to_string(),
            );
        }
        if self.controller_name.trim().is_empty() {
            field_errors.insert("controllerName".to_string(), "请输入控制器名称".to_string());
        } else if !is_identifier(&self.controller_name) {
            field_errors.insert(
                "controllerName".to_string(),
                "控制器名称只能包含字母、数字和下划线, 且必须以字母开头".to_string(),
            );
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ScaffoldError::Validation {
                message: "参数校验失败".to_string(),
                field_errors,
            })
        }
    }

    /// `note` -> `Note`, `user_group` -> `UserGroup`.
    pub fn pascal_name(&self) -> String {
        self.module_key.to_case(Case::Pascal)
    }
}

impl TryFrom<CreateModuleRequest> for ModuleDescriptor {
    type Error = ScaffoldError;

    fn try_from(request: CreateModuleRequest) -> Result<Self, Self::Error> {
        let mut field_errors = BTreeMap::new();

        let kind = match request.kind {
            None => {
                field_errors.insert("kind".to_string(), "类型字段是必需的".to_string());
                0
            }
            Some(kind) => u32::try_from(kind).unwrap_or_else(|_| {
                field_errors.insert("kind".to_string(), "类型不能为负数".to_string());
                0
            }),
        };

        let descriptor = ModuleDescriptor {
            display_name: request.display_name.unwrap_or_default().trim().to_string(),
            module_key: request.module_key.unwrap_or_default().trim().to_string(),
            table_name: request.table_name.unwrap_or_default().trim().to_string(),
            controller_name: request.controller_name.unwrap_or_default().trim().to_string(),
            kind,
        };

        match descriptor.validate() {
            Ok(()) if field_errors.is_empty() => Ok(descriptor),
            Ok(()) => Err(ScaffoldError::Validation {
                message: "参数校验失败".to_string(),
                field_errors,
            }),
            Err(ScaffoldError::Validation { message, field_errors: mut errors }) => {
                errors.append(&mut field_errors);
                Err(ScaffoldError::Validation { message, field_errors: errors })
            }
            Err(other) => Err(other),
        }
    }
}

/// ASCII letter followed by letters, digits or underscores.
fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateModuleRequest {
        CreateModuleRequest {
            display_name: Some("通知".to_string()),
            module_key: Some("note".to_string()),
            table_name: Some("oa_note".to_string()),
            controller_name: Some("noteController".to_string()),
            kind: Some(0),
        }
    }

    fn field_errors(err: ScaffoldError) -> BTreeMap<String, String> {
        match err {
            ScaffoldError::Validation { field_errors, .. } => field_errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_complete_request() {
        let descriptor = ModuleDescriptor::try_from(request()).unwrap();
        assert_eq!(descriptor.module_key, "note");
        assert_eq!(descriptor.pascal_name(), "Note");
    }

    #[test]
    fn accepts_original_field_names() {
        let json = r#"{"name":"通知","module":"note","table":"oa_note","controller":"noteController","type":1}"#;
        let request: CreateModuleRequest = serde_json::from_str(json).unwrap();
        let descriptor = ModuleDescriptor::try_from(request).unwrap();
        assert_eq!(descriptor.table_name, "oa_note");
        assert_eq!(descriptor.kind, 1);
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = field_errors(ModuleDescriptor::try_from(CreateModuleRequest::default()).unwrap_err());
        let keys: Vec<_> = errors.keys().map(String::as_str).collect();
        assert_eq!(keys, ["controllerName", "displayName", "kind", "moduleKey", "tableName"]);
    }

    #[test]
    fn rejects_blank_table_and_negative_kind() {
        let mut req = request();
        req.table_name = Some("   ".to_string());
        req.kind = Some(-1);
        let errors = field_errors(ModuleDescriptor::try_from(req).unwrap_err());
        assert!(errors.contains_key("tableName"));
        assert!(errors.contains_key("kind"));
    }

    #[test]
    fn module_key_must_be_an_identifier() {
        for bad in ["1note", "note-list", "../note", "no te"] {
            let mut req = request();
            req.module_key = Some(bad.to_string());
            let errors = field_errors(ModuleDescriptor::try_from(req).unwrap_err());
            assert!(errors.contains_key("moduleKey"), "{bad}");
        }
    }

    #[test]
    fn pascal_name_joins_segments() {
        let descriptor = ModuleDescriptor::new("分组", "user_group", "oa_user_group", "userGroupController");
        assert_eq!(descriptor.pascal_name(), "UserGroup");
    }
}
