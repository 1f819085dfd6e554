use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::introspect::{MySqlIntrospector, SchemaIntrospector, StaticCatalog};

/// Column source: a JSON dump when given, else the configured MySQL database.
pub async fn introspector(columns: Option<&Path>) -> anyhow::Result<Arc<dyn SchemaIntrospector>> {
    match columns {
        Some(path) => Ok(Arc::new(StaticCatalog::from_json_file(path).await?)),
        None => Ok(Arc::new(MySqlIntrospector::new())),
    }
}

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": false,
                "error": message
            });
            println!("{response}");
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
}
