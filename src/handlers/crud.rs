// handlers/crud.rs - POST /api/crud handler
use std::sync::Arc;

use axum::extract::{rejection::JsonRejection, Extension, Json};
use tracing::info;

use crate::middleware::{ApiResponse, ApiResult};
use crate::scaffold::descriptor::{CreateModuleRequest, ModuleDescriptor};
use crate::services::{ScaffoldReport, ScaffoldService};

/// POST /api/crud - Generate a CRUD module from a table and mount its routes
pub async fn create(
    Extension(service): Extension<Arc<ScaffoldService>>,
    payload: Result<Json<CreateModuleRequest>, JsonRejection>,
) -> ApiResult<ScaffoldReport> {
    let Json(request) = payload?;
    let descriptor = ModuleDescriptor::try_from(request)?;

    info!("Scaffold requested for {} ({})", descriptor.module_key, descriptor.table_name);
    let report = service.scaffold(descriptor).await?;

    Ok(ApiResponse::success(report))
}
