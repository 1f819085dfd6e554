mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use oa_api_rust::app::app;

fn router(ws: &common::Workspace) -> Router {
    app(Arc::new(ws.service(common::catalog())))
}

async fn send(router: Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

fn post_crud(body: impl Into<Body>) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri("/api/crud")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())?)
}

#[tokio::test]
async fn create_accepts_form_field_names() -> Result<()> {
    let ws = common::Workspace::new().await?;
    let body = json!({
        "name": "通知",
        "module": "note",
        "table": "oa_note",
        "controller": "noteController",
        "type": 0
    });

    let (status, json) = send(router(&ws), post_crud(body.to_string())?).await?;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["moduleKey"], "note");
    assert_eq!(json["data"]["registryPatched"], true);
    assert_eq!(json["data"]["fieldCount"], 4);
    assert_eq!(json["data"]["generatedPaths"].as_array().map(Vec::len), Some(16));

    assert!(ws.live("controllers/noteController.ts").is_file());
    Ok(())
}

#[tokio::test]
async fn create_reports_every_missing_field() -> Result<()> {
    let ws = common::Workspace::new().await?;
    let body = json!({ "module": "note" });

    let (status, json) = send(router(&ws), post_crud(body.to_string())?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    for field in ["displayName", "tableName", "controllerName", "kind"] {
        assert!(json["field_errors"][field].is_string(), "{field}: {json}");
    }
    assert!(json["field_errors"]["moduleKey"].is_null());
    assert!(!ws.settings.output_root.exists());
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_invalid_json() -> Result<()> {
    let ws = common::Workspace::new().await?;
    let (status, json) = send(router(&ws), post_crud("{\"module\": ")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn unknown_table_is_unprocessable() -> Result<()> {
    let ws = common::Workspace::new().await?;
    let body = json!({
        "displayName": "会议",
        "moduleKey": "meeting",
        "tableName": "oa_meeting",
        "controllerName": "meetingController",
        "kind": 0
    });

    let (status, json) = send(router(&ws), post_crud(body.to_string())?).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "UNPROCESSABLE_ENTITY");
    assert!(json["message"].as_str().unwrap_or_default().contains("oa_meeting"));
    assert_eq!(ws.registry().await?, common::REGISTRY_SOURCE);
    Ok(())
}

#[tokio::test]
async fn root_lists_the_generator_endpoint() -> Result<()> {
    let ws = common::Workspace::new().await?;
    let request = Request::builder().uri("/").body(Body::empty())?;

    let (status, json) = send(router(&ws), request).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"]["endpoints"]["crud"].as_str().unwrap_or_default().starts_with("POST /api/crud"));
    Ok(())
}
