use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use drs_types::{AccessMethod, AccessUrl, DrsObject, ServiceInfo};

use crate::auth::{require, Action};
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ServerResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))
}

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---- Objects ----

pub async fn get_object(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
) -> ServerResult<Json<DrsObject>> {
    Ok(Json(state.registry.get_object(&object_id)?))
}

pub async fn post_object(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<DrsObject>, JsonRejection>,
) -> ServerResult<Json<String>> {
    require(state.auth.as_ref(), &headers, Action::Write).await?;
    let data = body(payload)?;
    Ok(Json(state.registry.register_object(data, None)?.id))
}

pub async fn put_object(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<DrsObject>, JsonRejection>,
) -> ServerResult<Json<String>> {
    require(state.auth.as_ref(), &headers, Action::Write).await?;
    let data = body(payload)?;
    Ok(Json(state.registry.register_object(data, Some(&object_id))?.id))
}

pub async fn delete_object(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
    headers: HeaderMap,
) -> ServerResult<Json<String>> {
    require(state.auth.as_ref(), &headers, Action::Write).await?;
    Ok(Json(state.registry.delete_object(&object_id)?))
}

// ---- Access methods ----

pub async fn get_access_url(
    State(state): State<AppState>,
    Path((object_id, access_id)): Path<(String, String)>,
) -> ServerResult<Json<AccessUrl>> {
    Ok(Json(state.registry.get_access_url(&object_id, &access_id)?))
}

pub async fn post_access_method(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<AccessMethod>, JsonRejection>,
) -> ServerResult<Json<String>> {
    require(state.auth.as_ref(), &headers, Action::Write).await?;
    let data = body(payload)?;
    let registered = state.registry.register_access_method(data, &object_id, None)?;
    Ok(Json(registered.id))
}

pub async fn put_access_method(
    State(state): State<AppState>,
    Path((object_id, access_id)): Path<(String, String)>,
    headers: HeaderMap,
    payload: Result<Json<AccessMethod>, JsonRejection>,
) -> ServerResult<Json<String>> {
    require(state.auth.as_ref(), &headers, Action::Write).await?;
    let data = body(payload)?;
    let registered = state
        .registry
        .register_access_method(data, &object_id, Some(&access_id))?;
    Ok(Json(registered.id))
}

pub async fn delete_access_method(
    State(state): State<AppState>,
    Path((object_id, access_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ServerResult<Json<String>> {
    require(state.auth.as_ref(), &headers, Action::Write).await?;
    Ok(Json(state.registry.delete_access_method(&object_id, &access_id)?))
}

// ---- Service info ----

pub async fn get_service_info(State(state): State<AppState>) -> ServerResult<Json<ServiceInfo>> {
    Ok(Json(state.registry.service_info()?))
}

/// Replace the service-info document. Answers 201 with its location.
pub async fn post_service_info(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ServiceInfo>, JsonRejection>,
) -> ServerResult<Response> {
    require(state.auth.as_ref(), &headers, Action::ManageServiceInfo).await?;
    let info = body(payload)?;
    let location = state.registry.set_service_info(&info)?;
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(json!({}))).into_response())
}
