use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with every DRS endpoint mounted under `api_path`.
pub fn build_router(state: AppState) -> Router {
    let api_path = state.registry.config().service.api_path.trim_matches('/').to_string();

    let api = Router::new()
        .route("/objects", post(handler::post_object))
        .route(
            "/objects/:object_id",
            get(handler::get_object)
                .put(handler::put_object)
                .delete(handler::delete_object),
        )
        .route(
            "/objects/:object_id/access",
            post(handler::post_access_method),
        )
        .route(
            "/objects/:object_id/access/:access_id",
            get(handler::get_access_url)
                .put(handler::put_access_method)
                .delete(handler::delete_access_method),
        )
        .route(
            "/service-info",
            get(handler::get_service_info).post(handler::post_service_info),
        );

    let app = if api_path.is_empty() {
        api
    } else {
        Router::new().nest(&format!("/{api_path}"), api)
    };

    app.route("/health", get(handler::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
