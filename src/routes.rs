use crate::config::Settings;
use crate::handlers::{
    create_list, create_list_item, delete_list, delete_list_item, get_list, get_list_item,
    get_list_items, get_list_items_by_state, get_lists, update_list, update_list_item,
};
use crate::observability::{health_handler, metrics_handler, track_requests, AppMetrics};
use crate::openapi::openapi_handler;
use crate::repository::ListsRepository;
use crate::version::get_app_version;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ListsRepository>,
    pub settings: Arc<Settings>,
    pub metrics: Arc<AppMetrics>,
}

impl AppState {
    pub fn new(repository: Arc<dyn ListsRepository>, settings: Settings) -> Self {
        Self {
            repository,
            settings: Arc::new(settings),
            metrics: Arc::new(AppMetrics::new()),
        }
    }
}

/// Routes for lists and their items, mounted under `/lists`.
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_lists).post(create_list))
        .route(
            "/{list_id}",
            get(get_list).put(update_list).delete(delete_list),
        )
        .route(
            "/{list_id}/items",
            get(get_list_items).post(create_list_item),
        )
        .route(
            "/{list_id}/items/{item_id}",
            get(get_list_item)
                .put(update_list_item)
                .delete(delete_list_item),
        )
        .route("/{list_id}/state/{state}", get(get_list_items_by_state))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/lists", todo_routes())
        .route("/lists/", get(get_lists).post(create_list))
        .route("/version", get(get_app_version))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api-docs/openapi.json", get(openapi_handler))
        .layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
