use axum::response::Json;
use utoipa::OpenApi;

use crate::types::{AppVersion, CreateUpdateTodoItem, CreateUpdateTodoList, TodoItem, TodoList};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_lists,
        crate::handlers::create_list,
        crate::handlers::get_list,
        crate::handlers::update_list,
        crate::handlers::delete_list,
        crate::handlers::get_list_items,
        crate::handlers::create_list_item,
        crate::handlers::get_list_item,
        crate::handlers::update_list_item,
        crate::handlers::delete_list_item,
        crate::handlers::get_list_items_by_state,
        crate::version::get_app_version
    ),
    components(schemas(
        TodoList,
        TodoItem,
        CreateUpdateTodoList,
        CreateUpdateTodoItem,
        AppVersion
    )),
    tags(
        (name = "Lists", description = "Todo list endpoints"),
        (name = "Items", description = "Todo item endpoints"),
        (name = "Version", description = "Application version")
    ),
    info(
        title = "Todo Lists API",
        description = "API for managing todo lists and their items",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/lists",
            "/lists/{listId}",
            "/lists/{listId}/items",
            "/lists/{listId}/items/{itemId}",
            "/lists/{listId}/state/{state}",
            "/version",
        ] {
            assert!(paths.contains(&expected), "missing path {expected}");
        }
    }
}
