use crate::error::{AppError, AppResult};
use crate::repository::ListsRepository;
use crate::routes::AppState;
use crate::types::{CreateUpdateTodoItem, CreateUpdateTodoList, Pagination, TodoItem, TodoList};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

async fn require_list(repository: &dyn ListsRepository, list_id: Uuid) -> AppResult<TodoList> {
    repository.get_list(list_id).await?.ok_or(AppError::NotFound)
}

async fn require_item(
    repository: &dyn ListsRepository,
    list_id: Uuid,
    item_id: Uuid,
) -> AppResult<TodoItem> {
    repository
        .get_list_item(list_id, item_id)
        .await?
        .ok_or(AppError::NotFound)
}

#[utoipa::path(
    get,
    path = "/lists",
    params(Pagination),
    responses(
        (status = 200, description = "Page of todo lists", body = [TodoList])
    ),
    tag = "Lists"
)]
pub async fn get_lists(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<TodoList>>> {
    let lists = state
        .repository
        .get_lists(page.skip, page.batch_size)
        .await?;
    Ok(Json(lists))
}

#[utoipa::path(
    post,
    path = "/lists",
    request_body = CreateUpdateTodoList,
    responses(
        (status = 201, description = "List created", body = TodoList)
    ),
    tag = "Lists"
)]
pub async fn create_list(
    State(state): State<AppState>,
    Json(input): Json<CreateUpdateTodoList>,
) -> AppResult<impl IntoResponse> {
    let mut list = TodoList::new(input.name);
    list.description = input.description;

    state.repository.add_list(&list).await?;
    info!("Created list: id={}", list.id);

    let location = format!("/lists/{}", list.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(list)))
}

#[utoipa::path(
    get,
    path = "/lists/{listId}",
    params(("listId" = Uuid, Path, description = "List identifier")),
    responses(
        (status = 200, description = "The list", body = TodoList),
        (status = 404, description = "List not found")
    ),
    tag = "Lists"
)]
pub async fn get_list(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
) -> AppResult<Json<TodoList>> {
    let list = require_list(state.repository.as_ref(), list_id).await?;
    Ok(Json(list))
}

#[utoipa::path(
    put,
    path = "/lists/{listId}",
    params(("listId" = Uuid, Path, description = "List identifier")),
    request_body = CreateUpdateTodoList,
    responses(
        (status = 200, description = "List updated", body = TodoList),
        (status = 404, description = "List not found")
    ),
    tag = "Lists"
)]
pub async fn update_list(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
    Json(input): Json<CreateUpdateTodoList>,
) -> AppResult<Json<TodoList>> {
    let mut list = require_list(state.repository.as_ref(), list_id).await?;

    list.name = input.name;
    list.description = input.description;
    list.updated_date = Some(Utc::now());

    state.repository.save_list(&list).await?;
    info!("Updated list: id={}", list.id);

    Ok(Json(list))
}

#[utoipa::path(
    delete,
    path = "/lists/{listId}",
    params(("listId" = Uuid, Path, description = "List identifier")),
    responses(
        (status = 204, description = "List deleted"),
        (status = 404, description = "List not found")
    ),
    tag = "Lists"
)]
pub async fn delete_list(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_list(state.repository.as_ref(), list_id).await?;

    state.repository.delete_list(list_id).await?;
    info!("Deleted list: id={}", list_id);

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/lists/{listId}/items",
    params(
        ("listId" = Uuid, Path, description = "List identifier"),
        Pagination
    ),
    responses(
        (status = 200, description = "Page of items", body = [TodoItem]),
        (status = 404, description = "List not found")
    ),
    tag = "Items"
)]
pub async fn get_list_items(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<TodoItem>>> {
    require_list(state.repository.as_ref(), list_id).await?;

    let items = state
        .repository
        .get_list_items(list_id, page.skip, page.batch_size)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/lists/{listId}/items",
    params(("listId" = Uuid, Path, description = "List identifier")),
    request_body = CreateUpdateTodoItem,
    responses(
        (status = 201, description = "Item created", body = TodoItem),
        (status = 404, description = "List not found")
    ),
    tag = "Items"
)]
pub async fn create_list_item(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
    Json(input): Json<CreateUpdateTodoItem>,
) -> AppResult<impl IntoResponse> {
    require_list(state.repository.as_ref(), list_id).await?;

    let mut item = TodoItem::new(list_id, input.name);
    item.description = input.description;
    item.state = input.state;

    state.repository.add_list_item(&item).await?;
    info!("Created item: list_id={}, id={}", list_id, item.id);

    let location = format!("/lists/{}/items/{}", list_id, item.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
}

#[utoipa::path(
    get,
    path = "/lists/{listId}/items/{itemId}",
    params(
        ("listId" = Uuid, Path, description = "List identifier"),
        ("itemId" = Uuid, Path, description = "Item identifier")
    ),
    responses(
        (status = 200, description = "The item", body = TodoItem),
        (status = 404, description = "List or item not found")
    ),
    tag = "Items"
)]
pub async fn get_list_item(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<TodoItem>> {
    require_list(state.repository.as_ref(), list_id).await?;

    let item = require_item(state.repository.as_ref(), list_id, item_id).await?;
    Ok(Json(item))
}

#[utoipa::path(
    put,
    path = "/lists/{listId}/items/{itemId}",
    params(
        ("listId" = Uuid, Path, description = "List identifier"),
        ("itemId" = Uuid, Path, description = "Item identifier")
    ),
    request_body = CreateUpdateTodoItem,
    responses(
        (status = 200, description = "Item updated", body = TodoItem),
        (status = 404, description = "Item not found")
    ),
    tag = "Items"
)]
pub async fn update_list_item(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<CreateUpdateTodoItem>,
) -> AppResult<Json<TodoItem>> {
    // Only the item lookup gates this route; the parent list is not re-read.
    let mut item = require_item(state.repository.as_ref(), list_id, item_id).await?;

    item.name = input.name;
    item.description = input.description;
    item.completed_date = input.completed_date;
    item.due_date = input.due_date;
    item.state = input.state;
    item.updated_date = Some(Utc::now());

    state.repository.save_list_item(&item).await?;
    info!("Updated item: list_id={}, id={}", list_id, item_id);

    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/lists/{listId}/items/{itemId}",
    params(
        ("listId" = Uuid, Path, description = "List identifier"),
        ("itemId" = Uuid, Path, description = "Item identifier")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found")
    ),
    tag = "Items"
)]
pub async fn delete_list_item(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    require_item(state.repository.as_ref(), list_id, item_id).await?;

    state.repository.delete_list_item(list_id, item_id).await?;
    info!("Deleted item: list_id={}, id={}", list_id, item_id);

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/lists/{listId}/state/{state}",
    params(
        ("listId" = Uuid, Path, description = "List identifier"),
        ("state" = String, Path, description = "Item state to match"),
        Pagination
    ),
    responses(
        (status = 200, description = "Page of items in the given state", body = [TodoItem]),
        (status = 404, description = "List not found")
    ),
    tag = "Items"
)]
pub async fn get_list_items_by_state(
    State(state): State<AppState>,
    Path((list_id, item_state)): Path<(Uuid, String)>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<TodoItem>>> {
    require_list(state.repository.as_ref(), list_id).await?;

    let items = state
        .repository
        .get_list_items_by_state(list_id, &item_state, page.skip, page.batch_size)
        .await?;
    Ok(Json(items))
}
