use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    /// List identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// When the list was created
    pub created_date: DateTime<Utc>,
    /// When the list was last updated, if ever
    pub updated_date: Option<DateTime<Utc>>,
}

impl TodoList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            created_date: Utc::now(),
            updated_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Item identifier
    pub id: Uuid,
    /// Identifier of the owning list
    pub list_id: Uuid,
    /// Display name
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Lifecycle state, e.g. "todo", "inprogress" or "done"
    pub state: String,
    /// When the item is due
    pub due_date: Option<DateTime<Utc>>,
    /// When the item was completed
    pub completed_date: Option<DateTime<Utc>>,
    /// When the item was created
    pub created_date: DateTime<Utc>,
    /// When the item was last updated, if ever
    pub updated_date: Option<DateTime<Utc>>,
}

impl TodoItem {
    pub fn new(list_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            list_id,
            name: name.into(),
            description: None,
            state: DEFAULT_ITEM_STATE.to_string(),
            due_date: None,
            completed_date: None,
            created_date: Utc::now(),
            updated_date: None,
        }
    }
}

/// State given to items built with [`TodoItem::new`].
pub const DEFAULT_ITEM_STATE: &str = "todo";

/// Request body for creating or replacing a list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUpdateTodoList {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for creating or replacing an item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateTodoItem {
    pub name: String,
    pub state: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppVersion {
    /// Version tag, e.g. "v1.0.0"
    pub value: String,
}

/// Paging window passed straight through to the repository.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Number of records to skip
    pub skip: Option<usize>,
    /// Maximum number of records to return
    pub batch_size: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_item_serializes_camel_case() {
        let item = TodoItem::new(Uuid::nil(), "Buy milk");
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["listId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["state"], "todo");
        assert!(json.get("createdDate").is_some());
        assert!(json["dueDate"].is_null());
    }

    #[test]
    fn create_update_item_accepts_lowercase_fields() {
        let input: CreateUpdateTodoItem = serde_json::from_str(
            r#"{"name":"Walk dog","state":"done","dueDate":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(input.name, "Walk dog");
        assert_eq!(input.state, "done");
        assert!(input.due_date.is_some());
        assert!(input.completed_date.is_none());
        assert!(input.description.is_none());
    }

    #[test]
    fn create_update_list_requires_name() {
        let result: Result<CreateUpdateTodoList, _> =
            serde_json::from_str(r#"{"description":"no name"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn pagination_reads_batch_size() {
        let page: Pagination = serde_json::from_str(r#"{"skip":5,"batchSize":10}"#).unwrap();
        assert_eq!(page.skip, Some(5));
        assert_eq!(page.batch_size, Some(10));
    }
}
