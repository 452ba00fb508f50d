//! Persistence contract for lists and items, plus an in-memory implementation.
//!
//! Handlers only ever talk to [`ListsRepository`]. Paging arguments are passed
//! through untouched; each implementation decides what a missing `skip` or
//! `batch_size` means.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{RepositoryError, RepositoryResult};
use crate::types::{TodoItem, TodoList};

/// Page size used when the caller does not supply one.
pub const DEFAULT_BATCH_SIZE: usize = 20;

#[async_trait]
pub trait ListsRepository: Send + Sync + 'static {
    async fn get_lists(
        &self,
        skip: Option<usize>,
        batch_size: Option<usize>,
    ) -> RepositoryResult<Vec<TodoList>>;

    async fn get_list(&self, list_id: Uuid) -> RepositoryResult<Option<TodoList>>;

    async fn add_list(&self, list: &TodoList) -> RepositoryResult<()>;

    /// Persists changes made to a list previously returned by [`get_list`](Self::get_list).
    async fn save_list(&self, list: &TodoList) -> RepositoryResult<()>;

    /// Removes the list and every item it owns.
    async fn delete_list(&self, list_id: Uuid) -> RepositoryResult<()>;

    async fn get_list_items(
        &self,
        list_id: Uuid,
        skip: Option<usize>,
        batch_size: Option<usize>,
    ) -> RepositoryResult<Vec<TodoItem>>;

    async fn get_list_item(
        &self,
        list_id: Uuid,
        item_id: Uuid,
    ) -> RepositoryResult<Option<TodoItem>>;

    async fn add_list_item(&self, item: &TodoItem) -> RepositoryResult<()>;

    /// Persists changes made to an item previously returned by
    /// [`get_list_item`](Self::get_list_item).
    async fn save_list_item(&self, item: &TodoItem) -> RepositoryResult<()>;

    async fn delete_list_item(&self, list_id: Uuid, item_id: Uuid) -> RepositoryResult<()>;

    async fn get_list_items_by_state(
        &self,
        list_id: Uuid,
        state: &str,
        skip: Option<usize>,
        batch_size: Option<usize>,
    ) -> RepositoryResult<Vec<TodoItem>>;
}

#[derive(Debug, Default)]
struct Store {
    lists: Vec<TodoList>,
    items: Vec<TodoItem>,
}

impl Store {
    fn has_list(&self, list_id: Uuid) -> bool {
        self.lists.iter().any(|list| list.id == list_id)
    }
}

/// Insertion-ordered store kept behind a single lock.
#[derive(Debug, Default)]
pub struct InMemoryListsRepository {
    store: RwLock<Store>,
}

impl InMemoryListsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page<'a, T: Clone + 'a>(
    records: impl Iterator<Item = &'a T>,
    skip: Option<usize>,
    batch_size: Option<usize>,
) -> Vec<T> {
    records
        .skip(skip.unwrap_or(0))
        .take(batch_size.unwrap_or(DEFAULT_BATCH_SIZE))
        .cloned()
        .collect()
}

#[async_trait]
impl ListsRepository for InMemoryListsRepository {
    async fn get_lists(
        &self,
        skip: Option<usize>,
        batch_size: Option<usize>,
    ) -> RepositoryResult<Vec<TodoList>> {
        let store = self.store.read().await;
        Ok(page(store.lists.iter(), skip, batch_size))
    }

    async fn get_list(&self, list_id: Uuid) -> RepositoryResult<Option<TodoList>> {
        let store = self.store.read().await;
        Ok(store.lists.iter().find(|list| list.id == list_id).cloned())
    }

    async fn add_list(&self, list: &TodoList) -> RepositoryResult<()> {
        self.store.write().await.lists.push(list.clone());
        debug!(list_id = %list.id, "List stored");
        Ok(())
    }

    async fn save_list(&self, list: &TodoList) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        let existing = store
            .lists
            .iter_mut()
            .find(|existing| existing.id == list.id)
            .ok_or(RepositoryError::ListMissing(list.id))?;
        *existing = list.clone();
        Ok(())
    }

    async fn delete_list(&self, list_id: Uuid) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        if !store.has_list(list_id) {
            return Err(RepositoryError::ListMissing(list_id));
        }
        store.lists.retain(|list| list.id != list_id);
        store.items.retain(|item| item.list_id != list_id);
        debug!(list_id = %list_id, "List and its items removed");
        Ok(())
    }

    async fn get_list_items(
        &self,
        list_id: Uuid,
        skip: Option<usize>,
        batch_size: Option<usize>,
    ) -> RepositoryResult<Vec<TodoItem>> {
        let store = self.store.read().await;
        let items = store.items.iter().filter(|item| item.list_id == list_id);
        Ok(page(items, skip, batch_size))
    }

    async fn get_list_item(
        &self,
        list_id: Uuid,
        item_id: Uuid,
    ) -> RepositoryResult<Option<TodoItem>> {
        let store = self.store.read().await;
        Ok(store
            .items
            .iter()
            .find(|item| item.list_id == list_id && item.id == item_id)
            .cloned())
    }

    async fn add_list_item(&self, item: &TodoItem) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        if !store.has_list(item.list_id) {
            return Err(RepositoryError::ListMissing(item.list_id));
        }
        store.items.push(item.clone());
        debug!(list_id = %item.list_id, item_id = %item.id, "Item stored");
        Ok(())
    }

    async fn save_list_item(&self, item: &TodoItem) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        let existing = store
            .items
            .iter_mut()
            .find(|existing| existing.list_id == item.list_id && existing.id == item.id)
            .ok_or(RepositoryError::ItemMissing {
                list_id: item.list_id,
                item_id: item.id,
            })?;
        *existing = item.clone();
        Ok(())
    }

    async fn delete_list_item(&self, list_id: Uuid, item_id: Uuid) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        let before = store.items.len();
        store
            .items
            .retain(|item| !(item.list_id == list_id && item.id == item_id));
        if store.items.len() == before {
            return Err(RepositoryError::ItemMissing { list_id, item_id });
        }
        Ok(())
    }

    async fn get_list_items_by_state(
        &self,
        list_id: Uuid,
        state: &str,
        skip: Option<usize>,
        batch_size: Option<usize>,
    ) -> RepositoryResult<Vec<TodoItem>> {
        let store = self.store.read().await;
        let items = store
            .items
            .iter()
            .filter(|item| item.list_id == list_id && item.state == state);
        Ok(page(items, skip, batch_size))
    }
}
