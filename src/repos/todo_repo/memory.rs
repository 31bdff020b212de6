/*
 * Responsibility
 * - プロセス内の TodoRepo 実装 (STORE=memory / tests)
 * - 1 call = 1 write lock なので各操作は atomic
 */
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::repos::error::RepoResult;
use crate::repos::todo_repo::{NewTodo, TodoRepo, TodoRow};
use crate::services::auth::Identity;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, TodoRow>,
}

impl Inner {
    fn owned_mut(&mut self, owner: &Identity, todo_id: i64) -> Option<&mut TodoRow> {
        self.rows
            .get_mut(&todo_id)
            .filter(|row| row.owner == owner.as_str())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryTodoRepo {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryTodoRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of rows across every owner.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TodoRepo for MemoryTodoRepo {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, owner: &Identity, new: NewTodo) -> RepoResult<TodoRow> {
        let mut inner = self.inner.write().await;

        inner.next_id += 1;
        let todo_id = inner.next_id;
        let now = Utc::now();

        let row = TodoRow {
            todo_id,
            task: new.task,
            done: false,
            due_date: new.due_date,
            owner: owner.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(todo_id, row.clone());

        Ok(row)
    }

    async fn list(&self, owner: &Identity) -> RepoResult<Vec<TodoRow>> {
        let inner = self.inner.read().await;

        let mut rows: Vec<TodoRow> = inner
            .rows
            .values()
            .filter(|row| row.owner == owner.as_str())
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then(a.todo_id.cmp(&b.todo_id))
        });

        Ok(rows)
    }

    async fn toggle_done(&self, owner: &Identity, todo_id: i64) -> RepoResult<Option<TodoRow>> {
        let mut inner = self.inner.write().await;

        Ok(inner.owned_mut(owner, todo_id).map(|row| {
            row.done = !row.done;
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn update_task(
        &self,
        owner: &Identity,
        todo_id: i64,
        task: &str,
    ) -> RepoResult<Option<TodoRow>> {
        let mut inner = self.inner.write().await;

        Ok(inner.owned_mut(owner, todo_id).map(|row| {
            row.task = task.to_string();
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, owner: &Identity, todo_id: i64) -> RepoResult<Option<TodoRow>> {
        let mut inner = self.inner.write().await;

        if inner.owned_mut(owner, todo_id).is_none() {
            return Ok(None);
        }
        Ok(inner.rows.remove(&todo_id))
    }
}
