/*
 * Responsibility
 * - todos の ownership-scoped CRUD を trait として定義する
 * - 全ての lookup / mutation / delete は (todo_id, owner) の組で絞り込む
 * - 見つからない / 他人の todo は区別せず None を返す
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::repos::error::RepoResult;
use crate::services::auth::Identity;

mod memory;
mod postgres;

pub use memory::MemoryTodoRepo;
pub use postgres::PgTodoRepo;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TodoRow {
    #[sqlx(rename = "todoId")]
    pub todo_id: i64,

    pub task: String,
    pub done: bool,

    #[sqlx(rename = "dueDate")]
    pub due_date: DateTime<Utc>,

    #[sqlx(rename = "userId")]
    pub owner: String,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Validated input for `TodoRepo::create`.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub task: String,
    pub due_date: DateTime<Utc>,
}

/// Ownership-scoped access to persisted todos.
///
/// `owner` is always the caller's resolved identity. Implementations must
/// make each call atomic on its own; there is no cross-call locking.
#[async_trait]
pub trait TodoRepo: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn create(&self, owner: &Identity, new: NewTodo) -> RepoResult<TodoRow>;

    // Ordered by due date ascending, then id.
    async fn list(&self, owner: &Identity) -> RepoResult<Vec<TodoRow>>;

    async fn toggle_done(&self, owner: &Identity, todo_id: i64) -> RepoResult<Option<TodoRow>>;

    // Only `task` changes; `done` and `due_date` are left alone.
    async fn update_task(
        &self,
        owner: &Identity,
        todo_id: i64,
        task: &str,
    ) -> RepoResult<Option<TodoRow>>;

    // Returns the removed row.
    async fn delete(&self, owner: &Identity, todo_id: i64) -> RepoResult<Option<TodoRow>>;
}
