/*
 * Responsibility
 * - todos テーブル向け SQLx 操作 (schema: sql/schema.sql)
 * - 全 query の WHERE 句に "todoId" と "userId" の両方を入れる
 */
use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::repos::error::RepoResult;
use crate::repos::todo_repo::{NewTodo, TodoRepo, TodoRow};
use crate::services::auth::Identity;

#[derive(Clone, Debug)]
pub struct PgTodoRepo {
    pool: PgPool,
}

impl PgTodoRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl TodoRepo for PgTodoRepo {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, owner: &Identity, new: NewTodo) -> RepoResult<TodoRow> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (task, "dueDate", "userId")
            VALUES ($1, $2, $3)
            RETURNING
                "todoId", task, done, "dueDate", "userId", "createdAt", "updatedAt"
            "#,
        )
        .bind(&new.task)
        .bind(new.due_date)
        .bind(owner.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self, owner: &Identity) -> RepoResult<Vec<TodoRow>> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT
                "todoId", task, done, "dueDate", "userId", "createdAt", "updatedAt"
            FROM todos
            WHERE "userId" = $1
            ORDER BY "dueDate" ASC, "todoId" ASC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn toggle_done(&self, owner: &Identity, todo_id: i64) -> RepoResult<Option<TodoRow>> {
        // flip は read-modify-write にせず 1 statement で行う
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET
                done = NOT done,
                "updatedAt" = now()
            WHERE "todoId" = $1 AND "userId" = $2
            RETURNING
                "todoId", task, done, "dueDate", "userId", "createdAt", "updatedAt"
            "#,
        )
        .bind(todo_id)
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_task(
        &self,
        owner: &Identity,
        todo_id: i64,
        task: &str,
    ) -> RepoResult<Option<TodoRow>> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET
                task = $3,
                "updatedAt" = now()
            WHERE "todoId" = $1 AND "userId" = $2
            RETURNING
                "todoId", task, done, "dueDate", "userId", "createdAt", "updatedAt"
            "#,
        )
        .bind(todo_id)
        .bind(owner.as_str())
        .bind(task)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, owner: &Identity, todo_id: i64) -> RepoResult<Option<TodoRow>> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            DELETE FROM todos
            WHERE "todoId" = $1 AND "userId" = $2
            RETURNING
                "todoId", task, done, "dueDate", "userId", "createdAt", "updatedAt"
            "#,
        )
        .bind(todo_id)
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
