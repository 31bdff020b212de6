/*
 * Responsibility
 * - 永続化層の公開インターフェース
 * - handler / app からは TodoRepo trait だけを見る
 */
pub mod error;
pub mod todo_repo;

pub use todo_repo::{MemoryTodoRepo, NewTodo, PgTodoRepo, TodoRepo, TodoRow};
