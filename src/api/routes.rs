/*
 * Responsibility
 * - URL 構造を定義
 * - 認証不要 (public) と x-auth-token 必須 (protected) をここで分ける
 * - /add, /get, ... と /api/todos 系は同じ handler を共有する
 */
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use crate::api::handlers::{
    health::health,
    todos::{create_todo, delete_todo, list_todos, remove_todo, toggle_todo, update_todo},
};

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(create_todo))
        .route("/get", get(list_todos))
        .route("/edit/{id}", put(toggle_todo))
        .route("/update/{id}", put(update_todo))
        .route("/delete/{id}", delete(delete_todo))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", put(toggle_todo).delete(remove_todo))
        .route("/api/todos/update/{id}", put(update_todo))
}
