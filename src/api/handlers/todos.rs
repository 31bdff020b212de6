/*
 * Responsibility
 * - todos 系 CRUD handler (/add, /get, ... と /api/todos 系の両方)
 * - AuthCtxExtractor で caller の Identity を受け取り、そのまま repo に渡す
 * - Path の {id} は公開 ID → extractor で復号化して内部 ID に変換して受け取る
 */
use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::{
    api::{
        dto::todos::{
            CreateTodoRequest, MISSING_CREATE_FIELDS, MISSING_TASK, MessageResponse, TodoResponse,
            UpdateTodoRequest,
        },
        extractors::{AuthCtxExtractor, public_id::PublicTodoId},
    },
    error::AppError,
    repos::TodoRow,
    state::AppState,
};

/// A body sent without `Content-Type: application/json` carries no usable
/// fields, so it is reported the same way as a body with the fields missing.
fn json_body<T>(
    body: Result<Json<T>, JsonRejection>,
    missing_fields: &'static str,
) -> Result<T, AppError> {
    match body {
        Ok(Json(req)) => Ok(req),
        Err(JsonRejection::MissingJsonContentType(_)) => {
            Err(AppError::invalid_input(missing_fields))
        }
        Err(e) => Err(e.into()),
    }
}

fn row_to_response(state: &AppState, row: TodoRow) -> Result<TodoResponse, AppError> {
    Ok(TodoResponse::from_row(&state.id_codec, row)?)
}

pub async fn create_todo(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, AppError> {
    let req = json_body(body, MISSING_CREATE_FIELDS)?;
    let new = req.validate().map_err(AppError::invalid_input)?;

    let row = state.todos.create(&auth.user_id, new).await?;
    tracing::debug!(user = %auth.user_id, todo_id = row.todo_id, "todo created");

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn list_todos(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let rows = state.todos.list(&auth.user_id).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn toggle_todo(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    todo_id: PublicTodoId,
) -> Result<Json<TodoResponse>, AppError> {
    let row = state
        .todos
        .toggle_done(&auth.user_id, todo_id.id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn update_todo(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    todo_id: PublicTodoId,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, AppError> {
    let req = json_body(body, MISSING_TASK)?;
    let task = req.validate().map_err(AppError::invalid_input)?;

    let row = state
        .todos
        .update_task(&auth.user_id, todo_id.id, &task)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(row_to_response(&state, row)?))
}

/// `DELETE /delete/{id}`: confirms with a message.
pub async fn delete_todo(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    todo_id: PublicTodoId,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .todos
        .delete(&auth.user_id, todo_id.id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(MessageResponse {
        message: "Todo deleted successfully",
    }))
}

/// `DELETE /api/todos/{id}`: echoes the removed todo.
pub async fn remove_todo(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    todo_id: PublicTodoId,
) -> Result<Json<TodoResponse>, AppError> {
    let row = state
        .todos
        .delete(&auth.user_id, todo_id.id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(row_to_response(&state, row)?))
}
