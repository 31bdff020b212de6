/*
 * Responsibility
 * - Todos の request/response DTO
 * - validation (必須 / 形式チェック) は境界でここに閉じ込める
 * - 公開 ID は encode 済みの値を返す (内部 ID を漏らさない)
 */
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::{NewTodo, TodoRow};
use crate::services::id_codec::{self, IdCodec};

pub const MISSING_CREATE_FIELDS: &str = "Task and due date are required";
pub const MISSING_TASK: &str = "Task is required";
pub const INVALID_DUE_DATE: &str = "dueDate must be an RFC 3339 timestamp or a YYYY-MM-DD date";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub task: Option<String>,
    pub due_date: Option<String>,
}

impl CreateTodoRequest {
    pub fn validate(self) -> Result<NewTodo, &'static str> {
        let task = self.task.filter(|t| !t.trim().is_empty());
        let due_date = self.due_date.filter(|d| !d.trim().is_empty());

        let (Some(task), Some(due_date)) = (task, due_date) else {
            return Err(MISSING_CREATE_FIELDS);
        };

        let due_date = parse_due_date(&due_date).ok_or(INVALID_DUE_DATE)?;

        Ok(NewTodo { task, due_date })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub task: Option<String>,
}

impl UpdateTodoRequest {
    pub fn validate(self) -> Result<String, &'static str> {
        self.task
            .filter(|t| !t.trim().is_empty())
            .ok_or(MISSING_TASK)
    }
}

// `2026-03-01T09:00:00Z` or a bare `2026-03-01` (midnight UTC), which is
// what an <input type="date"> posts.
fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: String, // encoded
    pub task: String,
    pub done: bool,
    pub due_date: DateTime<Utc>,
    pub user: String, // owner identity
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoResponse {
    pub fn from_row(codec: &IdCodec, row: TodoRow) -> id_codec::Result<Self> {
        Ok(Self {
            id: codec.encode(row.todo_id)?,
            task: row.task,
            done: row.done,
            due_date: row.due_date,
            user: row.owner,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn create(task: Option<&str>, due: Option<&str>) -> CreateTodoRequest {
        CreateTodoRequest {
            task: task.map(str::to_string),
            due_date: due.map(str::to_string),
        }
    }

    #[test]
    fn create_requires_task_and_due_date() {
        assert_eq!(
            create(None, Some("2026-03-01")).validate().unwrap_err(),
            MISSING_CREATE_FIELDS
        );
        assert_eq!(
            create(Some("x"), None).validate().unwrap_err(),
            MISSING_CREATE_FIELDS
        );
        assert_eq!(
            create(Some("   "), Some("2026-03-01")).validate().unwrap_err(),
            MISSING_CREATE_FIELDS
        );
    }

    #[test]
    fn create_rejects_unparseable_due_date() {
        assert_eq!(
            create(Some("x"), Some("next tuesday")).validate().unwrap_err(),
            INVALID_DUE_DATE
        );
    }

    #[test]
    fn due_date_accepts_rfc3339_with_offset() {
        let new = create(Some("x"), Some("2026-03-01T10:30:00+01:00"))
            .validate()
            .unwrap();
        assert_eq!(
            new.due_date,
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn due_date_accepts_plain_date_as_midnight_utc() {
        let new = create(Some("x"), Some("2026-03-01")).validate().unwrap();
        assert_eq!(new.due_date, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(new.task, "x");
    }

    #[test]
    fn update_requires_non_blank_task() {
        assert_eq!(
            UpdateTodoRequest { task: None }.validate().unwrap_err(),
            MISSING_TASK
        );
        assert_eq!(
            UpdateTodoRequest {
                task: Some("".into())
            }
            .validate()
            .unwrap_err(),
            MISSING_TASK
        );
        assert_eq!(
            UpdateTodoRequest {
                task: Some("renamed".into())
            }
            .validate()
            .unwrap(),
            "renamed"
        );
    }
}
