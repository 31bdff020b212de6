/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 * - request の寿命を超えて保持しない (どこにも永続化しない)
 */
use crate::services::auth::Identity;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は token の subject (todos の owner として使う)
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: Identity,
}

impl AuthCtx {
    pub fn new(user_id: Identity) -> Self {
        Self { user_id }
    }
}
