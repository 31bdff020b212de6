/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - todos: Arc<dyn TodoRepo>, id_codec: IdCodec, auth: AuthService
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - secret / store は global に置かず、ここから注入する
 */
use std::sync::Arc;

use crate::repos::TodoRepo;
use crate::services::{auth::AuthService, id_codec::IdCodec};

#[derive(Clone)]
pub struct AppState {
    pub todos: Arc<dyn TodoRepo>,
    pub id_codec: IdCodec,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(todos: Arc<dyn TodoRepo>, id_codec: IdCodec, auth: Arc<AuthService>) -> Self {
        Self {
            todos,
            id_codec,
            auth,
        }
    }
}
