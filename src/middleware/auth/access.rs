//! `x-auth-token` (HS256 JWT) 検証 → AuthCtx を extensions に入れる
//!
//! - header がない / 空 → `AppError::Unauthenticated`
//! - 署名不正 / 期限切れ / subject 不正 → `AppError::Unauthorized`
//!
//! どちらも 401 で即座に打ち切り、handler には到達しない。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::middleware::auth::AUTH_TOKEN_HEADER;
use crate::state::AppState;

/// protected routes に認証を掛けるための middleware を適用する。
///
/// `route_layer` なので、存在しない path は 401 ではなく 404 のまま返る。
///
/// 例：
/// ```ignore
/// let protected = middleware::auth::access::apply(api::protected_routes(), state.clone());
/// let app = api::public_routes().merge(protected);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers()).ok_or(AppError::Unauthenticated)?;

    let verified = match state.auth.verify(token) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(
                error = %err,
                path = %req.uri().path(),
                "access token verification failed"
            );
            return Err(AppError::Unauthorized);
        }
    };

    tracing::debug!(
        user = %verified.identity,
        expires_at = verified.expires_at,
        "access token verified"
    );

    let auth_ctx = AuthCtx::new(verified.identity);

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn blank_header_counts_as_missing() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);

        headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static("   "));
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn token_is_trimmed() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static(" abc.def.ghi "));
        assert_eq!(extract_token(&headers), Some("abc.def.ghi"));
    }
}
