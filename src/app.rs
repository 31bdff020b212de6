/*
 * Responsibility
 * - Config読み込み → 依存生成 (TodoRepo / IdCodec / AuthService) → Router 組み立て
 * - Middleware の適用 (auth / security headers / CORS / http)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, StoreKind};
use crate::repos::{MemoryTodoRepo, PgTodoRepo, TodoRepo};
use crate::services::{auth::build_auth_service, id_codec::IdCodec};
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,todo_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr は起動方法によっては見えないので、必ず tracing にも流す
        tracing::error!(?info, "panic");

        // development: 即死させて気付けるようにする
        // production: default hook に任せ、server は動かし続ける
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(?config, "starting todo API");

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    tracing::info!("listening on {}", config.addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

pub async fn build_state(config: &Config) -> Result<AppState> {
    let todos: Arc<dyn TodoRepo> = match config.store {
        StoreKind::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres store")?;
            let repo = PgTodoRepo::connect(url, config.database_max_connections)
                .await
                .context("failed to connect to postgres")?;
            Arc::new(repo)
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory todo store; data is lost on restart");
            Arc::new(MemoryTodoRepo::new())
        }
    };
    tracing::info!(store = todos.backend_name(), "todo store ready");

    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)
        .context("invalid SQIDS_* configuration")?;

    let auth = build_auth_service(config);

    Ok(AppState::new(todos, id_codec, auth))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let protected = middleware::auth::access::apply(api::protected_routes(), state.clone());

    let router = api::public_routes()
        .merge(protected)
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}
