/*
 * Responsibility
 * - crate の module tree を束ねる
 * - binary (main.rs / bin/token_gen.rs) と tests/ から同じ Router を組み立てられるようにする
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
