/*
 * Responsibility
 * - HTTP surface の公開ポイント (routes の re-export など)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::{protected_routes, public_routes};
