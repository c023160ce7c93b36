use axum::debug_handler;

pub const ALIVE: &str = "Chat server is running ✅";

/// Liveness check.
#[debug_handler]
pub async fn index() -> &'static str {
    ALIVE
}
