pub mod config;
pub mod groups;
pub mod hub;
pub mod index;
pub mod presence;
pub mod protocol;
pub mod rooms;

use std::sync::Arc;

use anyhow::Context;
use axum::{extract::FromRef, http::{HeaderValue, Method}, routing::get, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub use config::{Config, IdleTimeout};
pub use hub::{ConnectionId, Hub};
pub use protocol::{ChatMessage, ClientEvent, ServerEvent, TypingSignal};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub hub: Arc<Hub>,
    pub idle: IdleTimeout,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            hub: Arc::new(Hub::new(config.default_group.clone())),
            idle: config.idle_timeout(),
        }
    }
}

pub fn app(state: AppState, config: &Config) -> anyhow::Result<Router> {
    let origin = match &config.cors_origin {
        Some(origin) => AllowOrigin::exact(
            HeaderValue::from_str(origin).with_context(|| format!("bad CORS origin {origin:?}"))?,
        ),
        None => AllowOrigin::any(),
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST]);

    Ok(Router::new()
        .route("/", get(index::index))
        .merge(rooms::router())
        .with_state(state)
        .layer(cors))
}
