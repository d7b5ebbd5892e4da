// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

pub mod api;
pub mod config;
pub mod llm;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use chatrelay_core::{GenerationConfig, HistoryStore};
use parking_lot::RwLock;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::AppState;
use config::ServerConfig;
use llm::{ChatEngine, GeminiClient};

pub async fn run_server(config: ServerConfig) -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatrelay_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Chatrelay Server");
    config.validate()?;

    // Shared state: one history and one generation config for the process,
    // owned here and injected into the engine.
    let history = Arc::new(HistoryStore::new());
    let generation_config = Arc::new(RwLock::new(GenerationConfig::default()));
    let transport = Arc::new(GeminiClient::new(&config.llm)?);
    let engine = Arc::new(ChatEngine::new(
        history.clone(),
        generation_config.clone(),
        transport,
    ));

    let state = AppState {
        history,
        config: generation_config,
        engine,
    };

    tracing::info!("Serving static frontend from {:?}", config.server.static_dir);

    let app = Router::new()
        .route("/chat", post(api::chat))
        .route("/config", get(api::get_config).post(api::update_config))
        .route("/clear", post(api::clear_history))
        .route("/health", get(api::health_check))
        .fallback_service(ServeDir::new(&config.server.static_dir))
        .with_state(state)
        .layer(if config.server.enable_cors {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            CorsLayer::new()
        })
        .layer(TraceLayer::new_for_http());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
