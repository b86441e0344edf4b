use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use boq_relay::adapters::ai::{GeminiAssistant, MockAssistant};
use boq_relay::adapters::http::relay_router;
use boq_relay::config::{AppConfig, AssistantBackend, ServerConfig};
use boq_relay::ports::BoqAssistant;

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_assistant(config: &AppConfig) -> std::io::Result<Arc<dyn BoqAssistant>> {
    match config.ai.backend {
        AssistantBackend::Gemini => {
            let gemini = config.ai.gemini_config().ok_or_else(|| {
                std::io::Error::other("Gemini backend selected but no API key configured")
            })?;
            tracing::info!(model = %gemini.model, "Initialized Gemini assistant");
            Ok(Arc::new(GeminiAssistant::new(gemini)))
        }
        AssistantBackend::Mock => {
            tracing::warn!("Using mock assistant; requests are echoed back");
            Ok(Arc::new(MockAssistant::new()))
        }
    }
}

fn cors_layer(server: &ServerConfig) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = server
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::load()
        .map_err(|e| std::io::Error::other(format!("Configuration error: {}", e)))?;

    init_tracing(&config.server);

    config.validate().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let assistant = build_assistant(&config)?;

    let mut app = relay_router(assistant).layer(TraceLayer::new_for_http());
    if let Some(cors) = cors_layer(&config.server) {
        app = app.layer(cors);
    }

    let addr = config
        .server
        .socket_addr()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind to {}: {}", addr, e);
        e
    })?;

    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "BOQ relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
