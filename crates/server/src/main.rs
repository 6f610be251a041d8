//! Orchard catalog backend binary.
//!
//! # Architecture
//!
//! - Axum web framework
//! - `MongoDB` document store (categories, products, delivery charges,
//!   admin sessions)
//! - Token-based admin authorization via the `x-admin-token` header
//!
//! The store is optional at startup: with no `DATABASE_URL`/`DATABASE_NAME`
//! (or an unreachable store) the server still serves `/` and `/test` and
//! reports the store unavailable instead of crashing.

#![cfg_attr(not(test), forbid(unsafe_code))]

use sentry::integrations::tracing as sentry_tracing;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orchard_server::config::AppConfig;
use orchard_server::db::Store;
use orchard_server::routes;
use orchard_server::state::AppState;

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AppConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Build the store handle, tolerating a missing or unreachable store.
async fn connect_store(config: &AppConfig) -> Option<Store> {
    let Some(store_config) = config.store.as_ref() else {
        tracing::warn!("DATABASE_URL/DATABASE_NAME not set, store disabled");
        return None;
    };

    match Store::connect(store_config).await {
        Ok(store) => {
            // Best effort: an unreachable store surfaces on /test, not here
            if let Err(err) = store.ensure_indexes().await {
                tracing::warn!("Failed to create store indexes: {err}");
            }
            tracing::info!("Store client ready");
            Some(store)
        }
        Err(err) => {
            tracing::warn!("Failed to build store client: {err}");
            None
        }
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = AppConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Initialize tracing with EnvFilter and Sentry integration
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "orchard_server=info,tower_http=debug".into());

    // Use JSON format on Fly.io for structured log parsing, text format locally
    let is_fly = std::env::var("FLY_APP_NAME").is_ok();
    let json_layer = is_fly.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_fly).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let store = connect_store(&config).await;
    let state = AppState::new(config.clone(), store);

    // Build router
    let app = routes::router()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        // The storefront frontends are served from other origins
        .layer(CorsLayer::permissive())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("catalog backend listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
