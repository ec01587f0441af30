//! tutorlog-web - HTTP server and web UI for tutorlog.

mod csv;
mod error;
mod flash;
mod handlers;
mod render;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use rand::RngCore;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use tutorlog_core::defaults::{DEFAULT_DATABASE_URL, DEFAULT_HOST, DEFAULT_PORT};
use tutorlog_db::Database;

use handlers::api::{api_list_learners, health_check};
use handlers::export::export_notes;
use handlers::learners::{
    create_learner, delete_learner, edit_learner_form, list_learners, new_learner_form,
    update_learner, view_learner,
};
use handlers::notes::{add_note, delete_note};

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Application state shared across handlers.
///
/// Everything process-wide lives here explicitly — the persistence context
/// and the notice-signing secret are passed to handlers, never ambient.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// HMAC key for signing one-shot flash notices.
    pub secret: Arc<Vec<u8>>,
}

/// Build the application router.
fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_learners))
        .route("/health", get(health_check))
        .route("/learners/new", get(new_learner_form).post(create_learner))
        .route("/learners/:id", get(view_learner))
        .route("/learners/:id/notes", post(add_note))
        .route(
            "/learners/:id/edit",
            get(edit_learner_form).post(update_learner),
        )
        .route("/learners/:id/delete", get(delete_learner))
        .route("/learners/:id/export", get(export_notes))
        .route("/note/:id/delete", get(delete_note))
        .route("/api/learners", get(api_list_learners))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .with_state(state)
}

/// Resolve the flash-signing secret from SECRET_KEY, falling back to a
/// random per-process key (notices then do not survive restarts).
fn signing_secret() -> Vec<u8> {
    match std::env::var("SECRET_KEY") {
        Ok(s) if !s.trim().is_empty() => s.into_bytes(),
        _ => {
            warn!(
                subsystem = "web",
                component = "flash",
                "SECRET_KEY not set — using a random per-process secret; \
                 pending notices will not survive a restart"
            );
            let mut key = vec![0u8; 32];
            rand::thread_rng().fill_bytes(&mut key);
            key
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "tutorlog_web=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tutorlog_web=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("tutorlog-web.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(non_blocking);
            layer = layer.with_ansi(log_ansi.unwrap_or(false)); // no ANSI in files by default
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Get configuration from environment
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let secret = Arc::new(signing_secret());

    // Connect to database
    info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;
    info!("Database connected");

    // Run pending database migrations on startup
    info!("Running database migrations...");
    db.migrate().await?;
    info!("Database migrations complete");

    let state = AppState { db, secret };
    let app = router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
