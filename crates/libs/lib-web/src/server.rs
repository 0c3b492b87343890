//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`start_server`] loads and validates the configuration, opens the user store,
//! builds the shared [`AppState`] and serves the router from [`create_router`]
//! until Ctrl-C.

// region: --- Imports
use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post},
    Router,
};
use lib_auth::TokenCodec;
use lib_core::{create_pool, ensure_schema, AppError, Config, DbPool};
use std::{path::Path, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::handlers;
use crate::middleware::{log_requests, map_res, require_auth, require_manager, stamp_req, RequestStamp};
use crate::services::RouteDistanceClient;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub codec: Arc<TokenCodec>,
    pub routes: Arc<RouteDistanceClient>,
}

impl AppState {
    /// Derive the token codec and directions client from a validated config.
    pub fn new(db: DbPool, config: Config) -> Result<Self, AppError> {
        let codec = Arc::new(config.token_codec());
        let routes = Arc::new(RouteDistanceClient::from_config(&config)?);

        Ok(Self { db, config, codec, routes })
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<TokenCodec> {
    fn from_ref(state: &AppState) -> Self {
        state.codec.clone()
    }
}

impl FromRef<AppState> for Arc<RouteDistanceClient> {
    fn from_ref(state: &AppState) -> Self {
        state.routes.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8000")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails (e.g. `CYPHER_SECRET` unset)
/// - Database connection or schema creation fails
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    info!("CUBA PAYMENT BACKEND STARTING");

    info!("Loading configuration...");
    let app_config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;
    info!("Database URL: {}", app_config.database_url);
    info!("Token lifetime: {} minutes", app_config.token_ttl_minutes);
    if app_config.route_api_key.is_none() {
        tracing::warn!("OPENSTREET_API_KEY is not set, /distance will fail");
    }

    // Ensure data directory exists for SQLite database
    if let Some(parent) = sqlite_file_path(&app_config.database_url).and_then(Path::parent) {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created database directory: {:?}", parent);
        }
    }

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;
    ensure_schema(&pool).await?;
    info!("Schema ready");

    let state = AppState::new(pool, app_config).map_err(|e| anyhow::anyhow!(e))?;
    let app = create_router(state, config.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!("SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Install the global subscriber. `LOG_LEVEL` picks the level, default `info`.
fn init_tracing() -> anyhow::Result<()> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let level = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => log_level.as_str(),
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(level))
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {e}"))?;

    info!("Log level: {}", level);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

/// Filesystem path of a file-backed SQLite URL, `None` for in-memory databases.
fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite:")?;
    let path = path.strip_prefix("//").unwrap_or(path);
    let path = path.split('?').next().unwrap_or(path);

    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Some(Path::new(path))
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: Vec<String>) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    info!("[ROUTE SETUP] Registering HTTP routes...");

    let public = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login));

    let authenticated = Router::new()
        .route("/profile", get(handlers::profile::get_profile))
        .route("/distance", post(handlers::distance::route_distance))
        .route_layer(from_fn_with_state(state.codec.clone(), require_auth));

    // require_manager runs after require_auth, which is layered last
    let manager = Router::new()
        .route("/manager/users", get(handlers::manager::list_users))
        .route("/manager/users/{email}/deactivate", patch(handlers::manager::deactivate_user))
        .route_layer(from_fn(require_manager))
        .route_layer(from_fn_with_state(state.codec.clone(), require_auth));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(manager)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(from_fn(map_res))
        .layer(from_fn(log_requests))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri().path(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE]"
                        );
                    },
                ),
        )
        // Stamping wraps everything above so the span and logs see the ID
        .layer(from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" PUBLIC:");
    info!("   • GET   /");
    info!("   • GET   /health");
    info!(" AUTH:");
    info!("   • POST  /auth/register");
    info!("   • POST  /auth/login");
    info!(" AUTHENTICATED:");
    info!("   • GET   /profile");
    info!("   • POST  /distance");
    info!(" MANAGER:");
    info!("   • GET   /manager/users");
    info!("   • PATCH /manager/users/{{email}}/deactivate");
}
// endregion: --- Server Setup
