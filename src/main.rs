//! ChatHub Server — authenticated broadcast chat backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use chathub_core::config::AppConfig;
use chathub_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("CHATHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ChatHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = chathub_database::DatabasePool::connect(&config.database).await?;
    chathub_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.pool().clone();

    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(chathub_database::repositories::UserRepository::new(
        db_pool.clone(),
    ));
    let session_repo = Arc::new(chathub_database::repositories::SessionRepository::new(
        db_pool.clone(),
    ));
    let message_repo = Arc::new(chathub_database::repositories::MessageRepository::new(
        db_pool.clone(),
    ));

    // ── Auth ─────────────────────────────────────────────────────
    let password_hasher = Arc::new(chathub_auth::password::PasswordHasher::new());
    let jwt_encoder = Arc::new(chathub_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(chathub_auth::jwt::JwtDecoder::new(&config.auth));
    let session_store = Arc::new(chathub_auth::session::SessionStore::new(Arc::clone(
        &session_repo,
    )));
    let session_manager = Arc::new(chathub_auth::session::SessionManager::new(
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        session_store,
        Arc::clone(&user_repo),
        password_hasher,
        config.auth.clone(),
    ));

    // ── Broadcast hub ────────────────────────────────────────────
    let hub = Arc::new(chathub_realtime::ChatHub::new(
        &config.chat,
        Arc::clone(&message_repo) as Arc<dyn chathub_core::traits::MessageArchive>,
    ));

    // ── HTTP server ──────────────────────────────────────────────
    let state = chathub_api::AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        jwt_decoder,
        session_manager,
        message_repo,
        hub,
    };

    let app = chathub_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("ChatHub server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;

    tracing::info!("ChatHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
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
}
