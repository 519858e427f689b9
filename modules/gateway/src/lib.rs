#![forbid(clippy::unwrap_used)]
#![forbid(unsafe_code)]
#![forbid(clippy::expect_used)]
#![forbid(clippy::panic)]

use admin::services::admin_auth::EnsureAdminAccount;
use kanau::processor::Processor;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use config::Config;
use state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Bootstrap(#[from] framework::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub async fn start_server() -> Result<(), StartError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load()?;

    info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let state = AppState::new(pool);

    if let (Some(email), Some(password)) = (
        config.admin_email.clone(),
        config.admin_password.clone(),
    ) {
        state
            .auth
            .process(EnsureAdminAccount {
                name: config.admin_name.clone(),
                email,
                password,
            })
            .await?;
    }

    let app = routes::router(state);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        if ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }
}
