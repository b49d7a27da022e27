//! Eroz Backend - auth/RBAC core for the medical-imaging training site

use anyhow::{Context, Result};
use eroz_backend::{
    api::{create_router, TrainingState},
    auth::{AuthState, JwtHandler, UserStore},
    config::Config,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let user_store = Arc::new(UserStore::new(&config.database_path)?);
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        user_store.seed_admin(email, password)?;
    }

    let jwt_handler = Arc::new(JwtHandler::new(config.jwt_secret.clone()));
    let auth_state = AuthState::new(user_store, jwt_handler);
    let training_state = TrainingState::with_builtin_cases();

    info!("Authentication initialized at: {}", config.database_path);

    let app = create_router(auth_state, training_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eroz_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
