mod config;
mod db;
mod errors;
mod migrations;
mod notes;
mod state;
mod views;
mod webhook;

use std::sync::Arc;

pub use config::config;
pub use db::{init_db, DB};
pub use errors::{Error, Result};

use axum::Router;
use minijinja::Environment;
use state::AppState;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;
use views::Views;
use webhook::{GitPull, Webhook};

#[tokio::main]
async fn main() -> errors::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "webnotes=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config();

    // incomplete configuration must fail before the listener binds
    let secret = config
        .webhook_secret
        .clone()
        .ok_or_else(|| Error::Unexpected("WEBHOOK_SECRET must be set".into()))?;
    let repo_url = config
        .repo_url
        .clone()
        .ok_or_else(|| Error::Unexpected("REPO_URL must be set".into()))?;
    let pull = GitPull::new(repo_url).map_err(|err| Error::Unexpected(err.to_string()))?;

    let conn = init_db().await?;

    let mut env = Environment::new();
    notes::add_templates(&mut env);
    let views = Views::new(env);

    let state = AppState {
        conn,
        views,
        webhook: Webhook {
            secret,
            action: Arc::new(pull),
        },
    };

    let app = Router::new()
        .merge(notes::router(state.clone()))
        .merge(webhook::router(state))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(format!("127.0.0.1:{}", config.port)).await.unwrap();

    tracing::info!("listening on http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();

    Ok(())
}
