mod pull;
mod routes;
mod signature;

pub use pull::{GitPull, UpdateAction};
pub use signature::SignatureError;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Shared secret plus the action to fire on a verified push notification.
/// Built once at startup and cloned into handlers through the app state.
#[derive(Clone)]
pub struct Webhook {
    pub secret: String,
    pub action: Arc<dyn UpdateAction>,
}

pub fn router(state: AppState) -> Router {
    routes::router(state)
}
