use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};

use crate::state::AppState;

use super::{signature, Webhook};

pub fn router(state: AppState) -> Router {
    Router::new().route("/github-pull", post(github_pull)).with_state(state)
}

/// Push-notification endpoint. The signature is computed over the raw body
/// bytes, so the body is taken as `Bytes` without any parsing extractor.
/// Every outcome answers 204 so the endpoint never acts as a verification
/// oracle for forged signatures.
async fn github_pull(State(webhook): State<Webhook>, headers: HeaderMap, body: Bytes) -> StatusCode {
    let header = headers
        .get("x-hub-signature")
        .or_else(|| headers.get("x-hub-signature-256"))
        .and_then(|value| value.to_str().ok());

    match signature::verify(webhook.secret.as_bytes(), header, &body) {
        Ok(()) => {
            tracing::info!("push notification verified, triggering pull");
            webhook.action.trigger();
        }
        Err(err) => {
            tracing::debug!(%err, "push notification rejected");
        }
    }

    StatusCode::NO_CONTENT
}
