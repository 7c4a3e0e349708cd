use axum::extract::FromRef;

use crate::{db::DB, views::Views, webhook::Webhook};

#[derive(FromRef, Clone)]
pub struct AppState {
    pub conn: DB,
    pub views: Views,
    pub webhook: Webhook,
}
