use axum::{http::StatusCode, response::IntoResponse};

use crate::{
    config::{config, Mode},
    db,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not_found")]
    NotFound(String),
    #[error(transparent)]
    DB(db::Error),
    #[error("unexpected")]
    Unexpected(String),
}

impl From<db::Error> for Error {
    fn from(error: db::Error) -> Self {
        match error {
            db::Error::NotFound(msg) => Self::NotFound(msg),
            error => Self::DB(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("{:?}", self);

        match self {
            Error::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            error => {
                let body = error_body(&error, config().app_env);
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

/// Debug detail is for development only; production answers generic text.
fn error_body(error: &Error, mode: Mode) -> String {
    match mode {
        Mode::Development => format!("{error:?}"),
        Mode::Production => "Unexpected error".into(),
    }
}
