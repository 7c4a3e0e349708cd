mod handlers;
mod model;
mod routes;

pub use model::*;

use axum::Router;
use minijinja::Environment;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    routes::router(state)
}

pub fn add_templates(env: &mut Environment<'static>) {
    env.add_template("index.html", include_str!("../../templates/index.html"))
        .unwrap();
    env.add_template("read.html", include_str!("../../templates/read.html"))
        .unwrap();
    env.add_template("create.html", include_str!("../../templates/create.html"))
        .unwrap();
    env.add_template("edit.html", include_str!("../../templates/edit.html"))
        .unwrap();
}
