use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    routing::get,
    Form, Router,
};
use minijinja::context;
use uuid::Uuid;

use crate::{db::DB, state::AppState, views::Views};

use super::{handlers, NoteForm};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/read", get(read))
        .route("/create", get(create_view).post(create))
        .route("/edit/{note_id}", get(edit_view).post(edit))
        .route("/delete/{note_id}", get(delete))
        .with_state(state)
}

async fn home(views: Views) -> impl IntoResponse {
    views.response("index.html", context! {})
}

async fn read(views: Views, State(db): State<DB>) -> impl IntoResponse {
    handlers::list_notes(db)
        .await
        .map(|notes| views.response("read.html", context! { notes => notes }))
        .into_response()
}

async fn create_view(views: Views) -> impl IntoResponse {
    views.response("create.html", context! {})
}

async fn create(State(db): State<DB>, Form(form): Form<NoteForm>) -> impl IntoResponse {
    handlers::create_note(form.fname, form.fmessage, db)
        .await
        .map(|_| Redirect::to("/read"))
        .into_response()
}

async fn edit_view(Path(note_id): Path<Uuid>, views: Views, State(db): State<DB>) -> impl IntoResponse {
    handlers::get_note(note_id, db)
        .await
        .map(|note| views.response("edit.html", context! { note => note }))
        .into_response()
}

async fn edit(Path(note_id): Path<Uuid>, State(db): State<DB>, Form(form): Form<NoteForm>) -> impl IntoResponse {
    handlers::replace_note(note_id, form.fname, form.fmessage, db)
        .await
        .map(|_| Redirect::to("/read"))
        .into_response()
}

async fn delete(Path(note_id): Path<Uuid>, State(db): State<DB>) -> impl IntoResponse {
    handlers::delete_note(note_id, db)
        .await
        .map(|_| Redirect::to("/read"))
        .into_response()
}
