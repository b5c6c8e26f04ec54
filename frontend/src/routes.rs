//! UI server routes. Each request builds a fresh view, loads the list from the API, applies the
//! user's action, then renders the page or redirects back to `/` once a mutation has settled.

use crate::client::StudentsClient;
use crate::driver::drive;
use crate::render::render_page;
use crate::view::{FormFields, FormMode, Phase, StudentsView};
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

#[derive(Clone)]
pub struct UiState {
    pub client: StudentsClient,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// `add` opens an empty form.
    pub form: Option<String>,
    pub edit: Option<i32>,
    pub confirm: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SaveForm {
    /// Present only when editing.
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub age: String,
}

async fn loaded_view(client: &StudentsClient) -> StudentsView {
    let mut view = StudentsView::new();
    let effect = view.start();
    drive(&mut view, client, effect).await;
    view
}

fn finish(view: &StudentsView) -> Response {
    if view.is_settled() {
        return Redirect::to("/").into_response();
    }
    Html(render_page(view)).into_response()
}

async fn index(State(state): State<UiState>, Query(query): Query<PageQuery>) -> Html<String> {
    let mut view = loaded_view(&state.client).await;
    if query.form.as_deref() == Some("add") {
        view.open_add();
    } else if let Some(id) = query.edit {
        view.open_edit(id);
    } else if let Some(id) = query.confirm {
        view.request_delete(id);
    }
    Html(render_page(&view))
}

async fn save(State(state): State<UiState>, Form(input): Form<SaveForm>) -> Response {
    let mut view = loaded_view(&state.client).await;
    if view.phase() != Phase::Loaded {
        return Html(render_page(&view)).into_response();
    }
    let mode = match input.id {
        Some(id) => FormMode::Edit(id),
        None => FormMode::Add,
    };
    view.restore_form(
        mode,
        FormFields {
            name: input.name,
            email: input.email,
            age: input.age,
        },
    );
    let effect = view.submit();
    drive(&mut view, &state.client, effect).await;
    finish(&view)
}

async fn delete(State(state): State<UiState>, Path(id): Path<i32>) -> Response {
    let mut view = loaded_view(&state.client).await;
    if view.phase() != Phase::Loaded {
        return Html(render_page(&view)).into_response();
    }
    view.request_delete(id);
    let effect = view.confirm_delete();
    drive(&mut view, &state.client, effect).await;
    finish(&view)
}

pub fn ui_routes(state: UiState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/save", post(save))
        .route("/delete/:id", post(delete))
        .with_state(state)
}
