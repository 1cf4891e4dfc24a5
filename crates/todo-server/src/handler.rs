use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Json, Redirect};
use serde::{Deserialize, Serialize};
use serde_json::json;

use todo_types::{validate_list_name, validate_list_rename, validate_todo_name, ListId, TodoId};
use todo_view::{ListSummary, ListView};

use crate::error::ServerResult;
use crate::session::ClientSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NameInput {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub completed: bool,
}

/// Body of a 201 response.
#[derive(Debug, Serialize)]
pub struct Created<I> {
    pub id: I,
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn index() -> Redirect {
    Redirect::to("/lists")
}

/// Every list, incomplete ones first.
pub async fn list_lists(
    State(state): State<AppState>,
    ClientSession(session): ClientSession,
) -> ServerResult<Json<Vec<ListSummary>>> {
    let lists = state
        .with_store(session, |store| Ok(store.all_lists()?))
        .await?;
    Ok(Json(ListSummary::ordered(&lists)))
}

pub async fn create_list(
    State(state): State<AppState>,
    ClientSession(session): ClientSession,
    Json(input): Json<NameInput>,
) -> ServerResult<(StatusCode, Json<Created<ListId>>)> {
    let id = state
        .with_store(session, move |store| {
            let name = validate_list_name(&input.name, &store.all_lists()?)?;
            Ok(store.create_list(&name)?)
        })
        .await?;
    tracing::info!(list_id = %id, "list created");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn show_list(
    State(state): State<AppState>,
    ClientSession(session): ClientSession,
    Path(id): Path<String>,
) -> ServerResult<Json<ListView>> {
    let id: ListId = id.parse()?;
    let list = state
        .with_store(session, move |store| Ok(store.load_list(id)?))
        .await?;
    Ok(Json(ListView::of(&list)))
}

pub async fn rename_list(
    State(state): State<AppState>,
    ClientSession(session): ClientSession,
    Path(id): Path<String>,
    Json(input): Json<NameInput>,
) -> ServerResult<Json<ListView>> {
    let id: ListId = id.parse()?;
    let list = state
        .with_store(session, move |store| {
            store.load_list(id)?;
            let name = validate_list_rename(&input.name, id, &store.all_lists()?)?;
            store.rename_list(id, &name)?;
            Ok(store.load_list(id)?)
        })
        .await?;
    Ok(Json(ListView::of(&list)))
}

pub async fn delete_list(
    State(state): State<AppState>,
    ClientSession(session): ClientSession,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    let id: ListId = id.parse()?;
    state
        .with_store(session, move |store| Ok(store.delete_list(id)?))
        .await?;
    tracing::info!(list_id = %id, "list deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_todo(
    State(state): State<AppState>,
    ClientSession(session): ClientSession,
    Path(list_id): Path<String>,
    Json(input): Json<NameInput>,
) -> ServerResult<(StatusCode, Json<Created<TodoId>>)> {
    let list_id: ListId = list_id.parse()?;
    let id = state
        .with_store(session, move |store| {
            store.load_list(list_id)?;
            let name = validate_todo_name(&input.name)?;
            Ok(store.create_todo(list_id, &name)?)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    ClientSession(session): ClientSession,
    Path((list_id, todo_id)): Path<(String, String)>,
) -> ServerResult<StatusCode> {
    let (list_id, todo_id): (ListId, TodoId) = (list_id.parse()?, todo_id.parse()?);
    state
        .with_store(session, move |store| Ok(store.delete_todo(list_id, todo_id)?))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_todo(
    State(state): State<AppState>,
    ClientSession(session): ClientSession,
    Path((list_id, todo_id)): Path<(String, String)>,
    Json(input): Json<StatusInput>,
) -> ServerResult<Json<ListView>> {
    let (list_id, todo_id): (ListId, TodoId) = (list_id.parse()?, todo_id.parse()?);
    let list = state
        .with_store(session, move |store| {
            store.update_todo_status(list_id, todo_id, input.completed)?;
            Ok(store.load_list(list_id)?)
        })
        .await?;
    Ok(Json(ListView::of(&list)))
}

pub async fn complete_all(
    State(state): State<AppState>,
    ClientSession(session): ClientSession,
    Path(list_id): Path<String>,
) -> ServerResult<Json<ListView>> {
    let list_id: ListId = list_id.parse()?;
    let list = state
        .with_store(session, move |store| {
            store.mark_all_completed(list_id)?;
            Ok(store.load_list(list_id)?)
        })
        .await?;
    Ok(Json(ListView::of(&list)))
}
