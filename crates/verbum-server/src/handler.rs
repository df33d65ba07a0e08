use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use verbum_query::{ChapterCount, Passage, SearchResults, VerseHit};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct VersionParams {
    pub version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VersesParams {
    pub version: Option<String>,
    pub book: Option<String>,
    pub chapter: Option<String>,
}

/// Welcome text.
pub async fn root_handler() -> &'static str {
    "Welcome to the Verbum API!"
}

/// Health check handler.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let cached: Vec<String> = state
        .service()
        .cache()
        .cached_versions()
        .into_iter()
        .map(String::from)
        .collect();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "cached_versions": cached,
    }))
}

/// `GET /books`
pub async fn books_handler(
    State(state): State<AppState>,
    Query(params): Query<VersionParams>,
) -> ServerResult<Json<Value>> {
    let version = state.resolve_version(params.version.as_deref())?;
    let books = state.run(move |svc| svc.list_books(&version)).await?;
    Ok(Json(json!({ "books": books })))
}

/// `GET /books/count`
pub async fn books_count_handler(
    State(state): State<AppState>,
    Query(params): Query<VersionParams>,
) -> ServerResult<Json<Value>> {
    let version = state.resolve_version(params.version.as_deref())?;
    let total = state.run(move |svc| svc.count_books(&version)).await?;
    Ok(Json(json!({ "total_books": total })))
}

/// `GET /books/with_chapters`
pub async fn books_with_chapters_handler(
    State(state): State<AppState>,
    Query(params): Query<VersionParams>,
) -> ServerResult<Json<Value>> {
    let version = state.resolve_version(params.version.as_deref())?;
    let books = state
        .run(move |svc| svc.list_books_with_chapter_counts(&version))
        .await?;
    Ok(Json(json!({ "books": books })))
}

/// `GET /chapters/:book/count`
pub async fn chapters_count_handler(
    State(state): State<AppState>,
    Path(book): Path<String>,
    Query(params): Query<VersionParams>,
) -> ServerResult<Json<ChapterCount>> {
    let version = state.resolve_version(params.version.as_deref())?;
    let count = state
        .run(move |svc| svc.count_chapters(&version, &book))
        .await?;
    Ok(Json(count))
}

/// `GET /verses?version=&book=&chapter=`
pub async fn verses_query_handler(
    State(state): State<AppState>,
    Query(params): Query<VersesParams>,
) -> ServerResult<Json<Passage>> {
    let book = non_empty(params.book).ok_or(ServerError::MissingParam("book"))?;
    let chapter = non_empty(params.chapter).ok_or(ServerError::MissingParam("chapter"))?;
    let version = state.resolve_version(params.version.as_deref())?;
    let passage = state
        .run(move |svc| svc.get_verses(&version, &book, &chapter))
        .await?;
    Ok(Json(passage))
}

/// `GET /verses/:version/:book/:chapter`
pub async fn verses_path_handler(
    State(state): State<AppState>,
    Path((version, book, chapter)): Path<(String, String, String)>,
) -> ServerResult<Json<Passage>> {
    let version = state.resolve_version(Some(version.as_str()))?;
    let passage = state
        .run(move |svc| svc.get_verses(&version, &book, &chapter))
        .await?;
    Ok(Json(passage))
}

/// `GET /search/:theme`
pub async fn search_handler(
    State(state): State<AppState>,
    Path(theme): Path<String>,
    Query(params): Query<VersionParams>,
) -> ServerResult<Json<SearchResults>> {
    let version = state.resolve_version(params.version.as_deref())?;
    let results = state.run(move |svc| svc.search(&version, &theme)).await?;
    Ok(Json(results))
}

/// `GET /random`
pub async fn random_handler(
    State(state): State<AppState>,
    Query(params): Query<VersionParams>,
) -> ServerResult<Json<VerseHit>> {
    let version = state.resolve_version(params.version.as_deref())?;
    let hit = state.run(move |svc| svc.random_verse(&version)).await?;
    Ok(Json(hit))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
