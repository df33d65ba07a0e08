use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all Verbum endpoints.
pub fn build_router(state: AppState, allow_any_origin: bool) -> Router {
    let router = Router::new()
        .route("/", get(handler::root_handler))
        .route("/health", get(handler::health_handler))
        .route("/books", get(handler::books_handler))
        .route("/books/count", get(handler::books_count_handler))
        .route("/books/with_chapters", get(handler::books_with_chapters_handler))
        .route("/chapters/:book/count", get(handler::chapters_count_handler))
        .route("/verses", get(handler::verses_query_handler))
        .route("/verses/:version/:book/:chapter", get(handler::verses_path_handler))
        .route("/search/:theme", get(handler::search_handler))
        .route("/random", get(handler::random_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if allow_any_origin {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}
