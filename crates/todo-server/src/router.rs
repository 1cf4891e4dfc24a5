use axum::middleware::from_fn;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::session::session_cookie;
use crate::state::AppState;

/// Build the axum router with all todo endpoints.
///
/// The session cookie layer is only installed when lists live in sessions.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/", get(handler::index))
        .route("/lists", get(handler::list_lists).post(handler::create_list))
        .route(
            "/lists/:id",
            get(handler::show_list)
                .put(handler::rename_list)
                .delete(handler::delete_list),
        )
        .route("/lists/:id/todos", post(handler::create_todo))
        .route(
            "/lists/:id/todos/:todo_id",
            put(handler::update_todo).delete(handler::delete_todo),
        )
        .route("/lists/:id/complete_all", post(handler::complete_all));
    if state.is_session() {
        router = router.layer(from_fn(session_cookie));
    }
    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
