use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/tasks", get(handlers::list_tasks).post(handlers::create_task))
        .route("/api/tasks/:id/toggle", post(handlers::toggle_task))
        .route("/api/tasks/:id/reset", post(handlers::reset_task))
        .route("/api/tasks/:id", delete(handlers::delete_task))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/consent", get(handlers::get_consent).post(handlers::set_consent))
        .route("/api/export", get(handlers::export_tasks))
        .route("/api/import", post(handlers::import_tasks))
        .with_state(state)
}
