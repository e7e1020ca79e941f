pub mod error;
pub mod form;
pub mod handlers;

use crate::tasks::TasksService;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<TasksService>,
}

impl AppState {
    pub fn new(tasks: TasksService) -> Self {
        Self {
            tasks: Arc::new(tasks),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::submit_action),
        )
        .route("/tasks/{id}", get(handlers::get_task))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
