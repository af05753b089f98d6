/*
 * Responsibility
 * - v1 URL structure (mounted under /api/{version} by app::build_router)
 * - /auth is split: signup/login/refresh public, logout/me protected
 * - /tasks, /progress, /notifications are protected as whole groups
 * - Bearer check is applied per group with route_layer (middleware::auth::access)
 */
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::api::v1::handlers::{
    auth::{login, logout, me, refresh, signup},
    index::index,
    notifications::{delete_notification, list_notifications, mark_read, register_device},
    progress::{get_progress, get_stats, list_badges},
    tasks::{
        complete_task, create_task, delete_task, get_task, list_tasks, overdue_tasks,
        update_task, upcoming_tasks,
    },
};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .nest("/auth", auth_routes(state.clone()))
        .nest("/tasks", task_routes(state.clone()))
        .nest("/progress", progress_routes(state.clone()))
        .nest("/notifications", notification_routes(state))
}

fn auth_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh", post(refresh));

    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me));

    public.merge(access::apply(protected, state))
}

fn task_routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/upcoming", get(upcoming_tasks))
        .route("/overdue", get(overdue_tasks))
        .route("/{id}", get(get_task).put(update_task).delete(delete_task))
        .route("/{id}/complete", post(complete_task));

    access::apply(router, state)
}

fn progress_routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(get_progress))
        .route("/badges", get(list_badges))
        .route("/stats", get(get_stats));

    access::apply(router, state)
}

fn notification_routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(list_notifications))
        .route("/register", post(register_device))
        .route("/{id}/read", put(mark_read))
        .route("/{id}", delete(delete_notification));

    access::apply(router, state)
}
