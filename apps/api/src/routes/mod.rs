pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document and derived views
        .route("/api/v1/resume", get(handlers::handle_get_resume))
        .route("/api/v1/resume/score", get(handlers::handle_get_score))
        .route("/api/v1/resume/validation", get(handlers::handle_validate))
        // Mutations
        .route(
            "/api/v1/resume/personal",
            patch(handlers::handle_update_personal),
        )
        .route(
            "/api/v1/resume/sections/:section",
            put(handlers::handle_replace_section),
        )
        .route("/api/v1/resume/sample", post(handlers::handle_load_sample))
        .route(
            "/api/v1/resume/entries/:section",
            post(handlers::handle_add_entry),
        )
        .route(
            "/api/v1/resume/entries/:section/:id",
            delete(handlers::handle_remove_entry),
        )
        .route(
            "/api/v1/resume/skills/:category",
            post(handlers::handle_add_skill),
        )
        .route(
            "/api/v1/resume/skills/:category/:index",
            delete(handlers::handle_remove_skill),
        )
        .route(
            "/api/v1/resume/suggested-skills",
            post(handlers::handle_suggest_skills),
        )
        .route(
            "/api/v1/resume/projects/:id/tech",
            post(handlers::handle_add_tech_tag),
        )
        .route(
            "/api/v1/resume/projects/:id/tech/:index",
            delete(handlers::handle_remove_tech_tag),
        )
        // Settings
        .route(
            "/api/v1/template",
            get(handlers::handle_get_template).put(handlers::handle_set_template),
        )
        .route(
            "/api/v1/proof",
            get(handlers::handle_get_proof).patch(handlers::handle_update_proof),
        )
        .with_state(state)
}
