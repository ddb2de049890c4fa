pub mod health;
pub mod pages;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(pages::landing))
        // Resumes carry no client-side size limit, so the default 2 MB cap is lifted.
        .route(
            "/signup",
            get(pages::signup_form)
                .post(pages::submit_signup)
                .layer(DefaultBodyLimit::disable()),
        )
        .fallback(pages::not_found)
        .with_state(state)
}
