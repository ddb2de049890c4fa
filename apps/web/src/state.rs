use std::sync::Arc;

use crate::intake::{BannerTiming, FormController};
use crate::submission_client::Submitter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Delivers accepted applications to the backend. `SubmissionClient` in
    /// production, a fake in tests.
    pub submitter: Arc<dyn Submitter>,
    pub banners: BannerTiming,
}

impl AppState {
    /// A fresh, empty form controller for one page interaction.
    pub fn form_controller(&self) -> FormController {
        FormController::new(Arc::clone(&self.submitter), self.banners)
    }
}
