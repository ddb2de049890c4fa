// Sign-up intake: data model, field validation, and the form controller that
// ties validation to the submission client.

pub mod controller;
pub mod models;
pub mod validation;

pub use controller::{BannerTiming, FormController, FormView, SubmitOutcome};
