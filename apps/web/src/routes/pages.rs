//! Axum route handlers for the landing and sign-up pages.

use axum::{
    extract::{Multipart, State},
    http::{StatusCode, Uri},
    response::Html,
};
use tracing::debug;

use crate::errors::AppError;
use crate::intake::models::{FormField, ResumeFile, RESUME_PART};
use crate::intake::{FormController, SubmitOutcome};
use crate::render;
use crate::state::AppState;

/// GET /
pub async fn landing() -> Result<Html<String>, AppError> {
    Ok(Html(render::landing_page()?))
}

/// GET /signup
pub async fn signup_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(render::signup_page(&state.form_controller().view())?))
}

/// POST /signup
///
/// Loads the posted form into a fresh controller, runs one submit, and
/// renders the form again with whatever banner the submit produced.
pub async fn submit_signup(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Html<String>), AppError> {
    let controller = state.form_controller();
    load_form(&controller, multipart).await?;

    let status = match controller.submit().await {
        SubmitOutcome::Submitted => StatusCode::OK,
        SubmitOutcome::Rejected(violation) => {
            debug!(%violation, "signup rejected before forwarding");
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SubmitOutcome::Failed(message) => {
            debug!(%message, "signup failed upstream");
            StatusCode::BAD_GATEWAY
        }
        SubmitOutcome::AlreadySubmitting => StatusCode::CONFLICT,
    };

    Ok((status, Html(render::signup_page(&controller.view())?)))
}

/// Fallback for every unknown path.
pub async fn not_found(uri: Uri) -> Result<(StatusCode, Html<String>), AppError> {
    Ok((
        StatusCode::NOT_FOUND,
        Html(render::not_found_page(uri.path())?),
    ))
}

/// Applies every multipart part to the controller, the way keystrokes and the
/// file picker would. Unknown parts (the terms checkbox among them) are skipped.
async fn load_form(
    controller: &FormController,
    mut multipart: Multipart,
) -> Result<(), AppError> {
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == RESUME_PART {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let data = field.bytes().await?;
            // Browsers send an empty, nameless part when no file was picked.
            if file_name.is_empty() && data.is_empty() {
                controller.select_resume(None);
            } else {
                controller.select_resume(Some(ResumeFile::new(file_name, content_type, data)));
            }
        } else if let Some(form_field) = FormField::from_wire_name(&name) {
            controller.set_field(form_field, field.text().await?);
        } else {
            debug!(field = %name, "ignoring unrecognised form part");
        }
    }
    Ok(())
}
