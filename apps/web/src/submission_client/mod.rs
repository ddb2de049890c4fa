//! Submission client: the single point where an application leaves this service.
//!
//! Posts one validated application as `multipart/form-data` to `<base>/signup`.
//! One call per submit; no retries, no idempotency key.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::intake::models::{ValidatedSubmission, RESUME_PART};

/// Connect and response timeout for the signup call.
pub const SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);
const SIGNUP_PATH: &str = "signup";

/// Shown when the backend gives no usable error string.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Something went wrong while submitting your application. Please try again.";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Signup rejected (status {status})")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl SubmitError {
    /// Message to display to the applicant: the backend's `error` string when
    /// it sent one, otherwise a generic failure.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Anything that can deliver a validated application to the backend.
///
/// The form controller holds an `Arc<dyn Submitter>`; tests swap in fakes.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, submission: &ValidatedSubmission) -> Result<(), SubmitError>;
}

#[derive(Clone)]
pub struct SubmissionClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl SubmissionClient {
    /// Builds a client for `base_url` with the standard ten second timeout.
    pub fn new(base_url: &str) -> Result<Self, SubmitError> {
        Self::with_timeout(base_url, SUBMIT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let base = base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(SubmitError::InvalidBaseUrl(base_url.to_string()));
        }
        let endpoint = format!("{base}/{SIGNUP_PATH}");
        reqwest::Url::parse(&endpoint)
            .map_err(|_| SubmitError::InvalidBaseUrl(base_url.to_string()))?;

        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Connect and overall deadline applied to every signup call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn build_form(submission: &ValidatedSubmission) -> Result<Form, SubmitError> {
        let form = submission
            .text_parts()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        let resume = submission.resume();
        let part = Part::bytes(resume.data.to_vec())
            .file_name(resume.file_name.clone())
            .mime_str(&resume.content_type)?;

        Ok(form.part(RESUME_PART, part))
    }
}

#[async_trait]
impl Submitter for SubmissionClient {
    async fn submit(&self, submission: &ValidatedSubmission) -> Result<(), SubmitError> {
        let form = Self::build_form(submission)?;

        debug!(
            endpoint = %self.endpoint,
            qualification = submission.qualification().label(),
            job_role = submission.job_role().label(),
            resume_bytes = submission.resume().data.len(),
            "posting application"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("signup request failed: {e}");
                SubmitError::Transport(e)
            })?;

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), "application accepted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.error)
            .ok();
        warn!(
            status = status.as_u16(),
            has_message = message.is_some(),
            "application rejected by backend"
        );

        Err(SubmitError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
