//! Form controller: transient sign-up form state and the submit pipeline.
//!
//! Phases: Idle → Validating → Submitting → (Success | Failed) → Idle.
//! Banners clear themselves on a timer; the form stays editable throughout.
//! State sits behind a mutex that is never held across the network await.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::intake::models::{ApplicationSubmission, FormField, ResumeFile};
use crate::intake::validation::{validate, Violation};
use crate::submission_client::Submitter;

pub const SUCCESS_MESSAGE: &str = "Your profile has been registered";
const INITIAL_EXPERIENCE: &str = "0";

/// How long each kind of banner stays up before clearing itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerTiming {
    pub success: Duration,
    pub validation_error: Duration,
    pub submission_error: Duration,
}

impl Default for BannerTiming {
    fn default() -> Self {
        Self {
            success: Duration::from_millis(3000),
            validation_error: Duration::from_millis(2000),
            submission_error: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

impl Banner {
    pub fn message(&self) -> &str {
        match self {
            Banner::Success(message) | Banner::Error(message) => message,
        }
    }
}

/// Result of one submit intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A previous submission is still in flight; nothing was done.
    AlreadySubmitting,
    /// Validation failed; no network call was made.
    Rejected(Violation),
    Submitted,
    /// The backend or transport failed; carries the displayed message.
    Failed(String),
}

/// Snapshot of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub values: ApplicationSubmission,
    pub resume_file_name: Option<String>,
    pub phase: Phase,
    pub banner: Option<Banner>,
    /// Configured lifetime of the current banner.
    pub banner_lifetime: Option<Duration>,
}

impl FormView {
    pub fn uploading(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn value(&self, field: FormField) -> &str {
        self.values.field(field)
    }
}

#[derive(Debug)]
struct FormState {
    values: ApplicationSubmission,
    phase: Phase,
    banner: Option<Banner>,
    banner_lifetime: Option<Duration>,
    /// Bumped on every new banner so a stale timer never clears a newer one.
    banner_generation: u64,
}

impl FormState {
    fn new() -> Self {
        let mut values = ApplicationSubmission::default();
        values.experience = INITIAL_EXPERIENCE.to_string();
        Self {
            values,
            phase: Phase::Idle,
            banner: None,
            banner_lifetime: None,
            banner_generation: 0,
        }
    }

    fn show(&mut self, phase: Phase, banner: Banner, lifetime: Duration) -> u64 {
        self.phase = phase;
        self.banner = Some(banner);
        self.banner_lifetime = Some(lifetime);
        self.banner_generation += 1;
        self.banner_generation
    }
}

/// Puts the form back to Idle if a submit is dropped mid-post.
struct InFlight {
    state: Arc<Mutex<FormState>>,
    armed: bool,
}

impl InFlight {
    fn new(state: &Arc<Mutex<FormState>>) -> Self {
        Self {
            state: Arc::clone(state),
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.phase == Phase::Submitting {
            debug!("submit cancelled mid-flight; form returned to idle");
            state.phase = Phase::Idle;
        }
    }
}

#[derive(Clone)]
pub struct FormController {
    submitter: Arc<dyn Submitter>,
    timing: BannerTiming,
    state: Arc<Mutex<FormState>>,
}

impl FormController {
    pub fn new(submitter: Arc<dyn Submitter>, timing: BannerTiming) -> Self {
        Self {
            submitter,
            timing,
            state: Arc::new(Mutex::new(FormState::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        *self.lock().values.field_mut(field) = value.into();
    }

    pub fn select_resume(&self, resume: Option<ResumeFile>) {
        self.lock().values.resume = resume;
    }

    pub fn view(&self) -> FormView {
        let state = self.lock();
        FormView {
            values: ApplicationSubmission {
                resume: None,
                ..state.values.clone()
            },
            resume_file_name: state.values.resume.as_ref().map(|r| r.file_name.clone()),
            phase: state.phase,
            banner: state.banner.clone(),
            banner_lifetime: state.banner_lifetime,
        }
    }

    /// Runs one submit intent: validate, then post if valid.
    ///
    /// A second call while the first is still posting returns
    /// [`SubmitOutcome::AlreadySubmitting`] without touching the network.
    pub async fn submit(&self) -> SubmitOutcome {
        let submission = {
            let mut state = self.lock();
            if state.phase == Phase::Submitting {
                debug!("submit ignored: upload already in progress");
                return SubmitOutcome::AlreadySubmitting;
            }

            state.phase = Phase::Validating;
            let candidate = state.values.clone();
            match validate(&candidate) {
                Ok(submission) => {
                    state.phase = Phase::Submitting;
                    submission
                }
                Err(violation) => {
                    info!(field = violation.subject.wire_name(), "validation failed");
                    let generation = state.show(
                        Phase::Failed,
                        Banner::Error(violation.message.to_string()),
                        self.timing.validation_error,
                    );
                    drop(state);
                    self.schedule_clear(generation, self.timing.validation_error);
                    return SubmitOutcome::Rejected(violation);
                }
            }
        };

        let in_flight = InFlight::new(&self.state);
        let result = self.submitter.submit(&submission).await;
        in_flight.disarm();

        let mut state = self.lock();
        match result {
            Ok(()) => {
                info!("application submitted");
                state.values = ApplicationSubmission::default();
                let generation = state.show(
                    Phase::Success,
                    Banner::Success(SUCCESS_MESSAGE.to_string()),
                    self.timing.success,
                );
                drop(state);
                self.schedule_clear(generation, self.timing.success);
                SubmitOutcome::Submitted
            }
            Err(err) => {
                warn!("application submission failed: {err}");
                let message = err.user_message();
                let generation = state.show(
                    Phase::Failed,
                    Banner::Error(message.clone()),
                    self.timing.submission_error,
                );
                drop(state);
                self.schedule_clear(generation, self.timing.submission_error);
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn schedule_clear(&self, generation: u64, after: Duration) {
        let shared = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
            if state.banner_generation != generation {
                return;
            }
            state.banner = None;
            state.banner_lifetime = None;
            if state.phase != Phase::Submitting {
                state.phase = Phase::Idle;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::intake::models::{ValidatedSubmission, PDF_MIME};
    use crate::intake::validation::Subject;
    use crate::submission_client::SubmitError;

    enum Reply {
        Accept,
        Reject(&'static str),
        NoMessage,
    }

    struct FakeSubmitter {
        calls: AtomicUsize,
        reply: Reply,
        gate: Option<Arc<Notify>>,
    }

    impl FakeSubmitter {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply,
                gate: None,
            })
        }

        fn gated(reply: Reply, gate: Arc<Notify>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply,
                gate: Some(gate),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Submitter for FakeSubmitter {
        async fn submit(&self, _submission: &ValidatedSubmission) -> Result<(), SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match self.reply {
                Reply::Accept => Ok(()),
                Reply::Reject(message) => Err(SubmitError::Rejected {
                    status: 409,
                    message: Some(message.to_string()),
                }),
                Reply::NoMessage => Err(SubmitError::Rejected {
                    status: 502,
                    message: None,
                }),
            }
        }
    }

    fn controller_with(reply: Reply) -> (FormController, Arc<FakeSubmitter>) {
        let fake = FakeSubmitter::new(reply);
        let controller = FormController::new(fake.clone(), BannerTiming::default());
        (controller, fake)
    }

    fn fill_valid(controller: &FormController) {
        controller.set_field(FormField::Name, "Meera Nair");
        controller.set_field(FormField::Email, "meera@example.com");
        controller.set_field(FormField::Phone, "9988776655");
        controller.set_field(FormField::HighestQualification, "PhD");
        controller.set_field(FormField::DesiredJobRole, "UI/UX Designer");
        controller.set_field(FormField::Experience, "7");
        controller.set_field(FormField::ExpectedCtc, "2500000");
        controller.set_field(FormField::Address, "Kochi");
        controller.select_resume(Some(ResumeFile::new(
            "meera.pdf",
            PDF_MIME,
            b"%PDF".to_vec(),
        )));
    }

    #[tokio::test]
    async fn test_starts_idle_with_default_experience() {
        let (controller, _) = controller_with(Reply::Accept);
        let view = controller.view();
        assert_eq!(view.phase, Phase::Idle);
        assert_eq!(view.banner, None);
        assert_eq!(view.value(FormField::Experience), "0");
        assert!(!view.uploading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_field_never_reaches_the_network() {
        let (controller, fake) = controller_with(Reply::Accept);
        fill_valid(&controller);
        controller.set_field(FormField::Email, "");

        let outcome = controller.submit().await;
        match outcome {
            SubmitOutcome::Rejected(v) => assert_eq!(v.subject, Subject::Field(FormField::Email)),
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(fake.calls(), 0);

        let view = controller.view();
        assert_eq!(view.phase, Phase::Failed);
        assert_eq!(view.banner, Some(Banner::Error("Email is required".to_string())));
        assert_eq!(view.value(FormField::Name), "Meera Nair", "values kept on failure");
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_banner_clears_after_two_seconds() {
        let (controller, _) = controller_with(Reply::Accept);
        controller.submit().await;
        assert!(controller.view().banner.is_some());

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(controller.view().banner.is_some());

        tokio::time::sleep(Duration::from_millis(2)).await;
        let view = controller.view();
        assert_eq!(view.banner, None);
        assert_eq!(view.phase, Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_clears_form_and_banner_expires() {
        let (controller, fake) = controller_with(Reply::Accept);
        fill_valid(&controller);

        assert_eq!(controller.submit().await, SubmitOutcome::Submitted);
        assert_eq!(fake.calls(), 1);

        let view = controller.view();
        assert_eq!(view.phase, Phase::Success);
        assert_eq!(view.banner, Some(Banner::Success(SUCCESS_MESSAGE.to_string())));
        assert_eq!(view.values, ApplicationSubmission::default());
        assert_eq!(view.resume_file_name, None);

        tokio::time::sleep(Duration::from_millis(3001)).await;
        let view = controller.view();
        assert_eq!(view.banner, None);
        assert_eq!(view.phase, Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_error_message_is_displayed_verbatim() {
        let (controller, _) = controller_with(Reply::Reject("Email already registered"));
        fill_valid(&controller);

        let outcome = controller.submit().await;
        assert_eq!(outcome, SubmitOutcome::Failed("Email already registered".to_string()));

        let view = controller.view();
        assert_eq!(
            view.banner.as_ref().map(Banner::message),
            Some("Email already registered")
        );
        assert_eq!(view.phase, Phase::Failed);
        assert_eq!(view.value(FormField::Email), "meera@example.com");
        assert_eq!(view.resume_file_name.as_deref(), Some("meera.pdf"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_server_message_falls_back_to_generic() {
        let (controller, _) = controller_with(Reply::NoMessage);
        fill_valid(&controller);

        let outcome = controller.submit().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed(crate::submission_client::GENERIC_FAILURE_MESSAGE.to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_error_banner_uses_its_own_duration() {
        let timing = BannerTiming {
            submission_error: Duration::from_millis(5000),
            ..BannerTiming::default()
        };
        let controller = FormController::new(FakeSubmitter::new(Reply::Reject("nope")), timing);
        fill_valid(&controller);
        controller.submit().await;

        tokio::time::sleep(Duration::from_millis(4000)).await;
        assert!(controller.view().banner.is_some());
        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert_eq!(controller.view().banner, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_does_not_clear_newer_banner() {
        let (controller, _) = controller_with(Reply::Accept);
        controller.submit().await;

        tokio::time::sleep(Duration::from_millis(1500)).await;
        controller.set_field(FormField::Name, "x".repeat(25));
        controller.submit().await;

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(
            controller.view().banner,
            Some(Banner::Error("Name length should be less than 20".to_string()))
        );

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(controller.view().banner, None);
    }

    #[tokio::test]
    async fn test_second_submit_while_uploading_is_ignored() {
        let gate = Arc::new(Notify::new());
        let fake = FakeSubmitter::gated(Reply::Accept, gate.clone());
        let controller = FormController::new(fake.clone(), BannerTiming::default());
        fill_valid(&controller);

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit().await })
        };
        while fake.calls() == 0 {
            tokio::task::yield_now().await;
        }
        assert!(controller.view().uploading());

        assert_eq!(controller.submit().await, SubmitOutcome::AlreadySubmitting);
        assert_eq!(controller.submit().await, SubmitOutcome::AlreadySubmitting);

        gate.notify_one();
        assert_eq!(first.await.unwrap(), SubmitOutcome::Submitted);
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_submit_does_not_block_the_next_one() {
        let gate = Arc::new(Notify::new());
        let fake = FakeSubmitter::gated(Reply::Accept, gate.clone());
        let controller = FormController::new(fake.clone(), BannerTiming::default());
        fill_valid(&controller);

        let cancelled =
            tokio::time::timeout(Duration::from_millis(10), controller.submit()).await;
        assert!(cancelled.is_err());
        let view = controller.view();
        assert_eq!(view.phase, Phase::Idle);
        assert_eq!(view.value(FormField::Name), "Meera Nair");

        gate.notify_one();
        assert_eq!(controller.submit().await, SubmitOutcome::Submitted);
        assert_eq!(fake.calls(), 2);
    }

    #[tokio::test]
    async fn test_form_stays_editable_while_banner_shown() {
        let (controller, _) = controller_with(Reply::Accept);
        controller.submit().await;
        controller.set_field(FormField::Name, "Anil");
        let view = controller.view();
        assert_eq!(view.value(FormField::Name), "Anil");
        assert!(view.banner.is_some());
    }
}
