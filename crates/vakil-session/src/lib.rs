//! Draft session controller.
//!
//! Owns the idle → collecting → generating → viewing lifecycle around one
//! user's drafting session. At most one generation call is in flight at a
//! time, enforced structurally by the phase machine rather than by a
//! lock, and a response is applied only if it belongs to the most recent
//! attempt of the current session.

use thiserror::Error;
use tracing::{debug, info, warn};
use vakil_ai::{DraftEngine, GenerateError};
use vakil_core::{DraftRequest, Language, UserProfile};
use vakil_wizard::{Step, StepErrors, WizardState};

/// Observable session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Wizard active; input is editable.
    Collecting,
    /// A generation call is outstanding.
    Generating,
    /// A document is ready for review.
    Viewing,
    /// The last attempt errored; the wizard is back at review with all
    /// input preserved.
    Failed,
}

enum State {
    Idle,
    Collecting {
        wizard: WizardState,
    },
    Generating {
        wizard: WizardState,
    },
    Viewing {
        document: String,
    },
    Failed {
        wizard: WizardState,
        error: String,
    },
}

/// Handle for one in-flight generation attempt.
///
/// Carries the frozen request out of the session and is identity-checked
/// on completion, so a response from a superseded attempt can never be
/// applied to a session that has moved on.
#[derive(Debug)]
pub struct Ticket {
    attempt: u64,
    pub request: DraftRequest,
    pub language: Language,
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// Single-flight guarantee: a second submission while one is
    /// outstanding is rejected, not queued.
    #[error("a generation attempt is already in flight")]
    AlreadyGenerating,
    #[error("no draft is being collected")]
    NotCollecting,
    /// Submission is only offered at the review step; anything else is
    /// caller drift.
    #[error("the wizard is not at the review step")]
    NotAtReview,
    #[error(transparent)]
    Invalid(#[from] StepErrors),
}

/// One user's drafting session.
pub struct Session {
    state: State,
    language: Language,
    attempt: u64,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            state: State::Idle,
            language,
            attempt: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        match &self.state {
            State::Idle => Phase::Idle,
            State::Collecting { .. } => Phase::Collecting,
            State::Generating { .. } => Phase::Generating,
            State::Viewing { .. } => Phase::Viewing,
            State::Failed { .. } => Phase::Failed,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Begin collecting a fresh draft.
    pub fn start(&mut self) {
        self.start_with(WizardState::new());
    }

    /// Begin collecting with step 1/2 pre-seeded from a saved profile.
    pub fn start_prefilled(&mut self, profile: &UserProfile) {
        self.start_with(WizardState::prefilled(profile));
    }

    /// Begin collecting with an existing wizard, e.g. a resumed draft.
    ///
    /// Ignored unless the session is idle; an active session is never
    /// silently replaced.
    pub fn start_with(&mut self, wizard: WizardState) {
        if !matches!(self.state, State::Idle) {
            warn!(phase = ?self.phase(), "start ignored: session already active");
            return;
        }
        info!("session collecting");
        self.state = State::Collecting { wizard };
    }

    /// The active wizard, while input is editable (collecting, or after a
    /// failed attempt).
    pub fn wizard(&self) -> Option<&WizardState> {
        match &self.state {
            State::Collecting { wizard } | State::Failed { wizard, .. } => Some(wizard),
            _ => None,
        }
    }

    pub fn wizard_mut(&mut self) -> Option<&mut WizardState> {
        match &mut self.state {
            State::Collecting { wizard } | State::Failed { wizard, .. } => Some(wizard),
            _ => None,
        }
    }

    /// The generated document, once viewing.
    pub fn document(&self) -> Option<&str> {
        match &self.state {
            State::Viewing { document } => Some(document),
            _ => None,
        }
    }

    /// Human-readable cause of the last failed attempt.
    pub fn last_error(&self) -> Option<&str> {
        match &self.state {
            State::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Submit the wizard and open a generation attempt.
    ///
    /// On success the session transitions to [`Phase::Generating`] and
    /// the returned [`Ticket`] carries the frozen request; hand it back
    /// via [`complete_generation`](Self::complete_generation). Validation
    /// failures reposition the wizard and leave the session collecting.
    pub fn begin_generation(&mut self) -> Result<Ticket, SessionError> {
        let mut wizard = match std::mem::replace(&mut self.state, State::Idle) {
            State::Collecting { wizard } | State::Failed { wizard, .. } => wizard,
            generating @ State::Generating { .. } => {
                self.state = generating;
                return Err(SessionError::AlreadyGenerating);
            }
            other => {
                self.state = other;
                return Err(SessionError::NotCollecting);
            }
        };

        if wizard.step() != Step::Review {
            self.state = State::Collecting { wizard };
            return Err(SessionError::NotAtReview);
        }

        match wizard.submit() {
            Ok(request) => {
                self.attempt += 1;
                info!(attempt = self.attempt, category = %request.petition_type, "generation started");
                self.state = State::Generating { wizard };
                Ok(Ticket {
                    attempt: self.attempt,
                    request,
                    language: self.language,
                })
            }
            Err(errors) => {
                debug!(step = %errors.step, "submission rejected; still collecting");
                self.state = State::Collecting { wizard };
                Err(SessionError::Invalid(errors))
            }
        }
    }

    /// Apply the outcome of a generation attempt.
    ///
    /// A result whose ticket does not match the session's most recent
    /// attempt, or that arrives after a reset, is discarded: stale
    /// responses never overwrite a session that has moved on. On failure
    /// the wizard returns at the review step with all input preserved.
    pub fn complete_generation(
        &mut self,
        ticket: Ticket,
        outcome: Result<String, GenerateError>,
    ) {
        if ticket.attempt != self.attempt || !matches!(self.state, State::Generating { .. }) {
            debug!(
                ticket = ticket.attempt,
                attempt = self.attempt,
                "stale generation result discarded"
            );
            return;
        }
        let wizard = match std::mem::replace(&mut self.state, State::Idle) {
            State::Generating { wizard } => wizard,
            _ => return, // checked above
        };
        match outcome {
            Ok(document) => {
                info!(attempt = ticket.attempt, chars = document.len(), "draft ready");
                self.state = State::Viewing { document };
            }
            Err(err) => {
                warn!(attempt = ticket.attempt, error = %err, "generation failed; input preserved");
                self.state = State::Failed {
                    wizard,
                    error: err.to_string(),
                };
            }
        }
    }

    /// Drive one full generation round trip against `engine`.
    ///
    /// Pre-flight problems (validation, single-flight, phase) surface as
    /// errors. An engine failure is not propagated: it settles the
    /// session into [`Phase::Failed`] with input preserved, per the
    /// recovery policy. Inspect [`document`](Self::document) or
    /// [`last_error`](Self::last_error) for the outcome.
    pub async fn generate<E: DraftEngine>(&mut self, engine: &E) -> Result<(), SessionError> {
        let ticket = self.begin_generation()?;
        let outcome = engine.generate(&ticket.request, ticket.language).await;
        self.complete_generation(ticket, outcome);
        Ok(())
    }

    /// Abandon the session and return to idle.
    ///
    /// Bumps the attempt counter so a response from a still-outstanding
    /// call is discarded when it lands.
    pub fn reset(&mut self) {
        info!("session reset");
        self.attempt += 1;
        self.state = State::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vakil_core::PetitionCategory;

    const DOCUMENT: &str =
        "## IN THE COURT OF SESSIONS, DWARKA\n\n**MOST RESPECTFULLY SHOWETH:**\n\n1. ...";

    struct OkEngine;

    impl DraftEngine for OkEngine {
        async fn generate(
            &self,
            _request: &DraftRequest,
            _language: Language,
        ) -> Result<String, GenerateError> {
            Ok(DOCUMENT.to_string())
        }
    }

    struct DownEngine;

    impl DraftEngine for DownEngine {
        async fn generate(
            &self,
            _request: &DraftRequest,
            _language: Language,
        ) -> Result<String, GenerateError> {
            Err(GenerateError::Rejected)
        }
    }

    fn wizard_at_review() -> WizardState {
        let mut w = WizardState::new();
        w.update_petitioner("name", "Rajesh Kumar Sharma").unwrap();
        w.update_petitioner("age", "35").unwrap();
        w.update_petitioner("address", "H-42, Sector 12, Dwarka, New Delhi")
            .unwrap();
        w.update_respondent("name", "The State").unwrap();
        w.update_respondent("address", "NCT of Delhi").unwrap();
        w.advance().unwrap();
        w.set_category(PetitionCategory::Criminal);
        w.update_jurisdiction("territorial", "Court of Sessions, Dwarka")
            .unwrap();
        w.update_jurisdiction("pecuniary", "N/A").unwrap();
        w.update_category_field("firNumber", "FIR No. 234/2025").unwrap();
        w.update_category_field("policeStation", "PS Dwarka North").unwrap();
        w.advance().unwrap();
        w.set_cause_of_action("The petitioner was falsely implicated...");
        w.advance().unwrap();
        w
    }

    fn session_at_review() -> Session {
        let mut session = Session::new(Language::En);
        session.start_with(wizard_at_review());
        session
    }

    #[test]
    fn idle_until_started() {
        let mut session = Session::new(Language::En);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.wizard().is_none());
        session.start();
        assert_eq!(session.phase(), Phase::Collecting);
        assert!(session.wizard().is_some());
    }

    #[test]
    fn start_never_replaces_an_active_session() {
        let mut session = session_at_review();
        session.start();
        assert_eq!(
            session.wizard().unwrap().draft().petitioner.name,
            "Rajesh Kumar Sharma"
        );
    }

    #[test]
    fn begin_requires_an_active_wizard() {
        let mut session = Session::new(Language::En);
        assert!(matches!(
            session.begin_generation(),
            Err(SessionError::NotCollecting)
        ));
    }

    #[test]
    fn begin_requires_the_review_step() {
        let mut session = Session::new(Language::En);
        session.start();
        assert!(matches!(
            session.begin_generation(),
            Err(SessionError::NotAtReview)
        ));
        assert_eq!(session.phase(), Phase::Collecting);
    }

    #[test]
    fn invalid_submission_stays_collecting() {
        let mut session = session_at_review();
        session
            .wizard_mut()
            .unwrap()
            .update_petitioner("name", "")
            .unwrap();

        let err = session.begin_generation().unwrap_err();
        assert!(matches!(err, SessionError::Invalid(_)));
        assert_eq!(session.phase(), Phase::Collecting);
        // Wizard repositioned at the first invalid section.
        assert_eq!(session.wizard().unwrap().step(), Step::Parties);
    }

    #[test]
    fn one_generation_in_flight_at_a_time() {
        let mut session = session_at_review();
        let ticket = session.begin_generation().unwrap();
        assert_eq!(session.phase(), Phase::Generating);

        assert!(matches!(
            session.begin_generation(),
            Err(SessionError::AlreadyGenerating)
        ));

        session.complete_generation(ticket, Ok(DOCUMENT.to_string()));
        assert_eq!(session.phase(), Phase::Viewing);
    }

    #[test]
    fn success_moves_to_viewing() {
        let mut session = session_at_review();
        let ticket = session.begin_generation().unwrap();
        assert_eq!(ticket.request.petition_type, PetitionCategory::Criminal);

        session.complete_generation(ticket, Ok(DOCUMENT.to_string()));
        assert_eq!(session.document(), Some(DOCUMENT));
        assert!(session.wizard().is_none());
    }

    #[test]
    fn failure_preserves_entered_input() {
        let mut session = session_at_review();
        let ticket = session.begin_generation().unwrap();
        session.complete_generation(ticket, Err(GenerateError::Rejected));

        assert_eq!(session.phase(), Phase::Failed);
        assert!(session.last_error().is_some());
        let wizard = session.wizard().unwrap();
        assert_eq!(wizard.step(), Step::Review);
        assert_eq!(wizard.draft().petitioner.name, "Rajesh Kumar Sharma");
        assert_eq!(wizard.draft().jurisdiction.territorial, "Court of Sessions, Dwarka");
        assert_eq!(
            wizard.draft().cause_of_action,
            "The petitioner was falsely implicated..."
        );
    }

    #[test]
    fn failed_session_can_resubmit() {
        let mut session = session_at_review();
        let ticket = session.begin_generation().unwrap();
        session.complete_generation(ticket, Err(GenerateError::Rejected));

        let ticket = session.begin_generation().unwrap();
        assert_eq!(session.phase(), Phase::Generating);
        session.complete_generation(ticket, Ok(DOCUMENT.to_string()));
        assert_eq!(session.phase(), Phase::Viewing);
    }

    #[test]
    fn stale_result_is_discarded_after_reset() {
        let mut session = session_at_review();
        let ticket = session.begin_generation().unwrap();

        session.reset();
        session.complete_generation(ticket, Ok(DOCUMENT.to_string()));

        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.document().is_none());
    }

    #[test]
    fn superseded_attempt_cannot_overwrite_the_current_one() {
        let mut session = session_at_review();
        let stale = session.begin_generation().unwrap();
        session.reset();

        session.start_with(wizard_at_review());
        let current = session.begin_generation().unwrap();

        session.complete_generation(stale, Ok("stale document".to_string()));
        assert_eq!(session.phase(), Phase::Generating);

        session.complete_generation(current, Ok(DOCUMENT.to_string()));
        assert_eq!(session.document(), Some(DOCUMENT));
    }

    #[test]
    fn reset_returns_to_idle_from_viewing() {
        let mut session = session_at_review();
        let ticket = session.begin_generation().unwrap();
        session.complete_generation(ticket, Ok(DOCUMENT.to_string()));
        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn generate_round_trip_success() {
        let mut session = session_at_review();
        session.generate(&OkEngine).await.unwrap();
        assert_eq!(session.document(), Some(DOCUMENT));
    }

    #[tokio::test]
    async fn generate_round_trip_failure_settles_into_failed() {
        let mut session = session_at_review();
        session.generate(&DownEngine).await.unwrap();
        assert_eq!(session.phase(), Phase::Failed);
        assert_eq!(
            session.wizard().unwrap().draft().petitioner.name,
            "Rajesh Kumar Sharma"
        );
    }

    #[tokio::test]
    async fn generate_surfaces_validation_errors() {
        let mut session = session_at_review();
        session
            .wizard_mut()
            .unwrap()
            .set_cause_of_action("");
        let err = session.generate(&OkEngine).await.unwrap_err();
        assert!(matches!(err, SessionError::Invalid(_)));
        assert_eq!(session.phase(), Phase::Collecting);
    }
}
