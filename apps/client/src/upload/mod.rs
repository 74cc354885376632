//! Upload/Analysis State Machine: orchestrates selector → encoder →
//! gateway → normalizer for the résumé upload screen.
//!
//! Transitions:
//! - pick (success): any state except `Submitting` → `FileSelected`
//! - pick (cancelled): no transition
//! - submit: `FileSelected` / `Failed` → `Submitting`; anything else is rejected
//! - gateway success: `Submitting` → `Analyzed`
//! - gateway failure: `Submitting` → `Failed` (document kept; resubmit only
//!   when the failure was transport-level)
//! - encode failure or abandoned submit future: `Submitting` → `FileSelected`
//!
//! `Submitting` is the mutual exclusion: at most one request is in flight per
//! session, and a pick while submitting is rejected.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::encoder::encode;
use crate::errors::{UploadError, SELECT_FILE_FIRST_MESSAGE};
use crate::gateway::ScoringGateway;
use crate::models::{CandidateRecord, LocalDocument, MatchContext};
use crate::normalizer::normalize;
use crate::selector::{DocumentPicker, PickOutcome};

pub mod state;

pub use state::{Failure, UploadPhase, UploadState};

pub struct UploadSession {
    picker: Arc<dyn DocumentPicker>,
    gateway: Arc<dyn ScoringGateway>,
    state: watch::Sender<UploadState>,
}

impl UploadSession {
    pub fn new(picker: Arc<dyn DocumentPicker>, gateway: Arc<dyn ScoringGateway>) -> Self {
        let (state, _) = watch::channel(UploadState::Idle);
        Self {
            picker,
            gateway,
            state,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> UploadState {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> UploadPhase {
        self.state.borrow().phase()
    }

    /// Receiver notified on every transition.
    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.state.subscribe()
    }

    /// Opens the chooser. A successful pick replaces whatever was selected,
    /// analysed or failed before.
    pub async fn pick_document(&self) -> Result<PickOutcome, UploadError> {
        if self.phase() == UploadPhase::Submitting {
            warn!("pick rejected: submission in flight");
            return Err(UploadError::SubmissionInFlight);
        }

        let document = match self.picker.pick().await {
            Ok(PickOutcome::Picked(document)) => document,
            Ok(PickOutcome::Cancelled) => {
                debug!(phase = %self.phase(), "chooser dismissed; state unchanged");
                return Ok(PickOutcome::Cancelled);
            }
            Err(e) => {
                warn!(error = %e, "document selection failed");
                return Err(e.into());
            }
        };

        // A submit may have started while the chooser was open.
        let mut rejected = false;
        self.state.send_if_modified(|state| {
            if state.is_busy() {
                rejected = true;
                return false;
            }
            *state = UploadState::FileSelected {
                document: document.clone(),
            };
            true
        });
        if rejected {
            warn!(file = document.name(), "pick rejected: submission in flight");
            return Err(UploadError::SubmissionInFlight);
        }

        info!(file = document.name(), "document selected");
        Ok(PickOutcome::Picked(document))
    }

    /// Sends the selected document for analysis. From a retryable `Failed`
    /// this resends the same document.
    ///
    /// Dropping the returned future before it completes puts the session
    /// back to `FileSelected`.
    pub async fn submit(&self, context: &MatchContext) -> Result<CandidateRecord, UploadError> {
        let submission_id = Uuid::new_v4();

        let mut claim = Err(UploadError::Validation(SELECT_FILE_FIRST_MESSAGE.to_string()));
        self.state.send_if_modified(|state| {
            if state.is_busy() {
                claim = Err(UploadError::SubmissionInFlight);
                return false;
            }
            if !state.can_submit() {
                return false;
            }
            let Some(document) = state.document().cloned() else {
                return false;
            };
            *state = UploadState::Submitting {
                document: document.clone(),
                submission_id,
            };
            claim = Ok(document);
            true
        });

        let document = match claim {
            Ok(document) => document,
            Err(e) => {
                info!(code = e.code(), phase = %self.phase(), "submit rejected");
                return Err(e);
            }
        };

        let span = info_span!("submission", %submission_id, file = document.name());
        let in_flight = InFlight {
            state: &self.state,
            submission_id,
            document: Some(document.clone()),
        };
        self.run_submission(in_flight, document, context)
            .instrument(span)
            .await
    }

    async fn run_submission(
        &self,
        in_flight: InFlight<'_>,
        document: LocalDocument,
        context: &MatchContext,
    ) -> Result<CandidateRecord, UploadError> {
        info!(skills = context.target_skills.len(), "submission started");

        let payload = match encode(&document, context) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "payload encoding failed");
                in_flight.finish(UploadState::FileSelected { document });
                return Err(e.into());
            }
        };

        match self.gateway.submit(payload).await {
            Ok(analysis) => {
                let record = normalize(&analysis);
                info!(match_pct = ?record.match_percentage(), "analysis completed");
                in_flight.finish(UploadState::Analyzed {
                    file_name: document.name().to_string(),
                    record: record.clone(),
                    analyzed_at: Utc::now(),
                });
                Ok(record)
            }
            Err(e) => {
                let retryable = e.is_retryable();
                warn!(error = %e, cause = ?e, retryable, "analysis request failed");
                in_flight.finish(UploadState::Failed {
                    document,
                    failure: Failure {
                        message: e.user_message().to_string(),
                        cause: e.to_string(),
                        retryable,
                    },
                });
                Err(e.into())
            }
        }
    }
}

/// Owns the `Submitting` state of one submission. If it is dropped before
/// `finish`, the session goes back to `FileSelected` with the same document.
struct InFlight<'a> {
    state: &'a watch::Sender<UploadState>,
    submission_id: Uuid,
    document: Option<LocalDocument>,
}

impl InFlight<'_> {
    fn finish(mut self, next: UploadState) {
        self.document = None;
        self.state.send_replace(next);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let Some(document) = self.document.take() else {
            return;
        };
        let submission_id = self.submission_id;
        let reverted = self.state.send_if_modified(|state| match state {
            UploadState::Submitting {
                submission_id: current,
                ..
            } if *current == submission_id => {
                *state = UploadState::FileSelected { document };
                true
            }
            _ => false,
        });
        if reverted {
            warn!(%submission_id, "submission abandoned before completion");
        }
    }
}
