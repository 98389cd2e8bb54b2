use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::notify::Notifier;
use crate::request::{CompositeRequest, SectionPatch, reduce};
use crate::spec::Step;
use crate::step_view::StepView;
use crate::submission::{Relay, SubmissionError, Submitter};
use crate::summary::ResultView;
use crate::validate::FieldErrors;

pub const SUBMITTED_MESSAGE: &str = "Form submitted successfully! 🎉";

/// Where the user currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing(Step),
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),
    #[error("the last step submits instead of advancing")]
    NoNextStep,
    #[error("the first step has no previous step")]
    NoPreviousStep,
    #[error("a submission is in flight")]
    Submitting,
    #[error("the request was already submitted")]
    Completed,
}

/// Why a submit call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    InFlight,
    NotOnLastStep,
    AlreadyCompleted,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Accepted downstream; carries the exact request that was sent.
    Completed(Arc<CompositeRequest>),
    /// Delivery failed; step and request are unchanged.
    Failed(SubmissionError),
    Ignored(SubmitRejection),
}

/// Snapshot handed out by [`FormOrchestrator::begin_submit`]. Holding one
/// means a submission is in flight.
#[derive(Debug)]
pub struct SubmissionTicket {
    request: Arc<CompositeRequest>,
}

impl SubmissionTicket {
    pub fn request(&self) -> &CompositeRequest {
        &self.request
    }
}

/// Owns the composite request and the position in the step sequence.
///
/// Every handler runs to completion on the single owner; the only suspension
/// point is the relay call inside [`FormOrchestrator::submit`], guarded by the
/// `submitting` flag.
pub struct FormOrchestrator<N> {
    current: Step,
    request: Arc<CompositeRequest>,
    submitting: bool,
    completed: bool,
    view: StepView,
    notifier: N,
}

impl<N: Notifier> FormOrchestrator<N> {
    pub fn new(notifier: N) -> Self {
        Self::with_request(CompositeRequest::default(), notifier)
    }

    /// Starts on the first step with a prefilled request.
    pub fn with_request(request: CompositeRequest, notifier: N) -> Self {
        Self {
            current: Step::FIRST,
            request: Arc::new(request),
            submitting: false,
            completed: false,
            view: StepView::new(Step::FIRST),
            notifier,
        }
    }

    pub fn current_step(&self) -> Step {
        self.current
    }

    pub fn phase(&self) -> Phase {
        if self.completed {
            Phase::Completed
        } else {
            Phase::Editing(self.current)
        }
    }

    /// Current snapshot. A new `Arc` is installed on every merge.
    pub fn request(&self) -> &Arc<CompositeRequest> {
        &self.request
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn view(&self) -> &StepView {
        &self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Moves one step forward without validating.
    pub fn advance(&mut self) {
        if let Some(next) = self.current.next() {
            self.enter(next);
        }
    }

    /// Moves one step back without validating.
    pub fn retreat(&mut self) {
        if let Some(previous) = self.current.previous() {
            self.enter(previous);
        }
    }

    fn enter(&mut self, step: Step) {
        debug!(from = self.current.number(), to = step.number(), "step transition");
        self.current = step;
        self.view = StepView::new(step);
    }

    /// Replaces the request with one where `patch` is merged into its section.
    /// Ignored once the request has been submitted.
    pub fn merge_section(&mut self, patch: SectionPatch) {
        if self.completed {
            warn!(section = patch.step().section_key(), "ignoring edit of a submitted request");
            return;
        }
        self.request = Arc::new(reduce(&self.request, patch));
    }

    /// Field edit from the active step view: merge, then clear the errors of
    /// the edited fields.
    pub fn change(&mut self, patch: SectionPatch) {
        if self.completed {
            return;
        }
        self.view.on_change(&patch);
        self.merge_section(patch);
    }

    /// Forward action of steps 1-4: advances only when the step view accepts
    /// its section.
    pub fn next(&mut self) -> Result<Step, StepError> {
        if self.completed {
            return Err(StepError::Completed);
        }
        if !self.view.can_go_forward() {
            return Err(StepError::NoNextStep);
        }
        self.view
            .request_next(&self.request, &self.notifier)
            .map_err(StepError::Invalid)?;
        self.advance();
        Ok(self.current)
    }

    /// Back action; never validates.
    pub fn previous(&mut self) -> Result<Step, StepError> {
        if self.completed {
            return Err(StepError::Completed);
        }
        if self.submitting {
            return Err(StepError::Submitting);
        }
        if !self.view.can_go_back() {
            return Err(StepError::NoPreviousStep);
        }
        self.retreat();
        Ok(self.current)
    }

    /// Claims the single submission slot and snapshots the request.
    pub fn begin_submit(&mut self) -> Result<SubmissionTicket, SubmitRejection> {
        if self.completed {
            return Err(SubmitRejection::AlreadyCompleted);
        }
        if self.submitting {
            debug!("submit ignored: already in flight");
            return Err(SubmitRejection::InFlight);
        }
        if !self.current.is_last() {
            return Err(SubmitRejection::NotOnLastStep);
        }
        self.submitting = true;
        info!("submitting request");
        Ok(SubmissionTicket {
            request: Arc::clone(&self.request),
        })
    }

    /// Releases the submission slot and applies the delivery outcome.
    pub fn finish_submit(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<(), SubmissionError>,
    ) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.completed = true;
                self.request = Arc::clone(&ticket.request);
                self.notifier.success(SUBMITTED_MESSAGE);
                SubmitOutcome::Completed(ticket.request)
            }
            Err(err) => {
                warn!(error = %err, retriable = err.is_retriable(), "submission failed");
                self.notifier.error(&err.user_message());
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Submits the current request through `submitter`.
    pub async fn submit<R: Relay>(&mut self, submitter: &Submitter<R>) -> SubmitOutcome {
        let ticket = match self.begin_submit() {
            Ok(ticket) => ticket,
            Err(rejection) => return SubmitOutcome::Ignored(rejection),
        };
        let result = submitter.submit(ticket.request()).await;
        self.finish_submit(ticket, result)
    }

    /// Success screen for a completed request, `None` while still editing.
    ///
    /// A link that fails to compose is logged and left out; the request has
    /// already been accepted.
    pub fn result_view<R: Relay>(&self, submitter: &Submitter<R>) -> Option<ResultView> {
        if !self.completed {
            return None;
        }
        let link = submitter
            .messaging_link(&self.request)
            .inspect_err(|err| warn!(error = %err, "messaging link unavailable"))
            .ok();
        Some(ResultView::new(&self.request, link))
    }
}
