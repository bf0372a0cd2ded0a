//! Submission controller: one generation round-trip at a time.
//!
//! The controller hands out a [`Submission`] ticket when a request may go
//! out, and later accepts the service's answer for that ticket. Answers for
//! a ticket that is no longer in flight (the owner detached, or a newer
//! request superseded it) are reported as [`SubmissionOutcome::Stale`] and
//! never surface as results.

use std::future::Future;

use tracing::{debug, error, info};

use crate::description::{GenerationRequest, GenerationResult, ServiceResponse};
use crate::error::{Result, TubedescError};
use crate::form::{DescriptionForm, ValidationErrors};

/// Something that can turn a request into a service response.
///
/// Transport failures are returned as `Err`; a response carrying an error
/// field is `Ok(ServiceResponse::Failure { .. })`.
pub trait GenerationService: Send + Sync {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<ServiceResponse>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// A request cleared to go out, tagged with its ticket.
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: Ticket,
    pub request: GenerationRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    /// A request is already in flight.
    Busy,
    /// The form failed validation; nothing was sent.
    Invalid(ValidationErrors),
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Request and description merged into a fresh result.
    Completed(GenerationResult),
    /// The service reported an error or the request never completed.
    Failed(TubedescError),
    /// The answer arrived for a ticket that is no longer in flight.
    Stale,
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    in_flight: Option<Ticket>,
    issued: u64,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Validate the form and, if nothing is in flight, mark the controller
    /// busy and return the request to send.
    pub fn begin(
        &mut self,
        form: &DescriptionForm,
    ) -> std::result::Result<Submission, SubmitRejected> {
        if self.is_busy() {
            debug!("Submission rejected: a request is already in flight");
            return Err(SubmitRejected::Busy);
        }
        let request = form.submit_request().map_err(SubmitRejected::Invalid)?;
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.in_flight = Some(ticket);
        info!(ticket = ticket.0, url = %request.video_url, "Generation started");
        Ok(Submission { ticket, request })
    }

    /// Accept the answer for `submission` and clear the busy flag.
    pub fn finish(
        &mut self,
        submission: Submission,
        response: Result<ServiceResponse>,
    ) -> SubmissionOutcome {
        if self.in_flight != Some(submission.ticket) {
            debug!(ticket = submission.ticket.0, "Ignoring answer for a stale submission");
            return SubmissionOutcome::Stale;
        }
        self.in_flight = None;

        match response {
            Ok(ServiceResponse::Success(description)) => {
                let result = GenerationResult::new(submission.request, description);
                info!(ticket = submission.ticket.0, result = %result.id, "Generation completed");
                SubmissionOutcome::Completed(result)
            }
            Ok(ServiceResponse::Failure { error: message }) => {
                error!(ticket = submission.ticket.0, "Generation service error: {}", message);
                SubmissionOutcome::Failed(TubedescError::Service(message))
            }
            Err(e) => {
                error!(ticket = submission.ticket.0, "Generation request failed: {}", e);
                SubmissionOutcome::Failed(e)
            }
        }
    }

    /// Abandon the in-flight request. Its eventual answer will be stale.
    pub fn detach(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            debug!(ticket = ticket.0, "Detached from in-flight submission");
        }
    }
}
