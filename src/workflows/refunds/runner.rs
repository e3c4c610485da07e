use tracing::{error, info, warn};

use super::decision::{decide, RefundDecision};
use super::parser::RefundRow;
use super::portal::{PortalSubmitter, SubmissionError};
use super::validation::{validate, RequestStatus, ValidationError};

/// Durable record of one successfully submitted decision. Appended to the
/// outcome log exactly once per submission, in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub request_id: String,
    pub decision: RefundDecision,
}

/// Terminal state of one row after the batch loop has seen it.
#[derive(Debug)]
pub enum RowDisposition {
    Submitted(RefundDecision),
    SkippedInvalid(ValidationError),
    SkippedNotPending(RequestStatus),
    SubmissionFailed(SubmissionError),
}

/// Result of a full batch run. The outcome log is owned here and handed to
/// the result writer once, after the portal session has closed.
#[derive(Debug)]
pub struct BatchSummary {
    pub outcomes: Vec<DecisionOutcome>,
    pub dispositions: Vec<RowDisposition>,
}

impl BatchSummary {
    pub fn submitted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn skipped(&self) -> usize {
        self.dispositions
            .iter()
            .filter(|disposition| {
                matches!(
                    disposition,
                    RowDisposition::SkippedInvalid(_) | RowDisposition::SkippedNotPending(_)
                )
            })
            .count()
    }

    pub fn failed(&self) -> usize {
        self.dispositions
            .iter()
            .filter(|disposition| matches!(disposition, RowDisposition::SubmissionFailed(_)))
            .count()
    }
}

/// Drives each row through `Loaded -> Validated -> (Skipped | Decided) ->
/// Submitted | Failed`. A row failure never halts the loop; only session
/// establishment and input loading (handled by the caller) are fatal.
pub(crate) struct RefundBatchRunner<'a> {
    submitter: &'a PortalSubmitter,
}

impl<'a> RefundBatchRunner<'a> {
    pub(crate) fn new(submitter: &'a PortalSubmitter) -> Self {
        Self { submitter }
    }

    pub(crate) fn process(&self, rows: Vec<RefundRow>) -> BatchSummary {
        let mut outcomes = Vec::new();
        let mut dispositions = Vec::with_capacity(rows.len());

        for (index, row) in rows.into_iter().enumerate() {
            let disposition = self.process_row(index + 1, row, &mut outcomes);
            dispositions.push(disposition);
        }

        BatchSummary {
            outcomes,
            dispositions,
        }
    }

    fn process_row(
        &self,
        row_number: usize,
        row: RefundRow,
        outcomes: &mut Vec<DecisionOutcome>,
    ) -> RowDisposition {
        let request = match validate(&row) {
            Ok(request) => request,
            Err(reason) => {
                warn!(
                    row = row_number,
                    request_id = row.request_id.as_deref().unwrap_or("<unknown>"),
                    reason = %reason,
                    "skipping invalid refund row"
                );
                return RowDisposition::SkippedInvalid(reason);
            }
        };

        if request.status != RequestStatus::Pending {
            info!(
                request_id = %request.request_id,
                status = %request.status,
                "skipping refund request (status not pending)"
            );
            return RowDisposition::SkippedNotPending(request.status);
        }

        let decision = decide(request.amount);

        match self.submitter.submit(&request, decision) {
            Ok(()) => {
                info!(
                    request_id = %request.request_id,
                    decision = %decision,
                    "submitted refund decision"
                );
                outcomes.push(DecisionOutcome {
                    request_id: request.request_id,
                    decision,
                });
                RowDisposition::Submitted(decision)
            }
            Err(reason) => {
                error!(
                    request_id = %request.request_id,
                    reason = %reason,
                    "failed to submit refund decision"
                );
                RowDisposition::SubmissionFailed(reason)
            }
        }
    }
}
