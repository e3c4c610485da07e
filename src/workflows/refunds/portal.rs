use super::decision::RefundDecision;
use super::validation::RefundRequest;
use std::fmt;
use std::fmt::Debug;
use tracing::warn;

/// Addressable fields on the decision form. Identifiers are stable across
/// portal releases; the submit control is the page's lone button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalField {
    RequestId,
    Name,
    Email,
    Amount,
    Decision,
}

impl PortalField {
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::RequestId => "reqId",
            Self::Name => "name",
            Self::Email => "email",
            Self::Amount => "amount",
            Self::Decision => "decision",
        }
    }
}

impl fmt::Display for PortalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PortalOperationError {
    #[error("portal driver failed: {0}")]
    Backend(String),
    #[error("portal runtime unavailable: {0}")]
    Runtime(String),
}

/// Raw surface of the decision portal: one page, five addressable fields,
/// one submit control, and a "UI has settled" signal. Implementations decide
/// what settling means (a fixed delay for the WebDriver client, a no-op for
/// fakes).
pub trait PortalGateway: Debug {
    fn open_portal(&self) -> Result<(), PortalOperationError>;
    fn fill_field(&self, field: PortalField, value: &str) -> Result<(), PortalOperationError>;
    fn select_option(&self, field: PortalField, label: &str) -> Result<(), PortalOperationError>;
    fn press_submit(&self) -> Result<(), PortalOperationError>;
    fn wait_until_settled(&self) -> Result<(), PortalOperationError>;
    fn close_portal(&self) -> Result<(), PortalOperationError>;
}

/// Error raised while replaying one decision into the portal. Recoverable at
/// the row boundary; the batch continues with the next row.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("could not fill portal field '{field}': {source}")]
    Field {
        field: PortalField,
        source: PortalOperationError,
    },
    #[error("could not select decision '{label}': {source}")]
    Select {
        label: &'static str,
        source: PortalOperationError,
    },
    #[error("could not press the submit control: {source}")]
    Submit { source: PortalOperationError },
    #[error("portal did not settle after '{step}' step: {source}")]
    Settle {
        step: &'static str,
        source: PortalOperationError,
    },
}

/// Replays decisions into the portal through a fixed, ordered field sequence.
///
/// The portal renders and validates as fields change, so each step completes
/// (and the page settles) before the next begins. Partially filled forms are
/// not rolled back when a step fails; the at-most-once protocol accepts
/// whatever state the portal was left in.
#[derive(Debug)]
pub struct PortalSubmitter {
    gateway: Box<dyn PortalGateway>,
}

impl PortalSubmitter {
    pub fn new(gateway: Box<dyn PortalGateway>) -> Self {
        Self { gateway }
    }

    pub fn open_session(&self) -> Result<(), PortalOperationError> {
        self.gateway.open_portal()
    }

    /// Closing is best-effort; a close failure cannot affect outcomes that
    /// were already recorded.
    pub fn close_session(&self) {
        if let Err(error) = self.gateway.close_portal() {
            warn!(error = %error, "failed to close portal session");
        }
    }

    pub fn submit(
        &self,
        request: &RefundRequest,
        decision: RefundDecision,
    ) -> Result<(), SubmissionError> {
        self.fill(PortalField::RequestId, &request.request_id)?;
        self.fill(PortalField::Name, &request.customer_name)?;
        self.fill(PortalField::Email, &request.customer_email)?;
        self.fill(PortalField::Amount, &request.amount.to_string())?;

        let label = decision.portal_label();
        self.gateway
            .select_option(PortalField::Decision, label)
            .map_err(|source| SubmissionError::Select { label, source })?;
        self.settle(PortalField::Decision.element_id())?;

        self.gateway
            .press_submit()
            .map_err(|source| SubmissionError::Submit { source })?;
        self.settle("submit")?;

        Ok(())
    }

    fn fill(&self, field: PortalField, value: &str) -> Result<(), SubmissionError> {
        self.gateway
            .fill_field(field, value)
            .map_err(|source| SubmissionError::Field { field, source })?;
        self.settle(field.element_id())
    }

    fn settle(&self, step: &'static str) -> Result<(), SubmissionError> {
        self.gateway
            .wait_until_settled()
            .map_err(|source| SubmissionError::Settle { step, source })
    }
}
