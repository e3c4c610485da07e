//! Refund decision replay: load a refund batch, decide each pending request,
//! and replay the decisions into the operations portal.

mod decision;
mod parser;
mod results;
mod runner;
mod validation;

pub mod portal;
pub mod webdriver;

pub use decision::{decide, RefundDecision};
pub use parser::RefundRow;
pub use results::{save_to_path, write_results, ResultsError};
pub use runner::{BatchSummary, DecisionOutcome, RowDisposition};
pub use validation::{validate, RefundRequest, RequestStatus, ValidationError};

use portal::{PortalGateway, PortalOperationError, PortalSubmitter};
use runner::RefundBatchRunner;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum RefundRunError {
    Input(std::io::Error),
    Csv(csv::Error),
    Session(PortalOperationError),
}

impl std::fmt::Display for RefundRunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefundRunError::Input(err) => write!(f, "failed to read refund batch: {}", err),
            RefundRunError::Csv(err) => write!(f, "invalid refund batch data: {}", err),
            RefundRunError::Session(err) => {
                write!(f, "could not establish a portal session: {}", err)
            }
        }
    }
}

impl std::error::Error for RefundRunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RefundRunError::Input(err) => Some(err),
            RefundRunError::Csv(err) => Some(err),
            RefundRunError::Session(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RefundRunError {
    fn from(err: std::io::Error) -> Self {
        Self::Input(err)
    }
}

impl From<csv::Error> for RefundRunError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads the whole batch before any portal session is established; an
/// unreadable input halts the run with no session created.
pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<Vec<RefundRow>, RefundRunError> {
    let file = std::fs::File::open(path)?;
    load_rows_from_reader(file)
}

pub fn load_rows_from_reader<R: Read>(reader: R) -> Result<Vec<RefundRow>, RefundRunError> {
    Ok(parser::parse_rows(reader)?)
}

/// Runs the batch against an established gateway: opens the portal page,
/// drives every row through the state machine, and closes the session before
/// the summary is returned for flushing.
pub fn run_batch(
    rows: Vec<RefundRow>,
    gateway: Box<dyn PortalGateway>,
) -> Result<BatchSummary, RefundRunError> {
    let submitter = PortalSubmitter::new(gateway);

    if let Err(err) = submitter.open_session() {
        submitter.close_session();
        return Err(RefundRunError::Session(err));
    }

    let summary = RefundBatchRunner::new(&submitter).process(rows);
    submitter.close_session();

    Ok(summary)
}
