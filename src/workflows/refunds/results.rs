use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use super::runner::DecisionOutcome;

#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    #[error("failed to create results file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write results row: {0}")]
    Csv(#[from] csv::Error),
}

/// Persists the outcome log as `RequestId,Decision` rows in submission
/// order. An empty log is a logged no-op; no file is created.
pub fn save_to_path<P: AsRef<Path>>(
    path: P,
    outcomes: &[DecisionOutcome],
) -> Result<(), ResultsError> {
    if outcomes.is_empty() {
        info!("no refund decisions to save");
        return Ok(());
    }

    let path = path.as_ref();
    let file = File::create(path)?;
    write_results(file, outcomes)?;

    info!(path = %path.display(), count = outcomes.len(), "results saved");
    Ok(())
}

pub fn write_results<W: Write>(
    writer: W,
    outcomes: &[DecisionOutcome],
) -> Result<(), ResultsError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["RequestId", "Decision"])?;
    for outcome in outcomes {
        writer.write_record([outcome.request_id.as_str(), outcome.decision.portal_label()])?;
    }
    writer.flush()?;
    Ok(())
}
