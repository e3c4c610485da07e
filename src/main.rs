use chrono::Local;
use clap::Parser;
use refund_automation::config::AppConfig;
use refund_automation::error::AppError;
use refund_automation::telemetry;
use refund_automation::workflows::refunds::{self, webdriver::WebDriverPortal, RefundRunError};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "Refund Decision Automation",
    about = "Replay refund approval decisions into the internal operations portal",
    version
)]
struct Cli {
    /// Override the configured refund batch CSV
    #[arg(long)]
    input: Option<PathBuf>,
    /// Override the configured results CSV
    #[arg(long)]
    results: Option<PathBuf>,
    /// Override the configured portal URL
    #[arg(long)]
    portal_url: Option<String>,
    /// Override the configured WebDriver endpoint
    #[arg(long)]
    webdriver_url: Option<String>,
    /// Override the configured settle delay in milliseconds
    #[arg(long)]
    settle_ms: Option<u64>,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let mut cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(input) = cli.input.take() {
        config.batch.input_path = input;
    }
    if let Some(results) = cli.results.take() {
        config.batch.results_path = results;
    }
    if let Some(portal_url) = cli.portal_url.take() {
        config.portal.portal_url = portal_url;
    }
    if let Some(webdriver_url) = cli.webdriver_url.take() {
        config.portal.webdriver_url = webdriver_url;
    }
    if let Some(settle_ms) = cli.settle_ms.take() {
        config.portal.settle_delay_ms = settle_ms;
    }

    telemetry::init(&config.telemetry)?;

    info!(?config.environment, "refund decision automation started");

    let rows = refunds::load_rows(&config.batch.input_path).map_err(|err| {
        error!(
            fatal = true,
            path = %config.batch.input_path.display(),
            reason = %err,
            "could not read refund batch input"
        );
        err
    })?;
    info!(
        count = rows.len(),
        path = %config.batch.input_path.display(),
        "loaded refund rows"
    );

    let gateway = WebDriverPortal::connect(&config.portal).map_err(|err| {
        let err = RefundRunError::Session(err);
        error!(fatal = true, reason = %err, "could not reach the portal");
        err
    })?;

    let summary = refunds::run_batch(rows, Box::new(gateway)).map_err(|err| {
        error!(fatal = true, reason = %err, "refund batch aborted");
        err
    })?;

    info!(
        submitted = summary.submitted(),
        skipped = summary.skipped(),
        failed = summary.failed(),
        finished_at = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        "refund batch complete"
    );

    if let Err(err) = refunds::save_to_path(&config.batch.results_path, &summary.outcomes) {
        error!(
            path = %config.batch.results_path.display(),
            reason = %err,
            "failed to save results file"
        );
    }

    Ok(())
}
