//! End-to-end run: leaderboard, top player summary, daily grid export.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use ratingtick_core::series;
use ratingtick_core::{
    LichessClient, PlayerRecord, RateLimitedScheduler, RatingReport, RatingTable,
    ReqwestHttpClient,
};
use time::{Date, OffsetDateTime};
use tracing::{error, info, warn};

use crate::cli::Cli;
use crate::error::CliError;
use crate::output;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let client = LichessClient::new(
        Arc::new(ReqwestHttpClient::new()),
        cli.base_url.clone(),
        cli.retry_config(),
    );
    let report = RatingReport::new(
        client,
        RateLimitedScheduler::new(cli.scheduler_config()),
        cli.report_config(),
    );

    let players = report.top_players().await?;
    if players.is_empty() {
        println!("No players found");
        return Ok(ExitCode::SUCCESS);
    }

    println!("Top {} classical players:", players.len());
    for line in output::leaderboard_lines(&players) {
        println!("{line}");
    }

    let today = series::today();
    if !cli.no_history {
        print_top_history(&report, &players[0], today).await;
    }

    let table = report.build_ending(&players, today).await;
    info!(
        rows = table.rows.len(),
        missing = table.missing.len(),
        failed = table.failures.len(),
        "Rating table built"
    );

    let rows = save(cli, &table)?;
    println!("Exported {rows} players");

    Ok(ExitCode::SUCCESS)
}

async fn print_top_history(
    report: &RatingReport,
    player: &PlayerRecord,
    today: Date,
) {
    match report.recent_history(player, today).await {
        Ok(Some(ratings)) => {
            println!("{}", output::history_line(&player.username, &ratings));
        }
        Ok(None) => warn!("{} has no classical rating history", player.username),
        Err(error) => warn!("Could not fetch history for {}: {error}", player.username),
    }
}

/// Write the CSV file, falling back to stdout when the file cannot be written.
fn save(cli: &Cli, table: &RatingTable) -> Result<usize, CliError> {
    match output::export(&cli.output_dir, table, OffsetDateTime::now_utc()) {
        Ok(path) => {
            info!("Saved {}", path.display());
            println!("Saved to {}", path.display());
            Ok(table.rows.len())
        }
        Err(export_error) => {
            error!("Failed to write CSV file: {export_error}");
            println!("CSV output:");
            output::write_table(io::stdout().lock(), table)
        }
    }
}
