use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ratingtick_core::RatingTable;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::CliError;

/// `chess-ratings-<RFC3339 timestamp>.csv` with `:` and `.` made filename-safe.
pub fn file_name(timestamp: OffsetDateTime) -> Result<String, CliError> {
    let stamp = timestamp.format(&Rfc3339)?.replace([':', '.'], "-");
    Ok(format!("chess-ratings-{stamp}.csv"))
}

/// Write the header row and one row per player; returns the player row count.
pub fn write_table<W: Write>(writer: W, table: &RatingTable) -> Result<usize, CliError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row.to_record())?;
    }
    writer.flush()?;
    Ok(table.rows.len())
}

/// Write `table` to a timestamped file under `dir`, creating `dir` if needed.
pub fn export(dir: &Path, table: &RatingTable, timestamp: OffsetDateTime) -> Result<PathBuf, CliError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(timestamp)?);
    let file = fs::File::create(&path)?;
    write_table(file, table)?;
    Ok(path)
}
