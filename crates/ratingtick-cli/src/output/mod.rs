//! Console and CSV rendering of a rating report.

pub mod console;
pub mod export;

pub use self::console::{history_line, leaderboard_lines};
pub use self::export::{export, file_name, write_table};
