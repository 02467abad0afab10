//! Finds students with prolonged runs of recorded absences and prepares
//! guardian notifications for them.
//!
//! [`track_attendance`] runs the whole pipeline: validate attendance entries,
//! detect absence streaks, join guardians, filter emails, render messages.

pub mod config;
pub mod directory;
pub mod email;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;
pub mod sample;
pub mod streak;

use tracing::info;

pub use config::AnalysisConfig;
pub use directory::GuardianDirectory;
pub use email::is_valid_email;
pub use error::{Error, Result};
pub use models::{
    AbsenceEpisode, AttendanceEntry, AttendanceRecord, AttendanceStatus, GuardianInfo, ReportRow,
    StudentId,
};
pub use report::{assemble_report, render_message};
pub use streak::{detect_episodes, detect_from_entries};

/// Produces one report row per absence streak longer than the configured threshold.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if any entry lacks a student id, date or status.
pub fn track_attendance(
    entries: &[AttendanceEntry],
    guardians: impl IntoIterator<Item = GuardianInfo>,
    config: &AnalysisConfig,
) -> Result<Vec<ReportRow>> {
    let episodes = detect_from_entries(entries, config)?;
    info!(
        entries = entries.len(),
        episodes = episodes.len(),
        min_days_exclusive = config.min_days_exclusive,
        "detected absence episodes"
    );
    let directory: GuardianDirectory = guardians.into_iter().collect();
    Ok(assemble_report(&episodes, &directory))
}
