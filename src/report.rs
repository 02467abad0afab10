use std::fmt::Write;

use tracing::{info, warn};

use crate::directory::GuardianDirectory;
use crate::email::is_valid_email;
use crate::models::{AbsenceEpisode, ReportRow};

pub fn render_message(student_name: &str, episode: &AbsenceEpisode) -> String {
    format!(
        "Dear Parent, your child {} was absent from {} to {} for {} days. Please help them catch up.",
        student_name, episode.start_date, episode.end_date, episode.days_missed
    )
}

/// Joins each episode with its guardian and renders the notification.
///
/// Rows keep the episode order. An episode whose student has no directory
/// entry, or whose guardian email fails validation, is still reported but
/// without `contact_email` or `message`.
pub fn assemble_report(
    episodes: &[AbsenceEpisode],
    directory: &GuardianDirectory,
) -> Vec<ReportRow> {
    let rows: Vec<ReportRow> = episodes
        .iter()
        .map(|episode| {
            let contact = match directory.lookup(&episode.student_id) {
                None => {
                    warn!(student = %episode.student_id, "no guardian entry for absent student");
                    None
                }
                Some(guardian) if !is_valid_email(&guardian.guardian_email) => {
                    warn!(
                        student = %episode.student_id,
                        email = %guardian.guardian_email,
                        "guardian email rejected"
                    );
                    None
                }
                Some(guardian) => Some(guardian),
            };

            ReportRow {
                student_id: episode.student_id.clone(),
                start_date: episode.start_date,
                end_date: episode.end_date,
                days_missed: episode.days_missed,
                contact_email: contact.map(|guardian| guardian.guardian_email.clone()),
                message: contact.map(|guardian| render_message(&guardian.student_name, episode)),
            }
        })
        .collect();

    info!(
        rows = rows.len(),
        contactable = rows.iter().filter(|row| row.contact_email.is_some()).count(),
        "assembled absence report"
    );
    rows
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub episodes: usize,
    pub contactable: usize,
    pub missing_guardian: usize,
    pub rejected_email: usize,
}

pub fn summarize(rows: &[ReportRow], directory: &GuardianDirectory) -> ReportSummary {
    let mut summary = ReportSummary {
        episodes: rows.len(),
        ..ReportSummary::default()
    };

    for row in rows {
        if row.contact_email.is_some() {
            summary.contactable += 1;
        } else if directory.lookup(&row.student_id).is_some() {
            summary.rejected_email += 1;
        } else {
            summary.missing_guardian += 1;
        }
    }

    summary
}

pub fn build_markdown(
    min_days_exclusive: u32,
    rows: &[ReportRow],
    directory: &GuardianDirectory,
) -> String {
    let summary = summarize(rows, directory);
    let mut output = String::new();

    let _ = writeln!(output, "# Prolonged Absence Report");
    let _ = writeln!(
        output,
        "Streaks longer than {} consecutive recorded absences",
        min_days_exclusive
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    let _ = writeln!(output, "- Episodes: {}", summary.episodes);
    let _ = writeln!(output, "- Guardians to notify: {}", summary.contactable);
    let _ = writeln!(output, "- Missing guardian entry: {}", summary.missing_guardian);
    let _ = writeln!(output, "- Rejected guardian email: {}", summary.rejected_email);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Episodes");

    if rows.is_empty() {
        let _ = writeln!(output, "No prolonged absences found.");
    } else {
        for row in rows {
            let _ = writeln!(
                output,
                "- Student {}: {} to {} ({} days), contact {}",
                row.student_id,
                row.start_date,
                row.end_date,
                row.days_missed,
                row.contact_email.as_deref().unwrap_or("none")
            );
        }
    }

    let messages: Vec<&str> = rows.iter().filter_map(|row| row.message.as_deref()).collect();
    let _ = writeln!(output);
    let _ = writeln!(output, "## Messages");

    if messages.is_empty() {
        let _ = writeln!(output, "No guardians can be contacted.");
    } else {
        for message in messages {
            let _ = writeln!(output, "> {}", message);
            let _ = writeln!(output);
        }
    }

    output
}
