use std::collections::BTreeMap;

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::models::{AbsenceEpisode, AttendanceEntry, AttendanceRecord, StudentId};

/// Checks every entry for a student id, date and status.
///
/// Fails on the first incomplete entry; a blank student id counts as missing.
pub fn validate_entries(entries: &[AttendanceEntry]) -> Result<Vec<AttendanceRecord>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let student_id = entry
                .student_id
                .clone()
                .filter(|id| !id.as_str().trim().is_empty())
                .ok_or(Error::InvalidInput {
                    index,
                    field: "student_id",
                })?;
            let date = entry.date.ok_or(Error::InvalidInput {
                index,
                field: "date",
            })?;
            let status = entry.status.ok_or(Error::InvalidInput {
                index,
                field: "status",
            })?;
            Ok(AttendanceRecord {
                student_id,
                date,
                status,
            })
        })
        .collect()
}

/// Every maximal run of absent records per student, before any threshold.
///
/// Students come out in id order, runs within a student in date order.
/// Adjacency is over the records themselves, so a date with no record
/// neither breaks nor extends a run.
pub fn all_absence_runs(records: &[AttendanceRecord]) -> Vec<AbsenceEpisode> {
    let mut by_student: BTreeMap<&StudentId, Vec<&AttendanceRecord>> = BTreeMap::new();
    for record in records {
        by_student.entry(&record.student_id).or_default().push(record);
    }

    let mut runs = Vec::new();
    for (student_id, mut history) in by_student {
        history.sort_by_key(|record| record.date);
        debug!(student = %student_id, records = history.len(), "scanning attendance");

        let mut current: Option<AbsenceEpisode> = None;
        for record in history {
            if !record.status.is_absent() {
                runs.extend(current.take());
            } else if let Some(run) = current.as_mut() {
                run.end_date = record.date;
                run.days_missed += 1;
            } else {
                current = Some(AbsenceEpisode {
                    student_id: student_id.clone(),
                    start_date: record.date,
                    end_date: record.date,
                    days_missed: 1,
                });
            }
        }
        runs.extend(current);
    }

    runs
}

/// Absence runs strictly longer than `config.min_days_exclusive`.
pub fn detect_episodes(
    records: &[AttendanceRecord],
    config: &AnalysisConfig,
) -> Vec<AbsenceEpisode> {
    all_absence_runs(records)
        .into_iter()
        .filter(|run| run.days_missed > config.min_days_exclusive)
        .collect()
}

/// Validates raw entries and detects qualifying episodes in one step.
pub fn detect_from_entries(
    entries: &[AttendanceEntry],
    config: &AnalysisConfig,
) -> Result<Vec<AbsenceEpisode>> {
    let records = validate_entries(entries)?;
    Ok(detect_episodes(&records, config))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::AttendanceStatus;
    use crate::models::AttendanceStatus::{Absent, Present};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn history(student: u32, statuses: &[(u32, AttendanceStatus)]) -> Vec<AttendanceRecord> {
        statuses
            .iter()
            .map(|&(d, status)| AttendanceRecord {
                student_id: student.into(),
                date: day(d),
                status,
            })
            .collect()
    }

    #[test]
    fn no_absences_no_runs() {
        let records = history(1, &[(1, Present), (2, Present), (3, Present)]);
        assert!(all_absence_runs(&records).is_empty());
    }

    #[test]
    fn threshold_is_strict() {
        let three = history(
            1,
            &[(1, Present), (2, Absent), (3, Absent), (4, Absent), (5, Present)],
        );
        let four = history(
            2,
            &[(1, Absent), (2, Absent), (3, Absent), (4, Absent), (5, Present)],
        );
        let config = AnalysisConfig::default();

        assert!(detect_episodes(&three, &config).is_empty());

        let episodes = detect_episodes(&four, &config);
        assert_eq!(
            episodes,
            vec![AbsenceEpisode {
                student_id: StudentId::from(2u32),
                start_date: day(1),
                end_date: day(4),
                days_missed: 4,
            }]
        );
    }

    #[test]
    fn present_day_splits_runs() {
        let records = history(1, &[(1, Absent), (2, Absent), (3, Present), (4, Absent)]);
        let runs = all_absence_runs(&records);
        assert_eq!(runs.len(), 2);
        let spans: Vec<_> = runs
            .iter()
            .map(|run| (run.start_date, run.end_date, run.days_missed))
            .collect();
        assert_eq!(spans, vec![(day(1), day(2), 2), (day(4), day(4), 1)]);
    }

    #[test]
    fn calendar_gaps_do_not_break_runs() {
        // Friday, then Monday..Wednesday; nothing recorded for the weekend.
        let records = history(1, &[(7, Absent), (10, Absent), (11, Absent), (12, Absent)]);
        let episodes = detect_episodes(&records, &AnalysisConfig::default());
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].start_date, day(7));
        assert_eq!(episodes[0].end_date, day(12));
        assert_eq!(episodes[0].days_missed, 4);
    }

    #[test]
    fn runs_do_not_cross_students() {
        let mut records = history(1, &[(1, Present), (2, Absent), (3, Absent)]);
        records.extend(history(2, &[(1, Absent), (2, Absent), (3, Present)]));
        let runs = all_absence_runs(&records);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].student_id, StudentId::from(1u32));
        assert_eq!(runs[0].days_missed, 2);
        assert_eq!(runs[1].student_id, StudentId::from(2u32));
        assert_eq!(runs[1].days_missed, 2);
    }

    #[test]
    fn students_come_out_in_numeric_id_order() {
        let streak = [(1, Absent), (2, Absent), (3, Absent), (4, Absent)];
        let mut records = history(10, &streak);
        records.extend(history(2, &streak));

        let episodes = detect_episodes(&records, &AnalysisConfig::default());
        let order: Vec<&str> = episodes.iter().map(|e| e.student_id.as_str()).collect();
        assert_eq!(order, ["2", "10"]);
    }

    #[test]
    fn unordered_input_is_sorted_per_student() {
        let records = history(
            1,
            &[(4, Absent), (1, Present), (3, Absent), (5, Present), (2, Absent)],
        );
        let runs = all_absence_runs(&records);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].start_date, day(2));
        assert_eq!(runs[0].end_date, day(4));
        assert_eq!(runs[0].days_missed, 3);
    }

    #[test]
    fn zero_threshold_reports_single_days() {
        let records = history(1, &[(1, Absent), (2, Present)]);
        let config = AnalysisConfig::with_min_days_exclusive(0);
        assert_eq!(detect_episodes(&records, &config).len(), 1);
    }

    #[test]
    fn missing_fields_are_rejected_with_position() {
        let mut entries = vec![AttendanceEntry::new(1u32, day(1), Absent); 3];
        entries[1].status = None;
        assert!(matches!(
            detect_from_entries(&entries, &AnalysisConfig::default()),
            Err(Error::InvalidInput {
                index: 1,
                field: "status"
            })
        ));

        entries[1].status = Some(Absent);
        entries[2].date = None;
        assert!(matches!(
            validate_entries(&entries),
            Err(Error::InvalidInput {
                index: 2,
                field: "date"
            })
        ));

        entries[2].date = Some(day(2));
        entries[0].student_id = Some(StudentId::new("  "));
        assert!(matches!(
            validate_entries(&entries),
            Err(Error::InvalidInput {
                index: 0,
                field: "student_id"
            })
        ));
    }
}
