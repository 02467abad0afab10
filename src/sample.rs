//! Small built-in dataset for demos and smoke tests.

use chrono::NaiveDate;

use crate::models::{AttendanceEntry, AttendanceStatus, GuardianInfo};

pub fn attendance() -> Vec<AttendanceEntry> {
    use AttendanceStatus::{Absent, Present};

    let weeks: [(u32, [AttendanceStatus; 5]); 2] = [
        (1, [Present, Absent, Absent, Absent, Present]),
        (2, [Absent, Absent, Absent, Absent, Present]),
    ];

    let mut entries = Vec::new();
    for (student, statuses) in weeks {
        for (day, status) in (1..).zip(statuses) {
            if let Some(date) = NaiveDate::from_ymd_opt(2025, 3, day) {
                entries.push(AttendanceEntry::new(student, date, status));
            }
        }
    }
    entries
}

pub fn guardians() -> Vec<GuardianInfo> {
    vec![
        GuardianInfo {
            student_id: 1u32.into(),
            student_name: "John Doe".to_string(),
            guardian_email: "parent1@gmail.com".to_string(),
        },
        GuardianInfo {
            student_id: 2u32.into(),
            student_name: "Jane Smith".to_string(),
            guardian_email: "invalidemail@.com".to_string(),
        },
    ]
}
