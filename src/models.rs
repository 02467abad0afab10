use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque student identifier.
///
/// Ids made only of digits order numerically (`2` before `10`) and ahead of
/// any other id; everything else orders as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric_digits(&self) -> Option<&str> {
        if !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit()) {
            Some(self.0.trim_start_matches('0'))
        } else {
            None
        }
    }
}

impl Ord for StudentId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric_digits(), other.numeric_digits()) {
            // Leading zeros are stripped, so a longer digit string is a larger number.
            (Some(a), Some(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| a.cmp(b))
                .then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for StudentId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u32> for StudentId {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn is_absent(self) -> bool {
        matches!(self, AttendanceStatus::Absent)
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Present" => Ok(AttendanceStatus::Present),
            "Absent" => Ok(AttendanceStatus::Absent),
            other => Err(format!("unknown attendance status '{other}'")),
        }
    }
}

/// One row as delivered by an attendance source. Any field may be missing;
/// the streak detector rejects such rows instead of guessing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AttendanceEntry {
    pub student_id: Option<StudentId>,
    #[serde(alias = "attendance_date")]
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

impl AttendanceEntry {
    pub fn new(
        student_id: impl Into<StudentId>,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            student_id: Some(student_id.into()),
            date: Some(date),
            status: Some(status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub student_id: StudentId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbsenceEpisode {
    pub student_id: StudentId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_missed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuardianInfo {
    pub student_id: StudentId,
    pub student_name: String,
    #[serde(alias = "parent_email")]
    pub guardian_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub student_id: StudentId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_missed: u32,
    pub contact_email: Option<String>,
    pub message: Option<String>,
}
