//! CSV boundary: attendance and guardian exports in, report rows out.

use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::models::{AttendanceEntry, GuardianInfo, ReportRow};

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input)
}

/// Reads `student_id,attendance_date,status` rows. Empty cells become
/// missing fields rather than parse errors.
pub fn read_attendance<R: Read>(input: R) -> Result<Vec<AttendanceEntry>> {
    let mut entries = Vec::new();
    for result in reader(input).deserialize::<AttendanceEntry>() {
        entries.push(result?);
    }
    debug!(entries = entries.len(), "read attendance entries");
    Ok(entries)
}

pub fn read_attendance_file(path: &Path) -> Result<Vec<AttendanceEntry>> {
    read_attendance(std::fs::File::open(path)?)
}

/// Reads `student_id,student_name,parent_email` rows.
pub fn read_guardians<R: Read>(input: R) -> Result<Vec<GuardianInfo>> {
    let mut guardians = Vec::new();
    for result in reader(input).deserialize::<GuardianInfo>() {
        guardians.push(result?);
    }
    debug!(guardians = guardians.len(), "read guardian entries");
    Ok(guardians)
}

pub fn read_guardians_file(path: &Path) -> Result<Vec<GuardianInfo>> {
    read_guardians(std::fs::File::open(path)?)
}

pub fn write_rows_csv<W: Write>(output: W, rows: &[ReportRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(output);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_rows_json<W: Write>(output: W, rows: &[ReportRow]) -> Result<()> {
    serde_json::to_writer_pretty(output, rows)?;
    Ok(())
}
