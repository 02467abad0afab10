use std::collections::HashMap;

use tracing::warn;

use crate::models::{GuardianInfo, StudentId};

/// Guardian contact details keyed by student.
#[derive(Debug, Clone, Default)]
pub struct GuardianDirectory {
    entries: HashMap<StudentId, GuardianInfo>,
}

impl GuardianDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the entry for `info.student_id`, returning the one it replaced.
    pub fn insert(&mut self, info: GuardianInfo) -> Option<GuardianInfo> {
        self.entries.insert(info.student_id.clone(), info)
    }

    pub fn lookup(&self, student_id: &StudentId) -> Option<&GuardianInfo> {
        self.entries.get(student_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<GuardianInfo> for GuardianDirectory {
    /// Later entries for the same student win.
    fn from_iter<I: IntoIterator<Item = GuardianInfo>>(iter: I) -> Self {
        let mut directory = Self::new();
        for info in iter {
            if let Some(previous) = directory.insert(info) {
                warn!(
                    student = %previous.student_id,
                    "duplicate guardian entry, keeping the later one"
                );
            }
        }
        directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guardian(id: &str, name: &str, email: &str) -> GuardianInfo {
        GuardianInfo {
            student_id: id.into(),
            student_name: name.to_string(),
            guardian_email: email.to_string(),
        }
    }

    #[test]
    fn lookup_hits_and_misses() {
        let directory: GuardianDirectory = vec![guardian("1", "John Doe", "parent1@gmail.com")]
            .into_iter()
            .collect();

        assert_eq!(
            directory.lookup(&"1".into()).map(|g| g.student_name.as_str()),
            Some("John Doe")
        );
        assert!(directory.lookup(&"2".into()).is_none());
    }

    #[test]
    fn later_duplicate_replaces_earlier() {
        let directory: GuardianDirectory = vec![
            guardian("1", "John Doe", "old@gmail.com"),
            guardian("1", "John Doe", "new@gmail.com"),
        ]
        .into_iter()
        .collect();

        assert_eq!(directory.len(), 1);
        assert_eq!(directory.lookup(&"1".into()).unwrap().guardian_email, "new@gmail.com");
    }
}
