//! Core domain types for extracted patch notes.

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// PatchEntry
// ---------------------------------------------------------------------------

/// One dated patch, built from a single date header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchEntry {
    /// Date exactly as written on the page, e.g. `"January 20, 2026"`.
    pub date: String,
    /// The date as a calendar value, if the month name is a real one.
    pub calendar_date: Option<NaiveDate>,
    /// Every hero header under this date, in page order, including heroes
    /// with no bullet changes.
    pub heroes: Vec<String>,
    /// Per-hero change lines, parallel to `heroes`.
    pub subjects: Vec<SubjectSection>,
}

impl PatchEntry {
    /// Subjects that have at least one change line.
    pub fn changed_subjects(&self) -> impl Iterator<Item = &SubjectSection> {
        self.subjects.iter().filter(|s| !s.changes.is_empty())
    }
}

// ---------------------------------------------------------------------------
// SubjectSection
// ---------------------------------------------------------------------------

/// A hero header and the bullet lines collected under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectSection {
    /// Hero name (trimmed header text).
    pub name: String,
    /// "Developer Comment" paragraph, prefix stripped.
    pub developer_comment: Option<String>,
    /// Non-empty bullet texts in page order.
    pub changes: Vec<ChangeLine>,
}

/// A raw bullet text plus the ability it was listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLine {
    pub text: String,
    pub ability: Option<String>,
}

impl ChangeLine {
    /// A line with no ability heading.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ability: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_subjects_skips_empty() {
        let entry = PatchEntry {
            date: "March 3, 2026".into(),
            calendar_date: NaiveDate::from_ymd_opt(2026, 3, 3),
            heroes: vec!["Ana".into(), "Mercy".into()],
            subjects: vec![
                SubjectSection {
                    name: "Ana".into(),
                    developer_comment: None,
                    changes: vec![ChangeLine::new("Healing reduced from 75 to 70")],
                },
                SubjectSection {
                    name: "Mercy".into(),
                    developer_comment: None,
                    changes: vec![],
                },
            ],
        };

        let names: Vec<&str> = entry.changed_subjects().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Ana"]);
        assert_eq!(entry.heroes.len(), 2);
    }
}
