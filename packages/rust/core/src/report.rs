//! Report builder: per-date hero details and the hero frequency table.
//!
//! The report is plain data. Rendering it to text is left to the caller.

use std::collections::HashMap;

use tracing::{debug, instrument};

use patchtracker_notes::{Change, ChangeKind, SHOWN_CHANGES_PER_SUBJECT, classify_line};
use patchtracker_shared::{PatchEntry, SubjectSection};

/// Heroes listed in the frequency ranking.
pub const TOP_SUBJECTS: usize = 10;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Everything the console summary shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// One section per extracted patch, in page order.
    pub entries: Vec<EntryReport>,
    /// Number of extracted patches.
    pub total_entries: usize,
    /// Most frequently updated heroes, at most [`TOP_SUBJECTS`].
    pub top_heroes: Vec<HeroCount>,
}

/// A dated patch section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub date: String,
    /// Heroes with at least one change; empty heroes are left out.
    pub subjects: Vec<SubjectReport>,
}

/// Detail for one hero within a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectReport {
    pub name: String,
    /// All change lines under this hero, not just the shown ones.
    pub change_count: usize,
    pub buffs: usize,
    pub nerfs: usize,
    pub adjustments: usize,
    /// The first [`SHOWN_CHANGES_PER_SUBJECT`] changes.
    pub shown: Vec<Change>,
    pub developer_comment: Option<String>,
}

/// A hero and how many patches listed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroCount {
    pub name: String,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Frequency table
// ---------------------------------------------------------------------------

/// Occurrence counts of hero names, remembering first-seen order.
#[derive(Debug, Clone, Default)]
pub struct HeroFrequencyTable {
    counts: Vec<HeroCount>,
    index: HashMap<String, usize>,
}

impl HeroFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every hero of every entry, including heroes with no changes.
    pub fn from_entries(entries: &[PatchEntry]) -> Self {
        let mut table = Self::new();
        for hero in entries.iter().flat_map(|e| &e.heroes) {
            table.record(hero);
        }
        table
    }

    pub fn record(&mut self, name: &str) {
        match self.index.get(name) {
            Some(&slot) => self.counts[slot].count += 1,
            None => {
                self.index.insert(name.to_string(), self.counts.len());
                self.counts.push(HeroCount {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    pub fn count(&self, name: &str) -> usize {
        self.index.get(name).map_or(0, |&slot| self.counts[slot].count)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All heroes by descending count; ties keep first-seen order.
    pub fn ranked(&self) -> Vec<HeroCount> {
        let mut ranked = self.counts.clone();
        // Stable sort: ties stay in first-seen order.
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    /// The `n` most frequent heroes.
    pub fn top(&self, n: usize) -> Vec<HeroCount> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the report for a set of extracted entries.
#[instrument(skip_all, fields(entries = entries.len()))]
pub fn build_report(entries: &[PatchEntry]) -> Report {
    let sections: Vec<EntryReport> = entries
        .iter()
        .map(|entry| EntryReport {
            date: entry.date.clone(),
            subjects: entry.changed_subjects().map(subject_report).collect(),
        })
        .collect();

    let frequency = HeroFrequencyTable::from_entries(entries);
    debug!(distinct_heroes = frequency.len(), "frequency table built");

    Report {
        total_entries: entries.len(),
        entries: sections,
        top_heroes: frequency.top(TOP_SUBJECTS),
    }
}

fn subject_report(subject: &SubjectSection) -> SubjectReport {
    let changes: Vec<Change> = subject.changes.iter().map(classify_line).collect();
    let tally = |kind: ChangeKind| changes.iter().filter(|c| c.kind == kind).count();

    SubjectReport {
        name: subject.name.clone(),
        change_count: changes.len(),
        buffs: tally(ChangeKind::Buff),
        nerfs: tally(ChangeKind::Nerf),
        adjustments: tally(ChangeKind::Adjustment),
        shown: changes
            .iter()
            .take(SHOWN_CHANGES_PER_SUBJECT)
            .cloned()
            .collect(),
        developer_comment: subject.developer_comment.clone(),
    }
}
