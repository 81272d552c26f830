//! Patch notes parsing, extraction, and change classification.
//!
//! This crate provides:
//! - [`document`]: HTML parsing into a flat, depth-annotated node list
//! - [`extract`]: grouping of nodes into dated [`PatchEntry`] values
//! - [`classify`]: buff / nerf / adjustment tagging of single change lines
//!
//! [`PatchEntry`]: patchtracker_shared::PatchEntry

pub mod classify;
pub mod document;
pub mod extract;

pub use classify::{
    BUFF_KEYWORDS, Change, ChangeKind, EXCERPT_CHARS, NERF_KEYWORDS, SHOWN_CHANGES_PER_SUBJECT,
    UNITS, change_kind, classify, classify_line, excerpt, extract_unit, extract_values,
};
pub use document::{Document, Node, parse};
pub use extract::{count_date_headers, extract, match_date};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use patchtracker_shared::LayoutConfig;

    fn load_fixture(name: &str) -> Document {
        let path = format!("../../../fixtures/html/{name}");
        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("missing fixture: {path}"));
        parse(&content)
    }

    // -----------------------------------------------------------------------
    // Extraction over a full page
    // -----------------------------------------------------------------------

    #[test]
    fn fixture_counts_all_date_headers() {
        let doc = load_fixture("patch-notes.html");
        assert_eq!(count_date_headers(&doc, &LayoutConfig::default()), 6);
    }

    #[test]
    fn fixture_extracts_dated_entries() {
        let doc = load_fixture("patch-notes.html");
        let entries = extract(&doc, &LayoutConfig::default());

        // "Latest News" and "Bug Fixes" are skipped; "December 4, 2025" is the
        // sixth header and is never examined.
        let dates: Vec<&str> = entries.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["January 20, 2026", "January 6, 2026", "December 18, 2025"]
        );
        assert_eq!(
            entries[0].calendar_date,
            NaiveDate::from_ymd_opt(2026, 1, 20)
        );
    }

    #[test]
    fn fixture_heroes_include_empty_subjects() {
        let doc = load_fixture("patch-notes.html");
        let entries = extract(&doc, &LayoutConfig::default());

        assert_eq!(entries[0].heroes, vec!["Reinhardt", "Ana", "Kiriko", "Tracer"]);
        let changed: Vec<&str> = entries[0]
            .changed_subjects()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(changed, vec!["Reinhardt", "Ana", "Tracer"]);
        assert_eq!(entries[2].heroes, vec!["Reinhardt", "Soldier: 76"]);
    }

    #[test]
    fn fixture_changes_carry_abilities() {
        let doc = load_fixture("patch-notes.html");
        let entries = extract(&doc, &LayoutConfig::default());
        let reinhardt = &entries[0].subjects[0];

        assert_eq!(reinhardt.changes.len(), 4);
        assert_eq!(reinhardt.changes[0].ability.as_deref(), Some("Rocket Hammer"));
        assert_eq!(reinhardt.changes[2].ability.as_deref(), Some("Fire Strike"));
        assert!(
            reinhardt
                .developer_comment
                .as_deref()
                .is_some_and(|c| c.starts_with("Reinhardt has been falling behind"))
        );

        let tracer = &entries[0].subjects[3];
        assert_eq!(tracer.changes.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Classification over extracted lines
    // -----------------------------------------------------------------------

    #[test]
    fn fixture_classification() {
        let doc = load_fixture("patch-notes.html");
        let entries = extract(&doc, &LayoutConfig::default());
        let changes: Vec<Change> = entries[0].subjects[0]
            .changes
            .iter()
            .map(classify_line)
            .collect();

        assert_eq!(changes[0].kind, ChangeKind::Buff);
        assert_eq!(changes[1].kind, ChangeKind::Adjustment);
        assert_eq!(changes[2].kind, ChangeKind::Nerf);
        assert_eq!(changes[2].unit.as_deref(), Some("seconds"));
        assert_eq!(changes[3].from_value.as_deref(), Some("25"));
        assert_eq!(changes[3].to_value.as_deref(), Some("27.5"));
        assert_eq!(changes[3].unit.as_deref(), Some("meters"));
    }
}
