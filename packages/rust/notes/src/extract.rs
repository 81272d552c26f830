//! Groups a flattened patch notes page into dated entries.
//!
//! Layout walked (tag names come from [`LayoutConfig`]):
//! - date header (`h3`): one [`PatchEntry`] if its text contains a date
//! - hero header (`h5`): sibling of the date header, one subject each
//! - bullet list (`ul`): sibling of the hero header, items become change lines
//! - paragraph (`p`): ability name or developer comment for the lists after it

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, instrument};

use patchtracker_shared::{ChangeLine, LayoutConfig, PatchEntry, SubjectSection};

use crate::document::Document;

/// Matches `January 20, 2026` anywhere in a header.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]+)\s+(\d{1,2}),\s+(\d{4})").expect("date regex")
});

/// `chrono` format of the matched date text.
const DATE_FORMAT: &str = "%B %d, %Y";

/// Paragraph prefix marking a developer comment.
const DEVELOPER_COMMENT_PREFIX: &str = "Developer Comment";

/// Find the `<Month> <Day>, <Year>` date in a header text.
pub fn match_date(text: &str) -> Option<&str> {
    DATE_RE.find(text).map(|m| m.as_str())
}

/// Number of date header nodes on the page, before the entry cap.
pub fn count_date_headers(doc: &Document, layout: &LayoutConfig) -> usize {
    doc.positions(&layout.date_tag).count()
}

/// Extract up to `layout.max_entries` dated entries.
///
/// Only the first `max_entries` date headers are examined; headers whose text
/// has no date are skipped, so fewer entries than that may come back.
#[instrument(skip_all, fields(nodes = doc.len()))]
pub fn extract(doc: &Document, layout: &LayoutConfig) -> Vec<PatchEntry> {
    let entries: Vec<PatchEntry> = doc
        .positions(&layout.date_tag)
        .take(layout.max_entries)
        .filter_map(|header| extract_entry(doc, header, layout))
        .collect();

    debug!(entries = entries.len(), "extraction complete");
    entries
}

fn extract_entry(doc: &Document, header: usize, layout: &LayoutConfig) -> Option<PatchEntry> {
    let header_text = doc.text(header).trim();
    let Some(date) = match_date(header_text) else {
        debug!(header = header_text, "header has no date, skipping");
        return None;
    };

    let mut subjects = Vec::new();
    for sibling in doc.siblings(header) {
        let node = doc.node(sibling);
        if node.is(&layout.date_tag) {
            break;
        }
        if node.is(&layout.subject_tag) {
            subjects.push(extract_subject(doc, sibling, layout));
        }
    }

    let heroes = subjects.iter().map(|s| s.name.clone()).collect();

    debug!(date, subjects = subjects.len(), "patch entry extracted");

    Some(PatchEntry {
        date: date.to_string(),
        calendar_date: NaiveDate::parse_from_str(date, DATE_FORMAT).ok(),
        heroes,
        subjects,
    })
}

fn extract_subject(doc: &Document, header: usize, layout: &LayoutConfig) -> SubjectSection {
    let name = doc.text(header).trim().to_string();

    let mut changes = Vec::new();
    let mut ability: Option<String> = None;
    let mut developer_comment: Option<String> = None;
    // Set when "Developer Comment" stands alone and the text follows in the next paragraph.
    let mut comment_pending = false;

    for sibling in doc.siblings(header) {
        let node = doc.node(sibling);
        if node.is(&layout.subject_tag) || node.is(&layout.date_tag) {
            break;
        }

        if node.is(&layout.list_tag) {
            // A lone comment heading only claims the paragraph right after it.
            comment_pending = false;
            for item in doc.descendants(sibling) {
                if !doc.node(item).is(&layout.item_tag) {
                    continue;
                }
                let text = doc.text(item).trim();
                if !text.is_empty() {
                    changes.push(ChangeLine {
                        text: text.to_string(),
                        ability: ability.clone(),
                    });
                }
            }
        } else if node.is(&layout.paragraph_tag) {
            let text = doc.text(sibling).trim();
            if text.is_empty() || text.starts_with('*') {
                continue;
            }
            if comment_pending {
                developer_comment = Some(text.to_string());
                comment_pending = false;
            } else if let Some(comment) = strip_comment_prefix(text) {
                if comment.is_empty() {
                    comment_pending = true;
                } else {
                    developer_comment = Some(comment.to_string());
                }
            } else {
                ability = Some(text.to_string());
            }
        }
    }

    SubjectSection {
        name,
        developer_comment,
        changes,
    }
}

/// `"Developer Comment: text"` → `Some("text")`, other paragraphs → `None`.
///
/// The plural `"Developer Comments"` is accepted. The prefix must end the
/// paragraph or be followed by `:` or whitespace.
fn strip_comment_prefix(text: &str) -> Option<&str> {
    let head = text.get(..DEVELOPER_COMMENT_PREFIX.len())?;
    if !head.eq_ignore_ascii_case(DEVELOPER_COMMENT_PREFIX) {
        return None;
    }
    let mut rest = &text[DEVELOPER_COMMENT_PREFIX.len()..];
    if rest.starts_with(['s', 'S']) {
        rest = &rest[1..];
    }
    match rest.chars().next() {
        None => Some(""),
        Some(c) if c == ':' || c.is_whitespace() => {
            Some(rest.trim_start().trim_start_matches(':').trim())
        }
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    fn run(html: &str) -> Vec<PatchEntry> {
        extract(&parse(html), &LayoutConfig::default())
    }

    #[test]
    fn date_pattern_matches() {
        assert_eq!(match_date("January 20, 2026"), Some("January 20, 2026"));
        assert_eq!(
            match_date("Overwatch 2 Retail Patch Notes - March 3, 2026"),
            Some("March 3, 2026")
        );
        assert_eq!(match_date("Bug Fixes"), None);
        assert_eq!(match_date("january 20, 2026"), None);
        assert_eq!(match_date("January 20 2026"), None);
    }

    #[test]
    fn single_entry_scenario() {
        let entries = run(
            "<h3>March 3, 2026</h3>\
             <h5>Ana</h5>\
             <ul><li>Healing reduced from 75 to 70</li><li>Cooldown unchanged</li></ul>",
        );

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.date, "March 3, 2026");
        assert_eq!(entry.calendar_date, NaiveDate::from_ymd_opt(2026, 3, 3));
        assert_eq!(entry.heroes, vec!["Ana"]);

        let texts: Vec<&str> = entry.subjects[0]
            .changes
            .iter()
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Healing reduced from 75 to 70", "Cooldown unchanged"]);
    }

    #[test]
    fn header_without_date_produces_nothing() {
        let entries = run("<h3>Hero Updates</h3><h5>Ana</h5><ul><li>x</li></ul>");
        assert!(entries.is_empty());
    }

    #[test]
    fn no_date_headers_is_empty_not_error() {
        assert!(run("<p>Nothing to see</p>").is_empty());
        assert!(run("").is_empty());
    }

    #[test]
    fn only_first_five_headers_are_examined() {
        let html: String = (1..=7)
            .map(|day| format!("<h3>March {day}, 2026</h3><h5>Hero{day}</h5>"))
            .collect();
        let entries = run(&html);

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[4].date, "March 5, 2026");
        assert!(entries.iter().all(|e| e.heroes.len() == 1));
    }

    #[test]
    fn skipped_headers_count_against_the_cap() {
        let html = "<h3>Intro</h3><h3>News</h3><h3>Misc</h3><h3>Other</h3>\
                    <h3>March 1, 2026</h3><h3>March 2, 2026</h3>";
        let entries = run(html);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, "March 1, 2026");
    }

    #[test]
    fn subject_without_list_has_no_changes() {
        let entries = run(
            "<h3>March 3, 2026</h3><h5>Ana</h5><h5>Mercy</h5><ul><li>Flight speed increased</li></ul>",
        );

        let entry = &entries[0];
        assert_eq!(entry.heroes, vec!["Ana", "Mercy"]);
        assert!(entry.subjects[0].changes.is_empty());
        assert_eq!(entry.subjects[1].changes.len(), 1);
    }

    #[test]
    fn subjects_stop_at_next_date_header() {
        let entries = run(
            "<h3>March 3, 2026</h3><h5>Ana</h5><ul><li>a</li></ul>\
             <h3>February 17, 2026</h3><h5>Mercy</h5><ul><li>m</li></ul>",
        );

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].heroes, vec!["Ana"]);
        assert_eq!(entries[0].subjects[0].changes.len(), 1);
        assert_eq!(entries[1].heroes, vec!["Mercy"]);
    }

    #[test]
    fn blank_items_are_dropped() {
        let entries = run("<h3>March 3, 2026</h3><h5>Ana</h5><ul><li>  </li><li> kept </li></ul>");
        let changes = &entries[0].subjects[0].changes;
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].text, "kept");
    }

    #[test]
    fn lists_not_siblings_of_the_hero_are_ignored() {
        let entries = run(
            "<h3>March 3, 2026</h3><h5>Ana</h5><div><ul><li>nested</li></ul></div>",
        );
        assert!(entries[0].subjects[0].changes.is_empty());
    }

    #[test]
    fn ability_and_developer_comment_are_captured() {
        let entries = run(
            "<h3>March 3, 2026</h3><h5>Reinhardt</h5>\
             <p>Developer Comment: Charge felt too punishing.</p>\
             <ul><li>Health increased from 600 to 625</li></ul>\
             <p>Rocket Hammer</p>\
             <ul><li>Damage increased from 85 to 90</li></ul>",
        );

        let subject = &entries[0].subjects[0];
        assert_eq!(
            subject.developer_comment.as_deref(),
            Some("Charge felt too punishing.")
        );
        assert_eq!(subject.changes[0].ability, None);
        assert_eq!(subject.changes[1].ability.as_deref(), Some("Rocket Hammer"));
    }

    #[test]
    fn standalone_comment_heading_takes_next_paragraph() {
        let entries = run(
            "<h3>March 3, 2026</h3><h5>Ana</h5>\
             <p>Developer Comment</p><p>Sleep Dart is too reliable.</p>\
             <ul><li>Projectile size reduced</li></ul>",
        );

        let subject = &entries[0].subjects[0];
        assert_eq!(
            subject.developer_comment.as_deref(),
            Some("Sleep Dart is too reliable.")
        );
        assert_eq!(subject.changes[0].ability, None);
    }

    #[test]
    fn comment_heading_followed_by_list_does_not_swallow_ability() {
        let entries = run(
            "<h3>March 3, 2026</h3><h5>Ana</h5>\
             <p>Developer Comment</p><ul><li>a</li></ul>\
             <p>Biotic Rifle</p><ul><li>b</li></ul>",
        );

        let subject = &entries[0].subjects[0];
        assert_eq!(subject.developer_comment, None);
        assert_eq!(subject.changes[0].ability, None);
        assert_eq!(subject.changes[1].ability.as_deref(), Some("Biotic Rifle"));
    }

    #[test]
    fn comment_prefix_variants() {
        assert_eq!(
            strip_comment_prefix("Developer Comments: Too strong."),
            Some("Too strong.")
        );
        assert_eq!(strip_comment_prefix("developer comment : lower"), Some("lower"));
        assert_eq!(strip_comment_prefix("Developer Comment"), Some(""));
        assert_eq!(strip_comment_prefix("Developer Commentary"), None);
        assert_eq!(strip_comment_prefix("Developer Commentsx"), None);
        assert_eq!(strip_comment_prefix("Rocket Hammer"), None);
    }

    #[test]
    fn plural_comment_heading_is_stripped() {
        let entries = run(
            "<h3>March 3, 2026</h3><h5>Ana</h5>\
             <p>Developer Comments: Too strong.</p><ul><li>a</li></ul>",
        );
        assert_eq!(
            entries[0].subjects[0].developer_comment.as_deref(),
            Some("Too strong.")
        );
    }

    #[test]
    fn unknown_month_keeps_entry_without_calendar_date() {
        let entries = run("<h3>Smarch 3, 2026</h3><h5>Ana</h5>");
        assert_eq!(entries[0].date, "Smarch 3, 2026");
        assert_eq!(entries[0].calendar_date, None);
    }

    #[test]
    fn extraction_is_idempotent() {
        let doc = parse(
            "<h3>March 3, 2026</h3><h5>Ana</h5><ul><li>a</li></ul><h5>Mercy</h5>\
             <h3>March 1, 2026</h3><h5>Ana</h5>",
        );
        let layout = LayoutConfig::default();
        assert_eq!(extract(&doc, &layout), extract(&doc, &layout));
    }

    #[test]
    fn custom_layout_tags() {
        let layout = LayoutConfig {
            date_tag: "h2".into(),
            subject_tag: "h4".into(),
            list_tag: "ol".into(),
            ..LayoutConfig::default()
        };
        let doc = parse("<h2>March 3, 2026</h2><h4>Ana</h4><ol><li>x</li></ol>");
        let entries = extract(&doc, &layout);

        assert_eq!(entries[0].heroes, vec!["Ana"]);
        assert_eq!(entries[0].subjects[0].changes.len(), 1);
        assert_eq!(count_date_headers(&doc, &layout), 1);
    }
}
