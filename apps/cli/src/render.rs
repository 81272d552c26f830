//! Plain-text rendering of a [`Report`].

use patchtracker_core::report::{Report, SubjectReport};
use patchtracker_notes::{Change, excerpt};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Header printed before anything else.
pub(crate) fn banner() -> String {
    format!("{}\n🎮 Overwatch Patch Notes Scraper\n{}", rule(), rule())
}

/// Per-date details, the total, and the frequency table.
pub(crate) fn render_report(report: &Report) -> String {
    let mut out = String::new();

    for entry in &report.entries {
        out.push_str(&format!("\n{}\n📌 Patch date: {}\n", rule(), entry.date));
        for subject in &entry.subjects {
            render_subject(&mut out, subject);
        }
    }

    out.push_str(&format!("\n{}\n", rule()));
    out.push_str(&format!("\n✅ Found {} patches\n", report.total_entries));
    out.push_str("\n📊 Hero update frequency (Top 10):\n");
    for hero in &report.top_heroes {
        out.push_str(&format!("   {}: {}x\n", hero.name, hero.count));
    }

    out
}

fn render_subject(out: &mut String, subject: &SubjectReport) {
    out.push_str(&format!("\n  🦸 Hero: {}\n", subject.name));
    if let Some(comment) = &subject.developer_comment {
        out.push_str(&format!("     💬 {}\n", excerpt(comment)));
    }
    out.push_str(&format!(
        "     {} changes ({} buffs, {} nerfs, {} adjustments):\n",
        subject.change_count, subject.buffs, subject.nerfs, subject.adjustments
    ));
    for (i, change) in subject.shown.iter().enumerate() {
        render_change(out, i + 1, change);
    }
}

fn render_change(out: &mut String, n: usize, change: &Change) {
    let ability = change
        .ability
        .as_deref()
        .map(|a| format!("[{a}] "))
        .unwrap_or_default();
    out.push_str(&format!(
        "       {n}. {} {ability}{}\n",
        change.kind,
        excerpt(&change.text)
    ));

    if let (Some(from), Some(to)) = (&change.from_value, &change.to_value) {
        let unit = change
            .unit
            .as_deref()
            .map(|u| format!(" {u}"))
            .unwrap_or_default();
        out.push_str(&format!("          ({from} → {to}{unit})\n"));
    }
}
