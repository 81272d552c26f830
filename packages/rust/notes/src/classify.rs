//! Keyword classification of single change lines.
//!
//! A line is a buff if it says "increased", a nerf if it says "reduced" or
//! "decreased", and an adjustment otherwise. The buff check runs first, so a
//! line mentioning both directions counts as a buff.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use patchtracker_shared::ChangeLine;

/// Lowercase keywords marking a buff. Checked before [`NERF_KEYWORDS`].
pub const BUFF_KEYWORDS: &[&str] = &["increased"];

/// Lowercase keywords marking a nerf.
pub const NERF_KEYWORDS: &[&str] = &["reduced", "decreased"];

/// Units recognised in value changes, in priority order.
pub const UNITS: &[&str] = &[
    "damage", "health", "meters", "seconds", "ammo", "percent", "%", "degrees", "HP", "DPS",
];

/// Changes listed per hero in the report.
pub const SHOWN_CHANGES_PER_SUBJECT: usize = 3;

/// Characters of change text kept in the report.
pub const EXCERPT_CHARS: usize = 80;

/// Matches `from 2.5 to 3.0`.
static VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"from\s+(\d+\.?\d*)\s+to\s+(\d+\.?\d*)").expect("value regex")
});

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Direction of a balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Buff,
    Nerf,
    Adjustment,
}

impl ChangeKind {
    /// Upper-case tag used in the report.
    pub fn label(self) -> &'static str {
        match self {
            Self::Buff => "BUFF",
            Self::Nerf => "NERF",
            Self::Adjustment => "ADJUSTMENT",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Buff => "📈",
            Self::Nerf => "📉",
            Self::Adjustment => "🔧",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.label())
    }
}

/// A classified change line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub text: String,
    pub kind: ChangeKind,
    /// Value before the change, as written (`"2.5"`).
    pub from_value: Option<String>,
    /// Value after the change, as written (`"3.0"`).
    pub to_value: Option<String>,
    /// Unit of the values, only looked for when both are present.
    pub unit: Option<String>,
    /// Ability the line was listed under.
    pub ability: Option<String>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a bare change text.
pub fn classify(text: &str) -> Change {
    let kind = change_kind(text);
    let (from_value, to_value, unit) = match extract_values(text) {
        Some((from, to)) => (
            Some(from.to_string()),
            Some(to.to_string()),
            extract_unit(text).map(str::to_string),
        ),
        None => (None, None, None),
    };

    Change {
        text: text.to_string(),
        kind,
        from_value,
        to_value,
        unit,
        ability: None,
    }
}

/// Classify an extracted line, keeping its ability.
pub fn classify_line(line: &ChangeLine) -> Change {
    Change {
        ability: line.ability.clone(),
        ..classify(&line.text)
    }
}

/// Keyword match, case-insensitive, buff first.
pub fn change_kind(text: &str) -> ChangeKind {
    let lower = text.to_lowercase();
    if BUFF_KEYWORDS.iter().any(|k| lower.contains(k)) {
        ChangeKind::Buff
    } else if NERF_KEYWORDS.iter().any(|k| lower.contains(k)) {
        ChangeKind::Nerf
    } else {
        ChangeKind::Adjustment
    }
}

/// First `from X to Y` pair in the text, as literal strings.
pub fn extract_values(text: &str) -> Option<(&str, &str)> {
    let caps = VALUE_RE.captures(text)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// First unit from [`UNITS`] mentioned in the text.
pub fn extract_unit(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    UNITS
        .iter()
        .copied()
        .find(|unit| lower.contains(&unit.to_lowercase()))
}

/// First [`EXCERPT_CHARS`] characters followed by `...`, whatever the length.
pub fn excerpt(text: &str) -> String {
    let mut out: String = text.chars().take(EXCERPT_CHARS).collect();
    out.push_str("...");
    out
}
