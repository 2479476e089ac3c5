//! Stage labels: round-robin vs knockout, and bracket order of knockout phases.
//!
//! Labels are free text typed by people ("Grupo A", "Cuartos de Final", "Semi 1"),
//! so both decisions are substring checks against a keyword table.

/// Rank given to knockout labels that name no known phase; they sort last.
pub const UNRANKED_PHASE: u8 = 99;

/// Keywords that mark a label as knockout, with their phase rank.
///
/// Checked in order, first hit wins: "semi" must come before "final"
/// or every "Semifinal" would land in the Final round.
const PHASE_KEYWORDS: [(&str, u8); 6] = [
    ("semi", 2),
    ("octavo", 0),
    ("cuarto", 1),
    ("final", 3),
    ("playoff", 1),
    ("eliminat", 1),
];

/// Competition format a match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StageFormat {
    RoundRobin,
    Knockout,
}

/// Whether a label names a knockout phase (case-insensitive).
pub fn is_knockout_stage(label: &str) -> bool {
    let lower = label.to_lowercase();
    PHASE_KEYWORDS.iter().any(|(kw, _)| lower.contains(kw))
}

/// Format of a match from its stage label. Absent or blank labels are round-robin.
pub fn classify(label: Option<&str>) -> StageFormat {
    match label.map(str::trim) {
        Some(l) if !l.is_empty() && is_knockout_stage(l) => StageFormat::Knockout,
        _ => StageFormat::RoundRobin,
    }
}

/// Bracket position of a knockout label: 0 = round of 16 ... 3 = final.
pub fn knockout_phase_rank(label: &str) -> u8 {
    let lower = label.to_lowercase();
    PHASE_KEYWORDS
        .iter()
        .find(|(kw, _)| lower.contains(kw))
        .map(|&(_, rank)| rank)
        .unwrap_or(UNRANKED_PHASE)
}
