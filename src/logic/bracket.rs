//! Knockout bracket: one round per distinct stage label, rounds in phase order.

use crate::logic::stage::knockout_phase_rank;
use crate::models::{BracketMatch, BracketRound, Match};

/// Group knockout matches into rounds.
///
/// Rounds are keyed by the exact trimmed label, so "Semi 1" and "Semifinales"
/// stay separate rounds. Rounds sort by phase rank, keeping first-seen order on
/// equal rank; matches inside a round sort by date then time. Unplayed matches
/// are listed as-is.
pub fn assemble_bracket(matches: &[&Match]) -> Vec<BracketRound> {
    let mut rounds: Vec<(&str, Vec<&Match>)> = Vec::new();
    for &m in matches {
        let Some(label) = m.stage() else {
            continue;
        };
        match rounds.iter_mut().find(|(l, _)| *l == label) {
            Some((_, round)) => round.push(m),
            None => rounds.push((label, vec![m])),
        }
    }

    rounds.sort_by_key(|(label, _)| knockout_phase_rank(label));

    rounds
        .into_iter()
        .map(|(label, mut round)| {
            round.sort_by(|a, b| a.kickoff().cmp(&b.kickoff()));
            BracketRound {
                label: label.to_string(),
                matches: round.into_iter().map(BracketMatch::from).collect(),
            }
        })
        .collect()
}
