//! Entry point: split a fixture snapshot into competitions, group tables and bracket rounds.

use crate::logic::bracket::assemble_bracket;
use crate::logic::stage::{classify, StageFormat};
use crate::logic::table::build_table;
use crate::models::{Match, Selection, StandingsFilter, StandingsGroup, StandingsSubGroup};
use std::collections::BTreeSet;

/// Compute every standings group visible through `filter`.
///
/// 1. Keep matches accepted by the competition and category filters.
/// 2. Split by competition (first-seen order; unnamed ones share one bucket).
/// 3. Split each competition into round-robin and knockout matches by stage label.
/// 4. Round-robin: one table per group label when two or more labels exist, else one table.
/// 5. Knockout: bracket rounds in phase order.
///
/// Competitions left with neither a table row nor a bracket round are dropped.
/// Always recomputes from scratch; the result shares nothing with the input.
pub fn compute_standings(matches: &[Match], filter: &StandingsFilter) -> Vec<StandingsGroup> {
    let mut competitions: Vec<(&str, Vec<&Match>)> = Vec::new();
    for m in matches.iter().filter(|m| filter.accepts(m)) {
        let key = m.competition_key();
        match competitions.iter_mut().find(|(c, _)| *c == key) {
            Some((_, bucket)) => bucket.push(m),
            None => competitions.push((key, vec![m])),
        }
    }

    competitions
        .into_iter()
        .filter_map(|(competition, bucket)| {
            let (round_robin, knockout): (Vec<&Match>, Vec<&Match>) = bucket
                .into_iter()
                .partition(|m| classify(m.stage()) == StageFormat::RoundRobin);

            let group = StandingsGroup {
                competition: competition.to_string(),
                sub_groups: round_robin_tables(&round_robin),
                bracket_rounds: assemble_bracket(&knockout),
            };
            let has_table = group.sub_groups.iter().any(|sub| !sub.entries.is_empty());
            if !has_table && group.bracket_rounds.is_empty() {
                log::debug!("Dropping {}: no finished group matches and no knockout rounds", competition);
                None
            } else {
                Some(group)
            }
        })
        .collect()
}

/// Tables for the round-robin part of one competition.
///
/// With several group labels every group gets a table, even one with nothing
/// played yet. A lone unlabeled table is only emitted once it has rows.
fn round_robin_tables(matches: &[&Match]) -> Vec<StandingsSubGroup> {
    let labels: BTreeSet<&str> = matches.iter().filter_map(|m| m.stage()).collect();

    if labels.len() <= 1 {
        let entries = build_table(matches);
        if entries.is_empty() {
            return Vec::new();
        }
        return vec![StandingsSubGroup { label: None, entries }];
    }

    let mut buckets: Vec<(Option<&str>, Vec<&Match>)> = Vec::new();
    for &m in matches {
        let label = m.stage();
        match buckets.iter_mut().find(|(l, _)| *l == label) {
            Some((_, bucket)) => bucket.push(m),
            None => buckets.push((label, vec![m])),
        }
    }

    buckets
        .into_iter()
        .map(|(label, bucket)| StandingsSubGroup {
            label: label.map(str::to_string),
            entries: build_table(&bucket),
        })
        .collect()
}

/// Sorted distinct competition names, for a competition selector.
pub fn available_competitions(matches: &[Match]) -> Vec<String> {
    matches
        .iter()
        .map(|m| m.competition.as_str())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Sorted distinct categories among the matches of the selected competition.
pub fn available_categories(matches: &[Match], competition: &Selection) -> Vec<String> {
    matches
        .iter()
        .filter(|m| competition.matches(Some(m.competition_key())))
        .filter_map(|m| m.category.as_deref())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
