//! League table: fold finished matches into per-team totals and rank them.

use crate::models::{Match, StandingsEntry};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Build the ranked table for one group of round-robin matches.
///
/// 1. Walk matches in kick-off order (date, time, id) so streaks follow the calendar.
/// 2. Skip rest placeholders, matches missing a score, and level scores.
/// 3. Winner gets +2 points and a W, loser +1 and an L.
/// 4. Rank by points, then differential, then points scored, then team name.
///
/// Teams only appear once they have a finished match.
pub fn build_table(matches: &[&Match]) -> Vec<StandingsEntry> {
    let mut ordered = matches.to_vec();
    ordered.sort_by(|a, b| a.kickoff().cmp(&b.kickoff()).then_with(|| a.id.cmp(&b.id)));

    let mut entries: Vec<StandingsEntry> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in ordered {
        let (Some(sh), Some(sa)) = (m.score_home, m.score_away) else {
            continue;
        };
        if m.is_rest {
            continue;
        }
        if sh == sa {
            log::debug!(
                "Ignoring level result {}-{} in match {} ({} vs {})",
                sh,
                sa,
                m.id,
                m.home_team,
                m.away_team
            );
            continue;
        }

        let home = entry_index(&mut entries, &mut index, &m.home_team);
        let away = entry_index(&mut entries, &mut index, &m.away_team);
        if sh > sa {
            entries[home].add_win(sh, sa);
            entries[away].add_loss(sa, sh);
        } else {
            entries[away].add_win(sa, sh);
            entries[home].add_loss(sh, sa);
        }
    }

    for e in &mut entries {
        e.refresh_diff();
    }
    entries.sort_by(compare_rank);
    entries
}

/// Position of a team's row, creating it on first sight.
fn entry_index<'a>(
    entries: &mut Vec<StandingsEntry>,
    index: &mut HashMap<&'a str, usize>,
    team: &'a str,
) -> usize {
    *index.entry(team).or_insert_with(|| {
        entries.push(StandingsEntry::new(team));
        entries.len() - 1
    })
}

/// Table order: better team first.
pub fn compare_rank(a: &StandingsEntry, b: &StandingsEntry) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.diff.cmp(&a.diff))
        .then_with(|| b.points_for.cmp(&a.points_for))
        .then_with(|| a.team.cmp(&b.team))
}
