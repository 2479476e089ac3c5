//! Standings tables, bracket rounds, and the filters that select them.

use crate::models::fixture::{Match, MatchId, Side};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of recent results kept in a team's streak.
pub const STREAK_LEN: usize = 5;

/// Result of one finished match from a team's point of view.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
}

/// One row of a league table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub points_for: u64,
    pub points_against: u64,
    /// `points_for - points_against`, filled once all matches are folded.
    pub diff: i64,
    /// League points: 2 per win, 1 per loss.
    pub points: u32,
    /// Most recent last, at most [`STREAK_LEN`] entries.
    pub streak: VecDeque<Outcome>,
}

impl StandingsEntry {
    /// Empty row for a team seen for the first time.
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            ..Self::default()
        }
    }

    /// Record a won match with the given score (own, opponent).
    pub fn add_win(&mut self, scored: u32, conceded: u32) {
        self.add_played(scored, conceded);
        self.won += 1;
        self.points += 2;
        self.push_outcome(Outcome::Win);
    }

    /// Record a lost match with the given score (own, opponent).
    pub fn add_loss(&mut self, scored: u32, conceded: u32) {
        self.add_played(scored, conceded);
        self.lost += 1;
        self.points += 1;
        self.push_outcome(Outcome::Loss);
    }

    fn add_played(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.points_for = self.points_for.saturating_add(u64::from(scored));
        self.points_against = self.points_against.saturating_add(u64::from(conceded));
    }

    fn push_outcome(&mut self, outcome: Outcome) {
        if self.streak.len() == STREAK_LEN {
            self.streak.pop_front();
        }
        self.streak.push_back(outcome);
    }

    /// Recompute the point differential from the running totals.
    pub fn refresh_diff(&mut self) {
        let total = |n: u64| i64::try_from(n).unwrap_or(i64::MAX);
        self.diff = total(self.points_for).saturating_sub(total(self.points_against));
    }
}

/// A league table, optionally labelled when a competition has several groups.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsSubGroup {
    /// `None` when the competition has no group distinction.
    pub label: Option<String>,
    /// Ranked: index 0 is first place.
    pub entries: Vec<StandingsEntry>,
}

/// Display projection of a knockout match. The winner is not stored; see [`BracketMatch::winner`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    pub home_team: String,
    pub away_team: String,
    pub score_home: Option<u32>,
    pub score_away: Option<u32>,
    pub date: String,
    pub time: String,
}

impl BracketMatch {
    /// Higher scorer, or `None` while pending or level.
    pub fn winner(&self) -> Option<Side> {
        match (self.score_home, self.score_away) {
            (Some(h), Some(a)) if h > a => Some(Side::Home),
            (Some(h), Some(a)) if a > h => Some(Side::Away),
            _ => None,
        }
    }
}

impl From<&Match> for BracketMatch {
    fn from(m: &Match) -> Self {
        Self {
            id: m.id.clone(),
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            score_home: m.score_home,
            score_away: m.score_away,
            date: m.date.clone(),
            time: m.time.clone(),
        }
    }
}

/// One knockout phase with its matches in kick-off order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketRound {
    /// Exact (trimmed) stage label, e.g. "Cuartos de Final".
    pub label: String,
    pub matches: Vec<BracketMatch>,
}

/// Everything shown for one competition: group tables and knockout rounds side by side.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsGroup {
    pub competition: String,
    pub sub_groups: Vec<StandingsSubGroup>,
    pub bracket_rounds: Vec<BracketRound>,
}

/// A filter value: everything, or one exact name.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Parse a selector value. Blank, "all", "Todos" and "Todas" select everything.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        let is_all = value.is_empty()
            || ["all", "todos", "todas"]
                .iter()
                .any(|w| value.eq_ignore_ascii_case(w));
        if is_all {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }

    /// Whether a (possibly absent) field value passes this filter.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::parse(value)
    }
}

impl From<Option<&str>> for Selection {
    fn from(value: Option<&str>) -> Self {
        value.map(Selection::parse).unwrap_or_default()
    }
}

/// Competition and category filters applied before grouping.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsFilter {
    #[serde(default)]
    pub competition: Selection,
    #[serde(default)]
    pub category: Selection,
}

impl StandingsFilter {
    pub fn new(competition: impl Into<Selection>, category: impl Into<Selection>) -> Self {
        Self {
            competition: competition.into(),
            category: category.into(),
        }
    }

    pub fn accepts(&self, m: &Match) -> bool {
        self.competition.matches(Some(m.competition_key()))
            && self.category.matches(m.category.as_deref())
    }
}
