//! Match record as supplied by the fixture snapshot.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a match (provider ids are kept as text).
pub type MatchId = String;

/// Bucket name used for matches that carry no competition.
pub const UNSPECIFIED_COMPETITION: &str = "Sin torneo";

/// Provider-side status of a match. Informational only: whether a match
/// counts as played is decided from its scores.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Finished,
}

/// Which side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

/// A single fixture entry. Read-only input to the standings engine.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// Free-text tournament name; empty when the provider had none.
    pub competition: String,
    pub category: Option<String>,
    /// Free-text group or phase descriptor ("Grupo A", "Semifinal", ...).
    pub stage_label: Option<String>,
    /// ISO `YYYY-MM-DD`, compared lexically.
    pub date: String,
    /// `HH:MM`, compared lexically.
    pub time: String,
    pub home_team: String,
    pub away_team: String,
    pub score_home: Option<u32>,
    pub score_away: Option<u32>,
    /// Bye/rest placeholder: never counts as played.
    pub is_rest: bool,
    #[serde(default)]
    pub status: MatchStatus,
}

impl Match {
    /// Create an unscored match between two teams. Other fields start empty.
    pub fn new(
        id: impl Into<MatchId>,
        competition: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            competition: competition.into(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            time: "00:00".to_string(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_stage(mut self, label: impl Into<String>) -> Self {
        self.stage_label = Some(label.into());
        self
    }

    pub fn on(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.date = date.into();
        self.time = time.into();
        self
    }

    pub fn with_score(mut self, home: u32, away: u32) -> Self {
        self.score_home = Some(home);
        self.score_away = Some(away);
        self.status = MatchStatus::Finished;
        self
    }

    pub fn rest(mut self) -> Self {
        self.is_rest = true;
        self
    }

    /// Both scores present and not a rest placeholder.
    pub fn is_finished(&self) -> bool {
        !self.is_rest && self.score_home.is_some() && self.score_away.is_some()
    }

    /// Competition bucket this match falls into.
    pub fn competition_key(&self) -> &str {
        if self.competition.is_empty() {
            UNSPECIFIED_COMPETITION
        } else {
            &self.competition
        }
    }

    /// Trimmed stage label, `None` when absent or blank.
    pub fn stage(&self) -> Option<&str> {
        self.stage_label
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Sort key for chronological ordering.
    pub(crate) fn kickoff(&self) -> (&str, &str) {
        (&self.date, &self.time)
    }
}
