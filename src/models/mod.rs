//! Data structures for the fixture: match records, standings tables, bracket rounds.

mod fixture;
mod standings;

pub use fixture::{Match, MatchId, MatchStatus, Side, UNSPECIFIED_COMPETITION};
pub use standings::{
    BracketMatch, BracketRound, Outcome, Selection, StandingsEntry, StandingsFilter,
    StandingsGroup, StandingsSubGroup, STREAK_LEN,
};
