//! Fixture standings: league tables and knockout brackets computed from match results.

pub mod import;
pub mod logic;
pub mod models;

pub use import::{
    filter_season, load_matches, normalize_date, parse_matches, FixtureFormat, ImportError,
    RawFixtureRow,
};
pub use logic::{
    assemble_bracket, available_categories, available_competitions, build_table, classify,
    compute_standings, is_knockout_stage, knockout_phase_rank, StageFormat,
};
pub use models::{
    BracketMatch, BracketRound, Match, MatchId, MatchStatus, Outcome, Selection, Side,
    StandingsEntry, StandingsFilter, StandingsGroup, StandingsSubGroup,
};
