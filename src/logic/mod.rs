//! Standings logic: stage classification, league tables, knockout brackets.

mod bracket;
mod stage;
mod standings;
mod table;

pub use bracket::assemble_bracket;
pub use stage::{classify, is_knockout_stage, knockout_phase_rank, StageFormat, UNRANKED_PHASE};
pub use standings::{available_categories, available_competitions, compute_standings};
pub use table::{build_table, compare_rank};
