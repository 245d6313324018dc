//! NRR Core - cricket points table and net run rate position finder.
//!
//! Given a league table, a team, an opponent and a desired finishing
//! position, works out which results of the next match put the team there:
//! the opponent totals to restrict to when batting first, or the overs in
//! which to complete a chase when bowling first. Optional Python bindings
//! are built with the `python` feature.

pub mod config;
pub mod constants;
pub mod error;
pub mod match_sim;
pub mod nrr;
pub mod overs;
pub mod points_table;
pub mod position;
pub mod request;
pub mod team;

#[cfg(feature = "python")]
mod python;

pub use config::CompetitionConfig;
pub use constants::{BALLS_PER_OVER, DEFAULT_MAX_OVERS, NRR_DECIMALS, POINTS_PER_WIN};
pub use error::{NrrError, Result};
pub use match_sim::simulate_match;
pub use nrr::{apply_match_result, calculate_new_nrr, net_run_rate, round_nrr};
pub use overs::{to_ball_notation, to_decimal_overs, Overs};
pub use points_table::PointsTable;
pub use position::{
    calculate_required_performance, find_overs_to_chase, find_runs_to_restrict,
    performance_for_all_positions, PositionTarget, QualifyingRange, RankRule, RequiredPerformance,
    Requirement, SearchResult,
};
pub use request::{PositionRequest, Toss};
pub use team::{RunsOvers, TeamRecord};
