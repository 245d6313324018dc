use crate::constants::{NRR_DECIMALS, POINTS_PER_WIN};
use crate::overs::Overs;
use crate::team::{RunsOvers, TeamRecord};

/// Round a run rate to the published precision (three decimals).
pub fn round_nrr(value: f64) -> f64 {
    let factor = 10f64.powi(NRR_DECIMALS);
    (value * factor).round() / factor
}

/// Unrounded net run rate: runs scored per over minus runs conceded per over.
pub fn net_run_rate(scored: &RunsOvers, conceded: &RunsOvers) -> f64 {
    scored.run_rate() - conceded.run_rate()
}

/// Update a team's record with one completed match.
///
/// # Arguments
/// * `team` - Record before the match
/// * `runs_scored` - Runs the team made
/// * `overs_played` - Overs the team batted
/// * `runs_conceded` - Runs the opponent made
/// * `overs_bowled` - Overs the team bowled
/// * `won` - Whether the team won
///
/// # Returns
/// A new record with cumulative figures, results, points and NRR updated.
/// The input record is left untouched.
pub fn apply_match_result(
    team: &TeamRecord,
    runs_scored: u32,
    overs_played: Overs,
    runs_conceded: u32,
    overs_bowled: Overs,
    won: bool,
) -> TeamRecord {
    let scored = team.scored.with_innings(runs_scored, overs_played);
    let conceded = team.conceded.with_innings(runs_conceded, overs_bowled);

    TeamRecord {
        name: team.name.clone(),
        matches: team.matches + 1,
        won: team.won + u32::from(won),
        lost: team.lost + u32::from(!won),
        nrr: round_nrr(net_run_rate(&scored, &conceded)),
        scored,
        conceded,
        points: team.points + if won { POINTS_PER_WIN } else { 0 },
    }
}

/// NRR a team would have after a match, without building the new record.
pub fn calculate_new_nrr(
    team: &TeamRecord,
    runs_scored: u32,
    overs_played: Overs,
    runs_conceded: u32,
    overs_bowled: Overs,
) -> f64 {
    let scored = team.scored.with_innings(runs_scored, overs_played);
    let conceded = team.conceded.with_innings(runs_conceded, overs_bowled);
    round_nrr(net_run_rate(&scored, &conceded))
}
