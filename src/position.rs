use log::{debug, trace, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::match_sim::simulate_match;
use crate::overs::Overs;
use crate::points_table::PointsTable;
use crate::request::{PositionRequest, Toss};
use crate::team::RunsOvers;

/// How a simulated rank is compared with the desired position.
///
/// The two rules give different answers: `OrBetter` also accepts outcomes
/// that lift the team above the desired position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankRule {
    /// Finish exactly at the desired position
    #[default]
    Exact,
    /// Finish at the desired position or higher
    OrBetter,
}

/// Desired standings position plus the rule used to judge it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionTarget {
    pub position: usize,
    pub rule: RankRule,
}

impl PositionTarget {
    pub fn exactly(position: usize) -> Self {
        PositionTarget {
            position,
            rule: RankRule::Exact,
        }
    }

    pub fn or_better(position: usize) -> Self {
        PositionTarget {
            position,
            rule: RankRule::OrBetter,
        }
    }

    pub fn is_met(&self, rank: usize) -> bool {
        match self.rule {
            RankRule::Exact => rank == self.position,
            RankRule::OrBetter => rank <= self.position,
        }
    }
}

/// First and last qualifying candidates of a search, in enumeration order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifyingRange<T> {
    pub low: T,
    pub high: T,
    /// Our NRR after the `low` outcome
    pub nrr_at_low: f64,
    /// Our NRR after the `high` outcome
    pub nrr_at_high: f64,
    /// Number of qualifying candidates
    pub qualifying: usize,
    /// False if some candidate between `low` and `high` did not qualify,
    /// in which case the range overstates the qualifying set
    pub contiguous: bool,
}

/// `None` when no candidate reaches the desired position.
pub type SearchResult<T> = Option<QualifyingRange<T>>;

struct RangeTracker<T> {
    range: SearchResult<T>,
    gap: bool,
}

impl<T: Copy> RangeTracker<T> {
    fn new() -> Self {
        RangeTracker {
            range: None,
            gap: false,
        }
    }

    fn observe(&mut self, candidate: T, nrr: f64, qualifies: bool) {
        if !qualifies {
            self.gap = self.range.is_some();
            return;
        }
        match self.range.as_mut() {
            None => {
                self.range = Some(QualifyingRange {
                    low: candidate,
                    high: candidate,
                    nrr_at_low: nrr,
                    nrr_at_high: nrr,
                    qualifying: 1,
                    contiguous: true,
                });
            }
            Some(range) => {
                range.high = candidate;
                range.nrr_at_high = nrr;
                range.qualifying += 1;
                if self.gap {
                    range.contiguous = false;
                }
            }
        }
        self.gap = false;
    }
}

/// Simulate every candidate outcome in order and track the qualifying ones.
///
/// `innings` maps a candidate to (our innings, their innings).
fn scan<T, I, F>(
    table: &PointsTable,
    your_team: &str,
    opp_team: &str,
    target: PositionTarget,
    candidates: I,
    innings: F,
) -> Result<SearchResult<T>>
where
    T: Copy + fmt::Debug,
    I: IntoIterator<Item = T>,
    F: Fn(T) -> (RunsOvers, RunsOvers),
{
    let mut tracker = RangeTracker::new();

    for candidate in candidates {
        let (yours, theirs) = innings(candidate);
        let simulated = simulate_match(table, your_team, opp_team, yours, theirs)?;
        let rank = simulated.rank(your_team)?;
        let nrr = simulated.team(your_team)?.nrr;
        trace!("{:?}: {} rank {} nrr {:.3}", candidate, your_team, rank, nrr);
        tracker.observe(candidate, nrr, target.is_met(rank));
    }

    if let Some(range) = &tracker.range {
        if !range.contiguous {
            warn!(
                "qualifying outcomes for {} between {:?} and {:?} are not contiguous ({} qualify)",
                your_team, range.low, range.high, range.qualifying
            );
        }
    }
    Ok(tracker.range)
}

/// Batting first: the range of opponent scores that puts us at the target.
///
/// # Arguments
/// * `table` - Current standings (not modified)
/// * `your_team` - Team batting first
/// * `opp_team` - Opponent
/// * `target` - Desired position and rank rule
/// * `runs_scored` - Our total
/// * `overs` - Overs both sides bat
///
/// # Returns
/// The lowest and highest opponent totals in `0..runs_scored` that satisfy
/// `target`, with our NRR at each end.
pub fn find_runs_to_restrict(
    table: &PointsTable,
    your_team: &str,
    opp_team: &str,
    target: PositionTarget,
    runs_scored: u32,
    overs: Overs,
) -> Result<SearchResult<u32>> {
    table.team(your_team)?;
    table.team(opp_team)?;
    debug!(
        "restrict search: {} {}/{} vs {}, {:?}, {} candidates",
        your_team, runs_scored, overs, opp_team, target, runs_scored
    );

    let yours = RunsOvers::new(runs_scored, overs);
    let result = scan(table, your_team, opp_team, target, 0..runs_scored, |conceded| {
        (yours, RunsOvers::new(conceded, overs))
    })?;

    debug!("restrict search result: {:?}", result);
    Ok(result)
}

/// Bowling first: the range of overs in which chasing down the target puts us there.
///
/// The opponent is taken to have made `runs_to_chase - 1` in `total_overs`,
/// and we reach `runs_to_chase` in each legal overs value up to `total_overs`.
pub fn find_overs_to_chase(
    table: &PointsTable,
    your_team: &str,
    opp_team: &str,
    target: PositionTarget,
    runs_to_chase: u32,
    total_overs: Overs,
) -> Result<SearchResult<Overs>> {
    table.team(your_team)?;
    table.team(opp_team)?;

    // Nothing to chase: there is no opponent total one run short of zero
    let Some(opp_runs) = runs_to_chase.checked_sub(1) else {
        debug!("chase search: {} has no target to chase", your_team);
        return Ok(None);
    };
    debug!(
        "chase search: {} chasing {} in {} vs {}, {:?}, {} candidates",
        your_team,
        runs_to_chase,
        total_overs,
        opp_team,
        target,
        total_overs.balls()
    );

    let theirs = RunsOvers::new(opp_runs, total_overs);
    let result = scan(
        table,
        your_team,
        opp_team,
        target,
        Overs::up_to(total_overs),
        |overs| (RunsOvers::new(runs_to_chase, overs), theirs),
    )?;

    debug!("chase search result: {:?}", result);
    Ok(result)
}

/// Search outcome for one request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "scenario", content = "range", rename_all = "snake_case")]
pub enum Requirement {
    /// Opponent totals to restrict to
    Restrict(SearchResult<u32>),
    /// Overs in which to complete the chase
    Chase(SearchResult<Overs>),
}

/// A request together with its answer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredPerformance {
    pub request: PositionRequest,
    pub requirement: Requirement,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    #[serde(flatten)]
    performance: &'a RequiredPerformance,
    possible: bool,
    message: String,
}

impl RequiredPerformance {
    pub fn is_possible(&self) -> bool {
        match &self.requirement {
            Requirement::Restrict(range) => range.is_some(),
            Requirement::Chase(range) => range.is_some(),
        }
    }

    /// Our NRR at the (low, high) ends of the range
    pub fn nrr_range(&self) -> Option<(f64, f64)> {
        match &self.requirement {
            Requirement::Restrict(range) => range.map(|r| (r.nrr_at_low, r.nrr_at_high)),
            Requirement::Chase(range) => range.map(|r| (r.nrr_at_low, r.nrr_at_high)),
        }
    }

    /// One-line answer for display.
    pub fn message(&self) -> String {
        let req = &self.request;
        match &self.requirement {
            Requirement::Restrict(Some(range)) => format!(
                "If {} scores {} runs in {} overs, {} needs to restrict {} between {} to {} runs in {} overs.",
                req.your_team,
                req.runs,
                req.overs,
                req.your_team,
                req.opp_team,
                range.low,
                range.high,
                req.overs
            ),
            Requirement::Chase(Some(range)) => format!(
                "{} needs to chase {} runs between {} and {} overs.",
                req.your_team, req.runs, range.low, range.high
            ),
            _ => format!(
                "It is not possible for {} to reach position {} in this scenario.",
                req.your_team, req.desired_position
            ),
        }
    }

    /// JSON document with the request echoed back, the range, and the message.
    pub fn to_json(&self) -> Result<String> {
        let report = Report {
            performance: self,
            possible: self.is_possible(),
            message: self.message(),
        };
        Ok(serde_json::to_string(&report)?)
    }
}

impl fmt::Display for RequiredPerformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Answer a request: restrict search when batting first, chase search when bowling first.
pub fn calculate_required_performance(
    table: &PointsTable,
    request: &PositionRequest,
) -> Result<RequiredPerformance> {
    let target = request.target();
    let requirement = match request.toss_result {
        Toss::Batting => Requirement::Restrict(find_runs_to_restrict(
            table,
            &request.your_team,
            &request.opp_team,
            target,
            request.runs,
            request.overs,
        )?),
        Toss::Bowling => Requirement::Chase(find_overs_to_chase(
            table,
            &request.your_team,
            &request.opp_team,
            target,
            request.runs,
            request.overs,
        )?),
    };

    Ok(RequiredPerformance {
        request: request.clone(),
        requirement,
    })
}

/// Answer the same request for every position in the table.
///
/// Each position is an independent search, so they run in parallel.
/// Results are ordered by position, starting at 1.
pub fn performance_for_all_positions(
    table: &PointsTable,
    request: &PositionRequest,
) -> Result<Vec<RequiredPerformance>> {
    (1..=table.len())
        .into_par_iter()
        .map(|position| {
            let mut positioned = request.clone();
            positioned.desired_position = position;
            calculate_required_performance(table, &positioned)
        })
        .collect()
}
