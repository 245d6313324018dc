use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::POINTS_PER_WIN;
use crate::error::{NrrError, Result};
use crate::nrr::{net_run_rate, round_nrr};
use crate::overs::Overs;

/// Cumulative runs and overs for one side of a team's record.
///
/// Written as `"<runs>/<overs>"` with overs in ball notation, e.g. `"1130/133.1"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RunsOvers {
    pub runs: u32,
    pub overs: Overs,
}

impl RunsOvers {
    pub fn new(runs: u32, overs: Overs) -> Self {
        RunsOvers { runs, overs }
    }

    /// Runs per (decimal) over. Zero overs gives a rate of zero.
    pub fn run_rate(&self) -> f64 {
        if self.overs.is_zero() {
            0.0
        } else {
            self.runs as f64 / self.overs.as_decimal()
        }
    }

    /// Add one innings to the running total
    pub fn with_innings(&self, runs: u32, overs: Overs) -> Self {
        RunsOvers {
            runs: self.runs + runs,
            overs: self.overs + overs,
        }
    }
}

impl FromStr for RunsOvers {
    type Err = NrrError;

    fn from_str(s: &str) -> Result<Self> {
        let (runs, overs) = s
            .split_once('/')
            .ok_or_else(|| NrrError::InvalidRunsOvers(s.to_string()))?;
        let runs = runs
            .trim()
            .parse()
            .map_err(|_| NrrError::InvalidRunsOvers(s.to_string()))?;
        let overs = overs.parse()?;
        Ok(RunsOvers { runs, overs })
    }
}

impl TryFrom<String> for RunsOvers {
    type Error = NrrError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RunsOvers> for String {
    fn from(value: RunsOvers) -> String {
        value.to_string()
    }
}

impl fmt::Display for RunsOvers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.runs, self.overs)
    }
}

/// One team's line in the points table.
///
/// Records are treated as immutable snapshots: a match produces a new record
/// (see [`crate::nrr::apply_match_result`]) rather than editing this one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,

    pub matches: u32,

    pub won: u32,

    pub lost: u32,

    /// Net run rate, rounded to three decimals
    pub nrr: f64,

    /// Runs scored and overs faced, across all matches
    #[serde(rename = "for")]
    pub scored: RunsOvers,

    /// Runs conceded and overs bowled, across all matches
    #[serde(rename = "against")]
    pub conceded: RunsOvers,

    pub points: u32,
}

impl TeamRecord {
    /// Create a record from a win/loss count and cumulative figures.
    ///
    /// Matches, points and NRR are derived.
    pub fn new(name: &str, won: u32, lost: u32, scored: RunsOvers, conceded: RunsOvers) -> Self {
        TeamRecord {
            name: name.to_string(),
            matches: won + lost,
            won,
            lost,
            nrr: round_nrr(net_run_rate(&scored, &conceded)),
            scored,
            conceded,
            points: won * POINTS_PER_WIN,
        }
    }

    /// Override the derived NRR with a published figure
    pub fn with_nrr(mut self, nrr: f64) -> Self {
        self.nrr = nrr;
        self
    }

    /// Check `matches == won + lost` and `points == 2 * won`.
    pub fn check_invariants(&self) -> Result<()> {
        if self.matches != self.won + self.lost {
            return Err(NrrError::InconsistentRecord {
                name: self.name.clone(),
                reason: format!(
                    "{} matches but {} won and {} lost",
                    self.matches, self.won, self.lost
                ),
            });
        }
        if self.points != self.won * POINTS_PER_WIN {
            return Err(NrrError::InconsistentRecord {
                name: self.name.clone(),
                reason: format!("{} points from {} wins", self.points, self.won),
            });
        }
        Ok(())
    }
}

impl fmt::Display for TeamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: P{} W{} L{} | {} pts | NRR {:+.3} | {} | {}",
            self.name,
            self.matches,
            self.won,
            self.lost,
            self.points,
            self.nrr,
            self.scored,
            self.conceded
        )
    }
}
