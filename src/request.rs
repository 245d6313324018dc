use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::CompetitionConfig;
use crate::error::{NrrError, Result};
use crate::overs::Overs;
use crate::points_table::PointsTable;
use crate::position::{PositionTarget, RankRule};

/// Which half of the match is already known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Toss {
    /// Batting first: our score is known, search the opponent's
    Batting,
    /// Bowling first: the target is known, search the overs taken to reach it
    Bowling,
}

impl FromStr for Toss {
    type Err = NrrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "batting" => Ok(Toss::Batting),
            "bowling" => Ok(Toss::Bowling),
            _ => Err(NrrError::InvalidScenario(s.to_string())),
        }
    }
}

impl TryFrom<String> for Toss {
    type Error = NrrError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Toss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toss::Batting => write!(f, "batting"),
            Toss::Bowling => write!(f, "bowling"),
        }
    }
}

/// A "what do we need to finish at position N" question.
///
/// `runs` and `overs` mean different things per toss: batting first they
/// are our innings; bowling first `runs` is the score we chase to and
/// `overs` the innings length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRequest {
    pub your_team: String,
    pub opp_team: String,
    pub overs: Overs,
    pub desired_position: usize,
    pub toss_result: Toss,
    pub runs: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_rule: Option<RankRule>,
}

impl PositionRequest {
    pub fn new(
        your_team: &str,
        opp_team: &str,
        toss_result: Toss,
        runs: u32,
        overs: Overs,
        desired_position: usize,
    ) -> Self {
        PositionRequest {
            your_team: your_team.to_string(),
            opp_team: opp_team.to_string(),
            overs,
            desired_position,
            toss_result,
            runs,
            rank_rule: None,
        }
    }

    pub fn with_rank_rule(mut self, rule: RankRule) -> Self {
        self.rank_rule = Some(rule);
        self
    }

    /// Fill in anything the request left to the competition config.
    pub fn with_defaults(mut self, config: &CompetitionConfig) -> Self {
        self.rank_rule.get_or_insert(config.rank_rule);
        self
    }

    pub fn target(&self) -> PositionTarget {
        PositionTarget {
            position: self.desired_position,
            rule: self.rank_rule.unwrap_or_default(),
        }
    }

    /// Check the request against a table before searching.
    ///
    /// Reports every problem at once as `NrrError::Validation`.
    pub fn validate(&self, table: &PointsTable, config: &CompetitionConfig) -> Result<()> {
        let mut errors = Vec::new();

        let your_team = self.your_team.trim();
        let opp_team = self.opp_team.trim();
        if your_team.is_empty() {
            errors.push("Your team is required".to_string());
        } else if !table.contains(&self.your_team) {
            errors.push(format!("{} is not in the points table", self.your_team));
        }
        if opp_team.is_empty() {
            errors.push("Opposition team is required".to_string());
        } else if !table.contains(&self.opp_team) {
            errors.push(format!("{} is not in the points table", self.opp_team));
        }
        if !your_team.is_empty() && your_team == opp_team {
            errors.push("Your team and opposition team cannot be the same".to_string());
        }

        if self.overs.is_zero() || self.overs > config.max_overs {
            errors.push(format!("Overs must be between 0.1 and {}", config.max_overs));
        }

        if self.desired_position < 1 || self.desired_position > table.len() {
            errors.push(format!(
                "Desired position must be between 1 and {}",
                table.len()
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(NrrError::Validation(errors))
        }
    }
}
