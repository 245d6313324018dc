use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::DEFAULT_MAX_OVERS;
use crate::error::Result;
use crate::overs::Overs;
use crate::position::RankRule;

/// Competition-level settings for validating and answering requests.
///
/// Every field has a default, so `{}` is a valid config document.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompetitionConfig {
    /// Longest innings a request may ask about
    pub max_overs: Overs,

    /// Rank rule for requests that do not name one
    pub rank_rule: RankRule,
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        CompetitionConfig {
            max_overs: Overs::new(DEFAULT_MAX_OVERS, 0),
            rank_rule: RankRule::default(),
        }
    }
}

impl CompetitionConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        debug!("loaded competition config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompetitionConfig::default();
        assert_eq!(config.max_overs, Overs::new(50, 0));
        assert_eq!(config.rank_rule, RankRule::Exact);
        assert_eq!(CompetitionConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn test_from_json() {
        let config = CompetitionConfig::from_json(r#"{"maxOvers": 20, "rankRule": "or_better"}"#).unwrap();
        assert_eq!(config.max_overs, Overs::new(20, 0));
        assert_eq!(config.rank_rule, RankRule::OrBetter);
    }

    #[test]
    fn test_from_json_rejects_bad_overs() {
        assert!(CompetitionConfig::from_json(r#"{"maxOvers": 19.9}"#).is_err());
    }
}
