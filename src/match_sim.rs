use crate::error::Result;
use crate::nrr::apply_match_result;
use crate::points_table::PointsTable;
use crate::team::RunsOvers;

/// Play a hypothetical match on a copy of the table.
///
/// # Arguments
/// * `table` - Standings before the match (not modified)
/// * `team_a` - First team
/// * `team_b` - Second team
/// * `innings_a` - Runs and overs of `team_a`'s innings
/// * `innings_b` - Runs and overs of `team_b`'s innings
///
/// # Returns
/// A new table with both teams' records replaced. `team_a` wins only with
/// strictly more runs; level scores count as a loss for `team_a`. Fails with
/// `TeamNotFound` if either name is missing.
pub fn simulate_match(
    table: &PointsTable,
    team_a: &str,
    team_b: &str,
    innings_a: RunsOvers,
    innings_b: RunsOvers,
) -> Result<PointsTable> {
    let index_a = table.position_of(team_a)?;
    let index_b = table.position_of(team_b)?;

    let a_won = innings_a.runs > innings_b.runs;

    let record_a = &table.teams()[index_a];
    let record_b = &table.teams()[index_b];
    let updated_a = apply_match_result(
        record_a,
        innings_a.runs,
        innings_a.overs,
        innings_b.runs,
        innings_b.overs,
        a_won,
    );
    let updated_b = apply_match_result(
        record_b,
        innings_b.runs,
        innings_b.overs,
        innings_a.runs,
        innings_a.overs,
        !a_won,
    );

    let mut simulated = table.clone();
    simulated.replace(index_a, updated_a);
    simulated.replace(index_b, updated_b);
    Ok(simulated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NrrError;
    use crate::overs::Overs;

    const RR: &str = "Rajasthan Royals";
    const DC: &str = "Delhi Capitals";

    fn innings(runs: u32, overs: u32) -> RunsOvers {
        RunsOvers::new(runs, Overs::new(overs, 0))
    }

    #[test]
    fn test_simulate_updates_both_teams() {
        let table = PointsTable::ipl_2022();
        let after = simulate_match(&table, RR, DC, innings(120, 20), innings(69, 20)).unwrap();

        let rr = after.team(RR).unwrap();
        let dc = after.team(DC).unwrap();
        assert_eq!((rr.won, rr.lost, rr.points), (4, 4, 8));
        assert_eq!((dc.won, dc.lost, dc.points), (4, 4, 8));
        assert!((rr.nrr - 0.596).abs() < 1e-9);
        assert!((dc.nrr - -0.096).abs() < 1e-9);

        // A's "for" is B's "against"
        assert_eq!(rr.scored.runs - 1066, dc.conceded.runs - 1136);
        assert_eq!(rr.conceded.runs - 1094, dc.scored.runs - 1085);

        assert_eq!(after.rank(RR).unwrap(), 3);
    }

    #[test]
    fn test_simulate_leaves_input_untouched() {
        let table = PointsTable::ipl_2022();
        let _ = simulate_match(&table, RR, DC, innings(200, 20), innings(100, 20)).unwrap();
        assert_eq!(table, PointsTable::ipl_2022());
    }

    #[test]
    fn test_level_scores_lose_for_team_a() {
        let table = PointsTable::ipl_2022();
        let after = simulate_match(&table, RR, DC, innings(150, 20), innings(150, 20)).unwrap();
        assert_eq!(after.team(RR).unwrap().lost, 5);
        assert_eq!(after.team(DC).unwrap().won, 5);
    }

    #[test]
    fn test_unknown_team_propagates() {
        let table = PointsTable::ipl_2022();
        let result = simulate_match(&table, RR, "Lucknow Super Giants", innings(150, 20), innings(100, 20));
        assert!(matches!(result, Err(NrrError::TeamNotFound { name }) if name == "Lucknow Super Giants"));
    }

    #[test]
    fn test_other_teams_unchanged() {
        let table = PointsTable::ipl_2022();
        let after = table.with_match(RR, DC, innings(150, 20), innings(100, 20)).unwrap();
        for name in ["Chennai Super Kings", "Royal Challengers Bangalore", "Mumbai Indians"] {
            assert_eq!(after.team(name).unwrap(), table.team(name).unwrap());
        }
    }
}
