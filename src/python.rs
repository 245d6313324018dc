use pyo3::exceptions::{PyIOError, PyKeyError, PyValueError};
use pyo3::prelude::*;

use crate::config::CompetitionConfig;
use crate::error::NrrError;
use crate::overs::{self, Overs};
use crate::points_table::PointsTable;
use crate::position::{self, RankRule, RequiredPerformance, Requirement};
use crate::request::PositionRequest;

impl From<NrrError> for PyErr {
    fn from(err: NrrError) -> PyErr {
        match err {
            NrrError::TeamNotFound { .. } => PyKeyError::new_err(err.to_string()),
            NrrError::Io(_) => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Points table exposed to Python.
#[pyclass(name = "PointsTable")]
#[derive(Clone)]
pub struct PyPointsTable {
    inner: PointsTable,
}

#[pymethods]
impl PyPointsTable {
    /// The built-in IPL 2022 league standings
    #[staticmethod]
    fn ipl_2022() -> Self {
        PyPointsTable {
            inner: PointsTable::ipl_2022(),
        }
    }

    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        Ok(PyPointsTable {
            inner: PointsTable::from_json(json)?,
        })
    }

    #[staticmethod]
    fn load(path: &str) -> PyResult<Self> {
        Ok(PyPointsTable {
            inner: PointsTable::load(path)?,
        })
    }

    fn to_json(&self) -> PyResult<String> {
        Ok(self.inner.to_json()?)
    }

    fn rank(&self, team: &str) -> PyResult<usize> {
        Ok(self.inner.rank(team)?)
    }

    fn team_names(&self) -> Vec<String> {
        self.inner.team_names()
    }

    /// (name, points, nrr) in standings order
    fn standings(&self) -> Vec<(String, u32, f64)> {
        self.inner
            .sorted()
            .into_iter()
            .map(|t| (t.name.clone(), t.points, t.nrr))
            .collect()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!("PointsTable({} teams)", self.inner.len())
    }
}

/// Answer to a position request.
///
/// `low`/`high` are runs for a restrict answer and overs (ball notation)
/// for a chase answer.
#[pyclass(name = "RequiredPerformance")]
pub struct PyRequiredPerformance {
    inner: RequiredPerformance,
}

impl PyRequiredPerformance {
    fn bounds(&self) -> Option<(f64, f64)> {
        match &self.inner.requirement {
            Requirement::Restrict(range) => range.map(|r| (r.low as f64, r.high as f64)),
            Requirement::Chase(range) => range.map(|r| (r.low.to_notation(), r.high.to_notation())),
        }
    }
}

#[pymethods]
impl PyRequiredPerformance {
    #[getter]
    fn possible(&self) -> bool {
        self.inner.is_possible()
    }

    #[getter]
    fn low(&self) -> Option<f64> {
        self.bounds().map(|(low, _)| low)
    }

    #[getter]
    fn high(&self) -> Option<f64> {
        self.bounds().map(|(_, high)| high)
    }

    #[getter]
    fn nrr_range(&self) -> Option<(f64, f64)> {
        self.inner.nrr_range()
    }

    fn message(&self) -> String {
        self.inner.message()
    }

    fn to_json(&self) -> PyResult<String> {
        Ok(self.inner.to_json()?)
    }

    fn __repr__(&self) -> String {
        format!("RequiredPerformance({:?})", self.inner.message())
    }
}

fn parse_rank_rule(rule: &str) -> PyResult<RankRule> {
    match rule {
        "exact" => Ok(RankRule::Exact),
        "or_better" => Ok(RankRule::OrBetter),
        other => Err(PyValueError::new_err(format!(
            "Unknown rank rule {:?} (expected \"exact\" or \"or_better\")",
            other
        ))),
    }
}

/// Validate a request and search for the outcomes that reach the desired position.
#[pyfunction]
#[pyo3(
    name = "calculate_required_performance",
    signature = (table, your_team, opp_team, desired_position, toss_result, runs, overs, rank_rule = None, max_overs = None)
)]
#[allow(clippy::too_many_arguments)]
fn py_calculate_required_performance(
    table: &PyPointsTable,
    your_team: &str,
    opp_team: &str,
    desired_position: usize,
    toss_result: &str,
    runs: u32,
    overs: f64,
    rank_rule: Option<&str>,
    max_overs: Option<f64>,
) -> PyResult<PyRequiredPerformance> {
    let mut config = CompetitionConfig::default();
    if let Some(max_overs) = max_overs {
        config.max_overs = Overs::try_from(max_overs)?;
    }

    let mut request = PositionRequest::new(
        your_team,
        opp_team,
        toss_result.parse()?,
        runs,
        Overs::try_from(overs)?,
        desired_position,
    );
    if let Some(rule) = rank_rule {
        request = request.with_rank_rule(parse_rank_rule(rule)?);
    }
    let request = request.with_defaults(&config);
    request.validate(&table.inner, &config)?;

    Ok(PyRequiredPerformance {
        inner: position::calculate_required_performance(&table.inner, &request)?,
    })
}

/// Ball notation (20.3) to decimal overs (20.5).
#[pyfunction]
#[pyo3(name = "to_decimal_overs")]
fn py_to_decimal_overs(ball_notation: f64) -> f64 {
    overs::to_decimal_overs(ball_notation)
}

/// Decimal overs (20.5) to ball notation (20.3).
#[pyfunction]
#[pyo3(name = "to_ball_notation")]
fn py_to_ball_notation(decimal_overs: f64) -> f64 {
    overs::to_ball_notation(decimal_overs)
}

/// Python module definition
#[pymodule]
fn nrr_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<PyPointsTable>()?;
    m.add_class::<PyRequiredPerformance>()?;

    // Functions
    m.add_function(wrap_pyfunction!(py_calculate_required_performance, m)?)?;
    m.add_function(wrap_pyfunction!(py_to_decimal_overs, m)?)?;
    m.add_function(wrap_pyfunction!(py_to_ball_notation, m)?)?;

    // Constants
    m.add("BALLS_PER_OVER", crate::constants::BALLS_PER_OVER)?;
    m.add("POINTS_PER_WIN", crate::constants::POINTS_PER_WIN)?;
    m.add("DEFAULT_MAX_OVERS", crate::constants::DEFAULT_MAX_OVERS)?;

    Ok(())
}
