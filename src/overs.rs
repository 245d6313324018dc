use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use crate::constants::BALLS_PER_OVER;
use crate::error::{NrrError, Result};

/// Convert ball notation (e.g. 20.3 = 20 overs and 3 balls) to true decimal overs (20.5).
///
/// The first decimal digit is read as a ball count. Digits above 5 are not
/// rejected here; they simply produce a value past the next whole over.
pub fn to_decimal_overs(ball_notation: f64) -> f64 {
    let whole = ball_notation.floor();
    let balls = ((ball_notation - whole) * 10.0).round();
    whole + balls / BALLS_PER_OVER as f64
}

/// Convert decimal overs (20.5) back to ball notation (20.3).
///
/// Exact inverse of [`to_decimal_overs`] for ball counts 0-5.
pub fn to_ball_notation(decimal_overs: f64) -> f64 {
    let mut whole = decimal_overs.floor();
    let mut balls = ((decimal_overs - whole) * BALLS_PER_OVER as f64).round();
    if balls >= BALLS_PER_OVER as f64 {
        whole += 1.0;
        balls = 0.0;
    }
    (whole * 10.0 + balls) / 10.0
}

/// An overs figure held as a count of balls bowled.
///
/// Keeping the ball count as an integer means cumulative totals never drift;
/// ball notation and decimal overs are both derived on demand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Overs {
    balls: u32,
}

impl Overs {
    pub const fn from_balls(balls: u32) -> Self {
        Overs { balls }
    }

    /// `completed` whole overs plus `balls` deliveries of the next one.
    pub const fn new(completed: u32, balls: u32) -> Self {
        Overs {
            balls: completed * BALLS_PER_OVER + balls,
        }
    }

    /// Lenient conversion from ball notation, mirroring [`to_decimal_overs`].
    ///
    /// Never fails: negative or non-finite input collapses to zero and an
    /// out-of-range ball digit spills into the following over. Use
    /// `Overs::try_from` where the input has to be a legal figure.
    pub fn from_notation(value: f64) -> Self {
        let whole = value.floor();
        let ball = ((value - whole) * 10.0).round();
        Overs {
            balls: (whole as u32)
                .saturating_mul(BALLS_PER_OVER)
                .saturating_add(ball as u32),
        }
    }

    pub fn balls(self) -> u32 {
        self.balls
    }

    pub fn completed_overs(self) -> u32 {
        self.balls / BALLS_PER_OVER
    }

    /// Balls bowled in the over currently in progress (0-5)
    pub fn remaining_balls(self) -> u32 {
        self.balls % BALLS_PER_OVER
    }

    pub fn as_decimal(self) -> f64 {
        self.balls as f64 / BALLS_PER_OVER as f64
    }

    pub fn to_notation(self) -> f64 {
        (self.completed_overs() * 10 + self.remaining_balls()) as f64 / 10.0
    }

    pub fn is_zero(self) -> bool {
        self.balls == 0
    }

    /// Every legal overs value in `(0, limit]`, ascending.
    ///
    /// Generated over whole overs and balls 0-5, so the sequence goes
    /// `..., 3.4, 3.5, 4.0, 4.1, ...` and never yields a `.6`-`.9` figure.
    pub fn up_to(limit: Overs) -> impl Iterator<Item = Overs> {
        (0..=limit.completed_overs())
            .flat_map(|over| (0..BALLS_PER_OVER).map(move |ball| Overs::new(over, ball)))
            .filter(move |overs| !overs.is_zero() && *overs <= limit)
    }
}

impl Add for Overs {
    type Output = Overs;

    fn add(self, rhs: Overs) -> Overs {
        Overs {
            balls: self.balls + rhs.balls,
        }
    }
}

impl TryFrom<f64> for Overs {
    type Error = NrrError;

    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(NrrError::InvalidOvers(value.to_string()));
        }
        let scaled = value * 10.0;
        let tenths = scaled.round();
        if (scaled - tenths).abs() > 1e-6 || tenths > u32::MAX as f64 {
            return Err(NrrError::InvalidOvers(format!(
                "{value} is not an overs.balls figure"
            )));
        }
        let tenths = tenths as u32;
        let (completed, ball) = (tenths / 10, tenths % 10);
        if ball >= BALLS_PER_OVER {
            return Err(NrrError::InvalidOvers(format!(
                "{value} has {ball} balls in an over"
            )));
        }
        Ok(Overs::new(completed, ball))
    }
}

impl From<Overs> for f64 {
    fn from(overs: Overs) -> f64 {
        overs.to_notation()
    }
}

impl FromStr for Overs {
    type Err = NrrError;

    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| NrrError::InvalidOvers(s.to_string()))?;
        Overs::try_from(value)
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.remaining_balls() {
            0 => write!(f, "{}", self.completed_overs()),
            balls => write!(f, "{}.{}", self.completed_overs(), balls),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_to_decimal_overs() {
        assert!((to_decimal_overs(20.3) - 20.5).abs() < 1e-12);
        assert!((to_decimal_overs(133.1) - (133.0 + 1.0 / 6.0)).abs() < 1e-12);
        assert_eq!(to_decimal_overs(140.0), 140.0);
    }

    #[test]
    fn test_to_decimal_overs_tolerates_bad_digit() {
        // 4.7 is not a legal figure; it reads as 4 overs and 7 balls
        let value = to_decimal_overs(4.7);
        assert!(value.is_finite());
        assert!((value - (4.0 + 7.0 / 6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_to_ball_notation() {
        assert_eq!(to_ball_notation(20.5), 20.3);
        assert_eq!(to_ball_notation(14.0 + 2.0 / 6.0), 14.2);
        assert_eq!(to_ball_notation(20.0), 20.0);
    }

    #[test]
    fn test_to_ball_notation_carries_full_over() {
        // Just shy of a whole over must not print as x.6
        assert_eq!(to_ball_notation(19.99), 20.0);
    }

    #[test]
    fn test_overs_parse_and_display() {
        let overs: Overs = "133.1".parse().unwrap();
        assert_eq!(overs.balls(), 799);
        assert_eq!(overs.to_string(), "133.1");

        let whole: Overs = "140".parse().unwrap();
        assert_eq!(whole.balls(), 840);
        assert_eq!(whole.to_string(), "140");
    }

    #[test]
    fn test_overs_rejects_illegal_figures() {
        assert!(matches!("19.7".parse::<Overs>(), Err(NrrError::InvalidOvers(_))));
        assert!(matches!("-1".parse::<Overs>(), Err(NrrError::InvalidOvers(_))));
        assert!(matches!("12.25".parse::<Overs>(), Err(NrrError::InvalidOvers(_))));
        assert!(matches!("abc".parse::<Overs>(), Err(NrrError::InvalidOvers(_))));
        assert!(Overs::try_from(f64::NAN).is_err());
    }

    #[test]
    fn test_from_notation_is_lenient() {
        assert_eq!(Overs::from_notation(4.7).balls(), 31);
        assert_eq!(Overs::from_notation(-3.0).balls(), 0);
    }

    #[test]
    fn test_overs_add_carries_balls() {
        let total = Overs::new(133, 1) + Overs::new(20, 5);
        assert_eq!(total, Overs::new(154, 0));
        assert_eq!(total.to_notation(), 154.0);
    }

    #[test]
    fn test_up_to_skips_invalid_ball_digits() {
        let values: Vec<Overs> = Overs::up_to(Overs::new(2, 0)).collect();
        assert_eq!(values.len(), 12);
        assert_eq!(values[0], Overs::new(0, 1));
        assert_eq!(values[5], Overs::new(1, 0));
        assert_eq!(values[11], Overs::new(2, 0));
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert!(values.iter().all(|o| o.remaining_balls() < BALLS_PER_OVER));
    }

    #[test]
    fn test_up_to_partial_over_limit() {
        let values: Vec<Overs> = Overs::up_to(Overs::new(1, 2)).collect();
        assert_eq!(values.last(), Some(&Overs::new(1, 2)));
        assert_eq!(values.len(), 8);
    }

    #[test]
    fn test_up_to_zero_is_empty() {
        assert_eq!(Overs::up_to(Overs::default()).count(), 0);
    }

    proptest! {
        #[test]
        fn test_ball_notation_round_trip(whole in 0u32..=50, ball in 0u32..6) {
            let notation = (whole * 10 + ball) as f64 / 10.0;
            prop_assert_eq!(to_ball_notation(to_decimal_overs(notation)), notation);
        }

        #[test]
        fn test_overs_notation_round_trip(whole in 0u32..=500, ball in 0u32..6) {
            let overs = Overs::new(whole, ball);
            prop_assert_eq!(Overs::try_from(overs.to_notation()).unwrap(), overs);
            prop_assert_eq!(overs.to_string().parse::<Overs>().unwrap(), overs);
        }
    }
}
