/// Legal deliveries in one over
pub const BALLS_PER_OVER: u32 = 6;

/// League points awarded for a win (a loss earns nothing)
pub const POINTS_PER_WIN: u32 = 2;

/// Net run rate is published rounded to this many decimal places
pub const NRR_DECIMALS: i32 = 3;

/// Longest innings any supported format allows (one-day cricket)
pub const DEFAULT_MAX_OVERS: u32 = 50;
