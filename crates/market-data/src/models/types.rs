/// Yahoo chart interval for one bar per trading day.
pub const DAILY_INTERVAL: &str = "1d";

/// Lookback window covering the last five trading days.
pub const RECENT_RANGE: &str = "5d";
