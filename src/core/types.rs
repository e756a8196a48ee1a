use serde::Serialize;

/// Complete snapshot of the projection parameters. The input layer owns the
/// mutable copy and hands the engine a fresh value on every change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Inputs {
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    /// Annual interest rate in percent. Supported domain is [0, 20],
    /// enforced by callers, never by the engine.
    pub annual_rate_percent: f64,
    pub years: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub month: u32,
    /// Balance rounded to the nearest whole unit. Display-oriented
    /// downsampling; the summary fields keep full precision.
    pub balance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub future_value: f64,
    pub total_deposits: f64,
    pub total_interest: f64,
    pub series: Vec<SeriesPoint>,
}
