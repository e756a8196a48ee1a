use super::types::{Inputs, Projection, SeriesPoint};

/// Stride, in months, at which intermediate balances are kept for charting.
const SERIES_STRIDE_MONTHS: u32 = 6;

/// Projects the account balance over `years * 12` months of monthly
/// compounding. Total over its numeric domain: out-of-range inputs produce
/// whatever the recurrence yields, never an error.
pub fn compute(inputs: &Inputs) -> Projection {
    let monthly_rate = inputs.annual_rate_percent / 100.0 / 12.0;
    let total_months = inputs.years * 12;

    let mut balance = inputs.initial_amount;
    let mut series = Vec::with_capacity((total_months / SERIES_STRIDE_MONTHS + 1) as usize);

    for month in 1..=total_months {
        // Interest accrues on the prior balance first; the contribution is
        // deposited after accrual and earns nothing until the next month.
        balance = balance * (1.0 + monthly_rate) + inputs.monthly_contribution;

        if month % SERIES_STRIDE_MONTHS == 0 || month == total_months {
            series.push(SeriesPoint {
                month,
                balance: balance.round(),
            });
        }
    }

    let future_value = balance;
    let total_deposits =
        inputs.initial_amount + inputs.monthly_contribution * f64::from(total_months);

    Projection {
        future_value,
        total_deposits,
        total_interest: future_value - total_deposits,
        series,
    }
}
