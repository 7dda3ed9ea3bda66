//! Currency conversion helper shared by payment and expense entry.
//!
//! Amounts are recorded in Bs. together with the exchange rate used, and
//! normalized to USD as `amount_bs / rate` rounded to 2 decimal places.

/// Convert an amount in Bs. to USD at the given exchange rate.
///
/// Returns `0.00` when either input is missing, non-finite, or the rate is
/// not positive. Callers treat a `0.00` result as an invalid submission;
/// this function itself never fails.
pub fn convert_to_usd(amount_bs: Option<f64>, rate: Option<f64>) -> f64 {
    let (Some(bs), Some(rate)) = (amount_bs, rate) else {
        return 0.0;
    };
    if !bs.is_finite() || !rate.is_finite() || bs < 0.0 || rate <= 0.0 {
        return 0.0;
    }
    round2(bs / rate)
}

/// Round to 2 decimal places, the precision of the stored USD amounts.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
