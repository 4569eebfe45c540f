//! Synthetic daily price generation with cumulative news-shock drift.
//!
//! Each simulated day takes a normal random step from the previous close, plus
//! whatever drift is active from earlier news events. A news event fires with
//! low probability, draws a per-day drift value and a multi-day window, and
//! adds that value to every remaining in-range day of the window. Overlapping
//! windows accumulate additively.
//!
//! A day whose final price is non-positive is recorded as `f64::NAN` and stays
//! undefined. The next day's candidate is computed from the raw NaN, so the
//! remainder of the path is undefined too — standard IEEE propagation, kept as
//! the documented policy.
//!
//! All randomness flows through one caller-supplied [`StdRng`] so a fixed seed
//! reproduces the full matrix.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::domain::error::DriftsimError;
use crate::domain::price::{PriceMatrix, PricePath};

/// Daily probability that a news event fires.
pub const NEWS_PROBABILITY: f64 = 0.01;
/// Standard deviation of the news magnitude multiplier.
pub const NEWS_MAGNITUDE_STD_DEV: f64 = 2.0;
/// News drift window length range, upper bound exclusive.
pub const NEWS_MIN_DURATION: usize = 3;
pub const NEWS_MAX_DURATION: usize = 14;

/// Generate one stock's closing prices over `days` trading days.
///
/// The random step has standard deviation `volatility.powi(2)` — the variance
/// parameter equals volatility squared, which is unusual but part of the
/// simulator's contract.
pub fn generate_price_path(
    days: usize,
    initial_price: f64,
    volatility: f64,
    rng: &mut StdRng,
) -> Result<PricePath, DriftsimError> {
    if days == 0 {
        return Err(DriftsimError::InvalidParameter {
            reason: "days must be at least 1".into(),
        });
    }
    if !volatility.is_finite() || volatility < 0.0 {
        return Err(DriftsimError::InvalidParameter {
            reason: format!("volatility must be finite and non-negative, got {volatility}"),
        });
    }

    let step = Normal::new(0.0, volatility.powi(2)).map_err(|e| {
        DriftsimError::InvalidParameter {
            reason: format!("bad step distribution: {e}"),
        }
    })?;
    let magnitude = Normal::new(0.0, NEWS_MAGNITUDE_STD_DEV).map_err(|e| {
        DriftsimError::InvalidParameter {
            reason: format!("bad news distribution: {e}"),
        }
    })?;

    let mut path = vec![0.0; days];
    path[0] = initial_price;
    let mut drift = vec![0.0; days];

    for day in 1..days {
        let candidate = path[day - 1] + step.sample(rng);

        if rng.gen_bool(NEWS_PROBABILITY) {
            let per_day = magnitude.sample(rng) * volatility;
            let duration = rng.gen_range(NEWS_MIN_DURATION..NEWS_MAX_DURATION);
            schedule_drift(&mut drift, day, duration, per_day);
        }

        let price = candidate + drift[day];
        // NaN fails the comparison and is stored as-is, poisoning forward.
        path[day] = if price <= 0.0 { f64::NAN } else { price };
    }

    Ok(path)
}

/// Add `per_day` to every day of the window `[start, start + duration)`,
/// truncated to the simulated horizon.
fn schedule_drift(drift: &mut [f64], start: usize, duration: usize, per_day: f64) {
    let end = (start + duration).min(drift.len());
    for slot in &mut drift[start..end] {
        *slot += per_day;
    }
}

/// Generate one independent price path per stock, sharing the day axis.
pub fn generate_matrix(
    days: usize,
    initial_prices: &[f64],
    volatilities: &[f64],
    rng: &mut StdRng,
) -> Result<PriceMatrix, DriftsimError> {
    if initial_prices.is_empty() {
        return Err(DriftsimError::InvalidParameter {
            reason: "please specify the initial price for each stock".into(),
        });
    }
    if volatilities.is_empty() {
        return Err(DriftsimError::InvalidParameter {
            reason: "please specify the volatility for each stock".into(),
        });
    }
    if initial_prices.len() != volatilities.len() {
        return Err(DriftsimError::InvalidParameter {
            reason: format!(
                "got {} initial prices but {} volatilities",
                initial_prices.len(),
                volatilities.len()
            ),
        });
    }

    let mut columns = Vec::with_capacity(initial_prices.len());
    for (&price, &vol) in initial_prices.iter().zip(volatilities) {
        columns.push(generate_price_path(days, price, vol, rng)?);
    }
    PriceMatrix::from_columns(columns)
}
