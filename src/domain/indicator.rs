//! Moving average and oscillator indicators.
//!
//! Indicators are plain transformations over one stock's price column. The
//! first `n - 1` output slots are NaN (warmup), and any window containing an
//! undefined price yields NaN for that day.

use crate::domain::error::DriftsimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorKind {
    Stochastic,
    Rsi,
}

/// n-day moving average, optionally weighted.
///
/// `weights`, when given, must have exactly `n` elements; the weighted mean is
/// `sum(w * p) / sum(w)`.
pub fn moving_average(
    prices: &[f64],
    n: usize,
    weights: Option<&[f64]>,
) -> Result<Vec<f64>, DriftsimError> {
    if n == 0 {
        return Err(DriftsimError::InvalidParameter {
            reason: "moving average period must be at least 1".into(),
        });
    }
    if let Some(w) = weights {
        if w.len() != n {
            return Err(DriftsimError::WeightLength {
                expected: n,
                actual: w.len(),
            });
        }
    }

    let mut ma = vec![f64::NAN; prices.len()];
    for day in (n - 1)..prices.len() {
        let window = &prices[day + 1 - n..=day];
        ma[day] = match weights {
            None => window.iter().sum::<f64>() / n as f64,
            Some(w) => {
                let weighted: f64 = window.iter().zip(w).map(|(p, w)| p * w).sum();
                weighted / w.iter().sum::<f64>()
            }
        };
    }
    Ok(ma)
}

/// Oscillator level with period `n`, in [0, 1] where defined.
///
/// Stochastic: `(price - min) / (max - min)` over the window; a flat window
/// (max == min) has no defined level and yields NaN.
/// RSI: mean gain / (mean gain + mean loss) over the window's consecutive
/// deltas; all-gain windows read 1, all-loss (or flat) windows read 0.
pub fn oscillator(prices: &[f64], n: usize, kind: OscillatorKind) -> Vec<f64> {
    let mut osc = vec![f64::NAN; prices.len()];
    if n < 2 {
        return osc;
    }

    for day in (n - 1)..prices.len() {
        let window = &prices[day + 1 - n..=day];
        if window.iter().any(|p| p.is_nan()) {
            continue;
        }
        osc[day] = match kind {
            OscillatorKind::Stochastic => stochastic_level(window),
            OscillatorKind::Rsi => rsi_level(window),
        };
    }
    osc
}

fn stochastic_level(window: &[f64]) -> f64 {
    let min = window.iter().copied().fold(f64::INFINITY, f64::min);
    let max = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let delta_max = max - min;
    if delta_max == 0.0 {
        return f64::NAN;
    }
    (window[window.len() - 1] - min) / delta_max
}

fn rsi_level(window: &[f64]) -> f64 {
    let mut gain_sum = 0.0;
    let mut gain_count = 0usize;
    let mut loss_sum = 0.0;
    let mut loss_count = 0usize;

    for pair in window.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gain_sum += delta;
            gain_count += 1;
        } else {
            loss_sum += -delta;
            loss_count += 1;
        }
    }

    if gain_count == 0 {
        0.0
    } else if loss_count == 0 {
        1.0
    } else {
        let avg_gain = gain_sum / gain_count as f64;
        let avg_loss = loss_sum / loss_count as f64;
        avg_gain / (avg_gain + avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn moving_average_warmup_is_nan() {
        let prices = [10.0, 20.0, 30.0, 40.0];
        let ma = moving_average(&prices, 3, None).unwrap();
        assert!(ma[0].is_nan());
        assert!(ma[1].is_nan());
        assert!(!ma[2].is_nan());
    }

    #[test]
    fn moving_average_unweighted() {
        let prices = [10.0, 20.0, 30.0, 40.0];
        let ma = moving_average(&prices, 3, None).unwrap();
        assert_relative_eq!(ma[2], 20.0);
        assert_relative_eq!(ma[3], 30.0);
    }

    #[test]
    fn moving_average_weighted() {
        let prices = [10.0, 20.0, 30.0];
        let ma = moving_average(&prices, 3, Some(&[1.0, 2.0, 3.0])).unwrap();
        // (10 + 40 + 90) / 6
        assert_relative_eq!(ma[2], 140.0 / 6.0);
    }

    #[test]
    fn moving_average_wrong_weight_length() {
        let prices = [10.0, 20.0, 30.0];
        let result = moving_average(&prices, 3, Some(&[1.0, 2.0]));
        assert!(matches!(
            result,
            Err(DriftsimError::WeightLength {
                expected: 3,
                actual: 2,
            })
        ));
    }

    #[test]
    fn moving_average_zero_period() {
        let result = moving_average(&[1.0], 0, None);
        assert!(matches!(
            result,
            Err(DriftsimError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn moving_average_nan_window_propagates() {
        let prices = [10.0, f64::NAN, 30.0, 40.0, 50.0];
        let ma = moving_average(&prices, 3, None).unwrap();
        assert!(ma[2].is_nan());
        assert!(ma[3].is_nan());
        assert!(!ma[4].is_nan());
    }

    #[test]
    fn stochastic_basic() {
        let prices = [10.0, 20.0, 15.0];
        let osc = oscillator(&prices, 3, OscillatorKind::Stochastic);
        assert!(osc[0].is_nan());
        assert!(osc[1].is_nan());
        // (15 - 10) / (20 - 10)
        assert_relative_eq!(osc[2], 0.5);
    }

    #[test]
    fn stochastic_at_extremes() {
        let prices = [10.0, 15.0, 20.0, 10.0];
        let osc = oscillator(&prices, 3, OscillatorKind::Stochastic);
        assert_relative_eq!(osc[2], 1.0);
        assert_relative_eq!(osc[3], 0.0);
    }

    #[test]
    fn stochastic_flat_window_is_undefined() {
        let prices = [100.0, 100.0, 100.0, 100.0];
        let osc = oscillator(&prices, 3, OscillatorKind::Stochastic);
        assert!(osc[2].is_nan());
        assert!(osc[3].is_nan());
    }

    #[test]
    fn stochastic_nan_in_window() {
        let prices = [10.0, f64::NAN, 20.0, 30.0, 40.0];
        let osc = oscillator(&prices, 3, OscillatorKind::Stochastic);
        assert!(osc[2].is_nan());
        assert!(osc[3].is_nan());
        assert!(!osc[4].is_nan());
    }

    #[test]
    fn rsi_all_gains() {
        let prices = [10.0, 20.0, 30.0, 40.0];
        let osc = oscillator(&prices, 4, OscillatorKind::Rsi);
        assert_relative_eq!(osc[3], 1.0);
    }

    #[test]
    fn rsi_all_losses() {
        let prices = [40.0, 30.0, 20.0, 10.0];
        let osc = oscillator(&prices, 4, OscillatorKind::Rsi);
        assert_relative_eq!(osc[3], 0.0);
    }

    #[test]
    fn rsi_flat_reads_zero() {
        // Zero deltas count as losses, so a flat window reads 0.
        let prices = [10.0, 10.0, 10.0];
        let osc = oscillator(&prices, 3, OscillatorKind::Rsi);
        assert_relative_eq!(osc[2], 0.0);
    }

    #[test]
    fn rsi_mixed_window() {
        let prices = [10.0, 20.0, 15.0];
        let osc = oscillator(&prices, 3, OscillatorKind::Rsi);
        // avg gain 10, avg loss 5 -> 10 / 15
        assert_relative_eq!(osc[2], 10.0 / 15.0);
    }

    #[test]
    fn oscillator_period_below_two_is_all_nan() {
        let prices = [10.0, 20.0, 30.0];
        let osc = oscillator(&prices, 1, OscillatorKind::Stochastic);
        assert!(osc.iter().all(|v| v.is_nan()));
    }
}
