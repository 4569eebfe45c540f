//! Trading strategies over a price matrix.
//!
//! Strategies only decide *when* to act; share counts, portfolio mutation and
//! ledger logging all go through the executor. Each strategy writes to an
//! injected [`LedgerPort`] so runs against different ledgers never collide.

use rand::rngs::StdRng;
use rand::Rng;

use crate::domain::error::DriftsimError;
use crate::domain::executor::{buy, sell};
use crate::domain::indicator::{moving_average, oscillator, OscillatorKind};
use crate::domain::portfolio::Portfolio;
use crate::domain::price::PriceMatrix;
use crate::ports::ledger_port::LedgerPort;

/// Parameters for the random strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomConfig {
    /// Days between decisions.
    pub period: usize,
    /// Capital allocated to each purchase, fees included.
    pub amount: f64,
    pub fees: f64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        RandomConfig {
            period: 7,
            amount: 5000.0,
            fees: 20.0,
        }
    }
}

/// Every `period` days, pick buy-everything, sell-everything, or do nothing
/// with equal probability.
pub fn random_strategy<L: LedgerPort>(
    prices: &PriceMatrix,
    portfolio: &mut Portfolio,
    config: &RandomConfig,
    rng: &mut StdRng,
    ledger: &mut L,
) -> Result<(), DriftsimError> {
    if config.period == 0 {
        return Err(DriftsimError::InvalidParameter {
            reason: "random strategy period must be at least 1".into(),
        });
    }

    // Last decision day is the end of the final full period.
    let horizon = prices.days() - 1;
    let last = horizon - horizon % config.period;

    for day in (1..last).step_by(config.period) {
        match rng.gen_range(0..3) {
            0 => {
                for stock in 0..prices.stocks() {
                    buy(day, stock, config.amount, prices, config.fees, portfolio, ledger)?;
                }
            }
            1 => {
                for stock in 0..prices.stocks() {
                    sell(day, stock, prices, config.fees, portfolio, ledger)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Buy/sell days detected for one stock by the crossing-averages strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossoverSignals {
    pub stock: usize,
    pub buy_days: Vec<usize>,
    pub sell_days: Vec<usize>,
}

/// Fast/slow moving average crossover.
///
/// A buy signal fires on the day the fast average crosses above the slow one,
/// a sell signal on the cross below; trades execute on the signal day. NaN
/// averages during warmup fail every comparison and produce no signals.
pub fn crossing_averages<L: LedgerPort>(
    slow_period: usize,
    fast_period: usize,
    prices: &PriceMatrix,
    available_capital: f64,
    fees: f64,
    portfolio: &mut Portfolio,
    ledger: &mut L,
) -> Result<Vec<CrossoverSignals>, DriftsimError> {
    let mut all_signals = Vec::with_capacity(prices.stocks());

    for stock in 0..prices.stocks() {
        let column = prices.column(stock);
        let fast = moving_average(column, fast_period, None)?;
        let slow = moving_average(column, slow_period, None)?;

        // Trade as each signal fires so interleaved buys and sells see the
        // holding as it stood on their own day.
        let mut buy_days = Vec::new();
        let mut sell_days = Vec::new();
        for day in 1..prices.days() {
            if fast[day - 1] < slow[day - 1] && fast[day] > slow[day] {
                buy(day, stock, available_capital, prices, fees, portfolio, ledger)?;
                buy_days.push(day);
            } else if fast[day - 1] > slow[day - 1] && fast[day] < slow[day] {
                sell(day, stock, prices, fees, portfolio, ledger)?;
                sell_days.push(day);
            }
        }

        all_signals.push(CrossoverSignals {
            stock,
            buy_days,
            sell_days,
        });
    }
    Ok(all_signals)
}

/// Parameters for the momentum strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumConfig {
    pub period: usize,
    pub kind: OscillatorKind,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        MomentumConfig {
            period: 7,
            kind: OscillatorKind::Stochastic,
        }
    }
}

const MOMENTUM_BUY_RANGE: (f64, f64) = (0.2, 0.3);
const MOMENTUM_SELL_RANGE: (f64, f64) = (0.7, 0.8);
/// Days to wait after a signal before acting again.
const MOMENTUM_COOLDOWN: usize = 5;

/// Oscillator threshold strategy: buy when the oscillator dips into the
/// oversold band, sell in the overbought band, with a cooldown between
/// signals. NaN oscillator values fail both band checks and are skipped.
pub fn momentum<L: LedgerPort>(
    prices: &PriceMatrix,
    available_capital: f64,
    fees: f64,
    portfolio: &mut Portfolio,
    config: &MomentumConfig,
    ledger: &mut L,
) -> Result<(), DriftsimError> {
    for stock in 0..prices.stocks() {
        let osc = oscillator(prices.column(stock), config.period, config.kind);

        let mut last_signal: Option<usize> = None;
        for (day, &level) in osc.iter().enumerate() {
            let cooled = last_signal.is_none_or(|s| day > s + MOMENTUM_COOLDOWN);
            if !cooled {
                continue;
            }

            if level > MOMENTUM_BUY_RANGE.0 && level < MOMENTUM_BUY_RANGE.1 {
                buy(day, stock, available_capital, prices, fees, portfolio, ledger)?;
                last_signal = Some(day);
            } else if level > MOMENTUM_SELL_RANGE.0 && level < MOMENTUM_SELL_RANGE.1 {
                sell(day, stock, prices, fees, portfolio, ledger)?;
                last_signal = Some(day);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::{LedgerEntry, TransactionType};
    use rand::SeedableRng;

    struct VecLedger(Vec<LedgerEntry>);

    impl LedgerPort for VecLedger {
        fn append(&mut self, entry: &LedgerEntry) -> Result<(), DriftsimError> {
            self.0.push(entry.clone());
            Ok(())
        }

        fn read_all(&self) -> Result<Vec<LedgerEntry>, DriftsimError> {
            Ok(self.0.clone())
        }
    }

    fn matrix(columns: Vec<Vec<f64>>) -> PriceMatrix {
        PriceMatrix::from_columns(columns).unwrap()
    }

    #[test]
    fn random_strategy_acts_on_period_days_only() {
        let prices = matrix(vec![vec![100.0; 30]]);
        let mut portfolio = Portfolio::new(1);
        let mut ledger = VecLedger(Vec::new());
        let mut rng = StdRng::seed_from_u64(9);

        random_strategy(
            &prices,
            &mut portfolio,
            &RandomConfig::default(),
            &mut rng,
            &mut ledger,
        )
        .unwrap();

        for entry in &ledger.0 {
            assert_eq!((entry.day - 1) % 7, 0, "entry on off-period day {}", entry.day);
        }
    }

    #[test]
    fn random_strategy_reproducible_with_seed() {
        let prices = matrix(vec![vec![100.0; 60], vec![50.0; 60]]);
        let run = |seed| {
            let mut portfolio = Portfolio::new(2);
            let mut ledger = VecLedger(Vec::new());
            let mut rng = StdRng::seed_from_u64(seed);
            random_strategy(
                &prices,
                &mut portfolio,
                &RandomConfig::default(),
                &mut rng,
                &mut ledger,
            )
            .unwrap();
            ledger.0
        };
        assert_eq!(run(4), run(4));
    }

    #[test]
    fn random_strategy_rejects_zero_period() {
        let prices = matrix(vec![vec![100.0; 10]]);
        let mut portfolio = Portfolio::new(1);
        let mut ledger = VecLedger(Vec::new());
        let mut rng = StdRng::seed_from_u64(0);

        let config = RandomConfig {
            period: 0,
            ..Default::default()
        };
        let result = random_strategy(&prices, &mut portfolio, &config, &mut rng, &mut ledger);
        assert!(matches!(
            result,
            Err(DriftsimError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn crossing_averages_v_shape_signals_buy() {
        // Fall then rise: the fast average crosses back above the slow one on
        // the way up.
        let mut column: Vec<f64> = (0..20).map(|d| 100.0 - d as f64).collect();
        column.extend((0..20).map(|d| 81.0 + 2.0 * d as f64));
        let prices = matrix(vec![column]);

        let mut portfolio = Portfolio::new(1);
        let mut ledger = VecLedger(Vec::new());

        let signals =
            crossing_averages(10, 3, &prices, 5000.0, 20.0, &mut portfolio, &mut ledger).unwrap();

        assert_eq!(signals.len(), 1);
        assert!(!signals[0].buy_days.is_empty());
        assert!(ledger
            .0
            .iter()
            .any(|e| e.transaction_type == TransactionType::Buy && e.shares > 0));
        assert!(portfolio.holding(0) > 0);
    }

    #[test]
    fn crossing_averages_interleaved_signals_execute_in_day_order() {
        // With fast=1 and slow=2 this zig-zag fires buy@2, sell@4, buy@5.
        let prices = matrix(vec![vec![100.0, 90.0, 100.0, 110.0, 100.0, 110.0]]);
        let mut portfolio = Portfolio::new(1);
        let mut ledger = VecLedger(Vec::new());

        let signals =
            crossing_averages(2, 1, &prices, 5000.0, 20.0, &mut portfolio, &mut ledger).unwrap();

        assert_eq!(signals[0].buy_days, vec![2, 5]);
        assert_eq!(signals[0].sell_days, vec![4]);

        let days: Vec<usize> = ledger.0.iter().map(|e| e.day).collect();
        assert_eq!(days, vec![2, 4, 5]);
        assert_eq!(ledger.0[0].transaction_type, TransactionType::Buy);
        assert_eq!(ledger.0[1].transaction_type, TransactionType::Sell);
        assert_eq!(ledger.0[2].transaction_type, TransactionType::Buy);

        // The day-4 sell liquidates only the 49 shares held on day 4; the
        // day-5 buy at 110 then leaves 45 shares in the portfolio.
        assert_eq!(ledger.0[0].shares, 49);
        assert_eq!(ledger.0[1].shares, 49);
        assert_eq!(ledger.0[1].net_cash, 49.0 * 100.0 - 20.0);
        assert_eq!(ledger.0[2].shares, 45);
        assert_eq!(portfolio.holding(0), 45);
    }

    #[test]
    fn crossing_averages_no_signals_on_flat_prices() {
        let prices = matrix(vec![vec![100.0; 40]]);
        let mut portfolio = Portfolio::new(1);
        let mut ledger = VecLedger(Vec::new());

        let signals =
            crossing_averages(10, 3, &prices, 5000.0, 20.0, &mut portfolio, &mut ledger).unwrap();

        assert!(signals[0].buy_days.is_empty());
        assert!(signals[0].sell_days.is_empty());
        assert!(ledger.0.is_empty());
    }

    #[test]
    fn momentum_buys_in_oversold_band() {
        // Window min 100, max 120: a close of 105 puts the stochastic at 0.25.
        let column = vec![
            110.0, 112.0, 114.0, 116.0, 118.0, 120.0, 100.0, 105.0, 105.0, 105.0,
        ];
        let prices = matrix(vec![column]);
        let mut portfolio = Portfolio::new(1);
        let mut ledger = VecLedger(Vec::new());

        momentum(
            &prices,
            5000.0,
            20.0,
            &mut portfolio,
            &MomentumConfig::default(),
            &mut ledger,
        )
        .unwrap();

        assert!(ledger
            .0
            .iter()
            .any(|e| e.transaction_type == TransactionType::Buy));
        assert!(portfolio.holding(0) > 0);
    }

    #[test]
    fn momentum_cooldown_suppresses_repeat_signals() {
        // Repeating 100/120/105 pattern: every third day the 3-day stochastic
        // reads 0.25, an oversold signal.
        let column: Vec<f64> = (0..21).map(|d| [100.0, 120.0, 105.0][d % 3]).collect();
        let prices = matrix(vec![column]);
        let mut portfolio = Portfolio::new(1);
        let mut ledger = VecLedger(Vec::new());

        momentum(
            &prices,
            5000.0,
            20.0,
            &mut portfolio,
            &MomentumConfig {
                period: 3,
                kind: OscillatorKind::Stochastic,
            },
            &mut ledger,
        )
        .unwrap();

        let buy_days: Vec<usize> = ledger.0.iter().map(|e| e.day).collect();
        assert_eq!(buy_days, vec![2, 8, 14, 20]);
        for pair in buy_days.windows(2) {
            assert!(pair[1] > pair[0] + MOMENTUM_COOLDOWN);
        }
    }

    #[test]
    fn momentum_flat_prices_never_trade() {
        // Flat windows make the stochastic undefined everywhere.
        let prices = matrix(vec![vec![100.0; 30]]);
        let mut portfolio = Portfolio::new(1);
        let mut ledger = VecLedger(Vec::new());

        momentum(
            &prices,
            5000.0,
            20.0,
            &mut portfolio,
            &MomentumConfig::default(),
            &mut ledger,
        )
        .unwrap();

        assert!(ledger.0.is_empty());
    }
}
