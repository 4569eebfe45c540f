//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_ledger_adapter::FileLedgerAdapter;
use crate::adapters::price_table_adapter::{self, PriceTableAdapter};
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::accountant::{reconstruct_cash_flow, LedgerSummary};
use crate::domain::error::DriftsimError;
use crate::domain::executor::create_portfolio;
use crate::domain::indicator::OscillatorKind;
use crate::domain::price::{PriceMatrix, SelectionTargets};
use crate::domain::simulator::generate_matrix;
use crate::domain::strategy::{
    crossing_averages, momentum, random_strategy, MomentumConfig, RandomConfig,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::ledger_port::LedgerPort;
use crate::ports::price_port::PricePort;
use crate::ports::report_port::ReportPort;

/// Five years of trading days.
const DEFAULT_DAYS: i64 = 1825;

#[derive(Parser, Debug)]
#[command(name = "driftsim", about = "Synthetic stock simulator and ledger backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a synthetic price table
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a strategy over price data, appending trades to a ledger
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        ledger: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Reconstruct the cash position recorded in a ledger
    Report {
        #[arg(short, long)]
        ledger: PathBuf,
        #[arg(short, long)]
        duration: usize,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Simulate {
            config,
            output,
            seed,
        } => run_simulate(&config, &output, seed),
        Command::Backtest {
            config,
            ledger,
            seed,
        } => run_backtest(&config, ledger, seed),
        Command::Report { ledger, duration } => run_report(ledger, duration),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }
    }
}

fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, DriftsimError> {
    FileConfigAdapter::from_file(path).map_err(|e| DriftsimError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn require_float_list(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Vec<f64>, DriftsimError> {
    config
        .get_float_list(section, key)
        .ok_or_else(|| DriftsimError::ConfigMissing {
            section: section.into(),
            key: key.into(),
        })
}

fn config_period(
    config: &dyn ConfigPort,
    key: &str,
    default: i64,
) -> Result<usize, DriftsimError> {
    let value = config.get_int("strategy", key, default);
    if value < 1 {
        return Err(DriftsimError::ConfigInvalid {
            section: "strategy".into(),
            key: key.into(),
            reason: format!("must be at least 1, got {value}"),
        });
    }
    Ok(value as usize)
}

fn config_days(config: &dyn ConfigPort) -> Result<usize, DriftsimError> {
    let days = config.get_int("data", "days", DEFAULT_DAYS);
    if days < 1 {
        return Err(DriftsimError::ConfigInvalid {
            section: "data".into(),
            key: "days".into(),
            reason: format!("must be at least 1, got {days}"),
        });
    }
    Ok(days as usize)
}

fn run_simulate(
    config_path: &PathBuf,
    output: &PathBuf,
    seed: Option<u64>,
) -> Result<(), DriftsimError> {
    let config = load_config(config_path)?;
    let days = config_days(&config)?;
    let initial_prices = require_float_list(&config, "data", "initial_prices")?;
    let volatilities = require_float_list(&config, "data", "volatilities")?;

    let mut rng = seeded_rng(seed);
    let matrix = generate_matrix(days, &initial_prices, &volatilities, &mut rng)?;
    price_table_adapter::write_table(output, &volatilities, &matrix)?;

    println!(
        "wrote {} stocks over {} days to {}",
        matrix.stocks(),
        matrix.days(),
        output.display()
    );
    Ok(())
}

/// Build the price matrix per `[data] method`: simulate fresh paths or read
/// (and nearest-match select) from an existing table.
pub fn load_prices(
    config: &dyn ConfigPort,
    days: usize,
    rng: &mut StdRng,
) -> Result<PriceMatrix, DriftsimError> {
    let method = config
        .get_string("data", "method")
        .ok_or_else(|| DriftsimError::ConfigMissing {
            section: "data".into(),
            key: "method".into(),
        })?;

    match method.as_str() {
        "generate" => {
            let initial_prices = require_float_list(config, "data", "initial_prices")?;
            let volatilities = require_float_list(config, "data", "volatilities")?;
            generate_matrix(days, &initial_prices, &volatilities, rng)
        }
        "read" => {
            let file = config.get_string("data", "file").ok_or_else(|| {
                DriftsimError::ConfigMissing {
                    section: "data".into(),
                    key: "file".into(),
                }
            })?;
            let adapter = PriceTableAdapter::new(PathBuf::from(file));

            let targets = SelectionTargets {
                initial_prices: config.get_float_list("data", "initial_prices"),
                volatilities: config.get_float_list("data", "volatilities"),
            };
            if targets.initial_prices.is_none() && targets.volatilities.is_none() {
                adapter.load_prices(days)
            } else {
                let (matrix, report) = adapter.select_prices(days, &targets)?;
                println!("{}", report.message());
                Ok(matrix)
            }
        }
        other => Err(DriftsimError::ConfigInvalid {
            section: "data".into(),
            key: "method".into(),
            reason: format!("expected 'generate' or 'read', got '{other}'"),
        }),
    }
}

fn oscillator_kind(config: &dyn ConfigPort) -> Result<OscillatorKind, DriftsimError> {
    let name = config
        .get_string("strategy", "oscillator")
        .unwrap_or_else(|| "stochastic".to_string());
    match name.as_str() {
        "stochastic" => Ok(OscillatorKind::Stochastic),
        "rsi" => Ok(OscillatorKind::Rsi),
        other => Err(DriftsimError::ConfigInvalid {
            section: "strategy".into(),
            key: "oscillator".into(),
            reason: format!("expected 'stochastic' or 'rsi', got '{other}'"),
        }),
    }
}

fn run_backtest(
    config_path: &PathBuf,
    ledger_path: PathBuf,
    seed: Option<u64>,
) -> Result<(), DriftsimError> {
    let config = load_config(config_path)?;
    let days = config_days(&config)?;
    let mut rng = seeded_rng(seed);
    let prices = load_prices(&config, days, &mut rng)?;

    let fees = config.get_double("execution", "fees", 20.0);
    let amount = config.get_double("execution", "amount", 5000.0);
    let period = config_period(&config, "period", 7)?;

    let mut ledger = FileLedgerAdapter::new(ledger_path);
    let allocations = vec![amount; prices.stocks()];
    let mut portfolio = create_portfolio(&allocations, &prices, fees, &mut ledger)?;

    let kind = config
        .get_string("strategy", "kind")
        .unwrap_or_else(|| "random".to_string());
    match kind.as_str() {
        "random" => {
            let strategy_config = RandomConfig {
                period,
                amount,
                fees,
            };
            random_strategy(&prices, &mut portfolio, &strategy_config, &mut rng, &mut ledger)?;
        }
        "crossing" => {
            let slow = config_period(&config, "slow", 10)?;
            let fast = config_period(&config, "fast", 3)?;
            crossing_averages(slow, fast, &prices, amount, fees, &mut portfolio, &mut ledger)?;
        }
        "momentum" => {
            let strategy_config = MomentumConfig {
                period,
                kind: oscillator_kind(&config)?,
            };
            momentum(&prices, amount, fees, &mut portfolio, &strategy_config, &mut ledger)?;
        }
        other => {
            return Err(DriftsimError::ConfigInvalid {
                section: "strategy".into(),
                key: "kind".into(),
                reason: format!("expected 'random', 'crossing' or 'momentum', got '{other}'"),
            });
        }
    }

    let entries = ledger.read_all()?;
    println!(
        "{} strategy logged {} transactions to {}",
        kind,
        entries.len(),
        ledger.path().display()
    );
    Ok(())
}

fn run_report(ledger_path: PathBuf, duration: usize) -> Result<(), DriftsimError> {
    let ledger = FileLedgerAdapter::new(ledger_path);
    let entries = ledger.read_all()?;

    let summary = LedgerSummary::compute(&entries);
    let cash_position = reconstruct_cash_flow(duration, &entries)?;

    let mut stdout = std::io::stdout();
    TextReportAdapter.write(&summary, &cash_position, &mut stdout)?;
    Ok(())
}
