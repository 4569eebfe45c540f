use clap::Parser;
use driftsim::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
