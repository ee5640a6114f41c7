//! ssqlt - compile schema mappings into bidirectional sync triggers

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{compile, order, validate};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.global.verbose);

    match &cli.command {
        cli::Commands::Compile(args) => compile::execute(args, &cli.global),
        cli::Commands::Order(args) => order::execute(args, &cli.global),
        cli::Commands::Validate(args) => validate::execute(args, &cli.global),
    }
}

/// `RUST_LOG` wins over `--verbose`
fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
