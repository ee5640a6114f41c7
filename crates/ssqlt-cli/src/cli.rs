//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// ssqlt - compile two schemas and their mappings into sync triggers
#[derive(Parser, Debug)]
#[command(name = "ssqlt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the project into one PL/pgSQL document
    Compile(CompileArgs),

    /// Print the dependency order of each side
    Order(OrderArgs),

    /// Check the project without writing output
    Validate(ValidateArgs),
}

/// Arguments for the compile command
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Override output file
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<String>,

    /// Write the document to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for the order command
#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OrderOutput,
}

/// Order output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOutput {
    /// One table per line, grouped by side
    Text,
    /// JSON object keyed by side
    Json,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also print the table count of each side
    #[arg(long)]
    pub summary: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
