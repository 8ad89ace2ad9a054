mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, check, render, ApplyArgs, CheckArgs, RenderArgs};
use tracing_subscriber::EnvFilter;

/// Lexis CLI - build rich-text documents and project them to JSON and HTML
#[derive(Parser, Debug)]
#[command(name = "lexis")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log editor activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a document and print its JSON and HTML projection
    Render(RenderArgs),

    /// Replay a mutation script, printing every projected change
    Apply(ApplyArgs),

    /// Validate a document and report node counts
    Check(CheckArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Render(args) => render(args, &cwd),
                Command::Apply(args) => apply(args, &cwd),
                Command::Check(args) => check(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
