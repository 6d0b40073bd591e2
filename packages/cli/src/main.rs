mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, apply, init, inspect, new, validate, AddArgs, ApplyArgs, InitArgs, InspectArgs, NewArgs,
    ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagesmith CLI - edit page documents from the terminal
#[derive(Parser, Debug)]
#[command(name = "pagesmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log engine activity (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a pagesmith.config.json
    Init(InitArgs),

    /// Create an empty page document
    New(NewArgs),

    /// Print the element outline of a document
    Inspect(InspectArgs),

    /// Check documents for structural errors
    Validate(ValidateArgs),

    /// Replay a JSON list of commands against a document
    Apply(ApplyArgs),

    /// Insert a palette element into a container
    Add(AddArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new(args, &cwd),
        Command::Inspect(args) => inspect(args, &cwd),
        Command::Validate(args) => validate(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::Add(args) => add(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
