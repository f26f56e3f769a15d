//! Equiloud CLI - render stimuli and analyze them through the cochlear model.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "equiloud")]
#[command(author, version, about = "Loudness experiment toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the probe frequency grid for a session
    Grid(commands::grid::GridArgs),

    /// Render a trial stimulus to a WAV file
    Render(commands::render::RenderArgs),

    /// Run a WAV file through the cochlear model
    Analyze(commands::analyze::AnalyzeArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Grid(args) => commands::grid::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
    }
}
