//! Probe frequency grid inspection.

use clap::Args;
use equiloud_core::{FrequencyGrid, erb_hz};

#[derive(Args)]
pub struct GridArgs {
    /// Lower bound of the sweep in Hz
    #[arg(long, default_value = "100.0")]
    min: f32,

    /// Exclusive upper bound of the sweep in Hz
    #[arg(long, default_value = "15000.0")]
    max: f32,

    /// Step size in ERB units
    #[arg(long, default_value = "1.0")]
    erb_apart: f32,

    /// Comma-separated explicit frequency list; overrides the stepping rule
    #[arg(long)]
    list: Option<String>,
}

pub fn run(args: GridArgs) -> anyhow::Result<()> {
    let grid = match args.list {
        Some(list) => FrequencyGrid::parse_list(&list)?,
        None => FrequencyGrid::erb_spaced(args.min, args.max, args.erb_apart)?,
    };

    println!("{:>5}  {:>12}  {:>10}", "trial", "frequency_hz", "erb_hz");
    for (i, f) in grid.iter().enumerate() {
        println!("{:>5}  {:>12.2}  {:>10.2}", i + 1, f, erb_hz(f));
    }
    println!("{} trials", grid.len());
    Ok(())
}
