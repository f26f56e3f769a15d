//! Offline stimulus rendering.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use equiloud_core::ComponentParams;
use equiloud_session::SessionConfig;

#[derive(Args)]
pub struct RenderArgs {
    /// Session configuration TOML file
    #[arg(long)]
    config: PathBuf,

    /// Probe center frequency in Hz
    #[arg(long)]
    frequency: f32,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Render the standalone probe instead of probe plus maskers
    #[arg(long)]
    probe_only: bool,

    /// Stimulus duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f32,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let config = SessionConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    config.validate()?;

    let mut entries: Vec<ComponentParams> = Vec::new();
    if !args.probe_only {
        for (i, (&frequency_hz, &level_db_spl)) in config
            .mask_frequencies
            .iter()
            .zip(&config.mask_levels)
            .enumerate()
        {
            entries.push(ComponentParams {
                id: format!("masker-{i}"),
                delay_secs: 0.0,
                frequency_hz,
                level_db_spl,
            });
        }
    }
    entries.push(ComponentParams {
        id: "probe".to_string(),
        delay_secs: if args.probe_only { 0.0 } else { config.probe_delay_secs },
        frequency_hz: args.frequency,
        level_db_spl: config.probe_level_db_spl,
    });

    let spec = equiloud_core::build_specification(config.signal_family, config.erb_width, &entries);
    info!(resource = %spec.canonical_text()?, "rendering");

    let samples = equiloud_synth::render(&spec, args.sample_rate, args.duration);
    equiloud_io::write_wav_mono(&args.output, &samples, args.sample_rate)?;
    println!(
        "wrote {} ({} components, {:.2} s at {} Hz)",
        args.output.display(),
        spec.components.len(),
        args.duration,
        args.sample_rate
    );
    Ok(())
}
