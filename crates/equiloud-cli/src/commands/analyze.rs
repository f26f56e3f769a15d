//! Cochlear-model analysis of a WAV file.
//!
//! Runs the input in non-overlapping 0.1 s windows (the model's fixed
//! segment size) and reports per-channel statistics over all windows; a
//! trailing partial window is dropped.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Args;
use tracing::debug;

use equiloud_carfac::CarfacContext;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file (mixed down to mono if needed)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Write per-channel statistics as CSV here instead of stdout
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Also dump the first window's full NAP matrix as CSV
    #[arg(long)]
    nap_matrix: Option<PathBuf>,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let (samples, sample_rate) = equiloud_io::read_wav_mono(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let mut ctx = CarfacContext::create(sample_rate)?;
    let num_samples = ctx.num_samples();
    let num_channels = ctx.num_channels();
    if samples.len() < num_samples {
        bail!(
            "input too short: {} samples, need at least {num_samples} at {sample_rate} Hz",
            samples.len()
        );
    }

    let mut bm = vec![0.0f32; num_samples * num_channels];
    let mut nap = vec![0.0f32; num_samples * num_channels];
    let mut bm_energy = vec![0.0f64; num_channels];
    let mut nap_sum = vec![0.0f64; num_channels];
    let mut first_nap: Option<Vec<f32>> = None;

    let mut windows = 0usize;
    for window in samples.chunks_exact(num_samples) {
        ctx.run(window)?;
        ctx.bm_into(&mut bm)?;
        ctx.nap_into(&mut nap)?;
        for i in 0..num_samples {
            for ch in 0..num_channels {
                let v = bm[i * num_channels + ch];
                bm_energy[ch] += f64::from(v * v);
                nap_sum[ch] += f64::from(nap[i * num_channels + ch]);
            }
        }
        if first_nap.is_none() {
            first_nap = Some(nap.clone());
        }
        windows += 1;
        debug!(windows, "window analyzed");
    }

    let total_samples = (windows * num_samples) as f64;
    let mut report = String::from("channel,pole_frequency_hz,bm_rms,nap_mean\n");
    for ch in 0..num_channels {
        let pole = ctx.pole_frequencies()[ch];
        let bm_rms = (bm_energy[ch] / total_samples).sqrt();
        let nap_mean = nap_sum[ch] / total_samples;
        report.push_str(&format!("{ch},{pole:.2},{bm_rms:.6e},{nap_mean:.6e}\n"));
    }

    match &args.csv {
        Some(path) => {
            std::fs::write(path, &report)
                .with_context(|| format!("writing {}", path.display()))?;
            println!(
                "analyzed {windows} windows, {num_channels} channels -> {}",
                path.display()
            );
        }
        None => print!("{report}"),
    }

    if let Some(path) = &args.nap_matrix {
        let matrix = first_nap.expect("at least one window was analyzed");
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        for row in matrix.chunks_exact(num_channels) {
            let line: Vec<String> = row.iter().map(|v| format!("{v:.6e}")).collect();
            writeln!(file, "{}", line.join(","))?;
        }
    }

    ctx.destroy();
    Ok(())
}
