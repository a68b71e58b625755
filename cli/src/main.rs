use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use swanplot::{Axes, DataAxis, OutputFormat, OutputStyle};
use workflow::config::FigureConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Builds swanplot figure documents for the animate viewer")]
struct Args {
    /// Load a figure config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output path; overrides the config file
    #[arg(long)]
    output: Option<PathBuf>,
    /// Generated frame count [default: 20]; overrides the config file
    #[arg(long)]
    timesteps: Option<usize>,
    /// Generated bins along x [default: 64]; overrides the config file
    #[arg(long)]
    x_bins: Option<usize>,
    /// Generated bins along y [default: 64]; overrides the config file
    #[arg(long)]
    y_bins: Option<usize>,
    /// Noise seed [default: 0]; overrides the config file
    #[arg(long)]
    seed: Option<u64>,
    /// Indent the JSON document
    #[arg(long, default_value_t = false)]
    pretty: bool,
    /// Write the raw multi-page TIFF instead of JSON
    #[arg(long, default_value_t = false)]
    tiff: bool,
    /// Write even if the file extension does not match the format
    #[arg(long, default_value_t = false)]
    force: bool,
    /// Summarize an existing JSON document and exit
    #[arg(long)]
    inspect: Option<PathBuf>,
}

fn inspect(path: &Path) -> anyhow::Result<()> {
    let axes = Axes::load(path).with_context(|| format!("loading {}", path.display()))?;
    let options = axes.options();

    println!("{}", path.display());
    println!("  type      {:?}", axes.graph_type());
    if axes.data().is_some() {
        let frames = axes.frames().context("decoding frames")?;
        println!(
            "  frames    {} ({} x {})",
            frames.len(),
            options.x_bins.unwrap_or_default(),
            options.y_bins.unwrap_or_default()
        );
        println!(
            "  intensity {:?}..={:?}",
            options.min_intensity, options.max_intensity
        );
    }
    for axis in DataAxis::ALL {
        let ticks = options.ticks(axis).unwrap_or_default();
        println!(
            "  axis {}    label {:?} unit {:?} ticks {} [{:?} .. {:?}]",
            axis,
            options.label(axis),
            options.unit(axis),
            ticks.len(),
            ticks.first(),
            ticks.last()
        );
    }
    let scheme = axes.color_scheme();
    let samples = [0.0, 0.5, 1.0]
        .iter()
        .map(|p| scheme.sample(*p))
        .collect::<Result<Vec<_>, _>>()
        .context("sampling colormap")?;
    println!(
        "  cmap      {:?} at {:?} -> {}",
        scheme.colors(),
        scheme.positions(),
        samples.join(" ")
    );
    println!("  loop      {}", options.looped);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(path) = &args.inspect {
        return inspect(path);
    }

    let mut config = if let Some(path) = &args.config {
        FigureConfig::load(path)?
    } else {
        FigureConfig::default()
    };
    config.override_generator(args.timesteps, args.x_bins, args.y_bins, args.seed);
    if let Some(output) = args.output {
        config.output = output;
    }
    if args.pretty {
        config.save.style = OutputStyle::Pretty;
    }
    if args.tiff {
        config.save.format = OutputFormat::Tiff;
    }
    if args.force {
        config.save.force = true;
    }

    let runner = Runner::new(config);
    let result = runner.execute()?;

    println!(
        "Saved {} -> frames {}, bins {}x{}, intensity {}..={}",
        result.output.display(),
        result.timesteps,
        result.x_bins,
        result.y_bins,
        result.min_intensity,
        result.max_intensity
    );

    Ok(())
}
