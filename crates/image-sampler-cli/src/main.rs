use anyhow::bail;
use chrono::NaiveTime;
use clap::{Args, Parser};
use image_sampler_core::{logging, parse_time_of_day, Config, ImageSampler, LogLevel, SamplingPolicy};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "image-sampler")]
#[command(about = "Sample images by capture time and copy them with sequential names")]
#[command(version)]
struct Cli {
    /// Source directory containing images
    source_dir: PathBuf,

    /// Destination directory for sampled images
    dest_dir: PathBuf,

    /// Base name for output files (default: derived from first image, replacing 'CO' with 'SM')
    #[arg(long)]
    base_name: Option<String>,

    #[command(flatten)]
    method: MethodArgs,

    /// Show what would be copied without making changes
    #[arg(long)]
    dry_run: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to a rotating file in this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

/// Mutually exclusive sampling methods
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct MethodArgs {
    /// Sample every Nth image
    #[arg(long, value_name = "N")]
    every_nth: Option<usize>,

    /// Sample the image closest to the specified time (HH:MM) each day
    #[arg(long, value_name = "HH:MM", value_parser = parse_time_arg)]
    closest_to: Option<NaiveTime>,

    /// Sample every Nth image within a time range (HH:MM HH:MM)
    #[arg(long, num_args = 3, value_names = ["N", "START", "END"])]
    time_range: Option<Vec<String>>,
}

impl MethodArgs {
    fn policy(&self) -> anyhow::Result<SamplingPolicy> {
        if let Some(n) = self.every_nth {
            return Ok(SamplingPolicy::EveryNth(n));
        }
        if let Some(target) = self.closest_to {
            return Ok(SamplingPolicy::ClosestToTimeOfDay(target));
        }
        match self.time_range.as_deref() {
            Some([n, start, end]) => {
                let n = n.parse::<usize>().map_err(|e| {
                    anyhow::anyhow!("Invalid time range format: bad N {:?}: {}", n, e)
                })?;
                Ok(SamplingPolicy::EveryNthInRange {
                    n,
                    start: parse_time_of_day(start)?,
                    end: parse_time_of_day(end)?,
                })
            }
            _ => bail!("Exactly one sampling method must be given"),
        }
    }
}

fn parse_time_arg(value: &str) -> Result<NaiveTime, String> {
    parse_time_of_day(value).map_err(|e| e.to_string())
}

fn init_logging(log_dir: Option<&Path>, log_level: LogLevel) -> anyhow::Result<()> {
    let level = log_level.to_level_filter();

    match log_dir {
        Some(log_dir) => logging::init_logger(log_dir, level)
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e)),
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_env(logging::LOG_ENV_VAR)
                .init();
            Ok(())
        }
    }
}

fn main() -> Result<(), anyhow::Error> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Set up configuration
    let mut config = Config::new(&cli.source_dir, &cli.dest_dir, cli.method.policy()?)
        .with_dry_run(cli.dry_run);
    if let Some(base_name) = &cli.base_name {
        config = config.with_base_name(base_name);
    }
    init_logging(cli.log_dir.as_deref(), LogLevel::from_verbosity(cli.verbose))?;

    // Validates the source directory and the policy
    let sampler = ImageSampler::new(config)?;

    info!("Starting image sampling...");
    let report = sampler.run()?;
    info!("Sampling complete");

    if cli.json {
        println!("{}", report.to_json()?);
    } else if report.dry_run {
        for copy in &report.copies {
            println!("{} -> {}", copy.source.display(), copy.destination.display());
        }
        println!(
            "Would copy {} images to {}",
            report.count(),
            report.dest_dir.display()
        );
    } else {
        println!(
            "Successfully copied {} images to {}",
            report.count(),
            report.dest_dir.display()
        );
    }

    Ok(())
}
