//! One-shot prediction from a JSON observation.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin predict_json -- <observation.json> [--chart <path>] [--model-dir <dir>]
//! ```
//!
//! The observation uses the field names of `PatientObservation`, with the four
//! comorbidity flags given as `"Yes"` or `"No"`. The prediction is printed to
//! stdout as JSON; logs go to stderr.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bpsense::adapters::chart::SvgBarChart;
use bpsense::adapters::sanitize::SanitizingMakeWriter;
use bpsense::application::PredictionService;
use bpsense::ports::ChartRenderer;
use bpsense::{AppConfig, PatientObservation};

struct Args {
    observation: PathBuf,
    chart: Option<PathBuf>,
    model_dir: Option<PathBuf>,
}

fn usage() -> String {
    "Usage: predict_json <observation.json> [--chart <path>] [--model-dir <dir>]".to_string()
}

fn parse_args() -> Result<Args, String> {
    let mut args = env::args().skip(1);
    let mut observation: Option<PathBuf> = None;
    let mut chart: Option<PathBuf> = None;
    let mut model_dir: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--chart" => {
                let v = args.next().ok_or_else(usage)?;
                chart = Some(PathBuf::from(v));
            }
            "--model-dir" => {
                let v = args.next().ok_or_else(usage)?;
                model_dir = Some(PathBuf::from(v));
            }
            "-h" | "--help" => return Err(usage()),
            _ => {
                if observation.is_none() {
                    observation = Some(PathBuf::from(arg));
                } else {
                    return Err(usage());
                }
            }
        }
    }

    Ok(Args {
        observation: observation.ok_or_else(usage)?,
        chart,
        model_dir,
    })
}

fn main() -> Result<()> {
    let args = parse_args().map_err(|e| anyhow!(e))?;

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    let mut config = AppConfig::from_env();
    if let Some(dir) = args.model_dir {
        config.model_dir = dir;
    }

    let content = fs::read_to_string(&args.observation)
        .with_context(|| format!("Failed to read {:?}", args.observation))?;
    let observation: PatientObservation = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse observation in {:?}", args.observation))?;
    observation
        .validate()
        .map_err(|errors| anyhow!("Invalid observation: {}", errors.join(", ")))?;

    let models = bpsense::load_model_pair(&config)
        .with_context(|| format!("Failed to load models from {:?}", config.model_dir))?;
    let service = PredictionService::new(models);
    let prediction = service.predict(&observation)?;

    if let Some(path) = args.chart {
        let written = SvgBarChart::new(path).render(&prediction)?;
        eprintln!("Chart written to {}", written.display());
    }

    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}
