//! dga - Dissolved Gas Analysis from the command line.
//!
//! Reads samples in their JSON form and prints the findings of one method.
//!
//! Run: `dga iec60599 latest.json --previous last_year.json --oil-volume 25000`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dga_engine::prelude::*;

/// Transformer fault diagnosis from dissolved gases
#[derive(Parser, Debug)]
#[command(name = "dga")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Transformer fault diagnosis from Dissolved Gas Analysis", long_about = None)]
struct Cli {
    /// Config file path (default: <config dir>/dga/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the findings as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// IEC 60599 interpretation
    Iec60599 {
        #[command(flatten)]
        input: Input,

        /// Main tank oil volume in litres
        #[arg(long)]
        oil_volume: Option<f64>,

        /// Whether the OLTC shares oil with the main tank
        #[arg(long, value_name = "BOOL")]
        oltc: Option<bool>,
    },
    /// IEEE C57.104 Table 1 screening
    IeeeC57104 {
        #[command(flatten)]
        input: Input,

        /// Transformer age in years
        #[arg(long)]
        age: Option<f64>,
    },
    /// Duval Triangle 1 with Triangles 4 and 5
    Triangles {
        /// Sample file (JSON)
        sample: PathBuf,
    },
    /// Duval Triangle 2 for on-load tap changers
    TrianglesOltc {
        /// Sample file (JSON)
        sample: PathBuf,
    },
    /// Duval Pentagons 1 and 2
    Pentagons {
        /// Sample file (JSON)
        sample: PathBuf,
    },
    /// Rogers ratios
    Rogers {
        /// Sample file (JSON)
        sample: PathBuf,
    },
    /// Print the JSON form of a sample
    Sample {
        /// Sampling date (YYYY-MM-DD)
        #[arg(long)]
        date: chrono::NaiveDate,

        /// H2 CH4 C2H6 C2H4 C2H2 CO CO2 O2 N2 in ppm
        #[arg(num_args = 9, required = true)]
        ppm: Vec<f64>,
    },
}

#[derive(Args, Debug)]
struct Input {
    /// Latest sample file (JSON)
    sample: PathBuf,

    /// Previous sample file (JSON)
    #[arg(long)]
    previous: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dga=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");
    let limits = config.detection_limits();

    let outputs = match cli.command {
        Command::Iec60599 { input, oil_volume, oltc } => {
            let (current, previous) = input.read()?;
            let settings = Settings::resolve(&config, Overrides { oil_volume, oltc, age: None });
            Iec60599::new()
                .oil_volume_litres(settings.oil_volume_litres)
                .communicating_oltc(settings.communicating_oltc)
                .detection_limits(limits)
                .execute(Some(&current), previous.as_ref())?
        }
        Command::IeeeC57104 { input, age } => {
            let (current, previous) = input.read()?;
            let settings = Settings::resolve(&config, Overrides { age, ..Overrides::default() });
            IeeeC57104::new()
                .transformer_age_years(settings.transformer_age_years)
                .detection_limits(limits)
                .execute(Some(&current), previous.as_ref())?
        }
        Command::Triangles { sample } => run_single(DuvalTriangles::new().detection_limits(limits), &sample)?,
        Command::TrianglesOltc { sample } => {
            run_single(DuvalTrianglesOltc::new().detection_limits(limits), &sample)?
        }
        Command::Pentagons { sample } => run_single(DuvalPentagons::new().detection_limits(limits), &sample)?,
        Command::Rogers { sample } => run_single(RogersRatios::new().detection_limits(limits), &sample)?,
        Command::Sample { date, ppm } => {
            let values: [f64; 9] = ppm.try_into().map_err(|_| anyhow::anyhow!("expected nine ppm values"))?;
            let sampling_date = date.and_hms_opt(0, 0, 0).context("invalid sampling date")?;
            println!("{}", serialize_sample(&GasSample::from_ppm(sampling_date, values))?);
            return Ok(());
        }
    };

    info!(entries = outputs.len(), "analysis complete");
    if cli.json {
        println!("{}", serde_json::to_string_pretty(outputs.entries())?);
    } else {
        for entry in &outputs {
            println!("{entry}");
        }
    }

    Ok(())
}

/// Transformer parameters given on the command line.
#[derive(Debug, Clone, Copy, Default)]
struct Overrides {
    oil_volume: Option<f64>,
    oltc: Option<bool>,
    age: Option<f64>,
}

/// Transformer parameters a method runs with.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Settings {
    oil_volume_litres: f64,
    communicating_oltc: bool,
    transformer_age_years: Option<f64>,
}

impl Settings {
    /// A flag that was given wins over the config file.
    fn resolve(config: &AnalysisConfig, overrides: Overrides) -> Self {
        Self {
            oil_volume_litres: overrides.oil_volume.unwrap_or(config.oil_volume_litres),
            communicating_oltc: overrides.oltc.unwrap_or(config.has_communicating_oltc),
            transformer_age_years: overrides.age.or(config.transformer_age_years),
        }
    }
}

impl Input {
    fn read(&self) -> Result<(GasSample, Option<GasSample>)> {
        let current = read_sample(&self.sample)?;
        let previous = self.previous.as_deref().map(read_sample).transpose()?;
        Ok((current, previous))
    }
}

fn run_single(algorithm: impl Algorithm, path: &Path) -> Result<Outputs> {
    Ok(algorithm.execute(Some(&read_sample(path)?), None)?)
}

fn read_sample(path: &Path) -> Result<GasSample> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_sample(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => Ok(AnalysisConfig::load(path)?),
        None => Ok(AnalysisConfig::load_or_default(
            dirs::config_dir().map(|p| p.join("dga/config.yaml")).unwrap_or_default(),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            oil_volume_litres: 25_000.0,
            has_communicating_oltc: true,
            transformer_age_years: Some(12.0),
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn test_config_used_without_flags() {
        let settings = Settings::resolve(&config(), Overrides::default());
        assert_eq!(
            settings,
            Settings { oil_volume_litres: 25_000.0, communicating_oltc: true, transformer_age_years: Some(12.0) }
        );
    }

    #[test]
    fn test_flags_override_config() {
        let overrides = Overrides { oil_volume: Some(1000.0), oltc: Some(false), age: Some(35.0) };
        let settings = Settings::resolve(&config(), overrides);
        assert_eq!(settings.oil_volume_litres, 1000.0);
        assert!(!settings.communicating_oltc);
        assert_eq!(settings.transformer_age_years, Some(35.0));
    }

    #[test]
    fn test_defaults_without_config_or_flags() {
        let settings = Settings::resolve(&AnalysisConfig::default(), Overrides::default());
        assert_eq!(settings.oil_volume_litres, 0.0);
        assert!(!settings.communicating_oltc);
        assert_eq!(settings.transformer_age_years, None);
    }

    #[test]
    fn test_oltc_flag_takes_explicit_value() {
        let cli = Cli::try_parse_from(["dga", "iec60599", "latest.json", "--oltc", "false"]).unwrap();
        match cli.command {
            Command::Iec60599 { oltc, oil_volume, .. } => {
                assert_eq!(oltc, Some(false));
                assert_eq!(oil_volume, None);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["dga", "iec60599", "latest.json"]).unwrap();
        assert!(matches!(cli.command, Command::Iec60599 { oltc: None, .. }));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
