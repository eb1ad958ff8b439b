use clap::Parser;
use imgsearch::io::{load_image, ColorMode};
use imgsearch::{ImgSearchError, MatchConfig, MatchPoint, Matcher, Metric, Suppression};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "imgsearch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
enum ColorConfig {
    #[default]
    Gray,
    Rgb,
}

impl From<ColorConfig> for ColorMode {
    fn from(value: ColorConfig) -> Self {
        match value {
            ColorConfig::Gray => ColorMode::Gray,
            ColorConfig::Rgb => ColorMode::Rgb,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
enum ModeConfig {
    #[default]
    Best,
    All,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum SuppressionConfig {
    #[default]
    Window,
    Radius {
        x: usize,
        y: usize,
    },
    FloodFill {
        tolerance: f32,
    },
}

impl TryFrom<SuppressionConfig> for Suppression {
    type Error = ImgSearchError;

    fn try_from(value: SuppressionConfig) -> Result<Self, Self::Error> {
        match value {
            SuppressionConfig::Window => Ok(Suppression::Window),
            SuppressionConfig::Radius { x, y } => Ok(Suppression::radius(x, y)),
            SuppressionConfig::FloodFill { tolerance } => Suppression::flood_fill(tolerance),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MatchConfigJson {
    metric: String,
    suppression: SuppressionConfig,
    parallel: bool,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            metric: cfg.metric.name().to_string(),
            suppression: SuppressionConfig::Window,
            parallel: cfg.parallel,
        }
    }
}

impl MatchConfigJson {
    fn to_config(&self) -> Result<MatchConfig, ImgSearchError> {
        Ok(MatchConfig {
            metric: self.metric.parse::<Metric>()?,
            suppression: self.suppression.try_into()?,
            parallel: self.parallel,
        })
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
struct RegionJson {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    template_path: String,
    output_path: Option<String>,
    color: ColorConfig,
    mode: ModeConfig,
    max_count: usize,
    threshold: f32,
    return_center: bool,
    search_region: Option<RegionJson>,
    #[serde(rename = "match")]
    match_cfg: MatchConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            template_path: String::new(),
            output_path: None,
            color: ColorConfig::Gray,
            mode: ModeConfig::Best,
            max_count: 1,
            threshold: 0.9,
            return_center: true,
            search_region: None,
            match_cfg: MatchConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    x: usize,
    y: usize,
    score: f32,
}

impl MatchRecord {
    fn from_point(point: MatchPoint, offset: (usize, usize)) -> Self {
        Self {
            x: point.x + offset.0,
            y: point.y + offset.1,
            score: point.score,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    best: Option<MatchRecord>,
    matches: Vec<MatchRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("imgsearch=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.template_path.is_empty() {
        return Err("image_path and template_path must be set in the config".into());
    }
    // Metric and suppression problems surface here, before any image is decoded.
    let matcher = Matcher::default().with_config(config.match_cfg.to_config()?);

    let image = load_image(&config.image_path, config.color.into())?;
    let template = load_image(&config.template_path, config.color.into())?;

    let full_view = image.view();
    let (image_view, offset) = match config.search_region {
        Some(region) => (
            full_view.roi(region.x, region.y, region.width, region.height)?,
            (region.x, region.y),
        ),
        None => (full_view, (0, 0)),
    };

    let points = match config.mode {
        ModeConfig::Best => vec![matcher.find_best(
            template.view(),
            image_view,
            config.return_center,
        )?],
        ModeConfig::All => matcher.find_all(
            template.view(),
            image_view,
            config.max_count,
            config.threshold,
            config.return_center,
        )?,
    };

    let matches: Vec<MatchRecord> = points
        .into_iter()
        .map(|point| MatchRecord::from_point(point, offset))
        .collect();
    let output = Output {
        best: matches.first().map(|m| MatchRecord {
            x: m.x,
            y: m.y,
            score: m.score,
        }),
        matches,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
