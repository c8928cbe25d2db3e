//! arcgauge CLI - render ring gauges and their transitions to SVG.

#![allow(
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args,
    clippy::unwrap_used,
    clippy::disallowed_methods,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::doc_markdown
)]

use arcgauge_core::{
    Color, GaugeConfig, GaugeError, Rect, RecordingCanvas, Result, Size, SvgCanvas, Widget,
};
use arcgauge_widgets::{Gauge, GaugeScreen};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arcgauge")]
#[command(about = "Ring gauge renderer")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single gauge frame
    Render {
        /// Gauge config (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Canvas width
        #[arg(long, default_value = "200")]
        width: f32,

        /// Canvas height
        #[arg(long, default_value = "200")]
        height: f32,

        /// Set this value before rendering
        #[arg(long, allow_negative_numbers = true)]
        value: Option<i32>,

        /// Seconds into the transition to sample (default: settled)
        #[arg(long, requires = "value")]
        at: Option<f64>,

        /// SVG background color (hex)
        #[arg(long)]
        background: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "svg")]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render every frame of a value transition
    Animate {
        /// Gauge config (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Canvas width
        #[arg(long, default_value = "200")]
        width: f32,

        /// Canvas height
        #[arg(long, default_value = "200")]
        height: f32,

        /// Target value
        #[arg(long, allow_negative_numbers = true, conflicts_with = "press", required_unless_present = "press")]
        value: Option<i32>,

        /// Press a host screen button instead of setting a value
        #[arg(long, value_enum)]
        press: Option<Press>,

        /// Frames per second
        #[arg(long, default_value = "30")]
        fps: u32,

        /// SVG background color (hex)
        #[arg(long)]
        background: Option<String>,

        /// Directory for frame_NNNN.svg files
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Check a gauge config for validity
    Check {
        /// Path to config file
        #[arg(default_value = "gauge.yaml")]
        config: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Press {
    Increase,
    Decrease,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Render {
            config,
            width,
            height,
            value,
            at,
            background,
            format,
            output,
        } => {
            let config = load_config(config.as_deref())?;
            let background = parse_background(background.as_deref())?;
            let size = Size::new(width, height);
            let gauge = sample_gauge(&config, size, value, at);
            let text = match format {
                OutputFormat::Svg => render_svg(&gauge, size, background),
                OutputFormat::Json => render_json(&gauge)?,
            };
            write_output(output.as_deref(), &text)
        }
        Commands::Animate {
            config,
            width,
            height,
            value,
            press,
            fps,
            background,
            output,
        } => {
            let config = load_config(config.as_deref())?;
            let background = parse_background(background.as_deref())?;
            let target = match (value, press) {
                (Some(v), _) => Target::Value(v),
                (None, Some(p)) => Target::Press(p),
                (None, None) => {
                    return Err(GaugeError::InvalidAnimation(
                        "either --value or --press is required".to_string(),
                    ))
                }
            };
            let size = Size::new(width, height);
            let written = animate(&config, size, target, fps, background, &output)?;
            info!(frames = written, dir = %output.display(), "wrote animation frames");
            println!("Wrote {} frames to {}", written, output.display());
            Ok(())
        }
        Commands::Check { config } => {
            let loaded = GaugeConfig::load(&config)?;
            println!("Config valid: {}", config.display());
            println!("  Value: {}", loaded.value);
            println!(
                "  Span: {} to {} degrees",
                loaded.start_position, loaded.end_position
            );
            println!(
                "  Animation: {}s {:?}",
                loaded.animation.duration, loaded.animation.easing
            );
            Ok(())
        }
    }
}

/// What starts the animated transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Value(i32),
    Press(Press),
}

fn load_config(path: Option<&Path>) -> Result<GaugeConfig> {
    match path {
        Some(path) => GaugeConfig::load(path),
        None => Ok(GaugeConfig::default()),
    }
}

/// Build a gauge, optionally move it to `value`, and sample it `at` seconds
/// into the transition (settled when `at` is omitted).
fn sample_gauge(config: &GaugeConfig, size: Size, value: Option<i32>, at: Option<f64>) -> Gauge {
    let mut gauge = Gauge::from_config(config);
    gauge.layout(Rect::from_size(size));
    if let Some(value) = value {
        gauge.set_value(value);
        gauge.advance_to(at.unwrap_or(config.animation.duration));
    }
    gauge
}

fn parse_background(hex: Option<&str>) -> Result<Option<Color>> {
    Ok(hex.map(Color::from_hex).transpose()?)
}

fn render_svg(gauge: &Gauge, size: Size, background: Option<Color>) -> String {
    let mut svg = SvgCanvas::new(size);
    if let Some(color) = background {
        svg = svg.with_background(color);
    }
    gauge.paint(&mut svg);
    svg.finish()
}

fn render_json(gauge: &Gauge) -> Result<String> {
    let mut canvas = RecordingCanvas::new();
    gauge.paint(&mut canvas);
    Ok(serde_json::to_string_pretty(canvas.commands())?)
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text)?;
            debug!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Upper bound on frames written by one `animate` run.
const MAX_FRAMES: usize = 10_000;

/// Sample times from 0 to `duration` inclusive at `fps`.
fn frame_times(duration: f64, fps: u32) -> Result<Vec<f64>> {
    let fps = f64::from(fps.max(1));
    // tolerate rounding in duration * fps so 0.1s at 30fps is 3 steps, not 4
    let steps = (duration * fps - 1e-9).ceil().max(0.0);
    if !steps.is_finite() || steps >= MAX_FRAMES as f64 {
        return Err(GaugeError::InvalidAnimation(format!(
            "{duration}s at {fps} fps needs more than {MAX_FRAMES} frames"
        )));
    }
    let steps = steps as usize;
    Ok((0..=steps)
        .map(|i| {
            if i == steps {
                duration
            } else {
                (i as f64 / fps).min(duration)
            }
        })
        .collect())
}

fn frame_name(index: usize) -> String {
    format!("frame_{:04}.svg", index)
}

fn animate(
    config: &GaugeConfig,
    size: Size,
    target: Target,
    fps: u32,
    background: Option<Color>,
    dir: &Path,
) -> Result<usize> {
    let times = frame_times(config.animation.duration, fps)?;
    fs::create_dir_all(dir)?;

    let mut screen = GaugeScreen::from_config(config);
    screen.gauge_mut().layout(Rect::from_size(size));
    match target {
        Target::Value(v) => screen.gauge_mut().set_value(v),
        Target::Press(Press::Increase) => {
            screen.increase();
        }
        Target::Press(Press::Decrease) => {
            screen.decrease();
        }
    }

    for (index, &t) in times.iter().enumerate() {
        screen.advance_to(t);
        let path = dir.join(frame_name(index));
        fs::write(&path, render_svg(screen.gauge(), size, background))?;
        debug!(frame = index, at = t, path = %path.display(), "wrote frame");
    }
    Ok(times.len())
}
