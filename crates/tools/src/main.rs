use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use orientation::Pose;
use scroll::PipelineConfig;
use scroll::replay::{Trace, replay};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tilt", about = "Replay and inspect device-orientation scroll sessions")]
struct Cli {
    /// Pipeline config JSON; omitted fields keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a recorded trace and print one JSON line per sample.
    Replay {
        trace: PathBuf,
        /// Print a summary line to stderr after the frames.
        #[arg(long)]
        summary: bool,
    },
    /// Print the effective configuration.
    Config,
}

#[derive(Serialize)]
struct Summary {
    samples: usize,
    final_pose: &'static str,
    orientation_supported: bool,
    vertical_range: f64,
    horizontal_range: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Replay { trace, summary } => cmd_replay(&trace, config, summary),
        Command::Config => cmd_config(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig, String> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    let config = PipelineConfig::from_json_str(&text).map_err(|e| format!("{path:?}: {e}"))?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

fn cmd_config(config: &PipelineConfig) -> Result<(), String> {
    let text = config.to_json_pretty().map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

fn cmd_replay(path: &Path, config: PipelineConfig, summary: bool) -> Result<(), String> {
    let text = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    let trace = Trace::from_json_str(&text).map_err(|e| format!("{path:?}: {e}"))?;
    info!(events = trace.events.len(), "replaying trace");

    let (frames, controller) = replay(&trace, config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for frame in &frames {
        let line = serde_json::to_string(frame).map_err(|e| format!("json: {e}"))?;
        writeln!(out, "{line}").map_err(|e| format!("write: {e}"))?;
    }

    if summary {
        let pipeline = controller.pipeline();
        let geometry = pipeline.geometry();
        let s = Summary {
            samples: frames.len(),
            final_pose: pose_name(pipeline.orientation().pose()),
            orientation_supported: controller.sink().orientation_supported,
            vertical_range: geometry.vertical_range(),
            horizontal_range: geometry.horizontal_range(),
        };
        let line = serde_json::to_string(&s).map_err(|e| format!("json: {e}"))?;
        eprintln!("{line}");
    }
    Ok(())
}

fn pose_name(pose: Pose) -> &'static str {
    match pose {
        Pose::Portrait => "portrait",
        Pose::LandscapeClockwise => "landscape-clockwise",
        Pose::LandscapeCounterClockwise => "landscape-counter-clockwise",
    }
}
