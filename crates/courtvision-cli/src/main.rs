//! courtvision CLI — tennis match analysis over cached detection streams.
//!
//! Detection models run elsewhere; this tool consumes their cached per-frame
//! outputs ("stubs", JSON) and produces match analytics.

use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use courtvision_core::{
    analyze, detect_shot_frames, interpolate_ball_stream, minicourt, AnalysisConfig, BallFrame,
    CourtKeypoints, PlayerFrame, ShotConfig, StatsConfig,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "courtvision")]
#[command(about = "Analyze tennis match footage from cached detection streams (stub JSON files)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis and write a match-analysis JSON.
    Analyze(CliAnalyzeArgs),

    /// Detect and print shot frames from a ball detection stream.
    Shots(CliShotsArgs),

    /// Print the canonical mini-court model.
    CourtInfo,
}

#[derive(Debug, Clone, Args)]
struct CliAnalyzeArgs {
    /// Path to the player detection stream (JSON: array of id → box maps).
    #[arg(long)]
    players: PathBuf,

    /// Path to the ball detection stream (JSON: array of optional boxes).
    #[arg(long)]
    ball: PathBuf,

    /// Path to the 14 court keypoints (JSON: array of [x, y] pairs).
    #[arg(long)]
    keypoints: PathBuf,

    /// Path to write the analysis result (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Camera frame rate.
    #[arg(long, default_value = "24.0")]
    fps: f64,

    #[command(flatten)]
    shot: CliShotTuning,
}

#[derive(Debug, Clone, Args)]
struct CliShotsArgs {
    /// Path to the ball detection stream (JSON: array of optional boxes).
    #[arg(long)]
    ball: PathBuf,

    #[command(flatten)]
    shot: CliShotTuning,
}

#[derive(Debug, Clone, Args)]
struct CliShotTuning {
    /// Rolling-mean window (frames) for the ball center-y series.
    #[arg(long, default_value = "5")]
    smoothing_window: usize,

    /// Minimum vertical displacement (pixels) on each side of a reversal.
    #[arg(long, default_value = "10.0")]
    min_displacement_px: f64,

    /// Half-width (frames) of the displacement confirmation window.
    #[arg(long, default_value = "25")]
    confirm_window: usize,

    /// Minimum frame gap between shot events; closer candidates merge.
    #[arg(long, default_value = "20")]
    min_gap_frames: usize,
}

impl CliShotTuning {
    fn to_core(&self) -> ShotConfig {
        ShotConfig {
            smoothing_window: self.smoothing_window,
            min_displacement_px: self.min_displacement_px,
            confirm_window: self.confirm_window,
            min_gap_frames: self.min_gap_frames,
        }
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> CliResult<T> {
    let file = File::open(path).map_err(|e| format!("open {}: {}", path.display(), e))?;
    Ok(serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("parse {}: {}", path.display(), e))?)
}

fn run_analyze(args: &CliAnalyzeArgs) -> CliResult<()> {
    let players: Vec<PlayerFrame> = load_json(&args.players)?;
    let ball: Vec<BallFrame> = load_json(&args.ball)?;
    let keypoints: CourtKeypoints = load_json(&args.keypoints)?;

    let cfg = AnalysisConfig {
        shot: args.shot.to_core(),
        stats: StatsConfig { fps: args.fps },
    };
    let result = analyze(&players, &ball, &keypoints, &cfg)?;

    let out = File::create(&args.out).map_err(|e| format!("create {}: {}", args.out.display(), e))?;
    serde_json::to_writer_pretty(BufWriter::new(out), &result)?;

    println!(
        "players {:?}, {} shot events, {} stats rows -> {}",
        result.player_ids,
        result.shot_frames.len(),
        result.stats.len(),
        args.out.display()
    );
    Ok(())
}

fn run_shots(args: &CliShotsArgs) -> CliResult<()> {
    let ball: Vec<BallFrame> = load_json(&args.ball)?;
    let dense = interpolate_ball_stream(&ball);
    let frames = detect_shot_frames(&dense, &args.shot.to_core());
    println!("{} shot events: {:?}", frames.len(), frames);
    Ok(())
}

fn run_court_info() -> CliResult<()> {
    println!(
        "doubles court: {} m x {} m (singles width {} m)",
        minicourt::DOUBLES_COURT_WIDTH_M,
        minicourt::COURT_LENGTH_M,
        minicourt::SINGLES_COURT_WIDTH_M
    );
    println!(
        "canvas: {} x {} px, padding {} px",
        minicourt::CANVAS_WIDTH_PX,
        minicourt::CANVAS_HEIGHT_PX,
        minicourt::CANVAS_PADDING_PX
    );
    println!("canonical keypoints:");
    for (i, kp) in minicourt::default_canonical_keypoints().iter().enumerate() {
        println!("  {:2}: [{:7.2}, {:7.2}]", i, kp[0], kp[1]);
    }
    Ok(())
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Analyze(args) => run_analyze(args),
        Commands::Shots(args) => run_shots(args),
        Commands::CourtInfo => run_court_info(),
    }
}
