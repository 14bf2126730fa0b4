// rhythm-judge: judge a recorded replay against a map and print the judgements.

mod io;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rhythm_input::normalize_cursor_path;
use rhythm_rule::{JudgementSummary, WindowConfig, judge_parallel, judge_with_cursor};

use io::{MapFile, ReplayFile};

#[derive(Parser, Debug)]
#[command(name = "rhythm-judge", about = "Judge a rhythm game replay against its map")]
struct Args {
    /// Path to the map JSON file.
    #[arg(long)]
    map: PathBuf,

    /// Path to the replay JSON file.
    #[arg(long)]
    replay: PathBuf,

    /// Path to a window config JSON file. Defaults are used when omitted.
    #[arg(long, env = "RHYTHM_JUDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Judge channels on the thread pool.
    #[arg(long)]
    parallel: bool,

    /// Print a summary to stderr.
    #[arg(long)]
    summary: bool,

    /// Enable debug logging.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => {
            let config = WindowConfig::read(path)?;
            info!("loaded window config {}", path.display());
            config
        }
        None => WindowConfig::default(),
    };

    let map = MapFile::read(&args.map)?;
    let timeline = map.timeline()?;
    let replay = ReplayFile::read(&args.replay)?;
    let channel_map = replay.channel_map(timeline.ruleset())?;
    if channel_map.channel_count() != timeline.channel_count() {
        warn!(
            "replay maps {} channels, map has {}",
            channel_map.channel_count(),
            timeline.channel_count()
        );
    }

    let input = replay.input_events(&channel_map);
    info!(
        "judging {} scorepoints against {} input events",
        timeline.scorepoint_count(),
        input.len()
    );

    // judge_parallel only sees cursor positions carried by press/release events.
    let judgements = if args.parallel && !timeline.ruleset().has_position() {
        judge_parallel(&timeline, &input, &config)?
    } else {
        let cursor = normalize_cursor_path(&replay.samples);
        judge_with_cursor(&timeline, &input, &cursor, &config)?
    };

    let json = serde_json::to_string_pretty(&judgements).context("failed to encode judgements")?;
    println!("{json}");

    if args.summary {
        let summary = JudgementSummary::from_judgements(&judgements);
        eprintln!(
            "hit {} / miss {} / hold ok {} / hold fail {} / release hit {} / release miss {} / empty {}",
            summary.hit,
            summary.miss,
            summary.hold_ok,
            summary.hold_fail,
            summary.release_hit,
            summary.release_miss,
            summary.empty
        );
        eprintln!(
            "mean offset {:.2} ms, std dev {:.2} ms, within 50 ms {:.1}%",
            summary.mean_offset,
            summary.offset_std_dev(),
            summary.probability_within(50.0) * 100.0
        );
    }
    Ok(())
}
