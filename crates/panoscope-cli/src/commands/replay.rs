use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use panoscope_core::io::DirectorySource;
use panoscope_core::scan::ScanPhase;
use panoscope_core::session::{Viewer, ViewerEvent};
use panoscope_core::view::VerticalBound;
use panoscope_core::viewport::CacheStats;
use tracing::info;

use super::load_config;
use crate::progress::BarReporter;
use crate::summary;
use crate::trace::{parse_trace, TraceStep};

#[derive(Args)]
pub struct ReplayArgs {
    /// Panorama directory containing catalog.toml
    pub dir: PathBuf,

    /// Panorama to view
    #[arg(long)]
    pub id: u32,

    /// Sensor trace: `t,pitch,roll,yaw` or `t,event` per line
    #[arg(short, long)]
    pub trace: PathBuf,

    /// Viewer config (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Totals gathered while a trace is replayed.
#[derive(Default)]
pub struct ReplayStats {
    pub panorama: String,
    pub samples: usize,
    pub events: usize,
    pub duration: Duration,
    pub confirmations: usize,
    pub frames_too_high: usize,
    pub frames_too_low: usize,
    pub cache: CacheStats,
    pub switched_away: bool,
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let text = std::fs::read_to_string(&args.trace)
        .with_context(|| format!("Failed to read trace {}", args.trace.display()))?;
    let trace = parse_trace(&text)?;

    let source = DirectorySource::new(&args.dir);
    let mut viewer = Viewer::new(config)?;
    let reporter = BarReporter::new()?;
    let session = viewer
        .select(&source, args.id, &reporter)
        .with_context(|| format!("Failed to open panorama {}", args.id))?;
    reporter.finish("Ready");

    let mut stats = ReplayStats {
        panorama: session.name().to_string(),
        ..Default::default()
    };
    let mut last_phase = ScanPhase::Idle;

    println!();
    for line in &trace {
        stats.duration = line.at;
        match line.step {
            TraceStep::Event(event) => {
                stats.events += 1;
                viewer.handle(event, line.at)?;
                if event == ViewerEvent::SwitchPanorama {
                    stats.switched_away = true;
                    break;
                }
            }
            TraceStep::Sample(sample) => {
                stats.samples += 1;
                let report = viewer.frame(sample, line.at)?;
                match report.bound {
                    VerticalBound::TooHigh => stats.frames_too_high += 1,
                    VerticalBound::TooLow => stats.frames_too_low += 1,
                    VerticalBound::Within => {}
                }
                if transitioned(&last_phase, &report.scan) {
                    if matches!(report.scan, ScanPhase::Confirmed { .. }) {
                        stats.confirmations += 1;
                    }
                    print_transition(&viewer, line.at, &report.scan);
                }
                last_phase = report.scan;
            }
        }
    }

    if let Some(session) = viewer.session() {
        stats.cache = session.cache().stats();
    }
    info!(samples = stats.samples, events = stats.events, "Replay finished");
    summary::print_replay_summary(&stats);
    Ok(())
}

fn transitioned(prev: &ScanPhase, next: &ScanPhase) -> bool {
    match (prev, next) {
        (ScanPhase::Idle, ScanPhase::Idle) => false,
        (ScanPhase::Scanning { handle: a, .. }, ScanPhase::Scanning { handle: b, .. }) => a != b,
        (ScanPhase::Confirmed { handle: a }, ScanPhase::Confirmed { handle: b }) => a != b,
        _ => true,
    }
}

fn print_transition(viewer: &Viewer, at: Duration, phase: &ScanPhase) {
    let label = phase
        .handle()
        .and_then(|h| viewer.session().and_then(|s| s.point(h)))
        .map(|p| {
            let first = p.description.first().map(String::as_str).unwrap_or("");
            format!("point {} {first}", p.id)
        })
        .unwrap_or_default();
    let name = match phase {
        ScanPhase::Idle => "idle",
        ScanPhase::Scanning { .. } => "scanning",
        ScanPhase::Confirmed { .. } => "confirmed",
    };
    println!("  {:>8.3}s  {:<10} {}", at.as_secs_f64(), name, label);
}
