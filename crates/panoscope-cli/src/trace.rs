use std::time::Duration;

use anyhow::{bail, Context, Result};
use panoscope_core::orientation::OrientationSample;
use panoscope_core::session::ViewerEvent;

/// What happens at one instant of a recorded sensor trace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraceStep {
    Sample(OrientationSample),
    Event(ViewerEvent),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceLine {
    pub at: Duration,
    pub step: TraceStep,
}

/// Parse a trace of `t,pitch,roll,yaw` and `t,event` lines.
///
/// Times are seconds since the session started, angles are radians. Blank
/// lines and `#` comments are skipped.
pub fn parse_trace(text: &str) -> Result<Vec<TraceLine>> {
    let mut lines = Vec::new();
    for (n, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parsed = parse_line(line).with_context(|| format!("trace line {}: {line}", n + 1))?;
        lines.push(parsed);
    }
    Ok(lines)
}

fn parse_line(line: &str) -> Result<TraceLine> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let secs: f64 = fields[0].parse().context("bad timestamp")?;
    let at = Duration::try_from_secs_f64(secs).context("timestamp must be non-negative")?;

    let step = match fields.as_slice() {
        [_, pitch, roll, yaw] => TraceStep::Sample(OrientationSample::new(
            pitch.parse().context("bad pitch")?,
            roll.parse().context("bad roll")?,
            yaw.parse().context("bad yaw")?,
        )),
        [_, event] => TraceStep::Event(parse_event(event)?),
        _ => bail!("expected 2 or 4 fields, found {}", fields.len()),
    };
    Ok(TraceLine { at, step })
}

fn parse_event(name: &str) -> Result<ViewerEvent> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "touch" => ViewerEvent::Touch,
        "pause" => ViewerEvent::TogglePause,
        "calibrate" | "calibrate-start" => ViewerEvent::BeginCalibration,
        "release" | "calibrate-end" => ViewerEvent::EndCalibration,
        "switch" => ViewerEvent::SwitchPanorama,
        other => bail!("unknown event '{other}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_samples_and_events() {
        let text = "# recorded\n0.0, 0.1, -1.0, 3.0\n\n0.5,pause\n";
        let lines = parse_trace(text).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0].step,
            TraceStep::Sample(OrientationSample::new(0.1, -1.0, 3.0))
        );
        assert_eq!(lines[1].at, Duration::from_millis(500));
        assert_eq!(lines[1].step, TraceStep::Event(ViewerEvent::TogglePause));
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(parse_trace("0.0,1.0,2.0").is_err());
        assert!(parse_trace("-1.0,touch").is_err());
        assert!(parse_trace("0.0,wave").is_err());
    }
}
