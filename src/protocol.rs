//! Text codec for the turn-based race protocol
//!
//! Input, once per race:
//! ```text
//! <laps>
//! <checkpointCount>
//! <x> <y>            (checkpointCount lines)
//! ```
//! then once per turn, one line per pod:
//! ```text
//! <x> <y> <vx> <vy> <angle> <nextCheckpointId>
//! ```
//! Output is one command per pod: `<x> <y> <thrust>` or `<x> <y> SHIELD`.
//!
//! Only strings go in and out; reading and printing belong to the caller.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::consts::CHECKPOINT_RADIUS;
use crate::error::{Result, SimError};
use crate::sim::{Pod, Track, Vector2D, seek};
use crate::{normalize_angle, round_half_up};

/// Race description sent before the first turn
#[derive(Debug, Clone, PartialEq)]
pub struct RaceHeader {
    pub laps: u32,
    pub checkpoints: Vec<Vector2D>,
}

impl RaceHeader {
    pub fn track(&self) -> Track {
        Track::from_positions(self.checkpoints.iter().copied(), CHECKPOINT_RADIUS)
    }
}

pub fn parse_race_header(input: &str) -> Result<RaceHeader> {
    let eof_line = input.lines().count() + 1;
    let mut lines = input.lines().enumerate().map(|(i, l)| (i + 1, l));
    let mut next_line = |what: &str| {
        lines.next().ok_or_else(|| {
            parse_error(eof_line, format!("unexpected end of input, expected {what}"))
        })
    };

    let (line_no, line) = next_line("lap count")?;
    let [laps] = parse_ints::<1>(line, line_no)?;
    let laps = u32::try_from(laps).map_err(|_| parse_error(line_no, "lap count out of range"))?;

    let (line_no, line) = next_line("checkpoint count")?;
    let [count] = parse_ints::<1>(line, line_no)?;
    let count =
        usize::try_from(count).map_err(|_| parse_error(line_no, "checkpoint count out of range"))?;

    // count is untrusted; grow as lines actually arrive
    let mut checkpoints = Vec::new();
    for _ in 0..count {
        let (line_no, line) = next_line("checkpoint position")?;
        let [x, y] = parse_ints::<2>(line, line_no)?;
        checkpoints.push(Vector2D::new(x as f64, y as f64));
    }

    Ok(RaceHeader { laps, checkpoints })
}

/// One pod's state as reported at the start of a turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PodReport {
    pub position: Vector2D,
    pub velocity: Vector2D,
    /// Degrees
    pub angle: f64,
    pub next_checkpoint: usize,
}

impl PodReport {
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        let [x, y, vx, vy, angle, next] = parse_ints::<6>(line, line_no)?;
        let next_checkpoint = usize::try_from(next)
            .map_err(|_| parse_error(line_no, format!("bad checkpoint id {next}")))?;
        Ok(Self {
            position: Vector2D::new(x as f64, y as f64),
            velocity: Vector2D::new(vx as f64, vy as f64),
            angle: angle as f64,
            next_checkpoint,
        })
    }

    /// Pod racing `track`, targeting the reported checkpoint
    pub fn into_pod(self, track: Arc<Track>) -> Result<Pod> {
        let heading = normalize_angle(self.angle.to_radians());
        let mut pod = Pod::new(self.position, self.velocity, Vector2D::ZERO, heading);
        pod.set_track(track);
        pod.set_current_checkpoint(self.next_checkpoint)?;
        Ok(pod)
    }
}

impl FromStr for PodReport {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, 1)
    }
}

/// Parse a turn's pod lines. `first_line` numbers the lines in errors.
pub fn parse_turn(input: &str, first_line: usize, track: &Arc<Track>) -> Result<Vec<Pod>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| PodReport::parse(line, first_line + i)?.into_pod(track.clone()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thrust {
    Power(i64),
    Shield,
}

/// A pod's output for one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub x: i64,
    pub y: i64,
    pub thrust: Thrust,
}

impl Command {
    pub fn new(at: Vector2D, thrust: Thrust) -> Self {
        Self {
            x: round_half_up(at.x()) as i64,
            y: round_half_up(at.y()) as i64,
            thrust,
        }
    }

    pub fn shield(at: Vector2D) -> Self {
        Self::new(at, Thrust::Shield)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.thrust {
            Thrust::Power(power) => write!(f, "{} {} {}", self.x, self.y, power),
            Thrust::Shield => write!(f, "{} {} SHIELD", self.x, self.y),
        }
    }
}

/// Seek, integrate, and report the pod's new position with the thrust magnitude
/// it used. Thrust is sampled before `update` clears it.
pub fn seek_command(pod: &mut Pod) -> Result<Command> {
    seek(pod)?;
    let thrust = pod.thrust().magnitude() as i64;
    pod.update();
    Ok(Command::new(pod.position(), Thrust::Power(thrust)))
}

fn parse_error(line: usize, reason: impl Into<String>) -> SimError {
    SimError::Parse {
        line,
        reason: reason.into(),
    }
}

/// Exactly `N` whitespace-separated integers
fn parse_ints<const N: usize>(line: &str, line_no: usize) -> Result<[i64; N]> {
    let mut out = [0i64; N];
    let mut tokens = line.split_whitespace();
    for (i, slot) in out.iter_mut().enumerate() {
        let token = tokens
            .next()
            .ok_or_else(|| parse_error(line_no, format!("expected {N} fields, found {i}")))?;
        *slot = token
            .parse()
            .map_err(|_| parse_error(line_no, format!("not an integer: {token:?}")))?;
    }
    if tokens.next().is_some() {
        return Err(parse_error(line_no, format!("expected {N} fields, found more")));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "3\n4\n1000 0\n8000 1200\n12000 7000\n3000 6000\n";

    #[test]
    fn test_parse_race_header() {
        let header = parse_race_header(HEADER).unwrap();
        assert_eq!(header.laps, 3);
        assert_eq!(header.checkpoints.len(), 4);
        assert_eq!(header.checkpoints[2], Vector2D::new(12000.0, 7000.0));

        let track = header.track();
        assert_eq!(track.len(), 4);
        assert_eq!(track.get(0).unwrap().radius, 600.0);
    }

    #[test]
    fn test_truncated_header() {
        let err = parse_race_header("3\n4\n1000 0\n").unwrap_err();
        assert!(matches!(err, SimError::Parse { line: 4, .. }));
    }

    #[test]
    fn test_huge_checkpoint_count_is_a_parse_error() {
        let err = parse_race_header("3\n999999999999999999\n1 2\n").unwrap_err();
        assert!(matches!(err, SimError::Parse { .. }));
    }

    #[test]
    fn test_bad_field_reports_line() {
        let err = parse_race_header("3\n2\n1000 0\n10 abc\n").unwrap_err();
        match err {
            SimError::Parse { line, reason } => {
                assert_eq!(line, 4);
                assert!(reason.contains("abc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_pod_report_into_pod() {
        let track = Arc::new(parse_race_header(HEADER).unwrap().track());
        let report: PodReport = "500 -20 100 0 90 2".parse().unwrap();
        assert_eq!(report.next_checkpoint, 2);

        let pod = report.into_pod(track.clone()).unwrap();
        assert_eq!(pod.position(), Vector2D::new(500.0, -20.0));
        assert_eq!(pod.velocity(), Vector2D::new(100.0, 0.0));
        assert!((pod.heading() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(pod.checkpoint_index(), 2);

        let stale: PodReport = "0 0 0 0 0 9".parse().unwrap();
        assert!(matches!(
            stale.into_pod(track),
            Err(SimError::CheckpointOutOfRange { index: 9, len: 4 })
        ));
    }

    #[test]
    fn test_parse_turn() {
        let track = Arc::new(parse_race_header(HEADER).unwrap().track());
        let pods = parse_turn("0 0 0 0 0 1\n\n10 10 5 5 45 0\n", 7, &track).unwrap();
        assert_eq!(pods.len(), 2);
        assert_eq!(pods[1].checkpoint_index(), 0);

        let err = parse_turn("0 0 0 0 0\n", 7, &track).unwrap_err();
        assert!(matches!(err, SimError::Parse { line: 7, .. }));
    }

    #[test]
    fn test_seek_command_reports_position_and_thrust() {
        let track = Arc::new(Track::from_positions([Vector2D::new(1000.0, 0.0)], CHECKPOINT_RADIUS));
        let mut pod = PodReport::parse("0 0 0 0 0 0", 1)
            .unwrap()
            .into_pod(track)
            .unwrap();

        let command = seek_command(&mut pod).unwrap();
        assert_eq!(command.to_string(), "170 0 200");
        assert_eq!(pod.thrust(), Vector2D::ZERO);

        // (170 + 200) * 0.85 = 314.5, x = 484.5 which reports as 485
        assert_eq!(seek_command(&mut pod).unwrap().to_string(), "485 0 200");
    }

    #[test]
    fn test_shield_command() {
        let command = Command::shield(Vector2D::new(8000.0, 4500.0));
        assert_eq!(command.to_string(), "8000 4500 SHIELD");
    }
}
