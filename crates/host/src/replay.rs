//! Recorded landmark sessions
//!
//! A recording is JSON lines, one frame per line:
//!
//! ```text
//! {"timestamp": 0.033, "faces": [[[x, y], ... 68 points], ...]}
//! ```
//!
//! The session splits into a frame source and a landmark provider so it can
//! stand in for a camera plus face-landmark model.

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use camera_capture::{CameraError, FrameSource, MonotonicClock, VideoFrame};
use dms::{DmsError, GeometryError, LandmarkProvider, LandmarkSet, Point2D};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Recording errors, with 1-based line numbers
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read recording: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}, face {face}: {source}")]
    Landmarks {
        line: usize,
        face: usize,
        #[source]
        source: GeometryError,
    },

    #[error("line {line}: timestamp {value} is negative or earlier than the previous frame")]
    Timestamp { line: usize, value: f64 },
}

#[derive(Debug, Deserialize)]
struct RecordedFrame {
    timestamp: f64,
    #[serde(default)]
    faces: Vec<Vec<(f64, f64)>>,
}

#[derive(Debug)]
struct ReplayFrame {
    timestamp_ns: u64,
    faces: Vec<LandmarkSet>,
}

/// A parsed recording
#[derive(Debug, Clone)]
pub struct ReplaySession {
    frames: Arc<[ReplayFrame]>,
}

impl ReplaySession {
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let file = std::fs::File::open(path)?;
        let session = Self::parse(std::io::BufReader::new(file))?;
        info!("Loaded {} recorded frames from {}", session.len(), path.display());
        Ok(session)
    }

    /// Parse JSON lines; blank lines are ignored
    pub fn parse(reader: impl BufRead) -> Result<Self, ReplayError> {
        let mut frames = Vec::new();
        let mut previous = 0.0;

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let recorded: RecordedFrame = serde_json::from_str(&line)
                .map_err(|source| ReplayError::Parse { line: line_no, source })?;

            if !recorded.timestamp.is_finite() || recorded.timestamp < previous {
                return Err(ReplayError::Timestamp { line: line_no, value: recorded.timestamp });
            }
            previous = recorded.timestamp;

            let faces = recorded
                .faces
                .into_iter()
                .enumerate()
                .map(|(face, points)| {
                    LandmarkSet::new(points.into_iter().map(Point2D::from).collect())
                        .map_err(|source| ReplayError::Landmarks { line: line_no, face, source })
                })
                .collect::<Result<Vec<_>, _>>()?;

            frames.push(ReplayFrame {
                timestamp_ns: (recorded.timestamp * 1_000_000_000.0).round() as u64,
                faces,
            });
        }

        Ok(Self { frames: frames.into() })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Split into a frame source and the matching landmark provider.
    ///
    /// With `realtime`, the source sleeps so frames arrive at their recorded pace.
    pub fn split(&self, realtime: bool) -> (ReplayFrames, ReplayLandmarks) {
        (
            ReplayFrames {
                frames: Arc::clone(&self.frames),
                next: 0,
                realtime,
                clock: None,
            },
            ReplayLandmarks {
                frames: Arc::clone(&self.frames),
            },
        )
    }
}

/// Frame source half of a replay
pub struct ReplayFrames {
    frames: Arc<[ReplayFrame]>,
    next: usize,
    realtime: bool,
    clock: Option<MonotonicClock>,
}

impl FrameSource for ReplayFrames {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, CameraError> {
        let Some(recorded) = self.frames.get(self.next) else {
            return Ok(None);
        };
        let sequence = u32::try_from(self.next)
            .map_err(|_| CameraError::Stream("recording exceeds frame sequence range".into()))?;
        self.next += 1;

        if self.realtime {
            let elapsed_ns = self.clock.get_or_insert_with(MonotonicClock::new).now_ns();
            if recorded.timestamp_ns > elapsed_ns {
                std::thread::sleep(Duration::from_nanos(recorded.timestamp_ns - elapsed_ns));
            }
        }

        Ok(Some(VideoFrame::blank(0, 0, recorded.timestamp_ns, sequence)))
    }
}

/// Landmark provider half of a replay, keyed by frame sequence
pub struct ReplayLandmarks {
    frames: Arc<[ReplayFrame]>,
}

impl LandmarkProvider for ReplayLandmarks {
    fn detect(&mut self, frame: &VideoFrame) -> Result<Vec<LandmarkSet>, DmsError> {
        self.frames
            .get(frame.sequence as usize)
            .map(|recorded| recorded.faces.clone())
            .ok_or_else(|| DmsError::Landmarks(format!("no recorded landmarks for frame {}", frame.sequence)))
    }
}
