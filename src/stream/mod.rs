//! Line-oriented frame I/O for the CLI frontend.
//!
//! Reads one JSON event per line from stdin and writes one
//! [`CircuitSnapshot`](crate::session::CircuitSnapshot) JSON line per frame to
//! stdout. Camera capture and hand tracking run upstream; this side only
//! sees landmarks.
//!
//! ```text
//! {"type":"frame","landmarks":[[0.51,0.42],[0.50,0.40],...]}
//! {"type":"frame","landmarks":null}
//! {"type":"key","key":"reset"}
//! {"type":"key","key":"escape"}
//! ```

use std::io::{self, BufRead, IsTerminal, Write};
use std::thread;
use std::time::Instant;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{CircuitCvError, Result};
use crate::gesture::{FrameSize, HandLandmarks, PreTracked, TrackedFrame};
use crate::session::{CircuitSnapshot, Key, Session};

/// One line of input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputEvent {
    /// Landmarks for one camera frame; `null` when no hand is visible
    Frame {
        landmarks: Option<Vec<Vec<f32>>>,
        #[serde(default)]
        width: Option<u32>,
        #[serde(default)]
        height: Option<u32>,
    },
    Key { key: Key },
}

impl InputEvent {
    /// Build the tracked frame, falling back to `default_size` for missing dimensions.
    pub fn to_frame(&self, default_size: FrameSize) -> Result<Option<TrackedFrame>> {
        let InputEvent::Frame {
            landmarks,
            width,
            height,
        } = self
        else {
            return Ok(None);
        };
        let size = FrameSize::new(
            width.unwrap_or(default_size.width),
            height.unwrap_or(default_size.height),
        )?;
        let hand = landmarks
            .as_deref()
            .map(HandLandmarks::from_pairs)
            .transpose()?;
        Ok(Some(TrackedFrame { size, hand }))
    }
}

/// Event reader over any buffered input.
pub struct FrameInput<R> {
    reader: R,
    line: String,
    line_no: usize,
}

impl<R: BufRead> FrameInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_no: 0,
        }
    }

    /// Read the next event, skipping blank lines. Returns `None` on EOF.
    pub fn next_event(&mut self) -> Result<Option<InputEvent>> {
        loop {
            self.line.clear();
            let read = self
                .reader
                .read_line(&mut self.line)
                .map_err(|e| CircuitCvError::InputError {
                    message: e.to_string(),
                })?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }
            return serde_json::from_str(text)
                .map(Some)
                .map_err(|e| CircuitCvError::frame_parse(self.line_no, e.to_string()));
        }
    }

    /// Number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

/// Snapshot writer, one JSON object per line.
pub struct SnapshotOutput<W> {
    writer: W,
}

impl<W: Write> SnapshotOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_snapshot(&mut self, snapshot: &CircuitSnapshot<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| CircuitCvError::OutputError {
                message: e.to_string(),
            })
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| CircuitCvError::OutputError {
            message: e.to_string(),
        })
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Drive `session` from `input` until EOF or ESC, writing a snapshot per frame.
///
/// With `paced` set, each frame is padded out to the configured frame
/// interval. Returns the number of frames processed.
pub fn process_stream<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut FrameInput<R>,
    output: &mut SnapshotOutput<W>,
    paced: bool,
) -> Result<u64> {
    let mut source = PreTracked;
    let default_size = session.config().frame_size;
    let interval = session.config().frame_interval();
    let mut frames = 0;

    session.start();
    while session.is_running() {
        let started = Instant::now();
        let Some(event) = input.next_event()? else {
            debug!(line = input.line_no(), "end of input");
            break;
        };

        if let InputEvent::Key { key } = event {
            session.handle_key(key);
            continue;
        }
        let Some(frame) = event.to_frame(default_size)? else {
            continue;
        };

        session.process(&mut source, &frame);
        output.write_snapshot(&session.snapshot())?;
        frames += 1;

        if paced {
            if let Some(rest) = interval.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    session.stop();
    output.flush()?;
    info!(frames, "frame stream ended");
    Ok(frames)
}

/// Run the frame loop on stdin and stdout.
///
/// Fails with [`CircuitCvError::SourceUnavailable`] when stdin is a terminal,
/// since landmarks must be piped in from a tracker.
pub fn process_stdio(session: &mut Session, paced: bool) -> Result<u64> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(CircuitCvError::SourceUnavailable {
            message: "stdin is a terminal, pipe a landmark stream in".to_string(),
        });
    }
    let stdout = io::stdout();
    let mut input = FrameInput::new(stdin.lock());
    let mut output = SnapshotOutput::new(io::BufWriter::new(stdout.lock()));
    process_stream(session, &mut input, &mut output, paced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn pinch_line(x: f32, y: f32, pinching: bool) -> String {
        let spread = if pinching { 0.004 } else { 0.06 };
        let mut points = vec![[x, y]; 21];
        points[4] = [x - spread, y];
        points[8] = [x + spread, y];
        points[5] = points[8];
        serde_json::json!({ "type": "frame", "landmarks": points }).to_string()
    }

    fn run(lines: &[String]) -> (Result<u64>, Session, Vec<String>) {
        let mut session = Session::default();
        let mut input = FrameInput::new(Cursor::new(lines.join("\n")));
        let mut output = SnapshotOutput::new(Vec::new());
        let result = process_stream(&mut session, &mut input, &mut output, false);
        let text = String::from_utf8(output.into_inner()).unwrap();
        (result, session, text.lines().map(str::to_owned).collect())
    }

    #[test]
    fn test_parse_events() {
        let text = "\n{\"type\":\"key\",\"key\":\"reset\"}\n\n{\"type\":\"frame\",\"landmarks\":null,\"width\":640}\n";
        let mut input = FrameInput::new(Cursor::new(text));
        assert_eq!(
            input.next_event().unwrap(),
            Some(InputEvent::Key { key: Key::Reset })
        );
        let frame = input.next_event().unwrap().unwrap();
        let tracked = frame.to_frame(FrameSize::default()).unwrap().unwrap();
        assert_eq!(tracked.size, FrameSize { width: 640, height: 768 });
        assert!(tracked.hand.is_none());
        assert_eq!(input.line_no(), 4);
        assert!(input.next_event().unwrap().is_none());
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let mut input = FrameInput::new(Cursor::new("{\"type\":\"key\",\"key\":\"reset\"}\nnot json\n"));
        input.next_event().unwrap();
        match input.next_event() {
            Err(CircuitCvError::FrameParse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_wrong_landmark_count() {
        let event = InputEvent::Frame {
            landmarks: Some(vec![vec![0.5, 0.5]; 5]),
            width: None,
            height: None,
        };
        assert!(matches!(
            event.to_frame(FrameSize::default()),
            Err(CircuitCvError::InvalidLandmarks { expected: 21, found: 5 })
        ));
    }

    #[test]
    fn test_far_out_landmarks_rejected() {
        let mut points = vec![[0.5f32, 0.5]; 21];
        points[4] = [3.0e9, 0.5];
        points[8] = [-3.0e9, 0.5];
        let lines = vec![
            pinch_line(0.5, 0.5, false),
            serde_json::json!({ "type": "frame", "landmarks": points }).to_string(),
        ];
        let (result, _, out) = run(&lines);
        assert!(matches!(
            result,
            Err(CircuitCvError::LandmarkOutOfRange { index: 4, .. })
        ));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_snapshot_per_frame_until_escape() {
        let lines = vec![
            pinch_line(0.244140625, 0.078125, true),
            pinch_line(0.5, 0.5, true),
            pinch_line(0.5, 0.5, false),
            r#"{"type":"frame","landmarks":null}"#.to_string(),
            r#"{"type":"key","key":"escape"}"#.to_string(),
            pinch_line(0.5, 0.5, true),
        ];
        let (result, session, out) = run(&lines);
        assert_eq!(result.unwrap(), 4);
        assert_eq!(out.len(), 4);
        assert!(!session.is_running());
        assert_eq!(session.circuit().len(), 1);

        let last: serde_json::Value = serde_json::from_str(&out[3]).unwrap();
        assert_eq!(last["components"][0]["type"], "battery");
        assert_eq!(last["pinch"], serde_json::Value::Null);
    }

    #[test]
    fn test_reset_key() {
        let lines = vec![
            pinch_line(0.244140625, 0.078125, true),
            pinch_line(0.5, 0.5, false),
            r#"{"type":"key","key":"reset"}"#.to_string(),
        ];
        let (result, session, out) = run(&lines);
        assert_eq!(result.unwrap(), 2);
        assert_eq!(out.len(), 2);
        assert!(session.circuit().is_empty());
    }
}
