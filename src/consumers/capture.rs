//! Consumer that records packets as JSON Lines.
//!
//! Each line is one packet:
//!
//! ```text
//! {"kind":"LapData","session_time":6.5,"frame_identifier":7,"packet":{"header":{...},"lap_data":[...]}}
//! ```
//!
//! The `packet` object is the packet's generic value tree, so field names match
//! the wire layout and records keep their field order. A name that is not valid
//! UTF-8 is written as `{"invalid_utf8":[...]}` with its raw bytes.
//!
//! By default every packet is written. [`CaptureConsumer::session_only`]
//! records whole sessions instead:
//!
//! - nothing is written until a session start event (`SSTA`);
//! - a second `SSTA` before the session finished discards what was captured
//!   for it and starts over;
//! - the final classification completes the session and flushes the file;
//! - button events (`BUTN`) are never written;
//! - a session still open at shutdown is discarded.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::consumer::Consumer;
use crate::protocol::{EventCode, Packet, PacketId};
use crate::wire::Value;
use crate::{Result, TelemetryError};

/// Destination for capture lines.
///
/// Session capture needs to drop an unfinished session, so the output must be
/// able to cut itself back to an earlier length.
pub trait CaptureOutput: Write + Send {
    /// Discard everything after the first `len` bytes and continue writing there.
    fn truncate_to(&mut self, len: u64) -> std::io::Result<()>;
}

impl CaptureOutput for BufWriter<File> {
    fn truncate_to(&mut self, len: u64) -> std::io::Result<()> {
        self.flush()?;
        self.get_ref().set_len(len)?;
        self.seek(SeekFrom::Start(len))?;
        Ok(())
    }
}

impl CaptureOutput for Vec<u8> {
    fn truncate_to(&mut self, len: u64) -> std::io::Result<()> {
        self.truncate(usize::try_from(len).unwrap_or(usize::MAX));
        Ok(())
    }
}

#[derive(Serialize)]
struct CaptureLine<'a> {
    kind: &'static str,
    session_time: f32,
    frame_identifier: u32,
    packet: &'a Value,
}

/// Progress of a session-only capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    /// No session running; packets are skipped.
    Waiting,
    /// Recording a session whose first line starts at byte `start`.
    Recording { start: u64, lines: u64 },
}

pub struct CaptureConsumer {
    output: Box<dyn CaptureOutput>,
    path: PathBuf,
    /// Bytes currently in the output
    offset: u64,
    written: u64,
    skipped: u64,
    sessions: Option<SessionState>,
}

impl CaptureConsumer {
    /// Create (or truncate) the capture file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| TelemetryError::capture_error(path.clone(), e))?;
        info!("Capturing packets to {}", path.display());
        Ok(Self::from_output(BufWriter::new(file), path))
    }

    /// Capture into any [`CaptureOutput`]. `label` is only used in messages.
    pub fn from_output(output: impl CaptureOutput + 'static, label: impl Into<PathBuf>) -> Self {
        Self {
            output: Box::new(output),
            path: label.into(),
            offset: 0,
            written: 0,
            skipped: 0,
            sessions: None,
        }
    }

    /// Record complete sessions only, from session start to final classification.
    pub fn session_only(mut self) -> Self {
        self.sessions = Some(SessionState::Waiting);
        self
    }

    /// Lines currently in the output.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Packets not written because no session was running.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Whether a session-only capture is inside a session.
    pub fn is_recording(&self) -> bool {
        matches!(self.sessions, Some(SessionState::Recording { .. }))
    }

    fn write_line(&mut self, packet: &Packet) -> Result<()> {
        let value = packet.to_value();
        if value.has_invalid_text() {
            warn!(
                "{} packet at frame {} has text that is not valid UTF-8, capturing raw bytes",
                packet.id(),
                packet.header().frame_identifier
            );
        }
        let header = packet.header();
        let line = CaptureLine {
            kind: packet.id().name(),
            session_time: header.session_time,
            frame_identifier: header.frame_identifier,
            packet: &value,
        };
        let mut bytes = serde_json::to_vec(&line).map_err(|source| {
            TelemetryError::Serialization { context: format!("{} packet", packet.id()), source }
        })?;
        bytes.push(b'\n');
        self.output
            .write_all(&bytes)
            .map_err(|e| TelemetryError::capture_error(self.path.clone(), e))?;
        self.offset += bytes.len() as u64;
        self.written += 1;
        Ok(())
    }

    /// Drop the current session's lines.
    fn discard_session(&mut self, start: u64, lines: u64) -> Result<()> {
        self.output
            .truncate_to(start)
            .map_err(|e| TelemetryError::capture_error(self.path.clone(), e))?;
        self.offset = start;
        self.written -= lines;
        Ok(())
    }

    fn consume_in_session(&mut self, state: SessionState, packet: Packet) -> Result<()> {
        let code = match &packet {
            Packet::Event(event) => Some(event.code()),
            _ => None,
        };
        if code == Some(EventCode::Buttons) {
            return Ok(());
        }

        let lines = match (state, code) {
            (SessionState::Waiting, Some(EventCode::SessionStarted)) => {
                info!("Session start detected, capturing to {}", self.path.display());
                0
            }
            (SessionState::Waiting, _) => {
                self.skipped += 1;
                return Ok(());
            }
            (SessionState::Recording { start, lines }, Some(EventCode::SessionStarted)) => {
                info!("Duplicate session start detected: restarting capture");
                self.discard_session(start, lines)?;
                0
            }
            (SessionState::Recording { lines, .. }, _) => lines,
        };
        let start = match state {
            SessionState::Recording { start, .. } => start,
            SessionState::Waiting => self.offset,
        };

        self.write_line(&packet)?;
        self.sessions = Some(SessionState::Recording { start, lines: lines + 1 });

        if packet.id() == PacketId::FinalClassification {
            self.output.flush().map_err(|e| TelemetryError::capture_error(self.path.clone(), e))?;
            info!("Final classification received, session of {} packets captured", lines + 1);
            self.sessions = Some(SessionState::Waiting);
        }
        Ok(())
    }
}

impl std::fmt::Debug for CaptureConsumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureConsumer")
            .field("path", &self.path)
            .field("written", &self.written)
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}

impl Consumer for CaptureConsumer {
    fn consume(&mut self, packet: Packet) -> Result<()> {
        match self.sessions {
            None => self.write_line(&packet),
            Some(state) => self.consume_in_session(state, packet),
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        if let Some(SessionState::Recording { start, lines }) = self.sessions {
            info!("Session incomplete at shutdown, discarding {} captured packets", lines);
            self.discard_session(start, lines)?;
            self.sessions = Some(SessionState::Waiting);
        }
        self.output.flush().map_err(|e| TelemetryError::capture_error(self.path.clone(), e))?;
        debug!("Capture flushed {} packets to {}", self.written, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        PacketWriter, car_status_fixture, event_fixture, final_classification_fixture,
        lap_data_fixture, participants_fixture,
    };
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("buffer lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CaptureOutput for SharedBuffer {
        fn truncate_to(&mut self, len: u64) -> std::io::Result<()> {
            self.0.lock().expect("buffer lock").truncate_to(len)
        }
    }

    impl SharedBuffer {
        fn lines(&self) -> Vec<serde_json::Value> {
            let bytes = self.0.lock().expect("buffer lock").clone();
            String::from_utf8(bytes)
                .expect("capture is UTF-8")
                .lines()
                .map(|line| serde_json::from_str(line).expect("one JSON object per line"))
                .collect()
        }
    }

    fn event(code: EventCode, frame: u32) -> Vec<u8> {
        let mut data = event_fixture(code, &[]);
        data[18..22].copy_from_slice(&frame.to_le_bytes());
        data
    }

    fn kinds(lines: &[serde_json::Value]) -> Vec<String> {
        lines
            .iter()
            .map(|line| match line["packet"]["event"]["code"].as_str() {
                Some(code) => code.to_string(),
                None => line["kind"].as_str().unwrap_or_default().to_string(),
            })
            .collect()
    }

    #[test]
    fn writes_one_object_per_packet() -> Result<()> {
        let buffer = SharedBuffer::default();
        let mut consumer = CaptureConsumer::from_output(buffer.clone(), "memory");
        for data in [
            participants_fixture("Pérez"),
            lap_data_fixture(),
            event_fixture(EventCode::FastestLap, &[3, 0, 0, 0xC0, 0x3F]),
        ] {
            consumer.consume(Packet::decode(&data)?)?;
        }
        consumer.cleanup()?;
        assert_eq!(consumer.written(), 3);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["kind"], "Participants");
        assert_eq!(lines[0]["packet"]["participants"][0]["name"], "Pérez");
        assert_eq!(lines[1]["frame_identifier"], 7);
        assert_eq!(lines[1]["packet"]["lap_data"].as_array().map(Vec::len), Some(22));
        assert_eq!(lines[2]["packet"]["event"]["code"], "FTLP");
        assert_eq!(lines[2]["packet"]["event"]["vehicle_idx"], 3);
        assert_eq!(lines[2]["packet"]["event"]["lap_time"], 1.5);
        Ok(())
    }

    #[test]
    fn invalid_names_are_captured_as_raw_bytes() -> Result<()> {
        let mut data = participants_fixture("Driver");
        // first participant's name starts after header, car count and 7 id bytes
        let name = PacketWriter::with_header(PacketId::Participants).len() + 1 + 7;
        data[name + 1] = 0xC3;
        data[name + 2] = 0x28;

        let buffer = SharedBuffer::default();
        let mut consumer = CaptureConsumer::from_output(buffer.clone(), "memory");
        consumer.consume(Packet::decode(&data)?)?;
        consumer.cleanup()?;

        let lines = buffer.lines();
        let first = &lines[0]["packet"]["participants"][0]["name"];
        assert_eq!(first["invalid_utf8"], serde_json::json!([b'D', 0xC3, 0x28, b'v', b'e', b'r']));
        assert_eq!(lines[0]["packet"]["participants"][1]["name"], "Driver");
        let text = String::from_utf8(buffer.0.lock().expect("buffer lock").clone()).expect("UTF-8");
        assert!(!text.contains('\u{FFFD}'));
        Ok(())
    }

    #[test]
    fn session_capture_starts_at_session_start_and_restarts_on_a_duplicate() -> Result<()> {
        let buffer = SharedBuffer::default();
        let mut consumer = CaptureConsumer::from_output(buffer.clone(), "memory").session_only();

        let replay = [
            lap_data_fixture(),
            event(EventCode::ChequeredFlag, 1),
            event(EventCode::SessionStarted, 2),
            car_status_fixture(),
            event(EventCode::Buttons, 3),
            event(EventCode::SessionStarted, 4),
            lap_data_fixture(),
            event(EventCode::Buttons, 5),
            final_classification_fixture(),
            car_status_fixture(),
        ];
        for data in &replay {
            consumer.consume(Packet::decode(data)?)?;
        }
        consumer.cleanup()?;

        let lines = buffer.lines();
        assert_eq!(kinds(&lines), ["SSTA", "LapData", "FinalClassification"]);
        assert_eq!(lines[0]["frame_identifier"], 4);
        assert_eq!(consumer.written(), 3);
        // two before the first start, one after the classification
        assert_eq!(consumer.skipped(), 3);
        assert!(!consumer.is_recording());
        Ok(())
    }

    #[test]
    fn unfinished_session_is_discarded_at_shutdown() -> Result<()> {
        let buffer = SharedBuffer::default();
        let mut consumer = CaptureConsumer::from_output(buffer.clone(), "memory").session_only();

        for data in [
            event(EventCode::SessionStarted, 1),
            final_classification_fixture(),
            event(EventCode::SessionStarted, 2),
            lap_data_fixture(),
        ] {
            consumer.consume(Packet::decode(&data)?)?;
        }
        assert!(consumer.is_recording());
        consumer.cleanup()?;

        assert_eq!(kinds(&buffer.lines()), ["SSTA", "FinalClassification"]);
        assert_eq!(consumer.written(), 2);
        Ok(())
    }

    #[test]
    fn file_capture_truncates_a_restarted_session() -> Result<()> {
        let path = std::env::temp_dir()
            .join(format!("pitlane-session-restart-{}.jsonl", std::process::id()));
        let mut consumer = CaptureConsumer::create(&path)?.session_only();
        for data in [
            event(EventCode::SessionStarted, 1),
            lap_data_fixture(),
            car_status_fixture(),
            event(EventCode::SessionStarted, 2),
            final_classification_fixture(),
        ] {
            consumer.consume(Packet::decode(&data)?)?;
        }
        consumer.cleanup()?;

        let text = std::fs::read_to_string(&path)?;
        std::fs::remove_file(&path)?;
        let lines: Vec<serde_json::Value> =
            text.lines().map(|line| serde_json::from_str(line).expect("one JSON object per line")).collect();
        assert_eq!(kinds(&lines), ["SSTA", "FinalClassification"]);
        assert_eq!(lines[0]["frame_identifier"], 2);
        Ok(())
    }

    #[test]
    fn missing_directory_is_a_capture_error() {
        let path = std::env::temp_dir().join("pitlane-missing-dir").join("nested").join("out.jsonl");
        let error = CaptureConsumer::create(&path).expect_err("parent directory does not exist");
        assert!(matches!(error, TelemetryError::Capture { .. }));
    }
}
