//! Built-in consumers.
//!
//! | Kind | Consumer | Behaviour |
//! |---|---|---|
//! | `null` | [`NullConsumer`] | Receives packets and drops them |
//! | `debug` | [`DebugConsumer`] | Logs the kind of every packet |
//! | `log` | [`LogConsumer`] | Narrates the session: conditions, events, penalties |
//! | `capture` | [`CaptureConsumer`] | Writes packets to a JSON Lines file, from session start to final classification unless `capture_all_packets` is set |
//!
//! [`StreamConsumer`] is not selectable from the command line; it is the
//! bridge for library users who want packets as an async stream.

mod capture;
mod debug;
mod log;
mod null;
mod stream;

pub use capture::CaptureConsumer;
pub use debug::DebugConsumer;
pub use log::{LogConsumer, lap_time, penalty_sentence, session_timestamp, time_of_day};
pub use null::NullConsumer;
pub use stream::{PacketStream, StreamConsumer};

use crate::config::{AppConfig, ConsumerKind};
use crate::consumer::Consumer;
use crate::{Result, TelemetryError};

/// Build the consumer selected by `config.consumer`.
///
/// `capture_path` is required for [`ConsumerKind::Capture`] and ignored otherwise.
pub fn build(config: &AppConfig) -> Result<Box<dyn Consumer>> {
    Ok(match config.consumer {
        ConsumerKind::Null => Box::new(NullConsumer),
        ConsumerKind::Debug => Box::new(DebugConsumer::new()),
        ConsumerKind::Log => Box::new(LogConsumer::new()),
        ConsumerKind::Capture => {
            let path = config
                .capture_path
                .as_deref()
                .ok_or_else(|| TelemetryError::config_error("capture consumer needs an output path"))?;
            let capture = CaptureConsumer::create(path)?;
            if config.capture_all_packets {
                Box::new(capture)
            } else {
                Box::new(capture.session_only())
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_without_path_is_a_config_error() {
        let config = AppConfig { consumer: ConsumerKind::Capture, ..AppConfig::default() };
        let Err(error) = build(&config) else {
            panic!("capture without a path should fail");
        };
        assert!(matches!(error, TelemetryError::Config { .. }));
    }

    #[test]
    fn other_kinds_need_no_path() {
        for kind in [ConsumerKind::Null, ConsumerKind::Debug, ConsumerKind::Log] {
            let config = AppConfig { consumer: kind, ..AppConfig::default() };
            assert!(build(&config).is_ok(), "{kind:?}");
        }
    }
}
