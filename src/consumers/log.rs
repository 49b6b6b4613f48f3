//! Consumer that narrates a session through the log.
//!
//! The first session packet prints a short summary (track, session type, time
//! of day, weather, temperatures). Events are written as sentences prefixed with
//! the session clock, for example:
//!
//! ```text
//! [0:12:03.250] Lewis Hamilton has set the fastest lap time of 01:31.447.
//! [0:12:40.018] Sergio Perez has been assessed a 5s time penalty for corner cutting.
//! ```
//!
//! Driver names come from the first participants packet of the session. Session
//! start and session end both forget the cached participants and summary so the
//! next session is described from scratch.

use tracing::info;

use crate::consumer::Consumer;
use crate::protocol::constants::NULL_BYTE_VALUE;
use crate::protocol::event::Penalty;
use crate::protocol::ids::{PenaltyKind, vehicle_index};
use crate::protocol::{EventDetails, EventPacket, ParticipantsPacket, SessionPacket};
use crate::{DecodeError, Result};

/// Session clock as `h:mm:ss.mmm`.
pub fn session_timestamp(seconds: f32) -> String {
    let millis = (f64::from(seconds).max(0.0) * 1000.0).round() as u64;
    format!(
        "{}:{:02}:{:02}.{:03}",
        millis / 3_600_000,
        millis / 60_000 % 60,
        millis / 1000 % 60,
        millis % 1000
    )
}

/// Lap time as `mm:ss.mmm`.
pub fn lap_time(seconds: f32) -> String {
    let millis = (f64::from(seconds).max(0.0) * 1000.0).round() as u64;
    format!("{:02}:{:02}.{:03}", millis / 60_000, millis / 1000 % 60, millis % 1000)
}

/// Minutes since midnight as `h:mm:ss`.
pub fn time_of_day(minutes: u32) -> String {
    format!("{}:{:02}:00", minutes / 60, minutes % 60)
}

/// Sentence describing a penalty, or `None` for penalties not worth narrating
/// (reminders, timers and retirements).
pub fn penalty_sentence(
    kind: PenaltyKind,
    infringement: &str,
    offender: &str,
    other_driver: Option<&str>,
    time: Option<u8>,
) -> Option<String> {
    let with = other_driver.map(|name| format!(" with {name}")).unwrap_or_default();
    let penalty = kind.text();
    let sentence = match kind {
        PenaltyKind::PenaltyReminder
        | PenaltyKind::ParkedTooLongTimer
        | PenaltyKind::Retired
        | PenaltyKind::BlackFlagTimer => return None,
        PenaltyKind::DriveThrough
        | PenaltyKind::StopGo
        | PenaltyKind::GridPenalty
        | PenaltyKind::TyreRegulations => {
            format!("{offender} has been assessed a {penalty} for {infringement}.")
        }
        kind if kind.invalidates_lap() => format!("{offender} has {penalty} for {infringement}."),
        PenaltyKind::RemovedFromFormationLap => {
            format!("{offender} has been {penalty} for {infringement}.")
        }
        PenaltyKind::TimePenalty => match time {
            Some(seconds) => format!(
                "{offender} has been assessed a {seconds}s {penalty} for {infringement}{with}."
            ),
            None => format!("{offender} has been assessed a {penalty} for {infringement}{with}."),
        },
        PenaltyKind::Warning => {
            format!("{offender} has been issued a warning for {infringement}{with}.")
        }
        PenaltyKind::Disqualified => {
            format!("{offender} has been disqualified for {infringement}{with}.")
        }
        _ => format!("{offender} has received a {penalty} for {infringement}{with}."),
    };
    Some(sentence)
}

#[derive(Debug, Default)]
pub struct LogConsumer {
    session_displayed: bool,
    drivers: Option<Vec<String>>,
}

impl LogConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a participants packet has been cached for this session.
    pub fn knows_participants(&self) -> bool {
        self.drivers.is_some()
    }

    /// Whether the summary for this session has already been logged.
    pub fn session_displayed(&self) -> bool {
        self.session_displayed
    }

    /// Summary lines logged for the first session packet.
    pub fn session_summary(packet: &SessionPacket) -> std::result::Result<Vec<String>, DecodeError> {
        Ok(vec![
            packet.track_name()?.to_string(),
            packet.session_kind()?.to_string(),
            time_of_day(packet.time_of_day),
            packet.weather_kind()?.to_string(),
            format!("Air: {}°", packet.air_temperature),
            format!("Track: {}°", packet.track_temperature),
        ])
    }

    fn driver_name(&self, raw: u8) -> std::result::Result<String, DecodeError> {
        let index = vehicle_index(raw)?;
        Ok(self
            .drivers
            .as_ref()
            .and_then(|drivers| drivers.get(index).cloned())
            .unwrap_or_else(|| format!("Car {index}")))
    }

    fn describe_penalty(&self, penalty: &Penalty) -> std::result::Result<Option<String>, DecodeError> {
        let kind = penalty.kind()?;
        let infringement = penalty.infringement_text()?;
        let offender = self.driver_name(penalty.vehicle_idx)?;
        let other = match penalty.other_vehicle_idx {
            NULL_BYTE_VALUE => None,
            raw => Some(self.driver_name(raw)?),
        };
        let time = Some(penalty.time).filter(|time| *time != NULL_BYTE_VALUE);
        Ok(penalty_sentence(kind, infringement, &offender, other.as_deref(), time))
    }

    /// Sentence for an event, without the timestamp. `None` for events that are
    /// not narrated (speed traps and button presses).
    pub fn describe_event(
        &self,
        packet: &EventPacket,
    ) -> std::result::Result<Option<String>, DecodeError> {
        let sentence = match &packet.event {
            EventDetails::SessionStarted => "Session started.".to_string(),
            EventDetails::SessionEnded => "Session ended.".to_string(),
            EventDetails::FastestLap(data) => format!(
                "{} has set the fastest lap time of {}.",
                self.driver_name(data.vehicle_idx)?,
                lap_time(data.lap_time)
            ),
            EventDetails::Retirement(data) => {
                format!("{} has retired from the session.", self.driver_name(data.vehicle_idx)?)
            }
            EventDetails::DrsEnabled => "DRS has been enabled.".to_string(),
            EventDetails::DrsDisabled => "DRS has been disabled.".to_string(),
            EventDetails::TeamMateInPits(_) => "Your teammate is in the pits.".to_string(),
            EventDetails::ChequeredFlag => "The chequered flag has been waved.".to_string(),
            EventDetails::RaceWinner(data) => {
                format!("{} has been declared the winner.", self.driver_name(data.vehicle_idx)?)
            }
            EventDetails::Penalty(data) => return self.describe_penalty(data),
            EventDetails::StartLights(data) => "*".repeat(usize::from(data.num_lights)),
            EventDetails::LightsOut => "It's lights out and away we go!".to_string(),
            EventDetails::DriveThroughServed(data) => format!(
                "{} has served a drive through penalty.",
                self.driver_name(data.vehicle_idx)?
            ),
            EventDetails::StopGoServed(data) => format!(
                "{} has served a stop-and-go penalty.",
                self.driver_name(data.vehicle_idx)?
            ),
            EventDetails::Flashback(_) => "Flashback initiated.".to_string(),
            EventDetails::SpeedTrap(_) | EventDetails::Buttons(_) => return Ok(None),
        };
        Ok(Some(sentence))
    }

    fn reset(&mut self) {
        self.drivers = None;
        self.session_displayed = false;
    }
}

impl Consumer for LogConsumer {
    fn on_session(&mut self, packet: &SessionPacket) -> Result<()> {
        if self.session_displayed {
            return Ok(());
        }
        self.session_displayed = true;
        for line in Self::session_summary(packet)? {
            info!("\t{}", line);
        }
        Ok(())
    }

    fn on_event(&mut self, packet: &EventPacket) -> Result<()> {
        if let Some(sentence) = self.describe_event(packet)? {
            info!("[{}] {}", session_timestamp(packet.header.session_time), sentence);
        }
        if matches!(packet.event, EventDetails::SessionStarted | EventDetails::SessionEnded) {
            self.reset();
        }
        Ok(())
    }

    fn on_participants(&mut self, packet: &ParticipantsPacket) -> Result<()> {
        if self.drivers.is_none() {
            self.drivers = Some(packet.participants.iter().map(|p| p.display_name()).collect());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::event::{FastestLap, Retirement, StartLights};
    use crate::protocol::{EventCode, Packet};
    use crate::test_utils::*;
    use crate::wire::Decode;

    fn event(details: EventDetails) -> std::result::Result<EventPacket, DecodeError> {
        let mut packet = EventPacket::decode_bytes(&event_fixture(EventCode::SessionStarted, &[]))?;
        packet.event = details;
        Ok(packet)
    }

    fn penalty(bytes: [u8; 7]) -> std::result::Result<EventPacket, DecodeError> {
        EventPacket::decode_bytes(&event_fixture(EventCode::Penalty, &bytes))
    }

    #[test]
    fn clock_formats() {
        assert_eq!(session_timestamp(0.0), "0:00:00.000");
        assert_eq!(session_timestamp(6.5), "0:00:06.500");
        assert_eq!(session_timestamp(3723.25), "1:02:03.250");
        assert_eq!(lap_time(91.447), "01:31.447");
        assert_eq!(time_of_day(900), "15:00:00");
        assert_eq!(time_of_day(61), "1:01:00");
    }

    #[test]
    fn session_summary_lists_conditions() -> std::result::Result<(), DecodeError> {
        let packet = SessionPacket::decode_bytes(&session_fixture())?;
        let summary = LogConsumer::session_summary(&packet)?;
        assert_eq!(
            summary,
            vec![
                "Silverstone Circuit",
                "Qualifying 2",
                "0:39:00",
                "Light Cloud",
                "Air: 3°",
                "Track: 2°"
            ]
        );
        Ok(())
    }

    #[test]
    fn names_come_from_cached_participants() -> Result<()> {
        let mut consumer = LogConsumer::new();
        let fastest = event(EventDetails::FastestLap(FastestLap { vehicle_idx: 0, lap_time: 91.447 }))?;
        assert_eq!(
            consumer.describe_event(&fastest)?.as_deref(),
            Some("Car 0 has set the fastest lap time of 01:31.447.")
        );

        // driver id 2 is a known driver, so the table name wins over the wire name
        consumer.consume(Packet::decode(&participants_fixture("Pérez"))?)?;
        assert!(consumer.knows_participants());
        assert_eq!(
            consumer.describe_event(&fastest)?.as_deref(),
            Some("Daniel Ricciardo has set the fastest lap time of 01:31.447.")
        );
        Ok(())
    }

    #[test]
    fn bare_events_read_as_sentences() -> std::result::Result<(), DecodeError> {
        let consumer = LogConsumer::new();
        let lights = event(EventDetails::StartLights(StartLights { num_lights: 3 }))?;
        assert_eq!(consumer.describe_event(&lights)?.as_deref(), Some("***"));
        let out = event(EventDetails::LightsOut)?;
        assert_eq!(consumer.describe_event(&out)?.as_deref(), Some("It's lights out and away we go!"));
        let retired = event(EventDetails::Retirement(Retirement { vehicle_idx: 22 }))?;
        assert_eq!(
            consumer.describe_event(&retired),
            Err(DecodeError::OutOfRange { field: "vehicle_idx", value: 22 })
        );
        let buttons = EventPacket::decode_bytes(&event_fixture(EventCode::Buttons, &[1, 0, 0, 0]))?;
        assert_eq!(consumer.describe_event(&buttons)?, None);
        Ok(())
    }

    #[test]
    fn penalties_read_as_sentences() -> std::result::Result<(), DecodeError> {
        let consumer = LogConsumer::new();
        // time penalty, corner cutting, car 1, no other car, 5 seconds
        let time = penalty([4, 25, 1, 255, 5, 3, 0])?;
        assert_eq!(
            consumer.describe_event(&time)?.as_deref(),
            Some("Car 1 has been assessed a 5s time penalty for corner cutting.")
        );
        // warning with another car involved
        let warning = penalty([5, 4, 1, 2, 255, 3, 0])?;
        assert_eq!(
            consumer.describe_event(&warning)?.as_deref(),
            Some("Car 1 has been issued a warning for a minor collision with Car 2.")
        );
        let invalidated = penalty([10, 25, 7, 255, 255, 3, 0])?;
        assert_eq!(
            consumer.describe_event(&invalidated)?.as_deref(),
            Some("Car 7 has this lap invalidated for corner cutting.")
        );
        let drive_through = penalty([0, 17, 7, 255, 255, 3, 0])?;
        assert_eq!(
            consumer.describe_event(&drive_through)?.as_deref(),
            Some("Car 7 has been assessed a drive through for pit lane speeding.")
        );
        for ignored in [3, 8, 16, 17] {
            assert_eq!(consumer.describe_event(&penalty([ignored, 0, 1, 255, 255, 3, 0])?)?, None);
        }
        assert!(consumer.describe_event(&penalty([18, 0, 1, 255, 255, 3, 0])?).is_err());
        Ok(())
    }

    #[test]
    fn session_boundaries_reset_cached_state() -> Result<()> {
        for boundary in [EventCode::SessionStarted, EventCode::SessionEnded] {
            let mut consumer = LogConsumer::new();
            consumer.consume(Packet::decode(&participants_fixture("Driver"))?)?;
            consumer.consume(Packet::decode(&session_fixture())?)?;
            assert!(consumer.knows_participants());
            assert!(consumer.session_displayed());

            consumer.consume(Packet::decode(&event_fixture(boundary, &[]))?)?;
            assert!(!consumer.knows_participants(), "{boundary}");
            assert!(!consumer.session_displayed(), "{boundary}");
        }
        Ok(())
    }
}
