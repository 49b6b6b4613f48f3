//! Event packet (id 3) and its code-selected payloads.
//!
//! After the header an event packet carries a four byte ASCII code followed by
//! a fixed 12 byte region. The code selects which payload, if any, occupies
//! the start of that region; the remainder is zero padding. The whole region
//! must be present even for codes without a payload.

use std::fmt;

use super::PacketHeader;
use super::constants::{EVENT_CODE_LENGTH, EVENT_DATA_LENGTH, EVENT_PACKET_LENGTH};
use super::ids::{PenaltyKind, vehicle_index};
use crate::DecodeError;
use crate::names;
use crate::wire::{Cursor, Decode, Layout, Value, wire_record};

/// The 17 event codes the game sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCode {
    SessionStarted,
    SessionEnded,
    FastestLap,
    Retirement,
    DrsEnabled,
    DrsDisabled,
    TeamMateInPits,
    ChequeredFlag,
    RaceWinner,
    Penalty,
    SpeedTrap,
    StartLights,
    LightsOut,
    DriveThroughServed,
    StopGoServed,
    Flashback,
    Buttons,
}

impl EventCode {
    pub const ALL: [EventCode; 17] = [
        EventCode::SessionStarted,
        EventCode::SessionEnded,
        EventCode::FastestLap,
        EventCode::Retirement,
        EventCode::DrsEnabled,
        EventCode::DrsDisabled,
        EventCode::TeamMateInPits,
        EventCode::ChequeredFlag,
        EventCode::RaceWinner,
        EventCode::Penalty,
        EventCode::SpeedTrap,
        EventCode::StartLights,
        EventCode::LightsOut,
        EventCode::DriveThroughServed,
        EventCode::StopGoServed,
        EventCode::Flashback,
        EventCode::Buttons,
    ];

    pub const fn as_bytes(&self) -> &'static [u8; EVENT_CODE_LENGTH] {
        match self {
            EventCode::SessionStarted => b"SSTA",
            EventCode::SessionEnded => b"SEND",
            EventCode::FastestLap => b"FTLP",
            EventCode::Retirement => b"RTMT",
            EventCode::DrsEnabled => b"DRSE",
            EventCode::DrsDisabled => b"DRSD",
            EventCode::TeamMateInPits => b"TMPT",
            EventCode::ChequeredFlag => b"CHQF",
            EventCode::RaceWinner => b"RCWN",
            EventCode::Penalty => b"PENA",
            EventCode::SpeedTrap => b"SPTP",
            EventCode::StartLights => b"STLG",
            EventCode::LightsOut => b"LGOT",
            EventCode::DriveThroughServed => b"DTSV",
            EventCode::StopGoServed => b"SGSV",
            EventCode::Flashback => b"FLBK",
            EventCode::Buttons => b"BUTN",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCode::SessionStarted => "SSTA",
            EventCode::SessionEnded => "SEND",
            EventCode::FastestLap => "FTLP",
            EventCode::Retirement => "RTMT",
            EventCode::DrsEnabled => "DRSE",
            EventCode::DrsDisabled => "DRSD",
            EventCode::TeamMateInPits => "TMPT",
            EventCode::ChequeredFlag => "CHQF",
            EventCode::RaceWinner => "RCWN",
            EventCode::Penalty => "PENA",
            EventCode::SpeedTrap => "SPTP",
            EventCode::StartLights => "STLG",
            EventCode::LightsOut => "LGOT",
            EventCode::DriveThroughServed => "DTSV",
            EventCode::StopGoServed => "SGSV",
            EventCode::Flashback => "FLBK",
            EventCode::Buttons => "BUTN",
        }
    }

    pub fn from_bytes(code: [u8; EVENT_CODE_LENGTH]) -> Option<Self> {
        EventCode::ALL.into_iter().find(|candidate| *candidate.as_bytes() == code)
    }

    /// Shape of the payload this code carries, `None` for bare codes.
    pub fn payload_layout(&self) -> Option<Layout> {
        match self {
            EventCode::SessionStarted
            | EventCode::SessionEnded
            | EventCode::DrsEnabled
            | EventCode::DrsDisabled
            | EventCode::ChequeredFlag
            | EventCode::LightsOut => None,
            EventCode::FastestLap => Some(FastestLap::layout()),
            EventCode::Retirement => Some(Retirement::layout()),
            EventCode::TeamMateInPits => Some(TeamMateInPits::layout()),
            EventCode::RaceWinner => Some(RaceWinner::layout()),
            EventCode::Penalty => Some(Penalty::layout()),
            EventCode::SpeedTrap => Some(SpeedTrap::layout()),
            EventCode::StartLights => Some(StartLights::layout()),
            EventCode::DriveThroughServed => Some(DriveThroughPenaltyServed::layout()),
            EventCode::StopGoServed => Some(StopGoPenaltyServed::layout()),
            EventCode::Flashback => Some(Flashback::layout()),
            EventCode::Buttons => Some(Buttons::layout()),
        }
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

wire_record! {
    pub struct FastestLap {
        pub vehicle_idx: u8,
        /// Seconds
        pub lap_time: f32,
    }
}

wire_record! {
    pub struct Retirement {
        pub vehicle_idx: u8,
    }
}

wire_record! {
    pub struct TeamMateInPits {
        pub vehicle_idx: u8,
    }
}

wire_record! {
    pub struct RaceWinner {
        pub vehicle_idx: u8,
    }
}

wire_record! {
    pub struct Penalty {
        pub penalty_type: u8,
        pub infringement_type: u8,
        pub vehicle_idx: u8,
        /// 255 when no other car is involved
        pub other_vehicle_idx: u8,
        /// Seconds, 255 when not a time penalty
        pub time: u8,
        pub lap_num: u8,
        pub places_gained: u8,
    }
}

impl Penalty {
    pub fn kind(&self) -> Result<PenaltyKind, DecodeError> {
        PenaltyKind::try_from(self.penalty_type)
    }

    pub fn infringement_text(&self) -> Result<&'static str, DecodeError> {
        names::infringement_text(self.infringement_type)
            .ok_or(DecodeError::out_of_range("infringement_type", self.infringement_type))
    }
}

wire_record! {
    pub struct SpeedTrap {
        pub vehicle_idx: u8,
        /// km/h
        pub speed: f32,
        pub is_overall_fastest_in_session: u8,
        pub is_driver_fastest_in_session: u8,
        pub fastest_vehicle_idx_in_session: u8,
        pub fastest_speed_in_session: f32,
    }
}

wire_record! {
    pub struct StartLights {
        pub num_lights: u8,
    }
}

wire_record! {
    pub struct DriveThroughPenaltyServed {
        pub vehicle_idx: u8,
    }
}

wire_record! {
    pub struct StopGoPenaltyServed {
        pub vehicle_idx: u8,
    }
}

wire_record! {
    pub struct Flashback {
        pub flashback_frame_identifier: u32,
        pub flashback_session_time: f32,
    }
}

wire_record! {
    pub struct Buttons {
        /// Bit flags, see [`crate::protocol::ids::button_flags`]
        pub button_status: u32,
    }
}

impl Buttons {
    pub fn is_pressed(&self, flag: u32) -> bool {
        self.button_status & flag != 0
    }
}

/// Decoded event: one variant per code, carrying only that code's fields.
#[derive(Debug, Clone, PartialEq)]
pub enum EventDetails {
    SessionStarted,
    SessionEnded,
    FastestLap(FastestLap),
    Retirement(Retirement),
    DrsEnabled,
    DrsDisabled,
    TeamMateInPits(TeamMateInPits),
    ChequeredFlag,
    RaceWinner(RaceWinner),
    Penalty(Penalty),
    SpeedTrap(SpeedTrap),
    StartLights(StartLights),
    LightsOut,
    DriveThroughServed(DriveThroughPenaltyServed),
    StopGoServed(StopGoPenaltyServed),
    Flashback(Flashback),
    Buttons(Buttons),
}

impl EventDetails {
    pub fn code(&self) -> EventCode {
        match self {
            EventDetails::SessionStarted => EventCode::SessionStarted,
            EventDetails::SessionEnded => EventCode::SessionEnded,
            EventDetails::FastestLap(_) => EventCode::FastestLap,
            EventDetails::Retirement(_) => EventCode::Retirement,
            EventDetails::DrsEnabled => EventCode::DrsEnabled,
            EventDetails::DrsDisabled => EventCode::DrsDisabled,
            EventDetails::TeamMateInPits(_) => EventCode::TeamMateInPits,
            EventDetails::ChequeredFlag => EventCode::ChequeredFlag,
            EventDetails::RaceWinner(_) => EventCode::RaceWinner,
            EventDetails::Penalty(_) => EventCode::Penalty,
            EventDetails::SpeedTrap(_) => EventCode::SpeedTrap,
            EventDetails::StartLights(_) => EventCode::StartLights,
            EventDetails::LightsOut => EventCode::LightsOut,
            EventDetails::DriveThroughServed(_) => EventCode::DriveThroughServed,
            EventDetails::StopGoServed(_) => EventCode::StopGoServed,
            EventDetails::Flashback(_) => EventCode::Flashback,
            EventDetails::Buttons(_) => EventCode::Buttons,
        }
    }

    /// The car the event is about, checked against the grid size.
    ///
    /// `Ok(None)` for events that do not name a car.
    pub fn vehicle_index(&self) -> Result<Option<usize>, DecodeError> {
        let raw = match self {
            EventDetails::FastestLap(data) => data.vehicle_idx,
            EventDetails::Retirement(data) => data.vehicle_idx,
            EventDetails::TeamMateInPits(data) => data.vehicle_idx,
            EventDetails::RaceWinner(data) => data.vehicle_idx,
            EventDetails::Penalty(data) => data.vehicle_idx,
            EventDetails::SpeedTrap(data) => data.vehicle_idx,
            EventDetails::DriveThroughServed(data) => data.vehicle_idx,
            EventDetails::StopGoServed(data) => data.vehicle_idx,
            _ => return Ok(None),
        };
        vehicle_index(raw).map(Some)
    }

    fn decode_payload(code: EventCode, cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        Ok(match code {
            EventCode::SessionStarted => EventDetails::SessionStarted,
            EventCode::SessionEnded => EventDetails::SessionEnded,
            EventCode::DrsEnabled => EventDetails::DrsEnabled,
            EventCode::DrsDisabled => EventDetails::DrsDisabled,
            EventCode::ChequeredFlag => EventDetails::ChequeredFlag,
            EventCode::LightsOut => EventDetails::LightsOut,
            EventCode::FastestLap => EventDetails::FastestLap(FastestLap::decode(cursor)?),
            EventCode::Retirement => EventDetails::Retirement(Retirement::decode(cursor)?),
            EventCode::TeamMateInPits => EventDetails::TeamMateInPits(TeamMateInPits::decode(cursor)?),
            EventCode::RaceWinner => EventDetails::RaceWinner(RaceWinner::decode(cursor)?),
            EventCode::Penalty => EventDetails::Penalty(Penalty::decode(cursor)?),
            EventCode::SpeedTrap => EventDetails::SpeedTrap(SpeedTrap::decode(cursor)?),
            EventCode::StartLights => EventDetails::StartLights(StartLights::decode(cursor)?),
            EventCode::DriveThroughServed => {
                EventDetails::DriveThroughServed(DriveThroughPenaltyServed::decode(cursor)?)
            }
            EventCode::StopGoServed => {
                EventDetails::StopGoServed(StopGoPenaltyServed::decode(cursor)?)
            }
            EventCode::Flashback => EventDetails::Flashback(Flashback::decode(cursor)?),
            EventCode::Buttons => EventDetails::Buttons(Buttons::decode(cursor)?),
        })
    }

    fn payload_value(&self) -> Option<Value> {
        match self {
            EventDetails::SessionStarted
            | EventDetails::SessionEnded
            | EventDetails::DrsEnabled
            | EventDetails::DrsDisabled
            | EventDetails::ChequeredFlag
            | EventDetails::LightsOut => None,
            EventDetails::FastestLap(data) => Some(data.to_value()),
            EventDetails::Retirement(data) => Some(data.to_value()),
            EventDetails::TeamMateInPits(data) => Some(data.to_value()),
            EventDetails::RaceWinner(data) => Some(data.to_value()),
            EventDetails::Penalty(data) => Some(data.to_value()),
            EventDetails::SpeedTrap(data) => Some(data.to_value()),
            EventDetails::StartLights(data) => Some(data.to_value()),
            EventDetails::DriveThroughServed(data) => Some(data.to_value()),
            EventDetails::StopGoServed(data) => Some(data.to_value()),
            EventDetails::Flashback(data) => Some(data.to_value()),
            EventDetails::Buttons(data) => Some(data.to_value()),
        }
    }
}

impl Decode for EventDetails {
    const WIRE_SIZE: usize = EVENT_CODE_LENGTH + EVENT_DATA_LENGTH;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        let raw: [u8; EVENT_CODE_LENGTH] = cursor.read_array()?;
        let code = EventCode::from_bytes(raw).ok_or(DecodeError::UnknownEventCode { code: raw })?;
        cursor.ensure(EVENT_DATA_LENGTH)?;

        let start = cursor.offset();
        let details = Self::decode_payload(code, cursor)?;
        cursor.skip(EVENT_DATA_LENGTH - (cursor.offset() - start))?;
        Ok(details)
    }

    fn layout() -> Layout {
        Layout::EventUnion
    }

    /// The code followed by the payload's fields, flattened into one record.
    fn to_value(&self) -> Value {
        let mut fields = vec![("code", Value::Text(self.code().as_str().to_string()))];
        if let Some(Value::Record(payload)) = self.payload_value() {
            fields.extend(payload);
        }
        Value::Record(fields)
    }
}

/// Event packet: header plus one decoded event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPacket {
    pub header: PacketHeader,
    pub event: EventDetails,
}

impl EventPacket {
    pub fn code(&self) -> EventCode {
        self.event.code()
    }
}

impl Decode for EventPacket {
    const WIRE_SIZE: usize = EVENT_PACKET_LENGTH;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        let header = PacketHeader::decode(cursor)?;
        let event = EventDetails::decode(cursor)?;
        Ok(Self { header, event })
    }

    fn layout() -> Layout {
        Layout::Record {
            name: "EventPacket",
            fields: vec![("header", PacketHeader::layout()), ("event", EventDetails::layout())],
        }
    }

    fn to_value(&self) -> Value {
        Value::Record(vec![("header", self.header.to_value()), ("event", self.event.to_value())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(code: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut data = code.to_vec();
        data.extend_from_slice(payload);
        data.resize(EVENT_CODE_LENGTH + EVENT_DATA_LENGTH, 0);
        data
    }

    #[test]
    fn every_code_round_trips_through_its_bytes() {
        for code in EventCode::ALL {
            assert_eq!(EventCode::from_bytes(*code.as_bytes()), Some(code));
            assert_eq!(code.as_str().as_bytes(), code.as_bytes());
        }
        assert_eq!(EventCode::from_bytes(*b"ssta"), None);
    }

    #[test]
    fn payloads_fit_the_union_region() {
        for code in EventCode::ALL {
            let size = code.payload_layout().map(|layout| layout.wire_size()).unwrap_or(0);
            assert!(size <= EVENT_DATA_LENGTH, "{code} payload is {size} bytes");
        }
        assert_eq!(SpeedTrap::WIRE_SIZE, EVENT_DATA_LENGTH);
    }

    #[test]
    fn penalty_decodes_each_field() -> Result<(), DecodeError> {
        let details = EventDetails::decode_bytes(&region(b"PENA", &[1, 2, 3, 4, 5, 6, 7]))?;
        assert_eq!(
            details,
            EventDetails::Penalty(Penalty {
                penalty_type: 1,
                infringement_type: 2,
                vehicle_idx: 3,
                other_vehicle_idx: 4,
                time: 5,
                lap_num: 6,
                places_gained: 7,
            })
        );
        assert_eq!(details.vehicle_index()?, Some(3));
        Ok(())
    }

    #[test]
    fn bare_code_consumes_whole_region() -> Result<(), DecodeError> {
        let data = region(b"LGOT", &[]);
        let mut cursor = Cursor::new(&data);
        assert_eq!(EventDetails::decode(&mut cursor)?, EventDetails::LightsOut);
        assert_eq!(cursor.offset(), EventDetails::WIRE_SIZE);
        Ok(())
    }

    #[test]
    fn vehicle_index_past_grid_is_out_of_range() {
        let details = EventDetails::Retirement(Retirement { vehicle_idx: 22 });
        assert_eq!(
            details.vehicle_index(),
            Err(DecodeError::OutOfRange { field: "vehicle_idx", value: 22 })
        );
        assert_eq!(EventDetails::ChequeredFlag.vehicle_index(), Ok(None));
    }

    #[test]
    fn buttons_report_flags() -> Result<(), DecodeError> {
        let data = region(b"BUTN", &0x0000_0041u32.to_le_bytes());
        let EventDetails::Buttons(buttons) = EventDetails::decode_bytes(&data)? else {
            panic!("expected buttons");
        };
        assert!(buttons.is_pressed(crate::protocol::ids::button_flags::CROSS_OR_A));
        assert!(buttons.is_pressed(crate::protocol::ids::button_flags::D_PAD_UP));
        assert!(!buttons.is_pressed(crate::protocol::ids::button_flags::SPECIAL));
        Ok(())
    }
}
