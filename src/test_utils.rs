//! Byte-level packet fixtures for tests and benchmarks.
//!
//! Every builder writes literal, mostly sequential values so a decoded field
//! can be checked against the number it was written with. Neighbouring fields
//! of the same type never share a value. Per-corner and per-stint arrays count
//! up from a base that differs for each array (`10, 11, 12, 13`, `20, 21, ...`).

#![cfg(any(test, feature = "benchmark"))]

use crate::protocol::constants::{
    EVENT_PACKET_LENGTH, GRID_SIZE, MAX_LAP_HISTORIES, MAX_MARSHAL_ZONES, MAX_TYRE_STINTS,
    MAX_WEATHER_SAMPLES, NAME_SIZE, TYRE_COUNT,
};
use crate::protocol::{EventCode, PacketId};

/// Little-endian byte writer.
#[derive(Debug, Default, Clone)]
pub struct PacketWriter {
    bytes: Vec<u8>,
}

impl PacketWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a packet with the standard fixture header for `id`.
    pub fn with_header(id: PacketId) -> Self {
        let mut writer = Self::new();
        writer.header(id as u8);
        writer
    }

    /// Header values 1, 2, 3, 4, id, 5, 6.5, 7, 8, 9.
    pub fn header(&mut self, packet_id: u8) -> &mut Self {
        self.u16(1).u8(2).u8(3).u8(4).u8(packet_id).u64(5).f32(6.5).u32(7).u8(8).u8(9)
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.bytes.push(v);
        self
    }

    pub fn i8(&mut self, v: i8) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i16(&mut self, v: i16) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u64(&mut self, v: u64) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f32(&mut self, v: f32) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f64(&mut self, v: f64) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// `text` followed by a null, then space padded to `size` bytes.
    pub fn name(&mut self, text: &str, size: usize) -> &mut Self {
        let mut field = text.as_bytes().to_vec();
        field.push(0);
        field.resize(size, b' ');
        field.truncate(size);
        self.raw(&field)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Zero pad up to `len` bytes.
    pub fn pad_to(&mut self, len: usize) -> &mut Self {
        if self.bytes.len() < len {
            self.bytes.resize(len, 0);
        }
        self
    }

    pub fn finish(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }
}

fn corners_f32(w: &mut PacketWriter, base: f32) {
    for i in 0..TYRE_COUNT {
        w.f32(base + i as f32);
    }
}

fn corners_u16(w: &mut PacketWriter, base: u16) {
    for i in 0..TYRE_COUNT {
        w.u16(base + i as u16);
    }
}

fn corners_u8(w: &mut PacketWriter, base: u8) {
    for i in 0..TYRE_COUNT {
        w.u8(base + i as u8);
    }
}

fn stints_u8(w: &mut PacketWriter, base: u8) {
    for i in 0..MAX_TYRE_STINTS {
        w.u8(base + i as u8);
    }
}

/// Every car: 1.0 through 18.0 in field order. Player corner arrays start at
/// 10.0, 20.0, 30.0, 40.0 and 50.0; player scalars are 19.0 through 28.0.
pub fn motion_fixture() -> Vec<u8> {
    let mut w = PacketWriter::with_header(PacketId::Motion);
    for _ in 0..GRID_SIZE {
        w.f32(1.0).f32(2.0).f32(3.0).f32(4.0).f32(5.0).f32(6.0);
        w.i16(7).i16(8).i16(9).i16(10).i16(11).i16(12);
        w.f32(13.0).f32(14.0).f32(15.0).f32(16.0).f32(17.0).f32(18.0);
    }
    for base in [10.0, 20.0, 30.0, 40.0, 50.0] {
        corners_f32(&mut w, base);
    }
    for v in 19..=28 {
        w.f32(v as f32);
    }
    w.finish()
}

/// Scalars 1 through 40, marshal zones {1.5, 2}, forecast samples 1 through 8.
pub fn session_fixture() -> Vec<u8> {
    let mut w = PacketWriter::with_header(PacketId::Session);
    w.u8(1).i8(2).i8(3).u8(4).u16(5).u8(6).i8(7).u8(8).u16(9).u16(10);
    for v in 11..=16 {
        w.u8(v);
    }
    for _ in 0..MAX_MARSHAL_ZONES {
        w.f32(1.5).i8(2);
    }
    w.u8(17).u8(18).u8(19);
    for _ in 0..MAX_WEATHER_SAMPLES {
        w.u8(1).u8(2).u8(3).i8(4).i8(5).i8(6).i8(7).u8(8);
    }
    w.u8(20).u8(21).u32(22).u32(23).u32(24);
    for v in 25..=38 {
        w.u8(v);
    }
    w.u32(39).u8(40);
    w.finish()
}

/// Every car: 1 through 24 in field order; trailer 1, 2.
pub fn lap_data_fixture() -> Vec<u8> {
    let mut w = PacketWriter::with_header(PacketId::LapData);
    for _ in 0..GRID_SIZE {
        w.u32(1).u32(2).u16(3).u16(4).f32(5.0).f32(6.0).f32(7.0);
        for v in 8..=21 {
            w.u8(v);
        }
        w.u16(22).u16(23).u8(24);
    }
    w.u8(1).u8(2);
    w.finish()
}

/// Event packet with `payload` after the code, zero padded to full length.
pub fn event_fixture(code: EventCode, payload: &[u8]) -> Vec<u8> {
    let mut w = PacketWriter::with_header(PacketId::Event);
    w.raw(code.as_bytes()).raw(payload).pad_to(EVENT_PACKET_LENGTH);
    w.finish()
}

/// Payload bytes used for each code by [`all_event_fixtures`].
pub fn event_payload(code: EventCode) -> Vec<u8> {
    let mut w = PacketWriter::new();
    match code {
        EventCode::FastestLap => {
            w.u8(1).f32(1.5);
        }
        EventCode::Penalty => {
            w.raw(&[1, 2, 3, 4, 5, 6, 7]);
        }
        EventCode::SpeedTrap => {
            w.u8(1).f32(2.5).u8(3).u8(4).u8(5).f32(6.5);
        }
        EventCode::Flashback => {
            w.u32(1).f32(2.5);
        }
        EventCode::Buttons => {
            w.u32(1);
        }
        EventCode::Retirement
        | EventCode::TeamMateInPits
        | EventCode::RaceWinner
        | EventCode::StartLights
        | EventCode::DriveThroughServed
        | EventCode::StopGoServed => {
            w.u8(1);
        }
        EventCode::SessionStarted
        | EventCode::SessionEnded
        | EventCode::DrsEnabled
        | EventCode::DrsDisabled
        | EventCode::ChequeredFlag
        | EventCode::LightsOut => {}
    }
    w.finish()
}

pub fn all_event_fixtures() -> Vec<(EventCode, Vec<u8>)> {
    EventCode::ALL.into_iter().map(|code| (code, event_fixture(code, &event_payload(code)))).collect()
}

/// Penalty event with fields 1 through 7.
pub fn penalty_fixture() -> Vec<u8> {
    event_fixture(EventCode::Penalty, &[1, 2, 3, 4, 5, 6, 7])
}

/// Every participant: fields 1 through 7, `name`, 8.
pub fn participants_fixture(name: &str) -> Vec<u8> {
    let mut w = PacketWriter::with_header(PacketId::Participants);
    w.u8(1);
    for _ in 0..GRID_SIZE {
        w.raw(&[1, 2, 3, 4, 5, 6, 7]).name(name, NAME_SIZE).u8(8);
    }
    w.finish()
}

pub fn car_setups_fixture() -> Vec<u8> {
    let mut w = PacketWriter::with_header(PacketId::CarSetups);
    for _ in 0..GRID_SIZE {
        w.u8(1).u8(2).u8(3).u8(4).f32(5.5).f32(6.5).f32(7.5).f32(8.5);
        for v in 9..=16 {
            w.u8(v);
        }
        w.f32(17.5).f32(18.5).f32(19.5).f32(20.5).u8(21).f32(22.5);
    }
    w.finish()
}

pub fn car_telemetry_fixture() -> Vec<u8> {
    let mut w = PacketWriter::with_header(PacketId::CarTelemetry);
    for _ in 0..GRID_SIZE {
        w.u16(1).f32(2.5).f32(3.5).f32(4.5).u8(5).i8(6).u16(7).u8(8).u8(9).u16(10);
        corners_u16(&mut w, 100);
        corners_u8(&mut w, 20);
        corners_u8(&mut w, 30);
        w.u16(11);
        corners_f32(&mut w, 40.0);
        corners_u8(&mut w, 50);
    }
    w.u8(1).u8(2).i8(3);
    w.finish()
}

pub fn car_status_fixture() -> Vec<u8> {
    let mut w = PacketWriter::with_header(PacketId::CarStatus);
    for _ in 0..GRID_SIZE {
        w.u8(1).u8(2).u8(3).u8(4).u8(5).f32(6.5).f32(7.5).f32(8.5);
        w.u16(9).u16(10).u8(11).u8(12).u16(13).u8(14).u8(15).u8(16).i8(17);
        w.f32(18.5).u8(19).f32(20.5).f32(21.5).f32(22.5).u8(23);
    }
    w.finish()
}

pub fn final_classification_fixture() -> Vec<u8> {
    let mut w = PacketWriter::with_header(PacketId::FinalClassification);
    w.u8(1);
    for _ in 0..GRID_SIZE {
        w.raw(&[1, 2, 3, 4, 5, 6]).u32(7).f64(8.0).u8(9).u8(10).u8(11);
        stints_u8(&mut w, 10);
        stints_u8(&mut w, 20);
        stints_u8(&mut w, 30);
    }
    w.finish()
}

pub fn lobby_info_fixture() -> Vec<u8> {
    let mut w = PacketWriter::with_header(PacketId::LobbyInfo);
    w.u8(1);
    for _ in 0..GRID_SIZE {
        w.u8(1).u8(2).u8(3).name("Driver", NAME_SIZE).u8(4).u8(5);
    }
    w.finish()
}

pub fn car_damage_fixture() -> Vec<u8> {
    let mut w = PacketWriter::with_header(PacketId::CarDamage);
    for _ in 0..GRID_SIZE {
        corners_f32(&mut w, 0.0);
        corners_u8(&mut w, 30);
        corners_u8(&mut w, 40);
        for v in 4..=21 {
            w.u8(v);
        }
    }
    w.finish()
}

pub fn session_history_fixture() -> Vec<u8> {
    let mut w = PacketWriter::with_header(PacketId::SessionHistory);
    w.raw(&[1, 2, 3, 4, 5, 6, 7]);
    for _ in 0..MAX_LAP_HISTORIES {
        w.u32(1).u16(2).u16(3).u16(4).u8(5);
    }
    for _ in 0..MAX_TYRE_STINTS {
        w.u8(1).u8(2).u8(3);
    }
    w.finish()
}

/// One fixture per packet kind, in id order. Events use the penalty fixture.
pub fn all_fixtures() -> Vec<(PacketId, Vec<u8>)> {
    vec![
        (PacketId::Motion, motion_fixture()),
        (PacketId::Session, session_fixture()),
        (PacketId::LapData, lap_data_fixture()),
        (PacketId::Event, penalty_fixture()),
        (PacketId::Participants, participants_fixture("Pérez")),
        (PacketId::CarSetups, car_setups_fixture()),
        (PacketId::CarTelemetry, car_telemetry_fixture()),
        (PacketId::CarStatus, car_status_fixture()),
        (PacketId::FinalClassification, final_classification_fixture()),
        (PacketId::LobbyInfo, lobby_info_fixture()),
        (PacketId::CarDamage, car_damage_fixture()),
        (PacketId::SessionHistory, session_history_fixture()),
    ]
}
