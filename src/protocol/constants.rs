//! Fixed sizes of the F1 22 UDP format.

// ── Header ─────────────────────────────────────────────────────────────────

pub const PACKET_HEADER_LENGTH: usize = 24;
/// Byte index of the packet id inside the header.
pub const PACKET_ID_OFFSET: usize = 5;

// ── Event union ────────────────────────────────────────────────────────────

pub const EVENT_CODE_LENGTH: usize = 4;
/// Payload region after the code; shorter payloads are zero padded.
pub const EVENT_DATA_LENGTH: usize = 12;
pub const EVENT_PACKET_LENGTH: usize = PACKET_HEADER_LENGTH + EVENT_CODE_LENGTH + EVENT_DATA_LENGTH;

// ── Array bounds ───────────────────────────────────────────────────────────

pub const GRID_SIZE: usize = 22;
pub const TYRE_COUNT: usize = 4;
pub const MAX_MARSHAL_ZONES: usize = 21;
pub const MAX_WEATHER_SAMPLES: usize = 56;
pub const MAX_TYRE_STINTS: usize = 8;
pub const MAX_LAP_HISTORIES: usize = 100;
pub const NAME_SIZE: usize = 48;

// ── Values ─────────────────────────────────────────────────────────────────

/// Unsigned byte meaning "no value" (no other vehicle, no time, ...).
pub const NULL_BYTE_VALUE: u8 = 255;

// ── Transport ──────────────────────────────────────────────────────────────

pub const DEFAULT_PORT: u16 = 20777;
/// Size of the largest packet kind (Motion).
pub const MAX_PACKET_SIZE: usize = 1464;
/// Largest payload a single UDP datagram can carry.
pub const UDP_MAX_SIZE: usize = 65507;
