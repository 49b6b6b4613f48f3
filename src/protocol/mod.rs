//! F1 22 packet layouts.
//!
//! Every record is declared once with `wire_record!`, which fixes its field
//! order, wire size and layout. The byte layout is bit-exact with the game's
//! UDP output (format 2022): little-endian, no padding, fixed array lengths.
//!
//! | Packet | Id | Bytes |
//! |---|---|---|
//! | Motion | 0 | 1464 |
//! | Session | 1 | 632 |
//! | LapData | 2 | 972 |
//! | Event | 3 | 40 |
//! | Participants | 4 | 1257 |
//! | CarSetups | 5 | 1102 |
//! | CarTelemetry | 6 | 1347 |
//! | CarStatus | 7 | 1058 |
//! | FinalClassification | 8 | 1015 |
//! | LobbyInfo | 9 | 1191 |
//! | CarDamage | 10 | 948 |
//! | SessionHistory | 11 | 1155 |

pub mod constants;
pub mod event;
pub mod ids;

mod car_damage;
mod car_setups;
mod car_status;
mod car_telemetry;
mod final_classification;
mod header;
mod lap_data;
mod lobby_info;
mod motion;
mod packet;
mod participants;
mod session;
mod session_history;

pub use car_damage::{CarDamageData, CarDamagePacket};
pub use car_setups::{CarSetupData, CarSetupsPacket};
pub use car_status::{CarStatusData, CarStatusPacket};
pub use car_telemetry::{CarTelemetryData, CarTelemetryPacket};
pub use event::{EventCode, EventDetails, EventPacket};
pub use final_classification::{FinalClassificationData, FinalClassificationPacket};
pub use header::{PacketHeader, PacketId};
pub use lap_data::{LapData, LapDataPacket};
pub use lobby_info::{LobbyInfoData, LobbyInfoPacket};
pub use motion::{CarMotionData, MotionPacket};
pub use packet::{Packet, decode_value, peek_packet_id};
pub use participants::{ParticipantData, ParticipantsPacket};
pub use session::{MarshalZone, SessionPacket, WeatherForecastSample};
pub use session_history::{LapHistoryData, SessionHistoryPacket, TyreStintHistoryData};
