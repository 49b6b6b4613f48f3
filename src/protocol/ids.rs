//! Typed views of raw id bytes.
//!
//! Packets keep ids as the raw bytes the game sent; these conversions are
//! applied on access and report [`DecodeError::OutOfRange`] for values the
//! format does not define instead of clamping them.

use super::constants::GRID_SIZE;
use crate::DecodeError;

/// Check a raw car index against the grid.
pub fn vehicle_index(raw: u8) -> Result<usize, DecodeError> {
    let index = usize::from(raw);
    if index < GRID_SIZE { Ok(index) } else { Err(DecodeError::out_of_range("vehicle_idx", raw)) }
}

macro_rules! id_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($field:literal) {
            $($variant:ident = $value:literal => $text:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant = $value,)*
        }

        impl $name {
            pub const fn text(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = DecodeError;

            fn try_from(raw: u8) -> Result<Self, Self::Error> {
                match raw {
                    $($value => Ok($name::$variant),)*
                    other => Err(DecodeError::out_of_range($field, other)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.text())
            }
        }
    };
}

id_enum! {
    pub enum Weather ("weather") {
        Clear = 0 => "Clear",
        LightCloud = 1 => "Light Cloud",
        Overcast = 2 => "Overcast",
        LightRain = 3 => "Light Rain",
        HeavyRain = 4 => "Heavy Rain",
        Storm = 5 => "Storm",
    }
}

id_enum! {
    pub enum SessionType ("session_type") {
        Unknown = 0 => "Unknown",
        Practice1 = 1 => "Practice 1",
        Practice2 = 2 => "Practice 2",
        Practice3 = 3 => "Practice 3",
        ShortPractice = 4 => "Short Practice",
        Qualifying1 = 5 => "Qualifying 1",
        Qualifying2 = 6 => "Qualifying 2",
        Qualifying3 = 7 => "Qualifying 3",
        ShortQualifying = 8 => "Short Qualifying",
        OneShotQualifying = 9 => "One-shot Qualifying",
        Race = 10 => "Race",
        Race2 = 11 => "Race 2",
        Race3 = 12 => "Race 3",
        TimeTrial = 13 => "Time Trial",
    }
}

id_enum! {
    /// Penalty types carried by `PENA` events.
    pub enum PenaltyKind ("penalty_type") {
        DriveThrough = 0 => "drive through",
        StopGo = 1 => "stop-go",
        GridPenalty = 2 => "grid penalty",
        PenaltyReminder = 3 => "penalty reminder",
        TimePenalty = 4 => "time penalty",
        Warning = 5 => "warning",
        Disqualified = 6 => "disqualified",
        RemovedFromFormationLap = 7 => "removed from formation lap",
        ParkedTooLongTimer = 8 => "parked too long timer",
        TyreRegulations = 9 => "tire regulations",
        ThisLapInvalidated = 10 => "this lap invalidated",
        ThisAndNextLapInvalidated = 11 => "this and next lap invalidated",
        ThisLapInvalidatedWithoutReason = 12 => "this lap invalidated without reason",
        ThisAndNextLapInvalidatedWithoutReason = 13 => "this and next lap invalidated without reason",
        ThisAndPreviousLapInvalidated = 14 => "this and previous lap invalidated",
        ThisAndPreviousLapInvalidatedWithoutReason = 15 => "this and previous lap invalidated without reason",
        Retired = 16 => "retired",
        BlackFlagTimer = 17 => "black flag timer",
    }
}

impl PenaltyKind {
    /// Penalties that only invalidate laps.
    pub const fn invalidates_lap(&self) -> bool {
        matches!(
            self,
            PenaltyKind::ThisLapInvalidated
                | PenaltyKind::ThisAndNextLapInvalidated
                | PenaltyKind::ThisLapInvalidatedWithoutReason
                | PenaltyKind::ThisAndNextLapInvalidatedWithoutReason
                | PenaltyKind::ThisAndPreviousLapInvalidated
                | PenaltyKind::ThisAndPreviousLapInvalidatedWithoutReason
        )
    }
}

/// Controller button bits reported by `BUTN` events.
pub mod button_flags {
    pub const CROSS_OR_A: u32 = 0x0000_0001;
    pub const TRIANGLE_OR_Y: u32 = 0x0000_0002;
    pub const CIRCLE_OR_B: u32 = 0x0000_0004;
    pub const SQUARE_OR_X: u32 = 0x0000_0008;
    pub const D_PAD_LEFT: u32 = 0x0000_0010;
    pub const D_PAD_RIGHT: u32 = 0x0000_0020;
    pub const D_PAD_UP: u32 = 0x0000_0040;
    pub const D_PAD_DOWN: u32 = 0x0000_0080;
    pub const OPTIONS_OR_MENU: u32 = 0x0000_0100;
    pub const L1_OR_LB: u32 = 0x0000_0200;
    pub const R1_OR_RB: u32 = 0x0000_0400;
    pub const L2_OR_LT: u32 = 0x0000_0800;
    pub const R2_OR_RT: u32 = 0x0000_1000;
    pub const LEFT_STICK_CLICK: u32 = 0x0000_2000;
    pub const RIGHT_STICK_CLICK: u32 = 0x0000_4000;
    pub const RIGHT_STICK_LEFT: u32 = 0x0000_8000;
    pub const RIGHT_STICK_RIGHT: u32 = 0x0001_0000;
    pub const RIGHT_STICK_UP: u32 = 0x0002_0000;
    pub const RIGHT_STICK_DOWN: u32 = 0x0004_0000;
    pub const SPECIAL: u32 = 0x0008_0000;
    /// UDP action 1; actions 2-12 follow in successive bits
    pub const UDP_ACTION_1: u32 = 0x0010_0000;
    pub const UDP_ACTION_12: u32 = 0x8000_0000;
}
