pub mod nav_hp_pos_llh;
pub mod nav_pvt;
mod types;

pub use nav_hp_pos_llh::{HighPrecisionFix, VerticalAccuracySource};
pub use nav_pvt::{NavPvtFlags, PvtFix};
pub use types::*;

use crate::error::ParserError;
use core::fmt;

/// Carrier phase range solution status, as derived from the NAV-PVT flags
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum FixStatus {
    /// No carrier phase range solution
    #[default]
    None = 0,
    /// Carrier phase range solution with floating ambiguities
    Float = 1,
    /// Carrier phase range solution with fixed ambiguities
    Fixed = 2,
}

impl FixStatus {
    /// Classifies the raw NAV-PVT flags byte from its two top bits:
    /// `10` is fixed, `01` is float, everything else is none.
    pub fn from_flags(flags: u8) -> Self {
        NavPvtFlags::from_bits_retain(flags).into()
    }

    /// Numeric code published alongside fixes
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn description(self) -> &'static str {
        match self {
            FixStatus::None => "No carrier phase range solution",
            FixStatus::Float => "RTK float solution",
            FixStatus::Fixed => "RTK fixed solution",
        }
    }
}

impl From<NavPvtFlags> for FixStatus {
    fn from(flags: NavPvtFlags) -> Self {
        match (
            flags.contains(NavPvtFlags::CARR_SOLN_FIXED),
            flags.contains(NavPvtFlags::CARR_SOLN_FLOAT),
        ) {
            (true, false) => FixStatus::Fixed,
            (false, true) => FixStatus::Float,
            _ => FixStatus::None,
        }
    }
}

impl fmt::Display for FixStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

pub(crate) fn check_len(
    packet: &'static str,
    window: &[u8],
    expect: usize,
) -> Result<(), ParserError> {
    if window.len() != expect {
        return Err(ParserError::InvalidPacketLen {
            packet,
            expect,
            got: window.len(),
        });
    }
    Ok(())
}
