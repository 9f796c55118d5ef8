use super::{check_len, FixStatus};
use crate::{
    aggregator::FixAggregator,
    codec::{read, scaled, unscaled},
    constants::NAV_PVT_WINDOW_LEN,
    error::ParserError,
};
use bitflags::bitflags;

const PACKET: &str = "NavPvt";

// Offsets are relative to the window following the message id
const ITOW: usize = 2;
const YEAR: usize = 6;
const MONTH: usize = 8;
const DAY: usize = 9;
const HOUR: usize = 10;
const MIN: usize = 11;
const SEC: usize = 12;
const FLAGS: usize = 23;
const NUM_SV: usize = 25;
const LON: usize = 26;
const LAT: usize = 30;
const HEIGHT: usize = 34;
const HEIGHT_MSL: usize = 38;
const H_ACC: usize = 42;
const V_ACC: usize = 46;
const VEL_N: usize = 50;
const VEL_E: usize = 54;
const VEL_D: usize = 58;
const G_SPEED: usize = 62;
const HEAD_MOT: usize = 66;
const S_ACC: usize = 70;
const HEAD_ACC: usize = 74;
const PDOP: usize = 78;
const HEAD_VEH: usize = 86;

bitflags! {
    /// Fix status flags for `NavPvt`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NavPvtFlags: u8 {
        /// 1 = Position and velocity valid and within DOP and accuracy masks
        const GPS_FIX_OK = 1;
        /// 1 = Differential corrections were applied; DGPS used
        const DIFF_SOLN = 2;
        /// 1 = Heading of vehicle is valid, only set if the receiver is in sensor fusion mode
        const HEAD_VEH_VALID = 0x20;
        /// 1 = Carrier phase range solution with floating ambiguities
        const CARR_SOLN_FLOAT = 0x40;
        /// 1 = Carrier phase range solution with fixed ambiguities
        const CARR_SOLN_FIXED = 0x80;
    }
}

/// Navigation Position Velocity Time Solution
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PvtFix {
    /// GPS Millisecond time of week of the navigation epoch
    pub itow: u32,

    /// Year (UTC)
    pub year: i16,
    /// Month, range 1..12 (UTC)
    pub month: u8,
    /// Day of month, range 1..31 (UTC)
    pub day: u8,
    /// Hour of day, range 0..23 (UTC)
    pub hour: u8,
    /// Minute of hour, range 0..59 (UTC)
    pub min: u8,
    /// Seconds of minute, range 0..60 (UTC)
    pub sec: u8,

    /// Raw fix status flags, see [NavPvtFlags]
    pub flags: u8,
    pub fix_status: FixStatus,
    /// Number of satellites used in Nav Solution
    pub num_satellites: u8,

    /// Longitude in \[deg\]
    pub lon: f64,
    /// Latitude in \[deg\]
    pub lat: f64,
    /// Height above reference ellipsoid in \[m\]
    pub height: f64,
    /// Height above Mean Sea Level in \[m\]
    pub height_msl: f64,

    /// Horizontal accuracy, raw receiver units
    pub h_acc: f64,
    /// Vertical accuracy, raw receiver units
    pub v_acc: f64,

    pub vel_north: f64,
    pub vel_east: f64,
    pub vel_down: f64,
    pub ground_speed: f64,

    pub heading_motion: f64,
    /// Speed accuracy estimate, raw receiver units
    pub speed_accuracy: f64,
    /// Heading accuracy estimate, raw receiver units
    pub heading_accuracy: f64,
    /// Position DOP, raw receiver units
    pub pdop: i16,
    pub heading_vehicle: f64,
}

impl PvtFix {
    /// Decodes a NAV-PVT window. Pure: the same bytes always yield the same fix.
    pub fn decode(window: &[u8]) -> Result<Self, ParserError> {
        check_len(PACKET, window, NAV_PVT_WINDOW_LEN)?;
        decode_fields(window).map_err(|source| ParserError::Field {
            packet: PACKET,
            source,
        })
    }

    pub fn flags(&self) -> NavPvtFlags {
        NavPvtFlags::from_bits_retain(self.flags)
    }
}

fn decode_fields(w: &[u8]) -> Result<PvtFix, crate::error::FieldError> {
    let flags = read::<u8>(w, FLAGS)?;
    Ok(PvtFix {
        itow: read::<u32>(w, ITOW)?,
        year: read::<i16>(w, YEAR)?,
        month: read::<u8>(w, MONTH)?,
        day: read::<u8>(w, DAY)?,
        hour: read::<u8>(w, HOUR)?,
        min: read::<u8>(w, MIN)?,
        sec: read::<u8>(w, SEC)?,
        flags,
        fix_status: FixStatus::from_flags(flags),
        num_satellites: read::<u8>(w, NUM_SV)?,
        lon: scaled::<i32>(w, LON, 1e7)?,
        lat: scaled::<i32>(w, LAT, 1e7)?,
        height: scaled::<i32>(w, HEIGHT, 1e3)?,
        height_msl: scaled::<i32>(w, HEIGHT_MSL, 1e3)?,
        h_acc: unscaled::<u32>(w, H_ACC)?,
        v_acc: unscaled::<u32>(w, V_ACC)?,
        vel_north: scaled::<i32>(w, VEL_N, 1e3)?,
        vel_east: scaled::<i32>(w, VEL_E, 1e3)?,
        vel_down: scaled::<i32>(w, VEL_D, 1e3)?,
        ground_speed: scaled::<i32>(w, G_SPEED, 1e3)?,
        heading_motion: scaled::<i32>(w, HEAD_MOT, 1e3)?,
        speed_accuracy: unscaled::<u32>(w, S_ACC)?,
        heading_accuracy: unscaled::<u32>(w, HEAD_ACC)?,
        pdop: read::<i16>(w, PDOP)?,
        heading_vehicle: scaled::<i32>(w, HEAD_VEH, 1e3)?,
    })
}

/// Decodes a NAV-PVT window and records its fix status and satellite count
/// in `fix` for the high precision fixes that follow.
pub fn decode(window: &[u8], fix: &mut FixAggregator) -> Result<PvtFix, ParserError> {
    let pvt = PvtFix::decode(window)?;
    fix.update(pvt.fix_status, pvt.num_satellites);
    Ok(pvt)
}
