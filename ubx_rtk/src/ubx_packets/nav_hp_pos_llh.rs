use super::{check_len, FixStatus};
use crate::{
    aggregator::FixAggregator,
    codec::{read, scaled},
    constants::NAV_HP_POS_LLH_WINDOW_LEN,
    error::{FieldError, ParserError},
};

const PACKET: &str = "NavHpPosLlh";

// Offsets are relative to the window following the message id
const ITOW: usize = 6;
const LON: usize = 10;
const LAT: usize = 14;
const HEIGHT: usize = 18;
const LON_HP: usize = 26;
const LAT_HP: usize = 27;
const HEIGHT_HP: usize = 28;
const H_ACC: usize = 30;

/// Where the vertical accuracy of a [HighPrecisionFix] comes from.
///
/// The 36 byte window ends two bytes into the horizontal accuracy's
/// successor, so the real vertical accuracy is never available.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAccuracySource {
    /// Reuse the horizontal accuracy field (offset 30) as the vertical one.
    #[default]
    MirrorHorizontal,
    /// Report the vertical accuracy as NaN.
    Unavailable,
}

/// High Precision Geodetic Position Solution, combined with the latest
/// fix status reported by NAV-PVT
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighPrecisionFix {
    /// GPS Millisecond Time of Week
    pub itow: u32,

    /// Longitude (deg), base resolution
    pub lon: f64,
    /// Latitude (deg), base resolution
    pub lat: f64,
    /// Height above Ellipsoid (m), base resolution
    pub height: f64,

    /// Longitude (deg), high precision component added
    pub lon_hp: f64,
    /// Latitude (deg), high precision component added
    pub lat_hp: f64,
    /// Height above Ellipsoid (m), high precision component added
    pub height_hp: f64,

    /// Horizontal accuracy estimate (m)
    pub h_acc: f64,
    /// Vertical accuracy estimate (m), see [VerticalAccuracySource]
    pub v_acc: f64,

    /// Copied from the latest NAV-PVT
    pub fix_status: FixStatus,
    /// Copied from the latest NAV-PVT
    pub num_satellites: u8,
}

struct Fields {
    itow: u32,
    lon: f64,
    lat: f64,
    height: f64,
    lon_hp: f64,
    lat_hp: f64,
    height_hp: f64,
    h_acc: f64,
}

fn decode_fields(w: &[u8]) -> Result<Fields, FieldError> {
    let lon = scaled::<i32>(w, LON, 1e7)?;
    let lat = scaled::<i32>(w, LAT, 1e7)?;
    let height = scaled::<i32>(w, HEIGHT, 1e3)?;
    Ok(Fields {
        itow: read::<u32>(w, ITOW)?,
        lon,
        lat,
        height,
        lon_hp: lon + scaled::<i8>(w, LON_HP, 1e9)?,
        lat_hp: lat + scaled::<i8>(w, LAT_HP, 1e9)?,
        height_hp: height + scaled::<i8>(w, HEIGHT_HP, 1e4)?,
        h_acc: scaled::<u32>(w, H_ACC, 1e4)?,
    })
}

impl HighPrecisionFix {
    /// Decodes a NAV-HPPOSLLH window, taking fix status and satellite count
    /// from `fix`.
    pub fn decode(
        window: &[u8],
        fix: &FixAggregator,
        vertical: VerticalAccuracySource,
    ) -> Result<Self, ParserError> {
        check_len(PACKET, window, NAV_HP_POS_LLH_WINDOW_LEN)?;
        let fields = decode_fields(window).map_err(|source| ParserError::Field {
            packet: PACKET,
            source,
        })?;
        let v_acc = match vertical {
            VerticalAccuracySource::MirrorHorizontal => fields.h_acc,
            VerticalAccuracySource::Unavailable => f64::NAN,
        };
        Ok(Self {
            itow: fields.itow,
            lon: fields.lon,
            lat: fields.lat,
            height: fields.height,
            lon_hp: fields.lon_hp,
            lat_hp: fields.lat_hp,
            height_hp: fields.height_hp,
            h_acc: fields.h_acc,
            v_acc,
            fix_status: fix.status(),
            num_satellites: fix.satellites(),
        })
    }
}
