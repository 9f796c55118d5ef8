use super::{FixStatus, HighPrecisionFix, PvtFix};
use crate::{
    error::{DateTimeError, ProjectionError},
    projection::{Covariance, ProjectedCoordinate},
};
use chrono::prelude::*;
use core::fmt;

/// Geodetic fix with its position covariance, constructed from PvtFix and
/// HighPrecisionFix records
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticFix {
    pub fix_status: FixStatus,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Height above the ellipsoid in meters
    pub alt: f64,
    pub covariance: Covariance,
}

impl From<&HighPrecisionFix> for GeodeticFix {
    fn from(fix: &HighPrecisionFix) -> Self {
        GeodeticFix {
            fix_status: fix.fix_status,
            lat: fix.lat_hp,
            lon: fix.lon_hp,
            alt: fix.height_hp,
            covariance: Covariance::from_accuracy(fix.h_acc, fix.v_acc),
        }
    }
}

impl From<&PvtFix> for GeodeticFix {
    fn from(fix: &PvtFix) -> Self {
        GeodeticFix {
            fix_status: fix.fix_status,
            lat: fix.lat,
            lon: fix.lon,
            alt: fix.height,
            covariance: Covariance::from_accuracy(fix.h_acc, fix.v_acc),
        }
    }
}

/// A fix projected to UTM
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedFix {
    pub itow: u32,
    pub num_satellites: u8,
    pub fix_status: FixStatus,
    pub lon: f64,
    pub lat: f64,
    pub height: f64,
    pub coordinate: ProjectedCoordinate,
    pub h_acc: f64,
    pub v_acc: f64,
    pub covariance: Covariance,
}

impl ProjectedFix {
    /// Easting, northing, height
    pub fn position(&self) -> [f64; 3] {
        [
            self.coordinate.easting,
            self.coordinate.northing,
            self.height,
        ]
    }
}

impl TryFrom<&HighPrecisionFix> for ProjectedFix {
    type Error = ProjectionError;

    /// The zone follows the base longitude, the projected point is the
    /// high precision one
    fn try_from(fix: &HighPrecisionFix) -> Result<Self, Self::Error> {
        let coordinate =
            ProjectedCoordinate::from_geodetic_in_zone_of(fix.lon, fix.lon_hp, fix.lat_hp)?;
        Ok(ProjectedFix {
            itow: fix.itow,
            num_satellites: fix.num_satellites,
            fix_status: fix.fix_status,
            lon: fix.lon_hp,
            lat: fix.lat_hp,
            height: fix.height_hp,
            coordinate,
            h_acc: fix.h_acc,
            v_acc: fix.v_acc,
            covariance: Covariance::from_accuracy(fix.h_acc, fix.v_acc),
        })
    }
}

impl TryFrom<&PvtFix> for ProjectedFix {
    type Error = ProjectionError;

    fn try_from(fix: &PvtFix) -> Result<Self, Self::Error> {
        let coordinate = ProjectedCoordinate::from_geodetic(fix.lon, fix.lat)?;
        Ok(ProjectedFix {
            itow: fix.itow,
            num_satellites: fix.num_satellites,
            fix_status: fix.fix_status,
            lon: fix.lon,
            lat: fix.lat,
            height: fix.height,
            coordinate,
            h_acc: fix.h_acc,
            v_acc: fix.v_acc,
            covariance: Covariance::from_accuracy(fix.h_acc, fix.v_acc),
        })
    }
}

impl TryFrom<&PvtFix> for DateTime<Utc> {
    type Error = DateTimeError;
    fn try_from(sol: &PvtFix) -> Result<Self, Self::Error> {
        let date = NaiveDate::from_ymd_opt(
            i32::from(sol.year),
            u32::from(sol.month),
            u32::from(sol.day),
        )
        .ok_or(DateTimeError::InvalidDate)?;
        let time = NaiveTime::from_hms_opt(
            u32::from(sol.hour),
            u32::from(sol.min),
            u32::from(sol.sec),
        )
        .ok_or(DateTimeError::InvalidTime)?;
        Ok(NaiveDateTime::new(date, time).and_utc())
    }
}

impl PvtFix {
    /// UTC date and time of the navigation epoch, at second resolution
    pub fn datetime(&self) -> Result<DateTime<Utc>, DateTimeError> {
        self.try_into()
    }
}

/// Host receive time paired with the GPS time of week of a NAV-PVT.
///
/// Displays as `<unix seconds>.<nanoseconds>,<itow>`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampPair {
    pub host: DateTime<Utc>,
    pub itow: u32,
}

impl TimestampPair {
    pub fn new(host: DateTime<Utc>, itow: u32) -> Self {
        Self { host, itow }
    }
}

impl fmt::Display for TimestampPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:09},{}",
            self.host.timestamp(),
            self.host.timestamp_subsec_nanos(),
            self.itow
        )
    }
}
