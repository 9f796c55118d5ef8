//! UTM projection of geodetic fixes.
//!
//! Forward transverse Mercator on the WGS84 ellipsoid using the Krüger
//! series to fourth order in the third flattening, which stays at the
//! sub-millimetre level inside a zone. Northings are not offset for the
//! southern hemisphere, so they are negative south of the equator.
//!
//! The zone is `floor((lon + 180) / 6) + 1`. Longitude `-180` lands in zone
//! 1 but `+180` would be zone 61, which is rejected rather than wrapped.

use crate::error::ProjectionError;

const WGS84_A: f64 = 6_378_137.0;
const WGS84_F: f64 = 1.0 / 298.257_223_563;
const K0: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;

/// Raw zone number for `lon`, not range checked
pub fn utm_zone(lon: f64) -> i32 {
    ((lon + 180.0) / 6.0).floor() as i32 + 1
}

/// Central meridian of `zone` in degrees
pub fn central_meridian(zone: u8) -> f64 {
    f64::from(zone) * 6.0 - 183.0
}

fn checked_zone(lon: f64) -> Result<u8, ProjectionError> {
    if !lon.is_finite() {
        return Err(ProjectionError::NonFinite);
    }
    let zone = utm_zone(lon);
    u8::try_from(zone)
        .ok()
        .filter(|z| (1..=60).contains(z))
        .ok_or(ProjectionError::ZoneOutOfRange { zone })
}

/// Planar position within a UTM zone
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectedCoordinate {
    pub zone: u8,
    /// \[m\]
    pub easting: f64,
    /// \[m\]
    pub northing: f64,
}

impl ProjectedCoordinate {
    /// Projects in the zone `lon` falls into
    pub fn from_geodetic(lon: f64, lat: f64) -> Result<Self, ProjectionError> {
        Self::in_zone(checked_zone(lon)?, lon, lat)
    }

    /// Projects in the zone selected by `zone_lon`, which may differ from
    /// `lon` by a high precision correction
    pub fn from_geodetic_in_zone_of(
        zone_lon: f64,
        lon: f64,
        lat: f64,
    ) -> Result<Self, ProjectionError> {
        Self::in_zone(checked_zone(zone_lon)?, lon, lat)
    }

    pub fn in_zone(zone: u8, lon: f64, lat: f64) -> Result<Self, ProjectionError> {
        if !(1..=60).contains(&zone) {
            return Err(ProjectionError::ZoneOutOfRange {
                zone: i32::from(zone),
            });
        }
        if !lon.is_finite() || !lat.is_finite() {
            return Err(ProjectionError::NonFinite);
        }
        if lat.abs() > 90.0 {
            return Err(ProjectionError::LatitudeOutOfRange { lat });
        }

        let n = WGS84_F / (2.0 - WGS84_F);
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let rectifying_radius = WGS84_A / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0);
        let alpha = [
            n / 2.0 - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3 + 41.0 / 180.0 * n4,
            13.0 / 48.0 * n2 - 3.0 / 5.0 * n3 + 557.0 / 1440.0 * n4,
            61.0 / 240.0 * n3 - 103.0 / 140.0 * n4,
            49561.0 / 161_280.0 * n4,
        ];
        let e = 2.0 * n.sqrt() / (1.0 + n);

        let phi = lat.to_radians();
        let lambda = (lon - central_meridian(zone)).to_radians();

        let sin_phi = phi.sin();
        let t = (sin_phi.atanh() - e * (e * sin_phi).atanh()).sinh();
        let xi = t.atan2(lambda.cos());
        let eta = (lambda.sin() / (1.0 + t * t).sqrt()).atanh();

        let (mut x, mut y) = (eta, xi);
        for (j, a) in alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            x += a * (k * xi).cos() * (k * eta).sinh();
            y += a * (k * xi).sin() * (k * eta).cosh();
        }

        Ok(Self {
            zone,
            easting: FALSE_EASTING + K0 * rectifying_radius * x,
            northing: K0 * rectifying_radius * y,
        })
    }
}

/// Position covariance, east/north/up, diagonal only
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Covariance {
    pub matrix: [[f64; 3]; 3],
}

impl Covariance {
    /// `h_acc²/2` on both horizontal terms, `v_acc²/3` on the vertical one
    pub fn from_accuracy(h_acc: f64, v_acc: f64) -> Self {
        let horizontal = h_acc * h_acc / 2.0;
        let vertical = v_acc * v_acc / 3.0;
        Self {
            matrix: [
                [horizontal, 0.0, 0.0],
                [0.0, horizontal, 0.0],
                [0.0, 0.0, vertical],
            ],
        }
    }

    pub fn diagonal(&self) -> [f64; 3] {
        [self.matrix[0][0], self.matrix[1][1], self.matrix[2][2]]
    }

    pub fn row_major(&self) -> [f64; 9] {
        let m = &self.matrix;
        [
            m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_numbers() {
        assert_eq!(utm_zone(-3.0), 30);
        assert_eq!(utm_zone(179.9), 60);
        assert_eq!(utm_zone(126.978), 52);
        assert_eq!(utm_zone(0.0), 31);
        assert_eq!(central_meridian(30), -3.0);
        assert_eq!(central_meridian(52), 129.0);
    }

    #[test]
    fn antimeridian() {
        // -180 is the western edge of zone 1
        assert_eq!(utm_zone(-180.0), 1);
        assert_eq!(
            ProjectedCoordinate::from_geodetic(-180.0, 0.0).map(|p| p.zone),
            Ok(1)
        );
        // +180 computes zone 61, which does not exist
        assert_eq!(utm_zone(180.0), 61);
        assert_eq!(
            ProjectedCoordinate::from_geodetic(180.0, 0.0),
            Err(ProjectionError::ZoneOutOfRange { zone: 61 })
        );
    }

    #[test]
    fn origin_of_zone() {
        let p = ProjectedCoordinate::from_geodetic(-3.0, 0.0).unwrap();
        assert_eq!(p.zone, 30);
        assert!((p.easting - 500_000.0).abs() < 1e-6, "{p:?}");
        assert!(p.northing.abs() < 1e-6, "{p:?}");
    }

    #[test]
    fn central_meridian_at_45_degrees() {
        let p = ProjectedCoordinate::from_geodetic(-75.0, 45.0).unwrap();
        assert_eq!(p.zone, 18);
        assert!((p.easting - 500_000.0).abs() < 1e-6, "{p:?}");
        assert!((p.northing - 4_982_950.4).abs() < 1.0, "{p:?}");
    }

    #[test]
    fn seoul_city_hall() {
        let p = ProjectedCoordinate::from_geodetic(126.978, 37.5665).unwrap();
        assert_eq!(p.zone, 52);
        assert!((p.easting - 321_424.286).abs() < 0.01, "{p:?}");
        assert!((p.northing - 4_159_640.641).abs() < 0.01, "{p:?}");
    }

    #[test]
    fn symmetric_about_central_meridian() {
        let east = ProjectedCoordinate::from_geodetic(129.0 + 1.5, 37.5).unwrap();
        let west = ProjectedCoordinate::from_geodetic(129.0 - 1.5, 37.5).unwrap();
        assert!((east.easting - 500_000.0 - (500_000.0 - west.easting)).abs() < 1e-6);
        assert!((east.northing - west.northing).abs() < 1e-6);
        assert!(east.easting > 500_000.0);
    }

    #[test]
    fn southern_hemisphere_is_negative() {
        let p = ProjectedCoordinate::from_geodetic(151.2, -33.9).unwrap();
        assert_eq!(p.zone, 56);
        assert!(p.northing < 0.0);
    }

    #[test]
    fn invalid_input() {
        assert_eq!(
            ProjectedCoordinate::from_geodetic(f64::NAN, 0.0),
            Err(ProjectionError::NonFinite)
        );
        assert_eq!(
            ProjectedCoordinate::from_geodetic(10.0, f64::INFINITY),
            Err(ProjectionError::NonFinite)
        );
        assert_eq!(
            ProjectedCoordinate::from_geodetic(10.0, 91.0),
            Err(ProjectionError::LatitudeOutOfRange { lat: 91.0 })
        );
        assert_eq!(
            ProjectedCoordinate::in_zone(0, 10.0, 10.0),
            Err(ProjectionError::ZoneOutOfRange { zone: 0 })
        );
    }

    #[test]
    fn zone_of_base_longitude() {
        // Right on a zone edge, the high precision longitude still projects in
        // the zone of the base longitude
        let p = ProjectedCoordinate::from_geodetic_in_zone_of(0.0, -0.000_000_01, 10.0).unwrap();
        assert_eq!(p.zone, 31);
        assert!(p.easting < 500_000.0);
    }

    #[test]
    fn covariance_from_accuracy() {
        let cov = Covariance::from_accuracy(2.0, 3.0);
        assert_eq!(cov.diagonal(), [2.0, 2.0, 3.0]);
        assert_eq!(
            cov.row_major(),
            [2.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0]
        );
    }
}
