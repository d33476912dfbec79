//! Projected grid coordinates to geographic latitude/longitude.
//!
//! The tourism API reports positions as `mapx`/`mapy` strings holding a
//! planar coordinate multiplied by [`COORDINATE_SCALE`]. The planar system is
//! the Korean central-belt Transverse Mercator grid (EPSG:5181):
//!
//! | Parameter           | Value              |
//! |---------------------|--------------------|
//! | Latitude of origin  | 38°                |
//! | Central meridian    | 127.5°             |
//! | Scale factor        | 1.0                |
//! | False easting       | 200 000 m          |
//! | False northing      | 500 000 m          |
//! | Ellipsoid           | GRS80              |
//!
//! The inverse uses the closed-form footpoint-latitude series (Snyder,
//! *Map Projections: A Working Manual*, eqs. 8-18 to 8-25). No iteration, no
//! range checks: any finite input produces a finite output.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Divisor that turns an upstream `mapx`/`mapy` string into metres.
pub const COORDINATE_SCALE: f64 = 10_000_000.0;

/// GRS80 semi-major axis in metres.
const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
/// GRS80 inverse flattening.
const INVERSE_FLATTENING: f64 = 298.257_222_101;

const LATITUDE_OF_ORIGIN_DEG: f64 = 38.0;
const CENTRAL_MERIDIAN_DEG: f64 = 127.5;
const SCALE_FACTOR: f64 = 1.0;
const FALSE_EASTING: f64 = 200_000.0;
const FALSE_NORTHING: f64 = 500_000.0;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A planar position in metres on the projected grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
}

/// Convert upstream `mapx`/`mapy` strings into latitude/longitude.
///
/// Fails with [`CoreError::InvalidCoordinate`] when either string is not a
/// finite number, or when the result is not finite.
pub fn projected_to_geographic(map_x: &str, map_y: &str) -> Result<GeoPoint, CoreError> {
    let invalid = || CoreError::InvalidCoordinate {
        map_x: map_x.to_string(),
        map_y: map_y.to_string(),
    };

    let x = parse_finite(map_x).ok_or_else(invalid)? / COORDINATE_SCALE;
    let y = parse_finite(map_y).ok_or_else(invalid)? / COORDINATE_SCALE;

    let point = grid_to_geographic(GridPoint { x, y });
    if point.lat.is_finite() && point.lng.is_finite() {
        Ok(point)
    } else {
        Err(invalid())
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Ellipsoid helpers
// ---------------------------------------------------------------------------

struct Ellipsoid {
    a: f64,
    /// First eccentricity squared.
    e2: f64,
    /// Second eccentricity squared.
    ep2: f64,
}

fn grs80() -> Ellipsoid {
    let f = 1.0 / INVERSE_FLATTENING;
    let e2 = 2.0 * f - f * f;
    Ellipsoid {
        a: SEMI_MAJOR_AXIS,
        e2,
        ep2: e2 / (1.0 - e2),
    }
}

impl Ellipsoid {
    /// Leading coefficient of the meridian-arc series.
    fn arc_coefficient(&self) -> f64 {
        let e2 = self.e2;
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0
    }

    /// Meridian arc length from the equator to latitude `phi` (radians).
    fn meridian_arc(&self, phi: f64) -> f64 {
        let e2 = self.e2;
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        self.a
            * (self.arc_coefficient() * phi
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Inverse Transverse Mercator: grid metres to latitude/longitude.
pub fn grid_to_geographic(point: GridPoint) -> GeoPoint {
    let ell = grs80();
    let (e2, ep2, a) = (ell.e2, ell.ep2, ell.a);

    let m0 = ell.meridian_arc(LATITUDE_OF_ORIGIN_DEG.to_radians());
    let m = m0 + (point.y - FALSE_NORTHING) / SCALE_FACTOR;
    let mu = m / (a * ell.arc_coefficient());

    let root = (1.0 - e2).sqrt();
    let e1 = (1.0 - root) / (1.0 + root);
    let e1_2 = e1 * e1;
    let e1_3 = e1_2 * e1;
    let e1_4 = e1_3 * e1;

    // Footpoint latitude.
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin();

    let (sin1, cos1) = phi1.sin_cos();
    let tan1 = sin1 / cos1;
    let c1 = ep2 * cos1 * cos1;
    let t1 = tan1 * tan1;
    let w = 1.0 - e2 * sin1 * sin1;
    let n1 = a / w.sqrt();
    let r1 = a * (1.0 - e2) / w.powf(1.5);
    let d = (point.x - FALSE_EASTING) / (n1 * SCALE_FACTOR);
    let d2 = d * d;
    let d4 = d2 * d2;
    let d6 = d4 * d2;

    let phi = phi1
        - (n1 * tan1 / r1)
            * (d2 / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d4 / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                    * d6
                    / 720.0);

    let lambda = CENTRAL_MERIDIAN_DEG.to_radians()
        + (d - (1.0 + 2.0 * t1 + c1) * d2 * d / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1) * d4 * d
                / 120.0)
            / cos1;

    GeoPoint {
        lat: phi.to_degrees(),
        lng: lambda.to_degrees(),
    }
}

/// Forward Transverse Mercator: latitude/longitude to grid metres.
///
/// Shares every parameter with [`grid_to_geographic`]; used to check that
/// the pair round-trips.
pub fn geographic_to_grid(point: GeoPoint) -> GridPoint {
    let ell = grs80();
    let (e2, ep2, a) = (ell.e2, ell.ep2, ell.a);

    let phi = point.lat.to_radians();
    let (sin, cos) = phi.sin_cos();
    let tan = sin / cos;
    let n = a / (1.0 - e2 * sin * sin).sqrt();
    let t = tan * tan;
    let c = ep2 * cos * cos;
    let big_a = (point.lng - CENTRAL_MERIDIAN_DEG).to_radians() * cos;
    let a2 = big_a * big_a;
    let a3 = a2 * big_a;
    let a4 = a2 * a2;
    let a5 = a4 * big_a;
    let a6 = a4 * a2;

    let m = ell.meridian_arc(phi);
    let m0 = ell.meridian_arc(LATITUDE_OF_ORIGIN_DEG.to_radians());

    let x = FALSE_EASTING
        + SCALE_FACTOR
            * n
            * (big_a
                + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0);
    let y = FALSE_NORTHING
        + SCALE_FACTOR
            * (m - m0
                + n * tan
                    * (a2 / 2.0
                        + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                        + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));

    GridPoint { x, y }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const DEG_TOLERANCE: f64 = 1e-7;

    fn encode(metres: f64) -> String {
        format!("{:.0}", metres * COORDINATE_SCALE)
    }

    #[test]
    fn false_origin_maps_to_projection_origin() {
        let point = projected_to_geographic(&encode(200_000.0), &encode(500_000.0)).unwrap();
        assert!((point.lat - 38.0).abs() < DEG_TOLERANCE, "lat {}", point.lat);
        assert!((point.lng - 127.5).abs() < DEG_TOLERANCE, "lng {}", point.lng);
    }

    /// Grid positions computed independently with the Krüger n-series on
    /// the same grid definition.
    const REFERENCES: [(GeoPoint, GridPoint); 2] = [
        // Seoul City Hall.
        (
            GeoPoint { lat: 37.5665, lng: 126.9780 },
            GridPoint { x: 153_882.7184, y: 452_012.8861 },
        ),
        // Busan City Hall area.
        (
            GeoPoint { lat: 35.1796, lng: 129.0756 },
            GridPoint { x: 343_524.7896, y: 188_157.2450 },
        ),
    ];

    #[test]
    fn reference_grid_points_invert_to_known_positions() {
        for (geo, grid) in REFERENCES {
            let point = projected_to_geographic(&encode(grid.x), &encode(grid.y)).unwrap();
            assert!((point.lat - geo.lat).abs() < 1e-8, "{grid:?} -> {point:?}");
            assert!((point.lng - geo.lng).abs() < 1e-8, "{grid:?} -> {point:?}");
        }
    }

    #[test]
    fn known_positions_project_to_reference_grid_points() {
        for (geo, grid) in REFERENCES {
            let projected = geographic_to_grid(geo);
            assert!((projected.x - grid.x).abs() < 0.01, "{geo:?} -> {projected:?}");
            assert!((projected.y - grid.y).abs() < 0.01, "{geo:?} -> {projected:?}");
        }
    }

    #[test]
    fn forward_then_inverse_round_trips() {
        let samples = [
            GeoPoint { lat: 37.5665, lng: 126.9780 },
            GeoPoint { lat: 35.1796, lng: 129.0756 },
            GeoPoint { lat: 33.4996, lng: 126.5312 },
            GeoPoint { lat: 38.2070, lng: 128.5918 },
        ];
        for sample in samples {
            let grid = geographic_to_grid(sample);
            let back = grid_to_geographic(grid);
            assert!((back.lat - sample.lat).abs() < 1e-6, "{sample:?} -> {back:?}");
            assert!((back.lng - sample.lng).abs() < 1e-6, "{sample:?} -> {back:?}");
        }
    }

    #[test]
    fn one_degree_east_on_origin_parallel_is_about_88_km() {
        let grid = geographic_to_grid(GeoPoint { lat: 38.0, lng: 128.5 });
        let offset = grid.x - FALSE_EASTING;
        assert!((87_000.0..88_500.0).contains(&offset), "offset {offset}");
    }

    #[test]
    fn north_of_origin_increases_latitude() {
        let north = grid_to_geographic(GridPoint { x: 200_000.0, y: 600_000.0 });
        assert!(north.lat > 38.0);
        assert!((north.lng - 127.5).abs() < DEG_TOLERANCE);
    }

    #[test]
    fn zero_and_negative_inputs_do_not_fail() {
        let zero = projected_to_geographic("0", "0").unwrap();
        assert!(zero.lat.is_finite() && zero.lng.is_finite());

        let negative = projected_to_geographic("-1000000000000", "-2000000000000").unwrap();
        assert!(negative.lat.is_finite() && negative.lng.is_finite());
    }

    #[test]
    fn points_outside_korea_are_still_transformed() {
        // 0.1 m after scaling, i.e. far west/south of the false origin.
        let far = projected_to_geographic("1", "1").unwrap();
        assert!(far.lat < 38.0);
        assert!(far.lng < 127.5);
    }

    #[test]
    fn transform_is_pure() {
        let a = projected_to_geographic("1982345678901", "4512345678901").unwrap();
        let b = projected_to_geographic("1982345678901", "4512345678901").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert!(projected_to_geographic(" 2000000000000 ", "5000000000000\n").is_ok());
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        let err = projected_to_geographic("abc", "5000000000000").unwrap_err();
        assert_matches!(err, CoreError::InvalidCoordinate { ref map_x, .. } if map_x == "abc");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_matches!(
            projected_to_geographic("", ""),
            Err(CoreError::InvalidCoordinate { .. })
        );
    }

    #[test]
    fn nan_and_infinity_are_rejected() {
        assert_matches!(
            projected_to_geographic("NaN", "1"),
            Err(CoreError::InvalidCoordinate { .. })
        );
        assert_matches!(
            projected_to_geographic("1", "inf"),
            Err(CoreError::InvalidCoordinate { .. })
        );
    }
}
