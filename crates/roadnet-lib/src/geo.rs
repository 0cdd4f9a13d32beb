//! Planar geometry and the geodetic projection used for road lengths.
//!
//! Places are located by WGS84 longitude/latitude but every distance in the
//! network is measured on a transverse Mercator (UTM-style) plane. The
//! projection is referenced to the 6-degree zone that contains each point,
//! so two places in different zones are measured across two slightly
//! different planes. That keeps the arithmetic Euclidean and is accurate for
//! small areas such as a single region; it is not a geodesic distance.

use std::f64::consts::PI;
use std::ops::{Add, Div, Mul, Sub};

use serde::Serialize;

/// UTM central meridian scale factor.
const UTM_K0: f64 = 0.9996;
/// WGS84 semi-major axis in metres.
const WGS84_A: f64 = 6_378_137.0;
/// WGS84 first eccentricity squared.
const WGS84_E2: f64 = 0.006_694_379_990_13;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Immutable pair of planar coordinates.
///
/// Ordering is lexicographic on `(x, y)`; nothing in the network orders
/// places by coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length of the vector.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Self) -> f64 {
        (*other - *self).norm()
    }

    /// Vector of length one pointing the same way. The zero vector has no
    /// direction and yields NaN components.
    pub fn unit_vector(&self) -> Self {
        *self / self.norm()
    }
}

impl Add for Point2d {
    type Output = Point2d;

    fn add(self, other: Self) -> Self {
        Point2d::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2d {
    type Output = Point2d;

    fn sub(self, other: Self) -> Self {
        Point2d::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point2d {
    type Output = Point2d;

    fn mul(self, k: f64) -> Self {
        Point2d::new(self.x * k, self.y * k)
    }
}

impl Div<f64> for Point2d {
    type Output = Point2d;

    fn div(self, k: f64) -> Self {
        Point2d::new(self.x / k, self.y / k)
    }
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Project onto the local plane, see [`project`].
    pub fn project(&self) -> Point2d {
        project(self.longitude, self.latitude)
    }
}

/// 6-degree longitude zone containing `longitude` (1-based).
pub fn utm_zone(longitude: f64) -> i32 {
    ((longitude + 180.0) / 6.0).floor() as i32 + 1
}

/// Convert a WGS84 longitude/latitude into planar metres `(easting, northing)`.
///
/// Uses the standard ellipsoidal series (meridional arc, prime vertical
/// radius of curvature, terms up to sixth order in the longitude offset)
/// around the central meridian of the point's own zone. Southern latitudes
/// receive the 10 000 km false northing.
pub fn project(longitude: f64, latitude: f64) -> Point2d {
    let lat = latitude.to_radians();
    let zone = utm_zone(longitude);
    let origin = (f64::from(zone - 1) * 6.0 - 180.0 + 3.0) * PI / 180.0;
    let lon = longitude * PI / 180.0;

    let e2 = WGS84_E2;
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    let a0 = 1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0;
    let a2 = 3.0 / 8.0 * (e2 + e4 / 4.0 + 15.0 * e6 / 128.0);
    let a4 = 15.0 / 256.0 * (e4 + 3.0 * e6 / 4.0);
    let a6 = 35.0 * e6 / 3072.0;

    let (sin_lat, cos_lat, tan_lat) = (lat.sin(), lat.cos(), lat.tan());
    let arc = WGS84_A
        * (a0 * lat - a2 * (2.0 * lat).sin() + a4 * (4.0 * lat).sin() - a6 * (6.0 * lat).sin());
    let n = WGS84_A / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let t = tan_lat * tan_lat;
    let c = e2 / (1.0 - e2) * cos_lat * cos_lat;
    let a = (lon - origin) * cos_lat;

    let x = UTM_K0
        * n
        * (a + (1.0 - t + c) * a.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * e2) * a.powi(5) / 120.0);
    let y = UTM_K0
        * (arc
            + n * tan_lat
                * (a * a / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * e2) * a.powi(6) / 720.0));

    let northing = if latitude < 0.0 {
        y + FALSE_NORTHING_SOUTH
    } else {
        y
    };
    Point2d::new(x + FALSE_EASTING, northing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_arithmetic() {
        let a = Point2d::new(3.0, 4.0);
        let b = Point2d::new(1.0, 1.0);
        assert_eq!(a + b, Point2d::new(4.0, 5.0));
        assert_eq!(a - b, Point2d::new(2.0, 3.0));
        assert_eq!(a * 2.0, Point2d::new(6.0, 8.0));
        assert_eq!(a.dot(&b), 7.0);
        assert_eq!(a.norm(), 5.0);
        assert_eq!(b.distance_to(&a), (4.0f64 + 9.0).sqrt());
        let unit = a.unit_vector();
        assert!((unit.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Point2d::new(1.0, 9.0) < Point2d::new(2.0, 0.0));
        assert!(Point2d::new(1.0, 1.0) < Point2d::new(1.0, 2.0));
    }

    #[test]
    fn zone_boundaries() {
        assert_eq!(utm_zone(-180.0), 1);
        assert_eq!(utm_zone(0.0), 31);
        assert_eq!(utm_zone(2.9), 31);
        assert_eq!(utm_zone(116.4), 50);
        assert_eq!(utm_zone(179.9), 60);
    }

    #[test]
    fn central_meridian_maps_to_false_easting() {
        // Zone 31 is centred on 3 degrees east.
        let p = project(3.0, 0.0);
        assert!((p.x - FALSE_EASTING).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn southern_hemisphere_gets_false_northing() {
        let north = project(3.0, 0.5);
        let south = project(3.0, -0.5);
        assert!(south.y > 9_000_000.0);
        assert!(north.y < 100_000.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = project(116.4, 39.0);
        let b = project(116.4, 40.0);
        let d = a.distance_to(&b);
        assert!((d - 111_000.0).abs() < 1_500.0, "got {d}");
    }

    #[test]
    fn projection_is_deterministic() {
        let a = project(121.4737, 31.2304);
        let b = project(121.4737, 31.2304);
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }
}
