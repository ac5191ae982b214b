//! Great-circle bearing toward the Kaaba.
//!
//! Pure spherical trigonometry over a pair of coordinates. No clock, no
//! I/O; callers feed a location in and hand the resulting degrees to
//! whatever surface displays them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The Kaaba in Mecca, the fixed target of every qibla computation.
pub const KAABA: GeoCoordinate = GeoCoordinate {
    latitude: 21.4225,
    longitude: 39.8262,
};

#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
pub struct InvalidCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A geographic point in degrees. Immutable once obtained; validation
/// happens at the computation boundary, not at construction, so that
/// raw device or config input can be carried around freely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn validate(&self) -> Result<(), InvalidCoordinate> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Supplies the device's position, or `None` when no position is
/// available. On unavailability the caller substitutes an alternate
/// source; the bearing math never guesses a default.
pub trait LocationSource {
    fn current_location(&self) -> Option<GeoCoordinate>;
}

/// A location pinned at configuration time.
pub struct FixedLocation(pub GeoCoordinate);

impl LocationSource for FixedLocation {
    fn current_location(&self) -> Option<GeoCoordinate> {
        Some(self.0)
    }
}

/// Initial great-circle bearing from `origin` toward `target`, in
/// degrees clockwise from true north, normalized into [0, 360).
///
/// When origin and target coincide the bearing is mathematically
/// undefined (atan2 of 0/0); the contract pins that case to 0 instead
/// of letting NaN escape.
pub fn compute_bearing(
    origin: GeoCoordinate,
    target: GeoCoordinate,
) -> Result<f64, InvalidCoordinate> {
    origin.validate()?;
    target.validate()?;

    if origin == target {
        return Ok(0.0);
    }

    let lat1 = origin.latitude.to_radians();
    let lat2 = target.latitude.to_radians();
    let delta_lon = (target.longitude - origin.longitude).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
    let theta = y.atan2(x).to_degrees();

    Ok(theta.rem_euclid(360.0))
}

/// Bearing from `origin` toward the Kaaba.
pub fn qibla_bearing(origin: GeoCoordinate) -> Result<f64, InvalidCoordinate> {
    compute_bearing(origin, KAABA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearing_always_in_range() {
        for lat in [-89.0, -45.0, 0.0, 33.7, 60.0, 89.0] {
            for lon in [-179.0, -73.0, 0.0, 31.2, 139.7, 179.0] {
                let b = qibla_bearing(GeoCoordinate::new(lat, lon)).unwrap();
                assert!(
                    (0.0..360.0).contains(&b),
                    "bearing {} out of range for ({}, {})",
                    b,
                    lat,
                    lon
                );
            }
        }
    }

    #[test]
    fn bearing_to_self_is_zero() {
        let p = GeoCoordinate::new(30.0, 31.2);
        assert_eq!(compute_bearing(p, p).unwrap(), 0.0);
        assert_eq!(compute_bearing(KAABA, KAABA).unwrap(), 0.0);
    }

    #[test]
    fn cairo_to_mecca_is_roughly_southeast() {
        let cairo = GeoCoordinate::new(30.0, 31.2);
        let b = qibla_bearing(cairo).unwrap();
        assert!((b - 136.0).abs() < 0.5, "got {}", b);
    }

    #[test]
    fn equator_eastward_is_due_east() {
        let origin = GeoCoordinate::new(0.0, 0.0);
        let east = GeoCoordinate::new(0.0, 10.0);
        let west = GeoCoordinate::new(0.0, -10.0);
        let b_east = compute_bearing(origin, east).unwrap();
        let b_west = compute_bearing(origin, west).unwrap();
        assert!((b_east - 90.0).abs() < 1e-9, "got {}", b_east);
        assert!((b_west - 270.0).abs() < 1e-9, "got {}", b_west);
    }

    #[test]
    fn due_north_and_south_on_a_meridian() {
        let origin = GeoCoordinate::new(10.0, 20.0);
        let north = GeoCoordinate::new(40.0, 20.0);
        let south = GeoCoordinate::new(-40.0, 20.0);
        assert!(compute_bearing(origin, north).unwrap().abs() < 1e-9);
        assert!((compute_bearing(origin, south).unwrap() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let bad_lat = GeoCoordinate::new(91.0, 0.0);
        let bad_lon = GeoCoordinate::new(0.0, 181.0);
        let nan = GeoCoordinate::new(f64::NAN, 0.0);
        assert!(compute_bearing(bad_lat, KAABA).is_err());
        assert!(compute_bearing(KAABA, bad_lon).is_err());
        assert!(compute_bearing(nan, KAABA).is_err());
        assert!(compute_bearing(GeoCoordinate::new(-90.0, 180.0), KAABA).is_ok());
    }

    #[test]
    fn fixed_location_source_returns_its_point() {
        let src = FixedLocation(GeoCoordinate::new(33.6938, 73.0651));
        assert_eq!(src.current_location(), Some(GeoCoordinate::new(33.6938, 73.0651)));
    }
}
