//! Great-circle distance between coordinates.

use crate::domain::Coordinate;

/// Mean Earth radius used by the Haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometres.
///
/// # Examples
///
/// ```
/// use trip_server::domain::Coordinate;
/// use trip_server::geo::haversine_km;
///
/// let paris = Coordinate::new(48.8566, 2.3522).unwrap();
/// let london = Coordinate::new(51.5074, -0.1278).unwrap();
///
/// let d = haversine_km(paris, london);
/// assert!((d - 343.5).abs() < 1.0);
/// ```
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lng = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn identical_points_are_zero() {
        let alger = coord(36.7538, 3.0588);
        assert_eq!(haversine_km(alger, alger), 0.0);
    }

    #[test]
    fn known_distances() {
        // Alger to Oran, roughly 350 km
        let d = haversine_km(coord(36.7538, 3.0588), coord(35.6971, -0.6308));
        assert!((d - 351.0).abs() < 5.0, "got {d}");

        // One degree of longitude on the equator
        let d = haversine_km(coord(0.0, 0.0), coord(0.0, 1.0));
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn antipodal_is_half_circumference() {
        let d = haversine_km(coord(0.0, 0.0), coord(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
