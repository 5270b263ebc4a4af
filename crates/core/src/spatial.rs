//! Distance and placement helpers.
//!
//! Two models live side by side here. Collection uses a proper surface
//! distance (haversine or geodesic), while placement perturbs raw degrees
//! with a flat meters-per-degree constant. At higher latitudes a degree of
//! longitude covers fewer meters, so placed coins bunch up east-west; that is
//! accepted for gameplay and is not corrected.

use geo::{Distance, Geodesic, Haversine, Point};
use rand::Rng;

use crate::config::DistanceMetric;

/// Great-circle distance between two points in meters.
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    Haversine.distance(p1, p2)
}

/// Ellipsoidal (WGS84) distance between two points in meters.
pub fn geodesic_distance(p1: Point, p2: Point) -> f64 {
    Geodesic.distance(p1, p2)
}

pub fn surface_distance(metric: DistanceMetric, p1: Point, p2: Point) -> f64 {
    match metric {
        DistanceMetric::Haversine => haversine_distance(p1, p2),
        DistanceMetric::Geodesic => geodesic_distance(p1, p2),
    }
}

/// Convert meters to degrees with a flat-earth constant.
pub fn meters_to_degrees_flat(meters: f64, meters_per_degree: f64) -> f64 {
    meters / meters_per_degree
}

/// Pick a random point around `center`, offsetting latitude and longitude
/// independently by up to `radius_deg` degrees.
///
/// Offsets falling outside the inscribed disc are redrawn, so the result is
/// never further than `radius_deg` (in degree space) from the center.
pub fn random_point_near<R: Rng>(center: Point, radius_deg: f64, rng: &mut R) -> Point {
    loop {
        let d_lat = (rng.random::<f64>() - 0.5) * 2.0 * radius_deg;
        let d_lng = (rng.random::<f64>() - 0.5) * 2.0 * radius_deg;

        if d_lat * d_lat + d_lng * d_lng <= radius_deg * radius_deg {
            return Point::new(center.x() + d_lng, center.y() + d_lat);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_haversine_distance() {
        // Distance from NYC to LA is approximately 3,936 km
        let nyc = Point::new(-74.0060, 40.7128);
        let la = Point::new(-118.2437, 34.0522);

        let dist = haversine_distance(nyc, la);
        assert!((dist - 3_936_000.0).abs() < 50_000.0);
    }

    #[test]
    fn test_metrics_agree_at_short_range() {
        let a = Point::new(116.3975, 39.9087);
        let b = Point::new(116.3975, 39.9087 + 8.0 / 111_000.0);

        let haversine = surface_distance(DistanceMetric::Haversine, a, b);
        let geodesic = surface_distance(DistanceMetric::Geodesic, a, b);

        assert_relative_eq!(haversine, 8.0, max_relative = 0.01);
        assert_relative_eq!(geodesic, 8.0, max_relative = 0.01);
    }

    #[test]
    fn test_meters_to_degrees_flat() {
        assert_relative_eq!(meters_to_degrees_flat(111_000.0, 111_000.0), 1.0);
        assert_relative_eq!(meters_to_degrees_flat(500.0, 111_000.0), 0.0045045, epsilon = 1e-7);
    }

    #[test]
    fn test_random_point_stays_in_disc() {
        let mut rng = StdRng::seed_from_u64(42);
        let center = Point::new(2.3522, 48.8566);
        let radius_deg = 500.0 / 111_000.0;

        for _ in 0..1_000 {
            let p = random_point_near(center, radius_deg, &mut rng);
            let d_lng = p.x() - center.x();
            let d_lat = p.y() - center.y();
            assert!(d_lat.hypot(d_lng) <= radius_deg + 1e-12);

            // The flat constant is within a percent of the real meridian length.
            assert!(geodesic_distance(center, p) <= 500.0 * 1.01);
        }
    }

    #[test]
    fn test_random_point_is_not_constant() {
        let mut rng = StdRng::seed_from_u64(1);
        let center = Point::new(0.0, 0.0);

        let a = random_point_near(center, 0.01, &mut rng);
        let b = random_point_near(center, 0.01, &mut rng);
        assert_ne!(a, b);
    }
}
