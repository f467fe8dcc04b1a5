use crate::models::driver::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance in kilometers on a spherical Earth model.
///
/// All three distance terms of the match score go through this one function,
/// so the comparison across parcels stays consistent regardless of the
/// absolute model choice.
pub fn great_circle_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let (lat_a, lat_b) = (a.lat.to_radians(), b.lat.to_radians());
    let half_dlat = (b.lat - a.lat).to_radians() / 2.0;
    let half_dlng = (b.lng - a.lng).to_radians() / 2.0;

    let h = half_dlat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_dlng.sin().powi(2);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * central_angle
}

#[cfg(test)]
mod tests {
    use super::great_circle_km;
    use crate::models::driver::GeoPoint;

    #[test]
    fn identical_points_have_zero_distance() {
        let p = GeoPoint {
            lat: 12.9716,
            lng: 77.5946,
        };
        assert!(great_circle_km(&p, &p) < 1e-9);
    }

    #[test]
    fn bengaluru_to_mumbai_is_around_845_km() {
        let bengaluru = GeoPoint {
            lat: 12.9716,
            lng: 77.5946,
        };
        let mumbai = GeoPoint {
            lat: 19.0760,
            lng: 72.8777,
        };
        let distance = great_circle_km(&bengaluru, &mumbai);
        assert!((distance - 845.0).abs() < 5.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint {
            lat: 12.90,
            lng: 77.60,
        };
        let b = GeoPoint {
            lat: 13.50,
            lng: 78.20,
        };
        let forward = great_circle_km(&a, &b);
        let backward = great_circle_km(&b, &a);
        assert!((forward - backward).abs() < 1e-9);
    }
}
