/// Geographic coordinate in degrees.
///
/// `lat` is clamped to [-90, 90] by every producer in this workspace.
/// `lng` is deliberately NOT normalized to [-180, 180]: world copies of
/// map geometry carry longitudes shifted by multiples of 360 so that a
/// horizontally repeating map shows the same data at every wrap.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Returns a new coordinate with `delta` degrees added to the longitude.
///
/// The input is taken by value and never mutated; world copies must not
/// alias the coordinates of the geometry they were copied from.
pub fn shift_longitude(coord: LatLng, delta: f64) -> LatLng {
    LatLng::new(coord.lat, coord.lng + delta)
}

/// Latitude at which the great-circle segment between two consecutive
/// route points crosses the ±180° meridian.
///
/// Precondition: the two longitudes differ by more than 180° in absolute
/// value, i.e. the segment actually crosses the antimeridian.
///
/// Both points are mapped onto the unit sphere, the chord between them is
/// parametrized, and the parameter where the Cartesian y component (the
/// sine-of-longitude term) vanishes is solved for. The latitude is then
/// recovered from the interpolated (x, z). Swapping the arguments yields
/// the same latitude.
pub fn dateline_crossing_latitude(p1: LatLng, p2: LatLng) -> f64 {
    debug_assert!(
        (p1.lng - p2.lng).abs() > 180.0,
        "segment does not cross the antimeridian"
    );

    let (x1, y1, z1) = unit_sphere(p1);
    let (x2, y2, z2) = unit_sphere(p2);

    // Chord P(t) = (1 - t) * P1 + t * P2; y(t) = 0 at the crossing.
    let t = y1 / (y1 - y2);
    let x = (1.0 - t) * x1 + t * x2;
    let z = (1.0 - t) * z1 + t * z2;

    // y = 0 on the ±180 meridian, so the horizontal radius is |x|.
    z.atan2(x.abs()).to_degrees()
}

fn unit_sphere(p: LatLng) -> (f64, f64, f64) {
    let lat = p.lat.to_radians();
    let lng = p.lng.to_radians();
    (
        lat.cos() * lng.cos(),
        lat.cos() * lng.sin(),
        lat.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::{LatLng, dateline_crossing_latitude, shift_longitude};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn shift_returns_new_value() {
        let original = LatLng::new(5.0, 170.0);
        let shifted = shift_longitude(original, 360.0);
        assert_close(shifted.lat, 5.0, 0.0);
        assert_close(shifted.lng, 530.0, 0.0);
        assert_close(original.lng, 170.0, 0.0);
    }

    #[test]
    fn shift_round_trips() {
        let original = LatLng::new(-33.5, 151.2);
        let back = shift_longitude(shift_longitude(original, 360.0), -360.0);
        assert_close(back.lat, original.lat, 1e-12);
        assert_close(back.lng, original.lng, 1e-12);
    }

    #[test]
    fn crossing_latitude_lies_between_endpoints() {
        let lat = dateline_crossing_latitude(LatLng::new(10.0, 170.0), LatLng::new(12.0, -170.0));
        assert!(lat > 10.0 && lat < 12.0, "got {lat}");
    }

    #[test]
    fn crossing_latitude_is_symmetric() {
        let a = LatLng::new(10.0, 170.0);
        let b = LatLng::new(12.0, -170.0);
        let forward = dateline_crossing_latitude(a, b);
        let backward = dateline_crossing_latitude(b, a);
        assert_close(forward, backward, 1e-12);
    }

    #[test]
    fn crossing_at_equal_latitudes_stays_above_the_parallel() {
        // A great circle between two points on the same parallel bulges
        // poleward, so the crossing latitude exceeds the endpoints'.
        let lat = dateline_crossing_latitude(LatLng::new(40.0, 170.0), LatLng::new(40.0, -170.0));
        assert!(lat > 40.0, "got {lat}");
        assert!(lat < 41.0, "got {lat}");
    }

    #[test]
    fn crossing_in_southern_hemisphere() {
        let lat = dateline_crossing_latitude(LatLng::new(-20.0, 175.0), LatLng::new(-24.0, -178.0));
        assert!(lat < -20.0 && lat > -24.0, "got {lat}");
    }
}
