use foundation::geo::{LatLng, dateline_crossing_latitude};
use scene::model::{RoutePath, RoutePoint};

/// Splitting failed because the route crosses the antimeridian more than
/// once. Whether any real expedition does this is unresolved; until it
/// is, multiple crossings are an explicit error rather than a silently
/// mis-rendered polyline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    MultipleCrossings { count: usize },
}

impl std::fmt::Display for SplitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitError::MultipleCrossings { count } => {
                write!(f, "route crosses the antimeridian {count} times, at most one crossing is supported")
            }
        }
    }
}

impl std::error::Error for SplitError {}

/// Splits an ordered route at the antimeridian.
///
/// Consecutive points whose longitudes differ by more than 180° cross the
/// ±180° line; drawing through them would wrap the polyline around the
/// whole map. At the crossing, two synthetic boundary points
/// `(cross_lat, -180)` and `(cross_lat, 180)` are appended to the first
/// run and the remaining points start a second run.
///
/// Routes of length 0 or 1 come back as a single run unchanged. Split
/// positions are accumulated as a list, but more than one crossing is
/// reported as an error instead of a truncated path.
pub fn split_route(points: &[RoutePoint]) -> Result<RoutePath, SplitError> {
    let mut coords: Vec<LatLng> = Vec::with_capacity(points.len() + 2);
    let mut splits: Vec<usize> = Vec::new();

    for (i, point) in points.iter().enumerate() {
        coords.push(point.coord);
        let Some(next) = points.get(i + 1) else {
            continue;
        };

        let diff = point.coord.lng - next.coord.lng;
        if diff.abs() > 180.0 {
            let lat = dateline_crossing_latitude(point.coord, next.coord);
            coords.push(LatLng::new(lat, -180.0));
            coords.push(LatLng::new(lat, 180.0));
            // The next original point starts the following run.
            splits.push(coords.len());
        }
    }

    match splits.as_slice() {
        [] => Ok(RoutePath::Single(coords)),
        [at] => Ok(RoutePath::Split(vec![
            coords[..*at].to_vec(),
            coords[*at..].to_vec(),
        ])),
        many => Err(SplitError::MultipleCrossings { count: many.len() }),
    }
}
