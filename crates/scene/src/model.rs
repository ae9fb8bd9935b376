use foundation::geo::LatLng;
use foundation::ids::{ExpeditionId, PlaceId};
use foundation::sequence::Sequenced;

/// Expedition metadata carried on every marker and route record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpeditionHeader {
    pub id: ExpeditionId,
    pub name: String,
    pub leader: String,
    pub start_date: String,
    pub end_date: String,
}

/// One point of an expedition route.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RoutePoint {
    pub coord: LatLng,
    pub sequence: u32,
}

impl Sequenced for RoutePoint {
    fn sequence(&self) -> u32 {
        self.sequence
    }
}

/// Metadata of one image attached to a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMeta {
    pub file_name: String,
    pub description: String,
    pub creator: String,
    pub source: String,
}

/// A place visited by an expedition.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub expedition: ExpeditionHeader,
    pub place_id: PlaceId,
    pub coord: LatLng,
    pub sequence: u32,
    pub name: String,
    pub date: String,
    pub info: String,
    pub source: String,
    pub images: Vec<ImageMeta>,
}

impl Sequenced for Marker {
    fn sequence(&self) -> u32 {
        self.sequence
    }
}

/// Drawable shape of an expedition route.
///
/// A route that stays clear of the antimeridian is a single polyline; a
/// route that crosses it is split into runs that are each safe to render
/// without wrapping around the map.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutePath {
    Single(Vec<LatLng>),
    Split(Vec<Vec<LatLng>>),
}

impl RoutePath {
    /// The drawable runs, one slice per polyline segment.
    pub fn segments(&self) -> Vec<&[LatLng]> {
        match self {
            RoutePath::Single(points) => vec![points.as_slice()],
            RoutePath::Split(runs) => runs.iter().map(|r| r.as_slice()).collect(),
        }
    }

    pub fn total_points(&self) -> usize {
        self.segments().iter().map(|s| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_points() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::RoutePath;
    use foundation::geo::LatLng;

    #[test]
    fn single_path_yields_one_segment() {
        let path = RoutePath::Single(vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)]);
        assert_eq!(path.segments().len(), 1);
        assert_eq!(path.total_points(), 2);
    }

    #[test]
    fn split_path_yields_all_runs() {
        let path = RoutePath::Split(vec![
            vec![LatLng::new(0.0, 179.0), LatLng::new(0.0, 180.0)],
            vec![LatLng::new(0.0, -179.0)],
        ]);
        assert_eq!(path.segments().len(), 2);
        assert_eq!(path.total_points(), 3);
        assert!(!path.is_empty());
    }

    #[test]
    fn empty_single_is_empty() {
        assert!(RoutePath::Single(Vec::new()).is_empty());
    }
}
