use foundation::geo::{LatLng, shift_longitude};
use scene::entity::EntityId;
use scene::map::MapScene;
use scene::model::RoutePath;

/// Longitude offsets of the two world copies spawned per drawable.
pub const WORLD_COPY_OFFSETS: [f64; 2] = [360.0, -360.0];

/// Spawns world copies of one expedition's rendered geometry.
///
/// Every marker and every route segment gets two additional renderings,
/// shifted by +360° and −360° longitude, so panning across the map seam
/// shows the expedition on every copy of the world. Copies carry the same
/// color, icon and detail payload as their original: activating a copy
/// behaves exactly like activating the original. Coordinates are copied
/// by value; the original drawables are never touched.
///
/// Together with the original, exactly three renderings of every drawable
/// exist afterwards. Replication does not deduplicate, so it must be
/// called exactly once per load.
pub fn replicate_expedition(
    scene: &mut MapScene,
    markers: &[EntityId],
    route: Option<EntityId>,
) -> Vec<EntityId> {
    let mut copies = Vec::new();

    for entity in markers {
        let Some(original) = scene.marker(*entity).cloned() else {
            continue;
        };
        for delta in WORLD_COPY_OFFSETS {
            copies.push(scene.add_marker(
                shift_longitude(original.coord, delta),
                original.color,
                original.data.clone(),
            ));
        }
    }

    let Some(route) = route else {
        return copies;
    };
    let Some(original) = scene.polyline(route).cloned() else {
        return copies;
    };
    for delta in WORLD_COPY_OFFSETS {
        copies.push(scene.add_polyline(
            shifted_path(&original.path, delta),
            original.color,
            original.header.clone(),
        ));
    }

    copies
}

fn shifted_path(path: &RoutePath, delta: f64) -> RoutePath {
    let shift_run = |run: &[LatLng]| -> Vec<LatLng> {
        run.iter().map(|p| shift_longitude(*p, delta)).collect()
    };
    match path {
        RoutePath::Single(points) => RoutePath::Single(shift_run(points)),
        RoutePath::Split(runs) => {
            RoutePath::Split(runs.iter().map(|run| shift_run(run)).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{WORLD_COPY_OFFSETS, replicate_expedition};
    use foundation::geo::{LatLng, shift_longitude};
    use foundation::ids::{ExpeditionId, PlaceId};
    use scene::detail::DetailPanel;
    use scene::map::MapScene;
    use scene::model::{ExpeditionHeader, Marker, RoutePath};

    fn header() -> ExpeditionHeader {
        ExpeditionHeader {
            id: ExpeditionId(1),
            name: "Fram Expedition".to_string(),
            leader: "F. Nansen".to_string(),
            start_date: "1893-06-24".to_string(),
            end_date: "1896-08-13".to_string(),
        }
    }

    fn marker(lat: f64, lng: f64, sequence: u32) -> Marker {
        Marker {
            expedition: header(),
            place_id: PlaceId(sequence),
            coord: LatLng::new(lat, lng),
            sequence,
            name: format!("station {sequence}"),
            date: "1893-07-01".to_string(),
            info: String::new(),
            source: String::new(),
            images: Vec::new(),
        }
    }

    #[test]
    fn each_marker_gets_two_copies() {
        let mut scene = MapScene::new();
        let data = marker(5.0, 170.0, 1);
        let original = scene.add_marker(data.coord, "#a93226", data);

        let copies = replicate_expedition(&mut scene, &[original], None);
        assert_eq!(copies.len(), 2);
        assert_eq!(scene.markers().count(), 3);

        let longitudes: Vec<f64> = copies
            .iter()
            .map(|e| scene.marker(*e).expect("copy").coord.lng)
            .collect();
        assert_eq!(longitudes, vec![530.0, -190.0]);

        // The original is untouched.
        assert_eq!(scene.marker(original).expect("original").coord.lng, 170.0);
    }

    #[test]
    fn copies_activate_like_the_original() {
        let mut scene = MapScene::new();
        let data = marker(5.0, 170.0, 2);
        let original = scene.add_marker(data.coord, "#a93226", data);
        let copies = replicate_expedition(&mut scene, &[original], None);

        let mut from_original = DetailPanel::new();
        from_original.activate(&scene, original);
        for copy in copies {
            let mut from_copy = DetailPanel::new();
            from_copy.activate(&scene, copy);
            assert_eq!(from_copy, from_original);
        }
    }

    #[test]
    fn single_route_copies_shift_every_point() {
        let mut scene = MapScene::new();
        let path = RoutePath::Single(vec![LatLng::new(0.0, 10.0), LatLng::new(1.0, 20.0)]);
        let route = scene.add_polyline(path, "#a93226", header());

        let copies = replicate_expedition(&mut scene, &[], Some(route));
        assert_eq!(copies.len(), 2);
        assert_eq!(scene.polylines().count(), 3);

        let plus = scene.polyline(copies[0]).expect("copy");
        match &plus.path {
            RoutePath::Single(points) => {
                assert_eq!(points[0], LatLng::new(0.0, 370.0));
                assert_eq!(points[1], LatLng::new(1.0, 380.0));
            }
            RoutePath::Split(_) => panic!("shape must be preserved"),
        }
    }

    #[test]
    fn split_route_copies_preserve_runs() {
        let mut scene = MapScene::new();
        let path = RoutePath::Split(vec![
            vec![LatLng::new(10.0, 170.0), LatLng::new(11.0, -180.0), LatLng::new(11.0, 180.0)],
            vec![LatLng::new(12.0, -170.0)],
        ]);
        let route = scene.add_polyline(path.clone(), "#a93226", header());

        let copies = replicate_expedition(&mut scene, &[], Some(route));
        let minus = scene.polyline(copies[1]).expect("copy");
        match &minus.path {
            RoutePath::Split(runs) => {
                assert_eq!(runs.len(), 2);
                assert_eq!(runs[0][0], LatLng::new(10.0, -190.0));
                assert_eq!(runs[1][0], LatLng::new(12.0, -530.0));
            }
            RoutePath::Single(_) => panic!("shape must be preserved"),
        }

        // Source path unchanged.
        assert_eq!(scene.polyline(route).expect("original").path, path);
    }

    #[test]
    fn unshifting_a_copy_recovers_the_original_coordinate() {
        let mut scene = MapScene::new();
        let data = marker(-33.5, 151.2, 1);
        let original_coord = data.coord;
        let original = scene.add_marker(data.coord, "#a93226", data);

        let copies = replicate_expedition(&mut scene, &[original], None);
        let plus = scene.marker(copies[0]).expect("copy").coord;
        let back = shift_longitude(plus, -WORLD_COPY_OFFSETS[0]);
        assert!((back.lat - original_coord.lat).abs() <= 1e-12);
        assert!((back.lng - original_coord.lng).abs() <= 1e-12);
    }
}
