use foundation::ordinal::ordinal;

use crate::entity::EntityId;
use crate::map::MapScene;
use crate::model::ImageMeta;

/// Expedition section of the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpeditionDetail {
    pub name: String,
    pub leader: String,
    pub start_date: String,
    pub end_date: String,
}

/// Place section of the detail view, shown when a marker is activated.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetail {
    pub name: String,
    /// e.g. "3rd station of Discovery Expedition".
    pub station_label: String,
    pub date: String,
    pub info: String,
    pub source: String,
    pub images: Vec<ImageMeta>,
}

/// Shared detail-view model, filled when a drawable is activated.
///
/// Activating a marker fills both sections; activating a route fills the
/// expedition section and clears the place section. World copies carry
/// the same data as their original, so any copy activates identically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailPanel {
    pub expedition: Option<ExpeditionDetail>,
    pub place: Option<PlaceDetail>,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.expedition = None;
        self.place = None;
    }

    /// Fills the panel from the drawable behind `entity`.
    ///
    /// Returns `false` when the scene does not know the entity; the panel
    /// is left untouched in that case.
    pub fn activate(&mut self, scene: &MapScene, entity: EntityId) -> bool {
        if let Some(marker) = scene.marker(entity) {
            let exp = &marker.data.expedition;
            self.expedition = Some(ExpeditionDetail {
                name: exp.name.clone(),
                leader: exp.leader.clone(),
                start_date: exp.start_date.clone(),
                end_date: exp.end_date.clone(),
            });
            self.place = Some(PlaceDetail {
                name: marker.data.name.clone(),
                station_label: format!(
                    "{} station of {}",
                    ordinal(marker.data.sequence),
                    exp.name
                ),
                date: marker.data.date.clone(),
                info: marker.data.info.clone(),
                source: marker.data.source.clone(),
                images: marker.data.images.clone(),
            });
            return true;
        }

        if let Some(polyline) = scene.polyline(entity) {
            self.expedition = Some(ExpeditionDetail {
                name: polyline.header.name.clone(),
                leader: polyline.header.leader.clone(),
                start_date: polyline.header.start_date.clone(),
                end_date: polyline.header.end_date.clone(),
            });
            self.place = None;
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::DetailPanel;
    use crate::entity::EntityId;
    use crate::map::MapScene;
    use crate::model::{ExpeditionHeader, Marker, RoutePath};
    use foundation::geo::LatLng;
    use foundation::ids::{ExpeditionId, PlaceId};

    fn scene_with_marker(sequence: u32) -> (MapScene, EntityId) {
        let mut scene = MapScene::new();
        let marker = Marker {
            expedition: ExpeditionHeader {
                id: ExpeditionId(1),
                name: "Discovery Expedition".to_string(),
                leader: "R. F. Scott".to_string(),
                start_date: "1901-08-06".to_string(),
                end_date: "1904-09-01".to_string(),
            },
            place_id: PlaceId(4),
            coord: LatLng::new(-77.8, 166.7),
            sequence,
            name: "Hut Point".to_string(),
            date: "1902-02-08".to_string(),
            info: "Winter quarters".to_string(),
            source: "expedition diary".to_string(),
            images: Vec::new(),
        };
        let entity = scene.add_marker(marker.coord, "#a93226", marker);
        (scene, entity)
    }

    #[test]
    fn marker_activation_fills_both_sections() {
        let (scene, entity) = scene_with_marker(3);
        let mut panel = DetailPanel::new();
        assert!(panel.activate(&scene, entity));

        let exp = panel.expedition.expect("expedition section");
        assert_eq!(exp.leader, "R. F. Scott");

        let place = panel.place.expect("place section");
        assert_eq!(place.name, "Hut Point");
        assert_eq!(place.station_label, "3rd station of Discovery Expedition");
    }

    #[test]
    fn route_activation_clears_place_section() {
        let (mut scene, marker_entity) = scene_with_marker(1);
        let route_entity = scene.add_polyline(
            RoutePath::Single(vec![LatLng::new(-77.8, 166.7)]),
            "#a93226",
            scene.marker(marker_entity).expect("marker").data.expedition.clone(),
        );

        let mut panel = DetailPanel::new();
        panel.activate(&scene, marker_entity);
        assert!(panel.place.is_some());

        panel.activate(&scene, route_entity);
        assert!(panel.place.is_none());
        assert_eq!(
            panel.expedition.expect("expedition section").name,
            "Discovery Expedition"
        );
    }

    #[test]
    fn unknown_entity_leaves_panel_untouched() {
        let (scene, entity) = scene_with_marker(1);
        let mut panel = DetailPanel::new();
        panel.activate(&scene, entity);
        let before = panel.clone();

        assert!(!panel.activate(&scene, EntityId(999)));
        assert_eq!(panel, before);
    }
}
