use std::collections::BTreeMap;

use foundation::assets::icon_file_name;
use foundation::geo::LatLng;
use foundation::ids::ExpeditionId;
use foundation::palette::Color;

use crate::entity::EntityId;
use crate::model::{ExpeditionHeader, Marker, RoutePath};

/// A rendered marker.
///
/// `coord` is where this drawable sits on the map; for world copies it is
/// the marker's coordinate shifted by ±360° longitude. `data` is the
/// logical marker and is shared verbatim by all renderings, so a click on
/// any copy yields the same detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDrawable {
    pub entity: EntityId,
    pub expedition: ExpeditionId,
    pub coord: LatLng,
    pub color: Color,
    pub icon: String,
    pub data: Marker,
}

/// A rendered route (one or more polyline segments).
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineDrawable {
    pub entity: EntityId,
    pub expedition: ExpeditionId,
    pub path: RoutePath,
    pub color: Color,
    pub header: ExpeditionHeader,
}

/// Owned scene state: entity id → drawable record.
///
/// This replaces the drawing-library objects the data used to be hung off
/// of; drawables are plain typed records and the scene is passed to
/// whoever needs it instead of living in module state.
///
/// Iteration order is ascending by entity id, i.e. insertion order.
#[derive(Debug, Default)]
pub struct MapScene {
    next_index: u32,
    markers: BTreeMap<EntityId, MarkerDrawable>,
    polylines: BTreeMap<EntityId, PolylineDrawable>,
}

impl MapScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn spawn(&mut self) -> EntityId {
        let id = EntityId(self.next_index);
        self.next_index += 1;
        id
    }

    /// Adds a marker drawable at `coord` backed by `data`.
    pub fn add_marker(
        &mut self,
        coord: LatLng,
        color: Color,
        data: Marker,
    ) -> EntityId {
        let entity = self.spawn();
        let expedition = data.expedition.id;
        self.markers.insert(
            entity,
            MarkerDrawable {
                entity,
                expedition,
                coord,
                color,
                icon: icon_file_name(color),
                data,
            },
        );
        entity
    }

    /// Adds a polyline drawable for `path`.
    pub fn add_polyline(
        &mut self,
        path: RoutePath,
        color: Color,
        header: ExpeditionHeader,
    ) -> EntityId {
        let entity = self.spawn();
        let expedition = header.id;
        self.polylines.insert(
            entity,
            PolylineDrawable {
                entity,
                expedition,
                path,
                color,
                header,
            },
        );
        entity
    }

    pub fn marker(&self, entity: EntityId) -> Option<&MarkerDrawable> {
        self.markers.get(&entity)
    }

    pub fn polyline(&self, entity: EntityId) -> Option<&PolylineDrawable> {
        self.polylines.get(&entity)
    }

    pub fn markers(&self) -> impl Iterator<Item = &MarkerDrawable> {
        self.markers.values()
    }

    pub fn polylines(&self) -> impl Iterator<Item = &PolylineDrawable> {
        self.polylines.values()
    }

    pub fn len(&self) -> usize {
        self.markers.len() + self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.polylines.is_empty()
    }

    /// Removes one drawable. Returns `true` if the scene changed.
    pub fn remove(&mut self, entity: EntityId) -> bool {
        self.markers.remove(&entity).is_some() || self.polylines.remove(&entity).is_some()
    }

    pub fn remove_all(&mut self, entities: &[EntityId]) {
        for entity in entities {
            self.remove(*entity);
        }
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.polylines.clear();
    }

    /// Entity ids of every drawable belonging to `expedition`, world
    /// copies included, in ascending id order.
    pub fn entities_of_expedition(&self, expedition: ExpeditionId) -> Vec<EntityId> {
        let markers = self
            .markers
            .values()
            .filter(|m| m.expedition == expedition)
            .map(|m| m.entity);
        let polylines = self
            .polylines
            .values()
            .filter(|p| p.expedition == expedition)
            .map(|p| p.entity);
        let mut out: Vec<EntityId> = markers.chain(polylines).collect();
        out.sort();
        out
    }

    /// Removes everything NOT belonging to `expedition`, returning the
    /// removed entity ids. Used by the edit workflow to isolate one
    /// expedition's geometry on the map.
    pub fn retain_expedition(&mut self, expedition: ExpeditionId) -> Vec<EntityId> {
        let mut removed = Vec::new();
        self.markers.retain(|entity, m| {
            let keep = m.expedition == expedition;
            if !keep {
                removed.push(*entity);
            }
            keep
        });
        self.polylines.retain(|entity, p| {
            let keep = p.expedition == expedition;
            if !keep {
                removed.push(*entity);
            }
            keep
        });
        removed.sort();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::MapScene;
    use crate::model::{ExpeditionHeader, Marker, RoutePath};
    use foundation::geo::LatLng;
    use foundation::ids::{ExpeditionId, PlaceId};

    fn header(id: u32) -> ExpeditionHeader {
        ExpeditionHeader {
            id: ExpeditionId(id),
            name: format!("expedition {id}"),
            leader: "A. Leader".to_string(),
            start_date: "1901-08-06".to_string(),
            end_date: "1904-09-01".to_string(),
        }
    }

    fn marker(exp: u32, seq: u32) -> Marker {
        Marker {
            expedition: header(exp),
            place_id: PlaceId(seq),
            coord: LatLng::new(seq as f64, seq as f64),
            sequence: seq,
            name: format!("place {seq}"),
            date: "1901-09-01".to_string(),
            info: String::new(),
            source: String::new(),
            images: Vec::new(),
        }
    }

    #[test]
    fn add_and_look_up() {
        let mut scene = MapScene::new();
        let data = marker(1, 1);
        let entity = scene.add_marker(data.coord, "#a93226", data);
        let drawable = scene.marker(entity).expect("marker");
        assert_eq!(drawable.icon, "markers/a93226.svg");
        assert_eq!(drawable.expedition, ExpeditionId(1));
    }

    #[test]
    fn remove_changes_scene() {
        let mut scene = MapScene::new();
        let data = marker(1, 1);
        let entity = scene.add_marker(data.coord, "#a93226", data);
        assert!(scene.remove(entity));
        assert!(!scene.remove(entity));
        assert!(scene.is_empty());
    }

    #[test]
    fn retain_isolates_one_expedition() {
        let mut scene = MapScene::new();
        let m1 = marker(1, 1);
        let kept_marker = scene.add_marker(m1.coord, "#a93226", m1);
        let kept_route = scene.add_polyline(
            RoutePath::Single(vec![LatLng::new(0.0, 0.0)]),
            "#a93226",
            header(1),
        );
        let m2 = marker(2, 1);
        let dropped = scene.add_marker(m2.coord, "#7d3c98", m2);

        let removed = scene.retain_expedition(ExpeditionId(1));
        assert_eq!(removed, vec![dropped]);
        assert!(scene.marker(kept_marker).is_some());
        assert!(scene.polyline(kept_route).is_some());
        assert!(scene.marker(dropped).is_none());
    }

    #[test]
    fn entities_of_expedition_spans_markers_and_routes() {
        let mut scene = MapScene::new();
        let m = marker(1, 1);
        let a = scene.add_marker(m.coord, "#a93226", m);
        let b = scene.add_polyline(
            RoutePath::Single(vec![LatLng::new(0.0, 0.0)]),
            "#a93226",
            header(1),
        );
        assert_eq!(scene.entities_of_expedition(ExpeditionId(1)), vec![a, b]);
        assert!(scene.entities_of_expedition(ExpeditionId(9)).is_empty());
    }
}
