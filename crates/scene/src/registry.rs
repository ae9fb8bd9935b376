use foundation::ids::ExpeditionId;
use foundation::palette::{Color, color_for_expedition};

use crate::entity::EntityId;

/// One loaded expedition: its primary marker entities plus the route
/// entity, if the expedition has any route points. World copies are not
/// registered here; they live only in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedExpedition {
    pub expedition: ExpeditionId,
    pub name: String,
    pub markers: Vec<EntityId>,
    pub route: Option<EntityId>,
}

/// One line of the map legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub expedition: ExpeditionId,
    pub name: String,
    pub color: Color,
}

/// Result of isolating one expedition for editing.
#[derive(Debug, Clone, PartialEq)]
pub struct Isolation {
    /// The isolated expedition's primary entities.
    pub kept: Vec<EntityId>,
    /// Primary entities of every other loaded expedition.
    pub removed: Vec<EntityId>,
}

/// Ordered collection of all currently loaded expeditions.
///
/// Entries are appended in load order; the legend mirrors that order.
/// The registry is cleared and rebuilt wholesale when the edit workflow
/// commits changes, rather than patched incrementally.
#[derive(Debug, Default)]
pub struct ExpeditionRegistry {
    entries: Vec<LoadedExpedition>,
}

impl ExpeditionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LoadedExpedition) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedExpedition> {
        self.entries.iter()
    }

    pub fn get(&self, expedition: ExpeditionId) -> Option<&LoadedExpedition> {
        self.entries.iter().find(|e| e.expedition == expedition)
    }

    /// Legend lines in load order.
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.entries
            .iter()
            .map(|e| LegendEntry {
                expedition: e.expedition,
                name: e.name.clone(),
                color: color_for_expedition(e.expedition),
            })
            .collect()
    }

    /// Splits the registered entities into the given expedition's and
    /// everyone else's. Returns `None` when the expedition is not loaded.
    pub fn isolate(&self, expedition: ExpeditionId) -> Option<Isolation> {
        self.get(expedition)?;

        let mut kept = Vec::new();
        let mut removed = Vec::new();
        for entry in &self.entries {
            let target = if entry.expedition == expedition {
                &mut kept
            } else {
                &mut removed
            };
            target.extend(entry.markers.iter().copied());
            target.extend(entry.route);
        }
        Some(Isolation { kept, removed })
    }
}

#[cfg(test)]
mod tests {
    use super::{ExpeditionRegistry, LoadedExpedition};
    use crate::entity::EntityId;
    use foundation::ids::ExpeditionId;
    use foundation::palette::color_for_expedition;

    fn entry(exp: u32, markers: &[u32], route: Option<u32>) -> LoadedExpedition {
        LoadedExpedition {
            expedition: ExpeditionId(exp),
            name: format!("expedition {exp}"),
            markers: markers.iter().map(|i| EntityId(*i)).collect(),
            route: route.map(EntityId),
        }
    }

    #[test]
    fn legend_follows_load_order() {
        let mut registry = ExpeditionRegistry::new();
        registry.push(entry(2, &[0], Some(1)));
        registry.push(entry(1, &[2], None));

        let legend = registry.legend_entries();
        assert_eq!(legend.len(), 2);
        assert_eq!(legend[0].expedition, ExpeditionId(2));
        assert_eq!(legend[1].expedition, ExpeditionId(1));
        assert_eq!(legend[0].color, color_for_expedition(ExpeditionId(2)));
    }

    #[test]
    fn isolate_partitions_entities() {
        let mut registry = ExpeditionRegistry::new();
        registry.push(entry(1, &[0, 1], Some(2)));
        registry.push(entry(2, &[3], Some(4)));

        let isolation = registry.isolate(ExpeditionId(1)).expect("loaded");
        assert_eq!(isolation.kept, vec![EntityId(0), EntityId(1), EntityId(2)]);
        assert_eq!(isolation.removed, vec![EntityId(3), EntityId(4)]);
    }

    #[test]
    fn isolate_unknown_expedition_is_none() {
        let registry = ExpeditionRegistry::new();
        assert!(registry.isolate(ExpeditionId(7)).is_none());
    }

    #[test]
    fn clear_empties_registry() {
        let mut registry = ExpeditionRegistry::new();
        registry.push(entry(1, &[0], None));
        registry.clear();
        assert!(registry.is_empty());
    }
}
