/// Handle to a drawable owned by a `MapScene`.
///
/// Indices are minted by the scene in spawn order and never reused within
/// one scene instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl EntityId {
    pub fn index(&self) -> u32 {
        self.0
    }
}
