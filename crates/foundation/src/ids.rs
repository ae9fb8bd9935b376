/// Identifier of an expedition.
///
/// Positive, monotonically assigned by the data store (`max(existing) + 1`
/// on creation).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpeditionId(pub u32);

/// Identifier of a place.
///
/// Globally unique across expeditions; a fresh id is minted for every
/// place instance even when a physical place is revisited.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceId(pub u32);

impl ExpeditionId {
    pub fn new(n: u32) -> Self {
        ExpeditionId(n)
    }
}

impl PlaceId {
    pub fn new(n: u32) -> Self {
        PlaceId(n)
    }
}

impl std::fmt::Display for ExpeditionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for PlaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
