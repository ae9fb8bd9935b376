pub mod detail;
pub mod entity;
pub mod map;
pub mod model;
pub mod registry;

pub use detail::{DetailPanel, ExpeditionDetail, PlaceDetail};
pub use entity::EntityId;
pub use map::{MapScene, MarkerDrawable, PolylineDrawable};
pub use model::{ExpeditionHeader, ImageMeta, Marker, RoutePath, RoutePoint};
pub use registry::{ExpeditionRegistry, Isolation, LegendEntry, LoadedExpedition};
