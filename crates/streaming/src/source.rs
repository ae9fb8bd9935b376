//! The `ExpeditionSource` trait: the abstract contract of the expedition
//! data store, consumed by the loader and the save workflows.
//!
//! Methods return boxed futures for dyn-compatibility; implementations
//! must be `Send + Sync` for use across async tasks. Reads for unknown
//! expedition ids yield empty lists, not errors. Writes carry no
//! transactional guarantee across calls; callers issue them in dependency
//! order (expedition before marker, place before marker) and accept
//! partial completion on failure.

use std::future::Future;
use std::pin::Pin;

use foundation::geo::LatLng;
use foundation::ids::{ExpeditionId, PlaceId};
use scene::model::{ExpeditionHeader, ImageMeta};

use crate::protocol::{ImageRecord, MarkerRecord, RoutePointRecord};

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error type for data store operations.
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Fields of a marker create/update write.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerWrite {
    pub expedition: ExpeditionId,
    pub place: PlaceId,
    pub sequence: u32,
    pub name: String,
    pub date: String,
    pub info: String,
    pub source: String,
    pub has_images: bool,
}

/// Fields of a place create/update write.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceWrite {
    pub place: PlaceId,
    pub name: String,
    pub coord: LatLng,
}

/// Abstract contract of the expedition data store.
pub trait ExpeditionSource: Send + Sync {
    /// Marker rows of one expedition, unordered.
    fn markers(
        &self,
        expedition: ExpeditionId,
    ) -> BoxFuture<'_, Result<Vec<MarkerRecord>, ApiError>>;

    /// Route point rows of one expedition, unordered.
    fn route(
        &self,
        expedition: ExpeditionId,
    ) -> BoxFuture<'_, Result<Vec<RoutePointRecord>, ApiError>>;

    /// Image metadata for one place of one expedition.
    fn images(
        &self,
        expedition: ExpeditionId,
        place: PlaceId,
    ) -> BoxFuture<'_, Result<Vec<ImageRecord>, ApiError>>;

    /// Largest assigned expedition id, 0 when none exist.
    fn last_expedition_id(&self) -> BoxFuture<'_, Result<u32, ApiError>>;

    /// Largest assigned place id, 0 when none exist.
    fn last_place_id(&self) -> BoxFuture<'_, Result<u32, ApiError>>;

    fn save_expedition(&self, header: ExpeditionHeader) -> BoxFuture<'_, Result<(), ApiError>>;

    fn save_place(&self, place: PlaceWrite) -> BoxFuture<'_, Result<(), ApiError>>;

    fn save_marker(&self, marker: MarkerWrite) -> BoxFuture<'_, Result<(), ApiError>>;

    fn save_image(
        &self,
        expedition: ExpeditionId,
        place: PlaceId,
        sequence: u32,
        image: ImageMeta,
    ) -> BoxFuture<'_, Result<(), ApiError>>;

    fn save_route(
        &self,
        expedition: ExpeditionId,
        points: Vec<LatLng>,
    ) -> BoxFuture<'_, Result<(), ApiError>>;

    fn update_marker(&self, marker: MarkerWrite) -> BoxFuture<'_, Result<(), ApiError>>;

    fn update_place(&self, place: PlaceWrite) -> BoxFuture<'_, Result<(), ApiError>>;

    /// Deletes an expedition's route wholesale; the edit workflow
    /// recreates it from scratch afterwards.
    fn delete_route(&self, expedition: ExpeditionId) -> BoxFuture<'_, Result<(), ApiError>>;
}
