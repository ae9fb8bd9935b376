//! Save workflows for new and edited expeditions.
//!
//! The data store offers no transactions, so writes are issued in
//! dependency order: expedition header first, then each place before its
//! marker, image metadata after its marker, the route last. A failure
//! mid-sequence leaves the already-written rows in place; there is no
//! compensating rollback.
//!
//! A workflow instance refuses to start a second submission while one is
//! in flight, so double-triggered saves cannot write duplicate rows.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use foundation::geo::LatLng;
use foundation::ids::{ExpeditionId, PlaceId};
use scene::model::{ExpeditionHeader, ImageMeta};

use crate::source::{ApiError, ExpeditionSource, MarkerWrite, PlaceWrite};

/// A marker drawn for a new expedition, before ids are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDraft {
    pub coord: LatLng,
    pub name: String,
    pub date: String,
    pub info: String,
    pub source: String,
    pub images: Vec<ImageMeta>,
}

/// A new expedition as drawn by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpeditionDraft {
    pub name: String,
    pub leader: String,
    pub start_date: String,
    pub end_date: String,
    pub markers: Vec<MarkerDraft>,
    pub route: Vec<LatLng>,
}

/// Pending changes to one existing marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerEdit {
    pub place: PlaceId,
    pub sequence: u32,
    pub coord: LatLng,
    pub name: String,
    pub date: String,
    pub info: String,
    pub source: String,
    /// Textual fields changed; pushes an `update_marker`.
    pub data_edited: bool,
    /// The marker was moved; pushes an `update_place`.
    pub coordinates_changed: bool,
    pub new_images: Vec<ImageMeta>,
}

/// Pending changes to one existing expedition.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpeditionEdit {
    pub expedition: ExpeditionId,
    pub markers: Vec<MarkerEdit>,
    /// Full replacement route; empty leaves the stored route untouched.
    pub route: Vec<LatLng>,
}

#[derive(Debug)]
pub enum SaveError {
    /// Another submission is still in flight.
    Busy,
    Api(ApiError),
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Busy => write!(f, "a save is already in flight"),
            SaveError::Api(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Busy => None,
            SaveError::Api(err) => Some(err),
        }
    }
}

impl From<ApiError> for SaveError {
    fn from(err: ApiError) -> Self {
        SaveError::Api(err)
    }
}

/// Serializes save submissions against one data store.
#[derive(Debug)]
pub struct SaveWorkflow<S> {
    source: S,
    busy: AtomicBool,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: ExpeditionSource> SaveWorkflow<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            busy: AtomicBool::new(false),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<BusyGuard<'_>, SaveError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SaveError::Busy)?;
        Ok(BusyGuard(&self.busy))
    }

    /// Persists a new expedition, minting its id and the ids of its
    /// places, and returns the assigned expedition id.
    pub async fn create_expedition(
        &self,
        draft: ExpeditionDraft,
    ) -> Result<ExpeditionId, SaveError> {
        let _guard = self.begin()?;

        let expedition = ExpeditionId(self.source.last_expedition_id().await? + 1);
        let last_place = self.source.last_place_id().await?;

        self.source
            .save_expedition(ExpeditionHeader {
                id: expedition,
                name: draft.name.clone(),
                leader: draft.leader,
                start_date: draft.start_date,
                end_date: draft.end_date,
            })
            .await?;

        for (i, marker) in draft.markers.into_iter().enumerate() {
            let place = PlaceId(last_place + i as u32 + 1);
            let sequence = i as u32 + 1;

            self.source
                .save_place(PlaceWrite {
                    place,
                    name: marker.name.clone(),
                    coord: marker.coord,
                })
                .await?;
            self.source
                .save_marker(MarkerWrite {
                    expedition,
                    place,
                    sequence,
                    name: marker.name,
                    date: marker.date,
                    info: marker.info,
                    source: marker.source,
                    has_images: !marker.images.is_empty(),
                })
                .await?;
            for image in marker.images {
                self.source
                    .save_image(expedition, place, sequence, image)
                    .await?;
            }
        }

        if !draft.route.is_empty() {
            self.source.save_route(expedition, draft.route).await?;
        }

        info!(%expedition, name = %draft.name, "saved new expedition");
        Ok(expedition)
    }

    /// Persists edits to an existing expedition. The route, when present,
    /// is replaced wholesale: deleted and recreated from the edited
    /// geometry.
    pub async fn extend_expedition(&self, edit: ExpeditionEdit) -> Result<(), SaveError> {
        let _guard = self.begin()?;

        let expedition = edit.expedition;
        for marker in edit.markers {
            if marker.data_edited {
                self.source
                    .update_marker(MarkerWrite {
                        expedition,
                        place: marker.place,
                        sequence: marker.sequence,
                        name: marker.name.clone(),
                        date: marker.date.clone(),
                        info: marker.info.clone(),
                        source: marker.source.clone(),
                        has_images: !marker.new_images.is_empty(),
                    })
                    .await?;
            }
            if marker.coordinates_changed {
                self.source
                    .update_place(PlaceWrite {
                        place: marker.place,
                        name: marker.name.clone(),
                        coord: marker.coord,
                    })
                    .await?;
            }
            for image in marker.new_images {
                self.source
                    .save_image(expedition, marker.place, marker.sequence, image)
                    .await?;
            }
        }

        if !edit.route.is_empty() {
            self.source.delete_route(expedition).await?;
            self.source.save_route(expedition, edit.route).await?;
        }

        info!(%expedition, "saved expedition edits");
        Ok(())
    }
}
