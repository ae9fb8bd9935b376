//! Loading pipeline: fetch one expedition's rows, decode and order them,
//! split the route at the antimeridian, render everything into the scene
//! and register the primary entities.
//!
//! Marker and route rows are fetched concurrently; image metadata is
//! fetched afterwards, and only for markers whose row flags stored
//! images. An expedition with neither markers nor route points is
//! skipped without a registry entry.

use foundation::ids::{ExpeditionId, PlaceId};
use foundation::palette::color_for_expedition;
use foundation::sequence::{compare_by_sequence, sort_by_sequence};
use futures_util::future::{try_join, try_join_all};
use scene::entity::EntityId;
use scene::map::MapScene;
use scene::model::{ExpeditionHeader, Marker, RoutePoint};
use scene::registry::{ExpeditionRegistry, LoadedExpedition};
use streaming::protocol::DecodeError;
use streaming::source::{ApiError, ExpeditionSource};

use crate::replicate::replicate_expedition;
use crate::split::{SplitError, split_route};

/// Why one expedition failed to load. Any of these aborts that
/// expedition wholesale; nothing of it is rendered or registered.
#[derive(Debug)]
pub enum LoadError {
    Api(ApiError),
    Decode(DecodeError),
    Split(SplitError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Api(err) => write!(f, "data store request failed: {err}"),
            LoadError::Decode(err) => write!(f, "malformed record: {err}"),
            LoadError::Split(err) => write!(f, "route split failed: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Api(err) => Some(err),
            LoadError::Decode(err) => Some(err),
            LoadError::Split(err) => Some(err),
        }
    }
}

impl From<ApiError> for LoadError {
    fn from(err: ApiError) -> Self {
        LoadError::Api(err)
    }
}

impl From<DecodeError> for LoadError {
    fn from(err: DecodeError) -> Self {
        LoadError::Decode(err)
    }
}

impl From<SplitError> for LoadError {
    fn from(err: SplitError) -> Self {
        LoadError::Split(err)
    }
}

/// Loads one expedition into the scene and registry.
///
/// Markers are sorted by station sequence before rendering, so their
/// entity ids follow station order regardless of row order on the wire.
/// The route, when present, is ordered the same way, split at the
/// antimeridian, and rendered as one polyline drawable. World copies at
/// ±360° longitude are spawned for every drawable; only the primary
/// entities are registered.
pub async fn load_expedition(
    source: &dyn ExpeditionSource,
    scene: &mut MapScene,
    registry: &mut ExpeditionRegistry,
    expedition: ExpeditionId,
) -> Result<(), LoadError> {
    let color = color_for_expedition(expedition);
    let (marker_rows, route_rows) =
        try_join(source.markers(expedition), source.route(expedition)).await?;

    let mut markers: Vec<(Marker, bool)> = marker_rows
        .iter()
        .map(|row| Ok((row.decode()?, row.has_images())))
        .collect::<Result<_, DecodeError>>()?;
    markers.sort_by(|a, b| compare_by_sequence(&a.0, &b.0));

    // Image metadata only exists for flagged markers; fetch those
    // concurrently and leave the rest with empty image lists.
    let flagged: Vec<(usize, PlaceId)> = markers
        .iter()
        .enumerate()
        .filter(|(_, (_, has_images))| *has_images)
        .map(|(index, (marker, _))| (index, marker.place_id))
        .collect();
    let image_rows = try_join_all(
        flagged
            .iter()
            .map(|(_, place)| source.images(expedition, *place)),
    )
    .await?;
    for ((index, _), rows) in flagged.iter().zip(image_rows) {
        markers[*index].0.images = rows.iter().map(|row| row.decode()).collect();
    }

    let mut points: Vec<RoutePoint> = route_rows
        .iter()
        .map(|row| row.decode())
        .collect::<Result<_, DecodeError>>()?;
    sort_by_sequence(&mut points);

    // Marker rows carry the full expedition header; route rows only its
    // id and name.
    let header: Option<ExpeditionHeader> = match markers.first() {
        Some((marker, _)) => Some(marker.expedition.clone()),
        None => match route_rows.first() {
            Some(row) => Some(row.header()?),
            None => None,
        },
    };
    let Some(header) = header else {
        tracing::debug!("expedition {expedition} has no markers and no route, skipping");
        return Ok(());
    };

    let marker_entities: Vec<EntityId> = markers
        .into_iter()
        .map(|(marker, _)| scene.add_marker(marker.coord, color, marker))
        .collect();

    let route_entity = if points.is_empty() {
        None
    } else {
        let path = split_route(&points)?;
        Some(scene.add_polyline(path, color, header.clone()))
    };

    replicate_expedition(scene, &marker_entities, route_entity);

    tracing::info!(
        "loaded expedition {expedition}: {} markers, route: {}",
        marker_entities.len(),
        route_entity.is_some(),
    );
    registry.push(LoadedExpedition {
        expedition,
        name: header.name,
        markers: marker_entities,
        route: route_entity,
    });
    Ok(())
}

/// Loads every listed expedition, one after another so the legend keeps
/// the requested order. A failing expedition is logged and skipped; the
/// rest still load. Returns the failures.
pub async fn load_all(
    source: &dyn ExpeditionSource,
    scene: &mut MapScene,
    registry: &mut ExpeditionRegistry,
    expeditions: &[ExpeditionId],
) -> Vec<(ExpeditionId, LoadError)> {
    let mut failures = Vec::new();
    for &expedition in expeditions {
        if let Err(err) = load_expedition(source, scene, registry, expedition).await {
            tracing::error!("loading expedition {expedition} failed: {err}");
            failures.push((expedition, err));
        }
    }
    failures
}
