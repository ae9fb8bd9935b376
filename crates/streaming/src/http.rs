//! reqwest-backed implementation of `ExpeditionSource` against the
//! data store's PHP endpoint scheme.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use foundation::geo::LatLng;
use foundation::ids::{ExpeditionId, PlaceId};
use scene::model::{ExpeditionHeader, ImageMeta};

use crate::protocol::{ImageRecord, MarkerRecord, RoutePointRecord};
use crate::source::{ApiError, BoxFuture, ExpeditionSource, MarkerWrite, PlaceWrite};

/// HTTP client for the expedition data store.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: String,
    http: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base)
    }
}

async fn get_json<T: DeserializeOwned>(http: reqwest::Client, url: String) -> Result<T, ApiError> {
    debug!("GET {url}");
    let response = http
        .get(&url)
        .send()
        .await
        .map_err(|e| ApiError::with_source(format!("GET {url} failed"), e))?
        .error_for_status()
        .map_err(|e| ApiError::with_source(format!("GET {url} returned an error status"), e))?;
    response
        .json()
        .await
        .map_err(|e| ApiError::with_source(format!("GET {url} returned invalid JSON"), e))
}

async fn post_json(
    http: reqwest::Client,
    url: String,
    body: serde_json::Value,
) -> Result<(), ApiError> {
    debug!("POST {url}");
    http.post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| ApiError::with_source(format!("POST {url} failed"), e))?
        .error_for_status()
        .map_err(|e| ApiError::with_source(format!("POST {url} returned an error status"), e))?;
    Ok(())
}

/// The counter endpoints return a single-row, single-column result like
/// `[{"max(exp_id)": "12"}]`, with a null value when the table is empty.
async fn counter(http: reqwest::Client, url: String) -> Result<u32, ApiError> {
    let rows: Vec<BTreeMap<String, Option<String>>> = get_json(http, url.clone()).await?;
    let Some(row) = rows.into_iter().next() else {
        return Ok(0);
    };
    let Some(Some(value)) = row.into_values().next() else {
        return Ok(0);
    };
    value.trim().parse().map_err(|e| {
        ApiError::with_source(format!("GET {url} returned non-numeric counter {value:?}"), e)
    })
}

impl ExpeditionSource for HttpSource {
    fn markers(
        &self,
        expedition: ExpeditionId,
    ) -> BoxFuture<'_, Result<Vec<MarkerRecord>, ApiError>> {
        let url = self.url(&format!("loadExpedition.php?q={expedition}"));
        let http = self.http.clone();
        Box::pin(get_json(http, url))
    }

    fn route(
        &self,
        expedition: ExpeditionId,
    ) -> BoxFuture<'_, Result<Vec<RoutePointRecord>, ApiError>> {
        let url = self.url(&format!("loadRoute.php?q={expedition}"));
        let http = self.http.clone();
        Box::pin(get_json(http, url))
    }

    fn images(
        &self,
        expedition: ExpeditionId,
        place: PlaceId,
    ) -> BoxFuture<'_, Result<Vec<ImageRecord>, ApiError>> {
        let url = self.url(&format!("loadImages.php?e={expedition}&p={place}"));
        let http = self.http.clone();
        Box::pin(get_json(http, url))
    }

    fn last_expedition_id(&self) -> BoxFuture<'_, Result<u32, ApiError>> {
        let url = self.url("getLastExpedition.php");
        let http = self.http.clone();
        Box::pin(counter(http, url))
    }

    fn last_place_id(&self) -> BoxFuture<'_, Result<u32, ApiError>> {
        let url = self.url("getLastPlaceId.php");
        let http = self.http.clone();
        Box::pin(counter(http, url))
    }

    fn save_expedition(&self, header: ExpeditionHeader) -> BoxFuture<'_, Result<(), ApiError>> {
        let url = self.url("saveExpedition.php");
        let http = self.http.clone();
        let body = json!({
            "exp_id": header.id.0,
            "name": header.name,
            "leader": header.leader,
            "startdate": header.start_date,
            "enddate": header.end_date,
        });
        Box::pin(post_json(http, url, body))
    }

    fn save_place(&self, place: PlaceWrite) -> BoxFuture<'_, Result<(), ApiError>> {
        let url = self.url("savePlace.php");
        let http = self.http.clone();
        let body = json!({
            "placeid": place.place.0,
            "name": place.name,
            "lat": place.coord.lat,
            "lng": place.coord.lng,
        });
        Box::pin(post_json(http, url, body))
    }

    fn save_marker(&self, marker: MarkerWrite) -> BoxFuture<'_, Result<(), ApiError>> {
        let url = self.url("saveMarker.php");
        let http = self.http.clone();
        let body = json!({
            "exp_id": marker.expedition.0,
            "placeid": marker.place.0,
            "sequence": marker.sequence,
            "name": marker.name,
            "date": marker.date,
            "info": marker.info,
            "src": marker.source,
            "hasImages": marker.has_images as u8,
        });
        Box::pin(post_json(http, url, body))
    }

    fn save_image(
        &self,
        expedition: ExpeditionId,
        place: PlaceId,
        sequence: u32,
        image: ImageMeta,
    ) -> BoxFuture<'_, Result<(), ApiError>> {
        let url = self.url("sendImage.php");
        let http = self.http.clone();
        let body = json!({
            "exp_id": expedition.0,
            "place_id": place.0,
            "seq": sequence,
            "fileName": image.file_name,
            "description": image.description,
            "creator": image.creator,
            "src": image.source,
        });
        Box::pin(post_json(http, url, body))
    }

    fn save_route(
        &self,
        expedition: ExpeditionId,
        points: Vec<LatLng>,
    ) -> BoxFuture<'_, Result<(), ApiError>> {
        let url = self.url("saveRoute.php");
        let http = self.http.clone();
        let array: Vec<_> = points
            .iter()
            .map(|p| json!({ "lat": p.lat, "lng": p.lng }))
            .collect();
        let body = json!({ "exp_id": expedition.0, "array": array });
        Box::pin(post_json(http, url, body))
    }

    fn update_marker(&self, marker: MarkerWrite) -> BoxFuture<'_, Result<(), ApiError>> {
        let url = self.url("updateMarkerData.php");
        let http = self.http.clone();
        let body = json!({
            "expId": marker.expedition.0,
            "placeId": marker.place.0,
            "name": marker.name,
            "sequence": marker.sequence,
            "date": marker.date,
            "info": marker.info,
            "src": marker.source,
            "hasImages": marker.has_images as u8,
        });
        Box::pin(post_json(http, url, body))
    }

    fn update_place(&self, place: PlaceWrite) -> BoxFuture<'_, Result<(), ApiError>> {
        let url = self.url("updatePlace.php");
        let http = self.http.clone();
        let body = json!({
            "placeId": place.place.0,
            "name": place.name,
            "lat": place.coord.lat,
            "lng": place.coord.lng,
        });
        Box::pin(post_json(http, url, body))
    }

    fn delete_route(&self, expedition: ExpeditionId) -> BoxFuture<'_, Result<(), ApiError>> {
        let url = self.url("deleteRoute.php");
        let http = self.http.clone();
        let body = json!({ "expId": expedition.0 });
        Box::pin(post_json(http, url, body))
    }
}
