//! Wire records of the expedition data store.
//!
//! The backend serializes every field as a string, numbers included; the
//! field names are fixed by the store and must not be changed here.
//! Decoding into the typed model validates all numeric fields up front:
//! a record with a non-numeric sequence or coordinate fails the whole
//! load with a descriptive error instead of poisoning sort order and
//! geometry downstream.

use serde::{Deserialize, Serialize};

use foundation::geo::LatLng;
use foundation::ids::{ExpeditionId, PlaceId};
use scene::model::{ExpeditionHeader, ImageMeta, Marker, RoutePoint};

/// One marker row as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub exp_id: String,
    pub exp_name: String,
    pub leader: String,
    pub startdate: String,
    pub enddate: String,
    pub name: String,
    pub placeid: String,
    pub sequence: String,
    pub date: String,
    pub place_info: String,
    pub place_info_src: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(rename = "hasImages")]
    pub has_images: String,
}

/// One route point row as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePointRecord {
    pub exp_id: String,
    pub exp_name: String,
    pub lat: String,
    pub lng: String,
    pub sequence: String,
}

/// One image metadata row as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub file_name: String,
    pub img_description: String,
    pub img_creator: String,
    pub img_src: String,
}

/// A numeric wire field that did not parse.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    pub field: &'static str,
    pub value: String,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid numeric field `{}`: {:?}", self.field, self.value)
    }
}

impl std::error::Error for DecodeError {}

fn parse_u32(field: &'static str, value: &str) -> Result<u32, DecodeError> {
    value.trim().parse().map_err(|_| DecodeError {
        field,
        value: value.to_string(),
    })
}

fn parse_f64(field: &'static str, value: &str) -> Result<f64, DecodeError> {
    let parsed: f64 = value.trim().parse().map_err(|_| DecodeError {
        field,
        value: value.to_string(),
    })?;
    if !parsed.is_finite() {
        return Err(DecodeError {
            field,
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

impl MarkerRecord {
    /// Whether the store has images for this marker ("0"/"1" flag).
    pub fn has_images(&self) -> bool {
        self.has_images == "1"
    }

    pub fn place_id(&self) -> Result<PlaceId, DecodeError> {
        Ok(PlaceId(parse_u32("placeid", &self.placeid)?))
    }

    /// Validates and converts the record into the typed model.
    ///
    /// Images are not part of the marker row; the loader fetches them
    /// separately for flagged markers and fills `Marker::images`.
    pub fn decode(&self) -> Result<Marker, DecodeError> {
        Ok(Marker {
            expedition: ExpeditionHeader {
                id: ExpeditionId(parse_u32("exp_id", &self.exp_id)?),
                name: self.exp_name.clone(),
                leader: self.leader.clone(),
                start_date: self.startdate.clone(),
                end_date: self.enddate.clone(),
            },
            place_id: self.place_id()?,
            coord: LatLng::new(
                parse_f64("latitude", &self.latitude)?,
                parse_f64("longitude", &self.longitude)?,
            ),
            sequence: parse_u32("sequence", &self.sequence)?,
            name: self.name.clone(),
            date: self.date.clone(),
            info: self.place_info.clone(),
            source: self.place_info_src.clone(),
            images: Vec::new(),
        })
    }
}

impl RoutePointRecord {
    pub fn decode(&self) -> Result<RoutePoint, DecodeError> {
        Ok(RoutePoint {
            coord: LatLng::new(
                parse_f64("lat", &self.lat)?,
                parse_f64("lng", &self.lng)?,
            ),
            sequence: parse_u32("sequence", &self.sequence)?,
        })
    }

    /// Expedition metadata carried on the row. Route rows only carry the
    /// id and name, so the remaining header fields are empty; the loader
    /// prefers the full header from a marker row when one exists.
    pub fn header(&self) -> Result<ExpeditionHeader, DecodeError> {
        Ok(ExpeditionHeader {
            id: ExpeditionId(parse_u32("exp_id", &self.exp_id)?),
            name: self.exp_name.clone(),
            leader: String::new(),
            start_date: String::new(),
            end_date: String::new(),
        })
    }
}

impl ImageRecord {
    pub fn decode(&self) -> ImageMeta {
        ImageMeta {
            file_name: self.file_name.clone(),
            description: self.img_description.clone(),
            creator: self.img_creator.clone(),
            source: self.img_src.clone(),
        }
    }
}
