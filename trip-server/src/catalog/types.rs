//! Read-only destination and hotel lookups.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, DestinationId, HotelId};

use super::error::CatalogError;

/// A place a stop can visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
    #[serde(default)]
    pub country: String,
    /// Missing coordinates make transport legs to or from here unpriceable
    #[serde(default)]
    pub coordinates: Option<Coordinate>,
    /// Typical stay length used by suggestions
    #[serde(default = "default_stay")]
    pub avg_stay_days: u32,
    /// Activity tags, matched against requested interests
    #[serde(default)]
    pub activities: Vec<String>,
}

fn default_stay() -> u32 {
    1
}

/// A hotel offer with a nightly rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    #[serde(rename = "price")]
    pub nightly_rate: f64,
}

/// Wire form of a catalog document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
}

/// Immutable destination and hotel lookups.
///
/// Listing order follows the source document; lookups are by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    destinations: Vec<Destination>,
    hotels: Vec<Hotel>,
    destination_index: HashMap<DestinationId, usize>,
    hotel_index: HashMap<HotelId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(destinations: Vec<Destination>, hotels: Vec<Hotel>) -> Result<Self, CatalogError> {
        let mut destination_index = HashMap::with_capacity(destinations.len());
        for (i, d) in destinations.iter().enumerate() {
            if destination_index.insert(d.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: "destination",
                    id: d.id.to_string(),
                });
            }
        }

        let mut hotel_index = HashMap::with_capacity(hotels.len());
        for (i, h) in hotels.iter().enumerate() {
            if hotel_index.insert(h.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: "hotel",
                    id: h.id.to_string(),
                });
            }
        }

        Ok(Self {
            destinations,
            hotels,
            destination_index,
            hotel_index,
        })
    }

    /// Parse a catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json).map_err(|e| CatalogError::Json {
            message: e.to_string(),
        })?;
        Self::from_document(doc)
    }

    pub fn from_document(doc: CatalogDocument) -> Result<Self, CatalogError> {
        Self::new(doc.destinations, doc.hotels)
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&contents)
    }

    pub fn destination(&self, id: &DestinationId) -> Option<&Destination> {
        self.destination_index
            .get(id)
            .map(|&i| &self.destinations[i])
    }

    pub fn hotel(&self, id: &HotelId) -> Option<&Hotel> {
        self.hotel_index.get(id).map(|&i| &self.hotels[i])
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty() && self.hotels.is_empty()
    }
}
