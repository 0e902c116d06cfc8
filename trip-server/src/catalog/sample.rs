//! Built-in sample catalog, used when no catalog source is configured.

use crate::domain::{Coordinate, DestinationId, HotelId};

use super::types::{Catalog, Destination, Hotel};

// (id, name, country, lat, lng, avg stay, activities)
const DESTINATIONS: &[(&str, &str, &str, f64, f64, u32, &[&str])] = &[
    ("paris-france", "Paris", "France", 48.8566, 2.3522, 4, &["museums", "dining", "architecture", "shopping", "urban"]),
    ("london-uk", "London", "United Kingdom", 51.5074, -0.1278, 3, &["history", "museums", "theater", "shopping", "urban"]),
    ("dubai-uae", "Dubai", "United Arab Emirates", 25.2048, 55.2708, 4, &["luxury", "shopping", "desert", "nightlife", "coastal"]),
    ("tokyo-japan", "Tokyo", "Japan", 35.6762, 139.6503, 5, &["culture", "food", "technology", "temples"]),
    ("istanbul-turkey", "Istanbul", "Turkey", 41.0082, 28.9784, 3, &["history", "culture", "food", "bazaars"]),
    ("marrakech-morocco", "Marrakech", "Morocco", 31.6295, -7.9811, 3, &["culture", "markets", "desert", "architecture"]),
    ("cairo-egypt", "Cairo", "Egypt", 30.0444, 31.2357, 3, &["history", "archaeology", "culture", "museums", "desert"]),
    ("algiers-algeria", "Algiers", "Algeria", 36.7538, 3.0588, 2, &["history", "architecture", "coastal", "culture"]),
    ("oran-algeria", "Oran", "Algeria", 35.6969, -0.6331, 2, &["coastal", "architecture", "music", "culture"]),
    ("constantine-algeria", "Constantine", "Algeria", 36.365, 6.6147, 2, &["architecture", "history", "nature", "bridges"]),
    ("tamanrasset-algeria", "Tamanrasset", "Algeria", 22.7851, 5.5228, 3, &["desert", "culture", "adventure", "nature"]),
    ("new-york-usa", "New York", "United States", 40.7128, -74.006, 4, &["culture", "museums", "shopping", "nightlife", "urban"]),
];

// (id, name, nightly rate)
const HOTELS: &[(&str, &str, f64)] = &[
    ("budget", "Budget Hostel", 40.0),
    ("standard", "Standard Hotel", 90.0),
    ("premium", "Premium Hotel", 160.0),
    ("luxury", "Luxury Resort", 320.0),
];

/// The sample catalog.
pub fn sample_catalog() -> Catalog {
    let destinations = DESTINATIONS
        .iter()
        .map(|&(id, name, country, lat, lng, stay, activities)| Destination {
            id: DestinationId::new(id),
            name: name.to_string(),
            country: country.to_string(),
            coordinates: Coordinate::new(lat, lng).ok(),
            avg_stay_days: stay,
            activities: activities.iter().map(|a| a.to_string()).collect(),
        })
        .collect();

    let hotels = HOTELS
        .iter()
        .map(|&(id, name, rate)| Hotel {
            id: HotelId::new(id),
            name: name.to_string(),
            nightly_rate: rate,
        })
        .collect();

    // Ids above are unique, so this cannot fail.
    Catalog::new(destinations, hotels).unwrap_or_default()
}
