//! Starter itineraries generated from traveller preferences.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::domain::{DestinationId, HotelId, Itinerary, ItineraryError, Stop, TransportLeg};

use super::config::SuggestionConfig;

/// Hotel tier to preselect at every stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Budget,
    #[default]
    Standard,
    Premium,
    Luxury,
}

impl TravelStyle {
    /// Catalog hotel id for this tier.
    pub fn hotel_id(&self) -> HotelId {
        HotelId::new(match self {
            TravelStyle::Budget => "budget",
            TravelStyle::Standard => "standard",
            TravelStyle::Premium => "premium",
            TravelStyle::Luxury => "luxury",
        })
    }
}

/// Preferences collected before building starts.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionRequest {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub interests: Vec<String>,
    /// Maximum number of stops; zero or absent means the configured default
    #[serde(default)]
    pub max_stops: Option<usize>,
    #[serde(default)]
    pub travel_style: TravelStyle,
}

/// Build a starter itinerary.
///
/// Destinations are taken interest by interest, in request order, from
/// catalog destinations tagged with that activity. With no match the
/// configured fallback destinations are used. Each stop stays for the
/// destination's typical length, with the travel style's hotel when the
/// catalog has it, and every leg starts out with the default mode.
///
/// Fails only when the stays would run past the end of the calendar.
pub fn suggest_itinerary(
    catalog: &Catalog,
    request: &SuggestionRequest,
    config: &SuggestionConfig,
) -> Result<Itinerary, ItineraryError> {
    let max_stops = request
        .max_stops
        .filter(|&n| n > 0)
        .unwrap_or(config.default_stops);

    let mut picked = matching_destinations(catalog, &request.interests);
    if picked.is_empty() {
        picked = config
            .fallback_destinations
            .iter()
            .filter(|id| catalog.destination(id).is_some())
            .cloned()
            .collect();
    }
    picked.truncate(max_stops);

    let hotel = request.travel_style.hotel_id();
    let hotel = catalog.hotel(&hotel).map(|h| h.id.clone());

    let stops: Vec<Stop> = picked
        .into_iter()
        .zip(1..)
        .map(|(id, sequence_number)| {
            let stay = catalog
                .destination(&id)
                .map_or(1, |d| d.avg_stay_days.max(1));
            let mut stop = Stop::new(sequence_number, Some(id));
            stop.hotel_id = hotel.clone();
            stop.stay_duration_days = stay;
            stop
        })
        .collect();

    let legs = stops
        .windows(2)
        .map(|pair| {
            TransportLeg::new(pair[0].destination_id.clone(), pair[1].destination_id.clone())
                .with_mode(config.default_mode.clone())
        })
        .collect();

    Itinerary::from_parts(request.start_date, stops, legs)
}

fn matching_destinations(catalog: &Catalog, interests: &[String]) -> Vec<DestinationId> {
    let mut picked: Vec<DestinationId> = Vec::new();

    for interest in interests {
        let interest = interest.trim().to_lowercase();
        for destination in catalog.destinations() {
            let tagged = destination
                .activities
                .iter()
                .any(|a| a.to_lowercase() == interest);
            if tagged && !picked.contains(&destination.id) {
                picked.push(destination.id.clone());
            }
        }
    }

    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_catalog;
    use crate::domain::TransportMode;

    fn request(interests: &[&str], max_stops: Option<usize>, style: TravelStyle) -> SuggestionRequest {
        SuggestionRequest {
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            max_stops,
            travel_style: style,
        }
    }

    fn ids(it: &Itinerary) -> Vec<&str> {
        it.stops()
            .iter()
            .filter_map(|s| s.destination_id.as_ref().map(|d| d.as_str()))
            .collect()
    }

    #[test]
    fn picks_by_interest_in_order() {
        let catalog = sample_catalog();
        let it = suggest_itinerary(
            &catalog,
            &request(&["desert", "urban"], Some(10), TravelStyle::Standard),
            &SuggestionConfig::default(),
        )
        .unwrap();

        assert_eq!(
            ids(&it),
            vec![
                "dubai-uae",
                "marrakech-morocco",
                "cairo-egypt",
                "tamanrasset-algeria",
                "paris-france",
                "london-uk",
                "new-york-usa",
            ]
        );
        assert!(it.validate().is_ok());
    }

    #[test]
    fn truncates_to_default_stops() {
        let catalog = sample_catalog();
        let it = suggest_itinerary(
            &catalog,
            &request(&["desert"], None, TravelStyle::Standard),
            &SuggestionConfig::default(),
        )
        .unwrap();
        assert_eq!(it.stops().len(), 2);

        let it = suggest_itinerary(
            &catalog,
            &request(&["desert"], Some(0), TravelStyle::Standard),
            &SuggestionConfig::default(),
        )
        .unwrap();
        assert_eq!(it.stops().len(), 2);
    }

    #[test]
    fn falls_back_without_matches() {
        let catalog = sample_catalog();
        let it = suggest_itinerary(
            &catalog,
            &request(&["skiing"], None, TravelStyle::Budget),
            &SuggestionConfig::default(),
        )
        .unwrap();
        assert_eq!(ids(&it), vec!["algiers-algeria", "constantine-algeria"]);
    }

    #[test]
    fn fills_stays_hotels_and_modes() {
        let catalog = sample_catalog();
        let it = suggest_itinerary(
            &catalog,
            &request(&["urban"], Some(2), TravelStyle::Luxury),
            &SuggestionConfig::default(),
        )
        .unwrap();

        let paris = it.stop(1).unwrap();
        assert_eq!(paris.stay_duration_days, 4);
        assert_eq!(paris.hotel_id, Some(HotelId::new("luxury")));
        assert_eq!(it.stop(2).unwrap().stay_duration_days, 3);
        assert_eq!(it.legs()[0].mode, Some(TransportMode::Flight));
    }

    #[test]
    fn unknown_tier_leaves_hotel_empty() {
        let catalog = Catalog::from_json(
            r#"{"destinations": [{"id": "a", "name": "A", "activities": ["food"]}], "hotels": []}"#,
        )
        .unwrap();
        let it = suggest_itinerary(
            &catalog,
            &request(&["food"], None, TravelStyle::Premium),
            &SuggestionConfig::default(),
        )
        .unwrap();
        assert_eq!(it.stops().len(), 1);
        assert_eq!(it.stop(1).unwrap().hotel_id, None);
    }

    #[test]
    fn stays_past_the_calendar_fail() {
        let catalog = Catalog::from_json(
            r#"{"destinations": [{"id": "a", "name": "A", "avgStayDays": 4000000000, "activities": ["food"]}], "hotels": []}"#,
        )
        .unwrap();
        let err = suggest_itinerary(
            &catalog,
            &request(&["food"], None, TravelStyle::Budget),
            &SuggestionConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, ItineraryError::DateOutOfRange(1));
    }

    #[test]
    fn travel_style_from_json() {
        let style: TravelStyle = serde_json::from_str(r#""premium""#).unwrap();
        assert_eq!(style, TravelStyle::Premium);
        assert_eq!(style.hotel_id(), HotelId::new("premium"));
    }
}
