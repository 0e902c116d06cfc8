//! Itinerary cost and date aggregation.
//!
//! Walks the stops in order to assign arrival dates and accommodation
//! costs, prices every leg from the great-circle distance between its
//! endpoints, then applies an optional promo code to the subtotal.
//!
//! Catalog misses never fail a quote. They contribute nothing and are
//! reported as [`QuoteIssue`]s so a caller can tell a real zero from a
//! missing reference.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::domain::{Coordinate, DestinationId, HotelId, Itinerary, Stop, TransportLeg, TransportMode};
use crate::geo::haversine_km;
use crate::pricing::{PromoOutcome, TransportQuote};

use super::config::QuoteConfig;
use super::error::LookupError;

/// Dates and accommodation cost for one stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopQuote {
    pub sequence_number: u32,
    pub destination_id: Option<DestinationId>,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    /// Effective stay length (at least one)
    pub nights: u32,
    /// Nightly rate of the selected hotel, if it was found
    pub nightly_rate: Option<f64>,
    pub accommodation_cost: f64,
}

/// How a leg was priced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LegPricing {
    /// Priced from the distance between its endpoints
    Priced { quote: TransportQuote },
    /// The user has not picked a mode yet
    NoModeSelected,
    /// One of the neighbouring stops has no destination yet
    IncompleteRoute,
    /// An endpoint is unknown to the catalog or has no coordinates
    Unresolved { destination_id: DestinationId },
}

impl LegPricing {
    /// Amount this leg adds to the transport total.
    pub fn cost(&self) -> f64 {
        match self {
            LegPricing::Priced { quote } => quote.billable_price(),
            _ => 0.0,
        }
    }
}

/// Pricing for one leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegQuote {
    pub index: usize,
    pub from_destination_id: Option<DestinationId>,
    pub to_destination_id: Option<DestinationId>,
    pub mode: Option<TransportMode>,
    pub pricing: LegPricing,
}

/// A catalog miss that was resolved to a zero contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuoteIssue {
    UnknownDestination {
        sequence_number: u32,
        destination_id: DestinationId,
    },
    UnknownHotel {
        sequence_number: u32,
        hotel_id: HotelId,
    },
    MissingCoordinates {
        leg_index: usize,
        destination_id: DestinationId,
    },
}

/// The full derived state of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripQuote {
    pub stops: Vec<StopQuote>,
    pub legs: Vec<LegQuote>,
    pub total_accommodation_cost: f64,
    pub total_transport_cost: f64,
    pub subtotal: f64,
    pub promo: PromoOutcome,
    pub discount_amount: f64,
    pub total: f64,
    pub total_duration_days: u64,
    /// Stops that have a destination selected
    pub destination_count: usize,
    pub average_daily_cost: f64,
    pub issues: Vec<QuoteIssue>,
}

impl TripQuote {
    /// Arrival date of each stop, in route order.
    pub fn arrival_dates(&self) -> Vec<NaiveDate> {
        self.stops.iter().map(|s| s.arrival_date).collect()
    }
}

/// Distance and price of every built-in mode between two destinations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportOptions {
    pub from: DestinationId,
    pub to: DestinationId,
    /// Distance rounded to whole kilometres, for display
    pub distance_km: f64,
    pub options: Vec<TransportQuote>,
}

/// Computes quotes against one catalog snapshot.
pub struct Quoter<'a> {
    catalog: &'a Catalog,
    config: &'a QuoteConfig,
}

impl<'a> Quoter<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a QuoteConfig) -> Self {
        Self { catalog, config }
    }

    /// Compute the quote for an itinerary.
    pub fn quote(&self, itinerary: &Itinerary, promo_code: Option<&str>) -> TripQuote {
        let mut issues = Vec::new();

        let stops = self.quote_stops(itinerary, &mut issues);
        let legs: Vec<LegQuote> = itinerary
            .legs()
            .iter()
            .enumerate()
            .map(|(i, leg)| self.quote_leg(i, leg, &mut issues))
            .collect();

        let total_accommodation_cost: f64 = stops.iter().map(|s| s.accommodation_cost).sum();
        let total_transport_cost: f64 = legs.iter().map(|l| l.pricing.cost()).sum();
        let subtotal = total_accommodation_cost + total_transport_cost;

        let promo = self.config.promos.apply(promo_code);
        let rate = promo.rate();
        let total = subtotal * (1.0 - rate);
        let discount_amount = subtotal * rate;

        let total_duration_days: u64 = stops.iter().map(|s| u64::from(s.nights)).sum();
        let average_daily_cost = if total_duration_days > 0 {
            total / total_duration_days as f64
        } else {
            0.0
        };
        let destination_count = stops.iter().filter(|s| s.destination_id.is_some()).count();

        debug!(
            stops = stops.len(),
            legs = legs.len(),
            subtotal,
            total,
            issues = issues.len(),
            "itinerary quoted"
        );

        TripQuote {
            stops,
            legs,
            total_accommodation_cost,
            total_transport_cost,
            subtotal,
            promo,
            discount_amount,
            total,
            total_duration_days,
            destination_count,
            average_daily_cost,
            issues,
        }
    }

    /// Distance and per-mode prices between two catalog destinations.
    pub fn transport_options(
        &self,
        from: &DestinationId,
        to: &DestinationId,
    ) -> Result<TransportOptions, LookupError> {
        let distance = haversine_km(self.coordinates_of(from)?, self.coordinates_of(to)?);

        Ok(TransportOptions {
            from: from.clone(),
            to: to.clone(),
            distance_km: distance.round(),
            options: self.config.rules.quote_all(distance),
        })
    }

    fn quote_stops(&self, itinerary: &Itinerary, issues: &mut Vec<QuoteIssue>) -> Vec<StopQuote> {
        itinerary
            .stops()
            .iter()
            .zip(itinerary.schedule())
            .map(|(stop, (arrival_date, departure_date))| {
                let nights = stop.effective_duration();

                self.check_destination(stop, issues);
                let nightly_rate = self.nightly_rate(stop, issues);
                let accommodation_cost = nightly_rate.map_or(0.0, |r| r * f64::from(nights));

                StopQuote {
                    sequence_number: stop.sequence_number,
                    destination_id: stop.destination_id.clone(),
                    arrival_date,
                    departure_date,
                    nights,
                    nightly_rate,
                    accommodation_cost,
                }
            })
            .collect()
    }

    fn check_destination(&self, stop: &Stop, issues: &mut Vec<QuoteIssue>) {
        if let Some(id) = &stop.destination_id
            && self.catalog.destination(id).is_none()
        {
            issues.push(QuoteIssue::UnknownDestination {
                sequence_number: stop.sequence_number,
                destination_id: id.clone(),
            });
        }
    }

    fn nightly_rate(&self, stop: &Stop, issues: &mut Vec<QuoteIssue>) -> Option<f64> {
        let hotel_id = stop.hotel_id.as_ref()?;
        match self.catalog.hotel(hotel_id) {
            Some(hotel) => Some(hotel.nightly_rate),
            None => {
                issues.push(QuoteIssue::UnknownHotel {
                    sequence_number: stop.sequence_number,
                    hotel_id: hotel_id.clone(),
                });
                None
            }
        }
    }

    fn quote_leg(&self, index: usize, leg: &TransportLeg, issues: &mut Vec<QuoteIssue>) -> LegQuote {
        let pricing = self.price_leg(index, leg, issues);

        LegQuote {
            index,
            from_destination_id: leg.from_destination_id.clone(),
            to_destination_id: leg.to_destination_id.clone(),
            mode: leg.mode.clone(),
            pricing,
        }
    }

    fn price_leg(&self, index: usize, leg: &TransportLeg, issues: &mut Vec<QuoteIssue>) -> LegPricing {
        let Some(mode) = &leg.mode else {
            return LegPricing::NoModeSelected;
        };
        let (Some(from), Some(to)) = (&leg.from_destination_id, &leg.to_destination_id) else {
            return LegPricing::IncompleteRoute;
        };

        let mut endpoint = |id: &DestinationId| match self.coordinates_of(id) {
            Ok(c) => Ok(c),
            Err(e) => {
                if matches!(e, LookupError::MissingCoordinates(_)) {
                    issues.push(QuoteIssue::MissingCoordinates {
                        leg_index: index,
                        destination_id: id.clone(),
                    });
                }
                Err(LegPricing::Unresolved {
                    destination_id: id.clone(),
                })
            }
        };

        let a = match endpoint(from) {
            Ok(c) => c,
            Err(unresolved) => return unresolved,
        };
        let b = match endpoint(to) {
            Ok(c) => c,
            Err(unresolved) => return unresolved,
        };

        LegPricing::Priced {
            quote: self.config.rules.quote(haversine_km(a, b), mode),
        }
    }

    fn coordinates_of(&self, id: &DestinationId) -> Result<Coordinate, LookupError> {
        let destination = self
            .catalog
            .destination(id)
            .ok_or_else(|| LookupError::UnknownDestination(id.clone()))?;
        destination
            .coordinates
            .ok_or_else(|| LookupError::MissingCoordinates(id.clone()))
    }
}

/// Quote an itinerary with the default rate table and promo codes.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use trip_server::catalog::sample_catalog;
/// use trip_server::domain::Itinerary;
/// use trip_server::quote::quote_itinerary;
///
/// let empty = Itinerary::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
/// let quote = quote_itinerary(&empty, &sample_catalog(), None);
///
/// assert_eq!(quote.total, 0.0);
/// assert_eq!(quote.total_duration_days, 0);
/// assert!(quote.arrival_dates().is_empty());
/// ```
pub fn quote_itinerary(itinerary: &Itinerary, catalog: &Catalog, promo_code: Option<&str>) -> TripQuote {
    let config = QuoteConfig::default();
    Quoter::new(catalog, &config).quote(itinerary, promo_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Destination, Hotel, sample_catalog};
    use crate::domain::{LegUpdate, StopUpdate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dest(s: &str) -> Option<DestinationId> {
        Some(DestinationId::new(s))
    }

    fn trip(stops: &[(&str, Option<&str>, u32)], modes: &[Option<TransportMode>]) -> Itinerary {
        let mut it = Itinerary::new(date(2024, 1, 1));
        for (i, (d, hotel, days)) in stops.iter().enumerate() {
            let seq = it.add_stop(dest(d)).unwrap();
            it.update_stop(
                seq,
                StopUpdate {
                    hotel_id: hotel.map(HotelId::new),
                    stay_duration_days: Some(*days),
                    ..Default::default()
                },
            )
            .unwrap();
            if i > 0 {
                it.update_leg(
                    i - 1,
                    LegUpdate {
                        mode: modes.get(i - 1).cloned().flatten(),
                        ..Default::default()
                    },
                )
                .unwrap();
            }
        }
        it
    }

    fn small_catalog() -> Catalog {
        let d = |id: &str, lat: f64, lng: f64| Destination {
            id: DestinationId::new(id),
            name: id.to_string(),
            country: String::new(),
            coordinates: Some(Coordinate::new(lat, lng).unwrap()),
            avg_stay_days: 2,
            activities: vec![],
        };
        let mut nowhere = d("nowhere", 0.0, 0.0);
        nowhere.coordinates = None;

        Catalog::new(
            vec![
                d("origin", 0.0, 0.0),
                // one degree of longitude on the equator, about 111 km
                d("east", 0.0, 1.0),
                // about 1112 km
                d("far", 0.0, 10.0),
                nowhere,
            ],
            vec![Hotel {
                id: HotelId::new("std"),
                name: "Standard".to_string(),
                nightly_rate: 100.0,
            }],
        )
        .unwrap()
    }

    #[test]
    fn empty_itinerary_is_all_zero() {
        let quote = quote_itinerary(&Itinerary::new(date(2024, 1, 1)), &small_catalog(), None);

        assert!(quote.stops.is_empty());
        assert!(quote.legs.is_empty());
        assert_eq!(quote.total, 0.0);
        assert_eq!(quote.subtotal, 0.0);
        assert_eq!(quote.total_duration_days, 0);
        assert_eq!(quote.average_daily_cost, 0.0);
        assert!(quote.arrival_dates().is_empty());
    }

    #[test]
    fn arrival_dates_accumulate() {
        let it = trip(
            &[("origin", None, 3), ("east", None, 2), ("far", None, 4)],
            &[],
        );
        let quote = quote_itinerary(&it, &small_catalog(), None);

        assert_eq!(
            quote.arrival_dates(),
            vec![date(2024, 1, 1), date(2024, 1, 4), date(2024, 1, 6)]
        );
        assert_eq!(quote.stops[2].departure_date, date(2024, 1, 10));
        assert_eq!(quote.total_duration_days, 9);
    }

    #[test]
    fn accommodation_uses_nightly_rate() {
        let it = trip(&[("origin", Some("std"), 3), ("east", None, 2)], &[]);
        let quote = quote_itinerary(&it, &small_catalog(), None);

        assert_eq!(quote.stops[0].accommodation_cost, 300.0);
        assert_eq!(quote.stops[1].accommodation_cost, 0.0);
        assert_eq!(quote.total_accommodation_cost, 300.0);
        assert_eq!(quote.total_transport_cost, 0.0);
        assert!(matches!(quote.legs[0].pricing, LegPricing::NoModeSelected));
    }

    #[test]
    fn transport_priced_by_distance() {
        let it = trip(
            &[("origin", None, 1), ("east", None, 1)],
            &[Some(TransportMode::Train)],
        );
        let quote = quote_itinerary(&it, &small_catalog(), None);

        // 111.19 km * 0.12 = 13.34
        assert_eq!(quote.total_transport_cost, 13.0);
        match &quote.legs[0].pricing {
            LegPricing::Priced { quote } => assert!(quote.is_available),
            other => panic!("expected priced leg, got {other:?}"),
        }
    }

    #[test]
    fn unavailable_mode_adds_nothing() {
        let it = trip(
            &[("origin", None, 1), ("far", None, 1)],
            &[Some(TransportMode::Car)],
        );
        let quote = quote_itinerary(&it, &small_catalog(), None);

        match &quote.legs[0].pricing {
            LegPricing::Priced { quote } => {
                assert!(!quote.is_available);
                assert!(quote.estimated_price > 0.0);
            }
            other => panic!("expected priced leg, got {other:?}"),
        }
        assert_eq!(quote.total_transport_cost, 0.0);
        assert_eq!(quote.total, 0.0);
    }

    #[test]
    fn promo_discounts_subtotal() {
        // 10 nights at 100
        let it = trip(&[("origin", Some("std"), 10)], &[]);
        let catalog = small_catalog();

        let quote = quote_itinerary(&it, &catalog, Some("summer20"));
        assert_eq!(quote.subtotal, 1000.0);
        assert_eq!(quote.discount_amount, 200.0);
        assert_eq!(quote.total, 800.0);
        assert_eq!(quote.average_daily_cost, 80.0);

        let quote = quote_itinerary(&it, &catalog, Some("BOGUS"));
        assert_eq!(quote.total, 1000.0);
        assert!(quote.promo.is_rejected());
    }

    #[test]
    fn missing_references_are_reported() {
        let it = trip(
            &[("origin", Some("gold"), 2), ("atlantis", None, 1), ("nowhere", None, 1)],
            &[Some(TransportMode::Flight), Some(TransportMode::Flight)],
        );
        let quote = quote_itinerary(&it, &small_catalog(), None);

        assert_eq!(quote.total, 0.0);
        assert_eq!(
            quote.issues,
            vec![
                QuoteIssue::UnknownHotel {
                    sequence_number: 1,
                    hotel_id: HotelId::new("gold"),
                },
                QuoteIssue::UnknownDestination {
                    sequence_number: 2,
                    destination_id: DestinationId::new("atlantis"),
                },
            ]
        );
        assert_eq!(
            quote.legs[0].pricing,
            LegPricing::Unresolved {
                destination_id: DestinationId::new("atlantis")
            }
        );
        // atlantis is unknown, so the second leg stops there before checking nowhere
        assert_eq!(
            quote.legs[1].pricing,
            LegPricing::Unresolved {
                destination_id: DestinationId::new("atlantis")
            }
        );
    }

    #[test]
    fn missing_coordinates_issue() {
        let it = trip(
            &[("origin", None, 1), ("nowhere", None, 1)],
            &[Some(TransportMode::Bus)],
        );
        let quote = quote_itinerary(&it, &small_catalog(), None);

        assert_eq!(
            quote.issues,
            vec![QuoteIssue::MissingCoordinates {
                leg_index: 0,
                destination_id: DestinationId::new("nowhere"),
            }]
        );
        assert_eq!(quote.total_transport_cost, 0.0);
    }

    #[test]
    fn stops_without_destination() {
        let mut it = Itinerary::new(date(2024, 1, 1));
        it.add_stop(dest("origin")).unwrap();
        it.add_stop(None).unwrap();
        it.update_leg(
            0,
            LegUpdate {
                mode: Some(TransportMode::Flight),
                ..Default::default()
            },
        )
        .unwrap();

        let quote = quote_itinerary(&it, &small_catalog(), None);
        assert_eq!(quote.destination_count, 1);
        assert_eq!(quote.total_duration_days, 2);
        assert_eq!(quote.legs[0].pricing, LegPricing::IncompleteRoute);
        assert!(quote.issues.is_empty());
    }

    #[test]
    fn transport_options_between_destinations() {
        let catalog = sample_catalog();
        let config = QuoteConfig::default();
        let quoter = Quoter::new(&catalog, &config);

        let options = quoter
            .transport_options(
                &DestinationId::new("algiers-algeria"),
                &DestinationId::new("paris-france"),
            )
            .unwrap();

        // Algiers to Paris is about 1350 km
        assert!((options.distance_km - 1350.0).abs() < 30.0);
        assert_eq!(options.options.len(), 4);
        let available: Vec<_> = options.options.iter().map(|q| q.is_available).collect();
        assert_eq!(available, vec![true, true, false, false]);

        let err = quoter
            .transport_options(
                &DestinationId::new("atlantis"),
                &DestinationId::new("paris-france"),
            )
            .unwrap_err();
        assert_eq!(err, LookupError::UnknownDestination(DestinationId::new("atlantis")));
    }

    #[test]
    fn quoting_is_deterministic() {
        let it = trip(
            &[("origin", Some("std"), 2), ("east", Some("std"), 3), ("far", None, 1)],
            &[Some(TransportMode::Flight), Some(TransportMode::Train)],
        );
        let catalog = small_catalog();
        assert_eq!(
            quote_itinerary(&it, &catalog, Some("WELCOME10")),
            quote_itinerary(&it, &catalog, Some("WELCOME10"))
        );
    }

    #[test]
    fn very_long_stays_keep_exact_dates() {
        let json = r#"{
            "trip_start_date": "2024-01-01",
            "stops": [
                {"sequence_number": 1, "destination_id": "origin", "hotel_id": "std", "stay_duration_days": 30000000},
                {"sequence_number": 2, "destination_id": "east", "stay_duration_days": 30000000}
            ],
            "legs": [{"from_destination_id": "origin", "to_destination_id": "east"}]
        }"#;
        let it: Itinerary = serde_json::from_str(json).unwrap();
        let quote = quote_itinerary(&it, &small_catalog(), None);

        assert_eq!(quote.total_duration_days, 60_000_000);
        assert_eq!(quote.stops[1].arrival_date, quote.stops[0].departure_date);
        assert_eq!(
            quote.stops[1].departure_date,
            date(2024, 1, 1)
                .checked_add_days(chrono::Days::new(60_000_000))
                .unwrap()
        );
        assert!(quote.average_daily_cost > 0.0);
    }
}
