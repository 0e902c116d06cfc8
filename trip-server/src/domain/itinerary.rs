//! Itinerary types and editing operations.
//!
//! An `Itinerary` is an ordered route of stops joined by transport legs,
//! starting on a given date. Leg `i` always connects stop `i` to stop
//! `i + 1`, and every editing operation below keeps it that way.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{DestinationId, HotelId, ItineraryError, TransportMode};

/// One destination visited in sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Position in the route, starting at 1
    pub sequence_number: u32,

    /// Chosen destination, if the user has picked one yet
    #[serde(default)]
    pub destination_id: Option<DestinationId>,

    /// Chosen hotel, if any
    #[serde(default)]
    pub hotel_id: Option<HotelId>,

    /// Nights spent at this stop
    pub stay_duration_days: u32,

    /// Free-form activity tags
    #[serde(default)]
    pub activities: Vec<String>,
}

impl Stop {
    /// Creates a one-day stop with no hotel.
    pub fn new(sequence_number: u32, destination_id: Option<DestinationId>) -> Self {
        Self {
            sequence_number,
            destination_id,
            hotel_id: None,
            stay_duration_days: 1,
            activities: Vec::new(),
        }
    }

    /// Stay length used for dates and costs.
    ///
    /// A zero duration counts as one day so date ranges never run backwards.
    pub fn effective_duration(&self) -> u32 {
        self.stay_duration_days.max(1)
    }
}

/// A transport segment between two consecutive stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportLeg {
    #[serde(default)]
    pub from_destination_id: Option<DestinationId>,

    #[serde(default)]
    pub to_destination_id: Option<DestinationId>,

    /// Chosen mode; `None` until the user picks one
    #[serde(default)]
    pub mode: Option<TransportMode>,
}

impl TransportLeg {
    /// Creates a leg between two destinations with no mode selected.
    pub fn new(from: Option<DestinationId>, to: Option<DestinationId>) -> Self {
        Self {
            from_destination_id: from,
            to_destination_id: to,
            mode: None,
        }
    }

    /// Sets the mode, builder-style.
    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// Partial edit of a stop. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopUpdate {
    pub destination_id: Option<DestinationId>,
    pub hotel_id: Option<HotelId>,
    /// Remove the hotel selection (applied before `hotel_id`)
    #[serde(default)]
    pub clear_hotel: bool,
    pub stay_duration_days: Option<u32>,
    pub activities: Option<Vec<String>>,
}

/// Partial edit of a leg.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegUpdate {
    pub mode: Option<TransportMode>,
    /// Remove the mode selection (applied before `mode`)
    #[serde(default)]
    pub clear_mode: bool,
}

/// An ordered route of stops and legs with a start date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use trip_server::domain::{DestinationId, Itinerary, StopUpdate};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let mut trip = Itinerary::new(start);
/// trip.add_stop(Some(DestinationId::new("alger-algeria"))).unwrap();
/// let second = trip.add_stop(Some(DestinationId::new("oran-algeria"))).unwrap();
///
/// trip.update_stop(1, StopUpdate { stay_duration_days: Some(3), ..Default::default() })
///     .unwrap();
///
/// assert_eq!(trip.legs().len(), 1);
/// assert_eq!(trip.arrival_offset_days(second), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawItinerary")]
pub struct Itinerary {
    trip_start_date: NaiveDate,
    stops: Vec<Stop>,
    legs: Vec<TransportLeg>,
}

/// Unvalidated wire form, checked on the way into `Itinerary`.
#[derive(Deserialize)]
struct RawItinerary {
    trip_start_date: NaiveDate,
    #[serde(default)]
    stops: Vec<Stop>,
    #[serde(default)]
    legs: Vec<TransportLeg>,
}

impl TryFrom<RawItinerary> for Itinerary {
    type Error = ItineraryError;

    fn try_from(raw: RawItinerary) -> Result<Self, Self::Error> {
        Itinerary::from_parts(raw.trip_start_date, raw.stops, raw.legs)
    }
}

impl Itinerary {
    /// Creates an empty itinerary.
    pub fn new(trip_start_date: NaiveDate) -> Self {
        Self {
            trip_start_date,
            stops: Vec::new(),
            legs: Vec::new(),
        }
    }

    /// Builds an itinerary from its parts, checking every invariant.
    pub fn from_parts(
        trip_start_date: NaiveDate,
        stops: Vec<Stop>,
        legs: Vec<TransportLeg>,
    ) -> Result<Self, ItineraryError> {
        let itinerary = Self {
            trip_start_date,
            stops,
            legs,
        };
        itinerary.validate()?;
        Ok(itinerary)
    }

    /// Checks the structural invariants.
    pub fn validate(&self) -> Result<(), ItineraryError> {
        for (i, stop) in self.stops.iter().enumerate() {
            let expected = i as u32 + 1;
            if stop.sequence_number != expected {
                return Err(ItineraryError::NonContiguousSequence {
                    expected,
                    found: stop.sequence_number,
                });
            }
            if stop.destination_id.is_some() && stop.stay_duration_days == 0 {
                return Err(ItineraryError::ZeroDuration(stop.sequence_number));
            }
        }

        let expected_legs = self.stops.len().saturating_sub(1);
        if self.legs.len() != expected_legs {
            return Err(ItineraryError::LegCountMismatch {
                stops: self.stops.len(),
                legs: self.legs.len(),
                expected: expected_legs,
            });
        }

        for (i, leg) in self.legs.iter().enumerate() {
            if leg.from_destination_id != self.stops[i].destination_id
                || leg.to_destination_id != self.stops[i + 1].destination_id
            {
                return Err(ItineraryError::LegMismatch(i));
            }
        }

        self.check_dates()
    }

    /// Every stop must depart on a date chrono can represent.
    fn check_dates(&self) -> Result<(), ItineraryError> {
        match self.stops.get(self.schedule().len()) {
            Some(stop) => Err(ItineraryError::DateOutOfRange(stop.sequence_number)),
            None => Ok(()),
        }
    }

    pub fn trip_start_date(&self) -> NaiveDate {
        self.trip_start_date
    }

    /// Moves the trip start, keeping every stop's dates in range.
    pub fn set_start_date(&mut self, date: NaiveDate) -> Result<(), ItineraryError> {
        let previous = std::mem::replace(&mut self.trip_start_date, date);
        if let Err(e) = self.check_dates() {
            self.trip_start_date = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Stops in route order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Legs in route order; leg `i` follows stop `i`.
    pub fn legs(&self) -> &[TransportLeg] {
        &self.legs
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Looks up a stop by sequence number.
    pub fn stop(&self, sequence_number: u32) -> Option<&Stop> {
        let index = (sequence_number as usize).checked_sub(1)?;
        self.stops.get(index)
    }

    /// Days elapsed between the trip start and arrival at the given stop.
    pub fn arrival_offset_days(&self, sequence_number: u32) -> Option<u64> {
        let index = (sequence_number as usize).checked_sub(1)?;
        if index >= self.stops.len() {
            return None;
        }
        Some(
            self.stops[..index]
                .iter()
                .map(|s| u64::from(s.effective_duration()))
                .sum(),
        )
    }

    /// Arrival and departure date of each stop, in route order.
    ///
    /// Covers every stop: construction and edits reject stays that would
    /// run past the end of the calendar.
    pub fn schedule(&self) -> Vec<(NaiveDate, NaiveDate)> {
        let mut arrival = self.trip_start_date;
        self.stops
            .iter()
            .map_while(|stop| {
                let stay = Days::new(u64::from(stop.effective_duration()));
                let departure = arrival.checked_add_days(stay)?;
                Some((std::mem::replace(&mut arrival, departure), departure))
            })
            .collect()
    }

    /// Arrival date at the given stop.
    pub fn arrival_date(&self, sequence_number: u32) -> Option<NaiveDate> {
        let offset = self.arrival_offset_days(sequence_number)?;
        self.trip_start_date
            .checked_add_days(Days::new(offset))
    }

    /// Appends a one-day stop, joined to the previous stop by a new leg.
    ///
    /// Returns the sequence number of the new stop.
    pub fn add_stop(&mut self, destination_id: Option<DestinationId>) -> Result<u32, ItineraryError> {
        let sequence_number = self.stops.len() as u32 + 1;

        let leg = self
            .stops
            .last()
            .map(|previous| TransportLeg::new(previous.destination_id.clone(), destination_id.clone()));
        let linked = leg.is_some();
        self.legs.extend(leg);
        self.stops.push(Stop::new(sequence_number, destination_id));

        if let Err(e) = self.check_dates() {
            self.stops.pop();
            if linked {
                self.legs.pop();
            }
            return Err(e);
        }
        Ok(sequence_number)
    }

    /// Applies a partial edit to a stop.
    ///
    /// Changing the destination re-links the legs on either side.
    pub fn update_stop(
        &mut self,
        sequence_number: u32,
        update: StopUpdate,
    ) -> Result<(), ItineraryError> {
        let index = self.stop_index(sequence_number)?;

        if update.stay_duration_days == Some(0) {
            return Err(ItineraryError::ZeroDuration(sequence_number));
        }

        if let Some(days) = update.stay_duration_days {
            let previous = std::mem::replace(&mut self.stops[index].stay_duration_days, days);
            if let Err(e) = self.check_dates() {
                self.stops[index].stay_duration_days = previous;
                return Err(e);
            }
        }

        let stop = &mut self.stops[index];
        if update.clear_hotel {
            stop.hotel_id = None;
        }
        if let Some(hotel) = update.hotel_id {
            stop.hotel_id = Some(hotel);
        }
        if let Some(activities) = update.activities {
            stop.activities = activities;
        }
        if let Some(destination) = update.destination_id {
            stop.destination_id = Some(destination);
            self.relink(index);
        }

        Ok(())
    }

    /// Applies a partial edit to a leg.
    pub fn update_leg(&mut self, index: usize, update: LegUpdate) -> Result<(), ItineraryError> {
        let leg = self
            .legs
            .get_mut(index)
            .ok_or(ItineraryError::UnknownLeg(index))?;

        if update.clear_mode {
            leg.mode = None;
        }
        if let Some(mode) = update.mode {
            leg.mode = Some(mode);
        }
        Ok(())
    }

    /// Removes a stop and renumbers the ones after it.
    ///
    /// Removing an interior stop joins its neighbours with a single leg that
    /// keeps the mode of the removed stop's outgoing leg.
    pub fn remove_stop(&mut self, sequence_number: u32) -> Result<Stop, ItineraryError> {
        let index = self.stop_index(sequence_number)?;
        let last = self.stops.len() - 1;

        if !self.legs.is_empty() {
            if index == 0 {
                self.legs.remove(0);
            } else if index == last {
                self.legs.pop();
            } else {
                let outgoing = self.legs.remove(index);
                let incoming = &mut self.legs[index - 1];
                incoming.to_destination_id = outgoing.to_destination_id;
                incoming.mode = outgoing.mode;
            }
        }

        let removed = self.stops.remove(index);
        for (i, stop) in self.stops.iter_mut().enumerate().skip(index) {
            stop.sequence_number = i as u32 + 1;
        }

        Ok(removed)
    }

    fn stop_index(&self, sequence_number: u32) -> Result<usize, ItineraryError> {
        match (sequence_number as usize).checked_sub(1) {
            Some(index) if index < self.stops.len() => Ok(index),
            _ => Err(ItineraryError::UnknownStop(sequence_number)),
        }
    }

    /// Points the legs around stop `index` at its current destination.
    fn relink(&mut self, index: usize) {
        let destination = self.stops[index].destination_id.clone();
        if index > 0 {
            self.legs[index - 1].to_destination_id = destination.clone();
        }
        if let Some(leg) = self.legs.get_mut(index) {
            leg.from_destination_id = destination;
        }
    }
}
