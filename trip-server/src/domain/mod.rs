//! Domain types for the itinerary builder.
//!
//! This module contains the core domain model types: validated
//! coordinates, catalog identifiers, transport modes and the itinerary
//! itself. Types enforce their invariants at construction time, so code
//! that receives them can trust their validity.

mod coordinate;
mod error;
mod ids;
mod itinerary;
mod mode;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use error::ItineraryError;
pub use ids::{DestinationId, HotelId};
pub use itinerary::{Itinerary, LegUpdate, Stop, StopUpdate, TransportLeg};
pub use mode::{CustomMode, TransportMode};
