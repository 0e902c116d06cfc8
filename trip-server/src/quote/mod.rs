//! Itinerary quoting.
//!
//! Turns an itinerary plus a catalog snapshot into per-stop dates and a
//! costed total. The computation is pure: the same inputs always produce
//! the same `TripQuote`, and nothing here touches shared state.

mod aggregate;
mod config;
mod error;
mod suggest;

pub use aggregate::{
    LegPricing, LegQuote, QuoteIssue, Quoter, StopQuote, TransportOptions, TripQuote,
    quote_itinerary,
};
pub use config::{QuoteConfig, SuggestionConfig};
pub use error::LookupError;
pub use suggest::{SuggestionRequest, TravelStyle, suggest_itinerary};
