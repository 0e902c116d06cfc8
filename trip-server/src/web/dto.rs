//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{DestinationId, Itinerary};
use crate::quote::TripQuote;

/// Request to quote an itinerary.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub itinerary: Itinerary,

    /// Optional promo code, matched case-insensitively
    #[serde(default)]
    pub promo_code: Option<String>,
}

/// Query for the transport picker.
#[derive(Debug, Deserialize)]
pub struct TransportOptionsQuery {
    pub from: DestinationId,
    pub to: DestinationId,
}

/// Request to check a promo code without quoting.
#[derive(Debug, Deserialize)]
pub struct PromoValidateRequest {
    pub code: String,
}

/// A recognised promo code.
#[derive(Debug, Serialize)]
pub struct PromoValidateResponse {
    /// Normalised (upper-case) code
    pub code: String,

    /// Discount rate in [0, 1]
    pub rate: f64,
}

/// Request to create a share token.
#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub itinerary: Itinerary,
}

/// A share token for the `itinerary` query parameter.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub token: String,
}

/// Query for opening a shared itinerary.
#[derive(Debug, Deserialize)]
pub struct SharedQuery {
    /// Share token
    pub itinerary: String,

    #[serde(default)]
    pub promo_code: Option<String>,
}

/// An itinerary together with its quote.
#[derive(Debug, Serialize)]
pub struct ItineraryQuoteResponse {
    pub itinerary: Itinerary,
    pub quote: TripQuote,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
