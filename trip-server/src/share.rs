//! Shareable itinerary tokens.
//!
//! A token is the itinerary's JSON form, base64 encoded so it can ride in a
//! query string. Decoding runs the same validation as any other
//! deserialised itinerary, so a tampered token cannot produce a broken
//! route.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use thiserror::Error;
use tracing::warn;

use crate::domain::Itinerary;

/// Errors creating or decoding a share token.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("add at least one destination before sharing an itinerary")]
    NoDestination,

    #[error("failed to encode itinerary: {0}")]
    Encode(String),

    #[error("share token is not valid base64")]
    Base64,

    #[error("share token does not hold a valid itinerary: {0}")]
    Json(String),
}

/// Encode an itinerary as a URL-safe token.
///
/// An itinerary without any destination has nothing worth sharing and is
/// refused.
///
/// ```
/// use chrono::NaiveDate;
/// use trip_server::domain::{DestinationId, Itinerary};
/// use trip_server::share;
///
/// let mut it = Itinerary::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
/// it.add_stop(Some(DestinationId::new("oran-algeria"))).unwrap();
///
/// let token = share::encode(&it).unwrap();
/// assert_eq!(share::decode(&token).unwrap(), it);
/// ```
pub fn encode(itinerary: &Itinerary) -> Result<String, ShareError> {
    if itinerary.stops().iter().all(|s| s.destination_id.is_none()) {
        return Err(ShareError::NoDestination);
    }

    let json = serde_json::to_vec(itinerary).map_err(|e| ShareError::Encode(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a token produced by [`encode`].
///
/// Standard padded base64 is accepted too, for links built by other
/// clients.
pub fn decode(token: &str) -> Result<Itinerary, ShareError> {
    let token = token.trim();
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .or_else(|_| STANDARD.decode(token))
        .map_err(|_| {
            warn!(len = token.len(), "rejected share token: bad base64");
            ShareError::Base64
        })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(error = %e, "rejected share token: bad itinerary");
        ShareError::Json(e.to_string())
    })
}
