//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::{debug, error, warn};

use crate::cache::SharedQuote;
use crate::catalog::{Destination, Hotel};
use crate::domain::ItineraryError;
use crate::pricing::PromoError;
use crate::quote::{
    LookupError, Quoter, SuggestionRequest, TransportOptions, TripQuote, suggest_itinerary,
};
use crate::share::{self, ShareError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/destinations", get(list_destinations))
        .route("/api/hotels", get(list_hotels))
        .route("/api/transport/options", get(transport_options))
        .route("/api/quote", post(quote_itinerary))
        .route("/api/promo/validate", post(validate_promo))
        .route("/api/itinerary/share", post(share_itinerary))
        .route("/api/itinerary/shared", get(open_shared))
        .route("/api/itinerary/suggest", post(suggest))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn list_destinations(State(state): State<AppState>) -> Json<Vec<Destination>> {
    let catalog = state.catalog.snapshot().await;
    Json(catalog.destinations().to_vec())
}

async fn list_hotels(State(state): State<AppState>) -> Json<Vec<Hotel>> {
    let catalog = state.catalog.snapshot().await;
    Json(catalog.hotels().to_vec())
}

/// Distance and per-mode prices between two destinations.
async fn transport_options(
    State(state): State<AppState>,
    query: Result<Query<TransportOptionsQuery>, QueryRejection>,
) -> Result<Json<TransportOptions>, AppError> {
    let Query(query) = query?;
    let catalog = state.catalog.snapshot().await;

    let options = Quoter::new(&catalog, &state.config).transport_options(&query.from, &query.to)?;
    Ok(Json(options))
}

/// Quote an itinerary, with an optional promo code.
async fn quote_itinerary(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<TripQuote>, AppError> {
    let Json(req) = payload?;
    let catalog = state.catalog.snapshot().await;

    let quote = Quoter::new(&catalog, &state.config).quote(&req.itinerary, req.promo_code.as_deref());
    Ok(Json(quote))
}

async fn validate_promo(
    State(state): State<AppState>,
    payload: Result<Json<PromoValidateRequest>, JsonRejection>,
) -> Result<Json<PromoValidateResponse>, AppError> {
    let Json(req) = payload?;
    let rate = state.config.promos.rate(&req.code)?;

    Ok(Json(PromoValidateResponse {
        code: req.code.trim().to_uppercase(),
        rate,
    }))
}

async fn share_itinerary(
    payload: Result<Json<ShareRequest>, JsonRejection>,
) -> Result<Json<ShareResponse>, AppError> {
    let Json(req) = payload?;
    Ok(Json(ShareResponse {
        token: share::encode(&req.itinerary)?,
    }))
}

/// Decode a share token and quote it, memoised per (token, promo code).
async fn open_shared(
    State(state): State<AppState>,
    query: Result<Query<SharedQuery>, QueryRejection>,
) -> Result<Json<ItineraryQuoteResponse>, AppError> {
    let Query(query) = query?;
    let promo = query.promo_code.as_deref();

    if let Some(hit) = state.quotes.get(&query.itinerary, promo).await {
        debug!("shared quote cache hit");
        return Ok(Json(ItineraryQuoteResponse {
            itinerary: hit.itinerary.clone(),
            quote: hit.quote.clone(),
        }));
    }

    let itinerary = share::decode(&query.itinerary)?;
    let catalog = state.catalog.snapshot().await;
    let quote = Quoter::new(&catalog, &state.config).quote(&itinerary, promo);

    let entry = Arc::new(SharedQuote { itinerary, quote });
    state
        .quotes
        .insert(&query.itinerary, promo, entry.clone())
        .await;

    Ok(Json(ItineraryQuoteResponse {
        itinerary: entry.itinerary.clone(),
        quote: entry.quote.clone(),
    }))
}

/// Generate a starter itinerary from preferences, already quoted.
async fn suggest(
    State(state): State<AppState>,
    payload: Result<Json<SuggestionRequest>, JsonRejection>,
) -> Result<Json<ItineraryQuoteResponse>, AppError> {
    let Json(req) = payload?;
    let catalog = state.catalog.snapshot().await;

    let itinerary = suggest_itinerary(&catalog, &req, &state.suggestions)?;
    let quote = Quoter::new(&catalog, &state.config).quote(&itinerary, None);

    Ok(Json(ItineraryQuoteResponse { itinerary, quote }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<ShareError> for AppError {
    fn from(e: ShareError) -> Self {
        match e {
            ShareError::Encode(_) => AppError::Internal {
                message: e.to_string(),
            },
            ShareError::NoDestination | ShareError::Base64 | ShareError::Json(_) => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<ItineraryError> for AppError {
    fn from(e: ItineraryError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<PromoError> for AppError {
    fn from(e: PromoError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::UnknownDestination(_) => AppError::NotFound {
                message: e.to_string(),
            },
            LookupError::MissingCoordinates(_) => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
