//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{QuoteCache, QuoteCacheConfig};
use crate::catalog::SharedCatalog;
use crate::quote::{QuoteConfig, SuggestionConfig};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Destination and hotel catalog (refreshable)
    pub catalog: SharedCatalog,

    /// Rate table and promo codes
    pub config: Arc<QuoteConfig>,

    /// Defaults for suggested itineraries
    pub suggestions: Arc<SuggestionConfig>,

    /// Quotes of shared itinerary tokens
    pub quotes: Arc<QuoteCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        catalog: SharedCatalog,
        config: QuoteConfig,
        suggestions: SuggestionConfig,
        cache_config: &QuoteCacheConfig,
    ) -> Self {
        Self {
            catalog,
            config: Arc::new(config),
            suggestions: Arc::new(suggestions),
            quotes: Arc::new(QuoteCache::new(cache_config)),
        }
    }
}
