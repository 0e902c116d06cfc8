//! Quote configuration.

use crate::domain::{DestinationId, TransportMode};
use crate::pricing::{PricingRules, PromoCodes};

/// Rate table and promo codes used when quoting.
#[derive(Debug, Clone, Default)]
pub struct QuoteConfig {
    pub rules: PricingRules,
    pub promos: PromoCodes,
}

impl QuoteConfig {
    pub fn new(rules: PricingRules, promos: PromoCodes) -> Self {
        Self { rules, promos }
    }
}

/// Defaults for generated itineraries.
#[derive(Debug, Clone)]
pub struct SuggestionConfig {
    /// Destinations used when no interest matches anything in the catalog.
    pub fallback_destinations: Vec<DestinationId>,

    /// Number of stops when the request does not say.
    pub default_stops: usize,

    /// Mode preselected on every generated leg.
    pub default_mode: TransportMode,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            fallback_destinations: vec![
                DestinationId::new("algiers-algeria"),
                DestinationId::new("constantine-algeria"),
            ],
            default_stops: 2,
            default_mode: TransportMode::Flight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QuoteConfig::default();
        assert_eq!(config.rules, PricingRules::default());
        assert_eq!(config.promos.rate("SUMMER20"), Ok(0.20));
    }

    #[test]
    fn default_suggestions() {
        let config = SuggestionConfig::default();
        assert_eq!(config.default_stops, 2);
        assert_eq!(config.default_mode, TransportMode::Flight);
        assert_eq!(config.fallback_destinations.len(), 2);
    }
}
