//! Per-kilometre transport pricing.

use serde::Serialize;

use crate::domain::TransportMode;

/// Rate table and distance limits for transport pricing.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRules {
    /// Flight rate up to and including `flight_long_haul_km`.
    pub flight_short_rate: f64,

    /// Flight rate beyond `flight_long_haul_km`.
    pub flight_long_rate: f64,

    /// Distance above which flights use the long-haul rate.
    pub flight_long_haul_km: f64,

    pub train_rate: f64,

    /// Trains are unavailable at or beyond this distance.
    pub train_max_km: f64,

    pub bus_rate: f64,

    /// Buses are unavailable at or beyond this distance.
    pub bus_max_km: f64,

    pub car_rate: f64,

    /// Cars are unavailable at or beyond this distance.
    pub car_max_km: f64,

    /// Rate for modes without a rule of their own.
    pub fallback_rate: f64,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            flight_short_rate: 0.25,
            flight_long_rate: 0.15,
            flight_long_haul_km: 500.0,
            train_rate: 0.12,
            train_max_km: 1800.0,
            bus_rate: 0.08,
            bus_max_km: 1000.0,
            car_rate: 0.10,
            car_max_km: 1000.0,
            fallback_rate: 0.15,
        }
    }
}

/// Price estimate for one mode over one distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportQuote {
    pub mode: TransportMode,
    pub distance_km: f64,
    pub price_per_km: f64,
    /// `round(distance_km * price_per_km)`, whether or not the mode is available
    pub estimated_price: f64,
    pub is_available: bool,
}

impl TransportQuote {
    /// The amount this quote adds to a trip total.
    ///
    /// Unavailable modes contribute nothing.
    pub fn billable_price(&self) -> f64 {
        if self.is_available {
            self.estimated_price
        } else {
            0.0
        }
    }
}

impl PricingRules {
    /// Price a single mode over the given distance.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_server::domain::TransportMode;
    /// use trip_server::pricing::PricingRules;
    ///
    /// let rules = PricingRules::default();
    ///
    /// let q = rules.quote(1000.0, &TransportMode::Flight);
    /// assert_eq!(q.price_per_km, 0.15);
    /// assert_eq!(q.estimated_price, 150.0);
    ///
    /// let q = rules.quote(1000.0, &TransportMode::Bus);
    /// assert!(!q.is_available);
    /// assert_eq!(q.billable_price(), 0.0);
    /// ```
    pub fn quote(&self, distance_km: f64, mode: &TransportMode) -> TransportQuote {
        let price_per_km = self.rate_for(distance_km, mode);

        TransportQuote {
            mode: mode.clone(),
            distance_km,
            price_per_km,
            estimated_price: (distance_km * price_per_km).round(),
            is_available: self.is_available(distance_km, mode),
        }
    }

    /// Quotes for every built-in mode, in picker order.
    pub fn quote_all(&self, distance_km: f64) -> Vec<TransportQuote> {
        TransportMode::BUILT_IN
            .iter()
            .map(|mode| self.quote(distance_km, mode))
            .collect()
    }

    fn rate_for(&self, distance_km: f64, mode: &TransportMode) -> f64 {
        match mode {
            TransportMode::Flight if distance_km > self.flight_long_haul_km => {
                self.flight_long_rate
            }
            TransportMode::Flight => self.flight_short_rate,
            TransportMode::Train => self.train_rate,
            TransportMode::Bus => self.bus_rate,
            TransportMode::Car => self.car_rate,
            TransportMode::Other(_) => self.fallback_rate,
        }
    }

    fn is_available(&self, distance_km: f64, mode: &TransportMode) -> bool {
        match mode {
            TransportMode::Train => distance_km < self.train_max_km,
            TransportMode::Bus => distance_km < self.bus_max_km,
            TransportMode::Car => distance_km < self.car_max_km,
            TransportMode::Flight | TransportMode::Other(_) => true,
        }
    }
}

/// Price a mode with the default rate table.
pub fn price_transport(distance_km: f64, mode: &TransportMode) -> TransportQuote {
    PricingRules::default().quote(distance_km, mode)
}

/// Default-table quotes for every built-in mode.
pub fn price_all_modes(distance_km: f64) -> Vec<TransportQuote> {
    PricingRules::default().quote_all(distance_km)
}
