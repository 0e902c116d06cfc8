//! Transport pricing and promo-code discounts.

mod promo;
mod rules;

pub use promo::{PromoCodes, PromoError, PromoOutcome};
pub use rules::{PricingRules, TransportQuote, price_all_modes, price_transport};
