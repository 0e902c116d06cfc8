//! Domain error types.
//!
//! These errors represent structural violations of an itinerary. They are
//! distinct from catalog lookups, which never fail a quote.

/// Errors from itinerary construction and editing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItineraryError {
    /// No stop carries this sequence number
    #[error("no stop with sequence number {0}")]
    UnknownStop(u32),

    /// No leg at this index
    #[error("no leg at index {0}")]
    UnknownLeg(usize),

    /// A stop with a destination was given a zero-day stay
    #[error("stop {0} must stay at least one day")]
    ZeroDuration(u32),

    /// Sequence numbers must run 1, 2, 3, ... in order
    #[error("expected sequence number {expected}, found {found}")]
    NonContiguousSequence { expected: u32, found: u32 },

    /// There must be exactly one leg between each pair of consecutive stops
    #[error("{stops} stops need {expected} legs, found {legs}")]
    LegCountMismatch {
        stops: usize,
        legs: usize,
        expected: usize,
    },

    /// A leg's endpoints disagree with the stops it connects
    #[error("leg {0} does not connect the destinations of its neighbouring stops")]
    LegMismatch(usize),

    /// Stays add up past the last date the calendar can represent
    #[error("stop {0} would end after the last supported date")]
    DateOutOfRange(u32),
}
