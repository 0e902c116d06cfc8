//! Quote lookup errors.

use crate::domain::DestinationId;

/// A destination could not be resolved to coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("unknown destination: {0}")]
    UnknownDestination(DestinationId),

    #[error("destination {0} has no coordinates")]
    MissingCoordinates(DestinationId),
}
