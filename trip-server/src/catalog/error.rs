//! Catalog error types.

/// Errors that can occur while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote catalog returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to read a catalog file
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Failed to parse catalog JSON (including out-of-range coordinates)
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Two entries share an id
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CatalogError::DuplicateId {
            kind: "hotel",
            id: "luxury".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate hotel id: luxury");

        let err = CatalogError::Api {
            status: 503,
            message: "down".to_string(),
        };
        assert_eq!(err.to_string(), "API error 503: down");
    }
}
