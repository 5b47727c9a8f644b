use thiserror::Error;

/// Convenient result alias for the nearby places library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// No provider API key was configured.
    #[error("GOOGLE_API_KEY environment variable is not set. Please provide a valid Google Maps API key.")]
    MissingApiKey,

    /// A configuration value could not be interpreted.
    #[error("invalid configuration value for {name}: {reason}")]
    InvalidConfig { name: String, reason: String },

    /// Raised when a latitude or longitude is not a usable decimal coordinate.
    #[error("invalid {name} '{value}': {reason}")]
    InvalidCoordinate {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Raised when the search radius is negative or not a finite number.
    #[error("invalid radius {value}: must be a positive number of meters")]
    InvalidRadius { value: f64 },

    /// Raised when a provider response body could not be decoded.
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Raised when the provider answered with a non-success status field.
    #[error("{endpoint} request rejected with status {status}{}", format_message(.message))]
    ProviderStatus {
        endpoint: &'static str,
        status: String,
        message: Option<String>,
    },

    /// Raised when a place details response carried no result object.
    #[error("place details response for {place_id} did not contain a result")]
    MissingDetailResult { place_id: String },

    /// Raised when a detail fetch fails in strict mode.
    #[error("failed to fetch details for place {place_id}: {source}")]
    DetailFetch {
        place_id: String,
        #[source]
        source: Box<Error>,
    },

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Whether the error came from validating caller input rather than
    /// talking to the provider.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidCoordinate { .. } | Error::InvalidRadius { .. }
        )
    }
}

fn format_message(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!(": {}", m),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_status_includes_message_when_present() {
        let err = Error::ProviderStatus {
            endpoint: "nearbysearch",
            status: "REQUEST_DENIED".to_string(),
            message: Some("The provided API key is invalid.".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "nearbysearch request rejected with status REQUEST_DENIED: The provided API key is invalid."
        );
    }

    #[test]
    fn provider_status_without_message() {
        let err = Error::ProviderStatus {
            endpoint: "details",
            status: "NOT_FOUND".to_string(),
            message: None,
        };
        assert_eq!(err.to_string(), "details request rejected with status NOT_FOUND");
    }

    #[test]
    fn detail_fetch_wraps_source() {
        let err = Error::DetailFetch {
            place_id: "abc".to_string(),
            source: Box::new(Error::MissingDetailResult {
                place_id: "abc".to_string(),
            }),
        };
        assert!(err.to_string().contains("abc"));
        assert!(!err.is_validation());
        assert!(Error::InvalidRadius { value: -1.0 }.is_validation());
    }
}
