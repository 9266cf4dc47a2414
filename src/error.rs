use std::error::Error as StdError;
use thiserror::Error;

/// Boxed error returned by an [`HttpGet`](crate::blocking::HttpGet) implementation
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors that can occur while resolving a zip code
#[derive(Error, Debug)]
pub enum ZipCodeError {
    #[error("Could not retrieve geocoding data.")]
    Fetch(#[source] BoxError),
    #[error("Zip code not found for the given coordinates.")]
    NotFound,
    #[error("Could not retrieve zip code.")]
    Resolution(#[source] Box<ZipCodeError>),
    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),
}

impl ZipCodeError {
    /// Wrap any lower-level failure the way `get_zip_code` reports it
    pub(crate) fn resolution(err: ZipCodeError) -> Self {
        ZipCodeError::Resolution(Box::new(err))
    }

    /// The error this one stands for, looking through a `Resolution` wrapper
    pub fn kind(&self) -> &ZipCodeError {
        match self {
            ZipCodeError::Resolution(inner) => inner.kind(),
            other => other,
        }
    }

    /// `true` if the provider answered but no postal code was present
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), ZipCodeError::NotFound)
    }

    /// `true` if the geocoding provider could not be reached or its answer could not be read
    pub fn is_fetch(&self) -> bool {
        matches!(self.kind(), ZipCodeError::Fetch(_))
    }
}

/// Result type alias for zip code operations
pub type Result<T> = std::result::Result<T, ZipCodeError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages_match_provider_contract() {
        let fetch = ZipCodeError::Fetch("Network Error".into());
        assert_eq!(fetch.to_string(), "Could not retrieve geocoding data.");
        assert_eq!(
            ZipCodeError::NotFound.to_string(),
            "Zip code not found for the given coordinates."
        );
        let wrapped = ZipCodeError::resolution(ZipCodeError::NotFound);
        assert_eq!(wrapped.to_string(), "Could not retrieve zip code.");
    }

    #[test]
    fn resolution_keeps_cause() {
        let wrapped = ZipCodeError::resolution(ZipCodeError::Fetch("Network Error".into()));
        assert!(wrapped.is_fetch());
        assert!(!wrapped.is_not_found());

        let source = wrapped.source().unwrap();
        assert_eq!(source.to_string(), "Could not retrieve geocoding data.");
        assert_eq!(source.source().unwrap().to_string(), "Network Error");
    }

    #[test]
    fn not_found_kind() {
        let wrapped = ZipCodeError::resolution(ZipCodeError::NotFound);
        assert!(wrapped.is_not_found());
        assert!(ZipCodeError::NotFound.is_not_found());
        assert!(!ZipCodeError::MissingApiKey("GOOGLE_MAPS_API_KEY").is_fetch());
    }
}
