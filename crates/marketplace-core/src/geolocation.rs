// crates/marketplace-core/src/geolocation.rs

//! Failure taxonomy for the platform geolocation service.
//!
//! Acquiring a position happens outside the core (browser API, callback
//! based). The core only standardizes how a failure is classified and what
//! the user is told; a failure never aborts a search, the search point
//! simply stays unset.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Unable to get your location: {0}")]
    PermissionDenied(String),
    #[error("Unable to get your location: {0}")]
    Unavailable(String),
    #[error("Unable to get your location: {0}")]
    Timeout(String),
    #[error("Geolocation is not supported by your browser")]
    Unsupported,
}

impl GeolocationError {
    /// Maps a platform error code (`1` denied, `2` unavailable, `3` timeout)
    /// and its message. Unknown codes count as unavailable.
    pub fn from_code(code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            1 => Self::PermissionDenied(Self::or_default(message, "User denied Geolocation")),
            3 => Self::Timeout(Self::or_default(message, "Timeout expired")),
            _ => Self::Unavailable(Self::or_default(message, "Position unavailable")),
        }
    }

    /// The text shown to the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    fn or_default(message: String, fallback: &str) -> String {
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_variants() {
        assert!(matches!(
            GeolocationError::from_code(1, "denied"),
            GeolocationError::PermissionDenied(_)
        ));
        assert!(matches!(
            GeolocationError::from_code(2, "x"),
            GeolocationError::Unavailable(_)
        ));
        assert!(matches!(
            GeolocationError::from_code(3, "x"),
            GeolocationError::Timeout(_)
        ));
        assert!(matches!(
            GeolocationError::from_code(99, "x"),
            GeolocationError::Unavailable(_)
        ));
    }

    #[test]
    fn user_messages() {
        assert_eq!(
            GeolocationError::from_code(1, "User denied Geolocation").user_message(),
            "Unable to get your location: User denied Geolocation"
        );
        assert_eq!(
            GeolocationError::from_code(3, "").user_message(),
            "Unable to get your location: Timeout expired"
        );
        assert_eq!(
            GeolocationError::Unsupported.user_message(),
            "Geolocation is not supported by your browser"
        );
    }
}
