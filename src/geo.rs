use thiserror::Error;

use crate::common::Coordinates;
use crate::config::LocationConfig;

/// Reasons a position request fails. The messages are shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported by your browser.")]
    Unsupported,
    #[error("User denied the request for Geolocation.")]
    PermissionDenied,
    #[error("Location information is unavailable.")]
    PositionUnavailable,
    // No desktop provider has a deadline yet.
    #[allow(dead_code)]
    #[error("The request to get user location timed out.")]
    Timeout,
    #[error("An unknown error occurred.")]
    Unknown,
}

/// One-shot position lookup.
pub trait LocationProvider {
    fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Position taken from the config file.
pub struct ConfiguredLocation {
    config: LocationConfig,
}

impl ConfiguredLocation {
    pub fn new(config: LocationConfig) -> Self {
        Self { config }
    }
}

impl LocationProvider for ConfiguredLocation {
    fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        if !self.config.enabled {
            return Err(GeolocationError::PermissionDenied);
        }
        match (self.config.latitude, self.config.longitude) {
            (None, None) => Err(GeolocationError::Unsupported),
            (Some(latitude), Some(longitude)) => {
                if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
                    Ok(Coordinates {
                        latitude,
                        longitude,
                    })
                } else {
                    Err(GeolocationError::Unknown)
                }
            }
            _ => Err(GeolocationError::PositionUnavailable),
        }
    }
}

/// Last known position and the error from the latest attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeolocationState {
    pub location: Option<Coordinates>,
    pub error: Option<String>,
}

impl GeolocationState {
    /// A failed request keeps the previous location.
    pub fn request(&mut self, provider: &dyn LocationProvider) {
        match provider.current_position() {
            Ok(coords) => {
                self.location = Some(coords);
                self.error = None;
            }
            Err(err) => {
                log::warn!("Location request failed: {err}");
                self.error = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing(GeolocationError);

    impl LocationProvider for Failing {
        fn current_position(&self) -> Result<Coordinates, GeolocationError> {
            Err(self.0)
        }
    }

    #[test]
    fn permission_denied_message_and_null_location() {
        let mut state = GeolocationState::default();
        state.request(&Failing(GeolocationError::PermissionDenied));

        assert_eq!(
            state.error.as_deref(),
            Some("User denied the request for Geolocation.")
        );
        assert_eq!(state.location, None);
    }

    #[test]
    fn errors_carry_fixed_messages() {
        assert_eq!(
            GeolocationError::PositionUnavailable.to_string(),
            "Location information is unavailable."
        );
        assert_eq!(
            GeolocationError::Timeout.to_string(),
            "The request to get user location timed out."
        );
        assert_eq!(
            GeolocationError::Unknown.to_string(),
            "An unknown error occurred."
        );
    }

    #[test]
    fn configured_location_follows_settings() {
        let disabled = ConfiguredLocation::new(LocationConfig {
            enabled: false,
            latitude: Some(1.0),
            longitude: Some(2.0),
        });
        assert_eq!(
            disabled.current_position(),
            Err(GeolocationError::PermissionDenied)
        );

        let unset = ConfiguredLocation::new(LocationConfig::default());
        assert_eq!(unset.current_position(), Err(GeolocationError::Unsupported));
        assert_eq!(
            GeolocationError::Unsupported.to_string(),
            "Geolocation is not supported by your browser."
        );

        let half = ConfiguredLocation::new(LocationConfig {
            enabled: true,
            latitude: Some(25.76),
            longitude: None,
        });
        assert_eq!(
            half.current_position(),
            Err(GeolocationError::PositionUnavailable)
        );

        let bogus = ConfiguredLocation::new(LocationConfig {
            enabled: true,
            latitude: Some(123.0),
            longitude: Some(f64::NAN),
        });
        assert_eq!(bogus.current_position(), Err(GeolocationError::Unknown));

        let set = ConfiguredLocation::new(LocationConfig {
            enabled: true,
            latitude: Some(25.76),
            longitude: Some(-80.19),
        });
        let mut state = GeolocationState::default();
        state.request(&set);
        assert_eq!(
            state.location,
            Some(Coordinates {
                latitude: 25.76,
                longitude: -80.19
            })
        );
        assert_eq!(state.error, None);
    }

    #[test]
    fn later_success_clears_error() {
        let mut state = GeolocationState::default();
        state.request(&Failing(GeolocationError::Timeout));
        assert!(state.error.is_some());

        state.request(&ConfiguredLocation::new(LocationConfig {
            enabled: true,
            latitude: Some(0.0),
            longitude: Some(0.0),
        }));
        assert_eq!(state.error, None);
        assert!(state.location.is_some());
    }
}
