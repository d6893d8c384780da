//=========================================================================
// Error
//
// Crate-level error: any failure a game can hit between building the
// engine and the window closing.
//
//=========================================================================

use crate::core::assets::AssetError;
use crate::core::config::ConfigError;
use crate::core::session::SessionError;
use crate::platform::PlatformError;

//=== Error ===============================================================

#[derive(Debug)]
pub enum Error {
    Config(ConfigError),
    Session(SessionError),
    Asset(AssetError),
    Platform(PlatformError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Invalid configuration: {}", e),
            Self::Session(e) => write!(f, "Session error: {}", e),
            Self::Asset(e) => write!(f, "Asset error: {}", e),
            Self::Platform(e) => write!(f, "Platform error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Session(e) => Some(e),
            Self::Asset(e) => Some(e),
            Self::Platform(e) => Some(e),
        }
    }
}

//--- Conversions ---------------------------------------------------------

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SessionError> for Error {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}

impl From<AssetError> for Error {
    fn from(e: AssetError) -> Self {
        Self::Asset(e)
    }
}

impl From<PlatformError> for Error {
    fn from(e: PlatformError) -> Self {
        Self::Platform(e)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn config_error_converts_and_chains() {
        fn build() -> Result<(), Error> {
            Err(ConfigError::InvalidFps(0))?
        }

        let err = build().unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidFps(0))));
        assert!(err.to_string().starts_with("Invalid configuration"));
        assert!(err.source().is_some());
    }

    #[test]
    fn session_error_converts() {
        let err = Error::from(SessionError::AlreadyRunning);
        assert_eq!(err.to_string(), "Session error: Session is already running");
    }
}
