use thiserror::Error;

/// Errors produced by the zone calculation engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZoneError {
    #[error("Invalid athlete profile: {0}")]
    InvalidProfile(String),

    #[error("Unknown zone system: {0}")]
    UnknownSystem(String),
}
