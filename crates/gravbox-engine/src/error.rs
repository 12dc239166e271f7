use thiserror::Error;

use crate::api::types::BodyId;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised at the simulation boundary.
///
/// Only caller contract violations end up here. Numeric trouble inside a tick
/// (near-coincident bodies and the like) is clamped, never reported.
#[derive(Debug, Error)]
pub enum SimError {
    /// Radius must be finite and strictly positive.
    #[error("invalid radius: {0}")]
    InvalidRadius(f64),

    /// Mass passed through the host API must be finite and strictly positive.
    #[error("invalid mass: {0}")]
    InvalidMass(f64),

    /// A position, velocity or color argument was NaN or infinite.
    #[error("non-finite {0}")]
    NonFinite(&'static str),

    /// No body with this id lives in the simulation.
    #[error("unknown body {0:?}")]
    UnknownBody(BodyId),

    /// Every body id has been handed out.
    #[error("body ids exhausted")]
    IdsExhausted,

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Config JSON could not be parsed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let msg = format!("{}", SimError::InvalidRadius(-3.0));
        assert!(msg.contains("invalid radius"));
        assert!(msg.contains("-3"));

        let msg = format!("{}", SimError::UnknownBody(BodyId(7)));
        assert!(msg.contains("BodyId(7)"));
    }

    #[test]
    fn json_errors_convert() {
        let err: SimError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, SimError::Json(_)));
    }
}
