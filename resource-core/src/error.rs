//! Crate-level error type

use thiserror::Error;

/// Errors surfaced at the crate boundary
///
/// Per-operation request errors never reach this type; they travel as
/// [`Outcome`](crate::handlers::Outcome) values. What lands here is
/// setup-time failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or extraction failed
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    /// A handler was wired up without the capability an operation needs
    #[error(transparent)]
    Handler(#[from] crate::handlers::HandlerFault),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerFault;

    #[test]
    fn test_handler_fault_converts() {
        let error: Error = HandlerFault::UnboundModel {
            handler: "notes".to_string(),
        }
        .into();
        assert!(error.to_string().contains("notes"));
    }
}
