use thiserror::Error;

/// Business outcomes and failures of the reservation core.
///
/// `RoomUnavailable` and `Busy` are expected outcomes, not exceptional ones:
/// callers must never retry them automatically, since a retry could take a
/// room another guest just won.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("check-in date must fall before check-out date")]
    InvalidRange,

    #[error("room is not available for the requested dates")]
    RoomUnavailable,

    #[error("room is busy, the reservation could not be attempted")]
    Busy,

    #[error("no tax configuration for jurisdiction '{0}'")]
    UnknownJurisdiction(String),

    #[error("not found")]
    NotFound,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}
