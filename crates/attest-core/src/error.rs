use crate::types::TokenId;

/// Registry errors.
///
/// Every write operation fails atomically: when one of these is returned,
/// the store is unchanged. Read operations never return errors for unknown
/// identities — "no history" is an empty result, not a failure.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("token not found: {0}")]
    NotFound(TokenId),

    #[error("invalid state: {0}")]
    InvalidState(String),
}
