use thiserror::Error;

/// Conditions a caller needs to tell apart from generic failures.
///
/// These travel inside `anyhow::Error`; recover them with
/// `err.downcast_ref::<ClientError>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    // ---
    #[error("parking spot not found: {0}")]
    SpotNotFound(String),

    #[error("no user is signed in")]
    NotLoggedIn,

    #[error("no parking spot selected")]
    NoSpotSelected,

    #[error("no parking slot selected")]
    NoSlotSelected,

    #[error("parking spot has no free bays: {0}")]
    SpotFull(String),

    #[error("parking slot is occupied: {0}")]
    SlotOccupied(String),
}

/// Returns true when `err` carries [`ClientError::SpotNotFound`].
pub fn is_not_found(err: &anyhow::Error) -> bool {
    // ---
    matches!(
        err.downcast_ref::<ClientError>(),
        Some(ClientError::SpotNotFound(_))
    )
}
