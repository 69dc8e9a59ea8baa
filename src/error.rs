use thiserror::Error;

/// Failures reported synchronously by stage operations.
///
/// Configuration errors (unknown ids, duplicate objects) are returned by the
/// call that caused them and leave the session as it was. Backend errors can
/// also come out of a tick; a zone cut short by one has already been
/// disposed, and any focus on it is released.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("unknown zone `{0}`")]
    UnknownZone(String),

    #[error("unknown camera preset `{0}`")]
    UnknownPreset(String),

    #[error("unknown object `{0}`")]
    UnknownObject(String),

    #[error("object `{0}` is not interactable")]
    NotInteractable(String),

    #[error("object id `{0}` is already in the scene")]
    DuplicateObject(String),

    #[error("render backend unavailable: {0}")]
    BackendUnavailable(String),
}

pub type StageResult<T> = std::result::Result<T, StageError>;
