//! Error taxonomy shared across the crate

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SweepError>;

#[derive(Debug, Error)]
pub enum SweepError {
    /// The media store refused access to one or both catalog sources.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The catalog was reachable but yielded no presentable media.
    #[error("no media found")]
    NoMediaFound,

    /// The catalog fetch itself failed.
    #[error("failed to load media catalog: {0}")]
    LoadFailure(String),

    /// A commit removed some but not all of the requested items.
    ///
    /// Partial success is usually surfaced through `CommitOutcome` rather
    /// than as an error; this variant exists for callers that want the
    /// whole batch or nothing.
    #[error("removed {succeeded} of {attempted} items")]
    CommitPartialFailure { succeeded: usize, attempted: usize },

    #[error("settings error: {0}")]
    Settings(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Unknown(String),
}

impl SweepError {
    /// Maps an I/O error from a catalog source into the fetch taxonomy.
    pub fn from_fetch_io(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                SweepError::PermissionDenied(err.to_string())
            }
            std::io::ErrorKind::NotFound => SweepError::NoMediaFound,
            _ => SweepError::LoadFailure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_fetch_io_mapping() {
        let err = SweepError::from_fetch_io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "photos dir",
        ));
        assert!(matches!(err, SweepError::PermissionDenied(_)));

        let err = SweepError::from_fetch_io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(err, SweepError::NoMediaFound));

        let err = SweepError::from_fetch_io(io::Error::other("disk"));
        assert!(matches!(err, SweepError::LoadFailure(_)));
    }

    #[test]
    fn test_partial_failure_message() {
        let err = SweepError::CommitPartialFailure {
            succeeded: 3,
            attempted: 5,
        };
        assert_eq!(err.to_string(), "removed 3 of 5 items");
    }
}
