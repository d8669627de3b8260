use super::Error;

/// Raised when `ROLLBACK` fails after a unit of work already failed.
///
/// The rollback failure is placed in front of the original error, so both
/// appear in the chain and [`Error::root`] still yields the original error.
#[derive(Debug)]
pub(super) struct RollbackFailed {
    rollback: Error,
}

impl std::error::Error for RollbackFailed {}

impl core::fmt::Display for RollbackFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "rollback failed ({})", self.rollback)
    }
}

impl Error {
    /// Attaches a failed rollback to the error that caused the rollback.
    pub fn rollback_failed(self, rollback: Error) -> Error {
        self.context(Error::from(super::ErrorKind::RollbackFailed(
            RollbackFailed { rollback },
        )))
    }

    /// Returns `true` if a rollback failed on top of this error.
    pub fn is_rollback_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RollbackFailed(_))
    }

    /// Returns the error raised by the failed `ROLLBACK`, if any.
    pub fn rollback_error(&self) -> Option<&Error> {
        match self.kind() {
            super::ErrorKind::RollbackFailed(err) => Some(&err.rollback),
            _ => None,
        }
    }
}
