//! Error types for Ethos

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("genome integrity compromised: {reason}")]
    IntegrityViolation { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn integrity_violation(reason: impl Into<String>) -> Self {
        Self::IntegrityViolation {
            reason: reason.into(),
        }
    }
}
