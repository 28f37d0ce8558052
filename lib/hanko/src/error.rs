use std::error::Error as StdError;
use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync>;
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The protected request didn't carry the form field at all
    #[error("Missing CSRF token")]
    MissingToken,

    /// The submitted token isn't part of the token pool (anymore)
    #[error("Invalid CSRF token")]
    InvalidToken,

    #[error("Session store failure")]
    Store(#[source] BoxError),
}

impl Error {
    #[track_caller]
    pub(crate) fn store(err: impl Into<BoxError>) -> Self {
        Self::Store(err.into())
    }

    /// Whether the error is a rejection of the request (as opposed to a failure of the session store)
    #[inline]
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::MissingToken | Self::InvalidToken)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod test {
    use super::{BoxError, Error};

    #[test]
    fn rejection_kinds() {
        assert!(Error::MissingToken.is_rejection());
        assert!(Error::InvalidToken.is_rejection());
        assert!(!Error::store(BoxError::from("disk on fire")).is_rejection());
    }
}
