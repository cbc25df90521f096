use thiserror::Error;

/// Raised when a call cannot resolve an API key from any source.
///
/// The variant records where the key was expected to come from, which decides
/// the status the caller reports: a missing user-stored key is a client error,
/// a missing configured key is an operator error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MissingKeyError {
    #[error("missing Alpha Vantage API key: pass `apikey` explicitly or store one")]
    NoStoredKey,

    #[error("server misconfigured: no Alpha Vantage API key is set")]
    NotConfigured,
}

impl MissingKeyError {
    /// Status reported by the outcome for this failure.
    pub const fn status(self) -> u16 {
        match self {
            Self::NoStoredKey => 400,
            Self::NotConfigured => 500,
        }
    }
}
