use thiserror::Error;

/// Service-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ServeError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 10,
        }
    }
}
