use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("command error: {0}")]
    Command(String),

    #[error("call failed with status {status}")]
    CallFailed { status: u16 },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Command(_) => 2,
            Self::CallFailed { .. } => 3,
            Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
