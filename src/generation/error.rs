use thiserror::Error;

/// Why a generation request did not produce a usable response. Only ever
/// logged; the user sees a single failure message for all of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("generation service returned status {status}")]
    Service { status: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Transport(_) => "transport",
            GenerationError::Service { .. } => "service",
            GenerationError::MalformedResponse(_) => "malformed_response",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("no generation session is open")]
    SessionClosed,

    #[error("a generation request is already in flight")]
    AlreadySubmitting,

    #[error("there is no generated text to copy")]
    NothingToCopy,

    #[error("uploaded images belong to an earlier selection")]
    StaleUpload,
}
