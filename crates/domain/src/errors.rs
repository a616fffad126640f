use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Appliance authentication failed: {0}")]
    Auth(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Sink write failed: {0}")]
    Write(String),

    #[error("Malformed query record: {0}")]
    MalformedRecord(String),

    #[error("Invalid collection window: {0}")]
    InvalidWindow(String),
}

impl DomainError {
    pub fn is_auth(&self) -> bool {
        matches!(self, DomainError::Auth(_))
    }

    /// Short label used in per-cycle diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Auth(_) => "auth",
            DomainError::Transport(_) => "transport",
            DomainError::Write(_) => "write",
            DomainError::MalformedRecord(_) => "malformed_record",
            DomainError::InvalidWindow(_) => "invalid_window",
        }
    }
}
