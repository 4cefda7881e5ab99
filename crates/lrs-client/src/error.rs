use thiserror::Error;

#[derive(Error, Debug)]
pub enum LrsError {
    /// The store answered with a non-success status.
    #[error("LRS rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("LRS request timed out")]
    Timeout,

    #[error("LRS transport error: {0}")]
    Transport(reqwest::Error),

    #[error("LRS response could not be decoded: {0}")]
    Decode(String),

    #[error("statement could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid LRS endpoint: {0}")]
    InvalidEndpoint(String),
}

impl From<reqwest::Error> for LrsError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(error)
        }
    }
}
