use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("Could not access record file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed record data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Cipher text is truncated or badly padded")]
    Cipher,
    #[error("Decrypted record is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Player name must be 1 to {max} characters, got {len}")]
    InvalidPlayerName { len: usize, max: usize },
    #[error("Stored score table is not sorted by time")]
    Unordered,
    #[error("Unknown difficulty {0:?}")]
    UnknownDifficulty(String),
}

pub type Result<T> = core::result::Result<T, RecordsError>;
