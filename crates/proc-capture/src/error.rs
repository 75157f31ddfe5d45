#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("argv must contain at least the executable")]
    EmptyArgv,

    #[error("spawn failed: {0}")]
    Spawn(String),

    #[error("no output within {window_ms} ms, child killed")]
    Timeout { window_ms: u64 },

    #[error("pipe read failed: {0}")]
    Read(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CaptureError>;
