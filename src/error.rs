use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Input ended while waiting for: {prompt}")]
    InputClosed { prompt: String },

    #[error("{}", .0)]
    Io(#[from] std::io::Error),

    #[error("Failed to render contacts as JSON: {}", .0)]
    Json(#[from] serde_json::Error),
}
