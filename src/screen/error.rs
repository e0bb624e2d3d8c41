use thiserror::Error;

/// A specialized `Result` type for screen capture.
pub type CaptureResult<T> = Result<T, CaptureError>;

/// A specialized `Result` type for synthetic pointer input.
pub type InputResult<T> = Result<T, InputError>;

/// Errors raised while grabbing pixels for a region. All of them are
/// transient from the engine's point of view.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("No monitor contains the point ({x},{y})")]
    NoMonitor { x: i32, y: i32 },

    #[error("Region '{region}' does not fit on the monitor it starts on")]
    OutOfBounds { region: String },

    #[error("Captured frame for region '{region}' is empty")]
    EmptyFrame { region: String },

    #[error("Screen capture backend failed: {description}")]
    Backend { description: String },
}

/// Errors raised by the pointer backend.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to open the pointer backend: {description}")]
    Unavailable { description: String },

    #[error("Pointer event at ({x},{y}) failed: {description}")]
    EventFailed { x: i32, y: i32, description: String },

    #[error("Pointer task at ({x},{y}) did not complete: {description}")]
    TaskFailed { x: i32, y: i32, description: String },
}

impl CaptureError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        CaptureError::Backend {
            description: err.to_string(),
        }
    }
}
