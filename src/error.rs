// Crate-wide error type. Every variant states *where* things went wrong.
// The geometry and color math never fails; only the window, buffers and file export can.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String),   // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Buffer size mismatch in {stage}: expected {expected_w}x{expected_h}, got {actual_w}x{actual_h}")]
    BufferSize {
        stage: &'static str,
        expected_w: usize,
        expected_h: usize,
        actual_w: usize,
        actual_h: usize,
    },
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] image::ImageError),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Build a `BufferSize` error when two buffers disagree on dimensions.
    pub fn check_size(
        stage: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Result<(), Error> {
        if expected == actual {
            return Ok(());
        }
        Err(Error::BufferSize {
            stage,
            expected_w: expected.0,
            expected_h: expected.1,
            actual_w: actual.0,
            actual_h: actual.1,
        })
    }
}
