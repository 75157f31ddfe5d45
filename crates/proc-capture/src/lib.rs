mod capture;
mod error;
mod process;
mod types;

pub use capture::{capture_output, capture_stderr, capture_stdout};
pub use error::{CaptureError, Result};
pub use types::{CaptureRequest, CaptureStream};
