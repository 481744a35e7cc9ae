//! Decimating line filter: keeps every 50th line of an ECG trace and writes it to a new file.

/// Fixed file names, decimation factor and buffer sizes
pub mod constants;
/// The counting loop and file handling
pub mod downsampler;
/// Error kinds and their exit codes
pub mod error;
/// Output side: verbatim line writer with per-line flush
pub mod sink;
/// Input side: buffered line reader
pub mod stream;

pub use downsampler::{DownsampleReport, Downsampler, Step, downsample_file};
pub use error::DownsampleError;
pub use stream::LineMode;
