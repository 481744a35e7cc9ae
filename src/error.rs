use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures a downsampling run can end with.
///
/// Both open failures are fatal before any line is processed. `Io` covers
/// anything that goes wrong once the loop is running.
#[derive(Debug, Error)]
pub enum DownsampleError {
    /// The input file could not be opened for reading
    #[error("Couldn't open {}: {source}", path.display())]
    InputOpen {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying OS error
        source: io::Error,
    },
    /// The output file could not be created or truncated
    #[error("Couldn't open {}: {source}", path.display())]
    OutputOpen {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying OS error
        source: io::Error,
    },
    /// A read or write failed mid-stream
    #[error("I/O failure while downsampling: {0}")]
    Io(#[from] io::Error),
}

impl DownsampleError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            DownsampleError::InputOpen { .. } | DownsampleError::OutputOpen { .. } => 1,
            DownsampleError::Io(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_failures_name_the_file() {
        let err = DownsampleError::InputOpen {
            path: PathBuf::from("ecg.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("Couldn't open ecg.csv"));
        assert_eq!(err.exit_code(), 1);

        let err = DownsampleError::OutputOpen {
            path: PathBuf::from("ecg2.csv"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("Couldn't open ecg2.csv"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_io_failure_exit_code() {
        let err: DownsampleError = io::Error::other("disk full").into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("disk full"));
    }
}
