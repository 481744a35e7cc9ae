//! Fixed names and sizes for the downsampler

/// Input trace read from the working directory
pub const INPUT_FILE: &str = "ecg.csv";

/// Output trace written to the working directory (truncated on open)
pub const OUTPUT_FILE: &str = "ecg2.csv";

/// Keep one line out of every `DECIMATION_FACTOR`
pub const DECIMATION_FACTOR: u64 = 50;

/// Usable line length of the old fixed 128-byte buffer (one byte went to the terminator)
pub const LEGACY_LINE_CAP: usize = 127;

/// Read buffer size for the input file (64KB)
pub const BUFFER_SIZE: usize = 64 * 1024;

/// Progress update interval - tick the spinner every N lines read
pub const PROGRESS_UPDATE_INTERVAL: u64 = 10_000;
