use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use indicatif::ProgressBar;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::constants::{DECIMATION_FACTOR, PROGRESS_UPDATE_INTERVAL};
use crate::error::DownsampleError;
use crate::sink::FlushingLineSink;
use crate::stream::{BufferedLineStream, LineMode};

/// Totals for one downsampling run, printable as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownsampleReport {
    /// Logical lines read from the input
    pub lines_read: u64,
    /// Lines written to the output
    pub lines_written: u64,
    /// Trailing lines after the last emitted one
    pub lines_dropped: u64,
    /// Interval at which lines were kept
    pub decimation_factor: u64,
}

/// Outcome of a single read in the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The line completed a group of `DECIMATION_FACTOR` and was written out
    Emitted {
        /// Length in bytes of the emitted line
        len: usize,
    },
    /// The line was counted and dropped
    Discarded,
    /// Input exhausted
    Done,
}

/// Keeps every `DECIMATION_FACTOR`-th line of its input.
///
/// The counter holds the number of lines read since the last emission; it
/// reaches `DECIMATION_FACTOR` exactly on the line that gets written and is
/// reset to zero right after.
#[derive(Debug)]
pub struct Downsampler<R, W: Write> {
    stream: BufferedLineStream<R>,
    sink: FlushingLineSink<W>,
    counter: u64,
    lines_read: u64,
    progress: ProgressBar,
}

impl Downsampler<File, File> {
    /// Open `input` for reading and create (or truncate) `output`.
    ///
    /// The input is opened first. If the output then fails, the input handle
    /// is dropped before the error is returned.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(
        input: P,
        output: Q,
    ) -> Result<Self, DownsampleError> {
        let input = input.as_ref();
        let output = output.as_ref();

        let fin = File::open(input).map_err(|source| DownsampleError::InputOpen {
            path: input.to_path_buf(),
            source,
        })?;
        info!("Opened {}", input.display());

        let fout = File::create(output).map_err(|source| DownsampleError::OutputOpen {
            path: output.to_path_buf(),
            source,
        })?;
        info!("Opened {}", output.display());

        Ok(Self::new(fin, fout))
    }
}

impl<R: Read, W: Write> Downsampler<R, W> {
    /// Build a downsampler over an arbitrary source and sink
    pub fn new(input: R, output: W) -> Self {
        Self {
            stream: BufferedLineStream::new(input),
            sink: FlushingLineSink::new(output),
            counter: 0,
            lines_read: 0,
            progress: ProgressBar::hidden(),
        }
    }

    /// Select how over-long lines are read
    pub fn with_line_mode(mut self, mode: LineMode) -> Self {
        self.stream = self.stream.with_mode(mode);
        self
    }

    /// Report progress on `progress` instead of a hidden bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Lines read since the last emission
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Read one line and either emit or discard it.
    pub fn step(&mut self) -> Result<Step, DownsampleError> {
        let line = match self.stream.next_line() {
            None => return Ok(Step::Done),
            Some(line) => line?,
        };

        self.lines_read += 1;
        self.counter += 1;

        if self.lines_read % PROGRESS_UPDATE_INTERVAL == 0 {
            self.progress
                .set_message(format!("Downsampling... {} lines read", self.lines_read));
        }

        if self.counter < DECIMATION_FACTOR {
            return Ok(Step::Discarded);
        }

        let len = line.len();
        // Keep the log line from tearing the spinner
        self.progress.suspend(|| info!("line length {}", len));
        self.sink.write_line(line)?;
        self.counter = 0;

        Ok(Step::Emitted { len })
    }

    /// Drive the loop until the input is exhausted, then flush the output.
    pub fn run(mut self) -> Result<DownsampleReport, DownsampleError> {
        self.progress.set_message("Downsampling...");

        while self.step()? != Step::Done {}

        let report = DownsampleReport {
            lines_read: self.lines_read,
            lines_written: self.sink.lines_written(),
            lines_dropped: self.counter,
            decimation_factor: DECIMATION_FACTOR,
        };
        self.sink.into_inner()?;

        self.progress.finish_with_message(format!(
            "✓ Processed {} lines, kept {}",
            report.lines_read, report.lines_written
        ));
        debug!(
            "read {} lines, wrote {}, dropped {} trailing",
            report.lines_read, report.lines_written, report.lines_dropped
        );

        Ok(report)
    }
}

/// Downsample the file at `input` into `output` using the given line mode.
pub fn downsample_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    mode: LineMode,
    progress: ProgressBar,
) -> Result<DownsampleReport, DownsampleError> {
    Downsampler::open(input, output)?
        .with_line_mode(mode)
        .with_progress(progress)
        .run()
}
