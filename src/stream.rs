use std::io::{self, BufRead, BufReader, Read};

use crate::constants::{BUFFER_SIZE, LEGACY_LINE_CAP};

/// How a physical line maps onto the lines handed to the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineMode {
    /// One physical line is one logical line, whatever its length
    #[default]
    Unbounded,
    /// Stop after `n` bytes if no newline was seen; the rest of the
    /// physical line comes back as the next logical line. A cap of zero
    /// reads like `Unbounded`.
    Capped(usize),
}

impl LineMode {
    /// The fixed-buffer behaviour of the old C tool (127 usable bytes)
    pub fn legacy() -> Self {
        LineMode::Capped(LEGACY_LINE_CAP)
    }
}

/// Buffered line reader over any byte source.
///
/// Lines are raw bytes: no UTF-8 validation, and only the `\n` terminator is
/// stripped, so `\r` and trailing whitespace reach the caller untouched.
#[derive(Debug)]
pub struct BufferedLineStream<R> {
    /// Buffered reader for efficient IO
    reader: BufReader<R>,
    /// Reused line buffer to avoid allocations per line
    line_buffer: Vec<u8>,
    mode: LineMode,
}

impl<R: Read> BufferedLineStream<R> {
    /// Create a new stream with default buffer size and unbounded lines
    pub fn new(inner: R) -> Self {
        Self::with_buffer_size(inner, BUFFER_SIZE)
    }

    /// Create a new stream with custom buffer size
    pub fn with_buffer_size(inner: R, buffer_size: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(buffer_size, inner),
            // ECG rows are short; this rarely grows
            line_buffer: Vec::with_capacity(256),
            mode: LineMode::Unbounded,
        }
    }

    /// Switch the line mode
    pub fn with_mode(mut self, mode: LineMode) -> Self {
        self.mode = mode;
        self
    }

    /// Read the next logical line.
    ///
    /// Returns None at end of input, or Some(Result) for each line. The
    /// returned slice is valid until the next call to next_line(). A final
    /// line without a trailing newline is still returned.
    pub fn next_line(&mut self) -> Option<io::Result<&[u8]>> {
        self.line_buffer.clear();

        let consumed = match self.mode {
            LineMode::Unbounded | LineMode::Capped(0) => self.read_unbounded(),
            LineMode::Capped(cap) => self.read_capped(cap),
        };

        match consumed {
            // EOF reached
            Ok(0) => None,
            Ok(_) => Some(Ok(self.line_buffer.as_slice())),
            Err(e) => Some(Err(e)),
        }
    }

    fn read_unbounded(&mut self) -> io::Result<usize> {
        let n = self.reader.read_until(b'\n', &mut self.line_buffer)?;
        if self.line_buffer.last() == Some(&b'\n') {
            self.line_buffer.pop();
        }
        Ok(n)
    }

    /// Returns the number of bytes consumed from the source, newline included.
    fn read_capped(&mut self, cap: usize) -> io::Result<usize> {
        let mut consumed = 0;

        while self.line_buffer.len() < cap {
            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }

            let room = cap - self.line_buffer.len();
            let window = &available[..available.len().min(room)];

            match window.iter().position(|&b| b == b'\n') {
                Some(i) => {
                    self.line_buffer.extend_from_slice(&window[..i]);
                    self.reader.consume(i + 1);
                    return Ok(consumed + i + 1);
                }
                None => {
                    let n = window.len();
                    self.line_buffer.extend_from_slice(window);
                    self.reader.consume(n);
                    consumed += n;
                }
            }
        }

        Ok(consumed)
    }
}
