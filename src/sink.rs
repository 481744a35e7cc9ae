use std::io::{self, Write};

/// Line sink that flushes after every line so a reader tailing the output
/// sees each sample as soon as it is written.
#[derive(Debug)]
pub struct FlushingLineSink<W: Write> {
    inner: W,
    lines_written: u64,
}

impl<W: Write> FlushingLineSink<W> {
    /// Wrap a writer
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            lines_written: 0,
        }
    }

    /// Write `line` verbatim, then a single `\n`, then flush.
    pub fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        self.inner.write_all(line)?;
        self.inner.write_all(b"\n")?;
        self.inner.flush()?;
        self.lines_written += 1;
        Ok(())
    }

    /// Number of lines written so far
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Final flush, handing back the writer
    pub fn into_inner(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records how many flushes happened and what was visible at each one
    #[derive(Default)]
    struct FlushRecorder {
        pending: Vec<u8>,
        flushed: Vec<Vec<u8>>,
    }

    impl Write for FlushRecorder {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.pending.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushed.push(std::mem::take(&mut self.pending));
            Ok(())
        }
    }

    #[test]
    fn test_write_line_appends_newline_and_flushes() -> io::Result<()> {
        let mut sink = FlushingLineSink::new(FlushRecorder::default());
        sink.write_line(b"V1,V2,0.42")?;
        sink.write_line(b"")?;
        assert_eq!(sink.lines_written(), 2);

        let recorder = sink.into_inner()?;
        assert_eq!(recorder.flushed[0], b"V1,V2,0.42\n");
        assert_eq!(recorder.flushed[1], b"\n");
        assert!(recorder.pending.is_empty());
        Ok(())
    }

    #[test]
    fn test_write_line_is_verbatim() -> io::Result<()> {
        let mut sink = FlushingLineSink::new(Vec::new());
        sink.write_line(b" 0.1,\t0.2\r")?;
        assert_eq!(sink.into_inner()?, b" 0.1,\t0.2\r\n");
        Ok(())
    }

    #[test]
    fn test_write_error_propagates() {
        let mut buf = [0u8; 4];
        let mut sink = FlushingLineSink::new(&mut buf[..]);
        assert!(sink.write_line(b"too long for four bytes").is_err());
        assert_eq!(sink.lines_written(), 0);
    }
}
