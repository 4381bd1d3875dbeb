//! Bounded line reader
//!
//! Splits an async byte stream on `\n` without ever holding more than one
//! line (plus the read buffer) in memory. Lines longer than the configured
//! maximum abort the read rather than being skipped.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::error::{BcsError, Result};

const READ_BUFFER_BYTES: usize = 64 * 1024;

pub(crate) struct BoundedLineReader<R> {
    reader: BufReader<R>,
    max_line_bytes: usize,
    line: Vec<u8>,
    line_number: usize,
}

impl<R: AsyncRead + Unpin> BoundedLineReader<R> {
    pub(crate) fn new(reader: R, max_line_bytes: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(READ_BUFFER_BYTES, reader),
            max_line_bytes,
            line: Vec::new(),
            line_number: 0,
        }
    }

    /// Read the next line, returning its 1-based number and its bytes.
    ///
    /// The terminator and a single trailing `\r` are stripped. A final line
    /// without a terminator is still returned. `None` means end of stream.
    pub(crate) async fn next_line(&mut self) -> Result<Option<(usize, &[u8])>> {
        self.line.clear();
        let max_line_bytes = self.max_line_bytes;
        let line_number = self.line_number + 1;
        let mut read_any = false;

        loop {
            let available = self.reader.fill_buf().await?;
            if available.is_empty() {
                if !read_any {
                    return Ok(None);
                }
                break;
            }
            read_any = true;

            let (segment, consumed, complete) = match available.iter().position(|b| *b == b'\n') {
                Some(idx) => (&available[..idx], idx + 1, true),
                None => (available, available.len(), false),
            };

            // One spare byte for the `\r` of a CRLF terminator.
            if self.line.len() + segment.len() > max_line_bytes.saturating_add(1) {
                return Err(BcsError::LineTooLong {
                    line: line_number,
                    max_line_bytes,
                });
            }
            self.line.extend_from_slice(segment);
            self.reader.consume(consumed);

            if complete {
                break;
            }
        }

        if self.line.last() == Some(&b'\r') {
            self.line.pop();
        }
        if self.line.len() > max_line_bytes {
            return Err(BcsError::LineTooLong {
                line: line_number,
                max_line_bytes,
            });
        }

        self.line_number = line_number;
        Ok(Some((line_number, &self.line)))
    }
}
