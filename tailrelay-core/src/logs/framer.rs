use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Splits a byte stream into lines.
///
/// The underlying `AsyncBufRead` owns read sizing; a record longer than a
/// single network read is accumulated by `read_until` until its delimiter or
/// end of stream shows up.
pub struct LineFramer<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R> LineFramer<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Next line without its trailing `\n` / `\r\n`.
    ///
    /// A final chunk with no delimiter is returned as a line once the reader
    /// reports end of stream. Returns `Ok(None)` after that.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.buf.clear();

        let read = self.reader.read_until(b'\n', &mut self.buf).await?;
        if read == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}
