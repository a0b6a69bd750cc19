// Line splitting for the merged ffmpeg output stream

use std::io::{self, ErrorKind, Read};

const READ_CHUNK: usize = 8 * 1024;

/// Incremental splitter that treats `\n`, `\r\n` and a bare `\r` as line ends.
///
/// ffmpeg redraws its status line with `\r`, so splitting on `\n` alone would
/// hold the whole encode's progress back until the final newline.
#[derive(Debug, Default)]
pub struct LineSplitter {
    buf: Vec<u8>,
    after_cr: bool,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of bytes, calling `on_line` for every line it completes
    pub fn push<F>(&mut self, chunk: &[u8], mut on_line: F)
    where
        F: FnMut(&str),
    {
        for &byte in chunk {
            match byte {
                b'\n' if self.after_cr => {
                    // second half of a \r\n pair, line already emitted
                    self.after_cr = false;
                }
                b'\n' | b'\r' => {
                    self.after_cr = byte == b'\r';
                    self.emit(&mut on_line);
                }
                _ => {
                    self.after_cr = false;
                    self.buf.push(byte);
                }
            }
        }
    }

    /// Flush a trailing line that had no terminator
    pub fn finish<F>(&mut self, mut on_line: F)
    where
        F: FnMut(&str),
    {
        if !self.buf.is_empty() {
            self.emit(&mut on_line);
        }
        self.after_cr = false;
    }

    fn emit<F>(&mut self, on_line: &mut F)
    where
        F: FnMut(&str),
    {
        {
            let text = String::from_utf8_lossy(&self.buf);
            on_line(text.trim_end());
        }
        self.buf.clear();
    }
}

/// Read `reader` until every writer has closed it, relaying lines as they arrive.
/// Returns the number of lines delivered.
pub fn relay_lines<R, F>(mut reader: R, mut on_line: F) -> io::Result<usize>
where
    R: Read,
    F: FnMut(&str),
{
    let mut splitter = LineSplitter::new();
    let mut chunk = [0u8; READ_CHUNK];
    let mut count = 0usize;

    loop {
        match reader.read(&mut chunk) {
            // Zero bytes from a blocking pipe read means all write ends are closed
            Ok(0) => break,
            Ok(n) => splitter.push(&chunk[..n], |line| {
                count += 1;
                on_line(line);
            }),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    splitter.finish(|line| {
        count += 1;
        on_line(line);
    });

    Ok(count)
}
