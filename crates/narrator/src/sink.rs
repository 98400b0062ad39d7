//! Output sinks for rendered narration.

use std::io::{self, Write};

/// Receives finished narration chunks, one per rendered event.
pub trait OutputSink {
    fn write(&mut self, chunk: &str);
}

impl<F> OutputSink for F
where
    F: FnMut(&str),
{
    fn write(&mut self, chunk: &str) {
        self(chunk)
    }
}

/// In-memory sink that keeps every chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    chunks: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks in the order they were written.
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// All chunks joined.
    pub fn text(&self) -> String {
        self.chunks.concat()
    }

    pub fn into_string(self) -> String {
        self.chunks.concat()
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }
}

impl OutputSink for Transcript {
    fn write(&mut self, chunk: &str) {
        self.chunks.push(chunk.to_string());
    }
}

/// Streams chunks to an [`io::Write`].
///
/// Rendering never fails per event, so the first write error is kept and
/// later chunks are dropped until the caller takes it.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Returns the first I/O error, clearing it.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Flushes the writer, surfacing any recorded error first.
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn write(&mut self, chunk: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.writer.write_all(chunk.as_bytes()) {
            tracing::warn!("Failed to write narration: {}", e);
            self.error = Some(e);
        }
    }
}
