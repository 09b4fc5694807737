//! Raw video frame stream I/O.
//!
//! Frames are headerless: `width * height * channels` bytes each, back to
//! back (the `rawvideo` layout ffmpeg reads and writes with `-f rawvideo`).

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ascii::GlyphGrid;
use crate::error::{FrameError, StreamError};
use crate::frame::{Frame, PixelFormat};

/// Reads fixed-size raw frames from a byte stream.
pub struct FrameReader<R> {
    reader: R,
    width: u32,
    height: u32,
    format: PixelFormat,
    frames_read: u64,
}

impl<R: Read> FrameReader<R> {
    pub fn new(reader: R, width: u32, height: u32, format: PixelFormat) -> Result<Self, StreamError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimensions { width, height }.into());
        }
        Ok(Self {
            reader,
            width,
            height,
            format,
            frames_read: 0,
        })
    }

    /// Bytes per frame.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.channels()
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Read the next frame.
    ///
    /// Returns `Ok(None)` on a clean end of stream and
    /// [`StreamError::Truncated`] when the stream ends mid-frame.
    pub fn read_frame(&mut self) -> Result<Option<Frame>, StreamError> {
        let expected = self.frame_len();
        let mut data = vec![0u8; expected];
        let mut filled = 0;

        while filled < expected {
            match self.reader.read(&mut data[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if filled == 0 {
            return Ok(None);
        }
        if filled < expected {
            return Err(StreamError::Truncated {
                read: filled,
                expected,
            });
        }

        self.frames_read += 1;
        Ok(Some(Frame::from_raw(data, self.width, self.height, self.format)?))
    }
}

/// Writes rendered frames, either as raw RGB bytes or as glyph text.
pub struct FrameWriter<W> {
    writer: W,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the raw pixel bytes of a frame.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<(), StreamError> {
        self.writer.write_all(&frame.data)?;
        Ok(())
    }

    /// Write one line per cell row, followed by a blank separator line.
    pub fn write_text(&mut self, glyphs: &GlyphGrid) -> Result<(), StreamError> {
        self.writer.write_all(glyphs.to_text().as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), StreamError> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Global flag for handling Ctrl+C across the application
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Check if Ctrl+C has been received.
pub fn ctrlc_received() -> bool {
    CTRLC_RECEIVED.load(Ordering::SeqCst)
}

/// Set up the Ctrl+C handler.
///
/// This should be called once at program startup.
pub fn setup_ctrlc_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        CTRLC_RECEIVED.store(true, Ordering::SeqCst);
        eprintln!("\nReceived Ctrl+C, shutting down...");
    })
}
