//! Bit-level I/O over byte streams.
//!
//! Both halves work least-significant-bit first within each byte: the
//! first bit written lands in bit 0 of the first output byte, and the
//! first bit read comes from bit 0 of the first input byte.

use std::io::{Read, Write};

use crate::error::{Error, Result};

const BYTE_SIZE: u8 = 8;

/// A bit writer that packs bits into bytes, LSB first.
///
/// Owns the underlying sink for its lifetime; [`finish`](BitWriter::finish)
/// consumes the writer, pads the final partial byte with zero bits, and
/// hands the sink back. Because `finish` takes `self`, writing after close
/// is a compile error rather than a runtime one.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    sink: W,
    current_byte: u8,
    bit_position: u8,
}

impl<W: Write> BitWriter<W> {
    /// Create a bit writer over the given byte sink.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            current_byte: 0,
            bit_position: 0,
        }
    }

    /// Write a single bit.
    ///
    /// Fails with [`Error::InvalidBit`] if `bit` is anything but 0 or 1,
    /// and with [`Error::Io`] if the sink rejects a completed byte.
    pub fn write_bit(&mut self, bit: u8) -> Result<()> {
        if bit > 1 {
            return Err(Error::InvalidBit(bit));
        }
        self.current_byte |= bit << self.bit_position;
        self.bit_position += 1;
        if self.bit_position == BYTE_SIZE {
            self.flush_byte()?;
        }
        Ok(())
    }

    /// Write a sequence of bits given as `'0'`/`'1'` characters.
    ///
    /// This is the shape codes take in the textual code table, so the
    /// encoder can feed them through without re-packing.
    pub fn write_code(&mut self, code: &str) -> Result<()> {
        for ch in code.bytes() {
            self.write_bit(ch.wrapping_sub(b'0'))?;
        }
        Ok(())
    }

    /// Number of bits buffered toward the next byte (0-7).
    pub fn bit_position(&self) -> u8 {
        self.bit_position
    }

    /// Flush any partial byte (zero-padding the unused high bits) and
    /// return the sink.
    ///
    /// Closing with no buffered bits performs no extra write.
    pub fn finish(mut self) -> Result<W> {
        if self.bit_position > 0 {
            self.flush_byte()?;
        }
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn flush_byte(&mut self) -> Result<()> {
        self.sink.write_all(&[self.current_byte])?;
        self.current_byte = 0;
        self.bit_position = 0;
        Ok(())
    }
}

/// A bit reader that unpacks bytes from a source, LSB first.
///
/// Buffers one byte at a time. Once the source is exhausted every
/// further [`read_bit`](BitReader::read_bit) returns `Ok(None)`; a
/// well-formed compressed stream terminates on the pseudo-EOF code
/// before that ever happens.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    source: R,
    current_byte: u8,
    bits_left: u8,
    exhausted: bool,
}

impl<R: Read> BitReader<R> {
    /// Create a bit reader over the given byte source.
    pub fn new(source: R) -> Self {
        Self {
            source,
            current_byte: 0,
            bits_left: 0,
            exhausted: false,
        }
    }

    /// Read the next bit: `Some(0)`, `Some(1)`, or `None` at end of data.
    ///
    /// I/O errors from the source are fatal and surface as [`Error::Io`];
    /// they are never retried.
    pub fn read_bit(&mut self) -> Result<Option<u8>> {
        if self.bits_left == 0 && !self.fill()? {
            return Ok(None);
        }
        let bit = self.current_byte & 1;
        self.current_byte >>= 1;
        self.bits_left -= 1;
        Ok(Some(bit))
    }

    /// Fetch the next byte from the source. Returns false at end of data.
    fn fill(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        let mut buf = [0u8; 1];
        loop {
            match self.source.read(&mut buf) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(false);
                }
                Ok(_) => {
                    self.current_byte = buf[0];
                    self.bits_left = BYTE_SIZE;
                    return Ok(true);
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }
}
