//! Error types for the huffpack library.

use std::fmt;
use std::io;

/// Result type alias for huffpack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compressing or decompressing.
#[derive(Debug)]
pub enum Error {
    /// An I/O failure on the underlying byte source or sink.
    Io(io::Error),
    /// A value other than 0 or 1 was passed to [`BitWriter::write_bit`].
    ///
    /// [`BitWriter::write_bit`]: crate::bits::BitWriter::write_bit
    InvalidBit(u8),
    /// The input contained a byte with no entry in the code book.
    ///
    /// This means the frequency table used to build the tree did not
    /// match the data being encoded.
    MissingCode(u8),
    /// The compressed stream ended before the pseudo-EOF code was seen.
    TruncatedStream,
    /// The compressed stream walked off the tree (a path with no node).
    InvalidBitstream(&'static str),
    /// The code table text could not be parsed into a valid tree.
    InvalidCodeTable(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::InvalidBit(b) => {
                write!(f, "Invalid bit value {}: must be 0 or 1", b)
            }
            Error::MissingCode(b) => {
                write!(f, "No code for byte {} (0x{:02x}) in the code book", b, b)
            }
            Error::TruncatedStream => {
                write!(f, "Compressed stream ended before the end-of-stream code")
            }
            Error::InvalidBitstream(msg) => {
                write!(f, "Malformed compressed stream: {}", msg)
            }
            Error::InvalidCodeTable(msg) => {
                write!(f, "Invalid code table: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
