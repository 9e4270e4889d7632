//! # huffpack
//!
//! Lossless byte-stream compression with a frequency-adaptive prefix code
//! (Huffman coding).
//!
//! The tree is transmitted as a plain-text code table — one decimal symbol
//! line followed by one `'0'`/`'1'` code line per leaf — so the decoder
//! rebuilds the exact tree without resending frequency data. A reserved
//! pseudo-end-of-stream symbol terminates the bit stream, making the
//! compressed output self-delimiting with no length field.
//!
//! ## Example
//!
//! ```rust
//! use huffpack::{compress, decompress};
//!
//! let data = b"aaaabbbb";
//! let (code_table, compressed) = compress(data).unwrap();
//! assert_eq!(decompress(&code_table, &compressed).unwrap(), data);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bits;
pub mod codec;
pub mod error;
pub mod freq;
pub mod table;
pub mod tree;

pub use codec::{compress, decode, decompress, encode};
pub use error::{Error, Result};
pub use freq::FrequencyTable;
pub use table::{read_code_table, write_code_table};
pub use tree::{CodeBook, HuffmanTree, PSEUDO_EOF};
