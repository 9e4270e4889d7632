//! Encode and decode entry points.
//!
//! Encoding replaces each input byte with its code bits and terminates
//! the stream with the pseudo-EOF code, so the output is self-delimiting:
//! no length field is needed and the zero padding at the end of the last
//! byte is never mistaken for data.

use std::io::{Read, Write};

use crate::bits::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::freq::FrequencyTable;
use crate::table;
use crate::tree::{CodeBook, HuffmanTree, Node, Symbol, PSEUDO_EOF};

/// Encode a byte stream through a code book.
///
/// Every input byte must have a code; a byte without one means the code
/// book was not built from this data and encoding aborts with
/// [`Error::MissingCode`] rather than emitting a corrupt stream.
pub fn encode<R: Read, W: Write>(input: R, book: &CodeBook, sink: W) -> Result<W> {
    let mut writer = BitWriter::new(sink);
    for byte in input.bytes() {
        let byte = byte?;
        let code = book
            .get(byte as Symbol)
            .ok_or(Error::MissingCode(byte))?;
        writer.write_code(code)?;
    }
    // Built trees always carry the pseudo-EOF leaf; a loaded table may not.
    let eof_code = book.get(PSEUDO_EOF).ok_or_else(|| {
        Error::InvalidCodeTable("no code for the end-of-stream symbol".to_string())
    })?;
    writer.write_code(eof_code)?;
    writer.finish()
}

/// Decode a compressed bit stream by walking the tree.
///
/// Reads one bit at a time from the root: 0 moves left, 1 moves right.
/// A data leaf emits its byte and resets the walk; the pseudo-EOF leaf
/// is the only normal termination. Running out of bits first is a fatal
/// [`Error::TruncatedStream`].
pub fn decode<R: Read, W: Write>(source: R, tree: &HuffmanTree, mut output: W) -> Result<()> {
    let mut reader = BitReader::new(source);
    let mut node: &Node = &tree.root;
    loop {
        let bit = reader.read_bit()?.ok_or(Error::TruncatedStream)?;
        let child = if bit == 0 { &node.left } else { &node.right };
        node = child
            .as_deref()
            .ok_or(Error::InvalidBitstream("bit path leads to a missing node"))?;

        if let Some(symbol) = node.symbol {
            if symbol == PSEUDO_EOF {
                break;
            }
            output.write_all(&[symbol as u8])?;
            node = &tree.root;
        }
    }
    output.flush()?;
    Ok(())
}

/// Compress a byte slice in one call.
///
/// Returns the code-table text and the compressed bit stream as separate
/// buffers, mirroring the on-disk layout of a `.code` / `.huff` pair.
pub fn compress(data: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
    let frequencies = FrequencyTable::from_bytes(data);
    let tree = HuffmanTree::from_frequencies(&frequencies);

    let mut table_text = Vec::new();
    table::write_code_table(&tree, &mut table_text)?;

    let book = tree.code_book();
    let compressed = encode(data, &book, Vec::new())?;
    Ok((table_text, compressed))
}

/// Decompress a bit stream using its code-table text.
pub fn decompress(table_text: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let tree = table::read_code_table(table_text)?;
    let mut output = Vec::new();
    decode(data, &tree, &mut output)?;
    Ok(output)
}
