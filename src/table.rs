//! Textual code-table serialization.
//!
//! The table is a direct enumeration of the tree's leaves: for each leaf,
//! one line with the symbol value in decimal, then one line with its code
//! as `'0'`/`'1'` characters. Compactness is explicitly not a goal; the
//! format is meant to be trivially parseable.
//!
//! Parsing rebuilds a tree structurally identical (same symbol-to-path
//! mapping) to the one that produced the table. Malformed tables —
//! unparsable values, stray characters, or colliding codes where one is
//! a prefix of another — fail at load time rather than producing a
//! silently corrupt tree.

use std::io::{BufRead, Write};

use crate::error::{Error, Result};
use crate::tree::{HuffmanTree, Node, Symbol, PSEUDO_EOF, SYMBOL_COUNT};

/// Serialize a tree's code table as text.
///
/// Leaves are emitted in depth-first order; parsers must not rely on it.
pub fn write_code_table<W: Write>(tree: &HuffmanTree, mut writer: W) -> Result<()> {
    let mut path = String::new();
    write_leaves(&tree.root, &mut path, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn write_leaves<W: Write>(node: &Node, path: &mut String, writer: &mut W) -> Result<()> {
    if let Some(symbol) = node.symbol {
        writeln!(writer, "{}", symbol)?;
        writeln!(writer, "{}", path)?;
        return Ok(());
    }
    if let Some(ref left) = node.left {
        path.push('0');
        write_leaves(left, path, writer)?;
        path.pop();
    }
    if let Some(ref right) = node.right {
        path.push('1');
        write_leaves(right, path, writer)?;
        path.pop();
    }
    Ok(())
}

/// Rebuild a tree from code-table text.
///
/// Walks a mutable tree from the root for each record, creating
/// placeholder nodes on demand, and labels the node at the end of the
/// code with the symbol.
pub fn read_code_table<R: BufRead>(reader: R) -> Result<HuffmanTree> {
    let mut root = Node::placeholder();
    let mut seen = [false; SYMBOL_COUNT];
    let mut lines = reader.lines();
    let mut records = 0usize;

    while let Some(line) = lines.next() {
        let line = line?;
        let value = line.trim();
        if value.is_empty() {
            // Tolerate a trailing blank line, nothing else.
            continue;
        }
        let symbol: Symbol = value.parse().map_err(|_| {
            Error::InvalidCodeTable(format!("unparsable symbol value '{}'", value))
        })?;
        if symbol > PSEUDO_EOF {
            return Err(Error::InvalidCodeTable(format!(
                "symbol {} out of range (max {})",
                symbol, PSEUDO_EOF
            )));
        }
        if seen[symbol as usize] {
            return Err(Error::InvalidCodeTable(format!(
                "symbol {} appears twice",
                symbol
            )));
        }
        seen[symbol as usize] = true;

        let code = lines
            .next()
            .ok_or_else(|| {
                Error::InvalidCodeTable(format!("missing code line for symbol {}", symbol))
            })??;
        insert(&mut root, symbol, code.trim())?;
        records += 1;
    }

    if records == 0 {
        return Err(Error::InvalidCodeTable("table is empty".to_string()));
    }
    Ok(HuffmanTree { root })
}

/// Walk from the root along `code`, creating children as needed, and
/// label the final node. Any collision with an existing leaf means two
/// codes share a prefix.
fn insert(root: &mut Node, symbol: Symbol, code: &str) -> Result<()> {
    if code.is_empty() {
        return Err(Error::InvalidCodeTable(format!(
            "empty code for symbol {}",
            symbol
        )));
    }
    let mut node = root;
    for ch in code.chars() {
        if node.symbol.is_some() {
            return Err(Error::InvalidCodeTable(format!(
                "code for symbol {} passes through the leaf of another symbol",
                symbol
            )));
        }
        let child = match ch {
            '0' => &mut node.left,
            '1' => &mut node.right,
            other => {
                return Err(Error::InvalidCodeTable(format!(
                    "invalid character '{}' in code for symbol {}",
                    other, symbol
                )));
            }
        };
        node = child.get_or_insert_with(|| Box::new(Node::placeholder()));
    }
    if node.symbol.is_some() || !node.is_leaf() {
        return Err(Error::InvalidCodeTable(format!(
            "code for symbol {} collides with another code",
            symbol
        )));
    }
    node.symbol = Some(symbol);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freq::FrequencyTable;

    fn tree_for(data: &[u8]) -> HuffmanTree {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    fn to_text(tree: &HuffmanTree) -> Vec<u8> {
        let mut out = Vec::new();
        write_code_table(tree, &mut out).unwrap();
        out
    }

    #[test]
    fn test_round_trip_preserves_mapping() {
        let tree = tree_for(b"the quick brown fox jumps over the lazy dog");
        let text = to_text(&tree);
        let rebuilt = read_code_table(text.as_slice()).unwrap();

        let mut original: Vec<(Symbol, String)> = tree
            .code_book()
            .iter()
            .map(|(s, c)| (s, c.to_string()))
            .collect();
        let mut recovered: Vec<(Symbol, String)> = rebuilt
            .code_book()
            .iter()
            .map(|(s, c)| (s, c.to_string()))
            .collect();
        original.sort();
        recovered.sort();
        assert_eq!(original, recovered);
    }

    #[test]
    fn test_format_is_alternating_lines() {
        let tree = tree_for(b"aaaabbbb");
        let text = String::from_utf8(to_text(&tree)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6); // 3 leaves, 2 lines each
        for pair in lines.chunks(2) {
            assert!(pair[0].parse::<u16>().is_ok());
            assert!(pair[1].bytes().all(|b| b == b'0' || b == b'1'));
        }
    }

    #[test]
    fn test_accepts_any_record_order() {
        let tree = tree_for(b"aaaabbbb");
        let text = String::from_utf8(to_text(&tree)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        let reversed: String = lines
            .chunks(2)
            .rev()
            .flat_map(|pair| pair.iter().map(|l| format!("{}\n", l)))
            .collect();

        let rebuilt = read_code_table(reversed.as_bytes()).unwrap();
        assert_eq!(rebuilt.leaf_count(), tree.leaf_count());
    }

    #[test]
    fn test_rejects_unparsable_symbol() {
        let err = read_code_table("abc\n01\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidCodeTable(_)));
    }

    #[test]
    fn test_rejects_symbol_out_of_range() {
        let err = read_code_table("300\n01\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_rejects_missing_code_line() {
        let err = read_code_table("65\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("missing code line"));
    }

    #[test]
    fn test_rejects_bad_code_characters() {
        let err = read_code_table("65\n012\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid character"));
    }

    #[test]
    fn test_rejects_prefix_collision() {
        // "0" is a prefix of "01": the second code routes through a leaf.
        let err = read_code_table("65\n0\n66\n01\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("passes through"));

        // And the other direction: labeling an existing internal node.
        let err = read_code_table("66\n01\n65\n0\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("collides"));
    }

    #[test]
    fn test_rejects_duplicate_symbol() {
        let err = read_code_table("65\n0\n65\n1\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("appears twice"));
    }

    #[test]
    fn test_rejects_empty_table() {
        let err = read_code_table("".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_degenerate_single_leaf_table() {
        let tree = tree_for(b"");
        let text = to_text(&tree);
        assert_eq!(text, b"256\n0\n");
        let rebuilt = read_code_table(text.as_slice()).unwrap();
        assert_eq!(rebuilt.code_book().get(PSEUDO_EOF), Some("0"));
    }
}
