use bitvec::prelude::*;

use crate::error::CodeError;
use crate::tree::{CodeTree, Node};

/// The encode-side view of a code tree: a per-symbol lookup from byte value
/// to code word, obtained by inverting the tree's leaf paths.
pub struct CodeBook {
    codes: Vec<Option<BitVec>>,
}

impl CodeTree {
    /// Derives the [`CodeBook`] for this tree.
    pub fn book(&self) -> CodeBook {
        let mut codes = vec![None; 256];
        let mut path = BitVec::new();
        collect(&self.root, &mut path, &mut codes);
        CodeBook { codes }
    }
}

// Mirrors the save traversal: left appends 0, right appends 1, and each
// leaf records the accumulated path as its code word.
fn collect(node: &Node, path: &mut BitVec, codes: &mut [Option<BitVec>]) {
    match node {
        Node::Leaf { symbol } => {
            codes[*symbol as usize] = Some(path.clone());
        }
        Node::Internal { left, right } => {
            path.push(false);
            collect(left, path, codes);
            path.pop();
            path.push(true);
            collect(right, path, codes);
            path.pop();
        }
    }
}

impl CodeBook {
    /// Returns the code word for `symbol`, or `None` if the tree has no leaf
    /// for it. The single-leaf tree maps its one symbol to the empty word.
    pub fn code(&self, symbol: u8) -> Option<&BitSlice> {
        self.codes[symbol as usize].as_deref()
    }

    /// Encodes `data` by concatenating the code word of each byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use huffman_code::{byte_frequencies, BitCursor, CodeTree};
    ///
    /// let input = b"so much words wow many compression";
    /// let tree = CodeTree::from_frequencies(&byte_frequencies(input)).unwrap();
    /// let encoded = tree.book().encode(input).unwrap();
    ///
    /// let mut decoded = Vec::new();
    /// tree.decode(&mut BitCursor::new(&encoded), &mut decoded).unwrap();
    /// assert_eq!(decoded, input);
    /// ```
    ///
    /// # Errors
    ///
    /// [`CodeError::UnknownSymbol`] if a byte of `data` has no code word.
    pub fn encode(&self, data: &[u8]) -> Result<BitVec, CodeError> {
        let mut encoded = BitVec::new();
        for &byte in data {
            let code = self.code(byte).ok_or(CodeError::UnknownSymbol(byte))?;
            encoded.extend_from_bitslice(code);
        }
        Ok(encoded)
    }
}
