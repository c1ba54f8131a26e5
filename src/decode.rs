use std::io::Write;

use bitvec::prelude::*;

use crate::error::CodeError;
use crate::tree::{CodeTree, Node};

/// A sequential source of single bits, consumed one bit per call.
pub trait BitSource {
    /// Reports whether another bit can be read. Pure query, no side effect.
    fn has_next(&self) -> bool;

    /// Reads the next bit (`true` = 1) and advances by one position.
    ///
    /// # Errors
    ///
    /// [`CodeError::TruncatedStream`] if the source is exhausted.
    fn next_bit(&mut self) -> Result<bool, CodeError>;
}

/// A [`BitSource`] over an in-memory bit slice.
pub struct BitCursor<'a> {
    bits: &'a BitSlice,
    pos: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(bits: &'a BitSlice) -> Self {
        Self { bits, pos: 0 }
    }
}

impl BitSource for BitCursor<'_> {
    fn has_next(&self) -> bool {
        self.pos < self.bits.len()
    }

    fn next_bit(&mut self) -> Result<bool, CodeError> {
        let bit = *self.bits.get(self.pos).ok_or(CodeError::TruncatedStream)?;
        self.pos += 1;
        Ok(bit)
    }
}

impl CodeTree {
    /// Decodes `bits` against this tree, writing one byte per resolved code
    /// word to `out`, until the source is exhausted at a symbol boundary.
    ///
    /// Each symbol is resolved by walking from the root, one bit per step
    /// (0 = left, 1 = right), until a leaf is reached. Bytes are written as
    /// they are resolved, so output produced before a failure stays written;
    /// the decoder fails without retracting it.
    ///
    /// A single-leaf tree carries a one-symbol alphabet whose code word is
    /// empty, so the bit values carry no information: the decoder consumes
    /// one bit per emitted symbol and ignores it, emitting exactly one byte
    /// per available bit.
    ///
    /// # Errors
    ///
    /// [`CodeError::TruncatedStream`] if the source runs out mid-walk.
    pub fn decode<B, W>(&self, bits: &mut B, out: &mut W) -> Result<(), CodeError>
    where
        B: BitSource + ?Sized,
        W: Write + ?Sized,
    {
        if let Node::Leaf { symbol } = &self.root {
            while bits.has_next() {
                bits.next_bit()?;
                out.write_all(&[*symbol])?;
            }
            return Ok(());
        }

        while bits.has_next() {
            let mut cursor = &self.root;
            while let Node::Internal { left, right } = cursor {
                cursor = if bits.next_bit()? {
                    right.as_ref()
                } else {
                    left.as_ref()
                };
            }
            if let Node::Leaf { symbol } = cursor {
                out.write_all(&[*symbol])?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd_tree() -> CodeTree {
        let mut frequencies = [0u64; 256];
        frequencies[b'A' as usize] = 5;
        frequencies[b'B' as usize] = 2;
        frequencies[b'C' as usize] = 1;
        frequencies[b'D' as usize] = 1;
        CodeTree::from_frequencies(&frequencies).unwrap()
    }

    #[test]
    fn decodes_its_own_code_words() {
        let tree = abcd_tree();
        let encoded = tree.book().encode(b"AAABBC").unwrap();

        let mut decoded = Vec::new();
        tree.decode(&mut BitCursor::new(&encoded), &mut decoded)
            .unwrap();
        assert_eq!(decoded, b"AAABBC");
    }

    #[test]
    fn empty_source_decodes_to_nothing() {
        let tree = abcd_tree();
        let empty = BitVec::new();
        let mut decoded = Vec::new();
        tree.decode(&mut BitCursor::new(&empty), &mut decoded)
            .unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn truncation_mid_symbol_is_an_error() {
        // 0 then 1 descends two internal nodes without reaching a leaf.
        let tree = abcd_tree();
        let mut decoded = Vec::new();
        let err = tree
            .decode(&mut BitCursor::new(bits![0, 1]), &mut decoded)
            .unwrap_err();
        assert!(matches!(err, CodeError::TruncatedStream));
        assert!(decoded.is_empty());
    }

    #[test]
    fn bytes_resolved_before_a_truncation_stay_written() {
        // 1 resolves 'A'; the lone trailing 0 cannot finish a code word.
        let tree = abcd_tree();
        let mut decoded = Vec::new();
        let err = tree
            .decode(&mut BitCursor::new(bits![1, 0]), &mut decoded)
            .unwrap_err();
        assert!(matches!(err, CodeError::TruncatedStream));
        assert_eq!(decoded, b"A");
    }

    #[test]
    fn single_leaf_tree_emits_one_byte_per_bit() {
        let mut frequencies = [0u64; 256];
        frequencies[b'A' as usize] = 7;
        let tree = CodeTree::from_frequencies(&frequencies).unwrap();

        let mut decoded = Vec::new();
        tree.decode(&mut BitCursor::new(bits![0, 1, 0]), &mut decoded)
            .unwrap();
        assert_eq!(decoded, b"AAA");
    }
}
