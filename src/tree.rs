use std::collections::BinaryHeap;

use log::debug;

use crate::error::CodeError;

/// A node of the code tree: either a leaf carrying one byte-valued symbol,
/// or an internal decision point with exactly two children.
///
/// Children are owned exclusively by their parent; the tree is a plain
/// rooted structure with no sharing and no cycles. Frequencies only matter
/// while the tree is being assembled, so the finished nodes do not carry
/// them (see [`CodeTree::from_frequencies`]).
#[derive(Debug, PartialEq, Eq)]
pub enum Node {
    Leaf { symbol: u8 },
    Internal { left: Box<Node>, right: Box<Node> },
}

/// A prefix-free binary code over the byte alphabet, represented as its
/// decoding tree. Immutable once constructed.
#[derive(Debug, PartialEq, Eq)]
pub struct CodeTree {
    pub(crate) root: Node,
}

// A candidate in the merge queue: the subtree assembled so far plus its
// ordering keys. `weight` is the sum of the leaf counts below the subtree.
// `seq` is the creation sequence number; it breaks frequency ties so that
// equal-weight candidates leave the queue in creation order and the tree
// shape never depends on the heap's internal ordering of equal keys.
struct Candidate {
    weight: u64,
    seq: u32,
    node: Node,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Flipped so that the BinaryHeap pops the lowest weight first.
        (other.weight, other.seq).cmp(&(self.weight, self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        (self.weight, self.seq) == (other.weight, other.seq)
    }
}
impl Eq for Candidate {}

impl CodeTree {
    /// Builds the optimal prefix code for a frequency table, where
    /// `frequencies[i]` is the observed count of byte value `i`.
    ///
    /// Every symbol with a positive count becomes a leaf candidate; the two
    /// lowest-weight candidates are repeatedly merged under a fresh internal
    /// node (first out becomes the left child) until a single root remains.
    /// A table with exactly one positive count yields a tree that is just
    /// that leaf, with no internal node above it.
    ///
    /// # Examples
    ///
    /// ```
    /// use huffman_code::{byte_frequencies, CodeTree};
    ///
    /// let frequencies = byte_frequencies(b"abracadabra");
    /// let tree = CodeTree::from_frequencies(&frequencies).unwrap();
    /// // 'a' dominates the input, so its code word is the shortest.
    /// let book = tree.book();
    /// assert!(book.code(b'a').unwrap().len() <= book.code(b'c').unwrap().len());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CodeError::EmptyAlphabet`] if no count is positive.
    pub fn from_frequencies(frequencies: &[u64; 256]) -> Result<Self, CodeError> {
        let mut heap = BinaryHeap::new();
        let mut seq: u32 = 0;

        // Leaves enter in ascending symbol order, so `seq` doubles as a
        // deterministic secondary sort key.
        for (symbol, &count) in frequencies.iter().enumerate() {
            if count > 0 {
                heap.push(Candidate {
                    weight: count,
                    seq,
                    node: Node::Leaf {
                        symbol: symbol as u8,
                    },
                });
                seq += 1;
            }
        }

        if heap.is_empty() {
            return Err(CodeError::EmptyAlphabet);
        }
        debug!("building code tree over {} distinct symbols", heap.len());

        while heap.len() > 1 {
            let first = heap.pop().unwrap();
            let second = heap.pop().unwrap();
            heap.push(Candidate {
                weight: first.weight + second.weight,
                seq,
                node: Node::Internal {
                    left: Box::new(first.node),
                    right: Box::new(second.node),
                },
            });
            seq += 1;
        }

        Ok(CodeTree {
            root: heap.pop().unwrap().node,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frequencies(pairs: &[(u8, u64)]) -> [u64; 256] {
        let mut table = [0u64; 256];
        for &(symbol, count) in pairs {
            table[symbol as usize] = count;
        }
        table
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        let err = CodeTree::from_frequencies(&[0; 256]).unwrap_err();
        assert!(matches!(err, CodeError::EmptyAlphabet));
    }

    #[test]
    fn single_symbol_degenerates_to_a_leaf() {
        let tree = CodeTree::from_frequencies(&frequencies(&[(65, 10)])).unwrap();
        assert_eq!(tree.root, Node::Leaf { symbol: 65 });
    }

    #[test]
    fn merge_order_is_deterministic() {
        // A:5 B:2 C:1 D:1. C and D merge first (weight 2), then that node
        // ties with B at weight 2; B was created earlier so it pops first
        // and becomes the left child.
        let tree =
            CodeTree::from_frequencies(&frequencies(&[(b'A', 5), (b'B', 2), (b'C', 1), (b'D', 1)]))
                .unwrap();
        let expected = Node::Internal {
            left: Box::new(Node::Internal {
                left: Box::new(Node::Leaf { symbol: b'B' }),
                right: Box::new(Node::Internal {
                    left: Box::new(Node::Leaf { symbol: b'C' }),
                    right: Box::new(Node::Leaf { symbol: b'D' }),
                }),
            }),
            right: Box::new(Node::Leaf { symbol: b'A' }),
        };
        assert_eq!(tree.root, expected);
    }

    #[test]
    fn nul_byte_is_an_ordinary_symbol() {
        let tree = CodeTree::from_frequencies(&frequencies(&[(0, 3), (1, 1)])).unwrap();
        let expected = Node::Internal {
            left: Box::new(Node::Leaf { symbol: 1 }),
            right: Box::new(Node::Leaf { symbol: 0 }),
        };
        assert_eq!(tree.root, expected);
    }
}
