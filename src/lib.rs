//! # Huffman code
//!
//! `huffman-code` builds, saves, loads, and decodes prefix-free binary codes
//! over byte alphabets, using the
//! [Huffman coding](https://en.wikipedia.org/wiki/Huffman_coding)
//! algorithm for minimum-redundancy codes.
//!
//! A [`CodeTree`] is constructed once, either from a table of observed
//! symbol frequencies ([`CodeTree::from_frequencies`]) or from a previously
//! saved code table ([`CodeTree::load`]), and is read-only from then on.
//! [`CodeTree::save`] writes the tree as a textual code table, two lines per
//! leaf; [`CodeTree::decode`] walks a bit source one bit at a time to
//! recover the original bytes; [`CodeTree::book`] inverts the tree into a
//! symbol-to-code-word lookup for encoding.
//!
//! ```
//! use huffman_code::{byte_frequencies, BitCursor, CodeTree};
//!
//! let input = b"abracadabra";
//! let tree = CodeTree::from_frequencies(&byte_frequencies(input)).unwrap();
//!
//! // The code table survives a save/load round trip...
//! let mut table = Vec::new();
//! tree.save(&mut table).unwrap();
//! let loaded = CodeTree::load(&table[..]).unwrap();
//! assert_eq!(loaded, tree);
//!
//! // ...and the loaded tree decodes anything the original encodes.
//! let encoded = tree.book().encode(input).unwrap();
//! let mut decoded = Vec::new();
//! loaded.decode(&mut BitCursor::new(&encoded), &mut decoded).unwrap();
//! assert_eq!(decoded, input);
//! ```
//!
//! ## References
//!
//! * _Huffman, D.A., 1952. A method for the construction of minimum-redundancy codes. Proceedings of the IRE, 40(9), pp.1098-1101._

mod book;
mod decode;
mod error;
mod table;
mod tree;

pub use book::CodeBook;
pub use decode::{BitCursor, BitSource};
pub use error::CodeError;
pub use tree::{CodeTree, Node};

/// Counts the occurrences of each byte value in `data`, producing the
/// frequency table that [`CodeTree::from_frequencies`] consumes.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// let frequencies = huffman_code::byte_frequencies(b"abracadabra");
///
/// assert_eq!(frequencies[b'a' as usize], 5);
/// assert_eq!(frequencies[b'b' as usize], 2);
/// assert_eq!(frequencies[b'z' as usize], 0);
/// ```
pub fn byte_frequencies(data: &[u8]) -> [u64; 256] {
    let mut frequencies = [0u64; 256];
    for &byte in data {
        frequencies[byte as usize] += 1;
    }
    frequencies
}
