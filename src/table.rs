//! The textual code-table format: two lines per leaf, the symbol's decimal
//! value followed by its root-to-leaf path over '0' (left) and '1' (right).
//! There is no header or trailer; the table simply ends with its last pair.
//! A tree that is a single leaf is written as its symbol and an empty path
//! line.

use std::io::{BufRead, Write};

use log::warn;

use crate::error::CodeError;
use crate::tree::{CodeTree, Node};

impl CodeTree {
    /// Writes the code table for this tree to `sink`, leaves in left-to-right
    /// pre-order. The output is a pure function of the tree, so repeated
    /// calls produce byte-identical text.
    pub fn save<W: Write + ?Sized>(&self, sink: &mut W) -> Result<(), CodeError> {
        let mut path = String::new();
        save_node(&self.root, &mut path, sink)?;
        Ok(())
    }

    /// Reconstructs a tree from a code table produced by [`CodeTree::save`]
    /// (or by any other writer of the same format; pairs may appear in any
    /// order).
    ///
    /// Each pair is grafted onto a growing trie: the path is walked from the
    /// root, materializing interior nodes as needed, and the leaf is placed
    /// where the path ends.
    ///
    /// # Errors
    ///
    /// [`CodeError::MalformedTable`] for an odd number of lines, a symbol
    /// line that is not a decimal integer in `0..=255`, a path character
    /// other than '0'/'1', an empty table, or a table whose paths leave some
    /// interior node without a leaf below one of its branches.
    /// [`CodeError::AmbiguousCode`] when a path collides with an entry
    /// already placed: a duplicate, a strict prefix, or an extension of it.
    pub fn load<R: BufRead>(source: R) -> Result<Self, CodeError> {
        let mut lines = source.lines();
        let mut root = Slot::Open {
            left: None,
            right: None,
        };
        let mut pairs = 0usize;

        while let Some(symbol_line) = lines.next() {
            let symbol_line = symbol_line?;
            let path = match lines.next() {
                Some(line) => line?,
                None => {
                    warn!("code table ends with a dangling symbol line");
                    return Err(CodeError::MalformedTable("odd number of lines".into()));
                }
            };
            let symbol: u8 = symbol_line.parse().map_err(|_| {
                warn!("unparseable symbol line {:?}", symbol_line);
                CodeError::MalformedTable(format!("invalid symbol line {:?}", symbol_line))
            })?;

            graft(&mut root, symbol, &path)?;
            pairs += 1;
        }

        if pairs == 0 {
            return Err(CodeError::MalformedTable("empty table".into()));
        }
        Ok(CodeTree { root: seal(root)? })
    }
}

fn save_node<W: Write + ?Sized>(
    node: &Node,
    path: &mut String,
    sink: &mut W,
) -> Result<(), CodeError> {
    match node {
        Node::Leaf { symbol } => {
            writeln!(sink, "{}", symbol)?;
            writeln!(sink, "{}", path)?;
        }
        Node::Internal { left, right } => {
            path.push('0');
            save_node(left, path, sink)?;
            path.pop();
            path.push('1');
            save_node(right, path, sink)?;
            path.pop();
        }
    }
    Ok(())
}

// A node of the trie under reconstruction. `Open` slots are interior nodes
// whose children may not all have been seen yet; `seal` turns the finished
// trie into a `Node` tree and rejects any branch that never received a leaf.
enum Slot {
    Leaf(u8),
    Open {
        left: Option<Box<Slot>>,
        right: Option<Box<Slot>>,
    },
}

fn graft(root: &mut Slot, symbol: u8, path: &str) -> Result<(), CodeError> {
    let ambiguous = || CodeError::AmbiguousCode {
        symbol,
        path: path.to_owned(),
    };

    let mut current = root;
    for step in path.chars() {
        let child = match current {
            // An already-placed leaf on the way down means some earlier
            // entry's path is a strict prefix of this one.
            Slot::Leaf(_) => {
                warn!("code table is not prefix-free at symbol {}", symbol);
                return Err(ambiguous());
            }
            Slot::Open { left, right } => match step {
                '0' => left,
                '1' => right,
                other => {
                    warn!("invalid path character {:?} for symbol {}", other, symbol);
                    return Err(CodeError::MalformedTable(format!(
                        "invalid path character {:?}",
                        other
                    )));
                }
            },
        };
        current = &mut **child.get_or_insert_with(|| {
            Box::new(Slot::Open {
                left: None,
                right: None,
            })
        });
    }

    match current {
        Slot::Open {
            left: None,
            right: None,
        } => {
            *current = Slot::Leaf(symbol);
            Ok(())
        }
        // Landing on a leaf is a duplicate path; landing on a slot with
        // children means this path is a strict prefix of an earlier one.
        _ => {
            warn!("code table is not prefix-free at symbol {}", symbol);
            Err(ambiguous())
        }
    }
}

fn seal(slot: Slot) -> Result<Node, CodeError> {
    match slot {
        Slot::Leaf(symbol) => Ok(Node::Leaf { symbol }),
        Slot::Open {
            left: Some(left),
            right: Some(right),
        } => Ok(Node::Internal {
            left: Box::new(seal(*left)?),
            right: Box::new(seal(*right)?),
        }),
        Slot::Open { .. } => {
            warn!("code table is incomplete: an interior node is missing a branch");
            Err(CodeError::MalformedTable("incomplete code".into()))
        }
    }
}
