//! Binary code trees.
//!
//! A tree comes from one of two places: [`CodeTree::build`] merges symbols
//! greedily by frequency, [`CodeTree::rebuild`] recovers the same shape
//! from nothing but a [`CodeTable`]. Both must agree on every leaf's code.
//!
//! Nodes live in an arena and refer to their children by index, so the
//! tree owns everything top-down and has no back-references.

use std::cmp::Reverse;

use tracing::debug;

use crate::bit_vec::BitVec;
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyMap;
use crate::min_heap::MinHeap;

/// Index of a node inside its [`CodeTree`].
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// A symbol. `weight` is only known on the frequency path.
    Leaf { symbol: u8, weight: Option<u64> },
    /// Filler leaf completing a single-symbol tree; carries no symbol.
    Placeholder,
    Internal {
        left: NodeId,
        right: NodeId,
        weight: Option<u64>,
    },
}

impl Node {
    pub fn weight(&self) -> Option<u64> {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
            Node::Placeholder => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, Node::Internal { .. })
    }
}

/// Full binary tree whose root-to-leaf paths spell the codewords: `0` for
/// left, `1` for right.
///
/// A non-empty tree always has an internal root. Single-symbol alphabets
/// get a [`Node::Placeholder`] on the `1` branch (or the `0` branch when
/// rebuilt from a table whose lone code is `1`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

/// Tie-breaking between working-set entries of equal weight: leaves go
/// before merged nodes, higher symbols before lower ones, and older merged
/// nodes before newer ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MergeRank {
    Leaf(Reverse<u8>),
    Merged(usize),
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Weighted {
    weight: u64,
    rank: MergeRank,
    node: NodeId,
}

/// Working-set entry of the reconstruction: longest, then lexicographically
/// largest codeword comes out first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Positioned {
    code: Reverse<BitVec>,
    seq: usize,
    node: NodeId,
}

impl CodeTree {
    /// Build the Huffman tree for `frequencies`.
    ///
    /// The two lightest entries are merged until one remains; the lighter
    /// of each pair becomes the right child. Among equal weights leaves are
    /// merged before merged nodes, so the same map always yields the same
    /// tree.
    pub fn build(frequencies: &FrequencyMap) -> Self {
        let mut tree = CodeTree::default();

        let mut symbols = frequencies.iter();
        match (symbols.next(), symbols.next()) {
            (None, _) => return tree,
            (Some((symbol, weight)), None) => {
                let leaf = tree.push(Node::Leaf {
                    symbol,
                    weight: Some(weight),
                });
                let filler = tree.push(Node::Placeholder);
                tree.root = Some(tree.push(Node::Internal {
                    left: leaf,
                    right: filler,
                    weight: Some(weight),
                }));
                debug!(symbols = 1, "built single-symbol code tree");
                return tree;
            }
            _ => {}
        }

        let leaves: Vec<Weighted> = frequencies
            .iter()
            .map(|(symbol, weight)| Weighted {
                weight,
                rank: MergeRank::Leaf(Reverse(symbol)),
                node: tree.push(Node::Leaf {
                    symbol,
                    weight: Some(weight),
                }),
            })
            .collect();
        let mut heap = MinHeap::build(leaves);

        let mut merged = 0;
        while let Some(lightest) = heap.extract_min() {
            let Some(next) = heap.extract_min() else {
                tree.root = Some(lightest.node);
                break;
            };
            let weight = lightest.weight.saturating_add(next.weight);
            let node = tree.push(Node::Internal {
                left: next.node,
                right: lightest.node,
                weight: Some(weight),
            });
            heap.insert(Weighted {
                weight,
                rank: MergeRank::Merged(merged),
                node,
            });
            merged += 1;
        }

        debug!(
            symbols = frequencies.len(),
            max_code_len = tree.depth(),
            "built code tree"
        );
        tree
    }

    /// Recover a walkable tree from a code table alone.
    ///
    /// Entries are merged pairwise by codeword position: the two longest
    /// codewords (largest first on ties) must differ only in their final
    /// bit, and their parent takes the shared prefix. A table that is not
    /// prefix-free, or that leaves part of the code space unassigned, is
    /// rejected with [`HuffmanError::MalformedCodeTable`].
    pub fn rebuild(table: &CodeTable) -> Result<Self> {
        let mut tree = CodeTree::default();
        if table.is_empty() {
            return Ok(tree);
        }

        let mut entries = Vec::with_capacity(table.len() + 1);
        for (symbol, code) in table.iter() {
            if code.is_empty() {
                return Err(HuffmanError::malformed(format!(
                    "symbol 0x{symbol:02x} has an empty codeword"
                )));
            }
            entries.push(Positioned {
                code: Reverse(code.clone()),
                seq: entries.len(),
                node: tree.push(Node::Leaf {
                    symbol,
                    weight: None,
                }),
            });
        }

        if let [lone] = entries.as_slice() {
            let code = &lone.code.0;
            if code.len() != 1 {
                return Err(HuffmanError::malformed(format!(
                    "single-symbol table must use a 1-bit codeword, got {code}"
                )));
            }
            let filler_code: BitVec = std::iter::once(code.last() != Some(true)).collect();
            entries.push(Positioned {
                code: Reverse(filler_code),
                seq: 1,
                node: tree.push(Node::Placeholder),
            });
        }

        let mut seq = entries.len();
        let mut heap = MinHeap::build(entries);
        let root = loop {
            let Some(high) = heap.extract_min() else {
                return Err(HuffmanError::malformed("no codewords to merge"));
            };
            let Some(low) = heap.extract_min() else {
                break high;
            };
            let prefix = sibling_prefix(&low.code.0, &high.code.0)?;
            let node = tree.push(Node::Internal {
                left: low.node,
                right: high.node,
                weight: None,
            });
            heap.insert(Positioned {
                code: Reverse(prefix),
                seq,
                node,
            });
            seq += 1;
        };

        if !root.code.0.is_empty() {
            return Err(HuffmanError::malformed(format!(
                "codewords only cover the subtree under prefix {}",
                root.code.0
            )));
        }
        tree.root = Some(root.node);

        debug!(
            symbols = table.len(),
            max_code_len = tree.depth(),
            "rebuilt code tree from table"
        );
        Ok(tree)
    }

    /// Derive the code table by walking the tree left-first.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        if let Some(root) = self.root {
            self.generate_table(root, &mut BitVec::new(), &mut table);
        }
        table
    }

    fn generate_table(&self, id: NodeId, code: &mut BitVec, table: &mut CodeTable) {
        match self.nodes[id] {
            Node::Leaf { symbol, .. } => {
                table.insert(symbol, code.clone());
            }
            Node::Placeholder => {}
            Node::Internal { left, right, .. } => {
                code.push_bit(false);
                self.generate_table(left, code, table);
                code.pop();
                code.push_bit(true);
                self.generate_table(right, code, table);
                code.pop();
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// All nodes; every [`NodeId`] handed out by this tree indexes into it.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of symbol leaves, placeholder excluded.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut deepest = 0;
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
                _ => deepest = deepest.max(depth),
            }
        }
        deepest
    }

    /// Total weight under the root, when built from frequencies.
    pub fn weight(&self) -> Option<u64> {
        self.root.and_then(|root| self.nodes[root].weight())
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}

/// Parent position of two working-set entries, provided they are siblings:
/// same length, same bits except the last, `low` ending in 0 and `high` in 1.
fn sibling_prefix(low: &BitVec, high: &BitVec) -> Result<BitVec> {
    let mut prefix = high.clone();
    let siblings = low.len() == high.len()
        && prefix.pop() == Some(true)
        && low.last() == Some(false)
        && low.starts_with(&prefix);
    if siblings {
        Ok(prefix)
    } else {
        Err(HuffmanError::malformed(format!(
            "codewords {low} and {high} are not prefix-free siblings"
        )))
    }
}
