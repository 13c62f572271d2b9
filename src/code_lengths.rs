use std::collections::VecDeque;

use crate::hufftree::{HuffNode, HuffmanTree};

/// Shortest code handed out. A lone-leaf tree sits at depth 0, which would
/// otherwise give its symbol an empty code.
pub const MIN_CODE_LENGTH: usize = 1;

/// `(length, symbol)` per leaf, sorted by length and then by symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLengthTable {
    entries: Vec<(usize, char)>,
}

impl CodeLengthTable {
    /// Walks the tree level by level and records the depth of every leaf.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut entries = Vec::with_capacity(tree.leaf_count());
        let mut queue: VecDeque<&HuffNode> = VecDeque::new();
        queue.push_back(tree.root());

        let mut depth = 0;
        while !queue.is_empty() {
            for _ in 0..queue.len() {
                let Some(node) = queue.pop_front() else {
                    break;
                };
                match node {
                    HuffNode::Leaf { symbol, .. } => {
                        entries.push((depth.max(MIN_CODE_LENGTH), *symbol));
                    },
                    HuffNode::Internal { left, right, .. } => {
                        queue.push_back(left);
                        queue.push_back(right);
                    }
                }
            }
            depth += 1;
        }

        entries.sort_unstable();
        CodeLengthTable { entries }
    }

    pub fn entries(&self) -> &[(usize, char)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.entries.last().map_or(0, |(length, _)| *length)
    }

    pub fn length_of(&self, symbol: char) -> Option<usize> {
        self.entries.iter()
            .find(|(_, s)| *s == symbol)
            .map(|(length, _)| *length)
    }
}

impl From<Vec<(usize, char)>> for CodeLengthTable {
    fn from(mut entries: Vec<(usize, char)>) -> Self {
        entries.sort_unstable();
        CodeLengthTable { entries }
    }
}
