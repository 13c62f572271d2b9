use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::{HeapErr, MinHeap};

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    pub fn from_text(text: &str) -> Result<Self> {
        let frequencies = FrequencyTable::from_text(text)?;
        HuffmanTree::from_frequencies(&frequencies)
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffmanError::EmptyInput("cannot build a tree without symbols"));
        }

        let nodes: Vec<HuffNode> = frequencies.into_iter()
            .map(|&(count, symbol)| HuffNode::new(symbol, count))
            .collect();

        let heap = MinHeap::build(nodes)?;
        let tree = HuffmanTree::build_from_heap(heap)?;

        debug!(
            "built huffman tree: {} leaves, root weight {}",
            tree.leaf_count(),
            tree.weight()
        );
        trace!("{}", tree);

        Ok(tree)
    }

    fn build_from_heap(mut heap: MinHeap<HuffNode>) -> std::result::Result<Self, HeapErr> {
        let merges = heap.heap_size().saturating_sub(1);
        for seq in 0..merges {
            let x = heap.extract_min()?;
            let y = heap.extract_min()?;

            heap.insert(HuffNode::merge(x, y, seq));
        }

        let root = heap.extract_min()?;
        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Total weight, i.e. the length of the text the tree was built from.
    pub fn weight(&self) -> usize {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    fn fmt_node(f: &mut fmt::Formatter<'_>, node: &HuffNode, depth: usize, label: &str) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match node {
            HuffNode::Leaf { symbol, weight } => {
                writeln!(f, "{}{}-> Leaf: {:?} [weight: {}]", indent, label, symbol, weight)
            },
            HuffNode::Internal { weight, left, right, .. } => {
                writeln!(f, "{}{}-> Internal [weight: {}]", indent, label, weight)?;
                Self::fmt_node(f, left, depth + 1, "L")?;
                Self::fmt_node(f, right, depth + 1, "R")
            }
        }
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Huffman Tree Structure:")?;
        Self::fmt_node(f, &self.root, 0, "root")
    }
}

#[derive(Debug, Clone)]
pub enum HuffNode {
    Leaf {
        weight: usize,
        symbol: char,
    },
    Internal {
        weight: usize,
        // merge order, only used to break weight ties
        seq: usize,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(symbol: char, weight: usize) -> Self {
        HuffNode::Leaf { weight, symbol }
    }

    pub fn weight(&self) -> usize {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// `a` was extracted first and becomes the left child.
    pub fn merge(a: Self, b: Self, seq: usize) -> Self {
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            seq,
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

impl PartialEq for HuffNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HuffNode {}

impl PartialOrd for HuffNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HuffNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // lighter first; on equal weight merged nodes come before leaves
        self.weight().cmp(&other.weight()).then_with(|| match (self, other) {
            (HuffNode::Internal { seq: a, .. }, HuffNode::Internal { seq: b, .. }) => a.cmp(b),
            (HuffNode::Internal { .. }, HuffNode::Leaf { .. }) => Ordering::Less,
            (HuffNode::Leaf { .. }, HuffNode::Internal { .. }) => Ordering::Greater,
            (HuffNode::Leaf { symbol: a, .. }, HuffNode::Leaf { symbol: b, .. }) => a.cmp(b),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn leaf_symbol(node: &HuffNode) -> Option<char> {
        match node {
            HuffNode::Leaf { symbol, .. } => Some(*symbol),
            HuffNode::Internal { .. } => None,
        }
    }

    #[test]
    fn test_abracadabra_shape() {
        let tree = HuffmanTree::from_text("abracadabra").unwrap();
        assert_eq!(tree.weight(), 11);
        assert_eq!(tree.leaf_count(), 5);

        let HuffNode::Internal { left, right, .. } = tree.root() else {
            panic!("root should be internal");
        };
        assert_eq!(leaf_symbol(left), Some('a'));
        assert_eq!(right.weight(), 6);

        let HuffNode::Internal { left, right, .. } = &**right else {
            panic!("expected internal node");
        };
        assert_eq!(leaf_symbol(left), Some('r'));
        assert_eq!(right.weight(), 4);
    }

    #[test]
    fn test_single_symbol_is_lone_leaf() {
        let tree = HuffmanTree::from_text("aaaa").unwrap();
        assert!(tree.root().is_leaf());
        assert_eq!(tree.weight(), 4);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_merged_node_wins_weight_tie() {
        let merged = HuffNode::merge(HuffNode::new('x', 1), HuffNode::new('y', 1), 0);
        let leaf = HuffNode::new('a', 2);
        assert!(merged < leaf);

        let later = HuffNode::merge(HuffNode::new('p', 1), HuffNode::new('q', 1), 1);
        assert!(merged < later);
        assert!(HuffNode::new('a', 3) < HuffNode::new('b', 3));
    }

    #[test]
    fn test_display_dump() {
        let tree = HuffmanTree::from_text("aab").unwrap();
        let dump = tree.to_string();
        assert!(dump.starts_with("Huffman Tree Structure:\nroot-> Internal [weight: 3]"));
        assert!(dump.contains("  L-> Leaf: 'b' [weight: 1]"));
        assert!(dump.contains("  R-> Leaf: 'a' [weight: 2]"));
    }

    #[test]
    fn test_empty_frequencies_rejected() {
        assert!(matches!(
            HuffmanTree::from_text(""),
            Err(HuffmanError::EmptyInput(_))
        ));
    }
}
