use std::cmp::{Eq, Ord, Ordering, PartialEq, PartialOrd, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

use super::{FrequencyTable, Symbol, SymbolCodeLength};
use crate::error::Error;
use crate::Result;

#[derive(Clone, Copy)]
enum NodeKind<S> {
    Leaf { symbol: S },
    Inner { left: usize, right: usize },
}

#[derive(Clone, Copy)]
struct Node<S> {
    frequency: usize,
    index: usize,
    kind: NodeKind<S>,
}

/// Huffman tree stored as an arena of nodes.
///
/// Leaves occupy the first indices in the order of the frequency table, every
/// merged node is appended behind them. Since a node is pushed onto the heap
/// exactly when it is appended to the arena, its index doubles as its
/// insertion sequence number.
pub struct HuffmanTree<S> {
    nodes: Vec<Node<S>>,
    root_index: usize,
    leaf_count: usize,
}

// equal frequencies are extracted first-in-first-out
impl<S> Ord for Node<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.frequency
            .cmp(&other.frequency)
            .then(self.index.cmp(&other.index))
    }
}

impl<S> PartialOrd for Node<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> PartialEq for Node<S> {
    fn eq(&self, other: &Self) -> bool {
        self.frequency == other.frequency && self.index == other.index
    }
}

impl<S> Eq for Node<S> {}

impl<S: Symbol> HuffmanTree<S> {
    pub fn new(frequencies: &FrequencyTable<S>) -> Result<HuffmanTree<S>> {
        if frequencies.is_empty() {
            log::warn!("refusing to build a huffman tree without symbols");
            return Err(Error::EmptyAlphabet);
        }
        let leaf_count = frequencies.len();
        let mut heap = BinaryHeap::with_capacity(leaf_count);
        let mut nodes: Vec<Node<S>> = Vec::with_capacity(2 * leaf_count - 1);

        for symbol_frequency in frequencies.iter() {
            let node = Node {
                frequency: symbol_frequency.frequency,
                index: nodes.len(),
                kind: NodeKind::Leaf {
                    symbol: symbol_frequency.symbol,
                },
            };
            heap.push(Reverse(node));
            nodes.push(node);
        }

        // merge the two cheapest nodes until a single root is left
        let root_index = loop {
            let Reverse(left) = heap.pop().ok_or(Error::EmptyAlphabet)?;
            let Some(Reverse(right)) = heap.pop() else {
                break left.index;
            };
            let frequency = left.frequency.checked_add(right.frequency).ok_or_else(|| {
                log::warn!(
                    "frequencies {} and {} of nodes {} and {} can't be merged",
                    left.frequency,
                    right.frequency,
                    left.index,
                    right.index
                );
                Error::FrequencyOverflow("merging huffman tree nodes".to_owned())
            })?;
            let node = Node {
                frequency,
                index: nodes.len(),
                kind: NodeKind::Inner {
                    left: left.index,
                    right: right.index,
                },
            };
            log::debug!(
                "merged nodes {} and {} into node {} with frequency {}",
                left.index,
                right.index,
                node.index,
                node.frequency
            );
            heap.push(Reverse(node));
            nodes.push(node);
        };

        log::info!(
            "built huffman tree with {} leaves and {} nodes",
            leaf_count,
            nodes.len()
        );
        Ok(HuffmanTree {
            nodes,
            root_index,
            leaf_count,
        })
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Depth of every leaf, in ascending symbol order.
    pub fn code_lengths(&self) -> Vec<SymbolCodeLength<S>> {
        if let NodeKind::Leaf { symbol } = self.nodes[self.root_index].kind {
            // a root leaf has depth zero, but a lone symbol still needs one bit
            return vec![SymbolCodeLength { symbol, length: 1 }];
        }

        let mut code_lengths = Vec::with_capacity(self.leaf_count);
        let mut node_index_stack = vec![(self.root_index, 0)];
        while let Some((index, depth)) = node_index_stack.pop() {
            match self.nodes[index].kind {
                NodeKind::Inner { left, right } => {
                    node_index_stack.push((right, depth + 1));
                    node_index_stack.push((left, depth + 1));
                }
                NodeKind::Leaf { symbol } => code_lengths.push(SymbolCodeLength {
                    symbol,
                    length: depth,
                }),
            }
        }
        code_lengths.sort_by_key(|code_length| code_length.symbol);
        code_lengths
    }
}

/// Derives the code length of every symbol from its depth in the Huffman tree.
/// The tree itself does not outlive this call.
pub fn build<S: Symbol>(frequencies: &FrequencyTable<S>) -> Result<Vec<SymbolCodeLength<S>>> {
    let tree = HuffmanTree::new(frequencies)?;
    Ok(tree.code_lengths())
}

const BOX_DRAWINGS_DOUBLE_HORIZONTAL: &str = "═";
const SPACE: &str = " ";

// Node & Tree visualization
impl<S: Symbol> Node<S> {
    fn get_string(&self, tree: &HuffmanTree<S>) -> Vec<String> {
        match self.kind {
            NodeKind::Leaf { symbol } => vec![format!("(s:{:?},f:{})", symbol, self.frequency)],
            NodeKind::Inner { left, right } => {
                let left_box: Vec<String> = tree.nodes[left].get_string(tree);
                let right_box: Vec<String> = tree.nodes[right].get_string(tree);
                let left_width = left_box[0].chars().count();
                let right_width = right_box[0].chars().count();
                let mut result: Vec<String> = Vec::new();

                result.push(format!(
                    "{}•{}",
                    SPACE.repeat(left_width),
                    SPACE.repeat(right_width)
                ));
                result.push(format!(
                    "{}║{}",
                    SPACE.repeat(left_width),
                    SPACE.repeat(right_width)
                ));

                let left_pos = get_center_position(&left_box[0]);
                let right_pos = get_center_position(&right_box[0]);
                result.push(format!(
                    "{}╔{}╩{}╗{}",
                    SPACE.repeat(left_pos),
                    BOX_DRAWINGS_DOUBLE_HORIZONTAL.repeat(left_width - left_pos - 1),
                    BOX_DRAWINGS_DOUBLE_HORIZONTAL.repeat(right_pos),
                    SPACE.repeat(right_width - right_pos - 1)
                ));

                let left_depth = left_box.len();
                let right_depth = right_box.len();
                for i in 0..std::cmp::max(left_depth, right_depth) {
                    let left_str = left_box
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| SPACE.repeat(left_width));
                    let right_str = right_box
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| SPACE.repeat(right_width));
                    result.push(format!("{} {}", left_str, right_str));
                }
                result
            }
        }
    }
}

fn get_center_position(line: &str) -> usize {
    let leading_spaces = line.chars().position(|c| c != ' ').unwrap_or(0);
    (leading_spaces * 2 + line.trim().chars().count()) / 2
}

impl<S: Symbol> fmt::Display for HuffmanTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strs = self.nodes[self.root_index].get_string(self);
        for s in strs.iter() {
            writeln!(f, "{}", s)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::super::{FrequencyTable, SymbolCodeLength};
    use super::{build, HuffmanTree, NodeKind};
    use crate::error::Error;

    const SYMBOLS_AND_FREQUENCIES_ODD_LEN: [(u8, usize); 7] =
        [(1, 17), (2, 3), (3, 12), (4, 3), (5, 18), (6, 12), (7, 13)];

    fn to_code_lengths<S: Copy>(pairs: &[(S, usize)]) -> Vec<SymbolCodeLength<S>> {
        pairs.iter().copied().map(SymbolCodeLength::from).collect()
    }

    #[test]
    fn test_code_lengths_follow_tree_depth() {
        let frequencies: FrequencyTable<char> = "abbccc".chars().collect();
        let code_lengths = build(&frequencies).unwrap();
        assert_eq!(code_lengths, to_code_lengths(&[('a', 2), ('b', 2), ('c', 1)]));
    }

    #[test]
    fn test_code_lengths_odd_len() {
        let frequencies = FrequencyTable::from_pairs(SYMBOLS_AND_FREQUENCIES_ODD_LEN).unwrap();
        let code_lengths = build(&frequencies).unwrap();
        let expected = to_code_lengths::<u8>(&[(1, 2), (2, 4), (3, 3), (4, 4), (5, 2), (6, 3), (7, 3)]);
        assert_eq!(code_lengths, expected);
    }

    #[test]
    fn test_single_symbol_gets_length_one() {
        let frequencies: FrequencyTable<char> = "aaaa".chars().collect();
        let tree = HuffmanTree::new(&frequencies).unwrap();
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.code_lengths(), to_code_lengths(&[('a', 1)]));
    }

    #[test]
    fn test_empty_frequency_table_is_rejected() {
        let frequencies: FrequencyTable<char> = FrequencyTable::new();
        let result = build(&frequencies);
        assert!(matches!(result, Err(Error::EmptyAlphabet)));
    }

    #[test]
    fn test_overflowing_frequency_sum_is_rejected() {
        let frequencies = FrequencyTable::from_pairs([('a', usize::MAX), ('b', 1)]).unwrap();
        let result = build(&frequencies);
        assert!(matches!(result, Err(Error::FrequencyOverflow(_))));
    }

    #[test]
    fn test_largest_frequencies_without_overflow() {
        let frequencies =
            FrequencyTable::from_pairs([('a', usize::MAX - 1), ('b', 1)]).unwrap();
        let code_lengths = build(&frequencies).unwrap();
        assert_eq!(code_lengths, to_code_lengths(&[('a', 1), ('b', 1)]));
    }

    #[test]
    fn test_equal_leaf_frequencies_merge_in_symbol_order() {
        let frequencies = FrequencyTable::from_pairs([('a', 1), ('b', 1), ('c', 1)]).unwrap();
        let code_lengths = build(&frequencies).unwrap();
        assert_eq!(
            code_lengths,
            to_code_lengths(&[('a', 2), ('b', 2), ('c', 1)]),
            "The leaves inserted first must be merged first"
        );
    }

    #[test]
    fn test_leaf_is_extracted_before_merged_node_of_equal_frequency() {
        // merging the merged node {a, b} with c first would give lengths 3, 3, 2, 1
        let frequencies = FrequencyTable::from_pairs([('a', 1), ('b', 1), ('c', 2), ('d', 2)]).unwrap();
        let code_lengths = build(&frequencies).unwrap();
        assert_eq!(
            code_lengths,
            to_code_lengths(&[('a', 2), ('b', 2), ('c', 2), ('d', 2)])
        );
    }

    #[test]
    fn test_left_child_is_first_extracted_node() {
        let frequencies: FrequencyTable<char> = "abbccc".chars().collect();
        let tree = HuffmanTree::new(&frequencies).unwrap();
        let NodeKind::Inner { left, right } = tree.nodes[tree.root_index].kind else {
            panic!("Root of a tree with three leaves must be an inner node");
        };
        assert!(matches!(tree.nodes[left].kind, NodeKind::Leaf { symbol: 'c' }));
        assert!(matches!(tree.nodes[right].kind, NodeKind::Inner { .. }));
    }

    #[test]
    fn test_each_node_has_correct_index() {
        let frequencies = FrequencyTable::from_pairs(SYMBOLS_AND_FREQUENCIES_ODD_LEN).unwrap();
        let tree = HuffmanTree::new(&frequencies).unwrap();
        assert_eq!(tree.nodes.len(), 2 * tree.leaf_count() - 1);
        for (index, node) in tree.nodes.iter().enumerate() {
            assert_eq!(index, node.index);
        }
    }

    #[test]
    fn test_higher_frequent_symbols_must_not_have_longer_codes() {
        let frequencies = FrequencyTable::from_pairs(SYMBOLS_AND_FREQUENCIES_ODD_LEN).unwrap();
        let code_lengths = build(&frequencies).unwrap();
        for a in &code_lengths {
            for b in &code_lengths {
                let frequency_a = frequencies.frequency(&a.symbol).unwrap();
                let frequency_b = frequencies.frequency(&b.symbol).unwrap();
                if frequency_a > frequency_b {
                    assert!(
                        a.length <= b.length,
                        "Symbol {} with frequency {} has a longer code than symbol {} with frequency {}",
                        a.symbol,
                        frequency_a,
                        b.symbol,
                        frequency_b
                    );
                }
            }
        }
    }

    #[test]
    fn test_degenerate_tree_depth() {
        let mut fibonacci = vec![1usize, 1];
        while fibonacci.len() < 40 {
            let next = fibonacci[fibonacci.len() - 1] + fibonacci[fibonacci.len() - 2];
            fibonacci.push(next);
        }
        let frequencies =
            FrequencyTable::from_pairs((0u8..).zip(fibonacci.iter().copied())).unwrap();
        let code_lengths = build(&frequencies).unwrap();
        let max_length = code_lengths.iter().map(|c| c.length).max().unwrap();
        assert_eq!(max_length, 39);
        let kraft_sum: u64 = code_lengths
            .iter()
            .map(|c| 1u64 << (max_length - c.length))
            .sum();
        assert_eq!(kraft_sum, 1u64 << max_length, "Huffman code must be complete");
    }

    #[test]
    fn test_display_tree() {
        let frequencies: FrequencyTable<char> = "aaab".chars().collect();
        let tree = HuffmanTree::new(&frequencies).unwrap();
        let rendered = tree.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], format!("{}•{}", " ".repeat(11), " ".repeat(11)));
        assert_eq!(
            lines[2],
            format!("{}╔{}╩{}╗{}", " ".repeat(5), "═".repeat(5), "═".repeat(5), " ".repeat(5))
        );
        assert_eq!(lines[3], "(s:'b',f:1) (s:'a',f:3)");
    }

    #[test]
    fn test_display_single_leaf() {
        let frequencies: FrequencyTable<u8> = [7, 7].into_iter().collect();
        let tree = HuffmanTree::new(&frequencies).unwrap();
        assert_eq!(tree.to_string(), "(s:7,f:2)\n");
    }
}
