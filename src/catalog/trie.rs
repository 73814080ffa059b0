//! Character-indexed search tree with single-substitution lookup.
//!
//! Each node owns its children outright, so dropping the trie releases the
//! whole tree. Values accumulate at the node where their key ends; inserting
//! the same key twice keeps both values.

#[derive(Debug, Clone)]
struct TrieNode<V> {
    /// Symbol on the edge into this node (`None` only for the root)
    label: Option<u8>,
    children: Vec<TrieNode<V>>,
    values: Vec<V>,
}

impl<V> TrieNode<V> {
    fn new(label: Option<u8>) -> Self {
        Self {
            label,
            children: Vec::new(),
            values: Vec::new(),
        }
    }

    fn child_index(&self, symbol: u8) -> Option<usize> {
        self.children
            .iter()
            .position(|child| child.label == Some(symbol))
    }
}

/// A multimap from symbol strings to values with exact and
/// one-mismatch lookup
#[derive(Debug, Clone)]
pub struct ApproximateTrie<V> {
    root: TrieNode<V>,
    value_count: usize,
    node_count: usize,
}

impl<V> Default for ApproximateTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ApproximateTrie<V> {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(None),
            value_count: 0,
            node_count: 1,
        }
    }

    /// Append `value` at the node for `key`, creating missing nodes on the way.
    ///
    /// An empty key stores the value at the root.
    pub fn insert(&mut self, key: &[u8], value: V) {
        let mut node = &mut self.root;
        for &symbol in key {
            let index = if let Some(index) = node.child_index(symbol) {
                index
            } else {
                node.children.push(TrieNode::new(Some(symbol)));
                self.node_count += 1;
                node.children.len() - 1
            };
            node = &mut node.children[index];
        }
        node.values.push(value);
        self.value_count += 1;
    }

    /// Every value whose key matches `key`.
    ///
    /// With `exact_only` false, a path may differ from `key` in one position,
    /// but never in the first: the symbol below the root must always agree.
    pub fn find(&self, key: &[u8], exact_only: bool) -> Vec<&V> {
        let mut found = Vec::new();
        Self::collect(&self.root, key, true, !exact_only, &mut found);
        found
    }

    fn collect<'a>(
        node: &'a TrieNode<V>,
        key: &[u8],
        at_root: bool,
        mismatch_available: bool,
        found: &mut Vec<&'a V>,
    ) {
        let Some((&symbol, rest)) = key.split_first() else {
            found.extend(node.values.iter());
            return;
        };

        for child in &node.children {
            if child.label == Some(symbol) {
                Self::collect(child, rest, false, mismatch_available, found);
            } else if mismatch_available && !at_root {
                Self::collect(child, rest, false, false, found);
            }
        }
    }

    /// Drop every node and value, leaving an empty root
    pub fn clear(&mut self) {
        self.root = TrieNode::new(None);
        self.value_count = 0;
        self.node_count = 1;
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.value_count
    }

    pub fn is_empty(&self) -> bool {
        self.value_count == 0
    }

    /// Number of nodes, including the root
    pub fn node_count(&self) -> usize {
        self.node_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(values: Vec<&i32>) -> Vec<i32> {
        let mut values: Vec<i32> = values.into_iter().copied().collect();
        values.sort_unstable();
        values
    }

    #[test]
    fn test_insert_and_exact_find() {
        let mut trie = ApproximateTrie::new();
        trie.insert(b"ACGT", 1);
        trie.insert(b"ACGA", 2);
        trie.insert(b"TTTT", 3);

        assert_eq!(sorted(trie.find(b"ACGT", true)), vec![1]);
        assert_eq!(sorted(trie.find(b"TTTT", true)), vec![3]);
        assert!(trie.find(b"ACGC", true).is_empty());
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn test_duplicate_keys_accumulate() {
        let mut trie = ApproximateTrie::new();
        trie.insert(b"ACGT", 1);
        trie.insert(b"ACGT", 2);
        trie.insert(b"ACGT", 1);

        assert_eq!(sorted(trie.find(b"ACGT", true)), vec![1, 1, 2]);
        // Shared path: root + A + C + G + T
        assert_eq!(trie.node_count(), 5);
    }

    #[test]
    fn test_prefix_key_does_not_return_longer_keys() {
        let mut trie = ApproximateTrie::new();
        trie.insert(b"ACGT", 1);
        trie.insert(b"AC", 2);

        assert_eq!(sorted(trie.find(b"AC", true)), vec![2]);
        assert!(trie.find(b"ACG", true).is_empty());
    }

    #[test]
    fn test_single_mismatch_after_first_symbol() {
        let mut trie = ApproximateTrie::new();
        trie.insert(b"ACGT", 1);
        trie.insert(b"ACGA", 2);
        trie.insert(b"ATGT", 3);

        // Mismatch in the last position
        assert_eq!(sorted(trie.find(b"ACGC", false)), vec![1, 2]);
        // Mismatch in the second position
        assert_eq!(sorted(trie.find(b"AGGT", false)), vec![1, 3]);
        // Exact plus every one-off neighbour
        assert_eq!(sorted(trie.find(b"ACGT", false)), vec![1, 2, 3]);
    }

    #[test]
    fn test_first_symbol_mismatch_never_matches() {
        let mut trie = ApproximateTrie::new();
        trie.insert(b"ACGT", 1);

        assert!(trie.find(b"CCGT", false).is_empty());
        assert!(trie.find(b"TCGT", false).is_empty());
    }

    #[test]
    fn test_two_mismatches_rejected() {
        let mut trie = ApproximateTrie::new();
        trie.insert(b"ACGT", 1);

        assert!(trie.find(b"AGGA", false).is_empty());
        assert!(trie.find(b"ATTT", false).is_empty());
    }

    #[test]
    fn test_exact_only_disables_mismatch() {
        let mut trie = ApproximateTrie::new();
        trie.insert(b"ACGT", 1);

        assert!(trie.find(b"ACGA", true).is_empty());
        assert_eq!(sorted(trie.find(b"ACGA", false)), vec![1]);
    }

    #[test]
    fn test_empty_key_uses_root() {
        let mut trie = ApproximateTrie::new();
        trie.insert(b"", 7);
        trie.insert(b"A", 8);

        assert_eq!(sorted(trie.find(b"", true)), vec![7]);
        assert_eq!(sorted(trie.find(b"", false)), vec![7]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut trie = ApproximateTrie::new();
        trie.insert(b"ACGT", 1);
        trie.insert(b"GGGG", 2);
        assert!(!trie.is_empty());

        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
        assert!(trie.find(b"ACGT", false).is_empty());
    }
}
