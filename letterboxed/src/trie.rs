use hashbrown::HashMap;

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Clone, Debug, Default)]
struct Node {
    terminal: bool,
    children: HashMap<char, NodeId>,
}

/// A position in a [`PrefixTree`], i.e. a prefix known to exist in the tree.
///
/// Cursors let a caller extend a prefix one character at a time without
/// walking the tree from the root on every step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor(NodeId);

/// Dictionary stored as a prefix tree.
///
/// Nodes live in a single arena and refer to their children by index, so the
/// tree owns every node outright and no node holds a reference to another.
#[derive(Clone, Debug)]
pub struct PrefixTree {
    nodes: Vec<Node>,
    len: usize,
}

impl PrefixTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds `word` to the tree. Returns false if the word was already present.
    ///
    /// The empty string is never stored.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        let mut id = ROOT;
        for c in word.chars() {
            id = match self.nodes[id].children.get(&c) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[id].children.insert(c, child);
                    child
                }
            };
        }

        let node = &mut self.nodes[id];
        if node.terminal {
            return false;
        }

        node.terminal = true;
        self.len += 1;
        true
    }

    /// True if some stored word starts with `prefix`.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.cursor(prefix).is_some()
    }

    /// True if `s` was inserted as a word.
    pub fn is_word(&self, s: &str) -> bool {
        self.cursor(s).map_or(false, |at| self.is_terminal(at))
    }

    /// One-character extensions of `prefix` present in the tree, sorted.
    pub fn child_prefixes(&self, prefix: &str) -> Vec<String> {
        let at = match self.cursor(prefix) {
            Some(at) => at,
            None => return Vec::new(),
        };

        let mut children: Vec<_> = self.nodes[at.0]
            .children
            .keys()
            .map(|&c| {
                let mut extended = String::with_capacity(prefix.len() + c.len_utf8());
                extended.push_str(prefix);
                extended.push(c);
                extended
            })
            .collect();
        children.sort_unstable();
        children
    }

    /// Every stored word, in sorted order.
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.len);
        let mut current = String::new();
        self.collect_words(ROOT, &mut current, &mut words);
        words
    }

    fn collect_words(&self, id: NodeId, current: &mut String, words: &mut Vec<String>) {
        let node = &self.nodes[id];
        if node.terminal {
            words.push(current.clone());
        }

        let mut children: Vec<_> = node.children.iter().collect();
        children.sort_unstable_by_key(|&(&c, _)| c);
        for (&c, &child) in children {
            current.push(c);
            self.collect_words(child, current, words);
            current.pop();
        }
    }

    pub fn root(&self) -> Cursor {
        Cursor(ROOT)
    }

    pub fn cursor(&self, prefix: &str) -> Option<Cursor> {
        prefix
            .chars()
            .try_fold(self.root(), |at, c| self.advance(at, c))
    }

    /// Moves from `at` to the prefix extended by `c`, if any word continues that way.
    pub fn advance(&self, at: Cursor, c: char) -> Option<Cursor> {
        self.nodes[at.0].children.get(&c).copied().map(Cursor)
    }

    pub fn is_terminal(&self, at: Cursor) -> bool {
        self.nodes[at.0].terminal
    }
}

impl Default for PrefixTree {
    fn default() -> Self {
        Self {
            nodes: vec![Node::default()],
            len: 0,
        }
    }
}

impl<S: AsRef<str>> Extend<S> for PrefixTree {
    fn extend<I: IntoIterator<Item = S>>(&mut self, words: I) {
        for word in words {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixTree {
    fn from_iter<I: IntoIterator<Item = S>>(words: I) -> Self {
        let mut tree = PrefixTree::new();
        tree.extend(words);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::PrefixTree;

    fn tree() -> PrefixTree {
        ["art", "arts", "artist", "bat", "bath"].into_iter().collect()
    }

    #[test]
    fn inserted_words_are_words() {
        let tree = tree();
        assert_eq!(tree.len(), 5);
        for word in ["art", "arts", "artist", "bat", "bath"] {
            assert!(tree.is_word(word), "{word}");
        }
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut tree = tree();
        assert!(!tree.insert("arts"));
        assert!(tree.is_word("arts"));
        assert_eq!(tree.len(), 5);

        assert!(tree.insert("ar"));
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn prefixes_are_not_words() {
        let tree = tree();
        assert!(tree.contains_prefix("arti"));
        assert!(!tree.is_word("arti"));
        assert!(tree.contains_prefix(""));
        assert!(!tree.is_word(""));
    }

    #[test]
    fn absent_strings() {
        let tree = tree();
        assert!(!tree.contains_prefix("bats"));
        assert!(!tree.is_word("bats"));
        assert!(!tree.contains_prefix("c"));
        assert!(!tree.is_word("artists"));
    }

    #[test]
    fn empty_word_is_rejected() {
        let mut tree = PrefixTree::new();
        assert!(!tree.insert(""));
        assert!(tree.is_empty());
        assert!(!tree.is_word(""));
    }

    #[test]
    fn child_prefixes() {
        let tree = tree();
        assert_eq!(tree.child_prefixes("art"), ["arti", "arts"]);
        assert_eq!(tree.child_prefixes(""), ["a", "b"]);
        assert!(tree.child_prefixes("bath").is_empty());
        assert!(tree.child_prefixes("zebra").is_empty());
    }

    #[test]
    fn words_are_sorted() {
        let tree: PrefixTree = ["bath", "arts", "bat", "artist", "art"].into_iter().collect();
        assert_eq!(tree.words(), ["art", "artist", "arts", "bat", "bath"]);
    }

    #[test]
    fn cursor_walk_matches_queries() {
        let tree = tree();
        let at = tree.cursor("ar").unwrap();
        let art = tree.advance(at, 't').unwrap();
        assert!(tree.is_terminal(art));
        assert_eq!(Some(art), tree.cursor("art"));
        assert!(tree.advance(art, 'x').is_none());
    }
}
