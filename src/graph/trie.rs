//! Arena-backed letter trie
//!
//! Each node holds one letter, an end-of-word flag, the next node in its
//! sibling chain and the first node of the following letter position. A
//! sibling chain holds each letter at most once, in insertion order.

/// Index of a node in the trie arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(u32);

impl NodeIndex {
    #[inline]
    const fn get(self) -> usize {
        self.0 as usize
    }
}

/// A single trie node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub letter: char,
    pub is_end_of_word: bool,
    pub next: Option<NodeIndex>,
    pub child: Option<NodeIndex>,
}

/// Letter trie storing words in one orientation
#[derive(Debug, Clone, Default)]
pub struct Trie {
    nodes: Vec<Node>,
    root: Option<NodeIndex>,
    num_words: usize,
}

impl Trie {
    /// Create an empty trie
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a word; inserting it again only re-marks the end of word
    ///
    /// Empty words are ignored.
    pub fn insert(&mut self, word: &str) {
        let mut chain = self.root;
        let mut parent: Option<NodeIndex> = None;
        let mut last: Option<NodeIndex> = None;

        for letter in word.chars() {
            let node = match self.find_in_chain(chain, letter) {
                Some(found) => found,
                None => self.append_to_chain(chain, parent, letter),
            };
            parent = Some(node);
            chain = self.nodes[node.get()].child;
            last = Some(node);
        }

        if let Some(node) = last {
            let node = &mut self.nodes[node.get()];
            if !node.is_end_of_word {
                node.is_end_of_word = true;
                self.num_words += 1;
            }
        }
    }

    /// Determine whether a word was inserted
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        let mut chain = self.root;
        let mut last: Option<NodeIndex> = None;
        for letter in word.chars() {
            match self.find_in_chain(chain, letter) {
                Some(node) => {
                    chain = self.nodes[node.get()].child;
                    last = Some(node);
                }
                None => return false,
            }
        }
        last.is_some_and(|node| self.nodes[node.get()].is_end_of_word)
    }

    /// First node of the root sibling chain
    #[inline]
    #[must_use]
    pub const fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Look up a node by index
    ///
    /// # Panics
    /// Panics if the index came from a different trie.
    #[inline]
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.get()]
    }

    /// Iterate over a sibling chain starting at `head`
    pub fn siblings(&self, head: Option<NodeIndex>) -> impl Iterator<Item = (NodeIndex, &Node)> {
        std::iter::successors(head, |&index| self.nodes[index.get()].next)
            .map(|index| (index, &self.nodes[index.get()]))
    }

    /// Number of distinct words inserted
    #[inline]
    #[must_use]
    pub const fn num_words(&self) -> usize {
        self.num_words
    }

    /// Number of nodes in the arena
    #[inline]
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn find_in_chain(&self, head: Option<NodeIndex>, letter: char) -> Option<NodeIndex> {
        self.siblings(head)
            .find(|(_, node)| node.letter == letter)
            .map(|(index, _)| index)
    }

    fn append_to_chain(
        &mut self,
        head: Option<NodeIndex>,
        parent: Option<NodeIndex>,
        letter: char,
    ) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            letter,
            is_end_of_word: false,
            next: None,
            child: None,
        });

        let tail = self.siblings(head).last().map(|(tail, _)| tail);
        match tail {
            Some(tail) => self.nodes[tail.get()].next = Some(index),
            None => match parent {
                Some(parent) => self.nodes[parent.get()].child = Some(index),
                None => self.root = Some(index),
            },
        }
        index
    }
}
