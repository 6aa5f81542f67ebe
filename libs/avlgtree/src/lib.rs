//! # An AVL tree with a tunable balance bound.
//!
//! A Rust implementation of *AVL-G trees*, ordered binary search trees that allow the heights of
//! any node's two subtrees to differ by up to `G` levels, where `G >= 1` is chosen per tree.
//!
//! With `G = 1` this is the classic AVL tree of Adelson-Velsky & Landis, with a worst-case height
//! of ~1.44log2(n). Raising `G` relaxes the balance condition: the tree may grow taller, making
//! lookups slightly slower, but mutations trigger fewer rotations. This makes `G` a knob for
//! trading search performance against restructuring cost in write-heavy ordered indices.
//!
//! Nodes are heap allocated and exclusively owned by their parent, there are no parent pointers
//! and the crate contains no `unsafe` code.
//!
//! This crate is self-contained, fuzzed, and `no_std` (it requires `alloc`).
//!
//! ## when to use this
//!
//! - **want binary search** - AVL-G trees are *sorted* collections that are efficient to search.
//! - **edit a lot** - a larger `G` saves rotations on insert and remove when the workload is
//!   write-heavy and the occasional extra level during lookups is acceptable.
//! - **want to measure** - [`AVLGTree::satisfies_balance`] and [`AVLGTree::assert_valid`] make it
//!   easy to verify the structure in tests.
//!
//! ## when not to use this
//!
//! - **need duplicate keys** - every key must be unique, inserting a key twice is unsupported.
//! - **need ordered iteration or range queries** - the tree only exposes lookups, the root key and
//!   its height.
//!
//! ## features
//!
//! The following features are available:
//!
//! | Feature | Default | Explanation                                                                               |
//! |:--------|:--------|:------------------------------------------------------------------------------------------|
//! | `dot`   | `false` | Enables the `AVLGTree::dot` method, which allows display of the tree in [graphviz format] |
//!
//! [graphviz format]: https://graphviz.org/doc/info/lang.html

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[cfg(feature = "dot")]
mod dot;
mod error;
mod node;

use core::borrow::Borrow;
use core::cmp::{self, Ordering};
use core::fmt;

#[cfg(feature = "dot")]
pub use dot::Dot;
pub use error::{EmptyTree, InvalidImbalance};

use crate::node::{Link, height_of};

/// An AVL tree whose balance bound `G` is chosen at construction.
///
/// For every node the heights of its left and right subtrees differ by at most
/// [`max_imbalance`](Self::max_imbalance), and every key in the left subtree is less than the
/// node's key while every key in the right subtree is greater. Lookups, insertions and removals
/// complete in time proportional to the height of the tree, which is logarithmic in its size for
/// any fixed `G`.
///
/// # Example
///
/// ```rust
/// use avlgtree::AVLGTree;
///
/// let mut tree = AVLGTree::new(1).unwrap();
/// tree.extend(1..=7);
///
/// assert_eq!(tree.height(), 2);
/// assert_eq!(tree.root_key(), Ok(&4));
/// assert_eq!(tree.remove(&4), Ok(Some(4)));
/// assert_eq!(tree.search(&4), Ok(None));
/// ```
pub struct AVLGTree<K> {
    pub(crate) root: Link<K>,
    size: usize,
    max_imbalance: isize,
}

impl<K> Default for AVLGTree<K> {
    /// Creates an empty classic AVL tree (`G = 1`).
    fn default() -> Self {
        Self {
            root: None,
            size: 0,
            max_imbalance: 1,
        }
    }
}

impl<K> fmt::Debug for AVLGTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AVLGTree")
            .field("max_imbalance", &self.max_imbalance)
            .field("size", &self.size)
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl<K> AVLGTree<K> {
    /// Creates a new, empty tree allowing subtree heights to differ by at most `max_imbalance`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidImbalance`] if `max_imbalance` is smaller than 1.
    pub fn new(max_imbalance: isize) -> Result<Self, InvalidImbalance> {
        if max_imbalance < 1 {
            return Err(InvalidImbalance(max_imbalance));
        }

        tracing::debug!(max_imbalance, "creating AVL-G tree");

        Ok(Self {
            root: None,
            size: 0,
            max_imbalance,
        })
    }

    /// Returns the maximum imbalance `G` this tree was created with.
    pub fn max_imbalance(&self) -> isize {
        self.max_imbalance
    }

    /// Returns the number of keys in the tree.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree, the number of edges on the longest path from the root to a
    /// leaf.
    ///
    /// A tree with a single key has height 0, an empty tree has height -1.
    pub fn height(&self) -> isize {
        height_of(&self.root)
    }

    /// Returns the key stored at the root of the tree.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyTree`] if the tree contains no keys.
    pub fn root_key(&self) -> Result<&K, EmptyTree> {
        self.root
            .as_deref()
            .map(|root| &root.key)
            .ok_or(EmptyTree(()))
    }

    /// Removes all keys from the tree.
    pub fn clear(&mut self) {
        tracing::debug!(size = self.size, "clearing AVL-G tree");

        self.root = None;
        self.size = 0;
    }

    /// Returns a value that renders this tree in graphviz format through [`fmt::Display`].
    #[cfg(feature = "dot")]
    pub fn dot(&self) -> Dot<'_, K> {
        Dot { tree: self }
    }
}

impl<K> AVLGTree<K>
where
    K: Ord,
{
    /// Insert a new key into the tree.
    ///
    /// Keys must be unique: inserting a key that is already present is not supported and leaves
    /// the tree with an unspecified (but memory-safe) shape and size.
    pub fn insert(&mut self, key: K) {
        let (root, _) = node::insert(self.root.take(), key, self.max_imbalance);
        self.root = Some(root);
        self.size += 1;
    }

    /// Removes `key` from the tree, returning the stored key if it was part of the tree.
    ///
    /// The key may be any borrowed form of the tree's key type, but the ordering on the borrowed
    /// form *must* match the ordering on the key type.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyTree`] if the tree contains no keys. A key that is simply not part of a
    /// non-empty tree is reported as `Ok(None)`.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<Option<K>, EmptyTree>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let root = self.root.take().ok_or(EmptyTree(()))?;

        let (root, removed) = node::remove(root, key, self.max_imbalance);
        self.root = root;

        if removed.is_some() {
            self.size -= 1;
        }

        Ok(removed)
    }

    /// Searches the tree for `key`, returning a reference to the stored key if found.
    ///
    /// The key may be any borrowed form of the tree's key type, but the ordering on the borrowed
    /// form *must* match the ordering on the key type.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyTree`] if the tree contains no keys.
    pub fn search<Q>(&self, key: &Q) -> Result<Option<&K>, EmptyTree>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if self.root.is_none() {
            return Err(EmptyTree(()));
        }

        Ok(self.find_internal(key))
    }

    /// Returns `true` if the tree contains `key`. Unlike [`search`](Self::search) this never
    /// fails, an empty tree simply contains nothing.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_internal(key).is_some()
    }

    /// Returns `true` if every key in a node's left subtree is less than the node's key and every
    /// key in its right subtree is greater, for all nodes. An empty tree is trivially ordered.
    pub fn satisfies_ordering(&self) -> bool {
        Self::is_ordered(&self.root, None, None)
    }

    /// Returns `true` if the tree is ordered (see [`satisfies_ordering`](Self::satisfies_ordering))
    /// and no node's subtree heights differ by more than [`max_imbalance`](Self::max_imbalance).
    pub fn satisfies_balance(&self) -> bool {
        self.satisfies_ordering() && Self::is_balanced(&self.root, self.max_imbalance)
    }

    /// Asserts as many of the tree's invariants as possible.
    ///
    /// Beyond ordering and the balance bound, this also checks that every node's cached height
    /// matches the heights of its children and that [`size`](Self::size) matches the number of
    /// nodes.
    ///
    /// # Panics
    ///
    /// Panics if any invariant is violated.
    #[track_caller]
    pub fn assert_valid(&self) {
        let nodes = Self::assert_valid_inner(&self.root, None, None, self.max_imbalance);

        assert_eq!(
            nodes, self.size,
            "Size violation: tree holds {nodes} nodes, but size is {}",
            self.size
        );
    }

    #[track_caller]
    fn assert_valid_inner(
        link: &Link<K>,
        lower: Option<&K>,
        upper: Option<&K>,
        max_imbalance: isize,
    ) -> usize {
        let Some(node) = link else {
            return 0;
        };

        if let Some(lower) = lower {
            assert!(
                *lower < node.key,
                "Ordering violation: right subtree is not greater than its ancestor"
            );
        }
        if let Some(upper) = upper {
            assert!(
                node.key < *upper,
                "Ordering violation: left subtree is not less than its ancestor"
            );
        }

        let expected = 1 + cmp::max(height_of(&node.left), height_of(&node.right));
        assert_eq!(
            node.height, expected,
            "Height violation: cached height is {}, but children imply {expected}",
            node.height
        );

        let balance = node.balance();
        assert!(
            balance.abs() <= max_imbalance,
            "AVL-G balance violation: balance must be within ±{max_imbalance}, but was {balance}"
        );

        1 + Self::assert_valid_inner(&node.left, lower, Some(&node.key), max_imbalance)
            + Self::assert_valid_inner(&node.right, Some(&node.key), upper, max_imbalance)
    }

    fn is_ordered(link: &Link<K>, lower: Option<&K>, upper: Option<&K>) -> bool {
        let Some(node) = link else {
            return true;
        };

        lower.is_none_or(|lower| *lower < node.key)
            && upper.is_none_or(|upper| node.key < *upper)
            && Self::is_ordered(&node.left, lower, Some(&node.key))
            && Self::is_ordered(&node.right, Some(&node.key), upper)
    }

    fn is_balanced(link: &Link<K>, max_imbalance: isize) -> bool {
        link.as_deref().is_none_or(|node| {
            node.balance().abs() <= max_imbalance
                && Self::is_balanced(&node.left, max_imbalance)
                && Self::is_balanced(&node.right, max_imbalance)
        })
    }

    fn find_internal<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut tree = self.root.as_deref();
        while let Some(curr) = tree {
            match key.cmp(curr.key.borrow()) {
                Ordering::Equal => return Some(&curr.key),
                Ordering::Less => tree = curr.left.as_deref(),
                Ordering::Greater => tree = curr.right.as_deref(),
            }
        }

        None
    }
}

impl<K> Extend<K> for AVLGTree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}
