use alloc::boxed::Box;
use core::borrow::Borrow;
use core::cmp::{self, Ordering};
use core::{fmt, mem};

pub(crate) type Link<K> = Option<Box<Node<K>>>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

impl Side {
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A single entry of an [`AVLGTree`](crate::AVLGTree).
///
/// Nodes exclusively own their children, there are no parent pointers. `height` is a cache of
/// `1 + max(height(left), height(right))` and must be refreshed through [`Node::update_height`]
/// whenever a child link changes.
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
    pub(crate) height: isize,
}

/// Height of a possibly absent subtree, where a missing subtree has height -1.
#[inline]
pub(crate) fn height_of<K>(link: &Link<K>) -> isize {
    link.as_ref().map_or(-1, |node| node.height)
}

impl<K> Node<K> {
    pub(crate) fn new(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
            height: 0,
        })
    }

    /// `height(left) - height(right)`.
    #[inline]
    pub(crate) fn balance(&self) -> isize {
        height_of(&self.left) - height_of(&self.right)
    }

    #[inline]
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + cmp::max(height_of(&self.left), height_of(&self.right));
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> &Link<K> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    #[inline]
    fn child_mut(&mut self, side: Side) -> &mut Link<K> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Returns the side whose subtree is taller than the other by more than `max_imbalance`.
    fn heavy_side(&self, max_imbalance: isize) -> Option<Side> {
        let balance = self.balance();
        if balance > max_imbalance {
            Some(Side::Left)
        } else if balance < -max_imbalance {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Whether this node is level or taller towards `side`.
    fn leans_towards(&self, side: Side) -> bool {
        match side {
            Side::Left => self.balance() >= 0,
            Side::Right => self.balance() <= 0,
        }
    }
}

/// Rotates `node` down towards `side`, promoting its child on the opposite side into its place.
///
/// `rotate(node, Side::Left)` is the classic left rotation (the right child moves up), and
/// `rotate(node, Side::Right)` its mirror image.
///
/// The promoted child's inner subtree (the one on `side`) is handed over to `node`. Heights are
/// recomputed for `node` first, then for the promoted child. The returned box is the new root of
/// this subtree and must be linked in by the caller.
///
/// # Panics
///
/// Panics if `node` has no child on the opposite side of `side`.
pub(crate) fn rotate<K>(mut node: Box<Node<K>>, side: Side) -> Box<Node<K>> {
    let mut pivot = node
        .child_mut(side.opposite())
        .take()
        .expect("rotation requires a child to promote");

    *node.child_mut(side.opposite()) = pivot.child_mut(side).take();
    node.update_height();

    *pivot.child_mut(side) = Some(node);
    pivot.update_height();

    pivot
}

/// Zig-zag repair of a node that is too tall on `heavy`: first rotate the heavy child towards
/// `heavy`, then rotate `node` away from it.
fn rotate_double<K>(mut node: Box<Node<K>>, heavy: Side) -> Box<Node<K>> {
    let child = node
        .child_mut(heavy)
        .take()
        .expect("heavy side must hold a child");
    *node.child_mut(heavy) = Some(rotate(child, heavy));

    rotate(node, heavy.opposite())
}

/// Inserts `key` into the subtree at `link` and returns the new subtree root together with the
/// side the key descended to at that root (`None` if the root is the freshly created leaf).
pub(crate) fn insert<K: Ord>(
    link: Link<K>,
    key: K,
    max_imbalance: isize,
) -> (Box<Node<K>>, Option<Side>) {
    let Some(mut node) = link else {
        return (Node::new(key), None);
    };

    // equal keys go right, duplicates are not supported anyway
    let side = if key < node.key {
        Side::Left
    } else {
        Side::Right
    };

    let (child, landed) = insert(node.child_mut(side).take(), key, max_imbalance);
    *node.child_mut(side) = Some(child);
    node.update_height();

    (rebalance_after_insert(node, landed, max_imbalance), Some(side))
}

/// `landed` is the side the inserted key took below the child on the side we descended to.
fn rebalance_after_insert<K>(
    node: Box<Node<K>>,
    landed: Option<Side>,
    max_imbalance: isize,
) -> Box<Node<K>> {
    let Some(heavy) = node.heavy_side(max_imbalance) else {
        return node;
    };

    // A fresh leaf never tips its parent over a bound of at least 1, so the heavy child
    // always has a side recorded.
    let landed = landed.expect("imbalanced after insert without passing through the heavy child");

    if landed == heavy {
        tracing::trace!(
            balance = node.balance(),
            %heavy,
            "insert: single rotation"
        );
        rotate(node, heavy.opposite())
    } else {
        tracing::trace!(
            balance = node.balance(),
            %heavy,
            "insert: double rotation"
        );
        rotate_double(node, heavy)
    }
}

/// Removes the entry matching `key` from the subtree rooted at `node`.
///
/// Returns the new subtree root and the removed key, which is `None` if no entry matched.
pub(crate) fn remove<K, Q>(
    mut node: Box<Node<K>>,
    key: &Q,
    max_imbalance: isize,
) -> (Link<K>, Option<K>)
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let removed = match key.cmp(node.key.borrow()) {
        ordering @ (Ordering::Less | Ordering::Greater) => {
            let side = if ordering == Ordering::Less {
                Side::Left
            } else {
                Side::Right
            };

            let Some(child) = node.child_mut(side).take() else {
                return (Some(node), None);
            };

            let (child, removed) = remove(child, key, max_imbalance);
            *node.child_mut(side) = child;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (Some(left), Some(right)) => {
                // splice the in-order successor's key into this node
                let (right, successor) = remove_min(right, max_imbalance);
                node.left = Some(left);
                node.right = right;

                Some(mem::replace(&mut node.key, successor))
            }
            (child, None) | (None, child) => {
                let Node { key, .. } = *node;
                return (child, Some(key));
            }
        },
    };

    node.update_height();
    (Some(rebalance_after_remove(node, max_imbalance)), removed)
}

/// Unlinks the leftmost node of the subtree, returning the remaining subtree and its key.
fn remove_min<K>(mut node: Box<Node<K>>, max_imbalance: isize) -> (Link<K>, K) {
    let Some(left) = node.left.take() else {
        let Node { key, right, .. } = *node;
        return (right, key);
    };

    let (left, min) = remove_min(left, max_imbalance);
    node.left = left;
    node.update_height();

    (Some(rebalance_after_remove(node, max_imbalance)), min)
}

fn rebalance_after_remove<K>(node: Box<Node<K>>, max_imbalance: isize) -> Box<Node<K>> {
    let Some(heavy) = node.heavy_side(max_imbalance) else {
        return node;
    };

    let child = node
        .child(heavy)
        .as_deref()
        .expect("heavy side must hold a child");

    if child.leans_towards(heavy) {
        tracing::trace!(
            balance = node.balance(),
            child_balance = child.balance(),
            %heavy,
            "remove: single rotation"
        );
        rotate(node, heavy.opposite())
    } else {
        tracing::trace!(
            balance = node.balance(),
            child_balance = child.balance(),
            %heavy,
            "remove: double rotation"
        );
        rotate_double(node, heavy)
    }
}
