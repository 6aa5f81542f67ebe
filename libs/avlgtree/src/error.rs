use core::fmt;

/// Error returned by [`AVLGTree::new`](crate::AVLGTree::new) when the requested maximum
/// imbalance is smaller than 1.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct InvalidImbalance(pub(crate) isize);

impl InvalidImbalance {
    /// Returns the rejected maximum imbalance.
    #[must_use]
    pub fn requested(self) -> isize {
        self.0
    }
}

impl fmt::Display for InvalidImbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "maximum imbalance must be at least 1, but was {}", self.0)
    }
}

impl core::error::Error for InvalidImbalance {}

/// Error returned by queries that need at least one key in the tree.
///
/// This is distinct from a lookup that simply finds nothing, which is reported as `Ok(None)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EmptyTree(pub(crate) ());

impl fmt::Display for EmptyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("tree is empty")
    }
}

impl core::error::Error for EmptyTree {}
