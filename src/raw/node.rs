use super::handle::{Handle, Size};

/// Color of the link from a node's parent to the node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub(crate) const fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// A red-black tree node holding one entry.
///
/// `size` counts the entries in the subtree rooted here, including this one.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) color: Color,
    pub(crate) size: Size,
}

impl<K, V> Node<K, V> {
    /// Creates a detached red leaf, the shape every insertion starts from.
    pub(crate) const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            color: Color::Red,
            size: Size::ONE,
        }
    }

    #[inline]
    pub(crate) const fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_a_red_leaf_of_size_one() {
        let node = Node::new("k", 1);
        assert!(node.is_red());
        assert!(node.left.is_none() && node.right.is_none());
        assert_eq!(node.size, Size::ONE);
    }

    #[test]
    fn flipping_twice_restores_color() {
        assert_eq!(Color::Red.flipped(), Color::Black);
        assert_eq!(Color::Black.flipped().flipped(), Color::Black);
    }
}
