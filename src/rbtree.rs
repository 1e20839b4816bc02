//! An ordered set implemented with a red-black tree.
//!
//! Insertion and removal are both recursive and fix the tree up on the way
//! back to the root. Removal threads a "balanced" flag back through the
//! return values: while it is false, the subtree just returned is one black
//! node short on every path and its parent has to compensate.

use std::cmp::{self, Ordering};

use crate::set::OrderedSet;

/// An ordered set implemented with a red-black tree.
///
/// ```
/// use balanced_dict::RedBlackTree;
/// let mut tree = RedBlackTree::new();
/// for word in ["apple", "banana", "cherry"] {
///     tree.insert(word);
/// }
/// assert!(tree.contains(&"banana"));
/// assert!(tree.remove(&"banana"));
/// assert_eq!(tree.len(), 2);
/// ```
pub struct RedBlackTree<K> {
    root: Link<K>,
    num_nodes: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Color {
    Red,
    Black,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Dir {
    Left = 0,
    Right = 1,
}

struct Node<K> {
    key: K,
    color: Color,
    children: [Link<K>; 2],
}

type Link<K> = Option<Box<Node<K>>>;

/// An iterator over the keys of a red-black tree, in ascending order.
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl Dir {
    fn opposite(self) -> Self {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

impl Color {
    fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

impl<K: Ord> RedBlackTree<K> {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    /// Computed by a full traversal.
    pub fn height(&self) -> usize {
        Node::height_of(&self.root)
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns a reference to the stored key equal to the given key.
    pub fn get(&self, key: &K) -> Option<&K> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(&node.key),
                Ordering::Less => node.child(Dir::Left),
                Ordering::Greater => node.child(Dir::Right),
            };
        }
        None
    }

    /// Returns true if the tree contains the key.
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a key into the tree.
    /// Returns whether the key was newly inserted.
    pub fn insert(&mut self, key: K) -> bool {
        if self.contains(&key) {
            return false;
        }
        let mut root = Self::insert_node(self.root.take(), key);
        root.color = Color::Black;
        self.root = Some(root);
        self.num_nodes += 1;
        true
    }

    /// Removes a key from the tree.
    /// Returns whether the key was previously in the tree.
    pub fn remove(&mut self, key: &K) -> bool {
        if !self.contains(key) {
            return false;
        }
        debug_assert!(self.num_nodes >= 1);
        let (root, _) = Self::remove_node(self.root.take(), key);
        self.root = root;
        if let Some(root) = self.root.as_mut() {
            root.color = Color::Black;
        }
        self.num_nodes -= 1;
        debug_assert!(!self.contains(key));
        true
    }

    /// Gets an iterator over the keys of the tree, in sorted order.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        // Check root color
        if let Some(root) = self.root.as_ref() {
            assert_eq!(root.color, Color::Black);
        }

        let mut num_nodes = 0;
        Self::check_node(&self.root, None, None, &mut num_nodes);
        assert_eq!(num_nodes, self.num_nodes);
        assert_eq!(self.root.is_none(), self.num_nodes == 0);
    }

    // Returns the checked black height, counting the absent children.
    #[cfg(any(test, feature = "consistency_check"))]
    fn check_node(link: &Link<K>, lower: Option<&K>, upper: Option<&K>, count: &mut usize) -> usize {
        let node = match link {
            None => return 1,
            Some(node) => node,
        };

        if let Some(lower) = lower {
            assert!(node.key > *lower);
        }
        if let Some(upper) = upper {
            assert!(node.key < *upper);
        }

        // No red node has a red child
        if node.color == Color::Red {
            assert!(!Node::is_red(&node.children[0]));
            assert!(!Node::is_red(&node.children[1]));
        }

        let left_black_height = Self::check_node(&node.children[0], lower, Some(&node.key), count);
        let right_black_height = Self::check_node(&node.children[1], Some(&node.key), upper, count);
        assert_eq!(left_black_height, right_black_height);

        *count += 1;
        match node.color {
            Color::Red => left_black_height,
            Color::Black => left_black_height + 1,
        }
    }

    fn insert_node(link: Link<K>, key: K) -> Box<Node<K>> {
        let mut node = match link {
            None => return Node::red(key),
            Some(node) => node,
        };
        let dir = if key < node.key { Dir::Left } else { Dir::Right };
        let child = node.children[dir as usize].take();
        node.children[dir as usize] = Some(Self::insert_node(child, key));
        Self::insert_fix_up(node, dir)
    }

    /// Resolves a red-red violation in the child subtree on `dir`.
    fn insert_fix_up(mut node: Box<Node<K>>, dir: Dir) -> Box<Node<K>> {
        let (outer_red, inner_red) = match node.child(dir) {
            Some(child) if child.color == Color::Red => (
                Node::is_red(&child.children[dir as usize]),
                Node::is_red(&child.children[dir.opposite() as usize]),
            ),
            _ => return node,
        };

        if Node::is_red(&node.children[dir.opposite() as usize]) {
            // Both children red: push the violation one level up
            if outer_red || inner_red {
                node.flip_colors();
            }
            node
        } else if outer_red {
            Self::rotate(node, dir.opposite())
        } else if inner_red {
            Self::align_rotate(node, dir.opposite())
        } else {
            node
        }
    }

    /// Removes `key` from the subtree at `link`.
    /// Returns the new subtree root and whether its black height is intact.
    fn remove_node(link: Link<K>, key: &K) -> (Link<K>, bool) {
        let mut node = match link {
            None => return (None, true),
            Some(node) => node,
        };

        let dir = match key.cmp(&node.key) {
            Ordering::Less => Dir::Left,
            Ordering::Greater => Dir::Right,
            Ordering::Equal => match node.children[0].take() {
                Some(left) if node.children[1].is_some() => {
                    // Two children: take over the in-order predecessor
                    let (left, predecessor, balanced) = Self::remove_max(left);
                    node.key = predecessor;
                    node.children[0] = left;
                    return Self::fix_after_remove(node, Dir::Left, balanced);
                }
                left => {
                    let child = left.or_else(|| node.children[1].take());
                    return Self::splice(node.color, child);
                }
            },
        };

        let child = node.children[dir as usize].take();
        let (child, balanced) = Self::remove_node(child, key);
        node.children[dir as usize] = child;
        Self::fix_after_remove(node, dir, balanced)
    }

    /// Unlinks the largest node of a subtree.
    /// Returns the remainder, the removed key and whether the remainder's
    /// black height is intact.
    fn remove_max(mut node: Box<Node<K>>) -> (Link<K>, K, bool) {
        match node.children[1].take() {
            None => {
                let Node {
                    key,
                    color,
                    children: [left, _],
                } = *node;
                let (link, balanced) = Self::splice(color, left);
                (link, key, balanced)
            }
            Some(right) => {
                let (right, max, balanced) = Self::remove_max(right);
                node.children[1] = right;
                let (link, balanced) = Self::fix_after_remove(node, Dir::Right, balanced);
                (link, max, balanced)
            }
        }
    }

    /// Replaces a removed node of the given color by its only child.
    fn splice(color: Color, child: Link<K>) -> (Link<K>, bool) {
        match (color, child) {
            (Color::Red, child) => (child, true),
            (Color::Black, Some(mut child)) if child.color == Color::Red => {
                child.color = Color::Black;
                (Some(child), true)
            }
            (Color::Black, child) => (child, false),
        }
    }

    fn fix_after_remove(node: Box<Node<K>>, dir: Dir, balanced: bool) -> (Link<K>, bool) {
        if balanced {
            (Some(node), true)
        } else {
            let (node, balanced) = Self::remove_fix_up(node, dir);
            (Some(node), balanced)
        }
    }

    /// Compensates for the child subtree on `dir` being one black node short.
    /// Returns the new subtree root and whether the deficit was absorbed;
    /// if not, the whole subtree is now one black node short.
    fn remove_fix_up(mut node: Box<Node<K>>, dir: Dir) -> (Box<Node<K>>, bool) {
        let sibling_dir = dir.opposite();

        if Node::is_red(&node.children[sibling_dir as usize]) {
            // Red sibling: rotate it up, which leaves a black sibling below
            // a red parent, a case that always resolves.
            let mut top = Self::rotate(node, dir);
            if let Some(demoted) = top.children[dir as usize].take() {
                let (fixed, balanced) = Self::remove_fix_up(demoted, dir);
                debug_assert!(balanced);
                top.children[dir as usize] = Some(fixed);
            }
            return (top, true);
        }

        let (outer_red, inner_red) = match node.child(sibling_dir) {
            Some(sibling) => (
                Node::is_red(&sibling.children[sibling_dir as usize]),
                Node::is_red(&sibling.children[dir as usize]),
            ),
            None => return (node, false),
        };

        if !outer_red && !inner_red {
            // Black sibling with black children
            if let Some(sibling) = node.children[sibling_dir as usize].as_mut() {
                sibling.color = Color::Red;
            }
            if node.color == Color::Red {
                node.color = Color::Black;
                return (node, true);
            }
            return (node, false);
        }

        // Black sibling with a red child
        let color = node.color;
        let mut top = if outer_red {
            Self::rotate(node, dir)
        } else {
            Self::align_rotate(node, dir)
        };
        top.color = color;
        for child in top.children.iter_mut().flatten() {
            child.color = Color::Black;
        }
        (top, true)
    }

    /// Rotates towards `dir`, lifting the child on the opposite side.
    /// The lifted node takes over the old root's color and the old root turns red.
    fn rotate(mut node: Box<Node<K>>, dir: Dir) -> Box<Node<K>> {
        let lifted_dir = dir.opposite();
        match node.children[lifted_dir as usize].take() {
            Some(mut lifted) => {
                node.children[lifted_dir as usize] = lifted.children[dir as usize].take();
                lifted.color = node.color;
                node.color = Color::Red;
                lifted.children[dir as usize] = Some(node);
                lifted
            }
            None => node,
        }
    }

    /// Double rotation: straightens the inner grandchild on the side opposite
    /// to `dir`, then rotates towards `dir`.
    fn align_rotate(mut node: Box<Node<K>>, dir: Dir) -> Box<Node<K>> {
        let lifted_dir = dir.opposite();
        node.children[lifted_dir as usize] = node.children[lifted_dir as usize]
            .take()
            .map(|child| Self::rotate(child, lifted_dir));
        Self::rotate(node, dir)
    }
}

impl<K> Node<K> {
    fn red(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            color: Color::Red,
            children: [None, None],
        })
    }

    fn child(&self, dir: Dir) -> Option<&Node<K>> {
        self.children[dir as usize].as_deref()
    }

    // Absent children count as black.
    fn is_red(link: &Link<K>) -> bool {
        matches!(link, Some(node) if node.color == Color::Red)
    }

    fn flip_colors(&mut self) {
        self.color = self.color.flipped();
        for child in self.children.iter_mut().flatten() {
            child.color = child.color.flipped();
        }
    }

    fn height_of(link: &Link<K>) -> usize {
        match link {
            None => 0,
            Some(node) => {
                1 + cmp::max(
                    Self::height_of(&node.children[0]),
                    Self::height_of(&node.children[1]),
                )
            }
        }
    }
}

impl<'a, K> Iter<'a, K> {
    fn push_left_spine(&mut self, mut current: Option<&'a Node<K>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.child(Dir::Left);
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.child(Dir::Right));
        Some(&node.key)
    }
}

impl<'a, K: Ord> IntoIterator for &'a RedBlackTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord> Default for RedBlackTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for RedBlackTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for RedBlackTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> OrderedSet<K> for RedBlackTree<K> {
    fn insert(&mut self, key: K) -> bool {
        RedBlackTree::insert(self, key)
    }

    fn delete(&mut self, key: &K) -> bool {
        self.remove(key)
    }

    fn search(&self, key: &K) -> bool {
        self.contains(key)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn height(&self) -> usize {
        RedBlackTree::height(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, RedBlackTree};

    fn root_key<K: Copy + Ord>(tree: &RedBlackTree<K>) -> Option<K> {
        tree.root.as_ref().map(|root| root.key)
    }

    fn color_of<K: Ord>(tree: &RedBlackTree<K>, key: &K) -> Option<Color> {
        let mut current = tree.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                std::cmp::Ordering::Equal => return Some(node.color),
                std::cmp::Ordering::Less => node.children[0].as_deref(),
                std::cmp::Ordering::Greater => node.children[1].as_deref(),
            };
        }
        None
    }

    #[test]
    fn test_ascending_insert_rotates() {
        let mut tree = RedBlackTree::new();
        tree.insert(10);
        tree.insert(20);
        tree.insert(30);
        tree.check_consistency();
        assert_eq!(root_key(&tree), Some(20));
        assert_eq!(color_of(&tree, &20), Some(Color::Black));
        assert_eq!(color_of(&tree, &10), Some(Color::Red));
        assert_eq!(color_of(&tree, &30), Some(Color::Red));
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_inner_grandchild_double_rotation() {
        // 30 -> 10 -> 20 makes 20 the inner grandchild of 30
        let mut tree = RedBlackTree::new();
        tree.insert(30);
        tree.insert(10);
        tree.insert(20);
        tree.check_consistency();
        assert_eq!(root_key(&tree), Some(20));
    }

    #[test]
    fn test_color_flip_keeps_root_black() {
        let mut tree = RedBlackTree::new();
        for key in [20, 10, 30, 5] {
            tree.insert(key);
            tree.check_consistency();
        }
        // Both children of the root were red before 5 arrived
        assert_eq!(color_of(&tree, &20), Some(Color::Black));
        assert_eq!(color_of(&tree, &10), Some(Color::Black));
        assert_eq!(color_of(&tree, &30), Some(Color::Black));
        assert_eq!(color_of(&tree, &5), Some(Color::Red));
    }

    #[test]
    fn test_remove_root_of_three() {
        let mut tree: RedBlackTree<i32> = [20, 10, 30].into_iter().collect();
        assert!(tree.remove(&20));
        tree.check_consistency();
        assert_eq!(tree.len(), 2);
        assert!(tree.contains(&10));
        assert!(tree.contains(&30));
        assert!(!tree.contains(&20));
    }

    #[test]
    fn test_remove_black_leaf_with_red_sibling() {
        // Ascending inserts leave a red interior node on the right spine
        let mut tree: RedBlackTree<i32> = (1..=6).collect();
        tree.check_consistency();
        for key in [1, 2, 3] {
            assert!(tree.remove(&key));
            tree.check_consistency();
        }
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![4, 5, 6]);
    }

    #[test]
    fn test_remove_every_key_from_both_ends() {
        let mut tree: RedBlackTree<i32> = (0..64).collect();
        for low in 0..32 {
            assert!(tree.remove(&low));
            tree.check_consistency();
            assert!(tree.remove(&(63 - low)));
            tree.check_consistency();
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
    }
}
