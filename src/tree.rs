//! Arena-backed binary tree skeleton.
//!
//! Nodes live in a single `Vec` and refer to each other by index, so there
//! are no raw pointers and nothing to free by hand. Each node owns at most two
//! children and remembers its parent and which side of the parent it hangs
//! from.
//!
//! Traversals use an explicit stack instead of recursion. The inline capacity
//! covers any balanced tree over a `usize`-indexed sequence without spilling
//! to the heap.

use smallvec::SmallVec;

/// Index into the node arena.
pub type NodeIdx = usize;

/// Inline capacity of traversal stacks.
const STACK_INLINE: usize = 64;

type Stack<T> = SmallVec<[T; STACK_INLINE]>;

/// Where a node hangs relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
    /// Not (yet) attached to a parent.
    Root,
}

#[derive(Clone, Debug)]
struct Node<V> {
    value: V,
    side: Side,
    parent: Option<NodeIdx>,
    left: Option<NodeIdx>,
    right: Option<NodeIdx>,
}

/// A binary tree whose nodes are stored in an arena.
///
/// Nodes are only ever appended. Children must exist before the parent that
/// links them, which is exactly the order a bottom-up build produces.
#[derive(Clone, Debug)]
pub struct BinaryTree<V> {
    nodes: Vec<Node<V>>,
    root: Option<NodeIdx>,
}

impl<V> BinaryTree<V> {
    pub fn new() -> Self {
        BinaryTree { nodes: Vec::new(), root: None }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        BinaryTree { nodes: Vec::with_capacity(capacity), root: None }
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeIdx> {
        self.root
    }

    /// Make `node` the root. It must not already have a parent.
    pub fn set_root(&mut self, node: NodeIdx) {
        debug_assert!(self.nodes[node].parent.is_none(), "root cannot have a parent");
        self.nodes[node].side = Side::Root;
        self.root = Some(node);
    }

    /// Append a childless node.
    pub fn push_leaf(&mut self, value: V) -> NodeIdx {
        self.push(value, None, None)
    }

    /// Append a node and adopt the given children.
    ///
    /// Children must be unattached; they become the left and right child of
    /// the new node respectively.
    pub fn push(&mut self, value: V, left: Option<NodeIdx>, right: Option<NodeIdx>) -> NodeIdx {
        let idx = self.nodes.len();
        self.nodes.push(Node { value, side: Side::Root, parent: None, left, right });
        if let Some(child) = left {
            self.attach(child, idx, Side::Left);
        }
        if let Some(child) = right {
            self.attach(child, idx, Side::Right);
        }
        idx
    }

    fn attach(&mut self, child: NodeIdx, parent: NodeIdx, side: Side) {
        let node = &mut self.nodes[child];
        debug_assert!(node.parent.is_none(), "node {} already has a parent", child);
        node.parent = Some(parent);
        node.side = side;
    }

    pub fn value(&self, node: NodeIdx) -> &V {
        &self.nodes[node].value
    }

    pub fn value_mut(&mut self, node: NodeIdx) -> &mut V {
        &mut self.nodes[node].value
    }

    pub fn children(&self, node: NodeIdx) -> (Option<NodeIdx>, Option<NodeIdx>) {
        let n = &self.nodes[node];
        (n.left, n.right)
    }

    pub fn left(&self, node: NodeIdx) -> Option<NodeIdx> {
        self.nodes[node].left
    }

    pub fn right(&self, node: NodeIdx) -> Option<NodeIdx> {
        self.nodes[node].right
    }

    pub fn parent(&self, node: NodeIdx) -> Option<NodeIdx> {
        self.nodes[node].parent
    }

    pub fn side(&self, node: NodeIdx) -> Side {
        self.nodes[node].side
    }

    pub fn is_leaf(&self, node: NodeIdx) -> bool {
        let n = &self.nodes[node];
        n.left.is_none() && n.right.is_none()
    }

    /// The other child of this node's parent, if any.
    pub fn sibling(&self, node: NodeIdx) -> Option<NodeIdx> {
        let parent = self.nodes[node].parent?;
        match self.nodes[node].side {
            Side::Left => self.nodes[parent].right,
            Side::Right => self.nodes[parent].left,
            Side::Root => None,
        }
    }

    /// Number of edges between `node` and the top of its tree.
    pub fn depth(&self, node: NodeIdx) -> usize {
        let mut depth = 0;
        let mut current = node;
        while let Some(parent) = self.nodes[current].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Height of the whole tree, counted in nodes: empty is 0, a lone root is 1.
    pub fn height(&self) -> usize {
        self.root.map_or(0, |root| self.height_of(root))
    }

    /// Height of the subtree rooted at `node`, counted in nodes.
    pub fn height_of(&self, node: NodeIdx) -> usize {
        let mut height = 0;
        let mut stack: Stack<(NodeIdx, usize)> = SmallVec::new();
        stack.push((node, 1));
        while let Some((idx, level)) = stack.pop() {
            height = height.max(level);
            let n = &self.nodes[idx];
            if let Some(right) = n.right {
                stack.push((right, level + 1));
            }
            if let Some(left) = n.left {
                stack.push((left, level + 1));
            }
        }
        height
    }

    /// Node, then left subtree, then right subtree.
    pub fn preorder(&self) -> Preorder<'_, V> {
        let mut stack = Stack::new();
        stack.extend(self.root);
        Preorder { tree: self, stack }
    }

    /// Left subtree, then node, then right subtree.
    pub fn inorder(&self) -> Inorder<'_, V> {
        Inorder { tree: self, stack: Stack::new(), current: self.root }
    }

    /// Left subtree, then right subtree, then node.
    pub fn postorder(&self) -> Postorder<'_, V> {
        let mut stack = Stack::new();
        stack.extend(self.root.map(|root| (root, false)));
        Postorder { tree: self, stack }
    }

    /// Leaves from left to right.
    pub fn leaves(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.inorder().filter(move |&idx| self.is_leaf(idx))
    }
}

impl<V> Default for BinaryTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Preorder<'a, V> {
    tree: &'a BinaryTree<V>,
    stack: Stack<NodeIdx>,
}

impl<V> Iterator for Preorder<'_, V> {
    type Item = NodeIdx;

    fn next(&mut self) -> Option<NodeIdx> {
        let idx = self.stack.pop()?;
        let (left, right) = self.tree.children(idx);
        self.stack.extend(right);
        self.stack.extend(left);
        Some(idx)
    }
}

pub struct Inorder<'a, V> {
    tree: &'a BinaryTree<V>,
    stack: Stack<NodeIdx>,
    current: Option<NodeIdx>,
}

impl<V> Iterator for Inorder<'_, V> {
    type Item = NodeIdx;

    fn next(&mut self) -> Option<NodeIdx> {
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = self.tree.left(idx);
        }
        let idx = self.stack.pop()?;
        self.current = self.tree.right(idx);
        Some(idx)
    }
}

pub struct Postorder<'a, V> {
    tree: &'a BinaryTree<V>,
    /// `(node, children_done)`
    stack: Stack<(NodeIdx, bool)>,
}

impl<V> Iterator for Postorder<'_, V> {
    type Item = NodeIdx;

    fn next(&mut self) -> Option<NodeIdx> {
        while let Some((idx, done)) = self.stack.pop() {
            if done {
                return Some(idx);
            }
            self.stack.push((idx, true));
            let (left, right) = self.tree.children(idx);
            self.stack.extend(right.map(|r| (r, false)));
            self.stack.extend(left.map(|l| (l, false)));
        }
        None
    }
}
