//! Red-black tree primitives over nodes stored in a `Fastbin`.
//!
//! Links are slot indices. The functions only rewire links and colours; they
//! never move payloads between slots, so a node keeps its index for as long
//! as it lives.

use crate::fastbin::{Fastbin, SlotIdx};

pub type Link = Option<SlotIdx>;

pub trait RBNodeBase {
    fn left(&self) -> Link;
    fn right(&self) -> Link;
    fn parent(&self) -> Link;
    fn is_red(&self) -> bool;
    fn set_left(&mut self, left: Link);
    fn set_right(&mut self, right: Link);
    fn set_parent(&mut self, parent: Link);
    fn set_red(&mut self, red: bool);

    #[inline]
    fn reset_tree_links(&mut self) {
        self.set_left(None);
        self.set_right(None);
        self.set_parent(None);
        self.set_red(false);
    }
}

/// Nil links are black.
#[inline]
fn is_red<N: RBNodeBase>(nodes: &Fastbin<N>, link: Link) -> bool {
    link.map_or(false, |idx| nodes[idx].is_red())
}

#[inline]
fn set_black<N: RBNodeBase>(nodes: &mut Fastbin<N>, link: Link) {
    if let Some(idx) = link {
        nodes[idx].set_red(false);
    }
}

#[inline]
fn child_replace<N: RBNodeBase>(
    nodes: &mut Fastbin<N>,
    old_node: SlotIdx,
    new_node: Link,
    parent: Link,
    root: &mut Link,
) {
    match parent {
        None => *root = new_node,
        Some(p) => {
            if nodes[p].left() == Some(old_node) {
                nodes[p].set_left(new_node);
            } else {
                nodes[p].set_right(new_node);
            }
        }
    }
}

fn rotate_left<N: RBNodeBase>(nodes: &mut Fastbin<N>, node: SlotIdx, root: &mut Link) {
    let right = match nodes[node].right() {
        Some(right) => right,
        None => return,
    };
    let parent = nodes[node].parent();
    let inner = nodes[right].left();
    nodes[node].set_right(inner);
    if let Some(inner) = inner {
        nodes[inner].set_parent(Some(node));
    }
    nodes[right].set_left(Some(node));
    nodes[right].set_parent(parent);
    child_replace(nodes, node, Some(right), parent, root);
    nodes[node].set_parent(Some(right));
}

fn rotate_right<N: RBNodeBase>(nodes: &mut Fastbin<N>, node: SlotIdx, root: &mut Link) {
    let left = match nodes[node].left() {
        Some(left) => left,
        None => return,
    };
    let parent = nodes[node].parent();
    let inner = nodes[left].right();
    nodes[node].set_left(inner);
    if let Some(inner) = inner {
        nodes[inner].set_parent(Some(node));
    }
    nodes[left].set_right(Some(node));
    nodes[left].set_parent(parent);
    child_replace(nodes, node, Some(left), parent, root);
    nodes[node].set_parent(Some(left));
}

/// Hangs `new_node` under `parent` (or makes it the root) as a red leaf.
#[inline]
pub fn link_node<N: RBNodeBase>(
    nodes: &mut Fastbin<N>,
    new_node: SlotIdx,
    parent: Link,
    as_left: bool,
    root: &mut Link,
) {
    nodes[new_node].reset_tree_links();
    nodes[new_node].set_parent(parent);
    nodes[new_node].set_red(true);
    match parent {
        None => *root = Some(new_node),
        Some(p) if as_left => nodes[p].set_left(Some(new_node)),
        Some(p) => nodes[p].set_right(Some(new_node)),
    }
}

/// Restores the colour invariants after `link_node`.
pub fn node_post_insert<N: RBNodeBase>(nodes: &mut Fastbin<N>, mut node: SlotIdx, root: &mut Link) {
    loop {
        let mut parent = match nodes[node].parent() {
            Some(parent) if nodes[parent].is_red() => parent,
            _ => break,
        };
        // a red node is never the root
        let grand = match nodes[parent].parent() {
            Some(grand) => grand,
            None => break,
        };
        if nodes[grand].left() == Some(parent) {
            let uncle = nodes[grand].right();
            if is_red(nodes, uncle) {
                set_black(nodes, uncle);
                nodes[parent].set_red(false);
                nodes[grand].set_red(true);
                node = grand;
                continue;
            }
            if nodes[parent].right() == Some(node) {
                rotate_left(nodes, parent, root);
                std::mem::swap(&mut node, &mut parent);
            }
            nodes[parent].set_red(false);
            nodes[grand].set_red(true);
            rotate_right(nodes, grand, root);
        } else {
            let uncle = nodes[grand].left();
            if is_red(nodes, uncle) {
                set_black(nodes, uncle);
                nodes[parent].set_red(false);
                nodes[grand].set_red(true);
                node = grand;
                continue;
            }
            if nodes[parent].left() == Some(node) {
                rotate_right(nodes, parent, root);
                std::mem::swap(&mut node, &mut parent);
            }
            nodes[parent].set_red(false);
            nodes[grand].set_red(true);
            rotate_left(nodes, grand, root);
        }
    }
    set_black(nodes, *root);
}

/// Replaces the subtree at `old_node` by `new_node`.
#[inline]
fn transplant<N: RBNodeBase>(
    nodes: &mut Fastbin<N>,
    old_node: SlotIdx,
    new_node: Link,
    root: &mut Link,
) {
    let parent = nodes[old_node].parent();
    child_replace(nodes, old_node, new_node, parent, root);
    if let Some(new_node) = new_node {
        nodes[new_node].set_parent(parent);
    }
}

#[inline]
fn first_node<N: RBNodeBase>(nodes: &Fastbin<N>, mut node: SlotIdx) -> SlotIdx {
    while let Some(left) = nodes[node].left() {
        node = left;
    }
    node
}

/// Unlinks `node` from the tree. The node's own links are cleared.
pub fn erase_node<N: RBNodeBase>(nodes: &mut Fastbin<N>, node: SlotIdx, root: &mut Link) {
    let removed_red;
    let child;
    let child_parent;
    match (nodes[node].left(), nodes[node].right()) {
        (None, right) => {
            removed_red = nodes[node].is_red();
            child = right;
            child_parent = nodes[node].parent();
            transplant(nodes, node, right, root);
        }
        (left, None) => {
            removed_red = nodes[node].is_red();
            child = left;
            child_parent = nodes[node].parent();
            transplant(nodes, node, left, root);
        }
        (Some(left), Some(right)) => {
            let successor = first_node(nodes, right);
            removed_red = nodes[successor].is_red();
            child = nodes[successor].right();
            if nodes[successor].parent() == Some(node) {
                child_parent = Some(successor);
            } else {
                child_parent = nodes[successor].parent();
                transplant(nodes, successor, child, root);
                nodes[successor].set_right(Some(right));
                nodes[right].set_parent(Some(successor));
            }
            transplant(nodes, node, Some(successor), root);
            nodes[successor].set_left(Some(left));
            nodes[left].set_parent(Some(successor));
            let red = nodes[node].is_red();
            nodes[successor].set_red(red);
        }
    }
    if !removed_red {
        erase_fixup(nodes, child, child_parent, root);
    }
    nodes[node].reset_tree_links();
}

fn erase_fixup<N: RBNodeBase>(
    nodes: &mut Fastbin<N>,
    mut node: Link,
    mut parent: Link,
    root: &mut Link,
) {
    while node != *root && !is_red(nodes, node) {
        let p = match parent {
            Some(p) => p,
            None => break,
        };
        if nodes[p].left() == node {
            let mut sibling = match nodes[p].right() {
                Some(s) => s,
                None => break,
            };
            if nodes[sibling].is_red() {
                nodes[sibling].set_red(false);
                nodes[p].set_red(true);
                rotate_left(nodes, p, root);
                sibling = match nodes[p].right() {
                    Some(s) => s,
                    None => break,
                };
            }
            let (near, far) = (nodes[sibling].left(), nodes[sibling].right());
            if !is_red(nodes, near) && !is_red(nodes, far) {
                nodes[sibling].set_red(true);
                node = Some(p);
                parent = nodes[p].parent();
            } else {
                if !is_red(nodes, far) {
                    set_black(nodes, near);
                    nodes[sibling].set_red(true);
                    rotate_right(nodes, sibling, root);
                    sibling = match nodes[p].right() {
                        Some(s) => s,
                        None => break,
                    };
                }
                let red = nodes[p].is_red();
                nodes[sibling].set_red(red);
                nodes[p].set_red(false);
                let far = nodes[sibling].right();
                set_black(nodes, far);
                rotate_left(nodes, p, root);
                node = *root;
                break;
            }
        } else {
            let mut sibling = match nodes[p].left() {
                Some(s) => s,
                None => break,
            };
            if nodes[sibling].is_red() {
                nodes[sibling].set_red(false);
                nodes[p].set_red(true);
                rotate_right(nodes, p, root);
                sibling = match nodes[p].left() {
                    Some(s) => s,
                    None => break,
                };
            }
            let (near, far) = (nodes[sibling].right(), nodes[sibling].left());
            if !is_red(nodes, near) && !is_red(nodes, far) {
                nodes[sibling].set_red(true);
                node = Some(p);
                parent = nodes[p].parent();
            } else {
                if !is_red(nodes, far) {
                    set_black(nodes, near);
                    nodes[sibling].set_red(true);
                    rotate_left(nodes, sibling, root);
                    sibling = match nodes[p].left() {
                        Some(s) => s,
                        None => break,
                    };
                }
                let red = nodes[p].is_red();
                nodes[sibling].set_red(red);
                nodes[p].set_red(false);
                let far = nodes[sibling].left();
                set_black(nodes, far);
                rotate_right(nodes, p, root);
                node = *root;
                break;
            }
        }
    }
    set_black(nodes, node);
}

#[cfg(test)]
/// Black height of the subtree, or `None` when a red-black or parent-link
/// invariant is broken.
pub fn check_valid<N: RBNodeBase>(nodes: &Fastbin<N>, link: Link, parent: Link) -> Option<usize> {
    let idx = match link {
        None => return Some(1),
        Some(idx) => idx,
    };
    let node = &nodes[idx];
    if node.parent() != parent {
        return None;
    }
    if node.is_red() && (is_red(nodes, node.left()) || is_red(nodes, node.right())) {
        return None;
    }
    let lh = check_valid(nodes, node.left(), link)?;
    let rh = check_valid(nodes, node.right(), link)?;
    if lh != rh {
        return None;
    }
    Some(lh + if node.is_red() { 0 } else { 1 })
}

#[cfg(test)]
pub fn get_node_num<N: RBNodeBase>(nodes: &Fastbin<N>, link: Link) -> usize {
    match link {
        None => 0,
        Some(idx) => {
            get_node_num(nodes, nodes[idx].left()) + get_node_num(nodes, nodes[idx].right()) + 1
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::thread_rng;

    struct TestNode {
        key: i32,
        left: Link,
        right: Link,
        parent: Link,
        red: bool,
    }

    impl RBNodeBase for TestNode {
        fn left(&self) -> Link {
            self.left
        }
        fn right(&self) -> Link {
            self.right
        }
        fn parent(&self) -> Link {
            self.parent
        }
        fn is_red(&self) -> bool {
            self.red
        }
        fn set_left(&mut self, left: Link) {
            self.left = left;
        }
        fn set_right(&mut self, right: Link) {
            self.right = right;
        }
        fn set_parent(&mut self, parent: Link) {
            self.parent = parent;
        }
        fn set_red(&mut self, red: bool) {
            self.red = red;
        }
    }

    fn insert(nodes: &mut Fastbin<TestNode>, root: &mut Link, key: i32) -> SlotIdx {
        let idx = nodes.alloc(TestNode {
            key,
            left: None,
            right: None,
            parent: None,
            red: false,
        });
        let mut parent = None;
        let mut as_left = false;
        let mut cur = *root;
        while let Some(c) = cur {
            parent = Some(c);
            as_left = key < nodes[c].key;
            cur = if as_left { nodes[c].left } else { nodes[c].right };
        }
        link_node(nodes, idx, parent, as_left, root);
        node_post_insert(nodes, idx, root);
        idx
    }

    fn in_order(nodes: &Fastbin<TestNode>, link: Link, out: &mut Vec<i32>) {
        if let Some(idx) = link {
            in_order(nodes, nodes[idx].left, out);
            out.push(nodes[idx].key);
            in_order(nodes, nodes[idx].right, out);
        }
    }

    #[test]
    fn test_rb_insert_erase() {
        let mut keys: Vec<i32> = (0..500).collect();
        keys.shuffle(&mut thread_rng());
        let mut nodes = Fastbin::new();
        let mut root = None;
        let mut slots = Vec::new();
        for &k in &keys {
            slots.push((k, insert(&mut nodes, &mut root, k)));
            assert!(check_valid(&nodes, root, None).is_some());
        }
        assert_eq!(get_node_num(&nodes, root), 500);
        let mut out = Vec::new();
        in_order(&nodes, root, &mut out);
        assert_eq!(out, (0..500).collect::<Vec<_>>());

        slots.shuffle(&mut thread_rng());
        for (i, &(k, idx)) in slots.iter().enumerate() {
            erase_node(&mut nodes, idx, &mut root);
            assert_eq!(nodes.del(idx).key, k);
            assert!(check_valid(&nodes, root, None).is_some());
            assert_eq!(get_node_num(&nodes, root), 500 - i - 1);
        }
        assert!(root.is_none());
    }

    #[test]
    fn test_rb_sequential() {
        let mut nodes = Fastbin::new();
        let mut root = None;
        for k in 0..64 {
            insert(&mut nodes, &mut root, k);
        }
        // 64 ascending inserts stay within 2*log2(65) levels
        fn depth(nodes: &Fastbin<TestNode>, link: Link) -> usize {
            link.map_or(0, |i| 1 + depth(nodes, nodes[i].left).max(depth(nodes, nodes[i].right)))
        }
        assert!(depth(&nodes, root) <= 12);
        let first = first_node(&nodes, root.unwrap());
        assert_eq!(nodes[first].key, 0);
    }
}
