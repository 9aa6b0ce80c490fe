use crate::fastbin::{Fastbin, SlotIdx};
use crate::rb_node::Link;

/// Head and tail of a doubly linked list threaded through a `Fastbin`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListHead {
    pub head: Link,
    pub tail: Link,
}

pub trait ListLinks {
    fn before(&self) -> Link;
    fn after(&self) -> Link;
    fn set_before(&mut self, before: Link);
    fn set_after(&mut self, after: Link);
}

impl ListHead {
    #[inline]
    pub fn list_init(&mut self) {
        self.head = None;
        self.tail = None;
    }

    #[inline]
    pub fn list_add_tail<N: ListLinks>(&mut self, nodes: &mut Fastbin<N>, node: SlotIdx) {
        nodes[node].set_before(self.tail);
        nodes[node].set_after(None);
        match self.tail {
            Some(tail) => nodes[tail].set_after(Some(node)),
            None => self.head = Some(node),
        }
        self.tail = Some(node);
    }

    #[inline]
    pub fn list_del<N: ListLinks>(&mut self, nodes: &mut Fastbin<N>, node: SlotIdx) {
        let before = nodes[node].before();
        let after = nodes[node].after();
        match before {
            Some(before) => nodes[before].set_after(after),
            None => self.head = after,
        }
        match after {
            Some(after) => nodes[after].set_before(before),
            None => self.tail = before,
        }
        nodes[node].set_before(None);
        nodes[node].set_after(None);
    }

    /// Moves `node` to the tail. Returns false if it already was the tail.
    #[inline]
    pub fn list_move_tail<N: ListLinks>(&mut self, nodes: &mut Fastbin<N>, node: SlotIdx) -> bool {
        if self.tail == Some(node) {
            return false;
        }
        self.list_del(nodes, node);
        self.list_add_tail(nodes, node);
        true
    }
}
