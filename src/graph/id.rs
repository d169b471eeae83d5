//! Identity types for the graph.
//!
//! Node and pin IDs are drawn from one monotonic counter owned by the graph
//! (`IdAllocator`), so every ID is unique across the whole graph. IDs are never
//! reused until the graph is cleared.

use std::fmt;

/// Identifier of a node in a `Graph`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "NodeId(INVALID)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a pin. Unique across all nodes of a graph, not just within one node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PinId(pub u32);

impl PinId {
    pub const INVALID: PinId = PinId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl fmt::Debug for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "PinId(INVALID)")
        } else {
            write!(f, "PinId({})", self.0)
        }
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic ID counter shared by nodes and pins of one graph.
///
/// Owned by the graph rather than kept as global state, so independent
/// graphs never collide and each can be reset on its own.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at the value the next allocation will return.
    #[inline]
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Reserve `count` consecutive IDs and return the first one.
    ///
    /// `u32::MAX` is the `INVALID` marker and is never handed out, so the
    /// counter tops out there. Once a block no longer fits, `None` is
    /// returned and the counter is left alone.
    pub fn reserve(&mut self, count: u32) -> Option<u32> {
        let first = self.next;
        self.next = first.checked_add(count)?;
        Some(first)
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }

    #[cfg(test)]
    pub(crate) fn starting_at(next: u32) -> Self {
        Self { next }
    }
}
