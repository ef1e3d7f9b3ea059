//! Edge type: weighted streets.

use super::VertexId;
use serde::Serialize;

/// Index of an edge inside a [`Graph`](super::Graph), in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    /// Position of the edge in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Traversal rule of a street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Direction {
    /// Traversable tail→head and head→tail at the same length.
    #[default]
    TwoWay,
    /// Traversable tail→head only.
    OneWay,
}

/// A street between two vertices.
///
/// Edges are immutable once created. Several edges may join the same pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    tail: VertexId,
    head: VertexId,
    length: f64,
    direction: Direction,
}

impl Edge {
    /// Creates an edge.
    ///
    /// Returns `None` if `length` is negative or not finite.
    pub(crate) fn new(tail: VertexId, head: VertexId, length: f64, direction: Direction) -> Option<Self> {
        if !length.is_finite() || length < 0.0 {
            return None;
        }
        Some(Self {
            tail,
            head,
            length,
            direction,
        })
    }

    /// Start vertex.
    pub fn tail(&self) -> VertexId {
        self.tail
    }

    /// End vertex.
    pub fn head(&self) -> VertexId {
        self.head
    }

    /// Street length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Traversal rule.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` for two-way streets.
    pub fn is_bidirectional(&self) -> bool {
        self.direction == Direction::TwoWay
    }

    /// Returns `true` if the edge may be entered from `from`.
    pub fn usable_from(&self, from: VertexId) -> bool {
        self.tail == from || (self.is_bidirectional() && self.head == from)
    }

    /// Returns `true` if the edge may be traversed from `from` to `to`.
    pub fn connects(&self, from: VertexId, to: VertexId) -> bool {
        (self.tail == from && self.head == to)
            || (self.is_bidirectional() && self.tail == to && self.head == from)
    }

    /// Endpoint reached when entering the edge from `from`.
    pub fn opposite(&self, from: VertexId) -> VertexId {
        if self.tail == from {
            self.head
        } else {
            self.tail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: VertexId = VertexId(0);
    const B: VertexId = VertexId(1);
    const C: VertexId = VertexId(2);

    #[test]
    fn test_invalid_lengths() {
        assert!(Edge::new(A, B, -1.0, Direction::TwoWay).is_none());
        assert!(Edge::new(A, B, f64::NAN, Direction::TwoWay).is_none());
        assert!(Edge::new(A, B, f64::INFINITY, Direction::TwoWay).is_none());
        assert!(Edge::new(A, B, 0.0, Direction::TwoWay).is_some());
    }

    #[test]
    fn test_two_way_connects_both_ways() {
        let e = Edge::new(A, B, 2.0, Direction::TwoWay).expect("valid");
        assert!(e.connects(A, B));
        assert!(e.connects(B, A));
        assert!(!e.connects(A, C));
        assert!(e.usable_from(B));
        assert_eq!(e.opposite(B), A);
    }

    #[test]
    fn test_one_way_connects_forward_only() {
        let e = Edge::new(A, B, 2.0, Direction::OneWay).expect("valid");
        assert!(e.connects(A, B));
        assert!(!e.connects(B, A));
        assert!(e.usable_from(A));
        assert!(!e.usable_from(B));
    }
}
