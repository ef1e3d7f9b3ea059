//! Vertex type: intersections and collection points.

use serde::Serialize;
use std::fmt;

/// Index of a vertex inside a [`Graph`](super::Graph).
///
/// Ids are assigned in insertion order, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    /// Position of the vertex in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A road-network node: an intersection or a waste collection point.
///
/// Identity is the `key` alone: two vertices with the same key are the same
/// vertex, whatever their name or quantity.
///
/// # Examples
///
/// ```
/// use waste_routing::models::Vertex;
///
/// let depot = Vertex::new("A", "Central depot");
/// assert_eq!(depot.key(), "A");
/// assert!(!depot.is_collection_point(0.01));
///
/// let school = Vertex::collection_point("C", "School", 3.2);
/// assert_eq!(school.quantity(), 3.2);
/// assert!(school.is_collection_point(0.01));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Vertex {
    key: String,
    name: String,
    quantity: f64,
}

impl Vertex {
    /// Creates a pass-through intersection (quantity 0).
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self::collection_point(key, name, 0.0)
    }

    /// Creates a vertex holding `quantity` tonnes of waste.
    ///
    /// Negative or NaN quantities are stored as 0.
    pub fn collection_point(key: impl Into<String>, name: impl Into<String>, quantity: f64) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            quantity: if quantity > 0.0 { quantity } else { 0.0 },
        }
    }

    /// Unique short code.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Waste quantity to collect (0 for intersections).
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Returns `true` if the quantity exceeds `threshold`.
    pub fn is_collection_point(&self, threshold: f64) -> bool {
        self.quantity > threshold
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Vertex {}

impl std::hash::Hash for Vertex {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.key)?;
        if self.quantity > 0.01 {
            write!(f, " [{:.1} t]", self.quantity)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vertex_new() {
        let v = Vertex::new("A", "Depot");
        assert_eq!(v.key(), "A");
        assert_eq!(v.name(), "Depot");
        assert_eq!(v.quantity(), 0.0);
    }

    #[test]
    fn test_negative_quantity_clamped() {
        assert_eq!(Vertex::collection_point("B", "x", -3.0).quantity(), 0.0);
        assert_eq!(Vertex::collection_point("B", "x", f64::NAN).quantity(), 0.0);
    }

    #[test]
    fn test_equality_by_key() {
        let a = Vertex::collection_point("B", "Town hall", 4.8);
        let b = Vertex::new("B", "Something else");
        assert_eq!(a, b);

        let set: HashSet<Vertex> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_collection_threshold() {
        let v = Vertex::collection_point("B", "x", 0.01);
        assert!(!v.is_collection_point(0.01));
        assert!(v.is_collection_point(0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vertex::new("A", "Depot").to_string(), "Depot (A)");
        assert_eq!(
            Vertex::collection_point("B", "Town hall", 4.8).to_string(),
            "Town hall (B) [4.8 t]"
        );
    }
}
