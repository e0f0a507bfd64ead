use egui::{Pos2, Rect};
use itertools::Itertools;

/// A completed lasso gesture, kept as an ordered vertex list in image
/// coordinates. The path is closed: the edge from the last vertex back to
/// the first is part of the outline even though it is not stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Pos2>,
    bounds: Rect,
}

impl Polygon {
    pub fn new(vertices: Vec<Pos2>) -> Self {
        let bounds = Rect::from_points(&vertices);
        Self { vertices, bounds }
    }

    pub fn vertices(&self) -> &[Pos2] {
        &self.vertices
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Even-odd ray cast over all edges, including the closing edge.
    /// Points exactly on the boundary count as exterior. Degenerate
    /// polygons (fewer than three vertices) contain nothing.
    pub fn contains(&self, point: Pos2) -> bool {
        if self.vertices.len() < 3 || !self.bounds.contains(point) {
            return false;
        }

        let mut inside = false;
        for (a, b) in self.vertices.iter().circular_tuple_windows() {
            if on_segment(*a, *b, point) {
                return false;
            }
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
        }
        inside
    }
}

fn on_segment(a: Pos2, b: Pos2, p: Pos2) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    cross == 0.0
        && (a.x.min(b.x)..=a.x.max(b.x)).contains(&p.x)
        && (a.y.min(b.y)..=a.y.max(b.y)).contains(&p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Pos2::new(0.0, 0.0),
            Pos2::new(4.0, 0.0),
            Pos2::new(4.0, 4.0),
            Pos2::new(0.0, 4.0),
        ])
    }

    #[test]
    fn contains_interior_point() {
        assert!(square().contains(Pos2::new(2.0, 2.0)));
    }

    #[test]
    fn excludes_exterior_points() {
        let p = square();
        assert!(!p.contains(Pos2::new(5.0, 2.0)));
        assert!(!p.contains(Pos2::new(-1.0, 2.0)));
        assert!(!p.contains(Pos2::new(2.0, 8.0)));
    }

    #[test]
    fn boundary_points_are_exterior() {
        let p = square();
        assert!(!p.contains(Pos2::new(0.0, 2.0)));
        assert!(!p.contains(Pos2::new(2.0, 0.0)));
        assert!(!p.contains(Pos2::new(4.0, 4.0)));
    }

    #[test]
    fn closing_edge_bounds_the_shape() {
        // Open triangle: only the implicit edge (4,4) -> (0,0) closes it.
        let p = Polygon::new(vec![
            Pos2::new(0.0, 0.0),
            Pos2::new(4.0, 0.0),
            Pos2::new(4.0, 4.0),
        ]);
        assert!(p.contains(Pos2::new(3.0, 1.0)));
        // Below the closing diagonal.
        assert!(!p.contains(Pos2::new(1.0, 3.0)));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let p = Polygon::new(vec![Pos2::new(0.0, 0.0), Pos2::new(4.0, 4.0)]);
        assert!(!p.contains(Pos2::new(2.0, 2.0)));
        assert!(!Polygon::new(vec![]).contains(Pos2::new(0.0, 0.0)));
    }
}
