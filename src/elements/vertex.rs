use egui::Pos2;

use crate::geometry::point_in_circle;

/// Default vertex radius in pixels.
pub const DEFAULT_RADIUS: f32 = 20.;

/// Stores properties of a vertex.
#[derive(Clone, Debug)]
pub struct Vertex<V> {
    /// Client data
    payload: V,

    center: Pos2,
    radius: f32,

    hovered: bool,
    selected: bool,
}

impl<V> Vertex<V> {
    pub fn new(center: Pos2, payload: V) -> Self {
        Self::with_radius(center, DEFAULT_RADIUS, payload)
    }

    pub fn with_radius(center: Pos2, radius: f32, payload: V) -> Self {
        Self {
            payload,
            center,
            radius,
            hovered: false,
            selected: false,
        }
    }

    /// Checks if the point lies strictly inside the vertex circle.
    pub fn contains(&self, p: Pos2) -> bool {
        point_in_circle(p, self.center, self.radius)
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn move_to(&mut self, center: Pos2) {
        self.center = center;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    pub fn payload(&self) -> &V {
        &self.payload
    }

    pub(crate) fn set_payload(&mut self, payload: V) {
        self.payload = payload;
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn contains_uses_radius() {
        let mut v = Vertex::new(pos2(100., 100.), "a");
        assert!(v.contains(pos2(110., 100.)));
        assert!(!v.contains(pos2(120., 100.)));

        v.set_radius(30.);
        assert!(v.contains(pos2(120., 100.)));
    }

    #[test]
    fn move_to_changes_hit_area() {
        let mut v = Vertex::new(pos2(0., 0.), ());
        v.move_to(pos2(200., 50.));
        assert_eq!(v.center(), pos2(200., 50.));
        assert!(v.contains(pos2(205., 55.)));
        assert!(!v.contains(pos2(0., 0.)));
    }
}
