use egui::Pos2;

/// Default distance in pixels within which a point counts as lying on an edge.
pub const DEFAULT_EDGE_THRESHOLD: f32 = 5.;

/// Euclidean distance between two points.
pub fn distance(p: Pos2, q: Pos2) -> f32 {
    (p - q).length()
}

/// Checks if `p` lies strictly inside the circle. Points on the boundary are outside.
pub fn point_in_circle(p: Pos2, center: Pos2, radius: f32) -> bool {
    distance(p, center) < radius
}

/// Checks if `p` is close enough to the segment `a`-`b` to count as a hit.
///
/// The check is deliberately approximate. A point is dropped early when it lies on the same
/// side of both endpoints along an axis where the segment spans more than `2 * threshold`.
/// Otherwise the distance to the infinite line through `a` and `b` decides.
pub fn segment_contains_point(a: Pos2, b: Pos2, p: Pos2, threshold: f32) -> bool {
    if (a.x - b.x).abs() > 2. * threshold && (a.x < p.x) == (b.x < p.x) {
        return false;
    }
    if (a.y - b.y).abs() > 2. * threshold && (a.y < p.y) == (b.y < p.y) {
        return false;
    }

    perpendicular_distance(a, b, p) < threshold
}

/// Distance from `p` to the infinite line through `a` and `b`, computed from the angle the
/// two directions subtend at `a`.
pub fn perpendicular_distance(a: Pos2, b: Pos2, p: Pos2) -> f32 {
    let to_p = inner_angle(a, p);
    let to_b = inner_angle(a, b);

    ((to_b - to_p).sin() * distance(a, p)).abs()
}

/// Angle of the direction from `from` towards `to`.
fn inner_angle(from: Pos2, to: Pos2) -> f32 {
    (from.y - to.y).atan2(from.x - to.x)
}

pub fn midpoint(a: Pos2, b: Pos2) -> Pos2 {
    a.lerp(b, 0.5)
}

/// Rotation of the segment `a`-`b`, folded into `[-PI/2, PI/2]` so text laid along it never
/// ends up upside down.
pub fn segment_angle(a: Pos2, b: Pos2) -> f32 {
    let adj = a.x - b.x;
    let opp = a.y - b.y;
    if adj == 0. {
        return std::f32::consts::FRAC_PI_2;
    }

    (opp / adj).atan()
}
