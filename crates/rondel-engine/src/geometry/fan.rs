use crate::coords::Vec2;

/// Value of π used to derive the angular step.
///
/// `Approximate` keeps the historical `3.142` constant. It makes the last facet
/// of the fan slightly wider than the others, which is visible at low segment
/// counts. `Exact` produces a perfectly regular polygon.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PiConstant {
    #[default]
    Approximate,
    Exact,
}

impl PiConstant {
    #[inline]
    pub fn value(self) -> f32 {
        match self {
            PiConstant::Approximate => 3.142,
            PiConstant::Exact => std::f32::consts::PI,
        }
    }
}

/// Regular polygon approximating a circle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PolygonDesc {
    pub center: Vec2,
    pub radius: f32,
    /// Number of triangles in the fan.
    pub segments: u32,
    pub pi: PiConstant,
}

impl PolygonDesc {
    #[inline]
    pub fn new(center: Vec2, radius: f32, segments: u32) -> Self {
        Self { center, radius, segments, pi: PiConstant::default() }
    }

    #[inline]
    pub fn with_pi(mut self, pi: PiConstant) -> Self {
        self.pi = pi;
        self
    }
}

/// Angle between consecutive boundary samples, in radians.
///
/// `segments == 0` yields an infinite step; callers never sample with it.
#[inline]
pub fn angular_step(segments: u32, pi: PiConstant) -> f32 {
    ((360.0 / segments as f32) * pi.value()) / 180.0
}

/// Flat `[x0, y0, x1, y1, ...]` position buffer for a triangle fan.
///
/// Layout: center, the angle-0 boundary point, samples at `θ·i` for
/// `i in 1..segments`, then the angle-0 point again so the fan closes exactly.
/// Length is `2 * (segments + 2)` for `segments >= 1`; zero segments still
/// emit both angle-0 points, giving 6 floats.
pub fn fan_positions(desc: &PolygonDesc) -> Vec<f32> {
    let PolygonDesc { center, radius, segments, pi } = *desc;
    let (x, y) = (center.x, center.y);
    let theta = angular_step(segments, pi);

    let mut positions = Vec::with_capacity(2 * (segments as usize + 2));
    positions.extend_from_slice(&[x, y, x + radius, y]);

    for i in 1..segments {
        let angle = theta * i as f32;
        positions.push(x + radius * angle.cos());
        positions.push(y + radius * angle.sin());
    }

    positions.extend_from_slice(&[x + radius, y]);
    positions
}

/// Index buffer listing the fan as independent triangles `(0, i, i + 1)`.
///
/// Length is `3 * segments`; the largest index is `segments + 1`.
pub fn fan_indices(segments: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity(3 * segments as usize);
    for i in 1..=segments {
        indices.extend_from_slice(&[0, i, i + 1]);
    }
    indices
}

/// Position + index buffers for one polygon, computed once and uploaded as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct FanMesh {
    pub positions: Vec<f32>,
    pub indices: Vec<u32>,
}

impl FanMesh {
    pub fn generate(desc: &PolygonDesc) -> Self {
        Self {
            positions: fan_positions(desc),
            indices: fan_indices(desc.segments),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 2
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn vertex(&self, i: usize) -> Vec2 {
        Vec2::new(self.positions[2 * i], self.positions[2 * i + 1])
    }

    /// The fan pivot.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.vertex(0)
    }

    /// Boundary samples in emission order (first and last coincide).
    pub fn boundary(&self) -> impl Iterator<Item = Vec2> + '_ {
        (1..self.vertex_count()).map(|i| self.vertex(i))
    }

    /// Returns true if `p` lies inside (or on the edge of) any fan triangle.
    pub fn contains(&self, p: Vec2) -> bool {
        self.indices.chunks_exact(3).any(|tri| {
            let a = self.vertex(tri[0] as usize);
            let b = self.vertex(tri[1] as usize);
            let c = self.vertex(tri[2] as usize);
            triangle_contains(a, b, c, p)
        })
    }
}

fn cross(o: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn triangle_contains(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> bool {
    let d0 = cross(a, b, p);
    let d1 = cross(b, c, p);
    let d2 = cross(c, a, p);

    // Degenerate triangles have zero area and contain nothing.
    if cross(a, b, c) == 0.0 {
        return false;
    }

    let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_neg && has_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn desc(x: f32, y: f32, r: f32, n: u32) -> PolygonDesc {
        PolygonDesc::new(Vec2::new(x, y), r, n)
    }

    fn cases() -> [PolygonDesc; 3] {
        [
            desc(0.0, 0.0, 1.0, 8),
            desc(0.5, 0.5, 0.2, 120),
            desc(0.0, 0.0, 1.0, 3),
        ]
    }

    fn dist(a: Vec2, b: Vec2) -> f32 {
        let d = a - b;
        (d.x * d.x + d.y * d.y).sqrt()
    }

    // ── positions ─────────────────────────────────────────────────────────

    #[test]
    fn position_buffer_length() {
        for d in cases() {
            let n = d.segments as usize;
            assert_eq!(fan_positions(&d).len(), 2 * (n + 2), "{d:?}");
        }
    }

    #[test]
    fn first_vertex_is_center() {
        for d in cases() {
            let mesh = FanMesh::generate(&d);
            assert_eq!(mesh.center(), d.center);
        }
    }

    #[test]
    fn boundary_points_lie_on_radius() {
        for d in cases() {
            for pi in [PiConstant::Approximate, PiConstant::Exact] {
                let mesh = FanMesh::generate(&d.with_pi(pi));
                for p in mesh.boundary() {
                    assert!((dist(p, d.center) - d.radius).abs() < EPS, "{d:?} {p:?}");
                }
            }
        }
    }

    #[test]
    fn fan_closes_on_start_point() {
        for d in cases() {
            let mesh = FanMesh::generate(&d);
            let first = mesh.boundary().next().unwrap();
            let last = mesh.boundary().last().unwrap();
            assert_eq!(first, last);
            assert_eq!(first, Vec2::new(d.center.x + d.radius, d.center.y));
        }
    }

    #[test]
    fn samples_advance_counter_clockwise() {
        let mesh = FanMesh::generate(&desc(0.0, 0.0, 1.0, 8).with_pi(PiConstant::Exact));
        let p = mesh.vertex(2);
        let quarter = std::f32::consts::FRAC_PI_4;
        assert!((p.x - quarter.cos()).abs() < EPS);
        assert!((p.y - quarter.sin()).abs() < EPS);
    }

    #[test]
    fn approximate_pi_differs_from_exact() {
        let d = desc(0.0, 0.0, 1.0, 8);
        let approx = angular_step(d.segments, PiConstant::Approximate);
        let exact = angular_step(d.segments, PiConstant::Exact);
        assert!(approx > exact);
        assert!((approx - exact).abs() < 1e-3);
        assert_ne!(fan_positions(&d), fan_positions(&d.with_pi(PiConstant::Exact)));
    }

    // ── indices ───────────────────────────────────────────────────────────

    #[test]
    fn index_buffer_length_and_bounds() {
        for d in cases() {
            let mesh = FanMesh::generate(&d);
            let n = d.segments as usize;
            assert_eq!(mesh.indices.len(), 3 * n);
            let max = *mesh.indices.iter().max().unwrap();
            assert!(max as usize <= n + 1);
            assert!((max as usize) < mesh.vertex_count());
        }
    }

    #[test]
    fn every_triangle_pivots_on_center() {
        for d in cases() {
            let indices = fan_indices(d.segments);
            assert!(indices.chunks_exact(3).all(|t| t[0] == 0));
        }
    }

    #[test]
    fn triangles_are_consecutive() {
        assert_eq!(fan_indices(3), vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);
    }

    // ── degenerate counts ─────────────────────────────────────────────────

    #[test]
    fn single_segment_is_minimal_fan() {
        let mesh = FanMesh::generate(&desc(0.0, 0.0, 1.0, 1));
        assert_eq!(mesh.positions, vec![0.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn zero_segments_has_no_triangles() {
        let mesh = FanMesh::generate(&desc(0.0, 0.0, 1.0, 0));
        assert_eq!(mesh.positions, vec![0.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        assert_eq!(mesh.vertex_count(), 3);
        assert!(mesh.indices.is_empty());
        assert!(!mesh.contains(Vec2::zero()));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_center_and_near_boundary() {
        let mesh = FanMesh::generate(&desc(0.5, 0.5, 0.2, 120));
        assert!(mesh.contains(Vec2::new(0.5, 0.5)));
        assert!(mesh.contains(Vec2::new(0.5, 0.69)));
        assert!(mesh.contains(Vec2::new(0.31, 0.5)));
    }

    #[test]
    fn excludes_points_outside() {
        let mesh = FanMesh::generate(&desc(0.5, 0.5, 0.2, 120));
        assert!(!mesh.contains(Vec2::new(0.0, 0.0)));
        assert!(!mesh.contains(Vec2::new(0.5, 0.71)));
    }

    #[test]
    fn square_excludes_corners_of_bounding_box() {
        // Four segments give a diamond; (0.9, 0.9) is inside the circle's box only.
        let mesh = FanMesh::generate(&desc(0.0, 0.0, 1.0, 4).with_pi(PiConstant::Exact));
        assert!(mesh.contains(Vec2::new(0.4, 0.4)));
        assert!(!mesh.contains(Vec2::new(0.9, 0.9)));
    }
}
