//! Shape generation for box primitives

use glam::Vec3;

use super::vertex::Vertex;

/// Outward normal plus two tangents with `u × v = normal`, so corners
/// walked (-,-) (+,-) (+,+) (-,+) wind counter-clockwise seen from outside
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y, Vec3::Z),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::Z, Vec3::X),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::Y, Vec3::X),
];

/// Vertices per box (6 faces, 2 triangles each)
pub const CUBOID_VERTEX_COUNT: usize = 36;

/// Generate vertices for an axis-aligned box
pub fn cuboid(center: Vec3, size: Vec3, color: [f32; 4]) -> Vec<Vertex> {
    let half = size * 0.5;
    let mut vertices = Vec::with_capacity(CUBOID_VERTEX_COUNT);

    for (normal, u, v) in FACES {
        let face_center = center + normal * half;
        let du = u * half;
        let dv = v * half;
        let corners = [
            face_center - du - dv,
            face_center + du - dv,
            face_center + du + dv,
            face_center - du + dv,
        ];

        for i in [0, 1, 2, 0, 2, 3] {
            vertices.push(Vertex::new(
                corners[i].to_array(),
                normal.to_array(),
                color,
            ));
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_extents() {
        let verts = cuboid(Vec3::new(1.0, 0.25, -2.0), Vec3::new(1.5, 1.0, 0.5), [1.0; 4]);
        assert_eq!(verts.len(), CUBOID_VERTEX_COUNT);

        let xs = verts.iter().map(|v| v.position[0]);
        let (min_x, max_x) = xs.fold((f32::MAX, f32::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
        assert_eq!((min_x, max_x), (0.25, 1.75));

        let ys = verts.iter().map(|v| v.position[1]);
        let (min_y, max_y) = ys.fold((f32::MAX, f32::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));
        assert_eq!((min_y, max_y), (-0.25, 0.75));
    }

    #[test]
    fn test_cuboid_faces_wind_outward() {
        let verts = cuboid(Vec3::ZERO, Vec3::ONE, [1.0; 4]);
        for tri in verts.chunks(3) {
            let a = Vec3::from_array(tri[0].position);
            let b = Vec3::from_array(tri[1].position);
            let c = Vec3::from_array(tri[2].position);
            let face_normal = (b - a).cross(c - a).normalize();
            let normal = Vec3::from_array(tri[0].normal);
            assert!(face_normal.dot(normal) > 0.99, "{:?} vs {:?}", face_normal, normal);
            // Outward: the face sits on the side its normal points to
            assert!(a.dot(normal) > 0.0);
        }
    }
}
