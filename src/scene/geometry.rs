use glam::Vec3;

use crate::math::Aabb;

/// Indexed triangle mesh in local (object) space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    positions: Vec<Vec3>,
    indices: Vec<[u32; 3]>,
}

impl Geometry {
    /// Build from raw vertex positions and triangle indices.
    ///
    /// Triangles referencing out-of-range vertices are skipped when
    /// iterating.
    #[must_use]
    pub fn new(positions: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Self {
        Self { positions, indices }
    }

    /// Rectangle of `width` x `height` in the XY plane, centered at the
    /// origin and facing +Z.
    #[must_use]
    pub fn plane(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self {
            positions: vec![
                Vec3::new(-hw, -hh, 0.0),
                Vec3::new(hw, -hh, 0.0),
                Vec3::new(hw, hh, 0.0),
                Vec3::new(-hw, hh, 0.0),
            ],
            indices: vec![[0, 1, 2], [0, 2, 3]],
        }
    }

    /// Axis-aligned box of the given full extents, centered at the origin.
    #[must_use]
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        let positions = Aabb::new(-h, h).corners().to_vec();
        // Corner order from `Aabb::corners`: bit 0 = x, bit 1 = y, bit 2 = z
        let indices = vec![
            // -Z
            [0, 2, 3],
            [0, 3, 1],
            // +Z
            [4, 5, 7],
            [4, 7, 6],
            // -X
            [0, 4, 6],
            [0, 6, 2],
            // +X
            [1, 3, 7],
            [1, 7, 5],
            // -Y
            [0, 1, 5],
            [0, 5, 4],
            // +Y
            [2, 6, 7],
            [2, 7, 3],
        ];
        Self { positions, indices }
    }

    /// Vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Number of triangles (including any with invalid indices).
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// True if there is nothing to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over triangles with valid indices as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.iter().filter_map(|[a, b, c]| {
            Some([
                *self.positions.get(*a as usize)?,
                *self.positions.get(*b as usize)?,
                *self.positions.get(*c as usize)?,
            ])
        })
    }

    /// Local-space bounding volume.
    #[must_use]
    pub fn local_bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter().copied())
    }
}
