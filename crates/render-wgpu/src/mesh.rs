use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GridVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Unit quad in the XY plane, centered on the origin, facing +Z.
pub fn quad_mesh() -> (Vec<QuadVertex>, Vec<u16>) {
    let p = 1.0_f32;
    #[rustfmt::skip]
    let vertices = vec![
        QuadVertex { position: [-p, -p, 0.0], uv: [0.0, 1.0] },
        QuadVertex { position: [ p, -p, 0.0], uv: [1.0, 1.0] },
        QuadVertex { position: [ p,  p, 0.0], uv: [1.0, 0.0] },
        QuadVertex { position: [-p,  p, 0.0], uv: [0.0, 0.0] },
    ];
    let indices = vec![0, 1, 2, 2, 3, 0];
    (vertices, indices)
}

/// Line-list indices tracing the quad's triangle edges, diagonal included.
pub fn quad_edges() -> Vec<u16> {
    vec![0, 1, 1, 2, 2, 3, 3, 0, 0, 2]
}

/// Generate grid floor line vertices at height `y`.
pub fn grid_mesh(half_extent: i32, spacing: f32, y: f32) -> Vec<GridVertex> {
    let mut verts = Vec::new();
    let color = [0.4, 0.4, 0.4, 1.0];
    let axis = [0.7, 0.7, 0.7, 1.0];
    let extent = half_extent as f32 * spacing;

    for i in -half_extent..=half_extent {
        let offset = i as f32 * spacing;
        let color = if i == 0 { axis } else { color };
        // Lines along X
        verts.push(GridVertex {
            position: [-extent, y, offset],
            color,
        });
        verts.push(GridVertex {
            position: [extent, y, offset],
            color,
        });
        // Lines along Z
        verts.push(GridVertex {
            position: [offset, y, -extent],
            color,
        });
        verts.push(GridVertex {
            position: [offset, y, extent],
            color,
        });
    }
    verts
}

/// RGBA8 checkerboard, `size` pixels square with `cells` squares per side.
pub fn checker_texture(size: u32, cells: u32) -> Vec<u8> {
    let cell = (size / cells.max(1)).max(1);
    let light = [230, 230, 230, 255];
    let dark = [200, 60, 40, 255];
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let texel = if (x / cell + y / cell) % 2 == 0 {
                light
            } else {
                dark
            };
            pixels.extend_from_slice(&texel);
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_two_triangles() {
        let (verts, indices) = quad_mesh();
        assert_eq!(verts.len(), 4);
        assert_eq!(indices.len(), 6);
        assert!(indices.iter().all(|i| (*i as usize) < verts.len()));
        assert!(verts.iter().all(|v| v.position[2] == 0.0));
    }

    #[test]
    fn edges_are_line_pairs() {
        let edges = quad_edges();
        assert_eq!(edges.len() % 2, 0);
        assert_eq!(edges.len(), 10);
    }

    #[test]
    fn grid_line_count() {
        let verts = grid_mesh(10, 1.0, -1.0);
        // 21 offsets, two lines each, two vertices per line
        assert_eq!(verts.len(), 21 * 4);
        assert!(verts.iter().all(|v| v.position[1] == -1.0));
    }

    #[test]
    fn checker_alternates() {
        let pixels = checker_texture(4, 2);
        assert_eq!(pixels.len(), 4 * 4 * 4);
        let texel = |x: usize, y: usize| &pixels[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];
        assert_eq!(texel(0, 0), texel(1, 1));
        assert_ne!(texel(0, 0), texel(2, 0));
        assert_eq!(texel(2, 0), texel(0, 2));
    }
}
