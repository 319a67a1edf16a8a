use aloft_geom::Vec3;

/// Interleaved CPU vertex/index arrays, laid out for direct upload as
/// position + normal + uv buffers with a u16 index list.
#[derive(Default, Clone)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub idx: Vec<u16>,
}

impl MeshBuild {
    /// Clears all arrays but retains capacity for reuse across frames.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.norm.clear();
        self.uv.clear();
        self.idx.clear();
    }

    /// Pre-reserve for a (res+1)^2 vertex grid with two triangles per cell.
    #[inline]
    pub fn reserve_grid(&mut self, res: usize) {
        let verts = (res + 1) * (res + 1);
        self.pos.reserve(verts * 3);
        self.norm.reserve(verts * 3);
        self.uv.reserve(verts * 2);
        self.idx.reserve(res * res * 6);
    }

    /// Appends one vertex; returns its index.
    #[inline]
    pub fn push_vertex(&mut self, p: Vec3, n: Vec3, uv: (f32, f32)) -> u16 {
        let index = (self.pos.len() / 3) as u16;
        self.pos.extend_from_slice(&[p.x, p.y, p.z]);
        self.norm.extend_from_slice(&[n.x, n.y, n.z]);
        self.uv.extend_from_slice(&[uv.0, uv.1]);
        index
    }

    #[inline]
    pub fn push_triangle(&mut self, a: u16, b: u16, c: u16) {
        self.idx.extend_from_slice(&[a, b, c]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    /// Interleaved vertex positions (x,y,z per vertex).
    pub fn positions(&self) -> &[f32] {
        &self.pos
    }

    /// Interleaved vertex normals (x,y,z per vertex).
    pub fn normals(&self) -> &[f32] {
        &self.norm
    }

    pub fn uvs(&self) -> &[f32] {
        &self.uv
    }

    pub fn indices(&self) -> &[u16] {
        &self.idx
    }

    #[inline]
    pub fn vertex_position(&self, index: usize) -> Vec3 {
        Vec3::new(
            self.pos[index * 3],
            self.pos[index * 3 + 1],
            self.pos[index * 3 + 2],
        )
    }

    #[inline]
    pub fn vertex_normal(&self, index: usize) -> Vec3 {
        Vec3::new(
            self.norm[index * 3],
            self.norm[index * 3 + 1],
            self.norm[index * 3 + 2],
        )
    }
}
