//! Render batching for billboard vegetation.
//!
//! Scene nodes report their drawable data as [`Instanced`] batches so a host
//! render loop can set the billboard pipeline once and submit every batch in
//! a row. [`DrawVegetation`] extends [`wgpu::RenderPass`] with the actual
//! draw call.

/// Vertices drawn per tree instance: two crossed quads of two triangles each.
///
/// The billboard shader derives the quad corner from the vertex index, so no
/// per-vertex buffer exists; the instance buffer is the only vertex input.
pub const VERTICES_PER_TREE: u32 = 12;

/// Data for an instanced billboard batch: an instance buffer and its length.
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub amount: usize,
}

pub trait DrawVegetation {
    /// Draw one billboard batch. Assumes the billboard pipeline is set.
    fn draw_billboards(
        &mut self,
        instanced: &Instanced<'_>,
        texture_bind_group: &wgpu::BindGroup,
        camera_bind_group: &wgpu::BindGroup,
    );
}

impl DrawVegetation for wgpu::RenderPass<'_> {
    fn draw_billboards(
        &mut self,
        instanced: &Instanced<'_>,
        texture_bind_group: &wgpu::BindGroup,
        camera_bind_group: &wgpu::BindGroup,
    ) {
        if instanced.amount == 0 || instanced.instance.size() == 0 {
            log::warn!("you attempted to render a billboard batch with zero instances");
            return;
        }
        self.set_vertex_buffer(0, instanced.instance.slice(..));
        self.set_bind_group(0, texture_bind_group, &[]);
        self.set_bind_group(1, camera_bind_group, &[]);
        self.draw(0..VERTICES_PER_TREE, 0..instanced.amount as u32);
    }
}
