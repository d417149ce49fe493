use super::helpers;

/// Depth attachment sized to the surface. Recreated whenever the canvas
/// backing store changes size.
pub(crate) struct DepthTarget {
    pub(crate) tex: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
}

impl DepthTarget {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (tex, view) = helpers::create_depth_texture(device, width, height);
        Self { tex, view }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.tex.destroy();
        (self.tex, self.view) = helpers::create_depth_texture(device, width, height);
    }
}
