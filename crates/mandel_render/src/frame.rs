use wgpu::{CommandEncoder, Queue, SurfaceTexture, TextureView};

/// An acquired swapchain image plus the encoder recording into it
pub struct Frame {
    pub view: TextureView,
    pub encoder: CommandEncoder,
    surface_texture: SurfaceTexture,
}

impl Frame {
    pub(crate) fn new(surface_texture: SurfaceTexture, encoder: CommandEncoder) -> Self {
        let view = surface_texture.texture.create_view(&Default::default());
        Self {
            view,
            encoder,
            surface_texture,
        }
    }

    /// Submits the recorded commands & presents the image
    pub(crate) fn finish(self, queue: &Queue) {
        queue.submit(Some(self.encoder.finish()));
        self.surface_texture.present();
    }
}
