pub mod frame;
pub mod pipeline;
pub mod vertex;

use thiserror::Error;
use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, Buffer, BufferUsages, Color, Device,
    DeviceDescriptor, IndexFormat, LoadOp, Operations, PresentMode, Queue,
    RenderPassColorAttachment, RenderPassDescriptor, RequestAdapterOptions, StoreOp, Surface,
    SurfaceConfiguration, SurfaceError, SurfaceTarget, WindowHandle,
    util::{BufferInitDescriptor, DeviceExt, new_instance_with_webgpu_detection},
};

use crate::{
    frame::Frame,
    pipeline::Pipelines,
    vertex::{QUAD_INDICES, QUAD_VERTICES},
};

/// Highest iteration budget the shader will be asked to run
pub const MAX_ITERATIONS: u32 = 1024;

/// Per-frame shader inputs, laid out to match `View` in `shader.wgsl`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewUniform {
    pub window_size: [f32; 2],
    /// Plane point at the window midpoint
    pub center: [f32; 2],
    pub scale: f32,
    pub iterations: u32,
    _pad: [u32; 2],
}

impl ViewUniform {
    /// Iterations are clamped into `1..=MAX_ITERATIONS`
    pub fn new(window_size: [f32; 2], center: [f32; 2], scale: f32, iterations: u32) -> Self {
        Self {
            window_size,
            center,
            scale,
            iterations: iterations.clamp(1, MAX_ITERATIONS),
            _pad: [0; 2],
        }
    }
}

impl Default for ViewUniform {
    fn default() -> Self {
        Self::new([1.0, 1.0], [0.0, 0.0], 1.0, 256)
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface is not supported by the adapter")]
    UnsupportedSurface,
    #[error("out of GPU memory")]
    OutOfMemory,
}

struct RenderTarget {
    surface: Surface<'static>,
    config: SurfaceConfiguration,
}

struct Gpu {
    device: Device,
    queue: Queue,
}

struct Quad {
    vertices: Buffer,
    indices: Buffer,
}

/// GPU renderer built on `wgpu`
///
/// Owns the surface, the fractal pipeline, a static fullscreen quad & the view
/// uniform. Each frame is a single draw of the quad; all the work is in the fragment shader
pub struct Renderer {
    gpu: Gpu,
    target: RenderTarget,
    pipelines: Pipelines,
    quad: Quad,
    view_buffer: Buffer,
    view_bind_group: BindGroup,
}

impl Renderer {
    /// Creates a new `Renderer` with a configured surface, pipeline & quad
    pub async fn new(
        inner_width: u32,
        inner_height: u32,
        window: impl Into<SurfaceTarget<'static>> + WindowHandle,
    ) -> Result<Renderer, RenderError> {
        let instance = new_instance_with_webgpu_detection(&Default::default()).await;
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                // Force find adapter that can present to this surface
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;
        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                #[cfg(target_arch = "wasm32")]
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await?;

        // WebGPU throws error 'size is zero' if not set
        let (w, h) = (inner_width.max(1), inner_height.max(1));
        let mut surface_cfg = surface
            .get_default_config(&adapter, w, h)
            .ok_or(RenderError::UnsupportedSurface)?;
        surface_cfg.present_mode = PresentMode::AutoVsync;
        surface.configure(&device, &surface_cfg);
        log::info!("surface configured {w}x{h} as {:?}", surface_cfg.format);

        let pipelines = Pipelines::new(&device, surface_cfg.format);

        let quad = Quad {
            vertices: device.create_buffer_init(&BufferInitDescriptor {
                label: Some("Quad Vertex Buffer"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: BufferUsages::VERTEX,
            }),
            indices: device.create_buffer_init(&BufferInitDescriptor {
                label: Some("Quad Index Buffer"),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: BufferUsages::INDEX,
            }),
        };

        let view_buffer = device.create_buffer_init(&BufferInitDescriptor {
            label: Some("View Uniform Buffer"),
            contents: bytemuck::bytes_of(&ViewUniform::default()),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });
        let view_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("View Bind Group"),
            layout: &pipelines.view_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: view_buffer.as_entire_binding(),
            }],
        });

        Ok(Renderer {
            gpu: Gpu { device, queue },
            target: RenderTarget {
                surface,
                config: surface_cfg,
            },
            pipelines,
            quad,
            view_buffer,
            view_bind_group,
        })
    }

    /// Returns the current surface dimensions (in pixels)
    pub fn surface_size(&self) -> (u32, u32) {
        (self.target.config.width, self.target.config.height)
    }

    /// Acquires the next swapchain image
    ///
    /// A lost or outdated surface is reconfigured & the frame skipped (`Ok(None)`)
    pub fn begin_frame(&mut self) -> Result<Option<Frame>, RenderError> {
        let surface_texture = match self.target.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                self.target
                    .surface
                    .configure(&self.gpu.device, &self.target.config);
                return Ok(None);
            }
            Err(err) => {
                log::warn!("skipping frame: {err}");
                return Ok(None);
            }
        };

        let encoder = self.gpu.device.create_command_encoder(&Default::default());
        Ok(Some(Frame::new(surface_texture, encoder)))
    }

    /// Records the fullscreen fractal pass into the frame
    pub fn draw(&self, frame: &mut Frame) {
        let mut r_pass = frame.encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Fractal Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(Color::BLACK),
                    store: StoreOp::Store,
                },
            })],
            ..Default::default()
        });

        r_pass.set_pipeline(&self.pipelines.fractal);
        r_pass.set_bind_group(0, &self.view_bind_group, &[]);
        r_pass.set_vertex_buffer(0, self.quad.vertices.slice(..));
        r_pass.set_index_buffer(self.quad.indices.slice(..), IndexFormat::Uint16);
        r_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }

    /// Ends the frame by submitting commands and presenting
    pub fn end_frame(&mut self, frame: Frame) {
        frame.finish(&self.gpu.queue);
    }

    /// Uploads the camera & iteration budget the next draw will use
    pub fn upload_view(&mut self, view: &ViewUniform) {
        self.gpu
            .queue
            .write_buffer(&self.view_buffer, 0, bytemuck::bytes_of(view));
    }

    /// Upload, draw & present in one go
    pub fn render(&mut self, view: &ViewUniform) -> Result<(), RenderError> {
        self.upload_view(view);
        let Some(mut frame) = self.begin_frame()? else {
            return Ok(());
        };
        self.draw(&mut frame);
        self.end_frame(frame);
        Ok(())
    }

    /// Resizes the surface; zero-sized requests (minimized windows) are ignored
    pub fn resize(&mut self, w: u32, h: u32) {
        if w == 0 || h == 0 {
            return;
        }
        (self.target.config.width, self.target.config.height) = (w, h);
        self.target
            .surface
            .configure(&self.gpu.device, &self.target.config);
    }

    /// Enables/disables V‑Sync by changing the surface present mode
    ///
    /// `vsync = true` → [`PresentMode::Fifo`] (V‑Sync ON)  
    /// `vsync = false` → [`PresentMode::AutoNoVsync`] (V‑Sync OFF)
    pub fn set_vsync(&mut self, on: bool) {
        self.target.config.present_mode = if on {
            PresentMode::Fifo
        } else {
            PresentMode::AutoNoVsync
        };

        self.target
            .surface
            .configure(&self.gpu.device, &self.target.config);
    }
}
