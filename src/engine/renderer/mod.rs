// Rendering system using wgpu

mod camera;
mod font;
mod sprite;
pub mod texture;
mod vertex;

pub use camera::{Camera, CameraUniform};
pub use font::{BitmapFont, GlyphQuad};
pub use sprite::SpriteRenderer;
pub use texture::{Texture, TextureHandle, TextureManager};
pub use vertex::Vertex;

use std::sync::Arc;

use anyhow::Result;
use glam::Vec2;
use log::info;
use winit::window::Window;

/// Main renderer: owns the wgpu surface and turns queued quads and text
/// into frames
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    sprite_renderer: SpriteRenderer,
    texture_manager: TextureManager,
    camera: Camera,
}

impl Renderer {
    /// Create a new renderer for the given window
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let sprite_renderer = SpriteRenderer::new(&device, &config, &texture_bind_group_layout)?;
        let texture_manager = TextureManager::new();
        let camera = Camera::new(size.width as f32, size.height as f32);

        info!(
            "Renderer initialized with {}x{} resolution",
            size.width, size.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            texture_bind_group_layout,
            sprite_renderer,
            texture_manager,
            camera,
        })
    }

    /// Resize the renderer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.camera
                .resize(new_size.width as f32, new_size.height as f32);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Decode image bytes into a GPU texture, reusing previous loads with
    /// the same label
    pub fn load_texture_bytes(&mut self, bytes: &[u8], label: &str) -> Result<TextureHandle> {
        self.texture_manager.load_texture_bytes(
            &self.device,
            &self.queue,
            &self.texture_bind_group_layout,
            bytes,
            label,
        )
    }

    /// Point the camera at a follow offset with the given zoom
    pub fn set_camera(&mut self, offset: Vec2, zoom: f32) {
        self.camera.follow(offset, zoom);
    }

    /// Queue a textured quad for an entity-sized rectangle. A negative
    /// `flip_sign` extends the quad leftward from its anchor, mirroring the
    /// texture. A `None` texture draws as nothing.
    pub fn draw_entity(
        &mut self,
        position: Vec2,
        size: Vec2,
        flip_sign: f32,
        texture: Option<TextureHandle>,
    ) {
        let Some(texture) = texture else {
            return;
        };

        self.sprite_renderer
            .draw_rect(texture, position, Vec2::new(size.x * flip_sign, size.y));
    }

    /// Queue a run of bitmap-font text with `position` at the bottom-left
    /// of the first glyph
    pub fn draw_text(&mut self, font: &BitmapFont, text: &str, position: Vec2, size: f32) {
        let Some(texture) = font.texture else {
            return;
        };

        for glyph in BitmapFont::layout(text, position.x, position.y, size) {
            self.sprite_renderer.draw_rect_uv(
                texture,
                glyph.position,
                Vec2::splat(glyph.size),
                glyph.uv_min,
                glyph.uv_max,
            );
        }
    }

    /// Render everything queued since the last frame
    pub fn render(&mut self) -> Result<()> {
        let camera_uniform = CameraUniform::new(&self.camera);
        self.queue.write_buffer(
            self.sprite_renderer.camera_buffer(),
            0,
            bytemuck::cast_slice(&[camera_uniform]),
        );

        self.sprite_renderer.prepare(&self.device);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.2,
                            g: 0.2,
                            b: 0.2,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.sprite_renderer
                .render(&mut render_pass, &self.texture_manager);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get a reference to the device
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Get a reference to the queue
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}
