// Immediate-mode textured quad batching

use std::ops::Range;

use anyhow::Result;
use glam::{Mat4, Vec2};
use wgpu::util::DeviceExt;

use super::camera::CameraUniform;
use super::texture::{TextureHandle, TextureManager};
use super::vertex::Vertex;

/// A quad queued for this frame
#[derive(Debug, Clone, Copy)]
struct Quad {
    texture: TextureHandle,
    vertices: [Vertex; 4],
}

/// A contiguous run of quads sharing one texture
#[derive(Debug, Clone)]
struct BatchRun {
    texture: TextureHandle,
    index_range: Range<u32>,
}

/// Immediate-mode quad renderer: callers queue textured quads every frame,
/// `prepare` packs them into fresh GPU buffers, and `render` draws them in
/// texture-grouped runs in submission order.
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    quads: Vec<Quad>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    runs: Vec<BatchRun>,
}

impl SpriteRenderer {
    /// Create a new sprite renderer
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        texture_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self> {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Mirrored (negative-extent) quads reverse their winding
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let camera_uniform = CameraUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        };

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            render_pipeline,
            camera_buffer,
            camera_bind_group,
            quads: Vec::new(),
            vertex_buffer: None,
            index_buffer: None,
            runs: Vec::new(),
        })
    }

    /// Queue a full-texture quad. A negative extent mirrors the texture
    /// along that axis, which is how left-facing sprites are drawn.
    pub fn draw_rect(&mut self, texture: TextureHandle, origin: Vec2, extent: Vec2) {
        self.draw_rect_uv(texture, origin, extent, Vec2::ZERO, Vec2::ONE);
    }

    /// Queue a quad sampling the `[uv_min, uv_max]` region of the texture,
    /// with `uv_min` at the region's top-left
    pub fn draw_rect_uv(
        &mut self,
        texture: TextureHandle,
        origin: Vec2,
        extent: Vec2,
        uv_min: Vec2,
        uv_max: Vec2,
    ) {
        let vertices = [
            Vertex::new(origin, Vec2::new(uv_min.x, uv_max.y)),
            Vertex::new(
                origin + Vec2::new(extent.x, 0.0),
                Vec2::new(uv_max.x, uv_max.y),
            ),
            Vertex::new(origin + extent, Vec2::new(uv_max.x, uv_min.y)),
            Vertex::new(
                origin + Vec2::new(0.0, extent.y),
                Vec2::new(uv_min.x, uv_min.y),
            ),
        ];

        self.quads.push(Quad { texture, vertices });
    }

    /// Number of quads queued for this frame
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Pack this frame's quads into GPU buffers and texture runs
    pub fn prepare(&mut self, device: &wgpu::Device) {
        self.runs.clear();

        if self.quads.is_empty() {
            self.vertex_buffer = None;
            self.index_buffer = None;
            return;
        }

        let mut vertices = Vec::with_capacity(self.quads.len() * 4);
        let mut indices: Vec<u16> = Vec::with_capacity(self.quads.len() * 6);

        for quad in &self.quads {
            let base = vertices.len() as u16;
            vertices.extend_from_slice(&quad.vertices);
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);

            let end = indices.len() as u32;
            match self.runs.last_mut() {
                Some(run) if run.texture == quad.texture => run.index_range.end = end,
                _ => self.runs.push(BatchRun {
                    texture: quad.texture,
                    index_range: end - 6..end,
                }),
            }
        }

        self.vertex_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Sprite Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        self.index_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Sprite Index Buffer"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));

        self.quads.clear();
    }

    /// Draw the prepared runs. Runs whose texture has no live entry in the
    /// manager are skipped quietly.
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        texture_manager: &'a TextureManager,
    ) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&self.vertex_buffer, &self.index_buffer)
        else {
            return;
        };

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);

        for run in &self.runs {
            let Some(texture) = texture_manager.get(run.texture) else {
                continue;
            };

            render_pass.set_bind_group(1, &texture.bind_group, &[]);
            render_pass.draw_indexed(run.index_range.clone(), 0, 0..1);
        }
    }

    /// Get a reference to the camera buffer
    pub fn camera_buffer(&self) -> &wgpu::Buffer {
        &self.camera_buffer
    }
}
