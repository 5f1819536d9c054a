use crate::mesh::{GridVertex, QuadVertex, checker_texture, grid_mesh, quad_edges, quad_mesh};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use quadview_render::{Camera, RenderFlags, Scene, SceneError};
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const TEXTURE_SIZE: u32 = 64;
const TEXTURE_CELLS: u32 = 8;
/// Radians per second the quad turns about the vertical axis.
const SPIN_RATE: f32 = 0.5;

const SOLID_TINT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const WIRE_TINT: [f32; 4] = [0.1, 0.9, 0.4, 1.0];

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    tint: [f32; 4],
    options: [f32; 4],
}

/// A configured presentation surface together with the device that drives it.
pub struct SurfaceTarget {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
}

impl SurfaceTarget {
    /// Pick an sRGB format if available and configure the surface.
    /// `vsync` selects a presentation mode that waits for the display refresh.
    pub fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        device: wgpu::Device,
        queue: wgpu::Queue,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<Self, SceneError> {
        let caps = surface.get_capabilities(adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| SceneError::Init("surface reports no supported formats".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        tracing::debug!(?format, vsync, width, height, "surface configured");

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.reconfigure();
    }

    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

/// GPU objects created by `init_scene`.
struct GpuResources {
    quad_pipeline: wgpu::RenderPipeline,
    wire_pipeline: wgpu::RenderPipeline,
    grid_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vertex_buffer: wgpu::Buffer,
    quad_index_buffer: wgpu::Buffer,
    quad_index_count: u32,
    edge_index_buffer: wgpu::Buffer,
    edge_index_count: u32,
    grid_vertex_buffer: wgpu::Buffer,
    grid_vertex_count: u32,
    depth_texture: wgpu::TextureView,
}

/// The viewer scene: a spinning checkerboard quad above a line grid.
///
/// The quad can be hidden and switched between filled and wireframe
/// rendering. Presentation is vsync-throttled when the surface was
/// configured with vsync.
pub struct SimpleScene {
    target: SurfaceTarget,
    resources: Option<GpuResources>,
    flags: RenderFlags,
    model: Mat4,
    viewport: (u32, u32),
    pending_frame: Option<wgpu::SurfaceTexture>,
}

impl SimpleScene {
    pub fn new(target: SurfaceTarget, width: u32, height: u32) -> Self {
        Self {
            target,
            resources: None,
            flags: RenderFlags::default(),
            model: Mat4::IDENTITY,
            viewport: (width, height),
            pending_frame: None,
        }
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    #[allow(clippy::too_many_arguments)]
    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        entry_points: (&str, &str),
        buffer: wgpu::VertexBufferLayout<'_>,
        topology: wgpu::PrimitiveTopology,
        format: wgpu::TextureFormat,
        label: &str,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(entry_points.0),
                compilation_options: Default::default(),
                buffers: &[buffer],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(entry_points.1),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_resources(&self) -> GpuResources {
        let device = &self.target.device;
        let queue = &self.target.queue;
        let format = self.target.format();

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                model: Mat4::IDENTITY.to_cols_array_2d(),
                tint: SOLID_TINT,
                options: [1.0, 0.0, 0.0, 0.0],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Checkerboard texture
        let extent = wgpu::Extent3d {
            width: TEXTURE_SIZE,
            height: TEXTURE_SIZE,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("checker_texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &checker_texture(TEXTURE_SIZE, TEXTURE_CELLS),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * TEXTURE_SIZE),
                rows_per_image: Some(TEXTURE_SIZE),
            },
            extent,
        );
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("checker_sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let quad_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quad_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::QUAD_SHADER.into()),
        });
        let grid_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("grid_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::GRID_SHADER.into()),
        });

        let quad_layout = || wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &QUAD_ATTRIBUTES,
        };

        let quad_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &quad_shader,
            ("vs_main", "fs_main"),
            quad_layout(),
            wgpu::PrimitiveTopology::TriangleList,
            format,
            "quad_pipeline",
        );
        let wire_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &quad_shader,
            ("vs_main", "fs_main"),
            quad_layout(),
            wgpu::PrimitiveTopology::LineList,
            format,
            "wire_pipeline",
        );
        let grid_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &grid_shader,
            ("vs_grid", "fs_grid"),
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<GridVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &GRID_ATTRIBUTES,
            },
            wgpu::PrimitiveTopology::LineList,
            format,
            "grid_pipeline",
        );

        // Quad mesh
        let (quad_verts, quad_indices) = quad_mesh();
        let quad_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vertex_buffer"),
            contents: bytemuck::cast_slice(&quad_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_index_buffer"),
            contents: bytemuck::cast_slice(&quad_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let edges = quad_edges();
        let edge_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("edge_index_buffer"),
            contents: bytemuck::cast_slice(&edges),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Grid mesh
        let grid_verts = grid_mesh(10, 1.0, -1.0);
        let grid_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grid_vertex_buffer"),
            contents: bytemuck::cast_slice(&grid_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let depth_texture = create_depth_texture(device, self.viewport.0, self.viewport.1);

        GpuResources {
            quad_pipeline,
            wire_pipeline,
            grid_pipeline,
            uniform_buffer,
            bind_group,
            quad_vertex_buffer,
            quad_index_buffer,
            quad_index_count: quad_indices.len() as u32,
            edge_index_buffer,
            edge_index_count: edges.len() as u32,
            grid_vertex_buffer,
            grid_vertex_count: grid_verts.len() as u32,
            depth_texture,
        }
    }
}

const QUAD_ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x2
];

const GRID_ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x4
];

fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

impl Scene for SimpleScene {
    fn init_scene(&mut self) -> Result<(), SceneError> {
        if self.resources.is_some() {
            return Ok(());
        }
        self.resources = Some(self.create_resources());
        tracing::info!(
            format = ?self.target.format(),
            width = self.viewport.0,
            height = self.viewport.1,
            "scene resources created"
        );
        Ok(())
    }

    fn update(&mut self, time: f32) {
        self.model = Mat4::from_rotation_y(time * SPIN_RATE);
    }

    fn draw(&mut self, camera: &Camera) -> Result<(), SceneError> {
        let Some(res) = &self.resources else {
            return Err(SceneError::NotInitialized);
        };

        let (tint, textured) = if self.flags.show_solid {
            (SOLID_TINT, 1.0)
        } else {
            (WIRE_TINT, 0.0)
        };
        self.target.queue.write_buffer(
            &res.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: camera.view_projection().to_cols_array_2d(),
                model: self.model.to_cols_array_2d(),
                tint,
                options: [textured, 0.0, 0.0, 0.0],
            }),
        );

        let frame = match self.target.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost or outdated, reconfiguring");
                self.target.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("surface acquire timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(SceneError::Surface(e.to_string())),
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .target
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.1,
                            b: 0.15,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &res.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &res.bind_group, &[]);

            // Grid floor
            pass.set_pipeline(&res.grid_pipeline);
            pass.set_vertex_buffer(0, res.grid_vertex_buffer.slice(..));
            pass.draw(0..res.grid_vertex_count, 0..1);

            if self.flags.show_quad {
                pass.set_vertex_buffer(0, res.quad_vertex_buffer.slice(..));
                if self.flags.show_solid {
                    pass.set_pipeline(&res.quad_pipeline);
                    pass.set_index_buffer(
                        res.quad_index_buffer.slice(..),
                        wgpu::IndexFormat::Uint16,
                    );
                    pass.draw_indexed(0..res.quad_index_count, 0, 0..1);
                } else {
                    pass.set_pipeline(&res.wire_pipeline);
                    pass.set_index_buffer(
                        res.edge_index_buffer.slice(..),
                        wgpu::IndexFormat::Uint16,
                    );
                    pass.draw_indexed(0..res.edge_index_count, 0, 0..1);
                }
            }
        }

        self.target.queue.submit(std::iter::once(encoder.finish()));
        self.pending_frame = Some(frame);
        Ok(())
    }

    fn present(&mut self) -> Result<(), SceneError> {
        if self.resources.is_none() {
            return Err(SceneError::NotInitialized);
        }
        if let Some(frame) = self.pending_frame.take() {
            frame.present();
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        if let Some(res) = &mut self.resources {
            self.target.resize(width, height);
            res.depth_texture = create_depth_texture(&self.target.device, width, height);
            tracing::debug!(width, height, "scene resized");
        }
    }

    fn show_quad(&mut self, show: bool) {
        self.flags.show_quad = show;
    }

    fn show_solid(&mut self, solid: bool) {
        self.flags.show_solid = solid;
    }

    fn flags(&self) -> RenderFlags {
        self.flags
    }
}
