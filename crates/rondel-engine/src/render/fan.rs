use bytemuck::{Pod, Zeroable};
use rondel_shader::{ShaderSource, ShaderStage};
use wgpu::util::DeviceExt;

use crate::coords::Vec2;
use crate::geometry::FanMesh;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::shader::{validate_stage, UNIFORM_BINDING, UNIFORM_GROUP};

const VS_ENTRY: &str = "vs_main";
const FS_ENTRY: &str = "fs_main";

/// Uniform block shared by both stages (32 bytes):
///
///  offset  0  color   [f32; 4]
///  offset 16  offset  [f32; 2]
///  offset 24  _pad    [f32; 2]
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FanUniform {
    pub color: [f32; 4],
    pub offset: [f32; 2],
    pub _pad: [f32; 2],
}

impl FanUniform {
    #[inline]
    pub fn new(color: Color, offset: Vec2) -> Self {
        Self {
            color: color.to_array(),
            offset: offset.to_array(),
            _pad: [0.0; 2],
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum PipelineState {
    Pending,
    Ready,
    /// A stage failed to compile; drawing is skipped for the renderer's lifetime.
    Unusable,
}

/// Draws one static triangle-fan mesh with a color + translation uniform.
///
/// Vertex and index buffers are uploaded once on first use and never
/// rewritten. The uniform buffer is rewritten every frame.
pub struct FanRenderer {
    mesh: FanMesh,
    source: ShaderSource,

    state: PipelineState,
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
    ibo: Option<wgpu::Buffer>,
}

impl FanRenderer {
    pub fn new(mesh: FanMesh, source: ShaderSource) -> Self {
        Self {
            mesh,
            source,
            state: PipelineState::Pending,
            pipeline_format: None,
            pipeline: None,
            bind_group: None,
            uniform_ubo: None,
            vbo: None,
            ibo: None,
        }
    }

    pub fn mesh(&self) -> &FanMesh {
        &self.mesh
    }

    /// False once a shader stage has failed to compile.
    pub fn is_usable(&self) -> bool {
        self.state != PipelineState::Unusable
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        color: Color,
        offset: Vec2,
    ) {
        self.ensure_pipeline(ctx);
        if self.state != PipelineState::Ready || self.mesh.indices.is_empty() {
            return;
        }
        self.ensure_static_buffers(ctx);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };
        let Some(ibo) = self.ibo.as_ref() else { return };

        ctx.queue
            .write_buffer(ubo, 0, bytemuck::bytes_of(&FanUniform::new(color, offset)));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("rondel fan pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(UNIFORM_GROUP, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.mesh.indices.len() as u32, 0, 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        match self.state {
            PipelineState::Unusable => return,
            PipelineState::Ready if self.pipeline_format == Some(ctx.surface_format) => return,
            _ => {}
        }

        let stages = [
            (ShaderStage::Vertex, VS_ENTRY, false),
            (ShaderStage::Fragment, FS_ENTRY, true),
        ];
        for (stage, entry, needs_uniform) in stages {
            if let Err(diag) = validate_stage(stage, self.source.stage(stage), entry, needs_uniform) {
                log::error!("{diag}");
                self.state = PipelineState::Unusable;
                return;
            }
        }

        let vs = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("rondel fan vertex shader"),
            source: wgpu::ShaderSource::Wgsl(self.source.vertex.as_str().into()),
        });
        let fs = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("rondel fan fragment shader"),
            source: wgpu::ShaderSource::Wgsl(self.source.fragment.as_str().into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("rondel fan bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: UNIFORM_BINDING,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<FanUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("rondel fan pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("rondel fan pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(VS_ENTRY),
                compilation_options: Default::default(),
                buffers: &[position_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(FS_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            // The index buffer lists every fan triangle explicitly.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("rondel fan uniform ubo"),
            size: std::mem::size_of::<FanUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("rondel fan bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: UNIFORM_BINDING,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        log::debug!("fan pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.uniform_ubo = Some(uniform_ubo);
        self.bind_group = Some(bind_group);
        self.state = PipelineState::Ready;
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.vbo.is_some() && self.ibo.is_some() {
            return;
        }

        self.vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("rondel fan vbo"),
            contents: bytemuck::cast_slice(&self.mesh.positions),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("rondel fan ibo"),
            contents: bytemuck::cast_slice(&self.mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));

        log::debug!(
            "uploaded fan mesh: {} vertices, {} triangles",
            self.mesh.vertex_count(),
            self.mesh.triangle_count()
        );
    }
}

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (2 * std::mem::size_of::<f32>()) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_ATTRS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_std140_sized() {
        assert_eq!(std::mem::size_of::<FanUniform>(), 32);
        assert_eq!(std::mem::align_of::<FanUniform>(), 4);
    }

    #[test]
    fn uniform_byte_layout() {
        let u = FanUniform::new(Color::from_premul(0.5, 0.2, 0.3, 1.0), Vec2::new(0.25, -0.5));
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&u));
        assert_eq!(floats, [0.5, 0.2, 0.3, 1.0, 0.25, -0.5, 0.0, 0.0]);
    }

    #[test]
    fn position_layout_matches_flat_buffer() {
        let layout = position_layout();
        assert_eq!(layout.array_stride, 8);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x2);
    }
}
