use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::paint::Color;
use crate::render::{ShaderError, ShaderSources, ShaderStage};
use crate::scene::{Transform, QUAD_INDICES, QUAD_VERTICES};

use super::pass::SquarePass;

/// Identity, applied as a row vector in the vertex shader.
const PROJECTION: Transform = Transform::IDENTITY;

/// Per-instance data: model matrix columns followed by straight-alpha color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SquareInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl SquareInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x4,
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4  // color
    ];

    pub fn new(model: &Transform, color: Color) -> Self {
        Self {
            model: model.columns(),
            color: color.to_array(),
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SquareInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Globals {
    projection: [f32; 16],
}

const QUAD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

fn quad_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &QUAD_ATTRS,
    }
}

/// Square pipeline for one surface format.
///
/// Built eagerly so shader diagnostics surface at startup instead of on the
/// first frame.
pub struct SquareRenderer {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,

    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl SquareRenderer {
    /// Compiles `sources` (WGSL) and builds the pipeline for `format`.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        sources: &ShaderSources,
    ) -> Result<Self, ShaderError> {
        let vs = create_module(device, ShaderStage::Vertex, sources)?;
        let fs = create_module(device, ShaderStage::Fragment, sources)?;

        let globals_size = std::mem::size_of::<Globals>() as u64;
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("squares globals bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(globals_size),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("squares pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("squares pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[quad_layout(), SquareInstance::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let globals = Globals {
            projection: *PROJECTION.as_array(),
        };
        let globals_ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("squares globals ubo"),
            contents: bytemuck::bytes_of(&globals),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("squares globals bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_ubo.as_entire_binding(),
            }],
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("squares quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("squares quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            format,
            pipeline,
            bind_group,
            quad_vbo,
            quad_ibo,
            instance_vbo: None,
            instance_capacity: 0,
        })
    }

    /// Clears the pass target to `clear` and draws `instances` in order.
    pub fn render(&mut self, pass: SquarePass<'_>, clear: Color, instances: &[SquareInstance]) {
        if pass.format != self.format {
            log::warn!(
                "surface format {:?} differs from pipeline format {:?}",
                pass.format,
                self.format
            );
        }

        if !instances.is_empty() {
            self.ensure_instance_capacity(pass.device, instances.len());
        }

        let mut rpass = pass.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("squares pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: pass.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: clear.r as f64,
                        g: clear.g as f64,
                        b: clear.b as f64,
                        a: clear.a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        if instances.is_empty() {
            return;
        }
        pass.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(instances));

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..instances.len() as u32);
    }

    fn ensure_instance_capacity(&mut self, device: &wgpu::Device, required_instances: usize) {
        if required_instances <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let new_cap = required_instances.next_power_of_two().max(4);
        let new_size = (new_cap * std::mem::size_of::<SquareInstance>()) as u64;

        self.instance_vbo = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("squares instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

/// Creates one shader module and turns compiler errors into [`ShaderError`].
///
/// Non-error messages are logged the same way the GL path logs info logs.
fn create_module(
    device: &wgpu::Device,
    stage: ShaderStage,
    sources: &ShaderSources,
) -> Result<wgpu::ShaderModule, ShaderError> {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(match stage {
            ShaderStage::Vertex => "squares vertex shader",
            ShaderStage::Fragment => "squares fragment shader",
        }),
        source: wgpu::ShaderSource::Wgsl(sources.get(stage).to_owned().into()),
    });

    let info = pollster::block_on(module.get_compilation_info());
    let mut errors = Vec::new();
    let mut notes = Vec::new();
    for msg in &info.messages {
        match msg.message_type {
            wgpu::CompilationMessageType::Error => errors.push(msg.message.as_str()),
            _ => notes.push(msg.message.as_str()),
        }
    }

    if !errors.is_empty() {
        return Err(ShaderError::Compile {
            stage,
            log: errors.join("\n"),
        });
    }

    log::info!("{stage} shader info: {}", notes.join("\n"));
    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<SquareInstance>(), 80);
        assert_eq!(std::mem::size_of::<Globals>(), 64);
    }

    #[test]
    fn instance_carries_model_columns_and_color() {
        let model = Transform::translate_scale(1.0, -1.0, 1.0);
        let inst = SquareInstance::new(&model, Color::MAGENTA);
        assert_eq!(inst.model[3], [1.0, -1.0, 0.0, 1.0]);
        assert_eq!(inst.model[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(inst.color, [1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn index_buffer_draws_the_fan_as_two_triangles() {
        assert_eq!(QUAD_INDICES, [0, 1, 2, 0, 2, 3]);
    }
}
