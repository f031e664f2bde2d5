//! [`GpuBackend`] on a wgpu window surface.
//!
//! The backend contract is immediate-mode (bind, set uniform, draw), while
//! wgpu records one render pass per frame. Each draw therefore snapshots
//! the bound program's uniforms into per-slot buffers addressed by dynamic
//! offset, and appends its points to one shared vertex buffer. The pass is
//! encoded and presented in [`end_frame`](GpuBackend::end_frame).

use std::borrow::Cow;
use std::collections::HashMap;
use std::num::NonZeroU64;

use glam::Mat4;

use super::backend::{GpuBackend, PointDraw, ProgramHandle, UniformLocation};
use super::dynamic_buffer::{DynamicBuffer, TypedBuffer};
use super::program::{CompileError, CompiledProgram, ProgramTable, UniformValue};
use super::render_context::RenderContext;
use super::texture::{DepthTarget, DEPTH_FORMAT};
use crate::geometry::{Color, Vertex};

/// Byte offset of [`Vertex::color`] within a vertex.
const COLOR_OFFSET: u64 = 12;

/// GPU objects owned by one compiled program.
struct GpuProgram {
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
    vertex_entry: String,
    fragment_entry: String,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    uniforms: Vec<UniformStream>,
}

/// Per-frame uniform values for one slot, one aligned record per draw.
struct UniformStream {
    binding: u32,
    size: u32,
    buffer: DynamicBuffer,
    staging: Vec<u8>,
}

/// Pipelines differ by program and by which attributes are fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PipelineKey {
    program: ProgramHandle,
    position: u32,
    color: Option<u32>,
}

struct PendingDraw {
    key: PipelineKey,
    first: u32,
    count: u32,
    offsets: Vec<u32>,
}

/// Draw state accumulated between `begin_frame` and `end_frame`.
struct FrameData {
    clear: Color,
    vertices: Vec<Vertex>,
    draws: Vec<PendingDraw>,
}

impl FrameData {
    fn new() -> Self {
        Self {
            clear: Color::new(0.0, 0.0, 0.0, 1.0),
            vertices: Vec::new(),
            draws: Vec::new(),
        }
    }
}

/// Renders point batches to a window surface.
pub struct WgpuBackend {
    context: RenderContext,
    depth: DepthTarget,
    programs: ProgramTable,
    gpu_programs: Vec<GpuProgram>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    vertices: TypedBuffer<Vertex>,
    uniform_alignment: usize,
    frame: FrameData,
}

impl WgpuBackend {
    /// Backend drawing to `context`'s surface.
    #[must_use]
    pub fn new(context: RenderContext) -> Self {
        let (width, height) = context.size();
        let depth = DepthTarget::new(&context.device, width, height);
        let vertices = TypedBuffer::with_capacity(
            &context.device,
            "Point Vertices",
            4096,
            wgpu::BufferUsages::VERTEX,
        );
        let uniform_alignment =
            context.device.limits().min_uniform_buffer_offset_alignment as usize;
        Self {
            context,
            depth,
            programs: ProgramTable::default(),
            gpu_programs: Vec::new(),
            pipelines: HashMap::new(),
            vertices,
            uniform_alignment,
            frame: FrameData::new(),
        }
    }

    /// The underlying device/surface context.
    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    fn create_program(&self, program: &CompiledProgram) -> GpuProgram {
        let device = &self.context.device;
        let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Point Vertex Shader"),
            source: wgpu::ShaderSource::Naga(Cow::Owned(program.vertex.clone())),
        });
        let fragment =
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Point Fragment Shader"),
                source: wgpu::ShaderSource::Naga(Cow::Owned(
                    program.fragment.clone(),
                )),
            });

        let layout_entries: Vec<wgpu::BindGroupLayoutEntry> = program
            .uniforms()
            .iter()
            .map(|slot| wgpu::BindGroupLayoutEntry {
                binding: slot.binding,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(u64::from(slot.size)),
                },
                count: None,
            })
            .collect();
        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Point Uniform Layout"),
                entries: &layout_entries,
            });
        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Point Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let uniforms = program
            .uniforms()
            .iter()
            .map(|slot| UniformStream {
                binding: slot.binding,
                size: slot.size,
                buffer: DynamicBuffer::new(
                    device,
                    &format!("Uniform {}", slot.name),
                    self.uniform_alignment * 8,
                    wgpu::BufferUsages::UNIFORM,
                ),
                staging: Vec::new(),
            })
            .collect();

        GpuProgram {
            vertex,
            fragment,
            vertex_entry: program.vertex_entry.clone(),
            fragment_entry: program.fragment_entry.clone(),
            bind_group_layout,
            pipeline_layout,
            uniforms,
        }
    }

    fn create_pipeline(&self, key: PipelineKey) -> wgpu::RenderPipeline {
        let program = &self.gpu_programs[key.program.0];
        let mut attributes = vec![wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: key.position,
        }];
        if let Some(location) = key.color {
            attributes.push(wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: COLOR_OFFSET,
                shader_location: location,
            });
        }
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        }];

        self.context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Point Pipeline"),
                layout: Some(&program.pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &program.vertex,
                    entry_point: Some(program.vertex_entry.as_str()),
                    buffers: &buffers,
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &program.fragment,
                    entry_point: Some(program.fragment_entry.as_str()),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.context.format(),
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::PointList,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }

    /// Check that the draw feeds exactly the inputs the program reads.
    fn pipeline_key(
        &self,
        program: ProgramHandle,
        draw: &PointDraw<'_>,
    ) -> Option<PipelineKey> {
        let compiled = self.programs.get(program)?;
        let position = draw.position.index()?;
        let color = draw.color.index();
        if color == Some(position) {
            return None;
        }
        let fed = |location: u32| location == position || color == Some(location);
        if !compiled.attribute_locations().all(fed) {
            return None;
        }
        // a color stream the program never reads is dropped from the layout
        let color =
            color.filter(|c| compiled.attribute_locations().any(|l| l == *c));
        Some(PipelineKey {
            program,
            position,
            color,
        })
    }

    /// Append the bound program's current uniform values to its streams and
    /// return the dynamic offsets addressing them.
    fn snapshot_uniforms(&mut self, program: ProgramHandle) -> Vec<u32> {
        let align = self.uniform_alignment;
        let gpu = &mut self.gpu_programs[program.0];
        let mut offsets = Vec::with_capacity(gpu.uniforms.len());
        for stream in &mut gpu.uniforms {
            let offset = stream.staging.len();
            let record = (stream.size as usize).div_ceil(align) * align;
            match self.programs.uniform_value(program, stream.binding) {
                Some(value) => stream.staging.extend(value.to_bytes()),
                None => stream.staging.resize(offset + stream.size as usize, 0),
            }
            stream.staging.resize(offset + record, 0);
            offsets.push(offset as u32);
        }
        offsets
    }

    fn encode_and_present(&mut self, surface: wgpu::SurfaceTexture) {
        let device = &self.context.device;
        let queue = &self.context.queue;
        let _ = self.vertices.write(device, queue, &self.frame.vertices);

        let mut bind_groups = Vec::with_capacity(self.gpu_programs.len());
        for program in &mut self.gpu_programs {
            for stream in &mut program.uniforms {
                let _ = stream.buffer.write_bytes(device, queue, &stream.staging);
            }
            bind_groups.push(create_bind_group(device, program));
        }

        let view = surface
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Point Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.frame.clear.into()),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });

            if !self.frame.vertices.is_empty() {
                pass.set_vertex_buffer(0, self.vertices.buffer().slice(..));
            }
            for draw in &self.frame.draws {
                let Some(pipeline) = self.pipelines.get(&draw.key) else {
                    continue;
                };
                pass.set_pipeline(pipeline);
                pass.set_bind_group(
                    0,
                    &bind_groups[draw.key.program.0],
                    &draw.offsets,
                );
                pass.draw(draw.first..draw.first + draw.count, 0..1);
            }
        }
        self.context.submit(encoder);
        surface.present();
    }

    fn reset_frame(&mut self) {
        self.frame.vertices.clear();
        self.frame.draws.clear();
        for program in &mut self.gpu_programs {
            for stream in &mut program.uniforms {
                stream.staging.clear();
            }
        }
    }
}

fn create_bind_group(
    device: &wgpu::Device,
    program: &GpuProgram,
) -> wgpu::BindGroup {
    let entries: Vec<wgpu::BindGroupEntry<'_>> = program
        .uniforms
        .iter()
        .map(|stream| wgpu::BindGroupEntry {
            binding: stream.binding,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: stream.buffer.buffer(),
                offset: 0,
                size: NonZeroU64::new(u64::from(stream.size)),
            }),
        })
        .collect();
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Point Uniforms"),
        layout: &program.bind_group_layout,
        entries: &entries,
    })
}

impl GpuBackend for WgpuBackend {
    type FrameError = wgpu::SurfaceError;

    fn programs(&self) -> &ProgramTable {
        &self.programs
    }

    fn compile_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramHandle, CompileError> {
        let program = CompiledProgram::compile(vertex_source, fragment_source)?;
        let gpu = self.create_program(&program);
        self.gpu_programs.push(gpu);
        let handle = self.programs.insert(program);
        log::debug!("compiled program {handle:?}");
        Ok(handle)
    }

    fn begin_frame(&mut self, clear: Color) {
        self.reset_frame();
        self.frame.clear = clear;
    }

    fn bind(&mut self, program: ProgramHandle) {
        let _ = self.programs.bind(program);
    }

    fn release(&mut self) {
        self.programs.release();
    }

    fn set_uniform_matrix4(&mut self, location: UniformLocation, matrix: &Mat4) {
        let _ = self
            .programs
            .set_uniform(location, UniformValue::Mat4(*matrix));
    }

    fn set_uniform_color(&mut self, location: UniformLocation, color: Color) {
        let _ = self.programs.set_uniform(location, UniformValue::Color(color));
    }

    fn draw_points(&mut self, draw: PointDraw<'_>) {
        if draw.vertices.is_empty() {
            return;
        }
        let Some(program) = self.programs.bound() else {
            log::warn!("draw_points with no program bound");
            return;
        };
        let Some(key) = self.pipeline_key(program, &draw) else {
            log::warn!(
                "draw_points attributes ({:?}, {:?}) do not match program \
                 {program:?}",
                draw.position,
                draw.color
            );
            return;
        };
        if !self.pipelines.contains_key(&key) {
            let pipeline = self.create_pipeline(key);
            let _ = self.pipelines.insert(key, pipeline);
        }
        let offsets = self.snapshot_uniforms(program);
        let first = self.frame.vertices.len() as u32;
        self.frame.vertices.extend_from_slice(draw.vertices);
        self.frame.draws.push(PendingDraw {
            key,
            first,
            count: draw.vertices.len() as u32,
            offsets,
        });
    }

    fn end_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let result = self
            .context
            .get_next_frame()
            .map(|surface| self.encode_and_present(surface));
        self.reset_frame();
        result
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth = DepthTarget::new(&self.context.device, width, height);
        log::debug!("surface resized to {width}x{height}");
    }
}

