// crates/engine_core/src/renderer/sprite_pass.rs
use std::num::NonZeroU64;
use std::ops::Range;

use engine_shared::{Color, TextureId};
use tracing::trace;
use wgpu::util::{DeviceExt, StagingBelt};

use super::context::GraphicsContext;
use super::sprite_batch::RecordedFrame;
use super::textures::TextureStore;
use super::types::{CameraUniform, SpriteInstance};

const DEFAULT_CLEAR: Color = Color::rgba(0.1, 0.2, 0.3, 1.0);

/// One uniform buffer per draw scope; grown on demand and reused.
struct CameraSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// A contiguous run of instances sharing a texture within one scope.
struct DrawRun {
    scope: usize,
    texture: TextureId,
    instances: Range<u32>,
}

pub struct SpritePass {
    render_pipeline: wgpu::RenderPipeline,
    camera_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    camera_slots: Vec<CameraSlot>,
    instance_buffer: wgpu::Buffer,
    staging_belt: StagingBelt,
}

impl SpritePass {
    pub fn new(ctx: &GraphicsContext) -> Self {
        let camera_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
                label: Some("camera_bind_group_layout"),
            });
        let texture_layout = TextureStore::bind_group_layout(&ctx.device);

        let shader = ctx
            .device
            .create_shader_module(wgpu::include_wgsl!("../../../../assets/shaders/sprite.wgsl"));

        let render_pipeline_layout = ctx.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Sprite Pipeline Layout"),
                bind_group_layouts: &[&camera_layout, &texture_layout],
                push_constant_ranges: &[],
            },
        );

        let render_pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[SpriteInstance::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let instance_data = vec![
            SpriteInstance {
                rect: [0.0; 4],
                uv_rect: [0.0; 4],
                color: [0.0; 4],
            };
            256
        ];
        let instance_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Instance Buffer"),
            contents: bytemuck::cast_slice(&instance_data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            render_pipeline,
            camera_layout,
            texture_layout,
            camera_slots: Vec::new(),
            instance_buffer,
            staging_belt: StagingBelt::new(16 * 1024),
        }
    }

    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }

    fn ensure_camera_slots(&mut self, ctx: &GraphicsContext, count: usize) {
        while self.camera_slots.len() < count {
            let buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[CameraUniform::default()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &self.camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("camera_bind_group"),
            });
            self.camera_slots.push(CameraSlot { buffer, bind_group });
        }
    }

    pub fn draw(
        &mut self,
        ctx: &GraphicsContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        frame: &RecordedFrame,
        textures: &TextureStore,
    ) {
        // Flatten scopes into one instance stream plus per-texture runs.
        let mut instances = Vec::with_capacity(frame.sprite_count());
        let mut runs: Vec<DrawRun> = Vec::new();
        for (scope_index, scope) in frame.scopes.iter().enumerate() {
            for sprite in &scope.sprites {
                let index = instances.len() as u32;
                match runs.last_mut() {
                    Some(run) if run.scope == scope_index && run.texture == sprite.texture => {
                        run.instances.end = index + 1;
                    }
                    _ => runs.push(DrawRun {
                        scope: scope_index,
                        texture: sprite.texture,
                        instances: index..index + 1,
                    }),
                }
                instances.push(sprite.instance);
            }
        }

        // Cameras
        self.ensure_camera_slots(ctx, frame.scopes.len());
        for (slot, scope) in self.camera_slots.iter().zip(&frame.scopes) {
            let uniform = CameraUniform {
                view_proj: scope.projection.to_cols_array_2d(),
            };
            ctx.queue.write_buffer(&slot.buffer, 0, bytemuck::cast_slice(&[uniform]));
        }

        let instance_bytes: &[u8] = bytemuck::cast_slice(&instances);
        let required_size = instance_bytes.len() as wgpu::BufferAddress;

        // Resize buffer if needed
        if required_size > self.instance_buffer.size() {
            let old_size = self.instance_buffer.size().max(256);
            self.instance_buffer.destroy();

            let mut new_size = (required_size * 2).max(old_size);
            new_size = wgpu::util::align_to(new_size, 4);

            self.instance_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Instance Buffer"),
                size: new_size,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }

        // Upload data using staging belt
        if let Some(size) = NonZeroU64::new(required_size) {
            let mut buffer_view = self.staging_belt.write_buffer(
                encoder,
                &self.instance_buffer,
                0,
                size,
                &ctx.device,
            );
            buffer_view.copy_from_slice(instance_bytes);
        }

        self.staging_belt.finish();

        let clear = frame.clear_color.unwrap_or(DEFAULT_CLEAR);
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Sprite Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
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
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if runs.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, self.instance_buffer.slice(0..required_size));

        let mut bound_scope = None;
        for run in &runs {
            let Some(texture) = textures.bind_group(run.texture) else {
                trace!(texture = run.texture.0, "texture not uploaded yet; skipping run");
                continue;
            };
            if bound_scope != Some(run.scope) {
                render_pass.set_bind_group(0, &self.camera_slots[run.scope].bind_group, &[]);
                bound_scope = Some(run.scope);
            }
            render_pass.set_bind_group(1, texture, &[]);
            render_pass.draw(0..4, run.instances.clone());
        }

        // Note: we can't recall() the belt here because we just finished() it.
        // It must be recalled after submission, which happens in the main renderer.
    }

    pub fn cleanup(&mut self) {
        self.staging_belt.recall();
    }
}
