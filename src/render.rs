use crate::constants::{
    AMBIENT, CLEAR_COLOR, DISC_SEGMENTS, FOG_COLOR, FOG_FAR, FOG_NEAR, GROUND_COLOR,
    GROUND_HALF_EXTENT, LEAF_CURVE_STEPS, LIGHT_DIR, LIGHT_TINT, PRISM_SIDES, VIGNETTE_DARKNESS,
    VIGNETTE_OFFSET,
};
use glam::{Mat4, Vec3};
use portal_core::{Camera, ForestInstances, Instance};
use web_sys as web;

mod helpers;
pub(crate) mod mesh;
mod targets;
use helpers::GpuMesh;
use targets::DepthTarget;

const FOREST_WGSL: &str = include_str!("../shaders/forest.wgsl");

/// Per-instance data as laid out in the instance vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceRaw {
    model: [[f32; 4]; 4],
    color_emissive: [f32; 4],
    params: [f32; 4], // top taper, opacity, unlit flag, unused
}

impl From<&Instance> for InstanceRaw {
    fn from(i: &Instance) -> Self {
        Self {
            model: i.model.to_cols_array_2d(),
            color_emissive: [i.color[0], i.color[1], i.color[2], i.emissive],
            params: [i.taper, i.opacity, if i.unlit { 1.0 } else { 0.0 }, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    fog_color: [f32; 4],
    fog: [f32; 4], // near, far, vignette offset, vignette darkness
    light: [f32; 4], // direction xyz, ambient
    light_tint: [f32; 4],
    resolution: [f32; 4],
}

/// Growable instance buffer; reallocated only when a frame needs more room.
struct InstanceBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: usize) -> Self {
        Self {
            label,
            buffer: Self::alloc(device, label, capacity),
            capacity: capacity.max(1),
            len: 0,
        }
    }

    fn alloc(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity.max(1) * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[InstanceRaw]) {
        if data.len() > self.capacity {
            self.capacity = data.len().next_power_of_two();
            self.buffer = Self::alloc(device, self.label, self.capacity);
            log::debug!("[gpu] {} grown to {}", self.label, self.capacity);
        }
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.len = data.len() as u32;
    }
}

pub struct ForestRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    blend_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    prism: GpuMesh,
    leaf: GpuMesh,
    ground: GpuMesh,
    disc: GpuMesh,
    diamond: GpuMesh,
    segments: InstanceBuffer,
    leaves: InstanceBuffer,
    mist: InstanceBuffer,
    sparkles: InstanceBuffer,
    ground_instance: InstanceBuffer,
    depth: DepthTarget,
    staging: Vec<InstanceRaw>,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    view_proj: Mat4,
    eye: Vec3,
}

impl ForestRenderer {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits on web avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("forest_shader"),
            source: wgpu::ShaderSource::Wgsl(FOREST_WGSL.into()),
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("forest_globals"),
            size: std::mem::size_of::<Globals>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("forest_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("forest_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("forest_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_scene_pipeline(&device, &layout, &shader, format, None);
        let blend_pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            &shader,
            format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
        );

        let prism = helpers::upload_mesh(&device, "prism_mesh", &mesh::unit_prism(PRISM_SIDES));
        let leaf = helpers::upload_mesh(
            &device,
            "leaf_mesh",
            &mesh::unit_leaf(LEAF_CURVE_STEPS),
        );
        let ground = helpers::upload_mesh(
            &device,
            "ground_mesh",
            &mesh::ground_quad(GROUND_HALF_EXTENT),
        );
        let disc = helpers::upload_mesh(&device, "disc_mesh", &mesh::unit_disc(DISC_SEGMENTS));
        let diamond = helpers::upload_mesh(&device, "diamond_mesh", &mesh::unit_diamond());

        let mut ground_instance = InstanceBuffer::new(&device, "ground_instance", 1);
        ground_instance.write(
            &device,
            &queue,
            &[InstanceRaw::from(&Instance::solid(
                Mat4::IDENTITY,
                GROUND_COLOR,
                1.0,
            ))],
        );

        let segments = InstanceBuffer::new(&device, "segment_instances", 256);
        let leaves = InstanceBuffer::new(&device, "leaf_instances", 512);
        let mist = InstanceBuffer::new(&device, "mist_instances", 4);
        let sparkles = InstanceBuffer::new(&device, "sparkle_instances", 128);
        let depth = DepthTarget::new(&device, width, height);

        log::info!("[gpu] forest renderer ready {}x{} {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            blend_pipeline,
            globals_buffer,
            globals_bind_group,
            prism,
            leaf,
            ground,
            disc,
            diamond,
            segments,
            leaves,
            mist,
            sparkles,
            ground_instance,
            depth,
            staging: Vec::new(),
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
            view_proj: Mat4::IDENTITY,
            eye: Vec3::ZERO,
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Reapply the surface config, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.depth.recreate(&self.device, self.width, self.height);
    }

    pub fn set_camera(&mut self, camera: &Camera) {
        self.view_proj = camera.view_projection();
        self.eye = camera.eye;
    }

    pub fn upload_instances(&mut self, instances: &ForestInstances) {
        self.staging.clear();
        self.staging
            .extend(instances.segments.iter().map(InstanceRaw::from));
        self.segments.write(&self.device, &self.queue, &self.staging);

        self.staging.clear();
        self.staging.extend(instances.leaves.iter().map(InstanceRaw::from));
        self.leaves.write(&self.device, &self.queue, &self.staging);

        self.staging.clear();
        self.staging.extend(instances.mist.iter().map(InstanceRaw::from));
        self.mist.write(&self.device, &self.queue, &self.staging);

        self.staging.clear();
        self.staging
            .extend(instances.sparkles.iter().map(InstanceRaw::from));
        self.sparkles.write(&self.device, &self.queue, &self.staging);
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let globals = Globals {
            view_proj: self.view_proj.to_cols_array_2d(),
            eye: self.eye.extend(1.0).to_array(),
            fog_color: [FOG_COLOR[0], FOG_COLOR[1], FOG_COLOR[2], 1.0],
            fog: [FOG_NEAR, FOG_FAR, VIGNETTE_OFFSET, VIGNETTE_DARKNESS],
            light: [LIGHT_DIR[0], LIGHT_DIR[1], LIGHT_DIR[2], AMBIENT],
            light_tint: [LIGHT_TINT[0], LIGHT_TINT[1], LIGHT_TINT[2], 1.0],
            resolution: [self.width as f32, self.height as f32, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("forest_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.set_pipeline(&self.pipeline);
            for (mesh, instances) in [
                (&self.ground, &self.ground_instance),
                (&self.prism, &self.segments),
                (&self.leaf, &self.leaves),
            ] {
                draw_instanced(&mut rpass, mesh, instances);
            }
            // Translucent layers test against the opaque depth but never write it
            rpass.set_pipeline(&self.blend_pipeline);
            for (mesh, instances) in [(&self.disc, &self.mist), (&self.diamond, &self.sparkles)] {
                draw_instanced(&mut rpass, mesh, instances);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn draw_instanced(rpass: &mut wgpu::RenderPass<'_>, mesh: &GpuMesh, instances: &InstanceBuffer) {
    if instances.len == 0 {
        return;
    }
    rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
    rpass.set_vertex_buffer(1, instances.buffer.slice(..));
    rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
    rpass.draw_indexed(0..mesh.index_count, 0, 0..instances.len);
}
