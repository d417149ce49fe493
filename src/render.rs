use crate::atmosphere::Atmosphere;
use crate::camera::Camera;
use crate::constants::{DIRECTIONAL_LIGHT_POS, MAX_DRAW_ITEMS, MAX_POINT_LIGHTS};
use crate::scene::draw_list::{DrawItem, DrawList};
use crate::scene::{srgb_to_linear, Color, ShapeKey, Surface};
use crate::textures::{TextureId, TextureRegistry};
use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
mod targets;
use targets::DepthTarget;

const SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlobalUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    fog_color: [f32; 4],
    fog_params: [f32; 4],
    ambient: [f32; 4],
    dir_light_dir: [f32; 4],
    dir_light_color: [f32; 4],
    light_count: [u32; 4],
    point_pos: [[f32; 4]; MAX_POINT_LIGHTS],
    point_color: [[f32; 4]; MAX_POINT_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceUniforms {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    color: [f32; 4],
    emissive: [f32; 4],
    params: [f32; 4],
    extra: [f32; 4],
    sky_top: [f32; 4],
    sky_bottom: [f32; 4],
}

impl InstanceUniforms {
    fn from_item(item: &DrawItem) -> Self {
        let s: &Surface = &item.surface;
        let normal = if item.model.determinant().abs() > 1e-12 {
            item.model.inverse().transpose()
        } else {
            item.model
        };
        let [r, g, b] = s.color.to_linear();
        let [er, eg, eb] = s.emissive.scaled(s.emissive_intensity);
        let (sky_top, sky_bottom) = match s.sky {
            Some(sky) => {
                let [tr, tg, tb] = sky.top.map(srgb_to_linear);
                let [br, bg, bb] = sky.bottom.map(srgb_to_linear);
                ([tr, tg, tb, sky.offset], [br, bg, bb, sky.exponent])
            }
            None => ([0.0; 4], [0.0; 4]),
        };
        Self {
            model: item.model.to_cols_array_2d(),
            normal_matrix: normal.to_cols_array_2d(),
            color: [r, g, b, s.opacity],
            emissive: [er, eg, eb, 0.0],
            params: [
                s.shading as u32 as f32,
                s.texture.is_some() as u32 as f32,
                s.metalness,
                s.roughness,
            ],
            extra: [
                s.uv_repeat[0],
                s.uv_repeat[1],
                if s.fog { 1.0 } else { 0.0 },
                0.0,
            ],
            sky_top,
            sky_bottom,
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,

    opaque_pipeline: wgpu::RenderPipeline,
    blend_pipeline: wgpu::RenderPipeline,

    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_bg: wgpu::BindGroup,
    instance_stride: u64,
    instance_staging: Vec<u8>,

    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white_bg: wgpu::BindGroup,
    textures: FnvHashMap<TextureId, wgpu::BindGroup>,
    meshes: FnvHashMap<ShapeKey, GpuMesh>,

    width: u32,
    height: u32,
    overflow_logged: bool,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

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
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
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
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth = DepthTarget::new(&device, config.width, config.height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_wgsl"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });

        // Group 0: per-frame globals
        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_layout"),
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
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals_ub"),
            size: std::mem::size_of::<GlobalUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        // Group 1: per-draw instance data, one aligned slot per item
        let instance_size = std::mem::size_of::<InstanceUniforms>() as u64;
        let instance_stride = helpers::align_to(
            instance_size,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let instance_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("instance_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(instance_size),
                },
                count: None,
            }],
        });
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_ub"),
            size: instance_stride * MAX_DRAW_ITEMS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let instance_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("instance_bg"),
            layout: &instance_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &instance_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(instance_size),
                }),
            }],
        });

        // Group 2: base color texture
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_layout"),
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
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("repeat_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let (_white_tex, white_view) =
            helpers::create_rgba_texture(&device, &queue, "white_tex", 1, 1, &[255; 4]);
        let white_bg = make_texture_bind_group(&device, &texture_layout, &white_view, &sampler);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&globals_layout, &instance_layout, &texture_layout],
            push_constant_ranges: &[],
        });
        let opaque_pipeline = helpers::make_scene_pipeline(
            &device,
            "opaque_pipeline",
            &pipeline_layout,
            &shader,
            format,
            None,
            true,
        );
        let blend_pipeline = helpers::make_scene_pipeline(
            &device,
            "blend_pipeline",
            &pipeline_layout,
            &shader,
            format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
        );

        log::info!("[gpu] surface {}x{} format {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            opaque_pipeline,
            blend_pipeline,
            globals_buffer,
            globals_bg,
            instance_buffer,
            instance_bg,
            instance_stride,
            instance_staging: Vec::new(),
            texture_layout,
            sampler,
            white_bg,
            textures: FnvHashMap::default(),
            meshes: FnvHashMap::default(),
            width,
            height,
            overflow_logged: false,
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth.recreate(&self.device, width, height);
        }
    }

    /// Move freshly decoded textures to the GPU. Materials start sampling
    /// them on the next draw-list rebuild.
    pub fn upload_textures(&mut self, registry: &mut TextureRegistry) {
        for (id, image) in registry.drain_uploads() {
            let label = registry.url(id).unwrap_or("texture");
            let (_tex, view) = helpers::create_rgba_texture(
                &self.device,
                &self.queue,
                label,
                image.width,
                image.height,
                &image.rgba,
            );
            let bg = make_texture_bind_group(&self.device, &self.texture_layout, &view, &self.sampler);
            self.textures.insert(id, bg);
            log::debug!("[gpu] uploaded {} ({}x{})", label, image.width, image.height);
        }
    }

    pub fn render(
        &mut self,
        list: &DrawList,
        atmosphere: &Atmosphere,
        camera: &Camera,
    ) -> Result<(), wgpu::SurfaceError> {
        let globals = self.globals(list, atmosphere, camera);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let count = list.len().min(MAX_DRAW_ITEMS);
        if count < list.len() && !self.overflow_logged {
            log::warn!("[gpu] {} draw items exceed the {} slot budget", list.len(), MAX_DRAW_ITEMS);
            self.overflow_logged = true;
        }
        self.write_instances(list.items().take(count));
        for item in list.items().take(count) {
            let device = &self.device;
            self.meshes
                .entry(item.shape.key())
                .or_insert_with(|| upload_mesh(device, item));
        }

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
            let [r, g, b] = atmosphere.background.map(srgb_to_linear);
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
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
            rpass.set_bind_group(0, &self.globals_bg, &[]);

            let opaque = list.opaque.len().min(count);
            rpass.set_pipeline(&self.opaque_pipeline);
            for (slot, item) in list.opaque.iter().take(opaque).enumerate() {
                self.draw_item(&mut rpass, slot, item);
            }
            rpass.set_pipeline(&self.blend_pipeline);
            for (i, item) in list.transparent.iter().take(count - opaque).enumerate() {
                self.draw_item(&mut rpass, opaque + i, item);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn draw_item(&self, rpass: &mut wgpu::RenderPass<'_>, slot: usize, item: &DrawItem) {
        let Some(mesh) = self.meshes.get(&item.shape.key()) else {
            return;
        };
        let texture_bg = item
            .surface
            .texture
            .and_then(|id| self.textures.get(&id))
            .unwrap_or(&self.white_bg);
        let offset = (slot as u64 * self.instance_stride) as u32;
        rpass.set_bind_group(1, &self.instance_bg, &[offset]);
        rpass.set_bind_group(2, texture_bg, &[]);
        rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn write_instances<'i>(&mut self, items: impl Iterator<Item = &'i DrawItem>) {
        let stride = self.instance_stride as usize;
        self.instance_staging.clear();
        for (slot, item) in items.enumerate() {
            let start = slot * stride;
            self.instance_staging.resize(start + stride, 0);
            let data = InstanceUniforms::from_item(item);
            let bytes = bytemuck::bytes_of(&data);
            self.instance_staging[start..start + bytes.len()].copy_from_slice(bytes);
        }
        if !self.instance_staging.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, &self.instance_staging);
        }
    }

    fn globals(&self, list: &DrawList, atmosphere: &Atmosphere, camera: &Camera) -> GlobalUniforms {
        let mut point_pos = [[0.0; 4]; MAX_POINT_LIGHTS];
        let mut point_color = [[0.0; 4]; MAX_POINT_LIGHTS];
        let lights = list.lights.len().min(MAX_POINT_LIGHTS);
        for (i, light) in list.lights.iter().take(lights).enumerate() {
            point_pos[i] = light.position.extend(1.0).to_array();
            let [r, g, b] = light.color.scaled(light.intensity);
            point_color[i] = [r, g, b, 0.0];
        }
        let [fr, fg, fb] = atmosphere.fog_color().map(srgb_to_linear);
        let ambient = Color::WHITE.scaled(atmosphere.ambient_intensity);
        let sun = Color::WHITE.scaled(atmosphere.directional_intensity);
        let sun_dir = Vec3::from_array(DIRECTIONAL_LIGHT_POS).normalize_or_zero();
        let view_proj: Mat4 = camera.view_proj(self.aspect());
        GlobalUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            fog_color: [fr, fg, fb, 1.0],
            fog_params: [atmosphere.fog_near, atmosphere.fog_far, 0.0, 0.0],
            ambient: [ambient[0], ambient[1], ambient[2], 0.0],
            dir_light_dir: sun_dir.extend(0.0).to_array(),
            dir_light_color: [sun[0], sun[1], sun[2], 0.0],
            light_count: [lights as u32, 0, 0, 0],
            point_pos,
            point_color,
        }
    }
}

fn make_texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("texture_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

fn upload_mesh(device: &wgpu::Device, item: &DrawItem) -> GpuMesh {
    let data = item.shape.mesh();
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_vb"),
        contents: bytemuck::cast_slice(&data.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_ib"),
        contents: bytemuck::cast_slice(&data.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    GpuMesh {
        vertex_buffer,
        index_buffer,
        index_count: data.indices.len() as u32,
    }
}
