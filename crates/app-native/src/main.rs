use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wgpu::util::DeviceExt;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use app_core::constants::{EDGE_LINE_OPACITY, MARKER_PLANE_RADIUS, ORBIT_MEMBER_RADIUS};
use app_core::labels::member_labels;
use app_core::scene::{Model, ModelId};
use app_core::SceneContext;

const SCENE_SEED: u64 = 42;
const ROTATE_SPEED: f32 = 0.005;
const CLICK_SLOP_PX: f32 = 4.0;

const SWARM_COLOR: [f32; 4] = [0.55, 0.75, 1.0, 1.0];
const ORBITER_COLOR: [f32; 4] = [0.5, 0.9, 0.6, 1.0];
const MARKER_COLOR: [f32; 4] = [0.3, 0.3, 0.35, 0.25];
const LABEL_COLOR: [f32; 4] = [0.92, 0.92, 0.97, 0.8];
// Per-character width of a label tag quad.
const LABEL_CHAR_SCALE: f32 = 0.008;
const LINE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, EDGE_LINE_OPACITY];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
    line_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceData {
    pos: [f32; 3],
    scale: f32,
    color: [f32; 4],
}

/// Placeholder point-cloud stand-ins for the three models, same shapes the
/// web frontend generates.
struct ModelCloud {
    id: ModelId,
    points: Vec<Vec3>,
    color: [f32; 3],
    point_scale: f32,
}

fn build_clouds() -> Vec<ModelCloud> {
    let specs: [(ModelId, f32, f32, [f32; 3], f32, usize); 3] = [
        (ModelId::Space, 400.0, 1.0, [0.75, 0.78, 0.95], 1.2, 900),
        (ModelId::Human, 40.0, 2.2, [0.85, 0.62, 0.5], 0.6, 700),
        (ModelId::Brain, 2.0, 0.8, [0.9, 0.45, 0.65], 0.05, 500),
    ];
    specs
        .into_iter()
        .map(|(id, radius, squash, color, point_scale, count)| {
            let seed = match id {
                ModelId::Space => 1,
                ModelId::Human => 2,
                ModelId::Brain => 3,
            };
            let mut rng = StdRng::seed_from_u64(seed);
            let points = (0..count)
                .map(|_| {
                    let theta = rng.gen::<f32>() * std::f32::consts::TAU;
                    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
                    Vec3::new(
                        radius * phi.sin() * theta.cos(),
                        radius * squash * phi.cos(),
                        radius * phi.sin() * theta.sin(),
                    )
                })
                .collect();
            ModelCloud {
                id,
                points,
                color,
                point_scale,
            }
        })
        .collect()
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    particle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    instance_capacity: usize,
    line_vb: wgpu::Buffer,
    line_capacity: usize,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(app_core::SCENE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let quad_vertices: [f32; 12] = [
            -1.0, -1.0, 1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, 1.0,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_capacity = 4096;
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<InstanceData>() * instance_capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let line_capacity = 256;
        let line_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("line_vb"),
            size: (std::mem::size_of::<[f32; 3]>() * line_capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
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
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let particle_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceData>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                ],
            },
        ];
        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_particle"),
                buffers: &particle_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_particle"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let line_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            }],
        }];
        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_line"),
                buffers: &line_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_line"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            particle_pipeline,
            line_pipeline,
            uniform_buffer,
            quad_vb,
            instance_vb,
            instance_capacity,
            line_vb,
            line_capacity,
            bind_group,
            width: size.width.max(1),
            height: size.height.max(1),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn ensure_instance_capacity(&mut self, count: usize) {
        if count > self.instance_capacity {
            self.instance_capacity = count.next_power_of_two();
            self.instance_vb = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("instance_vb"),
                size: (std::mem::size_of::<InstanceData>() * self.instance_capacity) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
    }

    fn ensure_line_capacity(&mut self, count: usize) {
        if count > self.line_capacity {
            self.line_capacity = count.next_power_of_two();
            self.line_vb = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("line_vb"),
                size: (std::mem::size_of::<[f32; 3]>() * self.line_capacity) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
    }

    fn render(
        &mut self,
        scene: &SceneContext,
        instances: &[InstanceData],
        line_points: &[[f32; 3]],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_matrix = scene.camera.view_matrix();
        let view_proj = scene.camera.projection_matrix() * view_matrix;
        let right = Vec3::new(view_matrix.x_axis.x, view_matrix.y_axis.x, view_matrix.z_axis.x);
        let up = Vec3::new(view_matrix.x_axis.y, view_matrix.y_axis.y, view_matrix.z_axis.y);
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: view_proj.to_cols_array_2d(),
                cam_right: [right.x, right.y, right.z, 0.0],
                cam_up: [up.x, up.y, up.z, 0.0],
                line_color: LINE_COLOR,
            }),
        );

        self.ensure_instance_capacity(instances.len());
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(instances));
        }
        self.ensure_line_capacity(line_points.len());
        if !line_points.is_empty() {
            self.queue
                .write_buffer(&self.line_vb, 0, bytemuck::cast_slice(line_points));
        }

        let clear = scene.background.current();
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.x as f64,
                            g: clear.y as f64,
                            b: clear.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            if !line_points.is_empty() {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_vertex_buffer(0, self.line_vb.slice(..));
                rpass.draw(0..(line_points.len() as u32), 0..1);
            }
            if !instances.is_empty() {
                rpass.set_pipeline(&self.particle_pipeline);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
                rpass.draw(0..6, 0..(instances.len() as u32));
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn build_instances(scene: &SceneContext, clouds: &[ModelCloud], out: &mut Vec<InstanceData>) {
    out.clear();
    for group in &scene.swarms {
        for member in &group.members {
            out.push(InstanceData {
                pos: member.position.to_array(),
                scale: member.radius,
                color: SWARM_COLOR,
            });
        }
        // Label tags are regenerated from the live positions every frame and
        // hang below the member they name; width follows the text length.
        for label in member_labels(group) {
            out.push(InstanceData {
                pos: label.anchor.to_array(),
                scale: LABEL_CHAR_SCALE * label.text.len() as f32,
                color: LABEL_COLOR,
            });
        }
    }
    if scene.zoom.showing_detail() {
        for member in &scene.orbiters {
            out.push(InstanceData {
                pos: member.position.to_array(),
                scale: ORBIT_MEMBER_RADIUS,
                color: ORBITER_COLOR,
            });
        }
        out.push(InstanceData {
            pos: [0.0, 0.0, 0.0],
            scale: MARKER_PLANE_RADIUS,
            color: MARKER_COLOR,
        });
    }
    for cloud in clouds {
        let Some(model) = scene.models.get(cloud.id) else {
            continue;
        };
        let alpha = model.opacity();
        if alpha <= 0.0 {
            continue;
        }
        let color = [cloud.color[0], cloud.color[1], cloud.color[2], alpha];
        for point in &cloud.points {
            out.push(InstanceData {
                pos: point.to_array(),
                scale: cloud.point_scale,
                color,
            });
        }
    }
}

fn collect_edges(scene: &SceneContext, out: &mut Vec<[f32; 3]>) {
    out.clear();
    if !scene.zoom.showing_detail() {
        return;
    }
    for graph in &scene.graphs {
        out.extend(graph.points().iter().map(|p| p.to_array()));
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("Zoom Journey (native)")
        .build(&event_loop)
        .expect("window");

    let size = window.inner_size();
    let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;
    let mut scene = SceneContext::new(SCENE_SEED, aspect).expect("scene");

    // Natively everything is on disk, so the models "arrive" immediately.
    let clouds = build_clouds();
    for cloud in &clouds {
        scene.install_model(cloud.id, Model::with_surfaces(1));
    }

    let mut state = pollster::block_on(GpuState::new(&window)).expect("gpu");

    let mut instances: Vec<InstanceData> = Vec::new();
    let mut edges: Vec<[f32; 3]> = Vec::new();
    let mut mouse_down = false;
    let mut drag_moved = 0.0f32;
    let mut cursor = (0.0f32, 0.0f32);

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => {
                    state.resize(size);
                    scene.on_resize(size.width, size.height);
                }
                WindowEvent::CloseRequested => {
                    scene.teardown();
                    elwt.exit();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let x = position.x as f32;
                    let y = position.y as f32;
                    if mouse_down {
                        let dx = x - cursor.0;
                        let dy = y - cursor.1;
                        drag_moved += dx.abs() + dy.abs();
                        scene.rotate_camera(-dx * ROTATE_SPEED, dy * ROTATE_SPEED);
                    }
                    cursor = (x, y);
                }
                WindowEvent::MouseInput {
                    state: element_state,
                    button: MouseButton::Left,
                    ..
                } => match element_state {
                    ElementState::Pressed => {
                        mouse_down = true;
                        drag_moved = 0.0;
                    }
                    ElementState::Released => {
                        mouse_down = false;
                        if drag_moved < CLICK_SLOP_PX {
                            let ndc_x = 2.0 * cursor.0 / state.width.max(1) as f32 - 1.0;
                            let ndc_y = 1.0 - 2.0 * cursor.1 / state.height.max(1) as f32;
                            scene.on_pointer_click(ndc_x, ndc_y);
                        }
                    }
                },
                WindowEvent::MouseWheel { delta, .. } => {
                    let scroll = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 60.0,
                    };
                    let factor = if scroll < 0.0 { 1.1 } else { 0.9 };
                    scene.zoom_camera(factor);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if event.state == ElementState::Pressed
                        && event.logical_key == Key::Named(NamedKey::Escape)
                    {
                        scene.on_escape();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                scene.tick();
                build_instances(&scene, &clouds, &mut instances);
                collect_edges(&scene, &mut edges);
                match state.render(&scene, &instances, &edges) {
                    Ok(_) => state.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(_) => {}
                }
            }
            _ => {}
        })
        .expect("event loop run");
}
