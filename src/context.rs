use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use crate::{
    camera::CameraResources,
    config::SceneConfig,
    data_structures::texture::DepthBuffer,
    pipelines::{self, light::LightResources},
};

/// Central GPU context: device, queue, surface and the shared bind groups.
#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_buffer: DepthBuffer,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub light: LightResources,
    pub material_bind_group_layout: wgpu::BindGroupLayout,
    pub pipeline: wgpu::RenderPipeline,
    pub grid_pipeline: wgpu::RenderPipeline,
    pub clear_colour: wgpu::Color,
}

impl Context {
    /// Acquire the GPU and set up everything the voxel pipeline needs.
    ///
    /// Fails when the platform offers no usable adapter or device; the caller
    /// decides whether to show a fallback.
    pub async fn new(window: Arc<Window>, scene: &SceneConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();

        // BackendBit::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Unable to create a rendering surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No graphics adapter supports this surface")?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features, so if
                // we're building for the web we'll have to disable some.
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                memory_hints: Default::default(),
                ..Default::default()
            })
            .await
            .context("Unable to open the graphics device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Colours are uploaded in linear space and rely on an sRGB target.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("The surface reports no supported formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let camera = CameraResources::new(&device);
        let light = LightResources::new(&scene.light, scene.fog.as_ref(), &device)?;
        let material_bind_group_layout = pipelines::material::mk_bind_group_layout(&device);
        let pipeline = pipelines::basic::mk_voxel_pipeline(
            &device,
            &config,
            &camera.bind_group_layout,
            &light.bind_group_layout,
            &material_bind_group_layout,
        );
        let grid_pipeline = pipelines::grid::mk_grid_pipeline(
            &device,
            &config,
            &camera.bind_group_layout,
            &light.bind_group_layout,
        );

        let depth_buffer = DepthBuffer::new(&device, config.width, config.height);

        let [r, g, b] = scene
            .clear_colour
            .to_linear_rgb()
            .context("Invalid clear colour")?;
        let clear_colour = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };

        Ok(Self {
            window,
            depth_buffer,
            surface,
            device,
            queue,
            config,
            camera,
            light,
            material_bind_group_layout,
            pipeline,
            grid_pipeline,
            clear_colour,
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Reconfigure the surface and depth buffer. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_buffer = DepthBuffer::new(&self.device, width, height);
    }
}
