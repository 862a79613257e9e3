//! Application event loop.
//!
//! This module hosts a [`Stage`] in a winit window: it creates the window (or
//! binds the `canvas` element on the web), mounts the F1 scene once the GPU is
//! ready and drives the stage from window events.
//!
//! # Lifecycle Flow
//!
//! 1. `resumed` creates the window and mounts the stage asynchronously
//! 2. Pointer and wheel events are forwarded to the stage's orbit controls
//! 3. `RedrawRequested` advances the stage by one frame and schedules the next
//! 4. Closing or suspending the window unmounts the stage, which stops the loop

use std::{fmt::Debug, sync::Arc};

use instant::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{config::SceneConfig, renderer::GpuRenderer, stage::Stage};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub(crate) enum FlowEvent {
    /// The mount finished, successfully or not.
    Initialized(anyhow::Result<Stage<GpuRenderer>>),
}

impl Debug for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(Ok(_)) => f.write_str("Initialized(Ok(Stage))"),
            Self::Initialized(Err(e)) => f.debug_tuple("Initialized").field(e).finish(),
        }
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    config: SceneConfig,
    window: Option<Arc<Window>>,
    stage: Option<Stage<GpuRenderer>>,
    last_time: Instant,
    // First fatal error, handed back by `run` once the loop has stopped.
    error: Option<anyhow::Error>,
}

impl App {
    fn new(event_loop: &EventLoop<FlowEvent>, config: SceneConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            config,
            window: None,
            stage: None,
            last_time: Instant::now(),
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error.get_or_insert(error);
        self.unmount();
        event_loop.exit();
    }

    fn initialized(
        &mut self,
        event_loop: &ActiveEventLoop,
        stage: anyhow::Result<Stage<GpuRenderer>>,
    ) {
        match stage {
            Ok(mut stage) => {
                // The canvas may have been laid out while the GPU was set up.
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    stage.resize(size.width, size.height);
                    window.request_redraw();
                }
                self.stage = Some(stage);
                self.last_time = Instant::now();
            }
            Err(e) => self.fail(event_loop, e.context("Unable to mount the voxel scene")),
        }
    }

    fn unmount(&mut self) {
        if let Some(mut stage) = self.stage.take() {
            stage.unmount();
        }
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Arc<Window>> {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("Voxel F1");

        #[cfg(target_arch = "wasm32")]
        {
            use anyhow::Context;
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(CANVAS_ID))
                .with_context(|| format!("No element with id '{}' to render into", CANVAS_ID))?;
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        Ok(Arc::new(event_loop.create_window(window_attributes)?))
    }
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(e) => return self.fail(event_loop, e),
        };
        self.window = Some(window.clone());

        let config = self.config.clone();
        let init_future = async move {
            let size = window.inner_size();
            let renderer = GpuRenderer::new(window, &config).await?;
            Stage::mount(renderer, config, size.width, size.height)
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            let stage = self.async_runtime.block_on(init_future);
            if self.proxy.send_event(FlowEvent::Initialized(stage)).is_err() {
                log::error!("Event loop closed before the scene was mounted");
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let stage = init_future.await;
                if proxy.send_event(FlowEvent::Initialized(stage)).is_err() {
                    log::error!("Event loop closed before the scene was mounted");
                }
            });
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.unmount();
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            FlowEvent::Initialized(stage) => self.initialized(event_loop, stage),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            self.unmount();
            event_loop.exit();
            return;
        }
        let Some(stage) = self.stage.as_mut() else {
            return;
        };

        stage.handle_window_event(&event);

        match event {
            WindowEvent::Resized(size) => stage.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                match stage.frame(dt) {
                    Ok(Some(_)) => {
                        // invoke main render loop
                        if let Some(window) = &self.window {
                            window.request_redraw();
                        }
                    }
                    // Unmounted stages stop scheduling frames.
                    Ok(None) => (),
                    Err(e) => {
                        log::error!("Unable to render {:#}", e);
                        if let Some(window) = &self.window {
                            window.request_redraw();
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

/// Open a window and show the car until it is closed.
pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        }
    }

    config.validate()?;

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
