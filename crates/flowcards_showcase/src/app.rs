// SPDX-License-Identifier: MIT OR Apache-2.0
//! Showcase window setup and event loop.

use crate::page::ShowcasePage;
use crate::settings::{SettingsError, ShowcaseSettings};
use egui_wgpu::wgpu;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const WINDOW_TITLE: &str = "Featured Issues - Flowcards Showcase";

/// Showcase application errors
#[derive(Debug, Error)]
pub enum ShowcaseError {
    /// Window creation failed
    #[error("Failed to create window: {0}")]
    WindowCreation(String),

    /// Renderer initialization failed
    #[error("Failed to initialize renderer: {0}")]
    RendererInit(String),

    /// Event loop error
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be loaded
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Result type for showcase operations
pub type Result<T> = std::result::Result<T, ShowcaseError>;

/// Graphics state for wgpu rendering
struct GraphicsState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    egui_renderer: egui_wgpu::Renderer,
}

impl GraphicsState {
    fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| ShowcaseError::RendererInit(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| ShowcaseError::RendererInit("no suitable GPU adapter".to_string()))?;

        tracing::info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Flowcards Showcase Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            },
            None,
        ))
        .map_err(|e| ShowcaseError::RendererInit(e.to_string()))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| ShowcaseError::RendererInit("surface has no formats".to_string()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            egui_renderer,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn render(
        &mut self,
        egui_ctx: &egui::Context,
        full_output: egui::FullOutput,
        window: &Window,
        clear: egui::Color32,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Showcase Encoder"),
        });

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        let [r, g, b, a] = egui::Rgba::from(clear).to_array();
        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Showcase Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color {
                                r: f64::from(r),
                                g: f64::from(g),
                                b: f64::from(b),
                                a: f64::from(a),
                            }),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();

            self.egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        Ok(())
    }
}

/// Running state of the showcase
struct ShowcaseRunning {
    window: Arc<Window>,
    graphics: GraphicsState,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    page: ShowcasePage,
}

impl ShowcaseRunning {
    /// Run one egui pass and present it; returns the requested repaint delay
    fn redraw(&mut self, event_loop: &ActiveEventLoop) -> Option<Duration> {
        let raw_input = self.egui_state.take_egui_input(&self.window);
        let page = &mut self.page;
        let full_output = self.egui_ctx.run(raw_input, |ctx| page.show(ctx));

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output.clone());

        let repaint_delay = full_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .map(|viewport| viewport.repaint_delay);
        let clear = self.egui_ctx.style().visuals.panel_fill;

        match self.graphics.render(&self.egui_ctx, full_output, &self.window, clear) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.window.inner_size();
                self.graphics.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("Out of GPU memory!");
                event_loop.exit();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("Surface timeout");
            }
        }

        repaint_delay
    }
}

/// Main showcase application
pub struct ShowcaseApp {
    settings: ShowcaseSettings,
    running: Option<ShowcaseRunning>,
    /// First fatal error raised inside the event loop
    error: Option<ShowcaseError>,
}

impl ShowcaseApp {
    /// Create an application for `settings`
    pub fn new(settings: ShowcaseSettings) -> Self {
        Self {
            settings,
            running: None,
            error: None,
        }
    }

    /// Run the showcase until its window is closed
    pub fn run(settings: ShowcaseSettings) -> Result<()> {
        let event_loop = EventLoop::new()?;
        // Idle between frames; the carousel asks for repaints while it moves
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ShowcaseApp::new(settings);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<ShowcaseRunning> {
        tracing::info!("Creating showcase window...");

        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 900))
            .with_min_inner_size(winit::dpi::LogicalSize::new(480, 600));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| ShowcaseError::WindowCreation(e.to_string()))?,
        );

        let graphics = GraphicsState::new(window.clone())?;
        let egui_ctx = egui::Context::default();
        let page = ShowcasePage::new(&egui_ctx, &self.settings);

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2 * 1024),
        );

        tracing::info!("Showcase initialized, window size {:?}", window.inner_size());

        Ok(ShowcaseRunning {
            window,
            graphics,
            egui_ctx,
            egui_state,
            page,
        })
    }
}

impl ApplicationHandler for ShowcaseApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => {
                tracing::error!("Startup failed: {e}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(running) = &mut self.running else {
            return;
        };

        let response = running.egui_state.on_window_event(&running.window, &event);
        if response.repaint {
            running.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                if let Some(id) = running.page.selected() {
                    tracing::debug!("Last selected issue: {id}");
                }
                tracing::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                tracing::debug!("Window resized to {:?}", new_size);
                running.graphics.resize(new_size);
                running.window.request_redraw();
            }
            WindowEvent::RedrawRequested => match running.redraw(event_loop) {
                Some(delay) if delay.is_zero() => running.window.request_redraw(),
                Some(delay) if delay != Duration::MAX => {
                    event_loop.set_control_flow(ControlFlow::wait_duration(delay));
                }
                _ => event_loop.set_control_flow(ControlFlow::Wait),
            },
            _ => {}
        }
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: winit::event::StartCause) {
        // A delayed repaint came due
        if let winit::event::StartCause::ResumeTimeReached { .. } = cause {
            if let Some(running) = &self.running {
                running.window.request_redraw();
            }
        }
    }
}
