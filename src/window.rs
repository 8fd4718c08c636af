//! Windowed application: event plumbing and the render loop.
//!
//! Two callback sources drive the cloud, both on the event-loop thread:
//! input events feed the simulated hand (the stand-in detection pipeline),
//! and `RedrawRequested` runs ingest → frame → render, then immediately
//! requests the next redraw. The loop runs for the lifetime of the window.

use crate::controller::MorphController;
use crate::gpu::CloudRenderer;
use crate::simulate::SimHand;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<CloudRenderer>,
    cloud: MorphController,
    sim: SimHand,
    window_size: (u32, u32),
    titled_shape: Option<&'static str>,
}

impl App {
    pub fn new(cloud: MorphController) -> Self {
        Self {
            window: None,
            renderer: None,
            cloud,
            sim: SimHand::new(),
            window_size: (1280, 720),
            titled_shape: None,
        }
    }

    fn refresh_title(&mut self) {
        let label = self.cloud.shape().label();
        if self.titled_shape != Some(label) {
            self.titled_shape = Some(label);
            if let Some(window) = &self.window {
                window.set_title(&format!("morphcloud - {label}"));
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("morphcloud")
                .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

            let window = Arc::new(event_loop.create_window(window_attrs).unwrap());
            let size = window.inner_size();
            self.window_size = (size.width.max(1), size.height.max(1));
            self.window = Some(window.clone());

            match pollster::block_on(CloudRenderer::new(window, &self.cloud)) {
                Ok(renderer) => self.renderer = Some(renderer),
                Err(e) => {
                    eprintln!("GPU initialization failed: {e}");
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                self.window_size = (physical_size.width.max(1), physical_size.height.max(1));
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (w, h) = self.window_size;
                self.sim
                    .set_cursor(position.x as f32 / w as f32, position.y as f32 / h as f32);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.sim.set_pinching(state == ElementState::Pressed);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(KeyCode::Space) = event.physical_key {
                    self.sim.set_open(event.state == ElementState::Pressed);
                }
            }

            WindowEvent::RedrawRequested => {
                // Detection callback, then the per-frame update, then draw.
                let frame = self.sim.frame();
                self.cloud.ingest(frame.as_ref());
                self.cloud.frame();
                self.refresh_title();

                if let Some(renderer) = &mut self.renderer {
                    match renderer.render(&self.cloud) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            renderer.resize(winit::dpi::PhysicalSize {
                                width: renderer.config.width,
                                height: renderer.config.height,
                            })
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}
