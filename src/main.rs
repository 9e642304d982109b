#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
use anyhow::{Context, Result};
use bevy_ecs::world::World;
use components::camera::Viewport;
use components::input::{Button, Command, FrameInput};
use components::options::DemoOptions;
use components::view::{ViewMode, ViewToggles};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;
use vello::peniko::Color;
use vello::util::{RenderContext, RenderSurface};
use vello::{AaConfig, Renderer, RendererOptions, Scene};
use vello::wgpu;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::*;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::Window;
use render::{ActiveRenderState, FrameCounter, RenderState};

mod components;
mod draw;
mod math;
mod render;
mod systems;

const TITLE: &str = "casteljau";

struct CasteljauApp<'s> {
    context: RenderContext,
    renderers: Vec<Option<Renderer>>,
    state: RenderState<'s>,
    scene: Scene,
    frames: FrameCounter,
    world: World // points, curves, input and toggles
}

impl<'s> CasteljauApp<'s> {
    fn input(&mut self) -> bevy_ecs::world::Mut<'_, FrameInput> {
        self.world.resource_mut::<FrameInput>()
    }

    /// Update in frame order, then rebuild the scene from the result.
    fn build_frame(&mut self) {
        systems::run_frame(&mut self.world);

        self.scene.reset();
        match self.world.resource::<ViewToggles>().mode {
            ViewMode::Flat => draw::draw_flat(&mut self.scene, &mut self.world),
            ViewMode::Spatial => draw::draw_spatial(&mut self.scene, &mut self.world),
        }

        self.input().end_frame();
    }
}

impl<'s> ApplicationHandler for CasteljauApp<'s> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let RenderState::Suspended(cached_window) = &mut self.state else {
            return;
        };

        let window = match cached_window.take() {
            Some(window) => window,
            None => {
                let options = self.world.resource::<DemoOptions>();
                match create_winit_window(event_loop, options) {
                    Ok(window) => window,
                    Err(e) => {
                        log::error!("{:#}", e);
                        event_loop.exit();
                        return;
                    }
                }
            }
        };

        let size = window.inner_size();
        let surface_future = self.context.create_surface(
            window.clone(),
            size.width,
            size.height,
            wgpu::PresentMode::AutoVsync,
        );
        let surface = match pollster::block_on(surface_future) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Error creating surface: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.renderers
            .resize_with(self.context.devices.len(), || None);
        if self.renderers[surface.dev_id].is_none() {
            match create_vello_renderer(&self.context, &surface) {
                Ok(renderer) => self.renderers[surface.dev_id] = Some(renderer),
                Err(e) => {
                    log::error!("{:#}", e);
                    event_loop.exit();
                    return;
                }
            }
        }

        self.world
            .insert_resource(Viewport::new(size.width as f64, size.height as f64));
        self.state = RenderState::Active(ActiveRenderState { window, surface });
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let RenderState::Active(state) = &self.state {
            self.state = RenderState::Suspended(Some(state.window.clone()));
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // redraw continuously, one update per frame
        if let RenderState::Active(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let render_state = match &mut self.state {
            RenderState::Active(state) if state.window.id() == window_id => state,
            _ => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.context
                        .resize_surface(&mut render_state.surface, size.width, size.height);
                    self.world
                        .insert_resource(Viewport::new(size.width as f64, size.height as f64));
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let Some(command) = Command::from_key(&event.logical_key) {
                    if !event.repeat || command.repeats() {
                        self.input().push_command(command);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = Button::from_mouse(button) else {
                    return;
                };
                match state {
                    ElementState::Pressed => self.input().press(button),
                    ElementState::Released => self.input().release(button),
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input().move_pointer(position.x, position.y);
            }
            WindowEvent::RedrawRequested => {
                self.build_frame();

                let RenderState::Active(render_state) = &self.state else {
                    return;
                };
                let surface = &render_state.surface;
                let width = surface.config.width;
                let height = surface.config.height;
                let device_handle = &self.context.devices[surface.dev_id];
                let surface_texture = match surface.surface.get_current_texture() {
                    Ok(texture) => texture,
                    Err(e) => {
                        log::error!("Failed to get surface texture: {}", e);
                        return;
                    }
                };

                let Some(renderer) = self.renderers[surface.dev_id].as_mut() else {
                    return;
                };
                let rendered = renderer.render_to_surface(
                    &device_handle.device,
                    &device_handle.queue,
                    &self.scene,
                    &surface_texture,
                    &vello::RenderParams {
                        base_color: Color::BLACK,
                        width,
                        height,
                        antialiasing_method: AaConfig::Msaa16,
                    },
                );
                if let Err(e) = rendered {
                    log::error!("Failed to render to surface: {}", e);
                    return;
                }

                surface_texture.present();
                device_handle.device.poll(wgpu::Maintain::Poll);

                if let Some(fps) = self.frames.tick(Instant::now()) {
                    log::debug!("{:.1} fps", fps);
                    render_state
                        .window
                        .set_title(&format!("{} - {:.0} fps", TITLE, fps));
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    log::info!("{} v{} starting", TITLE, env!("CARGO_PKG_VERSION"));

    let options = DemoOptions::load_from_file(&DemoOptions::config_path());
    let viewport = Viewport::new(options.window_width as f64, options.window_height as f64);

    let mut app = CasteljauApp {
        context: RenderContext::new(),
        renderers: Vec::new(),
        state: RenderState::Suspended(None),
        scene: Scene::new(),
        frames: FrameCounter::new(Instant::now()),
        world: systems::init_world(options, viewport),
    };

    let event_loop = EventLoop::new().context("creating event loop")?;
    event_loop
        .run_app(&mut app)
        .context("running event loop")?;
    Ok(())
}


/// Helper function that creates a Winit window and returns it (wrapped in an Arc for sharing between threads)
fn create_winit_window(event_loop: &ActiveEventLoop, options: &DemoOptions) -> Result<Arc<Window>> {
    let attr = Window::default_attributes()
        .with_inner_size(LogicalSize::new(options.window_width, options.window_height))
        .with_resizable(true)
        .with_title(TITLE);
    let window = event_loop
        .create_window(attr)
        .context("creating window")?;
    Ok(Arc::new(window))
}

/// Helper function that creates a vello `Renderer` for a given `RenderContext` and `RenderSurface`
fn create_vello_renderer(render_cx: &RenderContext, surface: &RenderSurface) -> Result<Renderer> {
    Renderer::new(
        &render_cx.devices[surface.dev_id].device,
        RendererOptions {
            surface_format: Some(surface.format),
            use_cpu: false,
            antialiasing_support: vello::AaSupport::all(),
            num_init_threads: NonZeroUsize::new(1),
        },
    )
        .map_err(|e| anyhow::anyhow!("couldn't create renderer: {}", e))
}
