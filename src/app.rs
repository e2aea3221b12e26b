use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{GRID_HEIGHT, GRID_WIDTH, WINDOW_SCALE};
use crate::gpu::{FrameTexture, GpuContext, RenderPipeline};
use crate::palette::{self, DisplayMode, Rgba};
use crate::simulation::{Life, Preset};

/// Host commands that run in place of the next frame's simulation step
#[derive(Clone, Copy, Debug)]
enum Command {
    Randomize,
    Load(Preset),
}

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    frame_texture: Option<FrameTexture>,
    render_pipeline: Option<RenderPipeline>,
    life: Life,
    frame: Vec<Rgba>,
    display: DisplayMode,
    pending: Option<Command>,
    fps_counter: FpsCounter,
}

impl App {
    pub fn new() -> Self {
        let mut life = Life::new_default();
        life.randomize(&mut rand::thread_rng());

        Self {
            window: None,
            gpu: None,
            frame_texture: None,
            render_pipeline: None,
            life,
            frame: vec![[0; 4]; GRID_WIDTH * GRID_HEIGHT],
            display: DisplayMode::Cells,
            pending: None,
            fps_counter: FpsCounter::new(),
        }
    }

    fn render(&mut self) {
        let gpu = self.gpu.as_ref().unwrap();
        let frame_texture = self.frame_texture.as_ref().unwrap();
        let render = self.render_pipeline.as_ref().unwrap();

        // Advance one generation, unless a reseed command is pending
        match self.pending.take() {
            Some(Command::Randomize) => self.life.randomize(&mut rand::thread_rng()),
            Some(Command::Load(preset)) => self.life.load_preset(preset),
            None => self.life.step(),
        }

        // Map the committed state through the active color table and
        // upload it for display
        palette::render_into(&self.life, self.display, &mut self.frame);
        frame_texture.upload(&gpu.queue, &self.frame);

        // Get surface texture
        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure surface
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        let bind_group = render.create_bind_group(&gpu.device, frame_texture);
        render.draw(&mut encoder, &view, &bind_group);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        // Update and display FPS
        if let Some(fps) = self.fps_counter.tick() {
            if let Some(window) = &self.window {
                window.set_title(&format!(
                    "Toroidal Life - {:.0} FPS - {} view - gen {} - pop {}",
                    fps,
                    self.display.label(),
                    self.life.generation(),
                    self.life.population()
                ));
            }
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            // Toggle color mapping (cells <-> population)
            KeyCode::Space => {
                self.display = self.display.toggled();
                log::info!("Display mode: {}", self.display.label());
            }

            // Reseed commands, applied in place of the next step
            KeyCode::KeyR => {
                self.pending = Some(Command::Randomize);
                log::info!("Reseeding with random fill");
            }
            KeyCode::KeyG => {
                self.pending = Some(Command::Load(Preset::Gosper));
                log::info!("Loading {}", Preset::Gosper.label());
            }
            KeyCode::KeyS => {
                self.pending = Some(Command::Load(Preset::Simkin));
                log::info!("Loading {}", Preset::Simkin.label());
            }

            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Initializing toroidal Life engine...");
        log::info!("Grid size: {}x{}", GRID_WIDTH, GRID_HEIGHT);

        // Create window
        let window_attrs = Window::default_attributes()
            .with_title("Toroidal Life")
            .with_inner_size(winit::dpi::LogicalSize::new(
                GRID_WIDTH as u32 * WINDOW_SCALE,
                GRID_HEIGHT as u32 * WINDOW_SCALE,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        // Initialize GPU
        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()));

        log::info!("Creating frame texture...");
        let frame_texture = FrameTexture::new(&gpu.device, GRID_WIDTH as u32, GRID_HEIGHT as u32);

        log::info!("Creating render pipeline...");
        let render_pipeline = RenderPipeline::new(&gpu.device, gpu.format());

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  Space: Toggle cell/population view");
        log::info!("  R: Reseed with random fill");
        log::info!("  G: Load Gosper glider gun");
        log::info!("  S: Load Simkin glider gun");
        log::info!("  Escape: Quit");

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.frame_texture = Some(frame_texture);
        self.render_pipeline = Some(render_pipeline);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
                // Request another frame immediately
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}
