use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{LevelFilter, error, info};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, KeyEvent, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use lightmaze::config::{CliArgs, SceneConfig};
use lightmaze::geometry::Point;
use lightmaze::input::{self, DOUBLE_TAP_WINDOW, TapDetector};
use lightmaze::renderer;
use lightmaze::scene::{Command, Scene};

type Surface = softbuffer::Surface<Rc<Window>, Rc<Window>>;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<Surface>,
    config: SceneConfig,
    scene: Option<Scene>,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Input
    cursor: Point,
    taps: TapDetector,
}

impl App {
    fn new(config: SceneConfig) -> Self {
        Self {
            window: None,
            surface: None,
            config,
            scene: None,
            frame_counter: 0,
            last_fps_print: Instant::now(),
            cursor: Point::default(),
            taps: TapDetector::new(DOUBLE_TAP_WINDOW),
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title("Light Maze")
            .with_inner_size(LogicalSize::new(1280.0, 720.0));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| anyhow!("create window: {e}"))?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow!("softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("softbuffer surface: {e}"))?;

        let size = window.inner_size();
        match &mut self.scene {
            Some(scene) => scene.resize(size.width as f32, size.height as f32),
            None => {
                self.scene = Some(Scene::new(
                    self.config.clone(),
                    size.width as f32,
                    size.height as f32,
                ))
            }
        }
        info!("window {}x{}", size.width, size.height);

        self.surface = Some(surface);
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn push(&mut self, command: Command) {
        if let Some(scene) = &mut self.scene {
            scene.push(command);
        }
    }

    fn redraw(&mut self, id: WindowId) -> Result<()> {
        let (window, surface, scene) = match (&self.window, &mut self.surface, &mut self.scene) {
            (Some(w), Some(s), Some(scene)) if w.id() == id => (w, s, scene),
            _ => return Ok(()),
        };

        let frame = scene.tick();

        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip drawing
        };

        surface
            .resize(w, h)
            .map_err(|e| anyhow!("resize surface: {e}"))?;
        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow!("buffer_mut: {e}"))?;
        renderer::render_frame(&mut buf, w.get() as usize, h.get() as usize, &frame);
        buf.present().map_err(|e| anyhow!("present: {e}"))?;

        // Log FPS
        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            let rays: usize = frame.lights.iter().map(|l| l.fan.len()).sum();
            info!(
                "FPS: {:.1} ({} lights, {} rays, {} walls)",
                self.frame_counter as f32 / elapsed,
                frame.lights.len(),
                rays,
                frame.boundaries.len()
            );
            self.frame_counter = 0;
            self.last_fps_print = now;
        }

        window.request_redraw();
        Ok(())
    }

    fn on_touch(&mut self, touch: Touch) {
        let at = to_point(touch.location);
        match touch.phase {
            TouchPhase::Started => {
                let now = Instant::now();
                if let Some(tap) = self.taps.poll(now) {
                    self.push(tap.into_command());
                }
                if let Some(tap) = self.taps.touch_start(at, now) {
                    self.push(tap.into_command());
                }
            }
            TouchPhase::Moved => self.push(Command::MoveActive(at)),
            TouchPhase::Ended | TouchPhase::Cancelled => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(e) = self.init_window(event_loop) {
            error!("{e:#}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("The close button was pressed; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(command) = input::command_for_key(code) {
                    self.push(command);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = to_point(position);
                self.push(Command::MoveActive(self.cursor));
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.push(Command::AddLight(self.cursor)),

            WindowEvent::Touch(touch) => self.on_touch(touch),

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw(id) {
                    error!("{e:#}");
                    event_loop.exit();
                }
            }

            // Minimizing reports 0x0 on some platforms
            WindowEvent::Resized(new_size) if new_size.width > 0 && new_size.height > 0 => {
                if let Some(scene) = &mut self.scene {
                    scene.resize(new_size.width as f32, new_size.height as f32);
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(tap) = self.taps.poll(Instant::now()) {
            self.push(tap.into_command());
        }
        match self.taps.deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn to_point(p: PhysicalPosition<f64>) -> Point {
    Point::new(p.x as f32, p.y as f32)
}

fn setup_logger(level: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("install logger")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    setup_logger(args.log_level)?;

    let config = SceneConfig::from(&args);
    info!("starting with {config:?}");

    let event_loop = EventLoop::new().map_err(|e| anyhow!("create event loop: {e}"))?;

    // ControlFlow::Wait pauses the event loop if no events are available; the
    // app keeps itself animating by requesting a redraw after every frame.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("run event loop: {e}"))?;
    Ok(())
}
