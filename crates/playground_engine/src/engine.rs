//! Window, frame loop and subsystem wiring
//!
//! Per frame, in order:
//!
//! 1. the debug GUI sees the input first; mouse input it did not consume
//!    drives the orbit controls
//! 2. debug actions go to the application
//! 3. the playground steps physics and syncs meshes
//! 4. the application's `update` hook runs
//! 5. orbit controls settle and the camera follows, with the viewport
//!    refreshed in case the window was resized
//! 6. the scene renders, then the GUI on top

use crate::application::Application;
use crate::assets::{load_sound_clip, EnvironmentMap, EnvironmentMapFaces};
use crate::audio::{backend::create_backend, HitSound};
use crate::core::PlaygroundConfig;
use crate::foundation::math::vec3_from_array;
use crate::foundation::time::Stopwatch;
use crate::playground::Playground;
use crate::render::{apply_controls, perspective_camera, OrbitControls, SceneRenderer};
use crate::ui::{DebugAction, DebugPanel};
use rand::rngs::ThreadRng;
use thiserror::Error;
use three_d::{Camera, Event, FrameInput, FrameOutput, Key, MouseButton, Window, WindowSettings, GUI};

/// Wheel travel, in pixels, that counts as one zoom step
const WHEEL_PIXELS_PER_STEP: f32 = 50.0;

/// Running engine state, owned by the render loop
pub struct Engine {
    playground: Playground,
    renderer: SceneRenderer,
    controls: OrbitControls,
    camera: Camera,
    panel: DebugPanel,
    gui: GUI,
    rng: ThreadRng,
}

impl Engine {
    /// Open the window and run `app` until the user quits
    pub fn run<A: Application + 'static>(config: PlaygroundConfig, mut app: A) -> Result<(), EngineError> {
        config
            .validate()
            .map_err(|e| EngineError::ConfigError(e.to_string()))?;

        log::info!("Initializing engine...");
        let window = Window::new(WindowSettings {
            title: config.window.title.clone(),
            max_size: Some((config.window.width, config.window.height)),
            ..Default::default()
        })
        .map_err(|e| EngineError::InitializationFailed(format!("Window: {}", e)))?;

        let mut engine = Self::new(&config, &window);
        app.initialize(&mut engine.playground)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");
        window.render_loop(move |mut frame_input| engine.frame(&mut app, &mut frame_input));
        Ok(())
    }

    fn new(config: &PlaygroundConfig, window: &Window) -> Self {
        let context = window.gl();

        let environment = load_environment(config);
        let renderer = SceneRenderer::new(&context, &config.lighting, &config.window, environment.as_ref());

        let mut playground = Playground::new(config);
        if config.audio.enabled {
            attach_audio(&mut playground, config);
        }

        let controls = OrbitControls::new(
            vec3_from_array(config.camera.position),
            vec3_from_array(config.camera.target),
            &config.camera,
        );
        let camera = perspective_camera(
            window.viewport(),
            &controls,
            config.camera.fov_degrees,
            config.camera.near,
            config.camera.far,
        );

        Self {
            gui: GUI::new(&context),
            panel: DebugPanel::default(),
            playground,
            renderer,
            controls,
            camera,
            rng: rand::thread_rng(),
        }
    }

    fn frame<A: Application>(&mut self, app: &mut A, frame_input: &mut FrameInput) -> FrameOutput {
        match self.try_frame(app, frame_input) {
            Ok(true) => FrameOutput::default(),
            Ok(false) => self.shutdown(app),
            Err(e) => {
                log::error!("Frame failed: {}", e);
                self.shutdown(app)
            }
        }
    }

    /// One frame. Returns `Ok(false)` when the user asked to quit.
    fn try_frame<A: Application>(&mut self, app: &mut A, frame_input: &mut FrameInput) -> Result<bool, EngineError> {
        let actions = self.update_gui(frame_input);
        if !self.handle_input(frame_input) {
            return Ok(false);
        }

        for action in actions {
            app.on_debug_action(&mut self.playground, action)
                .map_err(|e| EngineError::ApplicationError(format!("Debug action {:?}: {}", action, e)))?;
        }

        let report = self.playground.tick(frame_input.accumulated_time / 1000.0, &mut self.rng);
        app.update(&mut self.playground, report.delta as f32)
            .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;

        self.controls.update();
        self.camera.set_viewport(frame_input.viewport);
        apply_controls(&mut self.camera, &self.controls);

        let screen = frame_input.screen();
        self.renderer.render(&screen, &self.camera, self.playground.scene());
        screen
            .write(|| self.gui.render())
            .map_err(|e| EngineError::RenderError(format!("GUI: {}", e)))?;

        Ok(true)
    }

    fn update_gui(&mut self, frame_input: &mut FrameInput) -> Vec<DebugAction> {
        let mut actions = Vec::new();
        let panel = &mut self.panel;
        panel.set_counters(self.playground.counters());
        self.gui.update(
            &mut frame_input.events,
            frame_input.accumulated_time,
            frame_input.viewport,
            frame_input.device_pixel_ratio,
            |ctx| actions = panel.show(ctx),
        );
        actions
    }

    /// Feed input the GUI left alone to the orbit controls. Returns false on Escape.
    fn handle_input(&mut self, frame_input: &FrameInput) -> bool {
        let height = frame_input.viewport.height as f32;
        for event in &frame_input.events {
            match event {
                Event::MouseMotion { button: Some(MouseButton::Left), delta, handled: false, .. } => {
                    self.controls.rotate(delta.0, delta.1, height);
                }
                Event::MouseWheel { delta, handled: false, .. } => {
                    self.controls.zoom(delta.1 / WHEEL_PIXELS_PER_STEP);
                }
                Event::KeyPress { kind: Key::Escape, .. } => {
                    log::info!("Escape pressed, exiting");
                    return false;
                }
                _ => {}
            }
        }
        true
    }

    fn shutdown<A: Application>(&mut self, app: &mut A) -> FrameOutput {
        app.cleanup(&mut self.playground);
        self.playground.shutdown_audio();
        log::info!(
            "Engine shutdown complete ({} objects, {:.1}s simulated)",
            self.playground.pairings().len(),
            self.playground.world().time()
        );
        FrameOutput {
            exit: true,
            ..Default::default()
        }
    }
}

fn load_environment(config: &PlaygroundConfig) -> Option<EnvironmentMap> {
    let stopwatch = Stopwatch::start_new();
    match EnvironmentMapFaces::from_dir(&config.assets.environment_map_dir).load() {
        Ok(map) => {
            log::info!(
                "Environment map loaded ({}x{} faces, {:.1} ms)",
                map.face_size().0,
                map.face_size().1,
                stopwatch.elapsed_millis()
            );
            Some(map)
        }
        Err(e) => {
            log::warn!("Environment map unavailable, using plain ambient light: {}", e);
            None
        }
    }
}

fn attach_audio(playground: &mut Playground, config: &PlaygroundConfig) {
    let clip = match load_sound_clip(&config.assets.hit_sound) {
        Ok(clip) => clip,
        Err(e) => {
            log::warn!("Hit sound disabled: {}", e);
            return;
        }
    };
    match create_backend() {
        Ok(backend) => playground.set_audio(backend, HitSound::new(clip, &config.audio)),
        Err(e) => log::warn!("Hit sound disabled, no audio output: {}", e),
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// Rendering error
    #[error("Rendering error: {0}")]
    RenderError(String),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
