//! Castle Fair - Interactive Courtyard
//!
//! Run with: `cargo run --bin castle-fair [config.json]`
//!
//! Controls:
//! - Mouse drag: Orbit the camera around the courtyard
//! - Mouse wheel: Zoom
//! - Click characters: Open their dialogue (click advances, ESC closes)
//! - Click guards: They wave back
//! - Click the gate (or press G): Raise/lower the drawbridge
//! - B: Open/close the balloon mini-game overlay
//! - ESC: Close dialogue, or exit

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use castle_fair_engine::audio::AudioOutput;
use castle_fair_engine::camera::{OrbitCamera, Ray};
use castle_fair_engine::game::balloons::{BalloonGame, ClickResult, LevelPhase};
use castle_fair_engine::game::config::AppConfig;
use castle_fair_engine::game::dialogue::{AdvanceOutcome, DialogueSystem};
use castle_fair_engine::game::interaction::{InteractionTag, pick};
use castle_fair_engine::game::render::{SHADER_SOURCE, SceneUniforms};
use castle_fair_engine::game::scene::CastleScene;
use castle_fair_engine::game::ui::{Hud, HudAction};
use castle_fair_engine::input::PointerState;
use castle_fair_engine::render::{MeshBuffers, RenderConfig, RenderState};

const WINDOW_TITLE: &str = "Castle Fair";

struct CastleFairApp {
    config: AppConfig,

    window: Option<Arc<Window>>,
    gpu: Option<RenderState>,
    static_buffers: Option<MeshBuffers>,

    scene: CastleScene,
    camera: OrbitCamera,
    dialogue: DialogueSystem,
    balloon_game: BalloonGame,
    hud: Hud,
    audio: Option<AudioOutput>,
    pointer: PointerState,

    start_time: Instant,
    last_frame: Instant,
    frame_count: u32,
    last_fps_update: Instant,
}

impl CastleFairApp {
    fn new(config: AppConfig) -> Self {
        let scene = CastleScene::new(&config.castle);
        let camera = OrbitCamera::new(config.castle.camera_target, 16.0 / 9.0);
        let now = Instant::now();

        Self {
            config,
            window: None,
            gpu: None,
            static_buffers: None,
            scene,
            camera,
            dialogue: DialogueSystem::new(),
            balloon_game: BalloonGame::new(1280.0, 720.0),
            hud: Hud::new(1280.0, 720.0),
            audio: AudioOutput::init(),
            pointer: PointerState::new(),
            start_time: now,
            last_frame: now,
            frame_count: 0,
            last_fps_update: now,
        }
    }

    fn initialize(&mut self, window: Arc<Window>, event_loop: &ActiveEventLoop) {
        let gpu = match RenderState::new(
            window.clone(),
            RenderConfig::default(),
            SHADER_SOURCE,
            std::mem::size_of::<SceneUniforms>() as u64,
        ) {
            Ok(gpu) => gpu,
            Err(err) => {
                log::error!("render init failed: {err}");
                event_loop.exit();
                return;
            }
        };

        let static_mesh = self.scene.static_mesh();
        self.static_buffers = gpu.upload_mesh(&static_mesh.vertices, &static_mesh.indices);

        let size = window.inner_size();
        self.camera.resize(size.width, size.height);
        self.hud.resize(size.width as f32, size.height as f32);
        self.balloon_game
            .resize(size.width as f32, size.height as f32);

        self.window = Some(window);
        self.gpu = Some(gpu);
    }

    fn play_pop(&self, pitch: f32) {
        if let Some(audio) = &self.audio {
            audio.play_pop(pitch);
        }
    }

    // -- Input routing -------------------------------------------------------

    /// A press/release pair within the click slop: route it through the
    /// overlay layers first, then into the 3D scene.
    fn handle_click(&mut self, x: f32, y: f32) {
        // Summary modal buttons
        if matches!(
            self.balloon_game.phase(),
            LevelPhase::Complete | LevelPhase::Failed
        ) {
            if let Some(action) = self.hud.hit_test(x, y) {
                match action {
                    HudAction::NextLevel => self.balloon_game.advance_level(),
                    HudAction::Restart => self.balloon_game.restart(),
                }
                return;
            }
        }

        // Balloons over everything else
        match self.balloon_game.click(x, y) {
            ClickResult::Popped => {
                self.play_pop(1.0);
                return;
            }
            ClickResult::Miss | ClickResult::NotRunning => {}
        }

        // An open dialogue consumes the click as "advance"
        if self.dialogue.is_active() {
            if let Some(AdvanceOutcome::Closed(speaker)) = self.dialogue.advance() {
                self.scene.set_highlight(speaker, false);
                self.camera.enable();
            }
            return;
        }

        // Pick into the 3D scene
        let size = self.window_size();
        let ray = Ray::through_pixel(
            self.camera.eye_position(),
            self.camera.target,
            (x, y),
            size,
            self.camera.aspect,
            self.camera.fov,
        );
        match pick(&ray, &self.scene.interactables()) {
            Some(InteractionTag::Character(name)) => {
                if let Some(speaker) = self.dialogue.open(name) {
                    self.scene.set_highlight(speaker, true);
                    // Hold the shot still while the character speaks
                    self.camera.disable();
                }
            }
            Some(InteractionTag::Guard(index)) => {
                self.scene.wave_guard(index);
                self.dialogue.show_transient("The guard waves back!");
            }
            Some(InteractionTag::Gate) => {
                self.toggle_gate();
            }
            None => {}
        }
    }

    fn toggle_gate(&mut self) {
        self.scene.toggle_gate();
        let message = if self.scene.gate().is_opening() {
            "The drawbridge lowers!"
        } else {
            "The drawbridge rises!"
        };
        self.dialogue.show_transient(message);
    }

    fn handle_key(&mut self, key: KeyCode, event_loop: &ActiveEventLoop) {
        match key {
            KeyCode::Escape => {
                if let Some(speaker) = self.dialogue.close() {
                    self.scene.set_highlight(speaker, false);
                    self.camera.enable();
                } else {
                    event_loop.exit();
                }
            }
            KeyCode::KeyB => {
                if self.balloon_game.phase() == LevelPhase::Idle {
                    self.balloon_game.restart();
                } else {
                    self.balloon_game.stop();
                }
            }
            KeyCode::KeyG => self.toggle_gate(),
            _ => {}
        }
    }

    fn window_size(&self) -> (f32, f32) {
        self.window
            .as_ref()
            .map(|w| {
                let size = w.inner_size();
                (size.width as f32, size.height as f32)
            })
            .unwrap_or((1280.0, 720.0))
    }

    // -- Frame ---------------------------------------------------------------

    fn update_and_render(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.frame_count += 1;
        let since_fps = now.duration_since(self.last_fps_update).as_secs_f32();
        if since_fps >= 1.0 {
            let fps = self.frame_count as f32 / since_fps;
            self.frame_count = 0;
            self.last_fps_update = now;
            if let Some(window) = &self.window {
                window.set_title(&format!("{WINDOW_TITLE} | FPS: {fps:.0}"));
            }
        }

        // Advance every system once per frame
        let shots = self.scene.update(delta);
        for _ in 0..shots {
            self.play_pop(0.5);
        }
        self.dialogue.update(delta);
        let guard_pops = self.balloon_game.update(delta);
        for _ in 0..guard_pops {
            self.play_pop(1.4);
        }
        self.camera.update(delta);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let elapsed = now.duration_since(self.start_time).as_secs_f32();
        let uniforms = SceneUniforms::compose(
            self.camera.view_projection_matrix(),
            self.camera.eye_position(),
            elapsed,
            &self.config.visuals,
        );
        gpu.write_uniforms(&uniforms);

        let dynamic_mesh = self.scene.build_dynamic_mesh();
        let dynamic_buffers = gpu.upload_mesh(&dynamic_mesh.vertices, &dynamic_mesh.indices);

        let overlay_mesh = self.hud.build(&self.balloon_game, &self.dialogue);
        let overlay_buffers = gpu.upload_mesh(&overlay_mesh.vertices, &overlay_mesh.indices);

        let mut scene_meshes: Vec<&MeshBuffers> = Vec::new();
        if let Some(buffers) = &self.static_buffers {
            scene_meshes.push(buffers);
        }
        if let Some(buffers) = &dynamic_buffers {
            scene_meshes.push(buffers);
        }
        let overlay_meshes: Vec<&MeshBuffers> = overlay_buffers.iter().collect();

        let sky = self.config.visuals.sky_zenith;
        let clear_color = wgpu::Color {
            r: sky.x as f64,
            g: sky.y as f64,
            b: sky.z as f64,
            a: 1.0,
        };

        match gpu.render(clear_color, &scene_meshes, &overlay_meshes) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = (gpu.config.width, gpu.config.height);
                gpu.resize(width, height);
            }
            Err(err) => log::warn!("frame dropped: {err}"),
        }
    }
}

impl ApplicationHandler for CastleFairApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = WindowAttributes::default()
                .with_title(WINDOW_TITLE)
                .with_inner_size(PhysicalSize::new(1280, 720));
            match event_loop.create_window(attrs) {
                Ok(window) => self.initialize(Arc::new(window), event_loop),
                Err(err) => {
                    log::error!("window creation failed: {err}");
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if event.state == ElementState::Pressed {
                        self.handle_key(key, event_loop);
                    }
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.pointer.position();
                if state == ElementState::Pressed {
                    self.pointer.pressed();
                    self.camera.pointer_pressed(x, y);
                } else {
                    let is_click = self.pointer.released();
                    self.camera.pointer_released();
                    if is_click {
                        self.handle_click(x, y);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.pointer.moved(x, y);
                self.camera.pointer_moved(x, y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.camera.zoom(scroll);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size.width, new_size.height);
                }
                self.camera.resize(new_size.width, new_size.height);
                self.hud
                    .resize(new_size.width as f32, new_size.height as f32);
                self.balloon_game
                    .resize(new_size.width as f32, new_size.height as f32);
            }
            WindowEvent::RedrawRequested => self.update_and_render(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("===========================================");
    println!("   Castle Fair");
    println!("===========================================");
    println!();
    println!("Drag: orbit camera  Wheel: zoom");
    println!("Click characters to talk, guards to wave, the gate to open it");
    println!("B: balloon game  G: gate  ESC: close/exit");
    println!();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config =
        AppConfig::load(config_path.as_deref()).context("loading configuration override")?;

    let event_loop = EventLoop::new().context("creating event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = CastleFairApp::new(config);
    event_loop.run_app(&mut app).context("running event loop")?;
    Ok(())
}
