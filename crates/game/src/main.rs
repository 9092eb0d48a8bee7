//! Rat Plague - sneak a rat past traps and a patrolling roomba to reach the human

mod assets;
mod config;
mod error;
mod events;
mod hud;
mod locomotion;
mod outcome;
mod patrol;
mod room;
mod session;
mod state;
mod tuning;

use anyhow::Result;
use engine_core::FrameClock;
use input::KeyBindings;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use assets::AssetLoader;
use config::GameConfig;
use session::GameSession;
use state::GamePhase;

/// Frames between debug position reports.
const REPORT_INTERVAL: u64 = 300;

/// Application handler for winit. Drives one [`GameSession`] per redraw.
pub(crate) struct App {
    config: GameConfig,
    session: GameSession,
    bindings: KeyBindings,
    clock: FrameClock,
    window: Option<Arc<Window>>,
    /// Models still being read before play can start.
    loader: Option<AssetLoader>,
    title: String,
}

impl App {
    fn new(config: GameConfig) -> Result<Self> {
        let mut session = GameSession::new(&config)?;
        let loader = if session.phase == GamePhase::Loading {
            match AssetLoader::spawn(config.asset_paths.clone()) {
                Ok(loader) => Some(loader),
                Err(e) => {
                    session.complete_loading(Err(e));
                    None
                }
            }
        } else {
            None
        };
        Ok(Self {
            config,
            session,
            bindings: KeyBindings::default(),
            clock: FrameClock::new(),
            window: None,
            loader,
            title: String::new(),
        })
    }

    /// One display refresh: fixed-step gameplay, then HUD.
    pub(crate) fn frame(&mut self) {
        if let Some(loaded) = self.loader.as_ref().and_then(AssetLoader::poll) {
            self.loader = None;
            self.session.complete_loading(loaded);
            for model in self.session.models() {
                log::debug!("Model {:?} ready ({} bytes)", model.path, model.bytes.len());
            }
        }

        let dt = self.clock.tick();
        self.session.update(dt);

        if self.clock.frame_count() % REPORT_INTERVAL == 0 {
            log::debug!(
                "frame {} ({:.0} fps, {:.1}s simulated): rat {:?}, roomba {:?}",
                self.clock.frame_count(),
                self.clock.fps(),
                self.clock.simulated_seconds(),
                self.session.transform(self.session.room.player).map(|t| t.position),
                self.session.hazard_position()
            );
        }

        if let Some(window) = &self.window {
            let title = self.session.hud.summary();
            if title != self.title {
                window.set_title(&title);
                self.title = title;
            }
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("Rat Plague")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window_width,
                    self.config.window_height,
                ));

            match event_loop.create_window(window_attrs) {
                Ok(w) => {
                    let window = Arc::new(w);
                    window.request_redraw();
                    self.window = Some(window);
                }
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.handle_window_event(event) {
            event_loop.exit();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════╗");
    println!("║                   RAT PLAGUE                     ║");
    println!("╠══════════════════════════════════════════════════╣");
    println!("║  Reach the human. Avoid the traps and the roomba ║");
    println!("║    WASD  - Move        │  Shift - Dash (3s cd)   ║");
    println!("║    R     - Restart after the round ends          ║");
    println!("╚══════════════════════════════════════════════════╝");

    let config = GameConfig::load();
    log::info!("Starting Rat Plague ({:?})", config.variant);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
