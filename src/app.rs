//! Application driver: window, event pump, and the 60 Hz frame loop.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use glam::IVec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::EventPump;
use tracing::{error, event, warn};

use crate::assets::GameDocuments;
use crate::audio::{AudioSink, NullAudio, SdlAudio};
use crate::clock::{Clock, SystemClock};
use crate::constants::{LOOP_TIME, VIEWPORT_SIZE};
use crate::game::Game;
use crate::input::{Bindings, Buttons, InputSnapshot};
use crate::render::sdl::SdlRenderer;
use crate::script::NoopScript;

const ASSET_ROOT: &str = "assets";

pub struct App {
    game: Game,
    renderer: SdlRenderer,
    event_pump: EventPump,
    bindings: Bindings,
    clock: SystemClock,
    paused: bool,
    // Keeps SDL audio alive for the mixer.
    _audio_subsystem: Option<sdl2::AudioSubsystem>,
}

impl App {
    pub fn new() -> Result<Self> {
        let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
        let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
        let audio_subsystem = sdl_context.audio().ok();

        let window = video_subsystem
            .window("Emberfield", VIEWPORT_SIZE.x, VIEWPORT_SIZE.y)
            .position_centered()
            .build()?;

        let mut canvas = window.into_canvas().build()?;
        canvas.set_logical_size(VIEWPORT_SIZE.x, VIEWPORT_SIZE.y)?;

        let asset_root = Path::new(ASSET_ROOT);
        let mut renderer = SdlRenderer::new(canvas, &asset_root.join("fonts/hud.ttf"), 24)?;

        // Audio is best-effort: a machine without a sound device still runs
        // the game.
        let audio: Box<dyn AudioSink> = match audio_subsystem
            .as_ref()
            .ok_or_else(|| anyhow!("no audio subsystem"))
            .and_then(|_| SdlAudio::new(&asset_root.join("sounds")).map_err(|e| anyhow!(e)))
        {
            Ok(audio) => Box::new(audio),
            Err(e) => {
                warn!("audio unavailable, continuing silent: {e}");
                Box::new(NullAudio)
            }
        };

        let docs = GameDocuments::load(asset_root)?;
        let clock = SystemClock;
        let game = Game::new(
            &mut renderer,
            &docs,
            audio,
            Box::new(NoopScript),
            SmallRng::from_os_rng(),
            clock.now(),
            asset_root,
        )?;

        let event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;

        Ok(Self {
            game,
            renderer,
            event_pump,
            bindings: Bindings::default(),
            clock,
            paused: false,
            _audio_subsystem: audio_subsystem,
        })
    }

    /// One iteration of the frame loop. Returns false when the app should
    /// exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let mut pressed = Buttons::empty();
        let mut click = None;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape) | Some(Keycode::Q),
                    ..
                } => {
                    event!(tracing::Level::INFO, "Exit requested. Exiting...");
                    return false;
                }
                Event::KeyDown {
                    keycode: Some(Keycode::P),
                    repeat: false,
                    ..
                } => {
                    self.paused = !self.paused;
                    event!(
                        tracing::Level::INFO,
                        "{}",
                        if self.paused { "Paused" } else { "Unpaused" }
                    );
                }
                Event::KeyDown {
                    keycode: Some(Keycode::M),
                    repeat: false,
                    ..
                } => {
                    let muted = self.game.is_muted();
                    self.game.set_muted(!muted);
                }
                Event::KeyDown {
                    scancode: Some(scancode),
                    repeat: false,
                    ..
                } => {
                    if let Some(button) = self.bindings.button(scancode) {
                        pressed |= button;
                    }
                }
                Event::MouseButtonDown { x, y, .. } => {
                    click = Some(IVec2::new(x, y));
                }
                _ => {}
            }
        }

        let held = self.bindings.held(&self.event_pump.keyboard_state());
        let input = InputSnapshot { held, pressed, click };

        if !self.paused {
            self.game.tick(&input, self.clock.now());
            if let Err(e) = self.game.draw(&mut self.renderer) {
                error!("Failed to draw frame: {e}");
            }
        }

        if start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                spin_sleep::sleep(time);
            }
        } else {
            event!(
                tracing::Level::WARN,
                "Game loop behind schedule by: {:?}",
                start.elapsed() - LOOP_TIME
            );
        }

        true
    }
}
