//! Fire-and-forget audio.
//!
//! The simulation only ever calls [`AudioSink::play`]; it never waits for
//! playback and never sees a failure. The SDL2_mixer implementation logs
//! and swallows everything that goes wrong, including missing sound files.

use std::collections::HashMap;
use std::path::Path;

use sdl2::mixer::{self, Chunk, InitFlag, DEFAULT_FORMAT};
use strum::IntoEnumIterator;
use tracing::{trace, warn};

use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter)]
pub enum SoundId {
    Pickup,
    Hurt,
    Explosion,
    Swing,
    GameOver,
}

impl SoundId {
    fn file_name(self) -> &'static str {
        match self {
            SoundId::Pickup => "pickup.ogg",
            SoundId::Hurt => "hurt.ogg",
            SoundId::Explosion => "explosion.ogg",
            SoundId::Swing => "swing.ogg",
            SoundId::GameOver => "game_over.ogg",
        }
    }
}

pub trait AudioSink {
    /// Triggers a sound. Non-blocking; failures must never reach the
    /// simulation.
    fn play(&mut self, sound: SoundId);

    fn set_mute(&mut self, _mute: bool) {}

    fn is_muted(&self) -> bool {
        false
    }
}

/// Sink that drops every sound. Used headless and in tests.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _sound: SoundId) {}
}

/// The audio system for the game, backed by SDL2_mixer.
pub struct SdlAudio {
    _mixer_context: mixer::Sdl2MixerContext,
    chunks: HashMap<SoundId, Chunk>,
    muted: bool,
}

const CHANNELS: i32 = 4;
const VOLUME: i32 = 32;

impl SdlAudio {
    /// Opens the mixer and loads every known sound from `sound_dir`.
    ///
    /// Individual missing sounds are tolerated (that sound becomes a no-op);
    /// only a mixer that cannot open at all is an error, and the caller is
    /// expected to fall back to [`NullAudio`] rather than abort.
    pub fn new(sound_dir: &Path) -> GameResult<Self> {
        let frequency = 44100;
        let chunk_size = 256;

        mixer::open_audio(frequency, DEFAULT_FORMAT, 1, chunk_size).map_err(GameError::Sdl)?;
        mixer::allocate_channels(CHANNELS);
        for i in 0..CHANNELS {
            mixer::Channel(i).set_volume(VOLUME);
        }

        let mixer_context = mixer::init(InitFlag::OGG).map_err(GameError::Sdl)?;

        let mut chunks = HashMap::new();
        for sound in SoundId::iter() {
            let path = sound_dir.join(sound.file_name());
            match Chunk::from_file(&path) {
                Ok(chunk) => {
                    chunks.insert(sound, chunk);
                }
                Err(e) => {
                    warn!(%sound, path = %path.display(), "could not load sound: {e}");
                }
            }
        }

        Ok(Self {
            _mixer_context: mixer_context,
            chunks,
            muted: false,
        })
    }
}

impl AudioSink for SdlAudio {
    fn play(&mut self, sound: SoundId) {
        if self.muted {
            return;
        }
        let Some(chunk) = self.chunks.get(&sound) else {
            return;
        };
        match mixer::Channel::all().play(chunk, 0) {
            Ok(channel) => {
                trace!(%sound, ?channel, "playing sound");
            }
            Err(e) => {
                warn!(%sound, "could not play sound: {e}");
            }
        }
    }

    /// Instantly mute or unmute all channels.
    fn set_mute(&mut self, mute: bool) {
        let volume = if mute { 0 } else { VOLUME };
        for i in 0..CHANNELS {
            mixer::Channel(i).set_volume(volume);
        }
        self.muted = mute;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
