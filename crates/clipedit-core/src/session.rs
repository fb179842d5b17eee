//! Editing session state
//!
//! Everything the editor needs between user actions lives here and is
//! passed to handlers explicitly: the loaded clip, the speed and volume
//! control values, the playback engine and whether it is currently playing.
//!
//! ```text
//!   load ──► Loaded ──play──► Playing ──stop / ended──► Loaded
//!              │                 │
//!              └──── export ◄────┘   (encode with current controls)
//! ```

use std::sync::Arc;

use thiserror::Error;

use crate::types::SampleBuffer;
use crate::wav::{encode, EncodeError, EncodeParams, RatePolicy, WavBytes};

/// Errors surfaced by session actions
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No clip loaded")]
    NothingLoaded,

    #[error("Playback failed: {0}")]
    Playback(String),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Black-box playback engine with live rate and gain controls
///
/// The session decides *when* to start, stop and retune; the engine owns
/// the audio device. Implementations should call back into
/// [`EditorSession::on_playback_ended`] (or equivalent) when a clip plays out.
pub trait PlaybackEngine {
    /// Start playing `buffer` from the beginning
    fn start(
        &mut self,
        buffer: Arc<SampleBuffer>,
        rate: f64,
        gain: f64,
    ) -> Result<(), SessionError>;

    /// Stop playback (no-op if idle)
    fn stop(&mut self);

    /// Change the playback rate of the active voice
    fn set_rate(&mut self, rate: f64);

    /// Change the gain of the active voice
    fn set_gain(&mut self, gain: f64);
}

/// Engine for headless hosts: accepts every command and plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEngine;

impl PlaybackEngine for NullEngine {
    fn start(
        &mut self,
        _buffer: Arc<SampleBuffer>,
        _rate: f64,
        _gain: f64,
    ) -> Result<(), SessionError> {
        Ok(())
    }

    fn stop(&mut self) {}

    fn set_rate(&mut self, _rate: f64) {}

    fn set_gain(&mut self, _gain: f64) {}
}

/// Format the speed control label, e.g. `1.5x`
pub fn speed_label(speed: f64) -> String {
    format!("{}x", speed)
}

/// Format the volume control label as a rounded percentage, e.g. `80%`
pub fn volume_label(volume: f64) -> String {
    format!("{}%", (volume * 100.0).round())
}

/// One editor window's worth of state
pub struct EditorSession<E: PlaybackEngine> {
    engine: E,
    buffer: Option<Arc<SampleBuffer>>,
    speed: f64,
    volume: f64,
    rate_policy: RatePolicy,
    is_playing: bool,
}

impl<E: PlaybackEngine> EditorSession<E> {
    /// Create an empty session with unity controls
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            buffer: None,
            speed: 1.0,
            volume: 1.0,
            rate_policy: RatePolicy::default(),
            is_playing: false,
        }
    }

    /// Set initial control values (e.g. from config)
    pub fn with_controls(mut self, speed: f64, volume: f64) -> Self {
        self.speed = speed;
        self.volume = volume;
        self
    }

    /// Choose how exported headers declare their sample rate
    pub fn with_rate_policy(mut self, rate_policy: RatePolicy) -> Self {
        self.rate_policy = rate_policy;
        self
    }

    /// Replace the loaded clip, stopping any playback of the previous one
    pub fn load(&mut self, buffer: SampleBuffer) {
        if self.is_playing {
            self.stop();
        }
        log::info!(
            "load: {} channels, {} frames @ {} Hz",
            buffer.channel_count(),
            buffer.frame_count(),
            buffer.sample_rate()
        );
        self.buffer = Some(Arc::new(buffer));
    }

    /// Currently loaded clip
    pub fn buffer(&self) -> Option<&SampleBuffer> {
        self.buffer.as_deref()
    }

    /// Play/stop/export are only meaningful once a clip is loaded
    pub fn controls_enabled(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Start playback with the current controls
    ///
    /// Ignored while already playing or when nothing is loaded.
    pub fn play(&mut self) -> Result<(), SessionError> {
        if self.is_playing {
            return Ok(());
        }
        let Some(buffer) = self.buffer.clone() else {
            return Ok(());
        };

        self.engine.start(buffer, self.speed, self.volume)?;
        self.is_playing = true;
        log::debug!("play: rate {}, gain {}", self.speed, self.volume);
        Ok(())
    }

    /// Stop playback
    pub fn stop(&mut self) {
        self.engine.stop();
        self.is_playing = false;
    }

    /// The engine finished playing the clip
    pub fn on_playback_ended(&mut self) {
        self.is_playing = false;
    }

    /// Update the speed control, retuning live playback
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
        if self.is_playing {
            self.engine.set_rate(speed);
        }
    }

    /// Update the volume control, retuning live playback
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
        if self.is_playing {
            self.engine.set_gain(volume);
        }
    }

    pub fn speed_label(&self) -> String {
        speed_label(self.speed)
    }

    pub fn volume_label(&self) -> String {
        volume_label(self.volume)
    }

    /// Encode the loaded clip with the current controls
    pub fn export(&self) -> Result<WavBytes, SessionError> {
        let buffer = self.buffer.as_deref().ok_or(SessionError::NothingLoaded)?;
        let params = EncodeParams::new(self.speed, self.volume).with_rate_policy(self.rate_policy);
        let wav = encode(buffer, &params)?;
        log::info!(
            "export: {} bytes (speed {}, volume {})",
            wav.len(),
            self.speed,
            self.volume
        );
        Ok(wav)
    }
}
