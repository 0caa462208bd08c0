//! Collaborator seams so `pyro-core` stays free of audio, input and drawing backends.

use serde::{Deserialize, Serialize};
use tracing::trace;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplosionKind {
    Standard,
    Heavy,
    Sutli,
    C4,
    Fire,
    Pop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchWeight {
    Standard,
    Heavy,
}

/// Named sound cue. The simulation fires these and never waits on the result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cue", rename_all = "snake_case")]
pub enum SoundCue {
    Tone {
        frequency: f32,
        waveform: Waveform,
        duration: f32,
        volume: f32,
    },
    Sparkle {
        volume: f32,
    },
    Explosion {
        kind: ExplosionKind,
        volume: f32,
    },
    Launch {
        weight: LaunchWeight,
    },
    Roar,
    Chime,
}

impl SoundCue {
    pub const fn explosion(kind: ExplosionKind, volume: f32) -> Self {
        SoundCue::Explosion { kind, volume }
    }

    pub const fn sparkle(volume: f32) -> Self {
        SoundCue::Sparkle { volume }
    }

    pub const fn launch(weight: LaunchWeight) -> Self {
        SoundCue::Launch { weight }
    }
}

/// Fire-and-forget sink for sound cues.
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Audio backend with an explicit lifecycle: lazily initialized on the first
/// user gesture, `init` is idempotent, `resume` wakes a suspended device.
pub trait AudioService: SoundSink + Send {
    fn init(&mut self) -> Result<()>;
    fn resume(&mut self) -> Result<()> {
        Ok(())
    }
    fn is_ready(&self) -> bool;
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silence;

impl SoundSink for Silence {
    fn play(&mut self, cue: SoundCue) {
        trace!(?cue, "silenced cue");
    }
}

/// Collects cues in order, for tests and offline inspection.
#[derive(Debug, Default, Clone)]
pub struct CueLog {
    pub cues: Vec<SoundCue>,
}

impl SoundSink for CueLog {
    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}

/// Events the input collaborator feeds into a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    Start,
    Stop,
    /// A tap or drag sample with the currently selected firework id.
    Tap { x: f32, y: f32, firework: String },
    Resize { width: f32, height: f32 },
}

/// Source of user input events.
pub trait InputSource: Send {
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

/// Pure sink for per-frame scene snapshots.
pub trait FrameRenderer<Frame> {
    fn init(&mut self) -> Result<()>;
    fn render_frame(&mut self, frame: &Frame) -> Result<()>;
    fn resize(&mut self, _width: f32, _height: f32) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_log_keeps_order() {
        let mut log = CueLog::default();
        log.play(SoundCue::Roar);
        log.play(SoundCue::sparkle(0.1));
        assert_eq!(
            log.cues,
            vec![SoundCue::Roar, SoundCue::Sparkle { volume: 0.1 }]
        );
    }

    #[test]
    fn const_constructors_match_variants() {
        assert_eq!(
            SoundCue::explosion(ExplosionKind::C4, 1.2),
            SoundCue::Explosion {
                kind: ExplosionKind::C4,
                volume: 1.2
            }
        );
        assert_eq!(
            SoundCue::launch(LaunchWeight::Heavy),
            SoundCue::Launch {
                weight: LaunchWeight::Heavy
            }
        );
    }

    #[test]
    fn silence_accepts_anything() {
        let mut sink = Silence;
        sink.play(SoundCue::Chime);
    }
}
