//! Headless audio backend: logs cues instead of synthesizing them.

use std::collections::BTreeMap;

use pyro_platform::{AudioService, Result, SoundCue, SoundSink};
use tracing::{debug, info, trace};

/// Counts cues per name once initialized; cues before the first gesture are dropped.
#[derive(Debug, Default)]
pub struct LogAudio {
    ready: bool,
    played: BTreeMap<&'static str, u64>,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> &BTreeMap<&'static str, u64> {
        &self.played
    }

    pub fn total(&self) -> u64 {
        self.played.values().sum()
    }
}

fn cue_name(cue: &SoundCue) -> &'static str {
    match cue {
        SoundCue::Tone { .. } => "tone",
        SoundCue::Sparkle { .. } => "sparkle",
        SoundCue::Explosion { .. } => "explosion",
        SoundCue::Launch { .. } => "launch",
        SoundCue::Roar => "roar",
        SoundCue::Chime => "chime",
    }
}

impl SoundSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        if !self.ready {
            trace!(?cue, "audio not initialized; cue dropped");
            return;
        }
        debug!(?cue, "cue");
        *self.played.entry(cue_name(&cue)).or_default() += 1;
    }
}

impl AudioService for LogAudio {
    fn init(&mut self) -> Result<()> {
        if !self.ready {
            info!("audio initialized (log backend)");
            self.ready = true;
        }
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyro_platform::{ExplosionKind, LaunchWeight};

    #[test]
    fn cues_before_init_are_dropped() {
        let mut audio = LogAudio::new();
        audio.play(SoundCue::Roar);
        assert_eq!(audio.total(), 0);
        assert!(!audio.is_ready());
    }

    #[test]
    fn init_is_idempotent_and_counts_by_name() {
        let mut audio = LogAudio::new();
        audio.init().unwrap();
        audio.init().unwrap();
        audio.resume().unwrap();
        audio.play(SoundCue::explosion(ExplosionKind::C4, 1.0));
        audio.play(SoundCue::explosion(ExplosionKind::Pop, 0.1));
        audio.play(SoundCue::launch(LaunchWeight::Heavy));
        assert_eq!(audio.played().get("explosion"), Some(&2));
        assert_eq!(audio.played().get("launch"), Some(&1));
        assert_eq!(audio.total(), 3);
    }
}
