//! Frame-stepped session: feeds input into the scene and paces it at a fixed rate.

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, TryRecvError};
use glam::Vec2;
use pyro_core::scene::kind_or_fallback;
use pyro_core::{FrameSnapshot, Scene, SceneEvent};
use pyro_platform::{AudioService, FrameRenderer, InputEvent, Result};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: u64,
    pub taps: u64,
    pub finales: u64,
    pub disturbances: u64,
}

pub struct Session<A, R> {
    scene: Scene,
    audio: A,
    renderer: R,
    inputs: Receiver<InputEvent>,
    frame_time: Duration,
    stats: SessionStats,
    disconnected: bool,
}

impl<A, R> Session<A, R>
where
    A: AudioService,
    R: FrameRenderer<FrameSnapshot>,
{
    pub fn new(
        scene: Scene,
        audio: A,
        renderer: R,
        inputs: Receiver<InputEvent>,
        fps: u32,
    ) -> Self {
        Self {
            scene,
            audio,
            renderer,
            inputs,
            frame_time: Duration::from_secs(1) / fps.max(1),
            stats: SessionStats::default(),
            disconnected: false,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Run `frames` paced frames, or until the input side hangs up.
    pub fn run(&mut self, frames: u64) -> Result<SessionStats> {
        self.renderer.init()?;
        info!(
            frames,
            frame_ms = self.frame_time.as_secs_f64() * 1000.0,
            "session running"
        );
        let started = Instant::now();
        for n in 1..=frames {
            self.tick()?;
            if self.disconnected && !self.scene.is_active() {
                debug!("inputs closed and scene stopped");
                break;
            }
            let due = started.checked_add(pace_offset(self.frame_time, n));
            if let Some(wait) = due.and_then(|due| due.checked_duration_since(Instant::now())) {
                thread::sleep(wait);
            }
        }
        info!(stats = ?self.stats, "session finished");
        Ok(self.stats)
    }

    /// One frame: pending input, one simulation step, events, then drawing.
    pub fn tick(&mut self) -> Result<()> {
        self.drain_inputs()?;
        if !self.scene.is_active() {
            return Ok(());
        }
        self.scene.step(&mut self.audio);
        for event in self.scene.take_events() {
            match event {
                SceneEvent::FinaleStarted => {
                    self.stats.finales += 1;
                    info!("finale!");
                }
                SceneEvent::DisturbanceStarted { text } => {
                    self.stats.disturbances += 1;
                    info!(%text, "the neighbors are yelling");
                }
            }
        }
        self.stats.frames += 1;
        self.renderer.render_frame(&self.scene.snapshot())
    }

    fn drain_inputs(&mut self) -> Result<()> {
        loop {
            match self.inputs.try_recv() {
                Ok(event) => self.handle(event)?,
                Err(TryRecvError::Empty) => return Ok(()),
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        warn!("input source disconnected");
                        self.disconnected = true;
                    }
                    return Ok(());
                }
            }
        }
    }

    fn handle(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::Start => self.scene.start(),
            InputEvent::Stop => self.scene.stop(),
            InputEvent::Resize { width, height } => {
                self.scene.resize(width, height);
                self.renderer.resize(width, height)?;
            }
            InputEvent::Tap { x, y, firework } => {
                if !self.scene.is_active() {
                    return Ok(());
                }
                // First gesture wakes the audio device.
                if !self.audio.is_ready() {
                    self.audio.init()?;
                }
                self.audio.resume()?;
                self.stats.taps += 1;
                let kind = kind_or_fallback(&firework);
                self.scene.tap(Vec2::new(x, y), kind, &mut self.audio);
            }
        }
        Ok(())
    }
}

/// Offset of frame `n` from the start of the run, saturating instead of wrapping.
fn pace_offset(frame_time: Duration, n: u64) -> Duration {
    let nanos = frame_time.as_nanos().saturating_mul(u128::from(n));
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
