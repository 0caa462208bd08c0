//! The scene orchestrator: owns every live entity and advances them once per frame.

use glam::Vec2;
use pyro_platform::{SoundCue, SoundSink, Waveform};
use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use crate::config::SceneConfig;
use crate::firework::{Firework, FireworkKind};
use crate::frame::{Effects, FrameContext};
use crate::particle::Particle;
use crate::render::FrameSnapshot;
use crate::sub_burst;
use crate::watcher::Watcher;
use crate::Bounds;

/// Simulated frame rate used to derive elapsed time from the frame counter.
pub const FRAME_RATE: f64 = 60.0;

const GRUMBLE: SoundCue = SoundCue::Tone {
    frequency: 120.0,
    waveform: Waveform::Sawtooth,
    duration: 0.4,
    volume: 0.2,
};

/// Notifications for the UI collaborator, drained with [`Scene::take_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    FinaleStarted,
    DisturbanceStarted { text: String },
}

/// Outcome of one moon hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoonHit {
    /// Hits counted toward the next finale, after this one.
    pub hits: u32,
    pub finale_started: bool,
}

/// The angry-neighbor state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Disturbance {
    pub active: bool,
    pub timer: u32,
    pub text: String,
}

/// Parse a firework id from the UI, falling back to a plain spark bomb.
pub fn kind_or_fallback(id: &str) -> FireworkKind {
    id.parse().unwrap_or_else(|err| {
        warn!(%err, "falling back to spark bomb");
        FireworkKind::SparkBomb
    })
}

pub struct Scene {
    config: SceneConfig,
    bounds: Bounds,
    rng: StdRng,
    frame: u64,
    active: bool,
    particles: Vec<Particle>,
    fireworks: Vec<Firework>,
    watcher: Option<Watcher>,
    disturbance: Disturbance,
    finale_timer: u32,
    shake_timer: u32,
    moon_hits: u32,
    events: Vec<SceneEvent>,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Reproducible scene for tests and replays.
    pub fn with_seed(config: SceneConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SceneConfig, rng: StdRng) -> Self {
        Self {
            config,
            bounds: Bounds::default(),
            rng,
            frame: 0,
            active: false,
            particles: Vec::new(),
            fireworks: Vec::new(),
            watcher: None,
            disturbance: Disturbance::default(),
            finale_timer: 0,
            shake_timer: 0,
            moon_hits: 0,
            events: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        if !self.active {
            info!("scene started");
        }
        self.active = true;
    }

    pub fn stop(&mut self) {
        if self.active {
            info!(frame = self.frame, "scene stopped");
        }
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// New scene size. The watcher appears on the first valid size and is
    /// moved onto the new ground line afterwards.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::new(width, height);
        if !self.bounds.is_valid() {
            warn!(width, height, "ignoring degenerate scene size");
            return;
        }
        debug!(width, height, "scene resized");
        match &mut self.watcher {
            Some(watcher) => watcher.rebase(height),
            None => self.watcher = Some(Watcher::new(self.config.watcher.clone(), self.bounds)),
        }
    }

    /// Advance one frame.
    pub fn step(&mut self, audio: &mut dyn SoundSink) {
        if !self.active {
            return;
        }
        if !self.bounds.is_valid() {
            trace!("no valid bounds yet; frame deferred");
            return;
        }
        self.frame += 1;
        let ctx = FrameContext {
            bounds: self.bounds,
            elapsed_ms: self.frame as f64 * 1000.0 / FRAME_RATE,
            footprint: self.config.disturbance.footprint,
            mini_chance: self.config.disturbance.mini_chance,
        };
        let mut fx = Effects::default();

        if self.disturbance.active {
            self.disturbance.timer = self.disturbance.timer.saturating_sub(1);
            if self.disturbance.timer == 0 {
                self.disturbance.active = false;
                debug!("disturbance over");
            }
        }
        self.shake_timer = self.shake_timer.saturating_sub(1);

        if self.finale_timer > 0 {
            self.finale_timer -= 1;
            if self.finale_timer % self.config.finale.cadence == 0 {
                self.launch_finale_shell(&mut fx);
            }
        }

        if let Some(watcher) = &mut self.watcher {
            watcher.update(&self.fireworks, &ctx, &mut self.rng, &mut fx);
        }

        for firework in &mut self.fireworks {
            firework.advance(&ctx, &mut self.rng, &mut fx);
        }
        self.fireworks.retain(|fw| !fw.is_dead());

        let rng = &mut self.rng;
        self.particles.retain_mut(|particle| {
            particle.advance(ctx.bounds, ctx.elapsed_ms, rng, &mut fx.particles);
            if !particle.is_dead() {
                return true;
            }
            if let Some(cue) = sub_burst::resolve(particle, rng, &mut fx.particles) {
                fx.play(cue);
            }
            false
        });

        self.apply(fx, audio);
    }

    /// Drain the outbox collected during the pass into the live scene.
    fn apply(&mut self, fx: Effects, audio: &mut dyn SoundSink) {
        let Effects {
            particles,
            fireworks,
            cues,
            disturbance,
            shake,
        } = fx;
        self.particles.extend(particles);
        self.fireworks.extend(fireworks);
        if disturbance {
            self.trigger_disturbance(audio);
        }
        self.shake_timer = self.shake_timer.max(shake);
        for cue in cues {
            audio.play(cue);
        }
    }

    fn trigger_disturbance(&mut self, audio: &mut dyn SoundSink) {
        if self.disturbance.active {
            return;
        }
        let text = self
            .config
            .disturbance
            .messages
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();
        self.disturbance = Disturbance {
            active: true,
            timer: self.config.disturbance.duration,
            text: text.clone(),
        };
        audio.play(GRUMBLE);
        if let Some(watcher) = &mut self.watcher {
            if !watcher.is_sheltered() {
                watcher.run_hide();
            }
        }
        info!(%text, "neighbors disturbed");
        self.events.push(SceneEvent::DisturbanceStarted { text });
    }

    fn launch_finale_shell(&mut self, fx: &mut Effects) {
        let Some(kind) = FireworkKind::aerials().choose(&mut self.rng) else {
            return;
        };
        let x = self.rng.gen_range(0.0..self.bounds.width);
        let y = self.bounds.height * self.rng.gen_range(0.1..0.5);
        trace!(%kind, x, y, "finale shell");
        let shell = Firework::launch(kind, Vec2::new(x, y), Some(y), self.bounds, &mut self.rng);
        fx.fireworks.push(shell);
        if let Some(cue) = kind.launch_cue() {
            fx.play(cue);
        }
    }

    /// Launch `kind` from the ground below `point`; aerials climb to `point.y`.
    pub fn spawn_firework(&mut self, kind: FireworkKind, point: Vec2, audio: &mut dyn SoundSink) {
        if !self.bounds.is_valid() {
            trace!(%kind, "spawn before layout ignored");
            return;
        }
        let origin = Vec2::new(point.x, self.bounds.ground_y());
        let target = kind.is_ascending().then_some(point.y);
        debug!(%kind, x = point.x, y = point.y, "spawn firework");
        let firework = Firework::launch(kind, origin, target, self.bounds, &mut self.rng);
        self.fireworks.push(firework);
        if let Some(cue) = kind.launch_cue() {
            audio.play(cue);
        }
    }

    /// Like [`Scene::spawn_firework`], for ids coming from the UI. Unknown ids
    /// fall back to a plain spark bomb.
    pub fn spawn_firework_by_id(&mut self, id: &str, point: Vec2, audio: &mut dyn SoundSink) {
        self.spawn_firework(kind_or_fallback(id), point, audio);
    }

    /// Make the watcher celebrate when `point` lands on it.
    pub fn interact_with_watcher(&mut self, point: Vec2) -> bool {
        match &mut self.watcher {
            Some(watcher) if watcher.contains(point) => watcher.interact(),
            _ => false,
        }
    }

    /// Moon center in scene units.
    pub fn moon(&self) -> Vec2 {
        let finale = &self.config.finale;
        Vec2::new(
            self.bounds.width * finale.moon_x,
            self.bounds.height * finale.moon_y,
        )
    }

    pub fn hits_moon(&self, point: Vec2) -> bool {
        self.bounds.is_valid() && point.distance(self.moon()) < self.config.finale.moon_radius
    }

    /// Fire a moon shot at the tapped `point` and count the hit. Reaching the
    /// threshold resets the count and starts the finale.
    pub fn register_moon_hit(&mut self, point: Vec2, audio: &mut dyn SoundSink) -> MoonHit {
        self.spawn_firework(FireworkKind::MoonShot, point, audio);
        self.moon_hits += 1;
        if self.moon_hits < self.config.finale.moon_hits {
            debug!(hits = self.moon_hits, "moon hit");
            return MoonHit {
                hits: self.moon_hits,
                finale_started: false,
            };
        }
        self.moon_hits = 0;
        self.finale_timer = self.config.finale.duration;
        info!(frames = self.finale_timer, "finale started");
        self.events.push(SceneEvent::FinaleStarted);
        MoonHit {
            hits: 0,
            finale_started: true,
        }
    }

    /// Route a raw tap: moon first, then the watcher, then a launch of `kind`.
    pub fn tap(&mut self, point: Vec2, kind: FireworkKind, audio: &mut dyn SoundSink) {
        if self.hits_moon(point) {
            self.register_moon_hit(point, audio);
            return;
        }
        if self.watcher.as_ref().is_some_and(|w| !w.is_sheltered() && w.contains(point)) {
            self.interact_with_watcher(point);
            return;
        }
        let inside = (0.0..=self.bounds.width).contains(&point.x)
            && (0.0..=self.bounds.height).contains(&point.y);
        if inside {
            self.spawn_firework(kind, point, audio);
        }
    }

    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn watcher(&self) -> Option<&Watcher> {
        self.watcher.as_ref()
    }

    pub fn watcher_mut(&mut self) -> Option<&mut Watcher> {
        self.watcher.as_mut()
    }

    pub fn disturbance(&self) -> &Disturbance {
        &self.disturbance
    }

    pub fn finale_timer(&self) -> u32 {
        self.finale_timer
    }

    pub fn moon_hits(&self) -> u32 {
        self.moon_hits
    }

    pub fn shake_timer(&self) -> u32 {
        self.shake_timer
    }

    /// Jitter amplitude for the renderer, capped.
    pub fn shake_intensity(&self) -> u32 {
        self.shake_timer.min(self.config.shake_cap())
    }
}
