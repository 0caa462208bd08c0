//! The little spectator who lives by the shelter.
//!
//! A priority-gated state machine. Sensing nearby fireworks can pre-empt the
//! current state: a burning ground piece within the danger radius always
//! sends the watcher home unless they are already sheltered, and once running
//! home nothing but reaching the shelter changes that.

use glam::Vec2;
use rand::seq::IteratorRandom;
use rand::Rng;
use tracing::debug;

use crate::color::Color;
use crate::config::WatcherConfig;
use crate::firework::blast::between;
use crate::firework::{Firework, FireworkKind};
use crate::frame::{Effects, FrameContext};
use crate::particle::Particle;
use crate::{Bounds, PIXEL_SIZE};

pub const BODY_WIDTH: f32 = PIXEL_SIZE * 3.0;
pub const BODY_HEIGHT: f32 = PIXEL_SIZE * 6.0;
/// Distance from the scene edges the watcher never crosses.
const EDGE: f32 = 20.0;
/// Close enough to a walk target to call it reached.
const ARRIVED: f32 = 5.0;
const EMOTION_FRAMES: u32 = 60;
const HIDE_FRAMES: u32 = 200;
const LIGHT_AT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gait {
    Stroll,
    /// Walking away from a freshly lit firework.
    Hurry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    Idle,
    Walking(Gait),
    RunningHome,
    Hiding,
    Peeking,
    Watching,
    Cowering,
    Celebrating,
    Lighting,
}

impl WatcherState {
    pub fn label(self) -> &'static str {
        match self {
            WatcherState::Idle => "IDLE",
            WatcherState::Walking(_) => "WALKING",
            WatcherState::RunningHome => "RUNNING_HOME",
            WatcherState::Hiding => "HIDING",
            WatcherState::Peeking => "PEEKING",
            WatcherState::Watching => "WATCHING",
            WatcherState::Cowering => "COWERING",
            WatcherState::Celebrating => "CELEBRATING",
            WatcherState::Lighting => "LIGHTING",
        }
    }

    pub fn is_sheltered(self) -> bool {
        matches!(self, WatcherState::Hiding | WatcherState::Peeking)
    }

    fn sparkler_lit(self) -> bool {
        !matches!(
            self,
            WatcherState::Hiding
                | WatcherState::Peeking
                | WatcherState::Cowering
                | WatcherState::RunningHome
                | WatcherState::Walking(Gait::Hurry)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emotion {
    pub text: &'static str,
    pub frames_left: u32,
}

#[derive(Debug, Clone)]
pub struct Watcher {
    /// Top-left corner of the body.
    pub pos: Vec2,
    base_y: f32,
    target_x: f32,
    state: WatcherState,
    timer: u32,
    walk_frame: u32,
    facing: f32,
    emotion: Option<Emotion>,
    config: WatcherConfig,
}

impl Watcher {
    pub fn new(config: WatcherConfig, bounds: Bounds) -> Self {
        let base_y = Self::baseline(bounds.height);
        Self {
            pos: Vec2::new(config.start_x, base_y),
            base_y,
            target_x: config.start_x,
            state: WatcherState::Idle,
            timer: 60,
            walk_frame: 0,
            facing: 1.0,
            emotion: None,
            config,
        }
    }

    fn baseline(height: f32) -> f32 {
        height - crate::GROUND_OFFSET - BODY_HEIGHT
    }

    pub fn state(&self) -> WatcherState {
        self.state
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn walk_frame(&self) -> u32 {
        self.walk_frame
    }

    pub fn target_x(&self) -> f32 {
        self.target_x
    }

    /// The current emotion token, while it is still showing.
    pub fn emotion(&self) -> Option<&Emotion> {
        self.emotion.as_ref().filter(|e| e.frames_left > 0)
    }

    pub fn is_sheltered(&self) -> bool {
        self.state.is_sheltered()
    }

    /// Horizontal speed the current state moves at.
    pub fn speed(&self) -> f32 {
        match self.state {
            WatcherState::Walking(Gait::Stroll) => self.config.stroll_speed,
            WatcherState::Walking(Gait::Hurry) => self.config.hurry_speed,
            WatcherState::RunningHome => self.config.panic_speed,
            _ => 0.0,
        }
    }

    /// Move onto the new ground line after a resize. A sheltered watcher
    /// keeps their spot until they come out.
    pub fn rebase(&mut self, height: f32) {
        self.base_y = Self::baseline(height);
        if !self.is_sheltered() {
            self.pos.y = self.base_y;
        }
    }

    /// Tap hit box: the body plus a little headroom.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.pos.x + BODY_WIDTH
            && point.y >= self.pos.y - 10.0
            && point.y <= self.pos.y + BODY_HEIGHT
    }

    /// Start celebrating. Ignored while sheltered or running home.
    pub fn interact(&mut self) -> bool {
        if self.is_sheltered() || !self.set_state(WatcherState::Celebrating, 60) {
            return false;
        }
        self.pos.y = self.base_y - 10.0;
        true
    }

    /// Head for the shelter.
    pub fn run_hide(&mut self) {
        self.target_x = self.config.shelter_x;
        self.set_state(WatcherState::RunningHome, 60);
    }

    fn set_state(&mut self, next: WatcherState, frames: u32) -> bool {
        if self.state == next && !matches!(next, WatcherState::Walking(_)) {
            return false;
        }
        match self.state {
            WatcherState::RunningHome if next != WatcherState::Hiding => return false,
            WatcherState::Hiding
                if !matches!(next, WatcherState::Peeking | WatcherState::Idle) =>
            {
                return false
            }
            _ => {}
        }

        debug!(
            from = self.state.label(),
            to = next.label(),
            frames,
            "watcher state"
        );
        self.state = next;
        self.timer = frames;
        if matches!(next, WatcherState::Idle | WatcherState::Watching) {
            self.walk_frame = 0;
        }
        let emotion = match next {
            WatcherState::RunningHome => Some("!!!"),
            WatcherState::Cowering => Some(">.<"),
            WatcherState::Celebrating => Some("^o^"),
            WatcherState::Watching => Some("O_O"),
            _ => None,
        };
        if let Some(text) = emotion {
            self.emote(text);
        }
        true
    }

    fn emote(&mut self, text: &'static str) {
        self.emotion = Some(Emotion {
            text,
            frames_left: EMOTION_FRAMES,
        });
    }

    pub fn update(
        &mut self,
        fireworks: &[Firework],
        ctx: &FrameContext,
        rng: &mut impl Rng,
        fx: &mut Effects,
    ) {
        self.timer = self.timer.saturating_sub(1);
        if let Some(emotion) = &mut self.emotion {
            emotion.frames_left = emotion.frames_left.saturating_sub(1);
        }

        self.sparkle(rng, fx);

        match self.state {
            WatcherState::Hiding => {
                if self.timer == 0 {
                    self.set_state(WatcherState::Peeking, 60);
                }
                return;
            }
            WatcherState::Peeking => {
                if self.timer == 0 {
                    self.peek(fireworks);
                }
                return;
            }
            _ => {}
        }

        self.sense(fireworks, rng);

        match self.state {
            WatcherState::RunningHome => {
                if (self.pos.x - self.config.shelter_x).abs() < ARRIVED {
                    self.set_state(WatcherState::Hiding, HIDE_FRAMES);
                    self.emotion = None;
                }
            }
            WatcherState::Cowering => {
                self.pos.x += (rng.gen::<f32>() - 0.5) * 2.0;
                if self.timer == 0 {
                    self.set_state(WatcherState::Idle, 60);
                }
            }
            WatcherState::Watching => {
                if self.timer == 0 {
                    self.set_state(WatcherState::Idle, 60);
                }
            }
            WatcherState::Celebrating => {
                self.pos.y = if self.timer % 20 < 10 { self.base_y - 5.0 } else { self.base_y };
                if self.timer == 0 {
                    self.pos.y = self.base_y;
                    self.set_state(WatcherState::Idle, 60);
                }
            }
            WatcherState::Lighting => {
                if self.timer == LIGHT_AT {
                    self.light(ctx.bounds, rng, fx);
                }
                if self.timer == 0 {
                    let away = self.pos.x - self.facing * 100.0;
                    self.target_x = away.clamp(EDGE, ctx.bounds.width - EDGE);
                    self.set_state(WatcherState::Walking(Gait::Hurry), 60);
                }
            }
            WatcherState::Idle => {
                if self.timer == 0 {
                    self.decide(fireworks.len(), ctx.bounds, rng);
                }
            }
            WatcherState::Walking(_) => {
                if (self.pos.x - self.target_x).abs() < ARRIVED || self.timer == 0 {
                    self.set_state(WatcherState::Idle, 60);
                }
            }
            WatcherState::Hiding | WatcherState::Peeking => {}
        }

        if matches!(self.state, WatcherState::Walking(_) | WatcherState::RunningHome) {
            let dist = self.target_x - self.pos.x;
            if dist.abs() > 2.0 {
                let dir = dist.signum();
                self.pos.x += dir * self.speed();
                self.facing = dir;
                self.walk_frame += 1;
            }
        }
        self.pos.x = self.pos.x.clamp(EDGE, (ctx.bounds.width - EDGE).max(EDGE));
    }

    fn sense(&mut self, fireworks: &[Firework], rng: &mut impl Rng) {
        let cfg = &self.config;
        let mut danger = f32::INFINITY;
        let mut noise = f32::INFINITY;
        let mut beauty = f32::INFINITY;
        for fw in fireworks.iter().filter(|f| !f.is_dead()) {
            let spec = fw.kind.spec();
            let dist = (fw.pos.x - self.pos.x).abs();
            if spec.ground && fw.life > 0 {
                danger = danger.min(dist);
            }
            if spec.loud && fw.life > 0 && fw.life < 10 {
                noise = noise.min(dist);
            }
            if !spec.ground && fw.vel.y < -2.0 {
                beauty = beauty.min(dist);
            }
        }

        if danger < cfg.danger_radius {
            self.run_hide();
            return;
        }
        if !matches!(self.state, WatcherState::Idle | WatcherState::Walking(_)) {
            return;
        }
        if noise < cfg.noise_radius {
            self.set_state(WatcherState::Cowering, 40);
            return;
        }
        if beauty < cfg.beauty_radius && rng.gen::<f32>() < cfg.watch_chance {
            let look_at = cfg.shelter_x + 200.0;
            if self.set_state(WatcherState::Watching, 100) {
                self.facing = if look_at >= self.pos.x { 1.0 } else { -1.0 };
            }
        }
    }

    fn peek(&mut self, fireworks: &[Firework]) {
        let (shelter, clearance) = (self.config.shelter_x, self.config.shelter_clearance);
        let crowded = fireworks
            .iter()
            .any(|fw| !fw.is_dead() && (fw.pos.x - shelter).abs() < clearance);
        if crowded {
            self.set_state(WatcherState::Hiding, 60);
            return;
        }
        self.pos = Vec2::new(shelter, self.base_y);
        self.target_x = shelter + 50.0;
        self.set_state(WatcherState::Walking(Gait::Stroll), 60);
        self.emote("Safe");
    }

    fn decide(&mut self, live: usize, bounds: Bounds, rng: &mut impl Rng) {
        let r: f32 = rng.gen();
        if r < 0.3 && live < self.config.lighting_cap {
            self.set_state(WatcherState::Lighting, 60);
        } else if r < 0.7 {
            self.target_x = 80.0 + between(rng, 0.0, (bounds.width - 100.0).max(0.0));
            let frames = rng.gen_range(100..=200);
            self.set_state(WatcherState::Walking(Gait::Stroll), frames);
        } else {
            self.timer = rng.gen_range(60..=120);
        }
    }

    fn light(&mut self, bounds: Bounds, rng: &mut impl Rng, fx: &mut Effects) {
        let Some(kind) = FireworkKind::public().choose(rng) else {
            return;
        };
        let origin = Vec2::new(self.pos.x + self.facing * 20.0, bounds.ground_y());
        let target = kind
            .is_ascending()
            .then(|| between(rng, bounds.height * 0.1, bounds.height * 0.5));
        debug!(%kind, x = origin.x, "watcher lit a firework");
        fx.fireworks.push(Firework::launch(kind, origin, target, bounds, rng));
        if let Some(cue) = kind.launch_cue() {
            fx.play(cue);
        }
        self.emote("Run!");
    }

    /// Tip of the handheld sparkler for the current pose.
    fn sparkler_tip(&self) -> Vec2 {
        let ps = PIXEL_SIZE;
        let (off_x, off_y) = match self.state {
            WatcherState::Walking(_) => {
                let sway = (self.walk_frame as f32 * 0.5).sin() * ps;
                (ps * 1.5 + sway, ps * 2.0)
            }
            WatcherState::Celebrating => (ps * 3.0, -ps),
            WatcherState::Lighting => (ps * 3.0, ps * 3.0),
            _ => (ps, ps * 2.0),
        };
        let (tip_x, tip_y) = if self.state == WatcherState::Lighting {
            (4.0, 4.0)
        } else {
            (1.0, -5.0)
        };
        let y = self.pos.y + off_y + tip_y;
        if self.facing > 0.0 {
            Vec2::new(self.pos.x + off_x + tip_x, y)
        } else {
            Vec2::new(self.pos.x + BODY_WIDTH - off_x - tip_x, y)
        }
    }

    fn sparkle(&self, rng: &mut impl Rng, fx: &mut Effects) {
        if !self.state.sparkler_lit() || !rng.gen_bool(0.5) {
            return;
        }
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = between(rng, 0.2, 0.7);
        let color = if rng.gen_bool(0.5) { Color::GOLD } else { Color::WHITE };
        let life = rng.gen_range(5..=13);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        fx.particles.push(
            Particle::new(self.sparkler_tip(), vel, life, color)
                .sized(0.5)
                .physics(0.02, 0.85)
                .flickering(true),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Footprint;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SCENE: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
    };

    fn ctx() -> FrameContext {
        FrameContext {
            bounds: SCENE,
            elapsed_ms: 0.0,
            footprint: Footprint::default(),
            mini_chance: 0.1,
        }
    }

    fn watcher() -> Watcher {
        Watcher::new(WatcherConfig::default(), SCENE)
    }

    fn placed(kind: FireworkKind, x: f32, rng: &mut StdRng) -> Firework {
        Firework::launch(kind, Vec2::new(x, SCENE.ground_y()), None, SCENE, rng)
    }

    fn step(w: &mut Watcher, fireworks: &[Firework], rng: &mut StdRng) -> Effects {
        let mut fx = Effects::default();
        w.update(fireworks, &ctx(), rng, &mut fx);
        fx
    }

    #[test]
    fn starts_idle_on_the_ground_line() {
        let w = watcher();
        assert_eq!(w.state(), WatcherState::Idle);
        assert_eq!(w.timer(), 60);
        assert_eq!(w.pos, Vec2::new(100.0, 600.0 - 10.0 - 24.0));
        assert_eq!(w.speed(), 0.0);
    }

    #[test]
    fn ground_danger_preempts_every_open_state() {
        let mut rng = StdRng::seed_from_u64(50);
        let anar = placed(FireworkKind::Anar, 160.0, &mut rng);
        for state in [
            WatcherState::Idle,
            WatcherState::Walking(Gait::Stroll),
            WatcherState::Walking(Gait::Hurry),
            WatcherState::Watching,
            WatcherState::Cowering,
            WatcherState::Celebrating,
            WatcherState::Lighting,
        ] {
            let mut w = watcher();
            w.state = state;
            w.timer = 30;
            step(&mut w, std::slice::from_ref(&anar), &mut rng);
            assert_eq!(w.state(), WatcherState::RunningHome, "from {state:?}");
            assert_eq!(w.target_x(), 65.0);
            assert_eq!(w.emotion().map(|e| e.text), Some("!!!"));
        }
    }

    #[test]
    fn sheltered_watcher_ignores_danger() {
        let mut rng = StdRng::seed_from_u64(51);
        let anar = placed(FireworkKind::Anar, 80.0, &mut rng);
        for state in [WatcherState::Hiding, WatcherState::Peeking] {
            let mut w = watcher();
            w.state = state;
            w.timer = 30;
            step(&mut w, std::slice::from_ref(&anar), &mut rng);
            assert_eq!(w.state(), state);
        }
    }

    #[test]
    fn running_home_ends_in_hiding_then_peeking() {
        let mut rng = StdRng::seed_from_u64(52);
        let mut w = watcher();
        w.run_hide();
        for _ in 0..20 {
            step(&mut w, &[], &mut rng);
        }
        assert_eq!(w.state(), WatcherState::Hiding);
        assert_eq!(w.timer(), HIDE_FRAMES);
        assert!(w.emotion().is_none());

        // Other requests cannot pull the watcher out early.
        assert!(!w.interact());
        assert!(!w.set_state(WatcherState::Cowering, 40));

        for _ in 0..HIDE_FRAMES {
            step(&mut w, &[], &mut rng);
        }
        assert_eq!(w.state(), WatcherState::Peeking);
    }

    #[test]
    fn peeking_rehides_while_the_shelter_is_busy() {
        let mut rng = StdRng::seed_from_u64(53);
        let smoke = placed(FireworkKind::SmokeGrenade, 100.0, &mut rng);
        let mut w = watcher();
        w.state = WatcherState::Peeking;
        w.timer = 1;
        step(&mut w, std::slice::from_ref(&smoke), &mut rng);
        assert_eq!(w.state(), WatcherState::Hiding);

        w.state = WatcherState::Peeking;
        w.timer = 1;
        step(&mut w, &[], &mut rng);
        assert_eq!(w.state(), WatcherState::Walking(Gait::Stroll));
        assert_eq!(w.target_x(), 115.0);
        assert_eq!(w.emotion().map(|e| e.text), Some("Safe"));
    }

    #[test]
    fn loud_fuse_makes_an_idle_watcher_cower() {
        let mut rng = StdRng::seed_from_u64(54);
        let mut c4 = placed(FireworkKind::C4, 220.0, &mut rng);
        c4.life = 5;
        let mut w = watcher();
        w.timer = 30;
        step(&mut w, std::slice::from_ref(&c4), &mut rng);
        assert_eq!(w.state(), WatcherState::Cowering);
        assert_eq!(w.emotion().map(|e| e.text), Some(">.<"));

        let mut busy = watcher();
        busy.state = WatcherState::Celebrating;
        busy.timer = 30;
        step(&mut busy, std::slice::from_ref(&c4), &mut rng);
        assert_eq!(busy.state(), WatcherState::Celebrating);
    }

    #[test]
    fn cowering_and_celebrating_settle_back_to_idle() {
        let mut rng = StdRng::seed_from_u64(55);
        let mut w = watcher();
        w.timer = 30;
        assert!(w.interact());
        assert_eq!(w.state(), WatcherState::Celebrating);
        for _ in 0..60 {
            step(&mut w, &[], &mut rng);
        }
        assert_eq!(w.state(), WatcherState::Idle);
        assert_eq!(w.pos.y, w.base_y);

        w.set_state(WatcherState::Cowering, 40);
        for _ in 0..40 {
            step(&mut w, &[], &mut rng);
        }
        assert_eq!(w.state(), WatcherState::Idle);
    }

    #[test]
    fn lighting_spawns_once_then_hurries_off() {
        let mut rng = StdRng::seed_from_u64(56);
        let mut w = watcher();
        w.pos.x = 400.0;
        w.set_state(WatcherState::Lighting, 60);
        let mut spawned = Vec::new();
        for _ in 0..60 {
            let fx = step(&mut w, &[], &mut rng);
            spawned.extend(fx.fireworks);
        }
        assert_eq!(spawned.len(), 1);
        assert!(spawned[0].kind.is_public());
        assert_eq!(spawned[0].pos.x, 420.0);
        assert_eq!(w.state(), WatcherState::Walking(Gait::Hurry));
        assert_eq!(w.target_x(), 300.0);
        assert_eq!(w.speed(), 2.0);
        assert_eq!(w.pos.x, 398.0);

        let fx = step(&mut w, &[], &mut rng);
        assert!(fx.particles.is_empty(), "no sparkler while hurrying");
        assert_eq!(w.pos.x, 396.0);
    }

    #[test]
    fn idle_never_lights_past_the_cap() {
        let mut rng = StdRng::seed_from_u64(57);
        let crowd: Vec<Firework> = (0..6)
            .map(|i| placed(FireworkKind::Arc, 500.0 + i as f32 * 10.0, &mut rng))
            .collect();
        for _ in 0..200 {
            let mut w = watcher();
            w.timer = 1;
            step(&mut w, &crowd, &mut rng);
            assert_ne!(w.state(), WatcherState::Lighting);
        }
    }

    #[test]
    fn stays_inside_the_scene() {
        let mut rng = StdRng::seed_from_u64(58);
        let mut w = watcher();
        w.pos.x = 790.0;
        w.target_x = 900.0;
        w.set_state(WatcherState::Walking(Gait::Stroll), 100);
        for _ in 0..50 {
            step(&mut w, &[], &mut rng);
            assert!(w.pos.x <= 780.0);
        }
    }

    #[test]
    fn hit_box_has_headroom() {
        let w = watcher();
        assert!(w.contains(w.pos + Vec2::new(6.0, -5.0)));
        assert!(w.contains(w.pos + Vec2::new(6.0, 20.0)));
        assert!(!w.contains(w.pos + Vec2::new(30.0, 5.0)));
    }

    #[test]
    fn rebase_follows_the_ground() {
        let mut w = watcher();
        w.rebase(400.0);
        assert_eq!(w.pos.y, 366.0);
    }

    #[test]
    fn rebase_leaves_a_sheltered_watcher_in_place() {
        for state in [WatcherState::Hiding, WatcherState::Peeking] {
            let mut w = watcher();
            let before = w.pos.y;
            w.state = state;
            w.rebase(400.0);
            assert_eq!(w.pos.y, before);
            assert_eq!(w.base_y, 366.0);
        }
    }
}
