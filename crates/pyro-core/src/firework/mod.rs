//! Fireworks: one shared record plus a per-family payload.

pub mod battery;
pub mod blast;
pub mod catalog;
pub mod emitter;

use glam::Vec2;
use rand::Rng;
use tracing::{debug, trace};

pub use battery::{Aim, Battery};
pub use catalog::{Category, Family, FireworkKind, KindSpec, CATALOG};
pub use emitter::Emitter;

use crate::color::Color;
use crate::frame::{Effects, FrameContext};
use crate::particle::Particle;
use crate::Bounds;
use blast::{between, Blast};

/// Downward pull on rising shells, per frame.
pub const SHELL_GRAVITY: f32 = 0.15;
/// The cross shot bursts once it falls faster than this.
const CROSS_FALL_LIMIT: f32 = 5.0;
const STAGE2_FUSE: i32 = 15;

/// In-flight state of an ascending shell.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    /// Body size as a multiple of the pixel size.
    pub body: f32,
    /// Skyshots burst in mixed colors instead of their own hue.
    pub multicolor: bool,
    mid_burst_done: bool,
}

impl Flight {
    fn new(body: f32, multicolor: bool) -> Self {
        Self {
            body,
            multicolor,
            mid_burst_done: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Flight(Flight),
    Emitter(Emitter),
    Battery(Battery),
    /// Burns down quietly and bursts.
    Fuse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Firework {
    pub kind: FireworkKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames left on the fuse. Ascending shells other than the cross shot ignore it.
    pub life: i32,
    /// Ascending shells burst once they climb to this height.
    pub target_y: Option<f32>,
    pub hue: f32,
    pub payload: Payload,
    dead: bool,
}

impl Firework {
    /// Place or launch a firework from `origin`. Callers play
    /// [`FireworkKind::launch_cue`] themselves.
    pub fn launch(
        kind: FireworkKind,
        origin: Vec2,
        target_y: Option<f32>,
        bounds: Bounds,
        rng: &mut impl Rng,
    ) -> Self {
        let spec = kind.spec();
        let life = if spec.fuse.0 >= spec.fuse.1 {
            spec.fuse.0
        } else {
            rng.gen_range(spec.fuse.0..=spec.fuse.1)
        };
        let mut hue = rng.gen_range(0.0..360.0);
        let mut vel = Vec2::ZERO;

        let payload = match spec.family {
            Family::Ascending => {
                let mut body = 1.0;
                vel = match kind {
                    FireworkKind::CrossSkyShot => {
                        let target_x = if origin.x < bounds.width / 2.0 {
                            bounds.width * 0.6 + between(rng, 0.0, bounds.width * 0.3)
                        } else {
                            bounds.width * 0.1 + between(rng, 0.0, bounds.width * 0.3)
                        };
                        body = between(rng, 1.0, 3.0);
                        let vy = -12.0 - between(rng, 0.0, 6.0);
                        Vec2::new((target_x - origin.x) / life as f32, vy)
                    }
                    FireworkKind::JapaneseSkyshot => {
                        Vec2::new(rng.gen::<f32>() - 0.5, -14.0 - between(rng, 0.0, 2.0))
                    }
                    FireworkKind::IndianSkyshot => {
                        Vec2::new(rng.gen::<f32>() - 0.5, -15.0 - between(rng, 0.0, 3.0))
                    }
                    FireworkKind::MegaShot => Vec2::new(rng.gen::<f32>() - 0.5, -14.0),
                    FireworkKind::MoonShot => Vec2::new(0.0, -18.0),
                    _ => Vec2::new(
                        (rng.gen::<f32>() - 0.5) * 2.0,
                        -12.0 - between(rng, 0.0, 5.0),
                    ),
                };
                match kind {
                    FireworkKind::FlowerShot => hue = between(rng, 300.0, 360.0),
                    FireworkKind::Skyshot => hue = hue.floor(),
                    _ => {}
                }
                let multicolor = kind == FireworkKind::Skyshot && rng.gen_bool(0.4);
                Payload::Flight(Flight::new(body, multicolor))
            }
            Family::MultiShot if kind == FireworkKind::Arc => Payload::Battery(Battery::arc(rng)),
            Family::MultiShot => Payload::Battery(Battery::fountain(rng)),
            Family::Stationary => match Emitter::for_kind(kind, rng) {
                Some(emitter) => Payload::Emitter(emitter),
                None => Payload::Fuse,
            },
        };

        trace!(%kind, x = origin.x, y = origin.y, "firework placed");
        Self {
            kind,
            pos: origin,
            vel,
            life,
            target_y,
            hue,
            payload,
            dead: false,
        }
    }

    /// Spark bomb fired by a battery.
    pub(crate) fn shell(pos: Vec2, vel: Vec2, target_y: f32, hue: f32) -> Self {
        Self {
            kind: FireworkKind::SparkBomb,
            pos,
            vel,
            life: FireworkKind::SparkBomb.spec().fuse.0,
            target_y: Some(target_y),
            hue,
            payload: Payload::Flight(Flight::new(1.0, false)),
            dead: false,
        }
    }

    /// Second stage of a double bomb, sitting where the first one burst.
    fn second_stage(pos: Vec2, hue: f32) -> Self {
        Self {
            kind: FireworkKind::DoubleBombStage2,
            pos,
            vel: Vec2::ZERO,
            life: STAGE2_FUSE,
            target_y: None,
            hue,
            payload: Payload::Fuse,
            dead: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Body size multiplier used by trails and renderers.
    pub fn body(&self) -> f32 {
        match &self.payload {
            Payload::Flight(flight) => flight.body,
            _ => 1.0,
        }
    }

    pub fn shots_remaining(&self) -> Option<u32> {
        match &self.payload {
            Payload::Battery(battery) => Some(battery.remaining),
            _ => None,
        }
    }

    /// Advance one frame. Nothing happens once the firework is dead.
    pub fn advance(&mut self, ctx: &FrameContext, rng: &mut impl Rng, fx: &mut Effects) {
        if self.dead {
            return;
        }
        match self.kind.family() {
            Family::Ascending => self.fly(ctx, rng, fx),
            Family::Stationary | Family::MultiShot => self.burn(ctx, rng, fx),
        }
    }

    fn fly(&mut self, ctx: &FrameContext, rng: &mut impl Rng, fx: &mut Effects) {
        if self.kind == FireworkKind::Cyclone {
            self.vel.x = (self.pos.y * 0.1).sin() * 6.0;
        }
        self.vel.y += SHELL_GRAVITY;
        self.pos += self.vel;
        if self.kind == FireworkKind::CrossSkyShot {
            self.life -= 1;
        }

        if let Some(trail) = self.kind.spec().trail {
            if rng.gen_bool(trail.chance) {
                let color = trail.tint.pick(self.hue, rng);
                let at = self.pos + Vec2::new((rng.gen::<f32>() - 0.5) * 2.0, 0.0);
                let flicker = trail.flicker || rng.gen_bool(0.2);
                fx.particles.push(
                    Particle::new(at, Vec2::ZERO, trail.life, color)
                        .sized(trail.size * self.body())
                        .physics(trail.gravity, 0.95)
                        .flickering(flicker),
                );
            }
        }

        if let Payload::Flight(flight) = &mut self.payload {
            let climbing_past_mid = self.vel.y > -8.0 && self.vel.y < -6.0;
            if self.kind == FireworkKind::Double && !flight.mid_burst_done && climbing_past_mid {
                flight.mid_burst_done = true;
                blast::DOUBLE_MID.detonate(self.pos, rng.gen_range(0.0..360.0), rng, fx);
            }
        }

        let burst = if self.kind == FireworkKind::CrossSkyShot {
            self.life <= 0 || self.vel.y > CROSS_FALL_LIMIT
        } else {
            self.vel.y >= 0.0 || self.target_y.is_some_and(|target| self.pos.y <= target)
        };
        if burst {
            self.explode(ctx, rng, fx);
        }
    }

    fn burn(&mut self, ctx: &FrameContext, rng: &mut impl Rng, fx: &mut Effects) {
        self.life -= 1;
        match &mut self.payload {
            Payload::Battery(battery) => {
                if self.life <= 0 && battery.is_spent() {
                    self.dead = true;
                    debug!(kind = %self.kind, "battery spent");
                    return;
                }
                battery.tick(self.pos, self.hue, rng, fx);
            }
            Payload::Emitter(emitter) => {
                if self.life > 0 {
                    emitter.emit(&mut self.pos, ctx, rng, fx);
                } else if emitter.ends_with_blast() {
                    self.explode(ctx, rng, fx);
                } else {
                    self.dead = true;
                    debug!(kind = %self.kind, "emitter burned out");
                }
            }
            Payload::Fuse | Payload::Flight(_) => {
                if self.life <= 0 {
                    self.explode(ctx, rng, fx);
                }
            }
        }
    }

    fn explode(&mut self, ctx: &FrameContext, rng: &mut impl Rng, fx: &mut Effects) {
        if self.dead {
            return;
        }
        self.dead = true;
        debug!(kind = %self.kind, x = self.pos.x, y = self.pos.y, "firework exploded");

        if ctx.in_footprint(self.pos) {
            fx.disturb();
        }
        match self.kind {
            FireworkKind::Dragon => fx.particles.push(Particle::dragon_head(self.pos)),
            FireworkKind::DoubleBomb => {
                fx.fireworks.push(Firework::second_stage(self.pos, (self.hue + 180.0) % 360.0));
            }
            _ => {}
        }
        self.blast(rng).detonate(self.pos, self.hue, rng, fx);
    }

    fn blast(&self, rng: &mut impl Rng) -> &'static Blast {
        match (&self.payload, self.kind) {
            (Payload::Flight(Flight { multicolor: true, .. }), _) => &blast::SKYSHOT_MULTI,
            (_, FireworkKind::PetrolBomb | FireworkKind::Molotov) if rng.gen_bool(0.2) => {
                &blast::PETROL_MAGIC
            }
            _ => self.kind.spec().blast.unwrap_or(&blast::GENERIC),
        }
    }

    /// Glyph color for renderers that draw the casing.
    pub fn casing(&self) -> Color {
        match self.kind {
            FireworkKind::Anar => Color::rgb(0xff, 0x00, 0xff),
            FireworkKind::FlowerPot => Color::rgb(0xe9, 0x1e, 0x63),
            FireworkKind::SmokeBomb => match &self.payload {
                Payload::Emitter(Emitter::Smoke { color }) => *color,
                _ => Color::rgb(0x55, 0x55, 0x55),
            },
            FireworkKind::C4 | FireworkKind::FlashBang => Color::rgb(0x88, 0x88, 0x88),
            FireworkKind::JapaneseSkyshot => Color::rgb(0xff, 0x99, 0xcc),
            FireworkKind::FlowerShot => Color::rgb(0xff, 0x69, 0xb4),
            FireworkKind::CrossSkyShot => Color::hsl(self.hue, 100.0, 60.0),
            _ => Color::rgb(0xff, 0x33, 0x33),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Footprint;
    use pyro_platform::SoundCue;
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

    fn ground(kind: FireworkKind, x: f32, target_y: Option<f32>, rng: &mut StdRng) -> Firework {
        Firework::launch(kind, Vec2::new(x, SCENE.ground_y()), target_y, SCENE, rng)
    }

    /// Advance until dead, returning the frames taken and everything emitted.
    fn burn_out(fw: &mut Firework, rng: &mut StdRng, limit: usize) -> (usize, Effects) {
        let mut fx = Effects::default();
        for frame in 1..=limit {
            fw.advance(&ctx(), rng, &mut fx);
            if fw.is_dead() {
                return (frame, fx);
            }
        }
        panic!("{} still alive after {limit} frames", fw.kind);
    }

    #[test]
    fn ascending_launch_velocity() {
        let mut rng = StdRng::seed_from_u64(30);
        for _ in 0..50 {
            let fw = ground(FireworkKind::Rocket, 100.0, None, &mut rng);
            assert!((-17.0..=-12.0).contains(&fw.vel.y));
            assert!(fw.vel.x.abs() <= 1.0);
        }
        let moon = ground(FireworkKind::MoonShot, 680.0, Some(90.0), &mut rng);
        assert_eq!(moon.vel, Vec2::new(0.0, -18.0));
    }

    #[test]
    fn shell_never_bursts_while_climbing() {
        let mut rng = StdRng::seed_from_u64(31);
        let mut fw = ground(FireworkKind::Skyshot, 400.0, None, &mut rng);
        let mut fx = Effects::default();
        while !fw.is_dead() {
            let before = fw.vel.y;
            fw.advance(&ctx(), &mut rng, &mut fx);
            if fw.is_dead() {
                assert!(fw.vel.y >= 0.0, "burst at vy {before}");
            } else {
                assert!(fw.vel.y < 0.0);
            }
        }
    }

    #[test]
    fn target_height_cuts_the_climb_short() {
        let mut rng = StdRng::seed_from_u64(32);
        let mut fw = ground(FireworkKind::Palm, 400.0, Some(500.0), &mut rng);
        let (frames, fx) = burn_out(&mut fw, &mut rng, 200);
        assert!(frames < 10);
        assert!(fw.pos.y <= 500.0);
        assert!(fw.vel.y < 0.0);
        assert!(fx.particles.iter().any(|p| p.sub_burst == crate::particle::SubBurst::Simple));
    }

    #[test]
    fn cross_shot_heads_for_the_far_side() {
        let mut rng = StdRng::seed_from_u64(33);
        let left = ground(FireworkKind::CrossSkyShot, 100.0, None, &mut rng);
        assert!(left.vel.x > 0.0);
        assert!((80..=139).contains(&left.life));
        let right = ground(FireworkKind::CrossSkyShot, 700.0, None, &mut rng);
        assert!(right.vel.x < 0.0);
        assert!((1.0..3.0).contains(&right.body()));
    }

    #[test]
    fn double_fires_one_mid_burst() {
        let mut rng = StdRng::seed_from_u64(34);
        let mut fw = ground(FireworkKind::Double, 400.0, None, &mut rng);
        let (_, fx) = burn_out(&mut fw, &mut rng, 200);
        let mid = SoundCue::explosion(pyro_platform::ExplosionKind::Standard, 0.6);
        assert_eq!(fx.cues.iter().filter(|c| **c == mid).count(), 1);
    }

    #[test]
    fn double_bomb_chains_a_complementary_stage() {
        let mut rng = StdRng::seed_from_u64(35);
        let mut fw = ground(FireworkKind::DoubleBomb, 400.0, None, &mut rng);
        let (frames, fx) = burn_out(&mut fw, &mut rng, 100);
        assert_eq!(frames, 60);
        assert_eq!(fx.fireworks.len(), 1);
        let mut stage2 = fx.fireworks[0].clone();
        assert_eq!(stage2.kind, FireworkKind::DoubleBombStage2);
        assert!((stage2.hue - (fw.hue + 180.0) % 360.0).abs() < 1e-4);

        let (frames, fx) = burn_out(&mut stage2, &mut rng, 100);
        assert_eq!(frames, STAGE2_FUSE as usize);
        assert_eq!(
            fx.particles.len(),
            blast::DOUBLE_BOMB_STAGE2.particle_count()
        );
        assert!(fx.fireworks.is_empty());
    }

    #[test]
    fn dragon_releases_a_head() {
        let mut rng = StdRng::seed_from_u64(36);
        let mut fw = ground(FireworkKind::Dragon, 400.0, None, &mut rng);
        let (_, fx) = burn_out(&mut fw, &mut rng, 200);
        let heads = fx.particles.iter().filter(|p| p.heading().is_some());
        assert_eq!(heads.count(), 1);
        assert!(fx.cues.contains(&SoundCue::Roar));
    }

    #[test]
    fn quiet_emitters_die_without_a_burst() {
        let mut rng = StdRng::seed_from_u64(37);
        let mut fw = ground(FireworkKind::FlowerPot, 400.0, None, &mut rng);
        let (frames, fx) = burn_out(&mut fw, &mut rng, 400);
        assert_eq!(frames, 180);
        // every frame but the last sprays five sparks
        assert_eq!(fx.particles.len(), 179 * 5);
    }

    #[test]
    fn anar_finishes_with_a_burst() {
        let mut rng = StdRng::seed_from_u64(38);
        let mut fw = ground(FireworkKind::Anar, 400.0, None, &mut rng);
        let fuse = fw.life;
        let (frames, fx) = burn_out(&mut fw, &mut rng, 200);
        assert_eq!(frames as i32, fuse);
        let pop = SoundCue::explosion(pyro_platform::ExplosionKind::Standard, 0.8);
        assert!(fx.cues.contains(&pop));
    }

    #[test]
    fn arc_outlives_its_fuse_only_until_spent() {
        let mut rng = StdRng::seed_from_u64(39);
        let mut fw = ground(FireworkKind::Arc, 400.0, None, &mut rng);
        let total = match &fw.payload {
            Payload::Battery(b) => b.total as usize,
            other => panic!("unexpected payload {other:?}"),
        };
        let (frames, fx) = burn_out(&mut fw, &mut rng, 400);
        assert_eq!(frames, 200);
        assert_eq!(fx.fireworks.len(), total);
        assert_eq!(fw.shots_remaining(), Some(0));
    }

    #[test]
    fn ground_blast_near_shelter_disturbs() {
        let mut rng = StdRng::seed_from_u64(40);
        let mut fw = ground(FireworkKind::Sutli, 60.0, None, &mut rng);
        let (_, fx) = burn_out(&mut fw, &mut rng, 100);
        assert!(fx.disturbance);

        let mut far = ground(FireworkKind::Sutli, 400.0, None, &mut rng);
        let (_, fx) = burn_out(&mut far, &mut rng, 100);
        assert!(!fx.disturbance);
    }

    #[test]
    fn dead_fireworks_stay_untouched() {
        let mut rng = StdRng::seed_from_u64(41);
        let mut fw = ground(FireworkKind::C4, 400.0, None, &mut rng);
        burn_out(&mut fw, &mut rng, 200);
        let frozen = fw.clone();
        let mut fx = Effects::default();
        for _ in 0..10 {
            fw.advance(&ctx(), &mut rng, &mut fx);
        }
        assert_eq!(fw, frozen);
        assert!(fx.is_empty());
    }
}
