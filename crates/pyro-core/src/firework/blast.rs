//! Explosion distribution templates.
//!
//! A [`Blast`] is a list of particle [`Layer`]s plus the cues and shake it
//! requests. Templates are plain `const` data; [`Blast::detonate`] samples
//! them at a firework's position and hue.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use pyro_platform::{ExplosionKind, LaunchWeight, SoundCue};
use rand::Rng;

use crate::color::Color;
use crate::frame::Effects;
use crate::particle::{Particle, SubBurst};

/// How a layer picks each particle's direction and speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spread {
    /// Uniform random angle.
    Full,
    /// Evenly spaced angles, all at the layer's minimum speed.
    Ring,
    /// Random angle around straight up; `width` radians wide, plus a random
    /// horizontal nudge up to `x_jitter` wide.
    Cone { width: f32, x_jitter: f32 },
    /// Evenly spaced angles along `r = radius * |sin(petals * theta)|`.
    Rose { petals: f32, radius: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shade {
    Fixed(Color),
    /// Relative to the firework hue, randomized across `spread` degrees.
    Hue { shift: f32, spread: f32, s: f32, l: f32 },
    /// Absolute hue band, ignoring the firework hue.
    Band { from: f32, spread: f32, s: f32, l: f32 },
    /// Neutral grey, lightness picked from `from..from + spread` percent.
    Grey { from: f32, spread: f32 },
}

impl Shade {
    /// Full saturation at the firework hue.
    pub const fn hue(l: f32) -> Self {
        Shade::Hue {
            shift: 0.0,
            spread: 0.0,
            s: 100.0,
            l,
        }
    }

    /// Any hue at all.
    pub const fn any_hue(l: f32) -> Self {
        Shade::Band {
            from: 0.0,
            spread: 360.0,
            s: 100.0,
            l,
        }
    }

    pub fn pick(self, hue: f32, rng: &mut impl Rng) -> Color {
        match self {
            Shade::Fixed(color) => color,
            Shade::Hue { shift, spread, s, l } => {
                let h = (hue + shift + between(rng, 0.0, spread)).rem_euclid(360.0);
                Color::hsl(h, s, l)
            }
            Shade::Band { from, spread, s, l } => {
                Color::hsl((from + between(rng, 0.0, spread)).rem_euclid(360.0), s, l)
            }
            Shade::Grey { from, spread } => Color::hsl(0.0, 0.0, from + between(rng, 0.0, spread)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tint {
    Solid(Shade),
    /// Weights are expected to sum to 1; the last entry absorbs rounding.
    Weighted(&'static [(f32, Shade)]),
}

impl Tint {
    pub fn pick(self, hue: f32, rng: &mut impl Rng) -> Color {
        match self {
            Tint::Solid(shade) => shade.pick(hue, rng),
            Tint::Weighted(choices) => {
                let mut roll: f32 = rng.gen();
                for (i, (weight, shade)) in choices.iter().enumerate() {
                    if roll < *weight || i + 1 == choices.len() {
                        return shade.pick(hue, rng);
                    }
                    roll -= weight;
                }
                Color::WHITE
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flicker {
    Never,
    /// One particle in five.
    Sometimes,
    Always,
}

impl Flicker {
    fn roll(self, rng: &mut impl Rng) -> bool {
        match self {
            Flicker::Never => false,
            Flicker::Sometimes => rng.gen_bool(0.2),
            Flicker::Always => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub count: usize,
    pub spread: Spread,
    pub speed: (f32, f32),
    pub life: (i32, i32),
    /// Multiplier of the pixel size.
    pub size: (f32, f32),
    pub gravity: f32,
    pub friction: f32,
    pub tint: Tint,
    pub flicker: Flicker,
    pub sub_burst: SubBurst,
    pub smoke: bool,
}

impl Layer {
    pub const fn new(count: usize, tint: Tint) -> Self {
        Self {
            count,
            spread: Spread::Full,
            speed: (1.0, 1.0),
            life: (40, 40),
            size: (1.0, 1.0),
            gravity: 0.05,
            friction: 0.95,
            tint,
            flicker: Flicker::Sometimes,
            sub_burst: SubBurst::None,
            smoke: false,
        }
    }

    pub const fn spread(mut self, spread: Spread) -> Self {
        self.spread = spread;
        self
    }

    pub const fn speed(mut self, min: f32, max: f32) -> Self {
        self.speed = (min, max);
        self
    }

    pub const fn life(mut self, min: i32, max: i32) -> Self {
        self.life = (min, max);
        self
    }

    pub const fn size(mut self, min: f32, max: f32) -> Self {
        self.size = (min, max);
        self
    }

    pub const fn physics(mut self, gravity: f32, friction: f32) -> Self {
        self.gravity = gravity;
        self.friction = friction;
        self
    }

    pub const fn flicker(mut self, flicker: Flicker) -> Self {
        self.flicker = flicker;
        self
    }

    pub const fn sub_burst(mut self, marker: SubBurst) -> Self {
        self.sub_burst = marker;
        self
    }

    pub const fn smoke(mut self) -> Self {
        self.smoke = true;
        self.flicker = Flicker::Never;
        self
    }

    fn emit(&self, origin: Vec2, hue: f32, rng: &mut impl Rng, out: &mut Vec<Particle>) {
        out.reserve(self.count);
        for i in 0..self.count {
            let vel = self.velocity(i, rng);
            let life = if self.life.0 >= self.life.1 {
                self.life.0
            } else {
                rng.gen_range(self.life.0..=self.life.1)
            };
            let color = self.tint.pick(hue, rng);
            let mut p = Particle::new(origin, vel, life, color)
                .sized(between(rng, self.size.0, self.size.1))
                .physics(self.gravity, self.friction)
                .with_sub_burst(self.sub_burst);
            p = if self.smoke {
                p.as_smoke()
            } else {
                p.flickering(self.flicker.roll(rng))
            };
            out.push(p);
        }
    }

    fn velocity(&self, i: usize, rng: &mut impl Rng) -> Vec2 {
        match self.spread {
            Spread::Full => {
                let angle = rng.gen_range(0.0..TAU);
                polar(angle, between(rng, self.speed.0, self.speed.1))
            }
            Spread::Ring => polar(TAU * i as f32 / self.count as f32, self.speed.0),
            Spread::Cone { width, x_jitter } => {
                let angle = -FRAC_PI_2 + (rng.gen::<f32>() - 0.5) * width;
                let v = polar(angle, between(rng, self.speed.0, self.speed.1));
                Vec2::new(v.x + (rng.gen::<f32>() - 0.5) * x_jitter, v.y)
            }
            Spread::Rose { petals, radius } => {
                let theta = TAU * i as f32 / self.count as f32;
                polar(theta, radius * (petals * theta).sin().abs())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blast {
    pub cues: &'static [SoundCue],
    /// Screen-shake frames, zero for none.
    pub shake: u32,
    pub layers: &'static [Layer],
}

impl Blast {
    const fn quiet(layers: &'static [Layer], cues: &'static [SoundCue]) -> Self {
        Self { cues, shake: 0, layers }
    }

    const fn shaking(mut self, frames: u32) -> Self {
        self.shake = frames;
        self
    }

    pub fn particle_count(&self) -> usize {
        self.layers.iter().map(|l| l.count).sum()
    }

    pub fn detonate(&self, origin: Vec2, hue: f32, rng: &mut impl Rng, fx: &mut Effects) {
        for cue in self.cues {
            fx.play(*cue);
        }
        if self.shake > 0 {
            fx.shake(self.shake);
        }
        for layer in self.layers {
            layer.emit(origin, hue, rng, &mut fx.particles);
        }
    }
}

/// Uniform sample in `[min, max)`, or `min` when the range is empty.
pub(crate) fn between(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}

pub(crate) fn polar(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * speed
}

const STANDARD: ExplosionKind = ExplosionKind::Standard;
const HEAVY: ExplosionKind = ExplosionKind::Heavy;
const WHITE: Shade = Shade::Fixed(Color::WHITE);
const GOLD: Shade = Shade::Fixed(Color::GOLD);

pub static ROCKET: Blast = Blast::quiet(
    &[Layer::new(50, Tint::Weighted(&[(0.7, Shade::hue(70.0)), (0.3, WHITE)]))
        .speed(2.0, 7.0)
        .life(45, 65)
        .size(0.0, 1.5)
        .physics(0.04, 0.93)
        .flicker(Flicker::Always)],
    &[SoundCue::explosion(STANDARD, 0.8)],
);

pub static FLOWER: Blast = Blast::quiet(
    &[
        Layer::new(12, Tint::Solid(GOLD))
            .speed(0.0, 2.0)
            .life(40, 40)
            .size(1.5, 1.5)
            .physics(0.05, 0.9),
        Layer::new(80, Tint::Solid(Shade::hue(60.0)))
            .spread(Spread::Rose { petals: 5.0, radius: 8.0 })
            .life(60, 80)
            .size(1.5, 1.5)
            .physics(0.04, 0.92)
            .flicker(Flicker::Always),
        Layer::new(40, Tint::Solid(Shade::hue(60.0)))
            .spread(Spread::Rose { petals: 5.0, radius: 5.0 })
            .life(60, 60)
            .size(1.2, 1.2)
            .physics(0.04, 0.92),
    ],
    &[SoundCue::explosion(STANDARD, 1.0)],
);

const PALE_SHIFTED: Shade = Shade::Hue {
    shift: 30.0,
    spread: 0.0,
    s: 100.0,
    l: 70.0,
};

pub static JAPANESE: Blast = Blast::quiet(
    &[
        Layer::new(24, Tint::Solid(WHITE))
            .spread(Spread::Ring)
            .speed(2.5, 2.5)
            .life(50, 50)
            .size(1.2, 1.2)
            .physics(0.02, 0.94),
        Layer::new(100, Tint::Solid(Shade::hue(60.0)))
            .spread(Spread::Ring)
            .speed(9.0, 9.0)
            .life(100, 100)
            .size(1.8, 1.8)
            .physics(0.035, 0.92)
            .flicker(Flicker::Always),
        Layer::new(100, Tint::Solid(PALE_SHIFTED))
            .spread(Spread::Ring)
            .speed(9.5, 9.5)
            .life(100, 100)
            .size(1.8, 1.8)
            .physics(0.035, 0.92)
            .flicker(Flicker::Always),
    ],
    &[SoundCue::explosion(HEAVY, 1.3)],
);

const SAFFRON: Shade = Shade::Fixed(Color::rgb(0xff, 0x99, 0x33));
const INDIA_GREEN: Shade = Shade::Fixed(Color::rgb(0x13, 0x88, 0x08));
const TRICOLOR: &[(f32, Shade)] = &[
    (1.0 / 3.0, SAFFRON),
    (1.0 / 3.0, WHITE),
    (1.0 / 3.0, INDIA_GREEN),
];

pub static INDIAN: Blast = Blast::quiet(
    &[
        Layer::new(120, Tint::Weighted(TRICOLOR))
            .speed(4.0, 14.0)
            .life(70, 90)
            .size(1.8, 1.8)
            .physics(0.04, 0.93)
            .flicker(Flicker::Always),
        Layer::new(30, Tint::Solid(Shade::Fixed(Color::rgb(0x00, 0x00, 0x80))))
            .speed(1.0, 5.0)
            .life(60, 60)
            .size(1.5, 1.5)
            .physics(0.03, 0.95),
    ],
    &[SoundCue::explosion(HEAVY, 1.2)],
);

pub static SKYSHOT: Blast = Blast::quiet(
    &[Layer::new(50, Tint::Solid(Shade::hue(50.0)))
        .speed(3.0, 11.0)
        .life(60, 60)
        .size(0.96, 1.56)
        .physics(0.05, 0.92)],
    &[SoundCue::explosion(STANDARD, 0.9)],
);

pub static SKYSHOT_MULTI: Blast = Blast::quiet(
    &[Layer::new(50, Tint::Solid(Shade::any_hue(60.0)))
        .speed(3.0, 11.0)
        .life(60, 60)
        .size(0.96, 1.56)
        .physics(0.05, 0.92)],
    &[SoundCue::explosion(STANDARD, 0.9)],
);

pub static PALM: Blast = Blast::quiet(
    &[Layer::new(60, Tint::Weighted(&[(0.5, Shade::hue(60.0)), (0.5, GOLD)]))
        .speed(2.0, 12.0)
        .life(80, 100)
        .size(1.2, 2.7)
        .physics(0.04, 0.91)
        .flicker(Flicker::Always)
        .sub_burst(SubBurst::Simple)],
    &[SoundCue::explosion(HEAVY, 1.0)],
);

const PASTEL: Shade = Shade::Hue {
    shift: 0.0,
    spread: 60.0,
    s: 100.0,
    l: 85.0,
};

pub static TWINKLER: Blast = Blast::quiet(
    &[Layer::new(60, Tint::Solid(PASTEL))
        .speed(1.0, 8.0)
        .life(90, 90)
        .physics(0.01, 0.92)],
    &[SoundCue::sparkle(0.4)],
);

const COMPLEMENT: Shade = Shade::Hue {
    shift: 180.0,
    spread: 0.0,
    s: 100.0,
    l: 50.0,
};

pub static DOUBLE: Blast = Blast::quiet(
    &[
        Layer::new(40, Tint::Solid(COMPLEMENT))
            .speed(4.0, 12.0)
            .life(50, 50)
            .size(1.4, 1.4)
            .physics(0.03, 0.9),
        Layer::new(20, Tint::Solid(WHITE))
            .speed(0.0, 4.0)
            .life(30, 30),
    ],
    &[SoundCue::explosion(STANDARD, 0.8)],
);

/// The double shell's one-off burst on the way up, in a single fresh hue.
pub static DOUBLE_MID: Blast = Blast::quiet(
    &[Layer::new(20, Tint::Solid(Shade::hue(60.0)))
        .speed(2.0, 6.0)
        .life(20, 20)],
    &[SoundCue::explosion(STANDARD, 0.6)],
);

const EMBER: Shade = Shade::Hue {
    shift: 0.0,
    spread: 0.0,
    s: 70.0,
    l: 40.0,
};

pub static SUTLI: Blast = Blast::quiet(
    &[Layer::new(50, Tint::Weighted(&[(0.5, EMBER), (0.5, WHITE)]))
        .speed(5.0, 17.0)
        .life(15, 25)
        .size(2.0, 2.0)],
    &[SoundCue::explosion(ExplosionKind::Sutli, 1.0)],
);

const ASH: Shade = Shade::Fixed(Color::rgb(0x88, 0x88, 0x88));

pub static C4: Blast = Blast::quiet(
    &[Layer::new(80, Tint::Weighted(&[(0.3, Shade::hue(50.0)), (0.7, ASH)]))
        .speed(5.0, 20.0)
        .life(30, 50)
        .size(2.5, 2.5)],
    &[SoundCue::explosion(ExplosionKind::C4, 1.2)],
)
.shaking(20);

const SOOT: Shade = Shade::Fixed(Color::rgb(0x33, 0x33, 0x33));

pub static PETROL: Blast = Blast::quiet(
    &[Layer::new(
        100,
        Tint::Weighted(&[
            (0.4, Shade::hue(60.0)),
            (
                0.3,
                Shade::Hue {
                    shift: 20.0,
                    spread: 0.0,
                    s: 100.0,
                    l: 50.0,
                },
            ),
            (0.3, SOOT),
        ]),
    )
    .spread(Spread::Cone { width: 2.0, x_jitter: 2.0 })
    .speed(2.0, 10.0)
    .life(60, 60)
    .size(1.5, 2.5)
    .physics(-0.02, 0.95)
    .flicker(Flicker::Always)],
    &[SoundCue::explosion(ExplosionKind::Fire, 1.0)],
);

const RAINBOW_FIRE: &[(f32, Shade)] = &[
    (0.4, Shade::any_hue(60.0)),
    (0.3, WHITE),
    (0.3, SOOT),
];

/// One fire bomb in five burns in every color.
pub static PETROL_MAGIC: Blast = Blast::quiet(
    &[Layer::new(100, Tint::Weighted(RAINBOW_FIRE))
        .spread(Spread::Cone { width: 2.0, x_jitter: 2.0 })
        .speed(2.0, 10.0)
        .life(60, 60)
        .size(1.5, 2.5)
        .physics(-0.02, 0.95)
        .flicker(Flicker::Always)],
    &[SoundCue::explosion(ExplosionKind::Fire, 1.0)],
);

pub static MEGA: Blast = Blast::quiet(
    &[Layer::new(60, Tint::Weighted(&[(0.8, Shade::hue(60.0)), (0.2, WHITE)]))
        .speed(4.0, 14.0)
        .life(50, 70)
        .size(2.2, 2.2)
        .physics(0.03, 0.95)
        .sub_burst(SubBurst::MegaStage1)],
    &[SoundCue::explosion(HEAVY, 1.5)],
)
.shaking(10);

pub static CROSS: Blast = Blast::quiet(
    &[Layer::new(60, Tint::Solid(Shade::hue(60.0)))
        .speed(2.0, 10.0)
        .life(50, 70)
        .size(1.2, 2.2)],
    &[SoundCue::explosion(STANDARD, 0.8)],
);

pub static DOUBLE_BOMB: Blast = Blast::quiet(
    &[Layer::new(40, Tint::Solid(Shade::hue(60.0)))
        .speed(2.0, 10.0)
        .life(30, 30)
        .size(2.0, 2.0)],
    &[SoundCue::explosion(STANDARD, 1.0)],
);

pub static DOUBLE_BOMB_STAGE2: Blast = Blast::quiet(
    &[Layer::new(60, Tint::Solid(Shade::hue(60.0)))
        .speed(4.0, 16.0)
        .life(40, 40)
        .size(2.5, 2.5)],
    &[SoundCue::explosion(STANDARD, 1.0)],
);

pub static CYCLONE: Blast = Blast::quiet(
    &[Layer::new(60, Tint::Solid(Shade::hue(60.0)))
        .speed(2.0, 10.0)
        .life(70, 70)
        .size(1.2, 1.2)
        .physics(0.05, 0.9)
        .flicker(Flicker::Always)],
    &[SoundCue::explosion(STANDARD, 0.8)],
);

pub static MOON: Blast = Blast::quiet(
    &[Layer::new(
        80,
        Tint::Weighted(&[
            (0.4, WHITE),
            (0.3, Shade::Fixed(Color::rgb(0xff, 0xff, 0xe0))),
            (0.3, Shade::Fixed(Color::rgb(0xd0, 0xe0, 0xff))),
        ]),
    )
    .speed(3.0, 12.0)
    .life(80, 80)
    .size(1.5, 1.5)
    .physics(0.03, 0.94)
    .flicker(Flicker::Always)
    .sub_burst(SubBurst::Simple)],
    &[SoundCue::Chime, SoundCue::explosion(HEAVY, 1.2)],
);

pub static FLASH: Blast = Blast::quiet(
    &[Layer::new(80, Tint::Solid(WHITE))
        .speed(10.0, 30.0)
        .life(20, 30)
        .size(2.5, 2.5)
        .physics(0.1, 0.95)],
    &[SoundCue::explosion(ExplosionKind::C4, 1.5)],
)
.shaking(40);

pub static SMOKE_GRENADE: Blast = Blast::quiet(
    &[Layer::new(50, Tint::Solid(Shade::Fixed(Color::rgb(0x80, 0x80, 0x80))))
        .speed(1.0, 4.0)
        .life(150, 250)
        .size(4.0, 4.0)
        .physics(-0.02, 0.95)
        .smoke()],
    &[SoundCue::explosion(ExplosionKind::Pop, 0.5), SoundCue::sparkle(0.2)],
);

/// Fallback radial burst, also used by spark bombs and the anar finish.
pub static GENERIC: Blast = Blast::quiet(
    &[Layer::new(40, Tint::Weighted(&[(0.7, Shade::hue(60.0)), (0.3, WHITE)]))
        .speed(2.0, 8.0)
        .life(40, 60)
        .size(1.0, 2.0)],
    &[SoundCue::explosion(STANDARD, 0.8)],
);

/// Small pop used by garlands and ladis. Every spark shares the hue passed in.
pub static MINI: Blast = Blast::quiet(
    &[Layer::new(10, Tint::Solid(Shade::hue(60.0))).speed(2.0, 7.0).life(10, 10).size(0.8, 0.8)],
    &[SoundCue::explosion(ExplosionKind::Pop, 0.2)],
);

/// The dragon's head particle is spawned by the firework itself.
pub static DRAGON: Blast = Blast::quiet(&[], &[SoundCue::Roar]);

/// Launch cue for shells fired by multi-shot batteries.
pub const SHELL_LAUNCH: SoundCue = SoundCue::launch(LaunchWeight::Standard);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fire(blast: &Blast, hue: f32, seed: u64) -> Effects {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut fx = Effects::default();
        blast.detonate(Vec2::new(100.0, 100.0), hue, &mut rng, &mut fx);
        fx
    }

    #[test]
    fn rocket_matches_its_template() {
        let fx = fire(&ROCKET, 200.0, 1);
        assert_eq!(fx.particles.len(), 50);
        assert_eq!(fx.cues, vec![SoundCue::explosion(STANDARD, 0.8)]);
        assert_eq!(fx.shake, 0);
        for p in &fx.particles {
            assert!((45..=65).contains(&p.life));
            assert!(p.flicker);
            let tinted = Color::hsl(200.0, 100.0, 70.0);
            assert!(p.color == Color::WHITE || p.color == tinted);
        }
    }

    #[test]
    fn ring_layers_are_evenly_spaced() {
        let fx = fire(&JAPANESE, 0.0, 2);
        assert_eq!(fx.particles.len(), 224);
        let pistil = &fx.particles[..24];
        for p in pistil {
            assert!((p.vel.length() - 2.5).abs() < 1e-4);
        }
        let step = TAU / 24.0;
        let a0 = pistil[0].vel.y.atan2(pistil[0].vel.x);
        let a1 = pistil[1].vel.y.atan2(pistil[1].vel.x);
        assert!((a1 - a0 - step).abs() < 1e-4);
    }

    #[test]
    fn rose_petals_have_bounded_speed() {
        let fx = fire(&FLOWER, 320.0, 3);
        assert_eq!(fx.particles.len(), 132);
        for p in &fx.particles[12..92] {
            assert!(p.vel.length() <= 8.0 + 1e-4);
        }
        // theta = 0 lands on a node of the curve
        assert!(fx.particles[12].vel.length() < 1e-4);
    }

    #[test]
    fn heavy_blasts_request_shake() {
        assert_eq!(fire(&C4, 0.0, 4).shake, 20);
        assert_eq!(fire(&FLASH, 0.0, 4).shake, 40);
        assert_eq!(fire(&MEGA, 0.0, 4).shake, 10);
    }

    #[test]
    fn fire_cone_points_up() {
        let fx = fire(&PETROL, 10.0, 5);
        for p in &fx.particles {
            assert!(p.vel.y < 0.0);
            assert_eq!(p.gravity, -0.02);
        }
    }

    #[test]
    fn smoke_layers_never_flicker() {
        let fx = fire(&SMOKE_GRENADE, 0.0, 6);
        assert!(fx.particles.iter().all(|p| p.smoke && !p.flicker));
        assert_eq!(fx.cues.len(), 2);
    }

    #[test]
    fn mega_marks_every_particle() {
        let fx = fire(&MEGA, 0.0, 7);
        assert!(fx.particles.iter().all(|p| p.sub_burst == SubBurst::MegaStage1));
    }

    #[test]
    fn dragon_blast_only_roars() {
        let fx = fire(&DRAGON, 0.0, 8);
        assert!(fx.particles.is_empty());
        assert_eq!(fx.cues, vec![SoundCue::Roar]);
    }

    #[test]
    fn empty_ranges_do_not_panic() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(between(&mut rng, 2.0, 2.0), 2.0);
        let grey = Shade::Grey { from: 40.0, spread: 0.0 }.pick(0.0, &mut rng);
        assert_eq!(grey, Color::hsl(0.0, 0.0, 40.0));
    }
}
