//! Ground pieces that spray every frame while their fuse burns.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use pyro_platform::SoundCue;
use rand::seq::SliceRandom;
use rand::Rng;

use super::blast::{self, between, polar};
use super::FireworkKind;
use crate::color::Color;
use crate::frame::{Effects, FrameContext};
use crate::particle::Particle;

const CHAKRI_THEMES: [[Color; 2]; 3] = [
    [Color::rgb(0xff, 0x00, 0x00), Color::rgb(0x00, 0xff, 0x00)],
    [Color::rgb(0x00, 0xff, 0xff), Color::rgb(0xff, 0xff, 0x00)],
    [Color::rgb(0xff, 0x00, 0xff), Color::WHITE],
];

#[derive(Debug, Clone, PartialEq)]
pub enum Emitter {
    /// Fountain cone. `variant` picks one of four palettes.
    Anar { variant: u8, intensity: f32 },
    /// Ground spinner alternating between two theme colors.
    Chakri { theme: [Color; 2], speed: f32, dir: f32 },
    FlowerPot { phase: u32 },
    Smoke { color: Color },
    /// Zig-zagging chain of pops.
    Garland { tick: u32, progress: f32 },
    /// Rapid chain of pops scattered around the fuse.
    Ladi { tick: u32 },
}

impl Emitter {
    pub fn for_kind(kind: FireworkKind, rng: &mut impl Rng) -> Option<Self> {
        let emitter = match kind {
            FireworkKind::Anar => Emitter::Anar {
                variant: rng.gen_range(0..4),
                intensity: between(rng, 0.8, 1.3),
            },
            FireworkKind::Chakri => Emitter::Chakri {
                theme: *CHAKRI_THEMES.choose(rng)?,
                speed: between(rng, 0.2, 0.4),
                dir: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            },
            FireworkKind::FlowerPot => Emitter::FlowerPot { phase: 0 },
            FireworkKind::SmokeBomb => Emitter::Smoke {
                color: Color::hsl(rng.gen_range(0.0..360.0), 70.0, 60.0),
            },
            FireworkKind::Garland => Emitter::Garland { tick: 0, progress: 0.0 },
            FireworkKind::Ladi => Emitter::Ladi { tick: 0 },
            _ => return None,
        };
        Some(emitter)
    }

    /// Only the anar finishes with a burst; the rest just go out.
    pub fn ends_with_blast(&self) -> bool {
        matches!(self, Emitter::Anar { .. })
    }

    /// One frame of emission from a piece standing at `pos`.
    pub fn emit(
        &mut self,
        pos: &mut Vec2,
        ctx: &FrameContext,
        rng: &mut impl Rng,
        fx: &mut Effects,
    ) {
        match self {
            Emitter::Anar { variant, intensity } => {
                fizz(0.1, 0.05, rng, fx);
                let count = (4.0 * *intensity).ceil() as usize;
                for _ in 0..count {
                    let angle = -FRAC_PI_2 + (rng.gen::<f32>() - 0.5) * 0.8;
                    let speed = between(rng, 4.0, 13.0) * *intensity;
                    let vel = polar(angle, speed) * Vec2::new(0.4, 1.0);
                    let color = anar_color(*variant, rng);
                    let life = rng.gen_range(30..=50);
                    fx.particles.push(spark(*pos, vel, life, color, rng).physics(0.15, 0.9));
                }
            }
            Emitter::Chakri { theme, speed, dir } => {
                fizz(0.1, 0.05, rng, fx);
                pos.x += (rng.gen::<f32>() - 0.5) * 6.0;
                let turn = ctx.elapsed_ms * f64::from(*speed) * f64::from(*dir);
                let angle = turn.rem_euclid(TAU as f64) as f32;
                let phase = (ctx.elapsed_ms / 100.0).floor() as i64 % 2;
                let color = if phase == 0 { theme[0] } else { theme[1] };
                for k in 0..2 {
                    let a = angle + k as f32 * PI;
                    let vel = Vec2::new(a.cos() * 7.0, a.sin() * 2.0);
                    let origin = *pos - Vec2::new(0.0, 5.0);
                    fx.particles.push(spark(origin, vel, 20, color, rng).physics(0.1, 0.95));
                }
            }
            Emitter::FlowerPot { phase } => {
                fizz(0.2, 0.1, rng, fx);
                *phase += 1;
                let t = *phase as f32;
                let color = Color::hsl((t * 2.0) % 360.0, 100.0, 60.0);
                let spread = 1.5 + (t * 0.05).sin() * 0.5;
                for _ in 0..5 {
                    let angle = -FRAC_PI_2 + (rng.gen::<f32>() - 0.5) * spread;
                    let speed = between(rng, 6.0, 10.0) + (t * 0.1).sin() * 2.0;
                    let vel = polar(angle, speed) * Vec2::new(0.6, 1.0);
                    let life = rng.gen_range(40..=60);
                    let origin = *pos - Vec2::new(0.0, 10.0);
                    fx.particles.push(spark(origin, vel, life, color, rng).physics(0.15, 0.92));
                }
            }
            Emitter::Smoke { color } => {
                fizz(0.15, 0.05, rng, fx);
                for _ in 0..2 {
                    let angle = -FRAC_PI_2 + (rng.gen::<f32>() - 0.5);
                    let vel = polar(angle, between(rng, 1.0, 3.0)) * Vec2::new(0.5, 1.0);
                    let life = rng.gen_range(100..=200);
                    let size = between(rng, 3.0, 6.0);
                    fx.particles.push(
                        Particle::new(*pos - Vec2::new(0.0, 5.0), vel, life, *color)
                            .sized(size)
                            .physics(-0.01, 0.96)
                            .as_smoke(),
                    );
                }
            }
            Emitter::Garland { tick, progress } => {
                *tick += 1;
                if *tick % 4 == 0 {
                    *progress += 10.0;
                    let x = pos.x + (*progress * 0.2).sin() * 30.0;
                    pop(Vec2::new(x, pos.y), ctx, rng, fx);
                }
            }
            Emitter::Ladi { tick } => {
                *tick += 1;
                if *tick % 6 == 0 {
                    let offset = Vec2::new(
                        (rng.gen::<f32>() - 0.5) * 60.0,
                        (rng.gen::<f32>() - 0.5) * 10.0,
                    );
                    pop(*pos + offset, ctx, rng, fx);
                }
            }
        }
    }
}

fn anar_color(variant: u8, rng: &mut impl Rng) -> Color {
    let accent = rng.gen_bool(0.1);
    match variant {
        0 if accent => Color::WHITE,
        0 => Color::rgb(0xff, 0xcc, 0x00),
        1 if accent => Color::rgb(0xaa, 0xaa, 0xff),
        1 => Color::WHITE,
        2 if accent => Color::rgb(0xff, 0xaa, 0x00),
        2 => Color::rgb(0xff, 0x00, 0x00),
        _ => Color::hsl(rng.gen_range(0.0..360.0), 100.0, 60.0),
    }
}

fn spark(pos: Vec2, vel: Vec2, life: i32, color: Color, rng: &mut impl Rng) -> Particle {
    Particle::new(pos, vel, life, color).flickering(rng.gen_bool(0.2))
}

fn fizz(chance: f64, volume: f32, rng: &mut impl Rng, fx: &mut Effects) {
    if rng.gen_bool(chance) {
        fx.play(SoundCue::sparkle(volume));
    }
}

/// Small single-hue pop used by chains; inside the shelter footprint it may
/// upset the neighbors.
fn pop(at: Vec2, ctx: &FrameContext, rng: &mut impl Rng, fx: &mut Effects) {
    if ctx.in_footprint(at) && rng.gen::<f32>() < ctx.mini_chance {
        fx.disturb();
    }
    blast::MINI.detonate(at, rng.gen_range(0.0..360.0), rng, fx);
}
