//! Secondary cascades spawned where a marked particle dies.
//!
//! The mega chain is two stages deep and the simple chain one; nothing emitted
//! here ever carries a marker that leads further than that.

use glam::Vec2;
use pyro_platform::{ExplosionKind, SoundCue};
use rand::Rng;

use crate::color::Color;
use crate::particle::{Particle, SubBurst};

pub const SIMPLE_COUNT: usize = 6;
pub const MEGA_STAGE1_COUNT: usize = 12;
pub const MEGA_STAGE2_COUNT: usize = 6;

/// Emit the children of `dead` into `sink`. Returns the cue to play, if any.
pub fn resolve(dead: &Particle, rng: &mut impl Rng, sink: &mut Vec<Particle>) -> Option<SoundCue> {
    match dead.sub_burst {
        SubBurst::None => None,
        SubBurst::Simple => {
            for i in 0..SIMPLE_COUNT {
                let color = if i % 2 == 0 { Color::WHITE } else { dead.color };
                let vel = radial(rng, 1.0, 4.0);
                let life = rng.gen_range(20..=30);
                sink.push(
                    Particle::new(dead.pos, vel, life, color)
                        .sized(0.8)
                        .physics(0.05, 0.9),
                );
            }
            Some(SoundCue::sparkle(0.05))
        }
        SubBurst::MegaStage1 => {
            for _ in 0..MEGA_STAGE1_COUNT {
                let vel = radial(rng, 2.0, 6.0);
                let life = rng.gen_range(30..=40);
                let color = Color::hsl(rng.gen_range(0.0..360.0), 100.0, 60.0);
                sink.push(
                    Particle::new(dead.pos, vel, life, color)
                        .sized(1.2)
                        .physics(0.05, 0.92)
                        .with_sub_burst(SubBurst::MegaStage2),
                );
            }
            Some(SoundCue::explosion(ExplosionKind::Standard, 0.5))
        }
        SubBurst::MegaStage2 => {
            for _ in 0..MEGA_STAGE2_COUNT {
                let vel = radial(rng, 0.5, 2.5);
                let life = rng.gen_range(80..=120);
                sink.push(
                    Particle::new(dead.pos, vel, life, Color::GOLD)
                        .sized(0.8)
                        .physics(0.08, 0.96),
                );
            }
            None
        }
    }
}

fn radial(rng: &mut impl Rng, min_speed: f32, max_speed: f32) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let speed = rng.gen_range(min_speed..max_speed);
    Vec2::new(angle.cos(), angle.sin()) * speed
}
