//! Read-only frame snapshots handed to renderers.

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::color::Color;
use crate::firework::{Firework, FireworkKind};
use crate::particle::Particle;
use crate::scene::Scene;
use crate::watcher::Watcher;
use crate::Bounds;

/// One particle as a GPU vertex: center, edge length and RGBA.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub pos: [f32; 2],
    pub size: f32,
    pub color: [f32; 4],
}

impl From<&ParticleView> for ParticleVertex {
    fn from(p: &ParticleView) -> Self {
        let mut color = p.color.to_rgba();
        color[3] = p.opacity;
        Self {
            pos: [p.x, p.y],
            size: p.size,
            color,
        }
    }
}

impl From<&Particle> for ParticleVertex {
    fn from(p: &Particle) -> Self {
        Self::from(&ParticleView::from(p))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Color,
    pub opacity: f32,
    pub flicker: bool,
    pub smoke: bool,
    /// `normal` or `dragon_head`.
    pub behavior: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<f32>,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            x: p.pos.x,
            y: p.pos.y,
            size: p.size,
            color: p.color,
            opacity: p.opacity(),
            flicker: p.flicker,
            smoke: p.smoke,
            behavior: p.behavior.label(),
            heading: p.heading(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FireworkView {
    pub kind: FireworkKind,
    pub x: f32,
    pub y: f32,
    pub body: f32,
    pub casing: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shots_remaining: Option<u32>,
}

impl From<&Firework> for FireworkView {
    fn from(fw: &Firework) -> Self {
        Self {
            kind: fw.kind,
            x: fw.pos.x,
            y: fw.pos.y,
            body: fw.body(),
            casing: fw.casing(),
            shots_remaining: fw.shots_remaining(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WatcherView {
    pub x: f32,
    pub y: f32,
    pub state: &'static str,
    pub facing: f32,
    pub walk_frame: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<&'static str>,
}

impl From<&Watcher> for WatcherView {
    fn from(w: &Watcher) -> Self {
        Self {
            x: w.pos.x,
            y: w.pos.y,
            state: w.state().label(),
            facing: w.facing(),
            walk_frame: w.walk_frame(),
            emotion: w.emotion().filter(|e| e.frames_left > 0).map(|e| e.text),
        }
    }
}

/// Speech bubble over the shelter while the neighbors are upset.
#[derive(Debug, Clone, Serialize)]
pub struct DisturbanceView {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub frames_left: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub bounds: Bounds,
    pub particles: Vec<ParticleView>,
    pub fireworks: Vec<FireworkView>,
    pub watcher: Option<WatcherView>,
    /// Jitter amplitude in scene units; zero means steady.
    pub shake: u32,
    pub disturbance: Option<DisturbanceView>,
    pub moon: [f32; 2],
    pub moon_hits: u32,
    pub finale_frames: u32,
}

impl FrameSnapshot {
    pub fn capture(scene: &Scene) -> Self {
        let bounds = scene.bounds();
        let disturbance = scene.disturbance();
        let disturbance = disturbance.active.then(|| DisturbanceView {
            text: disturbance.text.clone(),
            x: scene.config().watcher.shelter_x,
            y: bounds.ground_y(),
            frames_left: disturbance.timer,
        });
        Self {
            frame: scene.frame(),
            bounds,
            particles: scene.particles().iter().map(ParticleView::from).collect(),
            fireworks: scene.fireworks().iter().map(FireworkView::from).collect(),
            watcher: scene.watcher().map(WatcherView::from),
            shake: scene.shake_intensity(),
            disturbance,
            moon: scene.moon().to_array(),
            moon_hits: scene.moon_hits(),
            finale_frames: scene.finale_timer(),
        }
    }

    pub fn vertices(&self) -> Vec<ParticleVertex> {
        self.particles.iter().map(ParticleVertex::from).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Raw vertex bytes for uploading straight into a GPU buffer.
pub fn vertex_bytes(vertices: &[ParticleVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use glam::Vec2;
    use pyro_platform::CueLog;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<ParticleVertex>(), 28);
        let vertices = [ParticleVertex::zeroed(); 3];
        assert_eq!(vertex_bytes(&vertices).len(), 84);
    }

    #[test]
    fn smoke_fades_through_alpha() {
        let mut puff = Particle::new(Vec2::new(1.0, 2.0), Vec2::ZERO, 100, Color::WHITE).as_smoke();
        puff.life = 25;
        let vertex = ParticleVertex::from(&puff);
        assert_eq!(vertex.pos, [1.0, 2.0]);
        assert!((vertex.color[3] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn snapshot_reflects_scene() {
        let mut scene = Scene::with_seed(SceneConfig::default(), 3);
        scene.resize(800.0, 600.0);
        scene.start();
        let mut audio = CueLog::default();
        scene.spawn_firework(FireworkKind::Arc, Vec2::new(300.0, 300.0), &mut audio);
        for _ in 0..5 {
            scene.step(&mut audio);
        }

        let snapshot = scene.snapshot();
        assert_eq!(snapshot.frame, 5);
        assert_eq!(snapshot.moon, [680.0, 90.0]);
        assert_eq!(snapshot.watcher.as_ref().map(|w| w.state), Some("IDLE"));
        assert!(snapshot.disturbance.is_none());
        let arc = snapshot.fireworks.iter().find(|f| f.kind == FireworkKind::Arc);
        assert!(arc.is_some_and(|f| f.shots_remaining.is_some()));
        let direct: Vec<ParticleVertex> = scene
            .particles()
            .iter()
            .map(ParticleVertex::from)
            .collect();
        assert_eq!(snapshot.vertices(), direct);

        let json = snapshot.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["fireworks"][0]["kind"], "arc");
        assert_eq!(value["watcher"]["state"], "IDLE");
    }

    #[test]
    fn dragon_heads_are_tagged() {
        let mut scene = Scene::with_seed(SceneConfig::default(), 4);
        scene.resize(800.0, 600.0);
        scene.start();
        let mut audio = CueLog::default();
        scene.spawn_firework(FireworkKind::Dragon, Vec2::new(400.0, 300.0), &mut audio);
        let mut snapshot = scene.snapshot();
        for _ in 0..200 {
            if snapshot.particles.iter().any(|p| p.behavior == "dragon_head") {
                break;
            }
            scene.step(&mut audio);
            snapshot = scene.snapshot();
        }

        let head = snapshot.particles.iter().find(|p| p.behavior == "dragon_head");
        assert!(head.is_some_and(|p| p.heading.is_some()));
        assert!(snapshot
            .particles
            .iter()
            .filter(|p| p.behavior == "normal")
            .all(|p| p.heading.is_none()));

        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        let tags: Vec<&str> = value["particles"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["behavior"].as_str())
            .collect();
        assert!(tags.contains(&"dragon_head"));
    }
}
