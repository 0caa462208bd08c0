//! Headless frame renderers.

use std::io::Write;

use pyro_core::render::vertex_bytes;
use pyro_core::FrameSnapshot;
use pyro_platform::{FrameRenderer, Result};
use tracing::{debug, info};

/// Logs a one-line summary per frame at debug level.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
}

impl LogRenderer {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameRenderer<FrameSnapshot> for LogRenderer {
    fn init(&mut self) -> Result<()> {
        info!("log renderer ready");
        Ok(())
    }

    fn render_frame(&mut self, frame: &FrameSnapshot) -> Result<()> {
        self.frames += 1;
        let vertices = frame.vertices();
        debug!(
            frame = frame.frame,
            particles = frame.particles.len(),
            fireworks = frame.fireworks.len(),
            vertex_bytes = vertex_bytes(&vertices).len(),
            shake = frame.shake,
            watcher = frame.watcher.as_ref().map(|w| w.state).unwrap_or("-"),
            "frame"
        );
        Ok(())
    }

    fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        debug!(width, height, "log renderer resized");
        Ok(())
    }
}

/// Writes every `every`-th snapshot as one JSON line.
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    every: u64,
    seen: u64,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W, every: u64) -> Self {
        Self {
            out,
            every: every.max(1),
            seen: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameRenderer<FrameSnapshot> for JsonLinesRenderer<W> {
    fn init(&mut self) -> Result<()> {
        info!(every = self.every, "json renderer ready");
        Ok(())
    }

    fn render_frame(&mut self, frame: &FrameSnapshot) -> Result<()> {
        self.seen += 1;
        if self.seen % self.every != 0 {
            return Ok(());
        }
        writeln!(self.out, "{}", frame.to_json()?)?;
        self.out.flush()?;
        Ok(())
    }
}
