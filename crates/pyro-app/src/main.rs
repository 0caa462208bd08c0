use std::io::{self, Write};
use std::time::Duration;

use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pyro_core::{FrameSnapshot, Scene};
use pyro_platform::{FrameRenderer, InputSource, Result};

mod audio;
mod autopilot;
mod config;
mod renderer;
mod session;

use crate::audio::LogAudio;
use crate::autopilot::Autopilot;
use crate::config::{AppConfig, SessionConfig};
use crate::renderer::{JsonLinesRenderer, LogRenderer};
use crate::session::{Session, SessionStats};

fn main() {
    // Init logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Pyro starting");
    match run_app() {
        Ok(stats) => info!(?stats, "Pyro done"),
        Err(e) => eprintln!("Pyro error: {e}"),
    }
}

fn run_app() -> Result<SessionStats> {
    let config = AppConfig::discover()?;
    let session_config = config.session.clone();

    let (sender, receiver) = crossbeam_channel::unbounded();
    let mut autopilot = Autopilot::new(
        sender,
        session_config.width,
        session_config.height,
        Duration::from_millis(session_config.tap_interval_ms),
        session_config.picks.clone(),
    );
    info!(
        interval_ms = autopilot.interval().as_millis() as u64,
        picks = autopilot.picks().len(),
        "autopilot configured"
    );
    autopilot.start()?;

    let scene = Scene::new(config.scene);
    let fps = session_config.fps;
    let stats = match session_config.dump_every {
        Some(every) => {
            let renderer = JsonLinesRenderer::new(io::stdout().lock(), every);
            let session = Session::new(scene, LogAudio::new(), renderer, receiver, fps);
            drive(session, &session_config).and_then(|(stats, renderer)| {
                renderer.into_inner().flush()?;
                Ok(stats)
            })
        }
        None => {
            let renderer = LogRenderer::default();
            let session = Session::new(scene, LogAudio::new(), renderer, receiver, fps);
            drive(session, &session_config).map(|(stats, renderer)| {
                info!(rendered = renderer.frames(), "log renderer finished");
                stats
            })
        }
    };
    autopilot.stop()?;
    stats
}

fn drive<R>(mut session: Session<LogAudio, R>, config: &SessionConfig) -> Result<(SessionStats, R)>
where
    R: FrameRenderer<FrameSnapshot>,
{
    session.run(config.frames)?;
    let (scene, audio) = (session.scene(), session.audio());
    info!(
        cues = audio.total(),
        particles = scene.particles().len(),
        fireworks = scene.fireworks().len(),
        "final scene"
    );
    for (cue, count) in audio.played() {
        info!(cue, count, "cue total");
    }
    Ok((session.stats(), session.into_renderer()))
}
