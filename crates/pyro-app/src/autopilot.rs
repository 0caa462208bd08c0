//! Input source that taps the scene on its own, standing in for a human.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;
use pyro_core::FireworkKind;
use pyro_platform::{InputEvent, InputSource, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

/// Drag samples closer together than this are dropped by the UI.
pub const MIN_TAP_INTERVAL: Duration = Duration::from_millis(80);

pub struct Autopilot {
    sender: Sender<InputEvent>,
    width: f32,
    height: f32,
    interval: Duration,
    picks: Vec<String>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl Autopilot {
    pub fn new(
        sender: Sender<InputEvent>,
        width: f32,
        height: f32,
        interval: Duration,
        picks: Vec<String>,
    ) -> Self {
        let picks = if picks.is_empty() {
            FireworkKind::public().map(|k| k.id().to_string()).collect()
        } else {
            picks
        };
        Self {
            sender,
            width,
            height,
            interval: interval.max(MIN_TAP_INTERVAL),
            picks,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn picks(&self) -> &[String] {
        &self.picks
    }
}

/// One random tap: anywhere in the upper sky, with a random pick.
pub fn random_tap(
    rng: &mut impl Rng,
    width: f32,
    height: f32,
    picks: &[String],
) -> Option<InputEvent> {
    let firework = picks.choose(rng)?.clone();
    Some(InputEvent::Tap {
        x: rng.gen_range(0.0..width),
        y: rng.gen_range(height * 0.1..height * 0.6),
        firework,
    })
}

impl InputSource for Autopilot {
    fn start(&mut self) -> Result<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.sender.send(InputEvent::Resize {
            width: self.width,
            height: self.height,
        })?;
        self.sender.send(InputEvent::Start)?;

        let sender = self.sender.clone();
        let running = Arc::clone(&self.running);
        let (width, height, interval) = (self.width, self.height, self.interval);
        let picks = self.picks.clone();
        self.worker = Some(thread::spawn(move || {
            let mut rng = StdRng::from_entropy();
            while running.load(Ordering::SeqCst) {
                thread::sleep(interval);
                let Some(tap) = random_tap(&mut rng, width, height, &picks) else {
                    break;
                };
                if sender.send(tap).is_err() {
                    debug!("input channel closed; autopilot exiting");
                    break;
                }
            }
        }));
        info!(
            interval_ms = self.interval.as_millis() as u64,
            "autopilot started"
        );
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("autopilot thread panicked");
            }
        }
        // The session may already be gone; nothing to stop then.
        let _ = self.sender.send(InputEvent::Stop);
        info!("autopilot stopped");
        Ok(())
    }
}

impl Drop for Autopilot {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_is_throttled() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let pilot = Autopilot::new(tx, 800.0, 600.0, Duration::from_millis(10), Vec::new());
        assert_eq!(pilot.interval(), MIN_TAP_INTERVAL);
        assert_eq!(pilot.picks().len(), FireworkKind::public().count());
    }

    #[test]
    fn random_taps_stay_in_the_sky() {
        let mut rng = StdRng::seed_from_u64(4);
        let picks = vec!["rocket".to_string()];
        for _ in 0..100 {
            match random_tap(&mut rng, 800.0, 600.0, &picks) {
                Some(InputEvent::Tap { x, y, firework }) => {
                    assert!((0.0..800.0).contains(&x));
                    assert!((60.0..360.0).contains(&y));
                    assert_eq!(firework, "rocket");
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(random_tap(&mut rng, 800.0, 600.0, &[]).is_none());
    }

    #[test]
    fn start_announces_size_then_taps_until_stopped() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut pilot = Autopilot::new(tx, 640.0, 480.0, MIN_TAP_INTERVAL, vec!["chakri".into()]);
        pilot.start().unwrap();
        assert_eq!(
            rx.recv().unwrap(),
            InputEvent::Resize {
                width: 640.0,
                height: 480.0
            }
        );
        assert_eq!(rx.recv().unwrap(), InputEvent::Start);
        let tap = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(matches!(tap, InputEvent::Tap { ref firework, .. } if firework == "chakri"));

        pilot.stop().unwrap();
        let rest: Vec<InputEvent> = rx.try_iter().collect();
        assert_eq!(rest.last(), Some(&InputEvent::Stop));
    }
}
