use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use rand::Rng;

/// Keys the loop picks from. All are harmless in a chat window that does not
/// have keyboard focus on a text field.
pub const DEFAULT_KEYS: [char; 9] = [' ', 'e', 'q', 'w', 'a', 's', 'd', 'r', 'f'];

/// Granularity of the cancellation checks while waiting for the next tick.
const SLEEP_SLICE: Duration = Duration::from_millis(250);

/// Configuration for the idle-prevention loop.
///
/// The start instant is passed in explicitly rather than captured from
/// process-wide state, so ticks stay phase-aligned to whatever moment the
/// caller considers the beginning of the session.
pub struct IdleConfig {
    pub keys: Vec<char>,
    pub min_interval_secs: u64,
    pub max_interval_secs: u64,
    pub start: Instant,
}

impl IdleConfig {
    /// Default key set and a 1–5 second interval range, anchored at `start`.
    pub fn new(start: Instant) -> Self {
        Self {
            keys: DEFAULT_KEYS.to_vec(),
            min_interval_secs: 1,
            max_interval_secs: 5,
            start,
        }
    }
}

/// Abstraction over simulating one key press.
///
/// The production implementation drives the OS input subsystem through
/// `enigo`; tests substitute a recording mock.
pub trait KeyTap {
    /// Press and release `key` once.
    fn tap(&mut self, key: char) -> Result<(), String>;
}

/// [`KeyTap`] backed by `enigo`.
pub struct EnigoKeyTap {
    enigo: Enigo,
}

impl EnigoKeyTap {
    pub fn new() -> Result<Self, String> {
        match Enigo::new(&Settings::default()) {
            Ok(enigo) => Ok(Self { enigo }),
            Err(e) => Err(format!("cannot open input connection: {}", e)),
        }
    }
}

impl KeyTap for EnigoKeyTap {
    fn tap(&mut self, key: char) -> Result<(), String> {
        match self.enigo.key(Key::Unicode(key), Direction::Click) {
            Ok(()) => Ok(()),
            Err(e) => Err(format!("key press failed: {}", e)),
        }
    }
}

/// Human-readable name of a key for the per-press progress line.
fn key_name(key: char) -> String {
    if key == ' ' { String::from("space") } else { key.to_string() }
}

/// Time left until the next tick of `interval_secs`, phase-aligned to a start
/// instant that has been running for `elapsed`.
pub(crate) fn tick_remaining(elapsed: Duration, interval_secs: u64) -> Duration {
    let interval = interval_secs as f64;
    Duration::from_secs_f64(interval - (elapsed.as_secs_f64() % interval))
}

/// Sleeps until the next phase-aligned tick, waking early if `cancel` is
/// raised.
fn sleep_until_tick(start: Instant, interval_secs: u64, cancel: &AtomicBool) {
    let mut remaining = tick_remaining(start.elapsed(), interval_secs);
    while remaining > Duration::ZERO {
        if cancel.load(Ordering::SeqCst) {
            return;
        }
        let nap = remaining.min(SLEEP_SLICE);
        thread::sleep(nap);
        remaining = remaining.saturating_sub(nap);
    }
}

/// Runs the idle-prevention loop until `cancel` is raised.
///
/// Each iteration picks one key uniformly at random, taps it, prints one
/// line, then sleeps until the next tick of a freshly drawn period between
/// the configured bounds. The cancellation flag is checked at the top of
/// every iteration and between sleep slices; there is no signal handling
/// inside the loop itself.
///
/// # Returns
///
/// * `Ok(presses)` with the number of keys pressed once cancelled.
/// * `Err(String)` if the key set is empty or a key press fails.
pub fn run<T: KeyTap, R: Rng>(
    config: &IdleConfig,
    tap: &mut T,
    rng: &mut R,
    cancel: &AtomicBool,
) -> Result<u64, String> {
    if config.keys.is_empty() {
        return Err(String::from("no keys configured"));
    }
    if config.min_interval_secs == 0 || config.min_interval_secs > config.max_interval_secs {
        return Err(String::from("invalid interval bounds"));
    }

    let mut presses: u64 = 0;
    while !cancel.load(Ordering::SeqCst) {
        let key = config.keys[rng.gen_range(0..config.keys.len())];
        tap.tap(key)?;
        presses += 1;
        println!("Pressed {}.", key_name(key));

        let interval = rng.gen_range(config.min_interval_secs..=config.max_interval_secs);
        sleep_until_tick(config.start, interval, cancel);
    }
    Ok(presses)
}
