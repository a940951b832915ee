use std::thread;
use std::time::Duration;

use rand::Rng;

const SECONDS_PER_HOUR: u64 = 60 * 60;

/// Blocks the current thread. Abstracted so the scheduler can be tested
/// without waiting hours.
pub trait Sleeper: Send {
    fn sleep(&mut self, duration: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Uniformly random whole-second delay in `[0, hours)`; zero when `hours` is 0.
pub fn random_delay<R: Rng + ?Sized>(hours: u32, rng: &mut R) -> Duration {
    if hours == 0 {
        return Duration::ZERO;
    }
    let max_secs = u64::from(hours) * SECONDS_PER_HOUR;
    Duration::from_secs(rng.gen_range(0..max_secs))
}

/// Sleeps for a random duration of up to `hours` and returns it.
pub fn sleep_for_up_to<R: Rng + ?Sized>(
    hours: u32,
    rng: &mut R,
    sleeper: &mut dyn Sleeper,
) -> Duration {
    if hours == 0 {
        log::info!("No sleep");
        return Duration::ZERO;
    }

    let delay = random_delay(hours, rng);
    log::info!("Sleep for {} minutes", delay.as_secs() / 60);
    sleeper.sleep(delay);
    log::info!("Woke up");
    delay
}
