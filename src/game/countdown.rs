use super::engine::{Engine, Status};
use log::debug;
use rand::Rng;
use std::time::{Duration, Instant};

/// A repeating timer driven by explicit timestamps
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Timer {
    period: Duration,
    deadline: Instant,
}

impl Timer {
    fn start(period: Duration, now: Instant) -> Timer {
        Timer {
            period,
            deadline: now + period,
        }
    }

    /// Returns `true` if the timer has gone off by `now`, in which case it is
    /// re-armed for the next period.  A timer that has fallen more than a
    /// period behind skips the missed firings rather than bursting to catch
    /// up.
    fn fire(&mut self, now: Instant) -> bool {
        if now < self.deadline {
            return false;
        }
        self.deadline += self.period;
        if self.deadline <= now {
            self.deadline = now + self.period;
        }
        true
    }
}

/// The seconds counted down before play resumes
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Countdown {
    remaining: u32,
    timer: Timer,
}

impl Countdown {
    const SECOND: Duration = Duration::from_secs(1);

    fn new(seconds: u32, now: Instant) -> Countdown {
        Countdown {
            remaining: seconds,
            timer: Timer::start(Countdown::SECOND, now),
        }
    }

    /// Returns `true` once the countdown has reached zero
    fn poll(&mut self, now: Instant) -> bool {
        if self.timer.fire(now) {
            self.remaining = self.remaining.saturating_sub(1);
        }
        self.remaining == 0
    }
}

/// Owner of the game's timers: the tick timer, which runs only while the
/// game is running, and the countdown timer, which runs only while it is
/// counting down.
///
/// Every way out of those states goes through this type, which drops the
/// corresponding timer, so a stale timer can never restart a stopped game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Scheduler {
    tick_period: Duration,
    resume_seconds: u32,
    tick: Option<Timer>,
    countdown: Option<Countdown>,
}

impl Scheduler {
    pub(crate) fn new(tick_period: Duration, resume_seconds: u32) -> Scheduler {
        Scheduler {
            tick_period,
            resume_seconds,
            tick: None,
            countdown: None,
        }
    }

    /// Stop a running or counting-down game
    pub(crate) fn pause<R>(&mut self, engine: &mut Engine<R>) {
        if matches!(engine.status(), Status::Running | Status::CountingDown) {
            self.cancel();
            engine.pause();
            debug!("paused");
        }
    }

    /// Resume a paused game, counting down first if so configured
    pub(crate) fn resume<R>(&mut self, engine: &mut Engine<R>, now: Instant) {
        if engine.status() != Status::Paused {
            return;
        }
        self.cancel();
        if self.resume_seconds == 0 {
            self.start_ticking(engine, now);
        } else {
            engine.count_down();
            self.countdown = Some(Countdown::new(self.resume_seconds, now));
            debug!("counting down from {}", self.resume_seconds);
        }
    }

    /// Start a new game and count down into it
    pub(crate) fn restart<R: Rng>(&mut self, engine: &mut Engine<R>, now: Instant) {
        self.cancel();
        engine.reset();
        self.resume(engine, now);
    }

    /// Drop all timers
    pub(crate) fn cancel(&mut self) {
        self.tick = None;
        self.countdown = None;
    }

    fn start_ticking<R>(&mut self, engine: &mut Engine<R>, now: Instant) {
        engine.run();
        self.tick = Some(Timer::start(self.tick_period, now));
        debug!("running");
    }

    /// Fire whichever timers are due at `now`: finish the countdown and/or
    /// advance the game by at most one tick.  Returns when the next timer is
    /// due, or `None` if no timer is running.
    pub(crate) fn poll<R: Rng>(&mut self, engine: &mut Engine<R>, now: Instant) -> Option<Instant> {
        if let Some(countdown) = self.countdown.as_mut() {
            if countdown.poll(now) {
                self.countdown = None;
                self.start_ticking(engine, now);
            }
        }
        if let Some(timer) = self.tick.as_mut() {
            if timer.fire(now) {
                engine.tick();
                if engine.status() != Status::Running {
                    self.cancel();
                }
            }
        }
        self.next_deadline()
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        match (self.countdown, self.tick) {
            (Some(c), Some(t)) => Some(c.timer.deadline.min(t.deadline)),
            (Some(c), None) => Some(c.timer.deadline),
            (None, Some(t)) => Some(t.deadline),
            (None, None) => None,
        }
    }

    /// Seconds left before play resumes, if counting down
    pub(crate) fn seconds_remaining(&self) -> Option<u32> {
        self.countdown.map(|c| c.remaining)
    }
}
