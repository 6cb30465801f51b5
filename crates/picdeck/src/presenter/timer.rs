use std::time::{Duration, Instant};

/// Source of the current time for [`IntervalTimer`].
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Handle to a running repeating timer. Consumed by [`Timer::stop`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Repeating-timer capability used by the presenter.
///
/// The UI loop polls instead of receiving callbacks: each frame it asks how
/// many ticks have elapsed and acts on them, which keeps every tick
/// serialized with input handling.
pub trait Timer {
    fn start(&mut self, interval: Duration) -> TimerHandle;
    fn stop(&mut self, handle: TimerHandle);
    /// Ticks that elapsed since the last call (or since `start`).
    fn take_ticks(&mut self, handle: &TimerHandle) -> u32;
    /// Time left until the next tick of `handle`, if it is running.
    fn time_until_next(&self, handle: &TimerHandle) -> Option<Duration>;
    fn active_count(&self) -> usize;
}

#[derive(Debug)]
struct Schedule {
    id: u64,
    interval: Duration,
    next_due: Instant,
}

/// [`Timer`] backed by a [`Clock`], tracking each schedule's next deadline.
#[derive(Debug)]
pub struct IntervalTimer<C: Clock = SystemClock> {
    clock: C,
    next_id: u64,
    schedules: Vec<Schedule>,
}

impl<C: Clock> IntervalTimer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            next_id: 0,
            schedules: Vec::new(),
        }
    }

    fn schedule_mut(&mut self, handle: &TimerHandle) -> Option<&mut Schedule> {
        self.schedules.iter_mut().find(|s| s.id == handle.0)
    }
}

impl Default for IntervalTimer<SystemClock> {
    fn default() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> Timer for IntervalTimer<C> {
    fn start(&mut self, interval: Duration) -> TimerHandle {
        // A zero interval would tick unboundedly on every poll
        let interval = interval.max(Duration::from_millis(1));
        let id = self.next_id;
        self.next_id += 1;
        self.schedules.push(Schedule {
            id,
            interval,
            next_due: self.clock.now() + interval,
        });
        TimerHandle(id)
    }

    fn stop(&mut self, handle: TimerHandle) {
        self.schedules.retain(|s| s.id != handle.0);
    }

    fn take_ticks(&mut self, handle: &TimerHandle) -> u32 {
        let now = self.clock.now();
        let Some(schedule) = self.schedule_mut(handle) else {
            return 0;
        };
        let mut ticks = 0;
        while now >= schedule.next_due {
            ticks += 1;
            schedule.next_due += schedule.interval;
        }
        ticks
    }

    fn time_until_next(&self, handle: &TimerHandle) -> Option<Duration> {
        let now = self.clock.now();
        self.schedules
            .iter()
            .find(|s| s.id == handle.0)
            .map(|s| s.next_due.saturating_duration_since(now))
    }

    fn active_count(&self) -> usize {
        self.schedules.len()
    }
}

#[cfg(test)]
pub mod manual {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use super::Clock;

    /// Clock that only moves when told to. Clones share the same time.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Rc<Cell<Instant>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                now: Rc::new(Cell::new(Instant::now())),
            }
        }

        pub fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }

        pub fn advance_ms(&self, ms: u64) {
            self.advance(Duration::from_millis(ms));
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }
    }
}
