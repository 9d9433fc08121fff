use std::time::{Duration, Instant};

/// What one host frame did to the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Fixed updates run during the frame
    pub updates: u32,
    /// Leftover time as a fraction of one step, in `[0, 1)`
    pub fraction: f32,
}

/// Accumulates wall-clock time and pays it out in fixed-size simulation steps.
///
/// Time is kept as integer nanoseconds, so an accumulator holding exactly `n`
/// steps runs exactly `n` updates. Catch-up is not capped: a long stall is
/// replayed as a burst of updates on the next frame.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    lag: Duration,
    previous: Option<Instant>,
}

impl FixedTimestep {
    pub fn new(step: Duration) -> Self {
        Self {
            step: step.max(Duration::from_nanos(1)),
            lag: Duration::ZERO,
            previous: None,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Unconsumed time
    pub fn lag(&self) -> Duration {
        self.lag
    }

    /// Leftover time over step duration
    pub fn fraction(&self) -> f32 {
        let fraction = self.lag.as_secs_f64() / self.step.as_secs_f64();
        (fraction as f32).min(1.0 - f32::EPSILON)
    }

    pub fn accumulate(&mut self, elapsed: Duration) {
        self.lag = self.lag.saturating_add(elapsed);
    }

    /// Runs `update` once per whole step held in the accumulator
    pub fn drain<F: FnMut()>(&mut self, mut update: F) -> FrameReport {
        let mut updates = 0u32;
        while self.lag >= self.step {
            update();
            self.lag -= self.step;
            updates = updates.saturating_add(1);
        }

        FrameReport {
            updates,
            fraction: self.fraction(),
        }
    }

    /// Adds `elapsed` and drains it
    pub fn advance<F: FnMut()>(&mut self, elapsed: Duration, update: F) -> FrameReport {
        self.accumulate(elapsed);
        self.drain(update)
    }

    /// Host frame entry point: measures the time since the previous frame
    /// from `now` and advances by it. The first frame only starts the clock.
    pub fn frame<F: FnMut()>(&mut self, now: Instant, update: F) -> FrameReport {
        let elapsed = self
            .previous
            .map(|previous| now.saturating_duration_since(previous))
            .unwrap_or_default();
        self.previous = Some(now);
        self.advance(elapsed, update)
    }

    /// Restarts the clock at `now` so time spent outside the loop is not replayed
    pub fn resync(&mut self, now: Instant) {
        self.previous = Some(now);
    }
}
