/// Simple timer counting update ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// How many ticks to wait.
    interval: u32,
    /// How far the interval is.
    progress: u32,
}

impl Timer {
    /// Construct a new timer with a fixed interval in ticks.
    pub fn new(interval: u32) -> Self {
        let progress = 0;

        Self { interval, progress }
    }

    /// Update the timer by a single tick.
    ///
    /// Returns whether it triggered.
    pub fn update(&mut self) -> bool {
        self.progress += 1;
        if self.progress >= self.interval {
            self.progress = 0;

            true
        } else {
            false
        }
    }

    /// Ticks left before the timer triggers.
    pub fn remaining(&self) -> u32 {
        self.interval.saturating_sub(self.progress)
    }
}
