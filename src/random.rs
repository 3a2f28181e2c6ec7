use std::ops::Range;

use serde::Deserialize;

/// Source of randomness for the simulation.
///
/// Injected into every update so a seeded or scripted source makes a run reproducible.
pub trait RandomSource {
    /// Uniform number in `0.0..1.0`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in the range, `range.start` when it's empty.
    fn next_in_range(&mut self, range: Range<u32>) -> u32;
}

impl RandomSource for fastrand::Rng {
    fn next_f64(&mut self) -> f64 {
        self.f64()
    }

    fn next_in_range(&mut self, range: Range<u32>) -> u32 {
        if range.is_empty() {
            range.start
        } else {
            self.u32(range)
        }
    }
}

/// Either a number of frames or a random range of frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FrameRange {
    /// Single value.
    Static(u32),
    /// Random range, `max` is exclusive.
    Range { min: u32, max: u32 },
}

impl FrameRange {
    /// Calculate the value.
    pub fn value(&self, rng: &mut impl RandomSource) -> u32 {
        match *self {
            FrameRange::Static(val) => val,
            FrameRange::Range { min, max } => rng.next_in_range(min..max),
        }
    }

    /// Whether the range can produce a value.
    pub fn is_valid(&self) -> bool {
        match *self {
            FrameRange::Static(_) => true,
            FrameRange::Range { min, max } => min < max,
        }
    }
}

/// Random source returning fixed values, for driving the simulation in tests.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    /// Returned by every float draw.
    pub float: f64,
    /// Returned by every integer draw, clamped into the requested range.
    pub int: u32,
}

#[cfg(test)]
impl FixedRandom {
    /// Never passes a probability check and always picks the lowest frame count.
    pub fn never() -> Self {
        Self { float: 1.0, int: 0 }
    }

    /// Always passes a probability check.
    pub fn always() -> Self {
        Self { float: 0.0, int: 0 }
    }
}

#[cfg(test)]
impl RandomSource for FixedRandom {
    fn next_f64(&mut self) -> f64 {
        self.float
    }

    fn next_in_range(&mut self, range: Range<u32>) -> u32 {
        if range.is_empty() {
            range.start
        } else {
            self.int.clamp(range.start, range.end - 1)
        }
    }
}
