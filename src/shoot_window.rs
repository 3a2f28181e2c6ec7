use crate::{random::RandomSource, settings::ShootWindowSettings, timer::Timer};

/// Alternates between periods where the player can and can't shoot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShootWindow {
    /// Whether the player can shoot.
    open: bool,
    /// When to switch.
    timer: Timer,
}

impl ShootWindow {
    /// Start with a closed window of random length.
    pub fn new(settings: &ShootWindowSettings, rng: &mut impl RandomSource) -> Self {
        let open = false;
        let timer = Timer::new(settings.closed.value(rng));

        Self { open, timer }
    }

    /// Advance by one tick, flipping the window when its time is up.
    pub fn update(&mut self, settings: &ShootWindowSettings, rng: &mut impl RandomSource) {
        if !self.timer.update() {
            return;
        }

        self.open = !self.open;

        let range = if self.open {
            settings.open
        } else {
            settings.closed
        };
        self.timer = Timer::new(range.value(rng));

        log::debug!(
            "Shoot window {} for {} ticks",
            if self.open { "opened" } else { "closed" },
            self.timer.remaining()
        );
    }

    /// Whether the player can shoot.
    pub fn is_open(&self) -> bool {
        self.open
    }
}
