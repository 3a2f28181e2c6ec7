use crate::{settings::ShieldSettings, timer::Timer};

/// Temporary invulnerability against boss bullets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shield {
    /// Can be raised.
    #[default]
    Ready,
    /// Absorbing bullets until the timer runs out.
    Active(Timer),
    /// Recharging until the timer runs out.
    Cooldown(Timer),
}

impl Shield {
    /// Raise the shield if it's ready.
    ///
    /// Returns whether it was raised.
    pub fn activate(&mut self, settings: &ShieldSettings) -> bool {
        if *self != Shield::Ready {
            return false;
        }

        *self = Shield::Active(Timer::new(settings.duration));

        true
    }

    /// Advance the timers by one tick.
    pub fn update(&mut self, settings: &ShieldSettings) {
        match self {
            Shield::Ready => (),
            Shield::Active(timer) => {
                if timer.update() {
                    *self = Shield::Cooldown(Timer::new(settings.cooldown));
                }
            }
            Shield::Cooldown(timer) => {
                if timer.update() {
                    *self = Shield::Ready;
                }
            }
        }
    }

    /// Whether bullets are absorbed.
    pub fn is_active(&self) -> bool {
        matches!(self, Shield::Active(_))
    }

    /// Ticks left in the current state, zero when ready.
    pub fn remaining(&self) -> u32 {
        match self {
            Shield::Ready => 0,
            Shield::Active(timer) | Shield::Cooldown(timer) => timer.remaining(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Shield;
    use crate::settings::ShieldSettings;

    fn settings() -> ShieldSettings {
        ShieldSettings {
            duration: 180,
            cooldown: 300,
        }
    }

    #[test]
    fn test_full_cycle() {
        let settings = settings();
        let mut shield = Shield::default();

        assert!(shield.activate(&settings));
        assert!(shield.is_active());

        // Active for exactly the duration, counting the tick it was raised in
        for _ in 1..180 {
            shield.update(&settings);
            assert!(shield.is_active());
        }
        shield.update(&settings);
        assert!(matches!(shield, Shield::Cooldown(_)));
        assert_eq!(shield.remaining(), 300);

        for _ in 1..300 {
            shield.update(&settings);
            assert!(matches!(shield, Shield::Cooldown(_)));
        }
        shield.update(&settings);
        assert_eq!(shield, Shield::Ready);
    }

    #[test]
    fn test_cannot_reactivate_before_ready() {
        let settings = settings();
        let mut shield = Shield::default();

        assert!(shield.activate(&settings));
        assert!(!shield.activate(&settings));

        for _ in 0..180 {
            shield.update(&settings);
        }
        assert!(!shield.activate(&settings));
        assert!(!shield.is_active());
    }
}
