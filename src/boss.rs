use vek::{Aabr, Vec2};

use crate::{
    projectile::BossBullet,
    random::RandomSource,
    settings::{BossSettings, Settings},
    SIZE,
};

/// The enemy of the current level.
///
/// Doesn't move, only fires at the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boss {
    /// Index into the boss levels of the settings.
    level: usize,
    /// Remaining health, zero is defeated.
    health: u32,
}

impl Boss {
    /// Spawn the boss of a level with full health.
    pub fn new(level: usize, settings: &Settings) -> Self {
        let health = settings.bosses[level].health;

        Self { level, health }
    }

    /// Settings for this level.
    pub fn settings<'a>(&self, settings: &'a Settings) -> &'a BossSettings {
        &settings.bosses[self.level]
    }

    /// Roll whether to fire this tick and aim at the target when it does.
    pub fn fire(
        &self,
        target: Vec2<f64>,
        settings: &Settings,
        rng: &mut impl RandomSource,
    ) -> Option<BossBullet> {
        let boss = self.settings(settings);
        if rng.next_f64() >= boss.fire_rate {
            return None;
        }

        let origin = self.center(settings);
        let vel = aim(origin, target, boss.bullet_speed)?;

        Some(BossBullet::new(origin, vel))
    }

    /// Take damage, health can't go below zero.
    pub fn damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Whether the boss is beaten.
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Index of the level.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Remaining health.
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Top left of the sprite, horizontally centered on the screen.
    pub fn pos(settings: &Settings) -> Vec2<f64> {
        Vec2::new(
            (SIZE.w as f64 - settings.arena.boss_size) / 2.0,
            settings.arena.boss_y,
        )
    }

    /// Middle of the sprite, where bullets are fired from.
    pub fn center(&self, settings: &Settings) -> Vec2<f64> {
        Self::pos(settings) + settings.arena.boss_size / 2.0
    }

    /// Collision box.
    pub fn hitbox(&self, settings: &Settings) -> Aabr<f64> {
        let pos = Self::pos(settings);

        Aabr {
            min: pos,
            max: pos + settings.arena.boss_size,
        }
    }
}

/// Velocity moving from `from` towards `to` with a fixed speed.
///
/// `None` when both points are the same.
pub fn aim(from: Vec2<f64>, to: Vec2<f64>, speed: f64) -> Option<Vec2<f64>> {
    let delta = to - from;
    let distance = delta.magnitude();
    if distance == 0.0 {
        return None;
    }

    Some(delta / distance * speed)
}
