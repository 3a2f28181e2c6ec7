use assets_manager::{loader::TomlLoader, Asset};
use miette::{ensure, Result};
use serde::Deserialize;

use crate::{random::FrameRange, SIZE};

/// Game settings loaded from a file so it's easier to tune them.
///
/// Every missing key falls back to its default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How many ticks the story screen is shown.
    pub story_duration: u32,
    /// The controllable character.
    pub player: PlayerSettings,
    /// Timed invulnerability.
    pub shield: ShieldSettings,
    /// Intervals in which the player may fire.
    pub shoot_window: ShootWindowSettings,
    /// Values shared by every boss.
    pub arena: ArenaSettings,
    /// Boss levels in the order they are fought.
    pub bosses: Vec<BossSettings>,
}

impl Settings {
    /// Check that the values can be simulated.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.bosses.is_empty(),
            "Settings must define at least one boss level"
        );

        for (index, boss) in self.bosses.iter().enumerate() {
            ensure!(
                boss.health > 0,
                "Boss level {index} ('{}') must have positive health",
                boss.name
            );
            ensure!(
                (0.0..=1.0).contains(&boss.fire_rate),
                "Boss level {index} ('{}') fire rate {} is not a probability",
                boss.name,
                boss.fire_rate
            );
            ensure!(
                boss.bullet_speed.is_finite() && boss.bullet_speed >= 0.0,
                "Boss level {index} ('{}') bullet speed {} must be a non-negative number",
                boss.name,
                boss.bullet_speed
            );
        }

        // Not required, but probably a mistake
        if self
            .bosses
            .windows(2)
            .any(|pair| pair[1].health < pair[0].health || pair[1].fire_rate < pair[0].fire_rate)
        {
            log::warn!("Boss levels don't increase in difficulty");
        }

        ensure!(
            self.player.max_health > 0,
            "Player maximum health must be positive"
        );

        // Positions and sizes are clamped against each other, a NaN would break that
        for (key, value) in [
            ("player.speed", self.player.speed),
            ("player.size", self.player.size),
            ("player.min_distance_below_boss", self.player.min_distance_below_boss),
            ("player.max_distance_below_boss", self.player.max_distance_below_boss),
            ("player.bullet_speed", self.player.bullet_speed),
            ("player.bullet_size", self.player.bullet_size),
            ("arena.boss_size", self.arena.boss_size),
            ("arena.boss_y", self.arena.boss_y),
            ("arena.bullet_size", self.arena.bullet_size),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "Setting '{key}' must be a non-negative number, got {value}"
            );
        }
        ensure!(
            self.player.size > 0.0 && self.player.size <= SIZE.w as f64,
            "Player size {} doesn't fit the screen width {}",
            self.player.size,
            SIZE.w
        );
        ensure!(
            self.player.min_distance_below_boss <= self.player.max_distance_below_boss,
            "Player vertical band is empty: {} > {}",
            self.player.min_distance_below_boss,
            self.player.max_distance_below_boss
        );
        ensure!(
            self.shoot_window.closed.is_valid(),
            "Closed shoot window range {:?} is empty",
            self.shoot_window.closed
        );
        ensure!(
            self.shoot_window.open.is_valid(),
            "Open shoot window range {:?} is empty",
            self.shoot_window.open
        );

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            story_duration: 300,
            player: PlayerSettings::default(),
            shield: ShieldSettings::default(),
            shoot_window: ShootWindowSettings::default(),
            arena: ArenaSettings::default(),
            bosses: vec![
                BossSettings::new("Trash Titan", 3000, 3.0, 0.01, 1, "trash-titan", "trash-can"),
                BossSettings::new("Oilbeast", 6000, 4.0, 0.02, 2, "oil-beast", "oil-blob"),
                BossSettings::new("Smogzilla", 10000, 5.0, 0.03, 3, "smogzilla", "emission"),
            ],
        }
    }
}

impl Asset for Settings {
    const EXTENSION: &'static str = "toml";

    type Loader = TomlLoader;
}

/// Player settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Health at the start of every level.
    pub max_health: u32,
    /// How many pixels the player moves in a tick.
    pub speed: f64,
    /// Width and height of the sprite and hitbox.
    pub size: f64,
    /// Closest the top of the player can get to the top of the boss.
    pub min_distance_below_boss: f64,
    /// Furthest the top of the player can get from the top of the boss.
    pub max_distance_below_boss: f64,
    /// How many pixels a bullet moves up in a tick.
    pub bullet_speed: f64,
    /// Width and height of a bullet.
    pub bullet_size: f64,
    /// Health a bullet takes from the boss.
    pub bullet_damage: u32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            max_health: 250,
            speed: 5.0,
            size: 50.0,
            min_distance_below_boss: 150.0,
            max_distance_below_boss: 400.0,
            bullet_speed: 10.0,
            bullet_size: 10.0,
            bullet_damage: 10,
        }
    }
}

/// Shield timings in ticks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShieldSettings {
    /// How long the shield stays up.
    pub duration: u32,
    /// How long after dropping before it can be raised again.
    pub cooldown: u32,
}

impl Default for ShieldSettings {
    fn default() -> Self {
        Self {
            duration: 180,
            cooldown: 300,
        }
    }
}

/// Shoot window timings in ticks, drawn again every time the window opens or closes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShootWindowSettings {
    /// How long the player can't shoot.
    pub closed: FrameRange,
    /// How long the player can shoot.
    pub open: FrameRange,
}

impl Default for ShootWindowSettings {
    fn default() -> Self {
        Self {
            closed: FrameRange::Range { min: 300, max: 660 },
            open: FrameRange::Range { min: 300, max: 420 },
        }
    }
}

/// Settings shared by all bosses.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    /// Width and height of the boss sprite and hitbox.
    pub boss_size: f64,
    /// Vertical position of the top of the boss.
    pub boss_y: f64,
    /// Width and height of a boss bullet.
    pub bullet_size: f64,
    /// Health a boss bullet takes from the player.
    pub bullet_damage: u32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            boss_size: 100.0,
            boss_y: 50.0,
            bullet_size: 15.0,
            bullet_damage: 10,
        }
    }
}

/// A single boss level.
#[derive(Debug, Clone, Deserialize)]
pub struct BossSettings {
    /// Shown in the logs.
    pub name: String,
    /// Health at the start of the level.
    pub health: u32,
    /// How many pixels a bullet moves in a tick.
    pub bullet_speed: f64,
    /// Chance to fire a bullet in a tick.
    pub fire_rate: f64,
    /// Asset path of the boss sprite.
    pub sprite: String,
    /// Asset path of the bullet sprite.
    pub attack_sprite: String,
    /// Asset path of the level background.
    pub background: String,
}

impl BossSettings {
    /// Level with assets following the default layout of the asset directory.
    fn new(
        name: &str,
        health: u32,
        bullet_speed: f64,
        fire_rate: f64,
        level: usize,
        sprite: &str,
        attack_sprite: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            health,
            bullet_speed,
            fire_rate,
            sprite: format!("boss.{sprite}"),
            attack_sprite: format!("attack.{attack_sprite}"),
            background: format!("background.level-{level}"),
        }
    }
}
