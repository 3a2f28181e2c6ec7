use vek::{Aabr, Vec2};

use crate::{input::Input, settings::Settings, SIZE};

/// The controllable character.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top left of the sprite.
    pos: Vec2<f64>,
    /// Remaining health, zero is dead.
    health: u32,
}

impl Player {
    /// Spawn at the bottom center of the area the player can move in.
    pub fn new(settings: &Settings) -> Self {
        let spawn = Vec2::new(SIZE.w as f64 / 2.0, SIZE.h as f64 - 100.0);
        let pos = Self::clamp(spawn, settings);
        let health = settings.player.max_health;

        Self { pos, health }
    }

    /// Move based on the held keys.
    pub fn update(&mut self, input: &Input, settings: &Settings) {
        let speed = settings.player.speed;

        let mut delta = Vec2::zero();
        if input.left_pressed {
            delta.x -= speed;
        }
        if input.right_pressed {
            delta.x += speed;
        }
        if input.up_pressed {
            delta.y -= speed;
        }
        if input.down_pressed {
            delta.y += speed;
        }

        self.pos = Self::clamp(self.pos + delta, settings);
    }

    /// Take damage, health can't go below zero.
    pub fn damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Whether the player died.
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Top left of the sprite.
    pub fn pos(&self) -> Vec2<f64> {
        self.pos
    }

    /// Remaining health.
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Middle of the sprite, where bosses aim at.
    pub fn center(&self, settings: &Settings) -> Vec2<f64> {
        self.pos + settings.player.size / 2.0
    }

    /// Where new bullets appear.
    pub fn muzzle(&self, settings: &Settings) -> Vec2<f64> {
        Vec2::new(
            self.pos.x + (settings.player.size - settings.player.bullet_size) / 2.0,
            self.pos.y,
        )
    }

    /// Collision box.
    pub fn hitbox(&self, settings: &Settings) -> Aabr<f64> {
        Aabr {
            min: self.pos,
            max: self.pos + settings.player.size,
        }
    }

    /// Keep the position on the screen and in the band below the boss.
    fn clamp(pos: Vec2<f64>, settings: &Settings) -> Vec2<f64> {
        let boss_y = settings.arena.boss_y;

        Vec2::new(
            pos.x.clamp(0.0, SIZE.w as f64 - settings.player.size),
            pos.y.clamp(
                boss_y + settings.player.min_distance_below_boss,
                boss_y + settings.player.max_distance_below_boss,
            ),
        )
    }

    #[cfg(test)]
    pub fn set_pos(&mut self, pos: Vec2<f64>) {
        self.pos = pos;
    }
}
