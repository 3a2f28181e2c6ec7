use vek::{Aabr, Vec2};

use crate::SIZE;

/// How many player bullets can be on the screen at the same time.
pub const MAX_PLAYER_BULLETS: usize = 5;

/// Bullet flying straight up from the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBullet {
    /// Top left.
    pub pos: Vec2<f64>,
}

impl PlayerBullet {
    /// Create a new bullet.
    pub fn new(pos: Vec2<f64>) -> Self {
        Self { pos }
    }

    /// Move up.
    pub fn update(&mut self, speed: f64) {
        self.pos.y -= speed;
    }

    /// Whether it left through the top of the screen.
    pub fn is_off_screen(&self) -> bool {
        self.pos.y < 0.0
    }

    /// Collision box.
    pub fn hitbox(&self, size: f64) -> Aabr<f64> {
        hitbox(self.pos, size)
    }
}

/// Bullet fired by a boss in a fixed direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossBullet {
    /// Top left.
    pub pos: Vec2<f64>,
    /// Pixels moved every tick.
    pub vel: Vec2<f64>,
}

impl BossBullet {
    /// Create a new bullet.
    pub fn new(pos: Vec2<f64>, vel: Vec2<f64>) -> Self {
        Self { pos, vel }
    }

    /// Move along the velocity.
    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    /// Whether it left the screen.
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < 0.0
            || self.pos.x > SIZE.w as f64
            || self.pos.y < 0.0
            || self.pos.y > SIZE.h as f64
    }

    /// Collision box.
    pub fn hitbox(&self, size: f64) -> Aabr<f64> {
        hitbox(self.pos, size)
    }
}

/// Square collision box from the top left.
fn hitbox(pos: Vec2<f64>, size: f64) -> Aabr<f64> {
    Aabr {
        min: pos,
        max: pos + size,
    }
}

#[cfg(test)]
mod tests {
    use vek::Vec2;

    use super::{BossBullet, PlayerBullet};

    #[test]
    fn test_player_bullet_leaves_top() {
        let mut bullet = PlayerBullet::new(Vec2::new(100.0, 15.0));

        bullet.update(10.0);
        assert!(!bullet.is_off_screen());
        bullet.update(10.0);
        assert!(bullet.is_off_screen());
    }

    #[test]
    fn test_boss_bullet_leaves_any_edge() {
        let mut bullet = BossBullet::new(Vec2::new(640.0, 100.0), Vec2::new(0.0, 5.0));
        for _ in 0..124 {
            bullet.update();
            assert!(!bullet.is_off_screen());
        }
        bullet.update();
        assert!(bullet.is_off_screen());

        let left = BossBullet::new(Vec2::new(-1.0, 100.0), Vec2::zero());
        assert!(left.is_off_screen());
        let right = BossBullet::new(Vec2::new(1281.0, 100.0), Vec2::zero());
        assert!(right.is_off_screen());
    }

    #[test]
    fn test_hitbox_size() {
        let bullet = PlayerBullet::new(Vec2::new(10.0, 20.0));
        let hitbox = bullet.hitbox(10.0);

        assert_eq!(hitbox.min, Vec2::new(10.0, 20.0));
        assert_eq!(hitbox.max, Vec2::new(20.0, 30.0));
    }
}
