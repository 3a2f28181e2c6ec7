use arrayvec::ArrayVec;
use vek::{Extent2, Vec2};

use crate::{
    boss::Boss,
    graphics::{self, healthbar::healthbar, Color},
    input::Input,
    player::Player,
    projectile::{BossBullet, PlayerBullet, MAX_PLAYER_BULLETS},
    random::RandomSource,
    settings::Settings,
    shield::Shield,
    shoot_window::ShootWindow,
    textures::Textures,
    timer::Timer,
    SIZE, UPDATES_PER_SECOND,
};

/// Shown before the first fight.
const STORY: &[&str] = &[
    "Planet Earth has been pushed to its limits.",
    "Years of pollution, unchecked industrial growth, and disregard",
    "for nature have awakened monstrous entities that embody",
    "the damage caused by human negligence.",
    "",
    "These forces of destruction - Trash Titan, Oilbeast, and Smogzilla -",
    "now threaten to make the planet uninhabitable.",
    "",
    "You play as Aria, a courageous Climate Hero who is chosen",
    "by Earth itself to restore balance and save the planet.",
    "Guided by Earth's spirit, Aria must travel across polluted",
    "environments, defeat the forces of destruction,",
    "and heal the scars of human negligence.",
];

/// Size of a healthbar.
const HEALTHBAR_SIZE: Extent2<f64> = Extent2::new(200.0, 20.0);
/// Radius of the shield drawn around the player.
const SHIELD_RADIUS: f64 = 30.0;
/// Opacity of the shield.
const SHIELD_ALPHA: u8 = 128;

/// What the game is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Showing the story until the timer runs out.
    Story(Timer),
    /// Fighting a boss.
    Playing,
    /// The player died, waiting for a restart.
    GameOver,
    /// All bosses are defeated, waiting for a restart.
    Victory,
}

/// Handles everything related to the game.
pub struct GameState {
    /// Values loaded at startup.
    settings: Settings,
    /// What the game is doing.
    phase: Phase,
    /// Controllable character.
    player: Player,
    /// Enemy of the current level.
    boss: Boss,
    /// Invulnerability of the player.
    shield: Shield,
    /// When the player can shoot.
    shoot_window: ShootWindow,
    /// Bullets fired by the player.
    player_bullets: ArrayVec<PlayerBullet, MAX_PLAYER_BULLETS>,
    /// Bullets fired by the boss.
    boss_bullets: Vec<BossBullet>,
}

impl GameState {
    /// Construct the game showing the story, with the first boss waiting.
    ///
    /// The settings must be validated.
    pub fn new(settings: Settings, rng: &mut impl RandomSource) -> Self {
        let phase = Phase::Story(Timer::new(settings.story_duration));
        let player = Player::new(&settings);
        let boss = Boss::new(0, &settings);
        let shield = Shield::default();
        let shoot_window = ShootWindow::new(&settings.shoot_window, rng);
        let player_bullets = ArrayVec::new();
        let boss_bullets = Vec::new();

        Self {
            settings,
            phase,
            player,
            boss,
            shield,
            shoot_window,
            player_bullets,
            boss_bullets,
        }
    }

    /// Update a tick and handle user input.
    pub fn update(&mut self, input: &Input, rng: &mut impl RandomSource) {
        puffin::profile_function!();

        match &mut self.phase {
            Phase::Story(timer) => {
                if timer.update() {
                    log::info!("Fighting '{}'", self.boss.settings(&self.settings).name);

                    self.phase = Phase::Playing;
                }
            }
            Phase::Playing => self.update_fight(input, rng),
            Phase::GameOver | Phase::Victory => {
                // Everything is frozen, only a restart is possible
                if input.restart_pressed {
                    log::info!("Restarting from the first boss");

                    self.reset_level(0, rng);
                }
            }
        }
    }

    /// Draw a frame.
    pub fn render(&self, canvas: &mut [u32], textures: &Textures) {
        puffin::profile_function!();

        if let Phase::Story(_) = self.phase {
            self.render_story(canvas, textures);
            return;
        }

        let level = &textures.levels[self.boss.level()];
        level.background.render(canvas, Vec2::zero());

        // Entities
        let player_pos = self.player.pos();
        textures.player.render(canvas, player_pos);
        if self.shield.is_active() {
            graphics::fill_circle(
                canvas,
                self.player.center(&self.settings),
                SHIELD_RADIUS,
                Color::LighterBlue,
                SHIELD_ALPHA,
            );
        }
        if self.phase != Phase::Victory {
            level.boss.render(canvas, Boss::pos(&self.settings));
        }

        let bullet_size = Extent2::broadcast(self.settings.player.bullet_size);
        for bullet in &self.player_bullets {
            graphics::fill_rect(canvas, bullet.pos, bullet_size, Color::White);
        }
        for bullet in &self.boss_bullets {
            level.attack.render(canvas, bullet.pos);
        }

        self.render_hud(canvas, textures);
    }

    /// What the game is doing.
    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Health bars and status text.
    fn render_hud(&self, canvas: &mut [u32], textures: &Textures) {
        let font = &textures.font;
        let (w, h) = (SIZE.w as f64, SIZE.h as f64);
        let center = w / 2.0;

        // Health bars
        healthbar(
            self.player.health(),
            self.settings.player.max_health,
            Vec2::new(50.0, h - 50.0),
            HEALTHBAR_SIZE,
            canvas,
        );
        healthbar(
            self.boss.health(),
            self.boss.settings(&self.settings).health,
            Vec2::new(w - 250.0, 50.0),
            HEALTHBAR_SIZE,
            canvas,
        );

        font.render(canvas, "Player Health", Vec2::new(50.0, h - 80.0), Color::White);
        font.render(canvas, "Boss Health", Vec2::new(w - 250.0, 20.0), Color::White);
        font.render(
            canvas,
            &format!("Level: {}", self.boss.level() + 1),
            Vec2::new(center - 50.0, 20.0),
            Color::White,
        );

        if self.shoot_window.is_open() {
            font.render(canvas, "Shoot Now!", Vec2::new(center - 50.0, h - 80.0), Color::Black);
        }

        let seconds = self.shield.remaining().div_ceil(UPDATES_PER_SECOND);
        let (shield_text, shield_color) = match self.shield {
            Shield::Ready => ("Shield Ready! (Press D)".to_string(), Color::Black),
            Shield::Active(_) => (format!("Shield Active: {seconds}s"), Color::LighterBlue),
            Shield::Cooldown(_) => (format!("Shield Cooldown: {seconds}s"), Color::Red),
        };
        font.render(canvas, &shield_text, Vec2::new(center - 100.0, h - 120.0), shield_color);

        let banner = match self.phase {
            Phase::GameOver => Some(("GAME OVER", Color::Red)),
            Phase::Victory => Some(("VICTORY!", Color::Green)),
            _ => None,
        };
        if let Some((text, color)) = banner {
            font.render(canvas, text, Vec2::new(center - 100.0, h / 2.0), color);
            font.render(
                canvas,
                "Press R to Restart",
                Vec2::new(center - 120.0, h / 2.0 + 40.0),
                Color::White,
            );
        }
    }

    /// Centered story text on black.
    fn render_story(&self, canvas: &mut [u32], textures: &Textures) {
        canvas.fill(Color::Black.as_u32());

        for (index, line) in STORY.iter().enumerate() {
            let x = (SIZE.w as f64 - textures.font.width(line) as f64) / 2.0;
            let y = 50.0 + index as f64 * 40.0;

            textures.font.render(canvas, line, Vec2::new(x, y), Color::White);
        }
    }

    /// A single tick of the boss fight.
    fn update_fight(&mut self, input: &Input, rng: &mut impl RandomSource) {
        let settings = &self.settings;

        self.player.update(input, settings);

        // Shield
        self.shield.update(&settings.shield);
        if input.shield_pressed && self.shield.activate(&settings.shield) {
            log::debug!("Shield raised");
        }

        // Shooting
        self.shoot_window.update(&settings.shoot_window, rng);
        if input.fire_pressed && self.shoot_window.is_open() && !self.player_bullets.is_full() {
            self.player_bullets
                .push(PlayerBullet::new(self.player.muzzle(settings)));
        }

        // Player bullets hitting the boss
        let boss_hitbox = self.boss.hitbox(settings);
        let mut boss_hits = 0;
        self.player_bullets.retain(|bullet| {
            bullet.update(settings.player.bullet_speed);

            if bullet.is_off_screen() {
                false
            } else if bullet
                .hitbox(settings.player.bullet_size)
                .collides_with_aabr(boss_hitbox)
            {
                boss_hits += 1;

                false
            } else {
                true
            }
        });
        self.boss
            .damage(boss_hits * settings.player.bullet_damage);

        // Boss attacks
        if let Some(bullet) = self.boss.fire(self.player.center(settings), settings, rng) {
            self.boss_bullets.push(bullet);
        }

        // Boss bullets hitting the player
        let player_hitbox = self.player.hitbox(settings);
        let shielded = self.shield.is_active();
        let mut player_hits = 0;
        self.boss_bullets.retain_mut(|bullet| {
            bullet.update();

            if bullet.is_off_screen() {
                false
            } else if bullet
                .hitbox(settings.arena.bullet_size)
                .collides_with_aabr(player_hitbox)
            {
                // Absorbed by the shield
                if !shielded {
                    player_hits += 1;
                }

                false
            } else {
                true
            }
        });
        self.player
            .damage(player_hits * settings.arena.bullet_damage);

        // Check the game state, beating the boss wins from dying in the same tick
        if self.boss.is_defeated() {
            self.next_level(rng);
        } else if self.player.is_dead() {
            log::info!(
                "Game over against '{}'",
                self.boss.settings(&self.settings).name
            );

            self.phase = Phase::GameOver;
        }
    }

    /// Move to the next boss or win the game.
    fn next_level(&mut self, rng: &mut impl RandomSource) {
        let defeated = &self.boss.settings(&self.settings).name;
        let next = self.boss.level() + 1;

        if next < self.settings.bosses.len() {
            log::info!(
                "Defeated '{defeated}', next up is '{}'",
                self.settings.bosses[next].name
            );

            self.reset_level(next, rng);
        } else {
            log::info!("Defeated '{defeated}', all bosses are beaten");

            self.player_bullets.clear();
            self.boss_bullets.clear();
            self.phase = Phase::Victory;
        }
    }

    /// Start a fresh fight against a boss.
    fn reset_level(&mut self, level: usize, rng: &mut impl RandomSource) {
        self.phase = Phase::Playing;
        self.player = Player::new(&self.settings);
        self.boss = Boss::new(level, &self.settings);
        self.shield = Shield::default();
        self.shoot_window = ShootWindow::new(&self.settings.shoot_window, rng);
        self.player_bullets.clear();
        self.boss_bullets.clear();
    }
}

#[cfg(test)]
mod tests {
    use vek::Vec2;

    use super::{GameState, Phase};
    use crate::{
        boss::Boss,
        input::Input,
        projectile::{BossBullet, PlayerBullet},
        random::{FixedRandom, RandomSource},
        settings::Settings,
        shield::Shield,
    };

    /// Game that skipped the story.
    fn playing(rng: &mut impl RandomSource) -> GameState {
        let mut state = GameState::new(Settings::default(), rng);
        for _ in 0..300 {
            state.update(&Input::default(), rng);
        }
        assert_eq!(state.phase(), Phase::Playing);

        state
    }

    /// Check the invariants that must hold after every tick.
    fn assert_invariants(state: &GameState) {
        let settings = &state.settings;
        let pos = state.player.pos();

        assert!(state.player.health() <= settings.player.max_health);
        assert!(state.boss.health() <= state.boss.settings(settings).health);
        assert!(state.player_bullets.len() <= 5);
        assert!(pos.x >= 0.0 && pos.x <= 1230.0, "x {}", pos.x);
        assert!(pos.y >= 200.0 && pos.y <= 450.0, "y {}", pos.y);
    }

    #[test]
    fn test_story_is_shown_first() {
        let mut rng = FixedRandom::never();
        let mut state = GameState::new(Settings::default(), &mut rng);

        for _ in 0..299 {
            state.update(&Input::default(), &mut rng);
            assert!(matches!(state.phase(), Phase::Story(_)));
        }
        state.update(&Input::default(), &mut rng);
        assert_eq!(state.phase(), Phase::Playing);
    }

    #[test]
    fn test_player_bullets_are_capped() {
        let mut rng = FixedRandom::never();
        let mut state = playing(&mut rng);
        // Move away from the boss so bullets don't hit
        state.player.set_pos(Vec2::new(0.0, 450.0));

        let fire = Input {
            fire_pressed: true,
            ..Default::default()
        };

        // Closed window for the lowest drawn value, fire doesn't do anything
        for _ in 0..299 {
            state.update(&fire, &mut rng);
            assert!(state.player_bullets.is_empty());
        }

        state.update(&fire, &mut rng);
        assert!(state.shoot_window.is_open());
        assert_eq!(state.player_bullets.len(), 1);

        for _ in 0..20 {
            state.update(&fire, &mut rng);
            assert_invariants(&state);
        }
        assert_eq!(state.player_bullets.len(), 5);
    }

    #[test]
    fn test_shield_absorbs_bullets() {
        let mut rng = FixedRandom::never();
        let mut state = playing(&mut rng);
        let shield = Input {
            shield_pressed: true,
            ..Default::default()
        };

        state.update(&shield, &mut rng);
        assert!(state.shield.is_active());

        // A bullet resting on the player
        let pos = state.player.pos() + 10.0;
        state.boss_bullets.push(BossBullet::new(pos, Vec2::zero()));
        state.update(&Input::default(), &mut rng);

        assert_eq!(state.player.health(), 250);
        assert!(state.boss_bullets.is_empty());
    }

    #[test]
    fn test_unshielded_hit_damages() {
        let mut rng = FixedRandom::never();
        let mut state = playing(&mut rng);

        let pos = state.player.pos() + 10.0;
        state.boss_bullets.push(BossBullet::new(pos, Vec2::zero()));
        state.update(&Input::default(), &mut rng);

        assert_eq!(state.player.health(), 240);
        assert!(state.boss_bullets.is_empty());
    }

    #[test]
    fn test_boss_fires_at_player() {
        let mut rng = FixedRandom::always();
        let mut state = playing(&mut rng);

        state.update(&Input::default(), &mut rng);

        // Spawned at the boss center and moved once towards the player
        assert_eq!(state.boss_bullets.len(), 1);
        let bullet = state.boss_bullets[0];
        let center = state.boss.center(&state.settings);
        assert!((bullet.vel.magnitude() - 3.0).abs() < 1e-9);
        assert!(bullet.vel.y > 0.0);
        assert_eq!(bullet.pos, center + bullet.vel);
    }

    #[test]
    fn test_defeating_boss_advances_level() {
        let mut rng = FixedRandom::never();
        let mut state = playing(&mut rng);
        let inside_boss = Boss::pos(&state.settings) + Vec2::new(40.0, 60.0);

        for hit in 1..=300 {
            state
                .player_bullets
                .push(PlayerBullet::new(inside_boss));
            // Leftovers from other levels must be cleared
            state
                .boss_bullets
                .push(BossBullet::new(Vec2::new(0.0, 600.0), Vec2::zero()));
            state.update(&Input::default(), &mut rng);
            assert_invariants(&state);

            if hit < 300 {
                assert_eq!(state.boss.level(), 0);
                assert_eq!(state.boss.health(), 3000 - hit * 10);
            }
        }

        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.boss.level(), 1);
        assert_eq!(state.boss.health(), 6000);
        assert_eq!(state.player.health(), 250);
        assert!(state.player_bullets.is_empty());
        assert!(state.boss_bullets.is_empty());
        assert_eq!(state.shield, Shield::Ready);
        assert!(!state.shoot_window.is_open());
    }

    #[test]
    fn test_player_dies_after_25_hits() {
        let mut rng = FixedRandom::never();
        let mut state = playing(&mut rng);

        for hit in 1..=25 {
            let pos = state.player.pos() + 10.0;
            state.boss_bullets.push(BossBullet::new(pos, Vec2::zero()));
            state.update(&Input::default(), &mut rng);
            assert_invariants(&state);

            assert_eq!(state.player.health(), 250 - hit * 10);
            if hit < 25 {
                assert_eq!(state.phase(), Phase::Playing);
            }
        }

        assert_eq!(state.player.health(), 0);
        assert_eq!(state.phase(), Phase::GameOver);
    }

    #[test]
    fn test_game_over_freezes_until_restart() {
        let mut rng = FixedRandom::always();
        let mut state = playing(&mut rng);
        state.player.damage(250);
        state.update(&Input::default(), &mut rng);
        assert_eq!(state.phase(), Phase::GameOver);

        let pos = state.player.pos();
        let bullets = state.boss_bullets.clone();
        let everything = Input {
            left_pressed: true,
            up_pressed: true,
            shield_pressed: true,
            fire_pressed: true,
            ..Default::default()
        };
        for _ in 0..100 {
            state.update(&everything, &mut rng);
        }
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.player.pos(), pos);
        assert_eq!(state.boss_bullets, bullets);
        assert_eq!(state.shield, Shield::Ready);

        state.update(
            &Input {
                restart_pressed: true,
                ..Default::default()
            },
            &mut rng,
        );
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.boss.level(), 0);
        assert_eq!(state.player.health(), 250);
        assert!(state.boss_bullets.is_empty());
    }

    #[test]
    fn test_victory_after_last_boss() {
        let mut rng = FixedRandom::never();
        let mut state = playing(&mut rng);

        for level in 0..3 {
            assert_eq!(state.boss.level(), level);
            state.boss.damage(state.boss.health() - 10);
            state
                .player_bullets
                .push(PlayerBullet::new(Boss::pos(&state.settings) + 50.0));
            state.update(&Input::default(), &mut rng);
        }

        assert_eq!(state.phase(), Phase::Victory);
        assert_eq!(state.boss.level(), 2);
        assert!(state.player_bullets.is_empty());

        // Only restart does something
        state.update(
            &Input {
                fire_pressed: true,
                ..Default::default()
            },
            &mut rng,
        );
        assert_eq!(state.phase(), Phase::Victory);

        state.update(
            &Input {
                restart_pressed: true,
                ..Default::default()
            },
            &mut rng,
        );
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.boss.level(), 0);
        assert_eq!(state.boss.health(), 3000);
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        let mut rng = fastrand::Rng::with_seed(2024);
        let mut inputs = fastrand::Rng::with_seed(7);
        let mut state = playing(&mut rng);

        for _ in 0..20_000 {
            let input = Input {
                up_pressed: inputs.bool(),
                down_pressed: inputs.bool(),
                left_pressed: inputs.bool(),
                right_pressed: inputs.bool(),
                shield_pressed: inputs.u8(..) < 8,
                fire_pressed: inputs.bool(),
                restart_pressed: inputs.u8(..) < 8,
            };
            state.update(&input, &mut rng);
            assert_invariants(&state);
        }
    }
}
