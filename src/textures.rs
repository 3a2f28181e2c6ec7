use miette::Result;
use vek::Extent2;

use crate::{
    assets::Assets,
    font::Font,
    settings::{BossSettings, Settings},
    sprite::Sprite,
    SIZE,
};

/// Asset path of the player sprite.
const PLAYER_ASSET_PATH: &str = "player";
/// Asset path of the font used for all text.
const FONT_ASSET_PATH: &str = "font.hud";

/// Everything drawn, loaded once and scaled to the size it's drawn at.
pub struct Textures {
    /// The controllable character.
    pub player: Sprite,
    /// Per boss level, in the same order as the settings.
    pub levels: Vec<LevelTextures>,
    /// Text.
    pub font: Font,
}

impl Textures {
    /// Load all images referenced by the settings.
    ///
    /// Fails with the path of the first asset that can't be loaded.
    pub fn load(assets: &Assets, settings: &Settings) -> Result<Self> {
        puffin::profile_function!();

        let player_size = sprite_size(settings.player.size);
        let player = Sprite::from_image(&assets.image(PLAYER_ASSET_PATH)?, player_size);

        let levels = settings
            .bosses
            .iter()
            .map(|boss| LevelTextures::load(assets, boss, settings))
            .collect::<Result<Vec<_>>>()?;

        let font = assets.font(FONT_ASSET_PATH)?;

        log::info!("Loaded textures for {} boss levels", levels.len());

        Ok(Self {
            player,
            levels,
            font,
        })
    }
}

/// Images of a single boss level.
pub struct LevelTextures {
    /// The boss.
    pub boss: Sprite,
    /// Bullets fired by the boss.
    pub attack: Sprite,
    /// Covers the whole screen.
    pub background: Sprite,
}

impl LevelTextures {
    /// Load the images of a level.
    fn load(assets: &Assets, boss: &BossSettings, settings: &Settings) -> Result<Self> {
        log::debug!("Loading textures of boss '{}'", boss.name);

        let boss_sprite = Sprite::from_image(
            &assets.image(&boss.sprite)?,
            sprite_size(settings.arena.boss_size),
        );
        let attack = Sprite::from_image(
            &assets.image(&boss.attack_sprite)?,
            sprite_size(settings.arena.bullet_size),
        );
        let background = Sprite::from_image(&assets.image(&boss.background)?, SIZE.as_());

        Ok(Self {
            boss: boss_sprite,
            attack,
            background,
        })
    }
}

/// Square size in whole pixels, at least a single pixel.
fn sprite_size(size: f64) -> Extent2<u32> {
    Extent2::broadcast(size.round().max(1.0) as u32)
}
