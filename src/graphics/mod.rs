use std::f32::consts::TAU;

use raqote::{AntialiasMode, BlendMode, DrawOptions, DrawTarget, PathBuilder, SolidSource, Source};
use vek::{Extent2, Vec2};

use crate::SIZE;

pub mod healthbar;

/// Don't draw with anti-aliasing.
pub(crate) const DRAW_OPTIONS: DrawOptions = DrawOptions {
    antialias: AntialiasMode::None,
    blend_mode: BlendMode::SrcOver,
    alpha: 1.0,
};

/// Different colors.
///
/// Based on DB32 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Green,
    LighterBlue,
    White,
    Red,
}

impl Color {
    /// Every color, in the order they are declared.
    pub const ALL: [Color; 5] = [
        Self::Black,
        Self::Green,
        Self::LighterBlue,
        Self::White,
        Self::Red,
    ];

    /// Convert the color to its binary representation.
    pub const fn as_u32(self) -> u32 {
        match self {
            Self::Black => 0xff_00_00_00,
            Self::Green => 0xff_6a_be_30,
            Self::LighterBlue => 0xff_5f_cd_e4,
            Self::White => 0xff_ff_ff_ff,
            Self::Red => 0xff_ac_32_32,
        }
    }

    /// To raqote solid source.
    pub fn to_source(self) -> SolidSource {
        self.to_translucent_source(u8::MAX)
    }

    /// To raqote solid source with a custom opacity.
    pub fn to_translucent_source(self, alpha: u8) -> SolidSource {
        let [b, g, r, _] = self.as_u32().to_le_bytes();

        SolidSource::from_unpremultiplied_argb(alpha, r, g, b)
    }
}

/// Fill a rectangle, parts outside of the canvas are ignored.
pub fn fill_rect(canvas: &mut [u32], pos: Vec2<f64>, size: Extent2<f64>, color: Color) {
    // Convert the buffer to a raqote target
    let mut draw = DrawTarget::from_backing(SIZE.w as i32, SIZE.h as i32, canvas);

    draw.fill_rect(
        pos.x as f32,
        pos.y as f32,
        size.w as f32,
        size.h as f32,
        &Source::Solid(color.to_source()),
        &DRAW_OPTIONS,
    );
}

/// Blend a translucent filled circle on top of what's already drawn.
pub fn fill_circle(canvas: &mut [u32], center: Vec2<f64>, radius: f64, color: Color, alpha: u8) {
    let mut draw = DrawTarget::from_backing(SIZE.w as i32, SIZE.h as i32, canvas);

    let mut path = PathBuilder::new();
    path.arc(center.x as f32, center.y as f32, radius as f32, 0.0, TAU);
    path.close();

    draw.fill(
        &path.finish(),
        &Source::Solid(color.to_translucent_source(alpha)),
        &DRAW_OPTIONS,
    );
}
