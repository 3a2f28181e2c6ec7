use assets_manager::{loader::TomlLoader, AnyCache, Asset, BoxedError, Compound, SharedString};
use blit::{prelude::SubRect, Blit, BlitBuffer, BlitOptions};
use image::{imageops::FilterType, RgbaImage};
use serde::Deserialize;
use vek::{Extent2, Vec2};

use crate::{assets::Image, graphics::Color, SIZE};

/// First character in the image.
const CHAR_START: char = '!';
/// Last character in the image.
const CHAR_END: char = '~';
/// Pixels with an alpha below this are not part of a glyph.
const ALPHA_THRESHOLD: u8 = 127;

/// Pixel font loaded from an image.
pub struct Font {
    /// Glyph strip for every color, indexed by the color.
    sprites: [BlitBuffer; Color::ALL.len()],
    /// Size of a single character.
    char_size: Extent2<u32>,
}

impl Font {
    /// Construct from a horizontal strip of glyphs, scaled up by a whole factor.
    pub fn from_image(image: &RgbaImage, char_size: Extent2<u8>, scale: u8) -> Self {
        let scale = scale.max(1) as u32;
        let scaled = image::imageops::resize(
            image,
            image.width() * scale,
            image.height() * scale,
            FilterType::Nearest,
        );

        // Only the shape of the glyphs is used, every color gets its own copy
        let sprites = Color::ALL.map(|color| {
            let color = color.as_u32();
            let pixels = scaled
                .pixels()
                .map(|pixel| if pixel.0[3] > ALPHA_THRESHOLD { color } else { 0 })
                .collect::<Vec<_>>();

            BlitBuffer::from_buffer(&pixels, scaled.width(), ALPHA_THRESHOLD)
        });
        let char_size = char_size.as_::<u32>() * scale;

        Self { sprites, char_size }
    }

    /// Render text on a pixel buffer.
    pub fn render(&self, canvas: &mut [u32], text: &str, pos: Vec2<f64>, color: Color) {
        let sprite = &self.sprites[color as usize];

        let start_x = pos.x.round() as i32;
        let mut x = start_x;
        let mut y = pos.y.round() as i32;

        // Draw each character from the string
        for ch in text.chars() {
            // Don't draw characters that are not in the picture
            if !(CHAR_START..=CHAR_END).contains(&ch) {
                if ch == '\n' {
                    x = start_x;
                    y += self.char_size.h as i32;
                } else {
                    x += self.char_size.w as i32;
                }
                continue;
            }

            // The sub rectangle offset of the character is based on the starting character and counted using the ASCII index
            let char_offset = (ch as u32 - CHAR_START as u32) * self.char_size.w;

            // Draw the character
            sprite.blit(
                canvas,
                SIZE.into_tuple().into(),
                &BlitOptions::new_position(x, y).with_sub_rect(SubRect::new(
                    char_offset,
                    0,
                    self.char_size.into_tuple(),
                )),
            );

            // Move the cursor
            x += self.char_size.w as i32;
        }
    }

    /// Width in pixels of a single line of text.
    pub fn width(&self, text: &str) -> usize {
        text.chars().count() * self.char_size.w as usize
    }
}

impl Compound for Font {
    fn load(cache: AnyCache, id: &SharedString) -> Result<Self, BoxedError> {
        // Load the metadata
        let metadata = cache.load::<FontMetadata>(id)?.read();

        // Load the glyphs it points to
        let glyphs = cache.load::<Image>(&metadata.glyphs)?.read();

        let char_count = CHAR_END as u32 - CHAR_START as u32 + 1;
        let expected_width = char_count * metadata.glyph_size.width as u32;
        let expected_height = metadata.glyph_size.height as u32;
        if glyphs.0.width() < expected_width || glyphs.0.height() < expected_height {
            return Err(format!(
                "glyph image '{}' is {}x{}, expected at least {expected_width}x{expected_height}",
                metadata.glyphs,
                glyphs.0.width(),
                glyphs.0.height(),
            )
            .into());
        }

        Ok(Self::from_image(
            &glyphs.0,
            Extent2::new(metadata.glyph_size.width, metadata.glyph_size.height),
            metadata.scale,
        ))
    }
}

/// Font description loaded from a TOML file.
#[derive(Debug, Deserialize)]
struct FontMetadata {
    /// Asset path of the glyph image.
    glyphs: String,
    /// Size of a single glyph in the image.
    glyph_size: GlyphSize,
    /// Whole factor the glyphs are scaled up with.
    #[serde(default = "default_scale")]
    scale: u8,
}

impl Asset for FontMetadata {
    const EXTENSION: &'static str = "toml";

    type Loader = TomlLoader;
}

/// Size of a glyph in the image.
#[derive(Debug, Deserialize)]
struct GlyphSize {
    width: u8,
    height: u8,
}

fn default_scale() -> u8 {
    1
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use vek::{Extent2, Vec2};

    use super::Font;
    use crate::{graphics::Color, SIZE};

    /// Every glyph is a 2x2 block with only the top left pixel set.
    fn font(scale: u8) -> Font {
        let mut image = RgbaImage::new(94 * 2, 2);
        for index in 0..94 {
            image.put_pixel(index * 2, 0, Rgba([255, 255, 255, 255]));
        }

        Font::from_image(&image, Extent2::new(2, 2), scale)
    }

    #[test]
    fn test_width() {
        assert_eq!(font(1).width("Level: 1"), 16);
        assert_eq!(font(3).width("Level: 1"), 48);
    }

    #[test]
    fn test_render_colors_set_pixels() {
        let font = font(2);
        let mut canvas = vec![0; SIZE.product()];

        font.render(&mut canvas, "A B", Vec2::new(10.0, 20.0), Color::Red);

        // 'A' at x 10, scaled top left pixel is 2x2
        assert_eq!(canvas[20 * SIZE.w + 10], Color::Red.as_u32());
        assert_eq!(canvas[21 * SIZE.w + 11], Color::Red.as_u32());
        assert_eq!(canvas[22 * SIZE.w + 12], 0);
        // Space advances, 'B' starts at x 18
        assert_eq!(canvas[20 * SIZE.w + 14], 0);
        assert_eq!(canvas[20 * SIZE.w + 18], Color::Red.as_u32());
    }

    #[test]
    fn test_render_in_every_color() {
        let font = font(1);
        let mut canvas = vec![0; SIZE.product()];

        for (index, color) in Color::ALL.into_iter().enumerate() {
            font.render(&mut canvas, "#", Vec2::new(0.0, index as f64 * 2.0), color);
        }

        for (index, color) in Color::ALL.into_iter().enumerate() {
            assert_eq!(canvas[index * 2 * SIZE.w], color.as_u32());
        }
    }

    #[test]
    fn test_render_clips() {
        let font = font(4);
        let mut canvas = vec![0; SIZE.product()];

        font.render(&mut canvas, "offscreen", Vec2::new(1275.0, 716.0), Color::White);
        font.render(&mut canvas, "offscreen", Vec2::new(-20.0, -4.0), Color::White);

        assert_eq!(canvas[0], 0);
        assert_eq!(canvas[716 * SIZE.w + 1275], Color::White.as_u32());
    }
}
