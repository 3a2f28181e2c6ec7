use blit::{Blit, BlitBuffer, BlitOptions, ToBlitBuffer};
use image::{imageops::FilterType, RgbaImage};
use vek::{Extent2, Vec2};

use crate::SIZE;

/// Pixels with an alpha below this are not drawn.
const ALPHA_THRESHOLD: u8 = 127;

/// Image scaled to its on-screen size.
pub struct Sprite {
    /// Image to render.
    sprite: BlitBuffer,
}

impl Sprite {
    /// Scale an image with nearest-neighbour filtering so pixel art stays crisp.
    pub fn from_image(image: &RgbaImage, size: Extent2<u32>) -> Self {
        let scaled = if image.dimensions() == size.into_tuple() {
            image.clone()
        } else {
            image::imageops::resize(image, size.w, size.h, FilterType::Nearest)
        };
        let sprite = scaled.to_blit_buffer_with_alpha(ALPHA_THRESHOLD);

        Self { sprite }
    }

    /// Draw the sprite with the top left at the position.
    pub fn render(&self, canvas: &mut [u32], pos: Vec2<f64>) {
        self.sprite.blit(
            canvas,
            SIZE.into_tuple().into(),
            &BlitOptions::new_position(pos.x.round() as i32, pos.y.round() as i32),
        );
    }

    /// Width of the image.
    #[cfg(test)]
    pub fn width(&self) -> u32 {
        self.sprite.width() as u32
    }

    /// Height of the image.
    #[cfg(test)]
    pub fn height(&self) -> u32 {
        self.sprite.height() as u32
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use vek::{Extent2, Vec2};

    use super::Sprite;
    use crate::SIZE;

    #[test]
    fn test_scales_to_size() {
        let image = RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]));
        let sprite = Sprite::from_image(&image, Extent2::new(50, 25));

        assert_eq!(sprite.width(), 50);
        assert_eq!(sprite.height(), 25);
    }

    #[test]
    fn test_skips_transparent_pixels() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 0, 0]));
        let sprite = Sprite::from_image(&image, Extent2::new(2, 1));

        let mut canvas = vec![0x12_34_56_78; SIZE.product()];
        sprite.render(&mut canvas, Vec2::new(10.0, 0.0));

        assert_eq!(canvas[10] & 0x00_ff_ff_ff, 0x00_ff_ff_ff);
        assert_eq!(canvas[11], 0x12_34_56_78);
    }
}
