use raqote::{DrawTarget, Source};
use vek::{Extent2, Vec2};

use crate::{
    graphics::{Color, DRAW_OPTIONS},
    SIZE,
};

/// Draw a healthbar.
pub fn healthbar(
    health: u32,
    max_health: u32,
    pos: Vec2<f64>,
    size: Extent2<f64>,
    canvas: &mut [u32],
) {
    puffin::profile_scope!("Render healthbar");

    let pos = pos.as_::<f32>();
    let size = size.as_::<f32>();

    // Convert the buffer to a raqote target
    let mut draw = DrawTarget::from_backing(SIZE.w as i32, SIZE.h as i32, canvas);

    // Draw background
    draw.fill_rect(
        pos.x,
        pos.y,
        size.w,
        size.h,
        &Source::Solid(Color::Red.to_source()),
        &DRAW_OPTIONS,
    );

    // Draw fill
    let fill_width = fill_fraction(health, max_health) as f32 * size.w;
    draw.fill_rect(
        pos.x,
        pos.y,
        fill_width,
        size.h,
        &Source::Solid(Color::Green.to_source()),
        &DRAW_OPTIONS,
    );
}

/// How much of the bar is filled.
fn fill_fraction(health: u32, max_health: u32) -> f64 {
    if max_health == 0 {
        return 0.0;
    }

    (health as f64 / max_health as f64).clamp(0.0, 1.0)
}
