use miette::{IntoDiagnostic, Result, WrapErr};
use pixels::{Pixels, SurfaceTexture};
use vek::Extent2;
use winit::{dpi::LogicalSize, event_loop::EventLoop, window::WindowBuilder};
use winit_input_helper::WinitInputHelper;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Amount of pixels for the canvas.
    pub buffer_size: Extent2<usize>,
    /// Name in the title bar.
    pub title: String,
    /// Updates per second of the update loop.
    pub updates_per_second: u32,
    /// Longest a single frame may take before updates are skipped, in seconds.
    pub max_frame_time: f64,
}

/// State owned by the loop.
struct Runtime<G> {
    /// User state.
    state: G,
    /// Surface the canvas is copied to.
    pixels: Pixels,
    /// Keyboard state.
    input: WinitInputHelper,
    /// Pixels in `0xAARRGGBB` format.
    canvas: Vec<u32>,
}

/// Open a window and run the game loop until the window is closed.
///
/// `update` is called with a fixed timestep, `render` as often as possible.
/// Only returns when setting up the window fails.
pub fn run<G, U, R>(state: G, config: WindowConfig, mut update: U, mut render: R) -> Result<()>
where
    G: 'static,
    U: FnMut(&mut G, &WinitInputHelper) + 'static,
    R: FnMut(&mut G, &mut [u32]) + 'static,
{
    let event_loop = EventLoop::new();

    let size = LogicalSize::new(config.buffer_size.w as f64, config.buffer_size.h as f64);
    let window = WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(size)
        .with_min_inner_size(size)
        .build(&event_loop)
        .into_diagnostic()
        .wrap_err("Could not open window")?;

    let pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);

        Pixels::new(
            config.buffer_size.w as u32,
            config.buffer_size.h as u32,
            surface_texture,
        )
        .into_diagnostic()
        .wrap_err("Could not create pixel surface")?
    };

    log::info!(
        "Opened {}x{} window '{}'",
        config.buffer_size.w,
        config.buffer_size.h,
        config.title
    );

    let runtime = Runtime {
        state,
        pixels,
        input: WinitInputHelper::new(),
        canvas: vec![0; config.buffer_size.product()],
    };

    game_loop::game_loop(
        event_loop,
        window,
        runtime,
        config.updates_per_second,
        config.max_frame_time,
        move |g| {
            puffin::profile_scope!("Update");

            update(&mut g.game.state, &g.game.input);

            puffin::GlobalProfiler::lock().new_frame();
        },
        move |g| {
            puffin::profile_scope!("Render");

            let runtime = &mut g.game;
            render(&mut runtime.state, &mut runtime.canvas);
            copy_canvas(&runtime.canvas, runtime.pixels.frame_mut());

            if let Err(err) = runtime.pixels.render() {
                log::error!("Rendering the frame failed: {err}");

                g.exit();
            }
        },
        move |g, event| {
            let runtime = &mut g.game;
            if !runtime.input.update(event) {
                return;
            }

            if runtime.input.close_requested() || runtime.input.destroyed() {
                log::info!("Window closed");

                g.exit();
                return;
            }

            if let Some(size) = runtime.input.window_resized() {
                if let Err(err) = runtime.pixels.resize_surface(size.width, size.height) {
                    log::error!("Resizing the surface failed: {err}");

                    g.exit();
                }
            }
        },
    )
}

/// Convert `0xAARRGGBB` pixels to the RGBA bytes of the surface.
fn copy_canvas(canvas: &[u32], frame: &mut [u8]) {
    puffin::profile_function!();

    for (pixel, out) in canvas.iter().zip(frame.chunks_exact_mut(4)) {
        let [b, g, r, a] = pixel.to_le_bytes();
        out.copy_from_slice(&[r, g, b, a]);
    }
}

#[cfg(test)]
mod tests {
    use super::copy_canvas;

    #[test]
    fn test_copy_canvas_reorders_channels() {
        let canvas = [0xff_11_22_33, 0x80_aa_bb_cc];
        let mut frame = [0; 8];

        copy_canvas(&canvas, &mut frame);

        assert_eq!(frame, [0x11, 0x22, 0x33, 0xff, 0xaa, 0xbb, 0xcc, 0x80]);
    }
}
