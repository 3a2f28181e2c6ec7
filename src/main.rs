mod assets;
mod boss;
mod font;
mod game;
mod graphics;
mod input;
mod player;
mod projectile;
mod random;
mod settings;
mod shield;
mod shoot_window;
mod sprite;
mod textures;
mod timer;
mod window;

use assets::Assets;
use game::GameState;
use input::Input;
use miette::Result;
use textures::Textures;
use vek::Extent2;
use window::WindowConfig;

/// Window size.
pub const SIZE: Extent2<usize> = Extent2::new(1280, 720);
/// Updates per second of the update loop.
pub const UPDATES_PER_SECOND: u32 = 60;

/// Everything the window loop owns.
struct Game {
    /// Simulation.
    state: GameState,
    /// Randomness for the simulation.
    rng: fastrand::Rng,
    /// Images and fonts.
    textures: Textures,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Enable profiling server
    #[cfg(feature = "profiling")]
    let _puffin_server = {
        use miette::IntoDiagnostic;

        let server_addr = format!("0.0.0.0:{}", puffin_http::DEFAULT_PORT);
        let server = puffin_http::Server::new(&server_addr).into_diagnostic()?;
        log::info!(
            "Puffin profiling server running at '{server_addr}', view with:\n\tpuffin_viewer --url 127.0.0.1:{}",
            puffin_http::DEFAULT_PORT
        );

        puffin::set_scopes_on(true);

        server
    };

    // Everything is loaded up front so a missing file fails before the window opens
    let assets = Assets::load()?;
    let settings = assets.settings()?;
    let textures = Textures::load(&assets, &settings)?;

    // Construct the game
    let mut rng = fastrand::Rng::new();
    let state = GameState::new(settings, &mut rng);

    window::run(
        Game {
            state,
            rng,
            textures,
        },
        WindowConfig {
            buffer_size: SIZE,
            title: "Gaia's Quest".to_string(),
            updates_per_second: UPDATES_PER_SECOND,
            max_frame_time: 0.1,
        },
        |g, keyboard| {
            // Update the game
            g.state.update(&Input::from_keyboard(keyboard), &mut g.rng);
        },
        |g, canvas| {
            // Draw the game
            g.state.render(canvas, &g.textures);
        },
    )
}
