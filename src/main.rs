// What you SEE:
// • The photo in a window, a red brush circle following the mouse.
// • Click a blemish: the red circle sticks. Move away: a blue circle and line show the
//   clean spot you would clone from, and the blemish previews the heal live.
// • Click again to keep it. Z undoes, S saves, [ and ] (or the wheel) resize the brush.
//   ESC quits.

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use healing_brush::cli::{Args, Config};
use healing_brush::draw::{draw_text_5x7, HUD_COLOR};
use healing_brush::error::Error;
use healing_brush::io::load_image;
use healing_brush::session::{Outcome, Session, SessionState};
use healing_brush::window::Drawer;

const TITLE: &str = "Healing Brush";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // -h prints usage; bad options print usage and exit before any image is read.
    let config = Args::parse().into_config();

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<(), Error> {
    /* --- Image + window setup ---
       Visual: window opens showing the untouched photo. */
    let image = load_image(&config.input)?;
    let mut drawer = Drawer::new(TITLE, image.width, image.height)?;

    info!("Click on the blemish you want to remove, then on the area to clone from.");
    info!("ESC exits, 'z' undoes, 's' saves to '{}', '[' / ']' or the wheel change the brush size.", config.output.display());

    let mut session = Session::new(image, config.brush, config.output, config.clone);

    /* --- Reusable screen buffer ---
       Visual: the session frame plus the HUD line; the HUD never reaches the history. */
    let mut screen = session.view().clone();

    /* ------------------------------ Main loop ------------------------------ */
    'frames: while drawer.is_open() {
        for event in drawer.poll_events(session.brush().get()) {
            if let Outcome::Quit = session.dispatch(event) {
                break 'frames;
            }
        }

        screen.pixels.copy_from_slice(&session.view().pixels);
        let phase = match session.state() {
            SessionState::AwaitingTarget => "TARGET",
            SessionState::AwaitingSource { .. } => "SOURCE",
        };
        let hud = format!("{phase} | BRUSH: {}", session.brush().get());
        draw_text_5x7(&mut screen, 8, 8, &hud, HUD_COLOR);

        drawer.present(&screen)?;
    }

    Ok(())
}
