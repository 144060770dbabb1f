//! Stardust dating sim
//!
//! Menu-driven host for the yoyo engine. Runs headless on the software
//! framebuffer: builds the main menu, replays a short scripted input
//! session, saves the last frame and shuts down.

use std::error::Error;
use std::path::PathBuf;
use std::rc::Rc;

use log::LevelFilter;
use yoyo_engine::prelude::*;
use yoyo_engine::foundation::logging;
use yoyo_engine::core::config::Config;

const SETTINGS_FILE: &str = "stardust.toml";
const SCREENSHOT_FILE: &str = "stardust_frame.png";
const MENU_FONT: &str = "fonts/Nunito-Regular.ttf";
const MENU_FONT_SIZE: f32 = 500.0;

/// Command line switches
#[derive(Debug, Default, Clone, Copy)]
struct Flags {
    debug: bool,
    skip_intro: bool,
}

impl Flags {
    fn parse(args: impl Iterator<Item = String>) -> Self {
        let mut flags = Self::default();
        for arg in args {
            match arg.as_str() {
                "--debug" | "-d" => flags.debug = true,
                "--skipintro" | "-s" => flags.skip_intro = true,
                other => log::warn!("Ignoring unknown argument '{}'", other),
            }
        }
        flags
    }
}

/// Assets shared by the scene builders
struct Assets {
    font: Option<Font>,
    background: PathBuf,
    portrait: PathBuf,
}

fn build_main_menu(graphics: &mut Graphics, assets: &Rc<Assets>) -> Result<(), GraphicsError> {
    // The menu stays usable without its backdrop, a missing one is already logged
    graphics.create_image(0, Placement::centered(0.5, 0.5, 1.0, 1.0), &assets.background).ok();

    let play = Callback::new("load_scene", {
        let assets = Rc::clone(assets);
        move |graphics: &mut Graphics, callback: &Callback| load_scene(graphics, callback, &assets)
    })
    .with_params(CallbackParams::new([
        "game".into(),
        CallbackParam::None,
        CallbackParam::None,
        CallbackParam::None,
    ]));

    let play_placement = Placement::centered(0.5, 0.6, 0.2, 0.1);
    match &assets.font {
        Some(font) => {
            graphics.create_text(1, Placement::new(0.0, 0.0, 0.6, 0.15), "Stardust Dating Sim", font, Color::WHITE)?;
            graphics.create_button(2, play_placement, "Play", font, Color::WHITE, None, play)?;
        }
        None => {
            log::warn!("Menu font missing, using a plain play button");
            graphics.add_button(2, play_placement, Texture::solid(4, 2, Color::rgb(90, 40, 160)), play)?;
        }
    }
    Ok(())
}

fn build_game_scene(graphics: &mut Graphics, assets: &Assets) -> Result<(), GraphicsError> {
    graphics.create_image(0, Placement::centered(0.5, 0.5, 1.0, 1.0), &assets.background)?;
    if let Some(font) = &assets.font {
        graphics.create_text(2, Placement::new(0.1, 0.8, 0.8, 0.1), "Hello there, traveller.", font, Color::WHITE)?;
    }
    // Portraits are optional, a missing one is already logged
    graphics.create_image(1, Placement::centered(0.5, 0.55, 0.3, 0.8), &assets.portrait).ok();
    Ok(())
}

/// Button handler: swap the current scene for the one named in slot 0
fn load_scene(graphics: &mut Graphics, callback: &Callback, assets: &Assets) {
    let Some(scene) = callback.params().str(0) else {
        log::warn!("'{}' called without a scene name", callback.action());
        return;
    };

    graphics.clear_all(false);
    let result = match scene {
        "game" => build_game_scene(graphics, assets),
        other => {
            log::warn!("Unknown scene '{}'", other);
            Ok(())
        }
    };

    match result {
        Ok(()) => log::info!("Loaded scene '{}'", scene),
        Err(e) => log::error!("Failed to load scene '{}': {}", scene, e),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let flags = Flags::parse(std::env::args().skip(1));
    logging::init_with_level(if flags.debug { LevelFilter::Debug } else { LevelFilter::Info });

    log::info!("Stardust Crusaders Dating Sim v{}", env!("CARGO_PKG_VERSION"));

    let config = EngineConfig::load_or_default(SETTINGS_FILE)?
        .with_debug(flags.debug)
        .with_skip_intro(flags.skip_intro);
    let target = Framebuffer::new(config.screen_width, config.screen_height);
    let (width, height) = (config.screen_width, config.screen_height);

    let mut engine = Engine::new(config, Box::new(target), Box::new(NullAudio::new()))?;

    let music = engine.resource_path("music/menu_loop.mp3");
    engine.audio_mut().play_sound(&music, -1);

    let font = match Font::load(engine.resource_path(MENU_FONT), MENU_FONT_SIZE) {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    };
    let assets = Rc::new(Assets {
        font,
        background: engine.resource_path("images/people720.png"),
        portrait: engine.resource_path("images/character.png"),
    });

    if let Err(e) = build_main_menu(engine.graphics_mut(), &assets) {
        log::error!("Main menu incomplete: {}", e);
    }

    // Stand-in for a window event pump
    let script = [
        HostEvent::Click { x: width as i32 / 2, y: height as i32 * 6 / 10 },
        HostEvent::Resized { width: width * 3 / 2, height: height * 3 / 2 },
        HostEvent::Quit,
    ];
    let mut events = script.into_iter();

    while engine.is_running() {
        if let Some(event) = events.next() {
            if let Some(button) = engine.handle_event(event) {
                log::info!("Clicked button {}", button);
            }
        }
        engine.frame();
    }

    match engine.graphics().target().capture() {
        Some(frame) => {
            frame.save(SCREENSHOT_FILE)?;
            log::info!("Saved last frame to {}", SCREENSHOT_FILE);
        }
        None => log::warn!("Render target cannot capture frames"),
    }

    engine.shutdown();
    log::info!("Shut down game");
    Ok(())
}
