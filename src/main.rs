use std::{
    path::PathBuf,
    sync::OnceLock,
};

use chip8rs::{
    constants,
    EdgePolicy,
    Platform,
    Quirks,
    Settings,
};
use clap::Parser;
use macroquad::window::Conf;

#[derive(Parser, Clone, Debug)]
#[command(version, about = "CHIP-8 interpreter", long_about = None)]
struct Args {
    /// Program image to run
    rom_path: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Platform::CosmacVip, help = "Interpreter behaviour to emulate")]
    platform: Platform,

    #[arg(long, help = "Wrap sprites around the screen edges instead of clipping them")]
    wrap_sprites: bool,

    #[arg(short, long, default_value_t = constants::INSTRUCTIONS_PER_SECOND, help = "Instructions per second")]
    ips: u32,

    #[arg(long, default_value_t = constants::PIXEL_SIZE, help = "Window pixels per CHIP-8 pixel")]
    pixel_size: i32,

    #[arg(long, help = "Save the screen to this image when the window closes")]
    screenshot: Option<PathBuf>,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        let mut quirks = Quirks::from(args.platform);
        if args.wrap_sprites {
            quirks.sprite_edges = EdgePolicy::Wrap;
        }

        Settings {
            rom_path: args.rom_path,
            instructions_per_second: args.ips,
            pixel_size: args.pixel_size.max(1),
            quirks,
            screenshot: args.screenshot,
        }
    }
}

/// Command line, parsed once and shared by the window config and `main`.
fn args() -> &'static Args {
    static ARGS: OnceLock<Args> = OnceLock::new();
    ARGS.get_or_init(Args::parse)
}

fn window_conf() -> Conf {
    let pixel_size = Settings::from(args().clone()).pixel_size;
    Conf {
        window_title: "chip8rs".to_owned(),
        window_width: constants::SCREEN_WIDTH as i32 * pixel_size,
        window_height: constants::SCREEN_HEIGHT as i32 * pixel_size,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from(args().clone());
    if let Err(err) = chip8rs::run(settings).await {
        log::error!("{err:?}");
        std::process::exit(1);
    }
}
