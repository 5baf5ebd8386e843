//! Window, keyboard and speaker around an [`Interpreter`].

use std::{
    path::PathBuf,
    time::{
        Duration,
        Instant,
    },
};

use anyhow::{
    Context,
    Error,
};
use log::{
    error,
    info,
};
use macroquad::{
    audio::{
        load_sound_from_bytes,
        play_sound,
        stop_sound,
        PlaySoundParams,
        Sound,
    },
    color::{
        self,
        Color,
    },
    input::{
        is_key_down,
        is_key_pressed,
        KeyCode,
    },
    shapes::draw_rectangle,
    window::{
        clear_background,
        next_frame,
    },
};

use crate::{
    beep,
    constants,
    emulator::{
        Interpreter,
        Quirks,
    },
    mem::Rom,
    screenshot,
};

const PIXEL_COLOR: Color = Color {
    r: 0.0,
    g: 0.5,
    b: 0.0,
    a: 1.0,
};

/// The most emulated time made up for in one frame after a stall.
const MAX_CATCH_UP: Duration = Duration::from_millis(250);

#[rustfmt::skip]
const KEYMAP: [(KeyCode, u8); 16] = [
    (KeyCode::Key1, 0x1), (KeyCode::Key2, 0x2), (KeyCode::Key3, 0x3), (KeyCode::Key4, 0xC),
    (KeyCode::Q, 0x4),    (KeyCode::W, 0x5),    (KeyCode::E, 0x6),    (KeyCode::R, 0xD),
    (KeyCode::A, 0x7),    (KeyCode::S, 0x8),    (KeyCode::D, 0x9),    (KeyCode::F, 0xE),
    (KeyCode::Z, 0xA),    (KeyCode::X, 0x0),    (KeyCode::C, 0xB),    (KeyCode::V, 0xF),
];

#[derive(Debug, Clone)]
pub struct Settings {
    pub rom_path: PathBuf,
    pub instructions_per_second: u32,
    pub pixel_size: i32,
    pub quirks: Quirks,
    /// Written when the window is closed.
    pub screenshot: Option<PathBuf>,
}

struct Beeper {
    sound: Sound,
    playing: bool,
}

impl Beeper {
    async fn new() -> Result<Self, Error> {
        let sound = load_sound_from_bytes(&beep::beep_wav()).await?;
        Ok(Self { sound, playing: false })
    }

    fn update(&mut self, tone: bool) {
        if tone && !self.playing {
            play_sound(
                &self.sound,
                PlaySoundParams {
                    looped: true,
                    volume: 0.5,
                },
            );
        } else if !tone && self.playing {
            stop_sound(&self.sound);
        }
        self.playing = tone;
    }
}

pub async fn run(settings: Settings) -> Result<(), Error> {
    let rom = Rom::load(&settings.rom_path).with_context(|| format!("loading {}", settings.rom_path.display()))?;
    let mut interpreter = Interpreter::with_quirks(settings.quirks);
    interpreter.load_program(rom.data())?;
    info!(
        "running {} ({} bytes) at {} instructions per second",
        settings.rom_path.display(),
        rom.len(),
        settings.instructions_per_second
    );

    let mut beeper = Beeper::new().await?;
    let timer_period = Duration::from_secs_f64(1.0 / constants::TIMER_HZ);
    let instruction_period = Duration::from_secs_f64(1.0 / settings.instructions_per_second.max(1) as f64);

    let start = Instant::now();
    let mut t_timer = start;
    let mut t_instruction = start;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        for (code, key) in KEYMAP {
            interpreter.set_key(key, is_key_down(code));
        }

        let now = Instant::now();
        if now.duration_since(t_instruction) > MAX_CATCH_UP {
            t_instruction = now.checked_sub(MAX_CATCH_UP).unwrap_or(now);
        }
        if now.duration_since(t_timer) > MAX_CATCH_UP {
            t_timer = now.checked_sub(MAX_CATCH_UP).unwrap_or(now);
        }

        while now.duration_since(t_timer) >= timer_period {
            t_timer += timer_period;
            interpreter.tick();
            interpreter.set_draw_permit(true);
        }

        while now.duration_since(t_instruction) >= instruction_period {
            t_instruction += instruction_period;
            if interpreter.fault().is_some() {
                continue;
            }
            if let Err(err) = interpreter.step() {
                error!("program halted: {err}");
            }
        }

        beeper.update(interpreter.is_tone_playing());
        render(&interpreter, settings.pixel_size);
        next_frame().await;
    }

    beeper.update(false);

    if let Some(path) = &settings.screenshot {
        screenshot::save(interpreter.snapshot_display(), settings.pixel_size.max(1) as u32, path)
            .with_context(|| format!("saving screenshot to {}", path.display()))?;
        info!("saved screenshot to {}", path.display());
    }

    Ok(())
}

fn render(interpreter: &Interpreter, pixel_size: i32) {
    clear_background(color::BLACK);

    let pixel_size = pixel_size as f32;
    for (y, row) in interpreter.snapshot_display().rows().enumerate() {
        for (x, on) in row.iter().enumerate() {
            if *on {
                draw_rectangle(x as f32 * pixel_size, y as f32 * pixel_size, pixel_size, pixel_size, PIXEL_COLOR);
            }
        }
    }
}
