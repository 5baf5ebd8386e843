use crate::constants::{
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
};

/// What happens to sprite pixels that run past the right or bottom edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgePolicy {
    #[default]
    Clip,
    Wrap,
}

/// 64x32 monochrome framebuffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Display {
    pixels: [bool; SCREEN_WIDTH * SCREEN_HEIGHT],
}

impl Display {
    pub fn new() -> Self {
        Self {
            pixels: [false; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    pub fn width(&self) -> usize {
        SCREEN_WIDTH
    }

    pub fn height(&self) -> usize {
        SCREEN_HEIGHT
    }

    /// Out of range coordinates read as off.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < SCREEN_WIDTH && y < SCREEN_HEIGHT && self.pixels[y * SCREEN_WIDTH + x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks(SCREEN_WIDTH)
    }

    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|pixel| **pixel).count()
    }

    /// XOR `sprite` onto the screen with its top left corner at (`x`, `y`).
    ///
    /// The start position always wraps, each byte is one row drawn most significant bit first.
    /// Returns true if any lit pixel was switched off.
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8], edges: EdgePolicy) -> bool {
        let start_x = x as usize % SCREEN_WIDTH;
        let start_y = y as usize % SCREEN_HEIGHT;
        let mut bit_flipped_off = false;

        for (row, byte) in sprite.iter().enumerate() {
            let mut screen_pos_y = start_y + row;
            if screen_pos_y >= SCREEN_HEIGHT {
                match edges {
                    EdgePolicy::Clip => break,
                    EdgePolicy::Wrap => screen_pos_y %= SCREEN_HEIGHT,
                }
            }

            for col in 0..8 {
                if (byte >> (7 - col)) & 1 == 0 {
                    continue;
                }

                let mut screen_pos_x = start_x + col;
                if screen_pos_x >= SCREEN_WIDTH {
                    match edges {
                        EdgePolicy::Clip => break,
                        EdgePolicy::Wrap => screen_pos_x %= SCREEN_WIDTH,
                    }
                }

                let pixel = &mut self.pixels[screen_pos_y * SCREEN_WIDTH + screen_pos_x];
                if *pixel {
                    bit_flipped_off = true;
                }
                *pixel ^= true;
            }
        }

        bit_flipped_off
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|on| if *on { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
