pub const TOTAL_RAM: usize = 0x1000;
pub const MEMORY_OFFSET: usize = 0x200;
pub const AVAILABLE_RAM: usize = TOTAL_RAM - MEMORY_OFFSET;
pub const FONT_OFFSET: usize = 0x050;
pub const FONT_GLYPH_SIZE: u16 = 5;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

pub const REGISTER_COUNT: usize = 16;
pub const FLAG_REGISTER: u8 = 0xF;
pub const STACK_DEPTH: usize = 16;
pub const KEY_COUNT: usize = 16;

pub const INSTRUCTIONS_PER_SECOND: u32 = 700;
pub const TIMER_HZ: f64 = 60.0;
pub const PIXEL_SIZE: i32 = 10;
pub const ADDRESS_MASK: u16 = (TOTAL_RAM - 1) as u16;
