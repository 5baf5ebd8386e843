use std::path::Path;

use image::{
    GrayImage,
    ImageResult,
    Luma,
};

use crate::display::Display;

const ON: Luma<u8> = Luma([255]);
const OFF: Luma<u8> = Luma([0]);

/// Renders the framebuffer with every CHIP-8 pixel scaled to a `pixel_size` square.
pub fn render(display: &Display, pixel_size: u32) -> GrayImage {
    let pixel_size = pixel_size.max(1);
    let width = display.width() as u32 * pixel_size;
    let height = display.height() as u32 * pixel_size;

    GrayImage::from_fn(width, height, |x, y| {
        if display.pixel((x / pixel_size) as usize, (y / pixel_size) as usize) {
            ON
        } else {
            OFF
        }
    })
}

/// Writes the framebuffer to `path`, the format follows the file extension.
pub fn save<P: AsRef<Path>>(display: &Display, pixel_size: u32, path: P) -> ImageResult<()> {
    if let Some(folders) = path.as_ref().parent() {
        std::fs::create_dir_all(folders)?;
    }
    render(display, pixel_size).save(path)
}
