// src/display.rs
//
// Interactive window for a rendered figure. Closes on the window's close
// button or Escape.

use minifb::{Key, Window, WindowOptions};

use crate::error::PlotResult;
use crate::visualisation::RgbImage;

/// Convert packed RGB bytes to the 0RGB u32 pixels minifb expects.
pub(crate) fn rgb_to_0rgb(rgb: &[u8], out: &mut [u32]) {
    for (dst, px) in out.iter_mut().zip(rgb.chunks_exact(3)) {
        *dst = (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32;
    }
}

/// Show `image` until the user closes the window.
pub fn show(image: &RgbImage, title: &str) -> PlotResult<()> {
    let w = image.width as usize;
    let h = image.height as usize;
    let mut framebuf = vec![0u32; w * h];
    rgb_to_0rgb(&image.pixels, &mut framebuf);

    let mut window = Window::new(title, w, h, WindowOptions::default())?;
    window.set_target_fps(30);
    log::info!("showing {}x{} figure, press Esc or close the window to exit", w, h);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        window.update_with_buffer(&framebuf, w, h)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_rgb_into_0rgb() {
        let rgb = [0x12, 0x34, 0x56, 0xff, 0x00, 0x80];
        let mut out = [0u32; 2];
        rgb_to_0rgb(&rgb, &mut out);
        assert_eq!(out, [0x0012_3456, 0x00ff_0080]);
    }
}
