use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use vip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vip8_core::FrameBuffer;

/// Screen-pixel side length of one machine pixel
const SCALE: usize = 10;

/// # Display
///
/// Renders framebuffer snapshots into an SDL2 window, scaled up from the
/// machine's 64x32 monochrome grid. It holds no machine state of its own;
/// callers hand it a frame whenever one is worth drawing.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Opens a centered window on the given SDL2 context.
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let video = sdl.video()?;
        let window = video
            .window(
                "vip8",
                (DISPLAY_WIDTH * SCALE) as u32,
                (DISPLAY_HEIGHT * SCALE) as u32,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| e.to_string())?;
        Ok(Display { canvas })
    }

    /// Flattens a framebuffer into RGB24 texture bytes.
    ///
    /// Rows concatenate top to bottom; each pixel becomes three equal color
    /// channels, 255 for lit and 0 for dark.
    fn texture_bytes(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|&px| std::iter::repeat(u8::from(px) * 255).take(3))
            .collect()
    }

    /// Uploads one frame as a streaming texture and presents it, letting the
    /// renderer scale it to the window.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        texture.with_lock(None, |buffer: &mut [u8], _pitch: usize| {
            buffer.copy_from_slice(&Display::texture_bytes(frame));
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
