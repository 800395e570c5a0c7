use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// The 64x32 monochrome display surface.
///
/// Only the draw and clear instructions mutate it. Coordinates wrap on both
/// axes, so sprites drawn at the edges reappear on the opposite side.
pub struct FrameBuffer {
    pixels: [bool; SCREEN_WIDTH * SCREEN_HEIGHT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            pixels: [false; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }
}

impl FrameBuffer {
    pub fn clear(&mut self) {
        self.pixels = [false; SCREEN_WIDTH * SCREEN_HEIGHT];
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[index(x, y)]
    }

    /// XOR one sprite pixel into the buffer.
    ///
    /// Returns true when the pixel was already lit and this flip turned it
    /// off, which is what the draw instruction reports as a collision.
    pub fn flip(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[index(x, y)];
        let collision = *pixel;
        *pixel = !*pixel;
        collision
    }

    /// Row-major pixel states, for frontends painting the screen.
    pub fn as_slice(&self) -> &[bool; SCREEN_WIDTH * SCREEN_HEIGHT] {
        &self.pixels
    }
}

fn index(x: usize, y: usize) -> usize {
    let x = x % SCREEN_WIDTH;
    let y = y % SCREEN_HEIGHT;
    y * SCREEN_WIDTH + x
}
