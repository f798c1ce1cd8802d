use egui::{Color32, ColorImage};

/// Fixed-size RGBA amplitude image produced by a render call.
///
/// Pixels are row-major with row zero at the bottom, the usual bottom-left
/// texture origin. [`to_color_image`](Self::to_color_image) flips the rows
/// for egui's top-left origin.
#[derive(Clone, Debug, PartialEq)]
pub struct AmplitudeMap {
    width: u32,
    height: u32,
    origin_at_bottom: bool,
    pixels: Vec<Color32>,
}

impl AmplitudeMap {
    pub(crate) fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            origin_at_bottom: true,
            pixels: vec![Color32::TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when row zero is the bottom row.
    pub fn origin_at_bottom(&self) -> bool {
        self.origin_at_bottom
    }

    /// Row-major pixel payload.
    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, with `y` counted from the origin row.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub(super) fn set(&mut self, x: u32, y: u32, color: Color32) {
        let idx = y as usize * self.width as usize + x as usize;
        if let Some(pixel) = self.pixels.get_mut(idx) {
            *pixel = color;
        }
    }

    /// Convert to an egui color image, flipping rows into top-left origin.
    pub fn to_color_image(&self) -> ColorImage {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut pixels = Vec::with_capacity(width * height);
        if self.origin_at_bottom {
            for y in (0..height).rev() {
                pixels.extend_from_slice(&self.pixels[y * width..(y + 1) * width]);
            }
        } else {
            pixels.extend_from_slice(&self.pixels);
        }
        ColorImage::new([width, height], pixels)
    }
}
