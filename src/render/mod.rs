//! Amplitude-map rendering of sample buffers.

mod map;

pub use map::AmplitudeMap;

use crate::buffer::SampleBuffer;
use egui::Color32;
use thiserror::Error;

/// Peaks below this floor count as silence and normalize against 1.0 instead.
const PEAK_FLOOR: f32 = 1e-6;

/// Errors raised for malformed render geometry.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Zero width or height; dimensions are never clamped silently.
    #[error("Waveform dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },
    /// Scale must be finite and positive.
    #[error("Waveform scale must be finite and positive, got {scale}")]
    InvalidScale { scale: f32 },
}

/// Renders averaged amplitude maps from sample buffers.
///
/// Pure and stateless: identical inputs always produce bit-identical maps.
#[derive(Clone)]
pub struct WaveformRenderer {
    width: u32,
    height: u32,
    foreground: Color32,
}

impl WaveformRenderer {
    /// Create a renderer with the target map size.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            foreground: Color32::from_rgb(250, 246, 240),
        })
    }

    /// Replace the paint color.
    pub fn with_color(mut self, color: Color32) -> Self {
        self.foreground = color;
        self
    }

    /// Current render target dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Render the buffer into a fresh amplitude map.
    ///
    /// Each pixel column averages the absolute value of every sample (all
    /// channels) in its frame range, normalized by `peak / scale`. A larger
    /// `scale` therefore amplifies quiet material rather than shrinking the
    /// image. An empty buffer renders fully transparent; a silent buffer
    /// still draws the center row.
    pub fn render(&self, buffer: &SampleBuffer, scale: f32) -> Result<AmplitudeMap, RenderError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RenderError::InvalidScale { scale });
        }
        let mut map = AmplitudeMap::transparent(self.width, self.height);
        let sample_count = buffer.sample_count();
        let channels = buffer.channel_count();
        if sample_count == 0 || channels == 0 {
            return Ok(map);
        }
        let mut peak = buffer.peak();
        if peak < PEAK_FLOOR {
            peak = 1.0;
        }
        let samples = buffer.samples();
        let samples_per_pixel = sample_count.div_ceil(self.width as usize).max(1);
        let half_height = (self.height / 2) as i64;
        let y_limit = (self.height - 1) as i64;
        for x in 0..self.width {
            let start = x as usize * samples_per_pixel;
            let end = (start + samples_per_pixel).min(sample_count);
            let mut sum = 0.0_f32;
            for frame in start..end {
                let base = frame * channels;
                for sample in &samples[base..base + channels] {
                    sum += sample.abs();
                }
            }
            // The column average divides by the frame budget, not the frame
            // count, so trailing short columns taper instead of stretching.
            let average = sum / samples_per_pixel as f32;
            let amplitude = average * scale / peak;
            let extent = (amplitude * half_height as f32).round() as i64;
            let y_top = (half_height + extent).clamp(0, y_limit);
            let y_bottom = (half_height - extent).clamp(0, y_limit);
            for y in y_bottom..=y_top {
                map.set(x, y as u32, self.foreground);
            }
        }
        Ok(map)
    }
}
