//! Plain-value presentation settings persisted by the host.

use egui::Color32;
use serde::{Deserialize, Serialize};

/// Lower bound of the user scale slider.
pub const SCALE_MIN: f32 = 0.1;
/// Upper bound of the user scale slider.
pub const SCALE_MAX: f32 = 5.0;

/// Display geometry and colors for the waveform view.
///
/// The crate performs no I/O; hosts load and save this through their own
/// configuration mechanism and hand it back as plain values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    pub waveform_width: u32,
    pub waveform_height: u32,
    pub waveform_color: [u8; 4],
    pub background_color: [u8; 4],
    pub grid_color: [u8; 4],
    pub playhead_color: [u8; 4],
    pub playhead_width: u32,
    pub marker_color: [u8; 4],
    pub marker_width: u32,
    pub waveform_scale: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            waveform_width: 400,
            waveform_height: 128,
            waveform_color: [255, 255, 255, 255],
            background_color: [18, 16, 14, 255],
            grid_color: [128, 128, 128, 255],
            playhead_color: [255, 80, 80, 255],
            playhead_width: 2,
            marker_color: [255, 200, 80, 255],
            marker_width: 4,
            waveform_scale: 1.0,
        }
    }
}

impl PlayerSettings {
    /// User scale clamped to the slider bounds.
    pub fn clamped_scale(&self) -> f32 {
        clamp_scale(self.waveform_scale)
    }

    /// Waveform paint color as an egui color.
    pub fn waveform_color32(&self) -> Color32 {
        color32(self.waveform_color)
    }

    /// Background color as an egui color.
    pub fn background_color32(&self) -> Color32 {
        color32(self.background_color)
    }
}

/// Clamp a user scale to the slider bounds; non-finite input falls back to 1.0.
pub fn clamp_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(SCALE_MIN, SCALE_MAX)
    } else {
        1.0
    }
}

/// Convert a stored RGBA quadruple into an egui color.
pub fn color32(rgba: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3])
}
